//! Reference Transform Core Library
//!
//! Modal Move, Rotate and Scale tools for camera background images, with a
//! rebindable keymap. The host application is reached through [`host::Host`].

pub mod host;
pub mod input;
pub mod keymap;
pub mod operators;
pub mod overlay;
pub mod preferences;
pub mod session;
pub mod snap;
pub mod target;
pub mod tools;

pub use host::{CursorIcon, Host, RecordingHost, ReportLevel};
pub use input::{InputEvent, InputKind, Modifiers, MouseButton};
pub use keymap::{Keybinding, KeymapError, KeymapRegistry, KeymapSection};
pub use operators::{Operator, OperatorStatus, run_modal};
pub use overlay::{GuideLine, SerializableColor};
pub use preferences::{Preferences, PreferencesError};
pub use session::{AxisConstraint, SessionError, TransformSession, Transition};
pub use snap::{SnapElement, SnapSettings, snap_angle_radians, snap_to_increment};
pub use target::{BackgroundImage, CameraObject, SessionSnapshot};
pub use tools::{ToolKind, ToolProfile};
