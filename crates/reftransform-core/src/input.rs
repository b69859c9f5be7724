//! Input events delivered to a modal session by the host event loop.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key names for the fixed confirm/cancel inputs.
pub const KEY_ESCAPE: &str = "Escape";
pub const KEY_SPACE: &str = "Space";
pub const KEY_RETURN: &str = "Return";

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Short name used in status hints ("LMB", "RMB", "MMB").
    pub fn short_name(self) -> &'static str {
        match self {
            MouseButton::Left => "LMB",
            MouseButton::Right => "RMB",
            MouseButton::Middle => "MMB",
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }
}

/// A physical input: a keyboard key by name or a mouse button.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    Key(String),
    Mouse(MouseButton),
}

impl InputKind {
    /// Keyboard key from its name (e.g. `"X"`, `"Escape"`).
    pub fn key(name: impl Into<String>) -> Self {
        InputKind::Key(name.into())
    }

    /// Check whether this is the named keyboard key.
    pub fn is_key(&self, name: &str) -> bool {
        matches!(self, InputKind::Key(k) if k == name)
    }

    /// Check whether this is the given mouse button.
    pub fn is_mouse(&self, button: MouseButton) -> bool {
        matches!(self, InputKind::Mouse(b) if *b == button)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Key(name) => f.write_str(name),
            InputKind::Mouse(button) => f.write_str(button.short_name()),
        }
    }
}

/// A single event from the host.
///
/// Pointer positions are screen-space pixels. While a session holds the
/// pointer grab the host reports unbounded positions, so only differences
/// between consecutive positions are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMove {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Press {
        input: InputKind,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Release {
        input: InputKind,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Auto-repeat of a held input.
    Repeat {
        input: InputKind,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Pointer motion with no modifiers held.
    pub fn pointer(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    /// Press of a keyboard key with no modifiers held.
    pub fn key_press(name: &str) -> Self {
        InputEvent::Press {
            input: InputKind::key(name),
            modifiers: Modifiers::NONE,
        }
    }

    /// Press of a mouse button with no modifiers held.
    pub fn mouse_press(button: MouseButton) -> Self {
        InputEvent::Press {
            input: InputKind::Mouse(button),
            modifiers: Modifiers::NONE,
        }
    }

    /// Modifier state carried by the event.
    pub fn modifiers(&self) -> Modifiers {
        match self {
            InputEvent::PointerMove { modifiers, .. }
            | InputEvent::Press { modifiers, .. }
            | InputEvent::Release { modifiers, .. }
            | InputEvent::Repeat { modifiers, .. } => *modifiers,
        }
    }

    /// The physical input, if this is not a pointer motion.
    pub fn input(&self) -> Option<&InputKind> {
        match self {
            InputEvent::PointerMove { .. } => None,
            InputEvent::Press { input, .. }
            | InputEvent::Release { input, .. }
            | InputEvent::Repeat { input, .. } => Some(input),
        }
    }

    /// Only the pressed transition triggers actions, not auto-repeat.
    pub fn is_press(&self) -> bool {
        matches!(self, InputEvent::Press { .. })
    }

    /// Replace the modifier state.
    pub fn with_modifiers(mut self, new: Modifiers) -> Self {
        match &mut self {
            InputEvent::PointerMove { modifiers, .. }
            | InputEvent::Press { modifiers, .. }
            | InputEvent::Release { modifiers, .. }
            | InputEvent::Repeat { modifiers, .. } => *modifiers = new,
        }
        self
    }
}
