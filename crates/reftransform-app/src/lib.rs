//! Reference Transform Application
//!
//! Headless shell around the core library: replays recorded input scripts
//! through a transform session and lists the keymap.

mod replay;
mod shortcuts;

pub use replay::{ReplayOutcome, ReplayScript, replay};
pub use shortcuts::{format_keymap, print_keymap};
