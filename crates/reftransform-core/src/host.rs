//! The host application seen from a modal session.
//!
//! The host owns the window, the cursor and the drawing surface. A session
//! only asks it for these services through [`Host`].

use crate::overlay::GuideLine;
use crate::snap::SnapSettings;
use serde::{Deserialize, Serialize};

/// Cursor glyphs a session may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorIcon {
    Default,
    Hand,
    MoveX,
    MoveY,
}

/// Severity of a message reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
}

/// Services the host provides to a running session.
pub trait Host {
    /// Set or clear the status bar text.
    fn set_status_text(&mut self, text: Option<&str>);

    /// Set or clear the viewport header text.
    fn set_header_text(&mut self, text: Option<&str>);

    /// Show a modal cursor glyph.
    fn set_cursor(&mut self, icon: CursorIcon);

    /// Restore the cursor that was shown before the session.
    fn restore_cursor(&mut self);

    /// Hide the cursor and report unbounded relative motion.
    fn grab_pointer(&mut self);

    /// Undo [`Host::grab_pointer`].
    fn release_pointer(&mut self);

    /// Register the per-frame guide line callback.
    fn add_draw_handler(&mut self);

    /// Replace the line drawn by the callback; `None` draws nothing.
    fn update_draw_handler(&mut self, line: Option<GuideLine>);

    /// Unregister the guide line callback.
    fn remove_draw_handler(&mut self);

    /// Ask for a repaint at the host's convenience.
    fn request_redraw(&mut self);

    /// Global snapping settings.
    fn snap_settings(&self) -> SnapSettings;

    /// Whether the viewport looks through the active camera.
    fn in_camera_view(&self) -> bool;

    /// Close one undo step in the host history.
    fn push_undo_step(&mut self, label: &str);

    /// Show a message to the user.
    fn report(&mut self, level: ReportLevel, message: &str);
}

/// A host that records every request, for headless use.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub status_text: Option<String>,
    pub header_text: Option<String>,
    pub cursor: CursorIcon,
    pub pointer_grabbed: bool,
    pub draw_handler: bool,
    pub guide_line: Option<GuideLine>,
    pub redraw_requests: usize,
    pub snap: SnapSettings,
    pub camera_view: bool,
    pub undo_steps: Vec<String>,
    pub reports: Vec<(ReportLevel, String)>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            status_text: None,
            header_text: None,
            cursor: CursorIcon::Default,
            pointer_grabbed: false,
            draw_handler: false,
            guide_line: None,
            redraw_requests: 0,
            snap: SnapSettings::default(),
            camera_view: true,
            undo_steps: Vec::new(),
            reports: Vec::new(),
        }
    }
}

impl RecordingHost {
    /// Create a host looking through the camera with snapping off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with the given snapping settings.
    pub fn with_snap(snap: SnapSettings) -> Self {
        Self {
            snap,
            ..Self::default()
        }
    }

    /// Check that no session left anything behind.
    pub fn is_clean(&self) -> bool {
        self.status_text.is_none()
            && self.header_text.is_none()
            && self.cursor == CursorIcon::Default
            && !self.pointer_grabbed
            && !self.draw_handler
    }
}

impl Host for RecordingHost {
    fn set_status_text(&mut self, text: Option<&str>) {
        self.status_text = text.map(str::to_string);
    }

    fn set_header_text(&mut self, text: Option<&str>) {
        self.header_text = text.map(str::to_string);
    }

    fn set_cursor(&mut self, icon: CursorIcon) {
        self.cursor = icon;
    }

    fn restore_cursor(&mut self) {
        self.cursor = CursorIcon::Default;
    }

    fn grab_pointer(&mut self) {
        self.pointer_grabbed = true;
    }

    fn release_pointer(&mut self) {
        self.pointer_grabbed = false;
    }

    fn add_draw_handler(&mut self) {
        self.draw_handler = true;
    }

    fn update_draw_handler(&mut self, line: Option<GuideLine>) {
        self.guide_line = line;
    }

    fn remove_draw_handler(&mut self) {
        self.draw_handler = false;
        self.guide_line = None;
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }

    fn snap_settings(&self) -> SnapSettings {
        self.snap
    }

    fn in_camera_view(&self) -> bool {
        self.camera_view
    }

    fn push_undo_step(&mut self, label: &str) {
        self.undo_steps.push(label.to_string());
    }

    fn report(&mut self, level: ReportLevel, message: &str) {
        self.reports.push((level, message.to_string()));
    }
}
