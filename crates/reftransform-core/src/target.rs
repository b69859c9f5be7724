//! Camera background images, the objects a session edits.

use glam::DMat4;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// A reference image drawn behind a camera's view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundImage {
    /// Name of the assigned image, if any.
    pub image: Option<String>,
    /// Whether the background is shown.
    pub show_background: bool,
    /// Offset in view-frame units.
    pub offset: Vec2,
    /// Rotation in radians.
    pub rotation: f64,
    /// Uniform scale.
    pub scale: f64,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Default for BackgroundImage {
    fn default() -> Self {
        Self {
            image: None,
            show_background: true,
            offset: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

impl BackgroundImage {
    /// Create a visible background with an image assigned.
    pub fn with_image(name: impl Into<String>) -> Self {
        Self {
            image: Some(name.into()),
            ..Self::default()
        }
    }

    /// Check whether a session may edit this background.
    pub fn is_editable(&self) -> bool {
        self.show_background && self.image.is_some()
    }
}

/// A camera object carrying background images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraObject {
    pub name: String,
    /// Camera to world transform.
    pub matrix_world: DMat4,
    pub backgrounds: Vec<BackgroundImage>,
}

impl Default for CameraObject {
    fn default() -> Self {
        Self {
            name: "Camera".to_string(),
            matrix_world: DMat4::IDENTITY,
            backgrounds: Vec::new(),
        }
    }
}

impl CameraObject {
    /// Create a camera with the given backgrounds at the world origin.
    pub fn new(name: impl Into<String>, backgrounds: Vec<BackgroundImage>) -> Self {
        Self {
            name: name.into(),
            matrix_world: DMat4::IDENTITY,
            backgrounds,
        }
    }

    /// Index of the first visible background with an image.
    pub fn active_background_index(&self) -> Option<usize> {
        self.backgrounds.iter().position(BackgroundImage::is_editable)
    }

    /// The background a session would edit.
    pub fn active_background(&self) -> Option<&BackgroundImage> {
        self.backgrounds.iter().find(|bg| bg.is_editable())
    }

    /// Mutable access to the background a session would edit.
    pub fn active_background_mut(&mut self) -> Option<&mut BackgroundImage> {
        self.backgrounds.iter_mut().find(|bg| bg.is_editable())
    }
}

/// Values of a background captured when a session starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub offset: Vec2,
    pub rotation: f64,
    pub scale: f64,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl SessionSnapshot {
    /// Capture the transform fields of a background.
    pub fn capture(bg: &BackgroundImage) -> Self {
        Self {
            offset: bg.offset,
            rotation: bg.rotation,
            scale: bg.scale,
            flip_x: bg.flip_x,
            flip_y: bg.flip_y,
        }
    }

    /// Write every captured field back.
    pub fn restore(&self, bg: &mut BackgroundImage) {
        bg.offset = self.offset;
        bg.rotation = self.rotation;
        bg.scale = self.scale;
        bg.flip_x = self.flip_x;
        bg.flip_y = self.flip_y;
    }
}
