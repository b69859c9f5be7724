//! Status hints, header text and the constraint guide line.

use crate::keymap::{CONSTRAINT_X, CONSTRAINT_Y, FLIP_X, FLIP_Y, KeymapRegistry};
use crate::session::AxisConstraint;
use crate::target::BackgroundImage;
use crate::tools::ToolKind;
use glam::{DMat4, DVec3};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Distance the guide line extends to each side of its centre.
pub const GUIDE_HALF_LENGTH: f64 = 100.0;

/// Depth in front of the camera the guide line is drawn at.
pub const GUIDE_DEPTH: f64 = -2.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn red() -> Self {
        Self::new(255, 0, 0, 255)
    }

    pub fn green() -> Self {
        Self::new(0, 255, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A world-space line segment drawn while an axis is locked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub start: DVec3,
    pub end: DVec3,
    pub color: SerializableColor,
}

/// Guide line for a constraint, placed in front of the camera.
///
/// Vertical-only motion draws a green line along the camera's local y axis,
/// horizontal-only motion a red line along its local x axis.
pub fn guide_line(constraint: AxisConstraint, camera_matrix: DMat4) -> Option<GuideLine> {
    let (axis, color) = match constraint {
        AxisConstraint::None => return None,
        AxisConstraint::Vertical => (DVec3::Y, SerializableColor::green()),
        AxisConstraint::Horizontal => (DVec3::X, SerializableColor::red()),
    };

    let center = camera_matrix * DMat4::from_translation(DVec3::new(0.0, 0.0, GUIDE_DEPTH));
    let at = |local: DVec3| center.transform_point3(local);

    Some(GuideLine {
        start: at(-axis * GUIDE_HALF_LENGTH),
        end: at(axis * GUIDE_HALF_LENGTH),
        color,
    })
}

/// Status bar text listing the controls of a tool.
pub fn status_hint(tool: ToolKind, keymap: &KeymapRegistry) -> String {
    let mut hint = format!(
        "LMB, ENTER: Confirm | RMB, ESC: Cancel | {}: Flip Horizontally | {}: Flip Vertically",
        keymap.display(FLIP_X),
        keymap.display(FLIP_Y),
    );
    if tool.profile().supports_constraint {
        hint.push_str(&format!(
            " | {}: Constraint Horizontal | {}: Constraint Vertical",
            keymap.display(CONSTRAINT_X),
            keymap.display(CONSTRAINT_Y),
        ));
    }
    hint
}

/// Header text showing the value a tool edits.
pub fn header_text(tool: ToolKind, bg: &BackgroundImage) -> String {
    let precision = tool.profile().precision;
    match tool {
        ToolKind::Move => format!(
            "Background Offset: {:.*}, {:.*}",
            precision, bg.offset.x, precision, bg.offset.y
        ),
        ToolKind::Rotate => format!(
            "Background Rotation: {:.*}°",
            precision,
            bg.rotation.to_degrees()
        ),
        ToolKind::Scale => format!("Background Scale: {:.*}", precision, bg.scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputKind;
    use kurbo::Vec2;

    #[test]
    fn test_status_hint_move_lists_constraints() {
        let keymap = KeymapRegistry::with_defaults();
        let hint = status_hint(ToolKind::Move, &keymap);
        assert_eq!(
            hint,
            "LMB, ENTER: Confirm | RMB, ESC: Cancel | H: Flip Horizontally | V: Flip Vertically \
             | X: Constraint Horizontal | Y: Constraint Vertical"
        );
    }

    #[test]
    fn test_status_hint_rotate_has_no_constraints() {
        let keymap = KeymapRegistry::with_defaults();
        let hint = status_hint(ToolKind::Rotate, &keymap);
        assert!(hint.ends_with("V: Flip Vertically"));
        assert!(!hint.contains("Constraint"));
    }

    #[test]
    fn test_status_hint_follows_rebinding() {
        let mut keymap = KeymapRegistry::with_defaults();
        keymap
            .rebind(FLIP_X, InputKind::key("F"), false, false, true)
            .unwrap();
        assert!(status_hint(ToolKind::Scale, &keymap).contains("Shift+F: Flip Horizontally"));
    }

    #[test]
    fn test_header_text_precision() {
        let mut bg = BackgroundImage::with_image("a.png");
        bg.offset = Vec2::new(0.1, -0.25);
        bg.rotation = 30f64.to_radians();
        bg.scale = 1.5;

        assert_eq!(header_text(ToolKind::Move, &bg), "Background Offset: 0.1000, -0.2500");
        assert_eq!(header_text(ToolKind::Rotate, &bg), "Background Rotation: 30.00°");
        assert_eq!(header_text(ToolKind::Scale, &bg), "Background Scale: 1.500");
    }

    #[test]
    fn test_guide_line_none_without_constraint() {
        assert!(guide_line(AxisConstraint::None, DMat4::IDENTITY).is_none());
    }

    #[test]
    fn test_guide_line_axes_and_colors() {
        let camera = DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0));

        let line = guide_line(AxisConstraint::Vertical, camera).unwrap();
        assert_eq!(line.color, SerializableColor::green());
        assert!((line.start - DVec3::new(1.0, -98.0, 1.0)).length() < 1e-9);
        assert!((line.end - DVec3::new(1.0, 102.0, 1.0)).length() < 1e-9);

        let line = guide_line(AxisConstraint::Horizontal, camera).unwrap();
        assert_eq!(line.color, SerializableColor::red());
        assert!((line.start - DVec3::new(-99.0, 2.0, 1.0)).length() < 1e-9);
        assert!((line.end - DVec3::new(101.0, 2.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn test_color_conversion() {
        let color: Color = SerializableColor::red().into();
        assert_eq!(SerializableColor::from(color), SerializableColor::red());
    }
}
