//! Snapping of transform values to fixed increments.

use crate::input::Modifiers;
use serde::{Deserialize, Serialize};

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// Element the host snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapElement {
    /// Snap to fixed increments.
    #[default]
    Increment,
    /// Snap to vertices.
    Vertex,
    /// Snap to edges.
    Edge,
    /// Snap to faces.
    Face,
}

/// The host's global snapping settings, read on every pointer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Snapping is switched on.
    pub use_snap: bool,
    /// Snapping applies to scale/rotation/offset edits.
    pub affect_scale: bool,
    /// Element snapped to.
    pub element: SnapElement,
}

impl SnapSettings {
    /// Settings with incremental snapping switched on.
    pub fn incremental() -> Self {
        Self {
            use_snap: true,
            affect_scale: true,
            element: SnapElement::Increment,
        }
    }

    /// Check if incremental snapping is in effect.
    pub fn is_incremental(&self) -> bool {
        self.use_snap && self.affect_scale && self.element == SnapElement::Increment
    }
}

/// Snapping holds when ctrl is down or the host snaps incrementally.
pub fn should_snap(modifiers: Modifiers, settings: SnapSettings) -> bool {
    modifiers.ctrl || settings.is_incremental()
}

/// Round a value to the nearest multiple of `quantum`.
///
/// Exact halfway values round to the even multiple.
pub fn snap_to_increment(value: f64, quantum: f64) -> f64 {
    (value / quantum).round_ties_even() * quantum
}

/// Snap an angle given in radians to the nearest increment in degrees.
///
/// Unlike a line-angle snap, the result is not wrapped into 0-360 so that
/// rotations past a full turn survive.
pub fn snap_angle_radians(radians: f64, increment_degrees: f64) -> f64 {
    snap_to_increment(radians.to_degrees(), increment_degrees).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_increment() {
        assert!((snap_to_increment(0.123, 0.01) - 0.12).abs() < 1e-12);
        assert!((snap_to_increment(1.26, 0.1) - 1.3).abs() < 1e-12);
        assert!((snap_to_increment(-0.004, 0.01)).abs() < 1e-12);
    }

    #[test]
    fn test_snap_ties_round_to_even() {
        assert_eq!(snap_to_increment(2.5, 1.0), 2.0);
        assert_eq!(snap_to_increment(3.5, 1.0), 4.0);
        assert_eq!(snap_to_increment(-2.5, 1.0), -2.0);

        // 22.5 and 37.5 degrees are both halfway between 15 degree steps
        assert_eq!(snap_to_increment(22.5, ANGLE_SNAP_INCREMENT), 30.0);
        assert_eq!(snap_to_increment(37.5, ANGLE_SNAP_INCREMENT), 30.0);
    }

    #[test]
    fn test_snap_idempotent() {
        let once = snap_to_increment(0.12, 0.01);
        let twice = snap_to_increment(once, 0.01);
        assert_eq!(once, twice);

        let once = snap_angle_radians(0.5, ANGLE_SNAP_INCREMENT);
        let twice = snap_angle_radians(once, ANGLE_SNAP_INCREMENT);
        assert!((once - twice).abs() < 1e-12);
    }

    #[test]
    fn test_snap_angle() {
        // 0.5 rad is about 28.6 degrees
        let snapped = snap_angle_radians(0.5, ANGLE_SNAP_INCREMENT);
        assert!((snapped - 30f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_snap_angle_not_wrapped() {
        let snapped = snap_angle_radians(400f64.to_radians(), ANGLE_SNAP_INCREMENT);
        assert!((snapped.to_degrees() - 405.0).abs() < 1e-9);
    }

    #[test]
    fn test_incremental_requires_all_settings() {
        assert!(SnapSettings::incremental().is_incremental());
        assert!(!SnapSettings::default().is_incremental());

        let vertex = SnapSettings {
            element: SnapElement::Vertex,
            ..SnapSettings::incremental()
        };
        assert!(!vertex.is_incremental());

        let no_scale = SnapSettings {
            affect_scale: false,
            ..SnapSettings::incremental()
        };
        assert!(!no_scale.is_incremental());
    }

    #[test]
    fn test_should_snap() {
        assert!(should_snap(Modifiers::ctrl(), SnapSettings::default()));
        assert!(should_snap(Modifiers::NONE, SnapSettings::incremental()));
        assert!(should_snap(Modifiers::ctrl(), SnapSettings::incremental()));
        assert!(!should_snap(Modifiers::shift(), SnapSettings::default()));
    }
}
