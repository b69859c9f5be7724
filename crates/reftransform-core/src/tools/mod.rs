//! Transform tools and their numeric profiles.

use crate::host::CursorIcon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ratio between the fine and the coarse divisor of every tool.
pub const FINE_DIVISOR_FACTOR: f64 = 10.0;

/// Smallest scale a session will ever write.
pub const MIN_SCALE: f64 = 0.01;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Move,
    Rotate,
    Scale,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Move, ToolKind::Rotate, ToolKind::Scale];

    /// Numeric profile of this tool.
    pub fn profile(self) -> ToolProfile {
        match self {
            ToolKind::Move => ToolProfile {
                base_divisor: 600.0,
                snap_quantum: 0.01,
                precision: 4,
                uses_y_axis: true,
                supports_constraint: true,
                cursor: CursorIcon::Hand,
            },
            ToolKind::Rotate => ToolProfile {
                base_divisor: 450.0,
                // Degrees; the session snaps rotation in degree space.
                snap_quantum: 15.0,
                precision: 2,
                uses_y_axis: false,
                supports_constraint: false,
                cursor: CursorIcon::MoveX,
            },
            ToolKind::Scale => ToolProfile {
                base_divisor: 300.0,
                snap_quantum: 0.1,
                precision: 3,
                uses_y_axis: false,
                supports_constraint: false,
                cursor: CursorIcon::MoveX,
            },
        }
    }

    /// Action name of the operator that starts this tool.
    pub fn action_name(self) -> &'static str {
        match self {
            ToolKind::Move => "background_move",
            ToolKind::Rotate => "background_rotate",
            ToolKind::Scale => "background_scale",
        }
    }

    /// Human readable operator label, also used for the undo step.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Move => "Move Camera Background",
            ToolKind::Rotate => "Rotate Camera Background",
            ToolKind::Scale => "Scale Camera Background",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-tool sensitivity, snapping and feedback settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolProfile {
    /// Pixels of pointer motion per unit of change.
    pub base_divisor: f64,
    /// Rounding granularity while snapping.
    pub snap_quantum: f64,
    /// Decimals shown in the header text.
    pub precision: usize,
    /// Whether vertical pointer motion is used.
    pub uses_y_axis: bool,
    /// Whether axis constraints apply.
    pub supports_constraint: bool,
    /// Cursor shown while the session runs unconstrained.
    pub cursor: CursorIcon,
}

impl ToolProfile {
    /// Divisor used when the fine adjustment modifier is held.
    pub fn fine_divisor(&self) -> f64 {
        self.base_divisor * FINE_DIVISOR_FACTOR
    }

    /// Divisor for the current modifier state.
    pub fn divisor(&self, fine: bool) -> f64 {
        if fine {
            self.fine_divisor()
        } else {
            self.base_divisor
        }
    }
}
