//! Modal transform sessions.
//!
//! A session is created when a tool is invoked on a camera and lives until a
//! confirm or cancel input arrives. It borrows the edited background for its
//! whole lifetime and is driven by [`TransformSession::handle_event`], once
//! per host event.

use crate::host::{CursorIcon, Host};
use crate::input::{
    InputEvent, InputKind, KEY_ESCAPE, KEY_RETURN, KEY_SPACE, Modifiers, MouseButton,
};
use crate::keymap::{CONSTRAINT_X, CONSTRAINT_Y, FLIP_X, FLIP_Y, KeymapRegistry};
use crate::overlay::{self, GuideLine};
use crate::snap::{should_snap, snap_angle_radians, snap_to_increment};
use crate::target::{BackgroundImage, CameraObject, SessionSnapshot};
use crate::tools::{MIN_SCALE, ToolKind, ToolProfile};
use glam::DMat4;
use kurbo::{Point, Vec2};
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("No visible backgrounds")]
    NoTarget,
    #[error("Viewport is not looking through the camera")]
    NotInCameraView,
}

/// Result type for starting a session.
pub type SessionResult<T> = Result<T, SessionError>;

/// Axis lock of a Move session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisConstraint {
    /// Both axes follow the pointer.
    #[default]
    None,
    /// Only the x offset changes.
    Horizontal,
    /// Only the y offset changes.
    Vertical,
}

impl AxisConstraint {
    /// Toggle towards `axis`: pressing the active axis again clears it,
    /// pressing the other axis switches directly.
    pub fn toggled(self, axis: AxisConstraint) -> Self {
        if self == axis {
            AxisConstraint::None
        } else {
            axis
        }
    }

    pub fn locks_x(self) -> bool {
        self == AxisConstraint::Vertical
    }

    pub fn locks_y(self) -> bool {
        self == AxisConstraint::Horizontal
    }

    fn cursor(self) -> CursorIcon {
        match self {
            AxisConstraint::None => CursorIcon::Hand,
            AxisConstraint::Horizontal => CursorIcon::MoveX,
            AxisConstraint::Vertical => CursorIcon::MoveY,
        }
    }
}

/// Outcome of feeding one event to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The event was consumed and the session keeps running.
    Running,
    /// The event was not for the session; the host should handle it.
    PassThrough,
    /// The edit was confirmed.
    Finished,
    /// The edit was rolled back.
    Cancelled,
}

impl Transition {
    pub fn is_terminal(self) -> bool {
        matches!(self, Transition::Finished | Transition::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Committed,
    Cancelled,
}

/// A running Move, Rotate or Scale edit of one background image.
#[derive(Debug)]
pub struct TransformSession<'a> {
    tool: ToolKind,
    profile: ToolProfile,
    target: &'a mut BackgroundImage,
    keymap: &'a KeymapRegistry,
    camera_matrix: DMat4,
    snapshot: SessionSnapshot,
    /// Raw, unsnapped value; x only for Rotate and Scale.
    accumulator: Vec2,
    last_pointer: Point,
    constraint: AxisConstraint,
    phase: Phase,
}

impl<'a> TransformSession<'a> {
    /// Start a session on the camera's first visible background with an image.
    ///
    /// Nothing is mutated when this fails.
    pub fn begin(
        tool: ToolKind,
        camera: &'a mut CameraObject,
        keymap: &'a KeymapRegistry,
        pointer: Point,
        host: &mut dyn Host,
    ) -> SessionResult<Self> {
        if !host.in_camera_view() {
            return Err(SessionError::NotInCameraView);
        }

        let camera_matrix = camera.matrix_world;
        let camera_name = camera.name.clone();
        let target = camera
            .active_background_mut()
            .ok_or(SessionError::NoTarget)?;

        let snapshot = SessionSnapshot::capture(target);
        let accumulator = match tool {
            ToolKind::Move => target.offset,
            ToolKind::Rotate => Vec2::new(target.rotation, 0.0),
            ToolKind::Scale => Vec2::new(target.scale, 0.0),
        };
        let profile = tool.profile();

        let session = Self {
            tool,
            profile,
            target,
            keymap,
            camera_matrix,
            snapshot,
            accumulator,
            last_pointer: pointer,
            constraint: AxisConstraint::None,
            phase: Phase::Active,
        };

        host.set_status_text(Some(session.status_hint().as_str()));
        host.set_cursor(profile.cursor);
        if profile.supports_constraint {
            host.add_draw_handler();
            host.update_draw_handler(session.guide_line());
        }
        host.grab_pointer();

        log::info!("{} started on {}", tool, camera_name);
        Ok(session)
    }

    /// Feed one host event to the session.
    pub fn handle_event(&mut self, event: &InputEvent, host: &mut dyn Host) -> Transition {
        if self.phase != Phase::Active {
            return Transition::PassThrough;
        }

        match event {
            InputEvent::PointerMove {
                position,
                modifiers,
            } => {
                self.pointer_moved(*position, *modifiers, host);
                Transition::Running
            }
            InputEvent::Press { input, .. } => self.pressed(event, input, host),
            InputEvent::Release { .. } | InputEvent::Repeat { .. } => Transition::PassThrough,
        }
    }

    fn pointer_moved(&mut self, position: Point, modifiers: Modifiers, host: &mut dyn Host) {
        let delta = position - self.last_pointer;
        self.last_pointer = position;

        let divisor = self.profile.divisor(modifiers.shift);
        let snap = should_snap(modifiers, host.snap_settings());
        let quantum = self.profile.snap_quantum;

        if !self.constraint.locks_x() {
            self.accumulator.x += delta.x / divisor;
        }
        if self.profile.uses_y_axis && !self.constraint.locks_y() {
            self.accumulator.y += delta.y / divisor;
        }

        match self.tool {
            ToolKind::Move => {
                if snap {
                    let x = snap_to_increment(self.accumulator.x, quantum);
                    let y = snap_to_increment(self.accumulator.y, quantum);
                    if self.target.offset.x != x {
                        self.target.offset.x = x;
                    }
                    if self.target.offset.y != y {
                        self.target.offset.y = y;
                    }
                } else {
                    self.target.offset = self.accumulator;
                }
            }
            ToolKind::Rotate => {
                let rotation = if snap {
                    snap_angle_radians(self.accumulator.x, quantum)
                } else {
                    self.accumulator.x
                };
                if self.target.rotation != rotation {
                    self.target.rotation = rotation;
                }
            }
            ToolKind::Scale => {
                let scale = if snap {
                    snap_to_increment(self.accumulator.x, quantum)
                } else {
                    self.accumulator.x
                };
                let scale = scale.max(MIN_SCALE);
                if self.target.scale != scale {
                    self.target.scale = scale;
                }
            }
        }

        host.set_header_text(Some(self.header_text().as_str()));
        host.request_redraw();
    }

    fn pressed(
        &mut self,
        event: &InputEvent,
        input: &InputKind,
        host: &mut dyn Host,
    ) -> Transition {
        let mut consumed = false;

        if self.profile.supports_constraint && input.is_mouse(MouseButton::Middle) {
            self.set_constraint(AxisConstraint::None, host);
            consumed = true;
        }

        if self.profile.supports_constraint && self.keymap.matches(event, CONSTRAINT_Y, false) {
            self.set_constraint(self.constraint.toggled(AxisConstraint::Vertical), host);
        } else if self.profile.supports_constraint
            && self.keymap.matches(event, CONSTRAINT_X, false)
        {
            self.set_constraint(self.constraint.toggled(AxisConstraint::Horizontal), host);
        } else if self.keymap.matches(event, FLIP_X, false) {
            self.target.flip_x = !self.target.flip_x;
            log::debug!("flip_x -> {}", self.target.flip_x);
            host.request_redraw();
        } else if self.keymap.matches(event, FLIP_Y, false) {
            self.target.flip_y = !self.target.flip_y;
            log::debug!("flip_y -> {}", self.target.flip_y);
            host.request_redraw();
        } else if input.is_key(KEY_ESCAPE) || input.is_mouse(MouseButton::Right) {
            self.cancel(host);
            return Transition::Cancelled;
        } else if input.is_key(KEY_SPACE)
            || input.is_key(KEY_RETURN)
            || input.is_mouse(MouseButton::Left)
        {
            self.confirm(host);
            return Transition::Finished;
        } else if !consumed {
            return Transition::PassThrough;
        }

        Transition::Running
    }

    fn set_constraint(&mut self, constraint: AxisConstraint, host: &mut dyn Host) {
        self.constraint = constraint;
        log::debug!("constraint -> {:?}", constraint);
        host.set_cursor(constraint.cursor());
        host.update_draw_handler(self.guide_line());
        host.request_redraw();
    }

    /// Restore the snapshot and end the session.
    pub fn cancel(&mut self, host: &mut dyn Host) {
        if self.phase != Phase::Active {
            return;
        }
        self.snapshot.restore(&mut *self.target);
        self.finish(host);
        self.phase = Phase::Cancelled;
        log::info!("{} cancelled", self.tool);
    }

    /// Keep the live values and end the session.
    pub fn confirm(&mut self, host: &mut dyn Host) {
        if self.phase != Phase::Active {
            return;
        }
        self.finish(host);
        host.push_undo_step(self.tool.label());
        self.phase = Phase::Committed;
        log::info!("{} confirmed", self.tool);
    }

    fn finish(&mut self, host: &mut dyn Host) {
        host.set_header_text(None);
        host.set_status_text(None);
        if self.profile.supports_constraint {
            host.remove_draw_handler();
        }
        host.restore_cursor();
        host.release_pointer();
        host.request_redraw();
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn is_committed(&self) -> bool {
        self.phase == Phase::Committed
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == Phase::Cancelled
    }

    /// Raw accumulated value (offset for Move, x holds rotation or scale otherwise).
    pub fn accumulator(&self) -> Vec2 {
        self.accumulator
    }

    pub fn constraint(&self) -> AxisConstraint {
        self.constraint
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// The background being edited.
    pub fn target(&self) -> &BackgroundImage {
        &*self.target
    }

    pub fn status_hint(&self) -> String {
        overlay::status_hint(self.tool, self.keymap)
    }

    pub fn header_text(&self) -> String {
        overlay::header_text(self.tool, &*self.target)
    }

    pub fn guide_line(&self) -> Option<GuideLine> {
        overlay::guide_line(self.constraint, self.camera_matrix)
    }
}
