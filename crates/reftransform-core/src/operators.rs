//! Operators the host invokes to start a transform session.

use crate::host::{Host, ReportLevel};
use crate::input::InputEvent;
use crate::keymap::KeymapRegistry;
use crate::session::{SessionError, TransformSession, Transition};
use crate::target::CameraObject;
use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Status returned to the host's operator dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorStatus {
    Running,
    Finished,
    Cancelled,
}

impl From<Transition> for OperatorStatus {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Running | Transition::PassThrough => OperatorStatus::Running,
            Transition::Finished => OperatorStatus::Finished,
            Transition::Cancelled => OperatorStatus::Cancelled,
        }
    }
}

/// The Move, Rotate or Scale operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    pub tool: ToolKind,
}

impl Operator {
    pub fn new(tool: ToolKind) -> Self {
        Self { tool }
    }

    /// Whether the operator can run in the current view.
    pub fn poll(&self, host: &dyn Host) -> bool {
        host.in_camera_view()
    }

    /// Start a session, or report why none could be started.
    pub fn invoke<'a>(
        &self,
        camera: &'a mut CameraObject,
        keymap: &'a KeymapRegistry,
        pointer: Point,
        host: &mut dyn Host,
    ) -> Result<TransformSession<'a>, OperatorStatus> {
        match TransformSession::begin(self.tool, camera, keymap, pointer, host) {
            Ok(session) => Ok(session),
            Err(e @ SessionError::NoTarget) => {
                log::warn!("{}: {}", self.tool, e);
                host.report(ReportLevel::Warning, &e.to_string());
                Err(OperatorStatus::Cancelled)
            }
            Err(e @ SessionError::NotInCameraView) => {
                log::debug!("{}: {}", self.tool, e);
                Err(OperatorStatus::Cancelled)
            }
        }
    }
}

/// Drive a session with events until it ends or the events run out.
pub fn run_modal<'e>(
    session: &mut TransformSession<'_>,
    events: impl IntoIterator<Item = &'e InputEvent>,
    host: &mut dyn Host,
) -> OperatorStatus {
    for event in events {
        let transition = session.handle_event(event, host);
        log::debug!("{:?} -> {:?}", event, transition);
        if transition.is_terminal() {
            return transition.into();
        }
    }
    OperatorStatus::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::input::{KEY_SPACE, Modifiers, MouseButton};
    use crate::target::BackgroundImage;

    #[test]
    fn test_invoke_without_background_reports_warning() {
        let keymap = KeymapRegistry::with_defaults();
        let mut host = RecordingHost::new();
        let mut camera = CameraObject::new("Camera", Vec::new());

        let status = Operator::new(ToolKind::Move)
            .invoke(&mut camera, &keymap, Point::ZERO, &mut host)
            .err();

        assert_eq!(status, Some(OperatorStatus::Cancelled));
        assert_eq!(
            host.reports,
            vec![(ReportLevel::Warning, "No visible backgrounds".to_string())]
        );
    }

    #[test]
    fn test_poll() {
        let mut host = RecordingHost::new();
        assert!(Operator::new(ToolKind::Rotate).poll(&host));
        host.camera_view = false;
        assert!(!Operator::new(ToolKind::Rotate).poll(&host));
    }

    #[test]
    fn test_run_modal_finishes() {
        let keymap = KeymapRegistry::with_defaults();
        let mut host = RecordingHost::new();
        let mut camera = CameraObject::new("Camera", vec![BackgroundImage::with_image("a.png")]);

        let mut session = Operator::new(ToolKind::Move)
            .invoke(&mut camera, &keymap, Point::new(100.0, 100.0), &mut host)
            .unwrap();
        let events = [
            InputEvent::pointer(160.0, 100.0),
            InputEvent::key_press("Q"),
            InputEvent::key_press(KEY_SPACE),
            InputEvent::pointer(900.0, 900.0),
        ];
        let status = run_modal(&mut session, &events, &mut host);
        drop(session);

        assert_eq!(status, OperatorStatus::Finished);
        let bg = camera.active_background().unwrap();
        assert!((bg.offset.x - 0.1).abs() < 1e-12);
        assert_eq!(bg.offset.y, 0.0);
    }

    #[test]
    fn test_run_modal_keeps_running_without_terminal_event() {
        let keymap = KeymapRegistry::with_defaults();
        let mut host = RecordingHost::new();
        let mut camera = CameraObject::new("Camera", vec![BackgroundImage::with_image("a.png")]);

        let mut session = Operator::new(ToolKind::Rotate)
            .invoke(&mut camera, &keymap, Point::ZERO, &mut host)
            .unwrap();
        let events = [InputEvent::pointer(45.0, 0.0).with_modifiers(Modifiers::shift())];
        assert_eq!(run_modal(&mut session, &events, &mut host), OperatorStatus::Running);
        assert!(session.is_active());

        let events = [InputEvent::mouse_press(MouseButton::Right)];
        assert_eq!(run_modal(&mut session, &events, &mut host), OperatorStatus::Cancelled);
    }

    #[test]
    fn test_status_from_transition() {
        assert_eq!(OperatorStatus::from(Transition::PassThrough), OperatorStatus::Running);
        assert_eq!(OperatorStatus::from(Transition::Finished), OperatorStatus::Finished);
    }
}
