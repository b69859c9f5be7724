//! Replaying recorded input scripts through a transform session.

use kurbo::Point;
use reftransform_core::{
    CameraObject, InputEvent, KeymapRegistry, Operator, OperatorStatus, RecordingHost, ReportLevel,
    SnapSettings, ToolKind, run_modal,
};
use serde::{Deserialize, Serialize};

fn default_camera_view() -> bool {
    true
}

/// A recorded session: the tool, the camera it runs on and the host events.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub tool: ToolKind,
    pub camera: CameraObject,
    /// Pointer position when the operator is invoked.
    #[serde(default)]
    pub pointer: Point,
    /// Global snapping settings of the host.
    #[serde(default)]
    pub snap: SnapSettings,
    #[serde(default = "default_camera_view")]
    pub camera_view: bool,
    pub events: Vec<InputEvent>,
}

/// Result of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    pub status: OperatorStatus,
    pub camera: CameraObject,
    pub undo_steps: Vec<String>,
    pub reports: Vec<(ReportLevel, String)>,
}

/// Run a script against the given keymap.
pub fn replay(script: ReplayScript, keymap: &KeymapRegistry) -> ReplayOutcome {
    let ReplayScript {
        tool,
        mut camera,
        pointer,
        snap,
        camera_view,
        events,
    } = script;

    let mut host = RecordingHost {
        snap,
        camera_view,
        ..RecordingHost::new()
    };
    let operator = Operator::new(tool);

    let status = if !operator.poll(&host) {
        log::warn!("{} not available outside the camera view", tool);
        OperatorStatus::Cancelled
    } else {
        match operator.invoke(&mut camera, keymap, pointer, &mut host) {
            Ok(mut session) => run_modal(&mut session, &events, &mut host),
            Err(status) => status,
        }
    };

    if status == OperatorStatus::Running {
        log::warn!("Script ended while the session was still running");
    }
    log::info!("Replay finished: {:?}", status);

    ReplayOutcome {
        status,
        camera,
        undo_steps: host.undo_steps,
        reports: host.reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVE_SCRIPT: &str = r#"{
        "tool": "Move",
        "camera": {
            "name": "Camera",
            "backgrounds": [
                { "image": "front.png", "offset": { "x": 0.1, "y": 0.2 } }
            ]
        },
        "events": [
            { "PointerMove": { "position": { "x": 60.0, "y": 0.0 } } },
            { "Press": { "input": { "Key": "H" } } },
            { "Press": { "input": { "Mouse": "Left" } } }
        ]
    }"#;

    #[test]
    fn test_replay_move_script() {
        let script: ReplayScript = serde_json::from_str(MOVE_SCRIPT).unwrap();
        let outcome = replay(script, &KeymapRegistry::with_defaults());

        assert_eq!(outcome.status, OperatorStatus::Finished);
        let bg = outcome.camera.active_background().unwrap();
        assert!((bg.offset.x - 0.2).abs() < 1e-12);
        assert!((bg.offset.y - 0.2).abs() < 1e-12);
        assert!(bg.flip_x);
        assert_eq!(outcome.undo_steps, vec!["Move Camera Background".to_string()]);
    }

    #[test]
    fn test_replay_without_background() {
        let script: ReplayScript = serde_json::from_str(
            r#"{ "tool": "Scale", "camera": { "backgrounds": [] }, "events": [] }"#,
        )
        .unwrap();
        let outcome = replay(script, &KeymapRegistry::with_defaults());

        assert_eq!(outcome.status, OperatorStatus::Cancelled);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].0, ReportLevel::Warning);
    }

    #[test]
    fn test_replay_outside_camera_view() {
        let mut script: ReplayScript = serde_json::from_str(MOVE_SCRIPT).unwrap();
        script.camera_view = false;
        let outcome = replay(script, &KeymapRegistry::with_defaults());

        assert_eq!(outcome.status, OperatorStatus::Cancelled);
        assert!(outcome.reports.is_empty());
        assert!(!outcome.camera.active_background().unwrap().flip_x);
    }
}
