use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rpc::web_rpc::WebRpcInterface;

/// Rendering mode of the viewer. `Inline` is the regular page view with
/// orbit controls; the immersive modes are entered through the
/// frontend's AR/VR buttons and reported over RPC. Those buttons only
/// exist when the platform advertises the capability, so no capability
/// checks happen on this side.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Serialize, Deserialize,
)]
pub enum SessionMode {
    #[default]
    Inline,
    ImmersiveAr,
    ImmersiveVr,
}

impl SessionMode {
    /// Parse the WebXR session mode string used by the frontend.
    pub fn from_session_string(s: &str) -> Option<Self> {
        match s {
            "inline" => Some(Self::Inline),
            "immersive-ar" => Some(Self::ImmersiveAr),
            "immersive-vr" => Some(Self::ImmersiveVr),
            _ => None,
        }
    }

    /// WebXR session mode string for frontend communication.
    pub fn as_session_string(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::ImmersiveAr => "immersive-ar",
            Self::ImmersiveVr => "immersive-vr",
        }
    }
}

/// An immersive session has begun on the platform side.
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionStartedEvent {
    pub mode: SessionMode,
}

/// The immersive session ended, whatever its mode was.
#[derive(Event, Default, Debug, Clone, Copy)]
pub struct SessionEndedEvent;

/// Apply session lifecycle events to the state machine. Hit-test state
/// cleanup on session end lives with the hit-test loop itself.
pub fn apply_session_transitions(
    mut started: EventReader<SessionStartedEvent>,
    mut ended: EventReader<SessionEndedEvent>,
    mut next_state: ResMut<NextState<SessionMode>>,
) {
    for event in started.read() {
        info!("XR session started: {}", event.mode.as_session_string());
        next_state.set(event.mode);
    }

    if !ended.is_empty() {
        ended.clear();
        info!("XR session ended");
        next_state.set(SessionMode::Inline);
    }
}

/// Report completed mode transitions to the frontend.
pub fn notify_session_changed(
    mut transitions: EventReader<StateTransitionEvent<SessionMode>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for transition in transitions.read() {
        let Some(entered) = transition.entered else {
            continue;
        };
        if transition.exited == transition.entered {
            continue;
        }
        rpc_interface.send_notification(
            "session_changed",
            serde_json::json!({ "mode": entered.as_session_string() }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_strings_round_trip() {
        for mode in [
            SessionMode::Inline,
            SessionMode::ImmersiveAr,
            SessionMode::ImmersiveVr,
        ] {
            assert_eq!(
                SessionMode::from_session_string(mode.as_session_string()),
                Some(mode)
            );
        }
        assert_eq!(SessionMode::from_session_string("immersive-cave"), None);
    }
}
