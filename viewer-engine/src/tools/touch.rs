use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;

/// Extension point for touch gestures. The viewer defines no gestures
/// yet; this tracks the primary touch so drag or pinch handling can be
/// added later without touching any other system.
#[derive(Resource, Default)]
pub struct TouchGestureState {
    pub active_touch: Option<u64>,
    pub last_position: Vec2,
}

pub fn track_touch_gestures(
    mut touches: EventReader<TouchInput>,
    mut state: ResMut<TouchGestureState>,
) {
    for touch in touches.read() {
        match touch.phase {
            TouchPhase::Started => {
                if state.active_touch.is_none() {
                    state.active_touch = Some(touch.id);
                    state.last_position = touch.position;
                }
            }
            TouchPhase::Moved => {
                if state.active_touch == Some(touch.id) {
                    state.last_position = touch.position;
                }
            }
            TouchPhase::Ended | TouchPhase::Canceled => {
                if state.active_touch == Some(touch.id) {
                    state.active_touch = None;
                }
            }
        }
    }
}
