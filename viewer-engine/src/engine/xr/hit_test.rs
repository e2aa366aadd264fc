use bevy::prelude::*;

use crate::engine::core::app_state::SessionEndedEvent;
use crate::engine::scene::reticle::Reticle;
use crate::engine::xr::bridge::{ArBridge, BridgedHitTest};

/// Opaque handle to a platform hit-test source. The viewer holds at
/// most one, acquired at most once per AR session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestSourceHandle(u64);

impl HitTestSourceHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// One hit-test result pose, column-major like the platform matrix.
#[derive(Debug, Clone, Copy)]
pub struct HitPose(pub Mat4);

/// Seam to the platform AR runtime.
pub trait HitTestBackend: Send + Sync + 'static {
    /// Kick off asynchronous acquisition of a viewer-anchored source.
    /// Must tolerate being a slow operation; the result arrives later
    /// through `poll_source`.
    fn request_source(&mut self);

    /// Completed acquisition, if it has arrived since the request.
    fn poll_source(&mut self) -> Option<HitTestSourceHandle>;

    /// Latest results for the current frame, best first.
    fn query(&mut self, source: HitTestSourceHandle) -> Vec<HitPose>;

    /// Drop the source at session end.
    fn release(&mut self, source: HitTestSourceHandle);
}

/// Per-session hit-test progress. `requested` flips synchronously with
/// the request, so repeated AR frames never ask twice while the
/// asynchronous acquisition is still pending.
#[derive(Resource, Default)]
pub struct HitTestState {
    pub requested: bool,
    pub source: Option<HitTestSourceHandle>,
}

/// The platform AR runtime behind the `HitTestBackend` seam.
#[derive(Resource)]
pub struct ArRuntime {
    backend: Box<dyn HitTestBackend>,
}

impl ArRuntime {
    pub fn new(backend: Box<dyn HitTestBackend>) -> Self {
        Self { backend }
    }

    /// Runtime bridged to the frontend's WebXR loop. On native builds
    /// the bridge is never fed, so the backend simply reports no hits.
    pub fn bridged(bridge: &ArBridge) -> Self {
        Self::new(Box::new(BridgedHitTest::new(bridge)))
    }

    fn request_source(&mut self) {
        self.backend.request_source();
    }

    fn poll_source(&mut self) -> Option<HitTestSourceHandle> {
        self.backend.poll_source()
    }

    fn query(&mut self, source: HitTestSourceHandle) -> Vec<HitPose> {
        self.backend.query(source)
    }

    fn release(&mut self, source: HitTestSourceHandle) {
        self.backend.release(source);
    }
}

/// Per-frame AR loop: lazily acquire the hit-test source, then drive
/// the reticle from the frame's best result. Only scheduled while an
/// AR session is active.
pub fn update_reticle_from_hit_test(
    mut runtime: ResMut<ArRuntime>,
    mut state: ResMut<HitTestState>,
    mut reticles: Query<(&mut Transform, &mut Visibility), With<Reticle>>,
) {
    if !state.requested {
        runtime.request_source();
        state.requested = true;
    }
    if state.source.is_none() {
        state.source = runtime.poll_source();
    }
    let Some(source) = state.source else {
        return;
    };

    let hits = runtime.query(source);
    let Ok((mut transform, mut visibility)) = reticles.single_mut() else {
        return;
    };

    match hits.first() {
        Some(hit) => {
            *transform = Transform::from_matrix(hit.0);
            *visibility = Visibility::Visible;
        }
        None => {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Unconditional cleanup when the session ends, even if the source
/// acquisition never resolved.
pub fn reset_hit_test_on_session_end(
    mut ended: EventReader<SessionEndedEvent>,
    mut state: ResMut<HitTestState>,
    mut runtime: ResMut<ArRuntime>,
    mut reticles: Query<&mut Visibility, With<Reticle>>,
) {
    if ended.is_empty() {
        return;
    }
    ended.clear();

    if let Some(source) = state.source.take() {
        runtime.release(source);
    }
    state.requested = false;

    for mut visibility in &mut reticles {
        *visibility = Visibility::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct MockState {
        request_count: usize,
        polls_until_ready: usize,
        frames: Vec<Vec<Mat4>>,
        released: Vec<HitTestSourceHandle>,
    }

    /// Scripted stand-in for the platform runtime: acquisition resolves
    /// after a configurable number of polls, queries replay `frames`.
    #[derive(Clone, Default)]
    struct MockBackend(Arc<Mutex<MockState>>);

    impl HitTestBackend for MockBackend {
        fn request_source(&mut self) {
            self.0.lock().unwrap().request_count += 1;
        }

        fn poll_source(&mut self) -> Option<HitTestSourceHandle> {
            let mut state = self.0.lock().unwrap();
            if state.request_count == 0 {
                return None;
            }
            if state.polls_until_ready > 0 {
                state.polls_until_ready -= 1;
                return None;
            }
            Some(HitTestSourceHandle::new(7))
        }

        fn query(&mut self, _source: HitTestSourceHandle) -> Vec<HitPose> {
            let mut state = self.0.lock().unwrap();
            if state.frames.is_empty() {
                return Vec::new();
            }
            state.frames.remove(0).into_iter().map(HitPose).collect()
        }

        fn release(&mut self, source: HitTestSourceHandle) {
            self.0.lock().unwrap().released.push(source);
        }
    }

    fn test_app(mock: MockBackend) -> App {
        let mut app = App::new();
        app.add_event::<SessionEndedEvent>();
        app.insert_resource(ArRuntime::new(Box::new(mock)));
        app.init_resource::<HitTestState>();
        app.add_systems(
            Update,
            (update_reticle_from_hit_test, reset_hit_test_on_session_end).chain(),
        );
        app.world_mut()
            .spawn((Reticle, Transform::IDENTITY, Visibility::Hidden));
        app
    }

    fn reticle_state(app: &mut App) -> (Transform, Visibility) {
        let mut query = app
            .world_mut()
            .query_filtered::<(&Transform, &Visibility), With<Reticle>>();
        let (transform, visibility) = query.single(app.world()).unwrap();
        (*transform, *visibility)
    }

    #[test]
    fn source_requested_exactly_once_across_frames() {
        let mock = MockBackend::default();
        mock.0.lock().unwrap().polls_until_ready = 3;

        let mut app = test_app(mock.clone());
        for _ in 0..5 {
            app.update();
        }

        assert_eq!(mock.0.lock().unwrap().request_count, 1);
        assert!(app.world().resource::<HitTestState>().source.is_some());
    }

    #[test]
    fn reticle_visibility_follows_result_count() {
        let pose = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let other = Mat4::from_translation(Vec3::splat(9.0));

        let mock = MockBackend::default();
        mock.0.lock().unwrap().frames = vec![
            vec![],
            vec![pose],
            vec![pose, other, other],
            vec![],
        ];

        let mut app = test_app(mock);

        app.update();
        assert_eq!(reticle_state(&mut app).1, Visibility::Hidden);

        app.update();
        let (transform, visibility) = reticle_state(&mut app);
        assert_eq!(visibility, Visibility::Visible);
        assert!(transform.translation.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));

        // Three results in one frame: the first stays authoritative.
        app.update();
        let (transform, visibility) = reticle_state(&mut app);
        assert_eq!(visibility, Visibility::Visible);
        assert!(transform.translation.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));

        app.update();
        assert_eq!(reticle_state(&mut app).1, Visibility::Hidden);
    }

    #[test]
    fn session_end_resets_even_while_acquisition_pending() {
        let mock = MockBackend::default();
        mock.0.lock().unwrap().polls_until_ready = 100;

        let mut app = test_app(mock.clone());
        app.update();
        assert!(app.world().resource::<HitTestState>().requested);
        assert!(app.world().resource::<HitTestState>().source.is_none());

        app.world_mut().send_event(SessionEndedEvent);
        app.update();

        let state = app.world().resource::<HitTestState>();
        assert!(!state.requested);
        assert!(state.source.is_none());
    }

    #[test]
    fn session_end_releases_acquired_source() {
        let mock = MockBackend::default();
        let mut app = test_app(mock.clone());

        app.update();
        assert!(app.world().resource::<HitTestState>().source.is_some());

        app.world_mut().send_event(SessionEndedEvent);
        app.update();

        assert_eq!(
            mock.0.lock().unwrap().released,
            vec![HitTestSourceHandle::new(7)]
        );
        assert!(!app.world().resource::<HitTestState>().requested);
    }
}
