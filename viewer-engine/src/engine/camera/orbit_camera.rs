use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use constants::render_settings::{
    DEFAULT_ORBIT_TARGET, ORBIT_DAMPING, ORBIT_DRAG_SENSITIVITY, ORBIT_MAX_DISTANCE,
    ORBIT_MIN_DISTANCE, ORBIT_ZOOM_SENSITIVITY,
};

use crate::engine::scene::ViewerCamera;

/// Orbit state for the inline view. The target is recentred on the
/// active model's bounding-box centre after each load.
#[derive(Resource)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: DEFAULT_ORBIT_TARGET,
            distance: 4.0,
            yaw: 0.0,
            pitch: 0.4,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }
}

impl OrbitCamera {
    /// Recentre the orbit target, keeping the current viewing angle.
    pub fn recenter(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Camera transform for the current orbit state.
    pub fn camera_transform(&self) -> Transform {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        let eye = self.target + rotation * (Vec3::Z * self.distance);
        Transform::from_translation(eye).looking_at(self.target, Vec3::Y)
    }

    /// Apply one frame of orbiting. A drag resets the angular velocity,
    /// which then decays so the view keeps gliding after release.
    pub fn apply_orbit(&mut self, drag_delta: Option<Vec2>) {
        if let Some(delta) = drag_delta {
            self.yaw_velocity = -delta.x * ORBIT_DRAG_SENSITIVITY;
            self.pitch_velocity = delta.y * ORBIT_DRAG_SENSITIVITY;
        }
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-1.5, 1.5);
        self.yaw_velocity *= ORBIT_DAMPING;
        self.pitch_velocity *= ORBIT_DAMPING;
    }

    /// Dolly along the view axis, clamped to the configured range.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance - lines * ORBIT_ZOOM_SENSITIVITY)
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

pub fn camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut cameras: Query<&mut Transform, With<ViewerCamera>>,
) {
    let mut drag = Vec2::ZERO;
    for event in motion.read() {
        drag += event.delta;
    }

    for event in wheel.read() {
        let lines = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 20.0,
        };
        orbit.zoom(lines);
    }

    let dragging = buttons.pressed(MouseButton::Left);
    orbit.apply_orbit(dragging.then_some(drag));

    if let Ok(mut transform) = cameras.single_mut() {
        *transform = orbit.camera_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_clamps_to_configured_range() {
        let mut orbit = OrbitCamera::default();
        orbit.zoom(-1000.0);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
        orbit.zoom(1000.0);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
    }

    #[test]
    fn orbit_velocity_decays_after_release() {
        let mut orbit = OrbitCamera::default();
        orbit.apply_orbit(Some(Vec2::new(10.0, 0.0)));
        let initial = orbit.yaw_velocity.abs();
        assert!(initial > 0.0);

        for _ in 0..200 {
            orbit.apply_orbit(None);
        }
        assert!(orbit.yaw_velocity.abs() < initial * 1e-3);
    }

    #[test]
    fn camera_keeps_looking_at_recentred_target() {
        let mut orbit = OrbitCamera::default();
        orbit.recenter(Vec3::new(3.0, 1.0, -2.0));
        let transform = orbit.camera_transform();
        let forward = transform.forward();
        let to_target = (orbit.target - transform.translation).normalize();
        assert!(forward.dot(to_target) > 0.999);
    }
}
