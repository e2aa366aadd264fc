//! Persistent scene contents, created once at startup and alive for the
//! page's lifetime: the viewer camera, key and fill lighting, and the
//! placement reticle.

/// Reticle entity marking the detected real-world surface point.
pub mod reticle;

use bevy::prelude::*;
use bevy::window::WindowResized;

use constants::render_settings::{
    AMBIENT_BRIGHTNESS, AMBIENT_LIGHT_COLOR, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR,
    DIRECTIONAL_ILLUMINANCE, DIRECTIONAL_LIGHT_COLOR,
};

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::rpc::web_rpc::WebRpcInterface;
use reticle::spawn_reticle;

/// Marker for the single viewer camera. Environment lighting attaches
/// here once the environment stage of a model load completes.
#[derive(Component)]
pub struct ViewerCamera;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orbit: Res<OrbitCamera>,
) {
    spawn_camera(&mut commands, &orbit);
    spawn_lighting(&mut commands);
    spawn_reticle(&mut commands, &mut meshes, &mut materials);
}

fn spawn_camera(commands: &mut Commands, orbit: &OrbitCamera) {
    commands.spawn((
        ViewerCamera,
        Name::new("ViewerCamera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.camera_transform(),
    ));
}

fn spawn_lighting(commands: &mut Commands) {
    // Key light from behind the default camera, like a studio setup.
    commands.spawn((
        DirectionalLight {
            color: DIRECTIONAL_LIGHT_COLOR,
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::default().looking_to(Vec3::NEG_Z, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: AMBIENT_LIGHT_COLOR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
}

/// Surface size and camera aspect track the viewport automatically
/// (`fit_canvas_to_parent` on web); this only reports the new size to
/// the frontend overlay and the log.
pub fn notify_viewport_resize(
    mut resize_events: EventReader<WindowResized>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in resize_events.read() {
        debug!("Viewport resized to {}x{}", event.width, event.height);
        rpc_interface.send_notification(
            "viewport_resized",
            serde_json::json!({ "width": event.width, "height": event.height }),
        );
    }
}
