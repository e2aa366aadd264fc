use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::render::mesh::{MeshBuilder, Meshable};

use constants::reticle::{RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS, RETICLE_RESOLUTION};

/// Marker for the placement reticle. Its pose is written only by the AR
/// hit-test loop; the placement controller reads it. Starts hidden and
/// stays hidden whenever no surface is detected.
#[derive(Component)]
pub struct Reticle;

pub fn spawn_reticle(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    // Annulus meshes lie in the XY plane; bake a rotation so the ring
    // sits flat on detected surfaces.
    let ring = Annulus::new(RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS)
        .mesh()
        .resolution(RETICLE_RESOLUTION)
        .build()
        .rotated_by(Quat::from_rotation_x(-FRAC_PI_2));

    commands.spawn((
        Reticle,
        Name::new("Reticle"),
        Mesh3d(meshes.add(ring)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        Transform::IDENTITY,
        Visibility::Hidden,
    ));
}
