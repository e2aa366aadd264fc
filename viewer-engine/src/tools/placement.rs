use bevy::prelude::*;

use crate::engine::loading::model_loader::ActiveModel;
use crate::engine::scene::reticle::Reticle;

/// Request to move the active model to the reticle's surface point.
/// Fired by the place control and automatically after each successful
/// model load.
#[derive(Event, Default, Debug, Clone, Copy)]
pub struct PlaceModelEvent;

/// Copy the translation component of the reticle's pose onto the
/// active model and reveal it. No-op when nothing is loaded; the
/// reticle's orientation is deliberately not applied.
pub fn place_active_model(
    mut events: EventReader<PlaceModelEvent>,
    active: Res<ActiveModel>,
    reticles: Query<&Transform, With<Reticle>>,
    mut models: Query<(&mut Transform, &mut Visibility), Without<Reticle>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    let Some(entity) = active.entity else {
        return;
    };
    let Ok(reticle) = reticles.single() else {
        return;
    };
    let Ok((mut transform, mut visibility)) = models.get_mut(entity) else {
        return;
    };

    transform.translation = reticle.translation;
    *visibility = Visibility::Visible;
}
