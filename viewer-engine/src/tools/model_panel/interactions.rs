use bevy::prelude::*;

use super::state::*;
use crate::engine::loading::model_loader::SelectModelEvent;
use crate::tools::placement::PlaceModelEvent;

// Close control inside the panel header collapses it to zero width.
pub fn collapse_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<CollapseButton>),
    >,
    mut state: ResMut<ModelPanelState>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                state.collapsed = true;
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

// Selector buttons request a model swap
pub fn model_button_interaction(
    mut q: Query<
        (&Interaction, &ModelButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut select_events: EventWriter<SelectModelEvent>,
) {
    for (interaction, button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                select_events.write(SelectModelEvent {
                    model_id: button.model_id.clone(),
                });
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

pub fn place_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<PlaceButton>),
    >,
    mut place_events: EventWriter<PlaceModelEvent>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                place_events.write(PlaceModelEvent);
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

// The collapsed panel has zero width and no visible control, so the
// keyboard shortcut is the way back in.
pub fn toggle_panel_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<ModelPanelState>,
) {
    if keyboard.just_pressed(KeyCode::KeyN) {
        state.collapsed = !state.collapsed;
    }
}
