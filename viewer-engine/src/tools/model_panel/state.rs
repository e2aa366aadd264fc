use bevy::prelude::*;

use constants::ui::{PANEL_CLOSED_WIDTH, PANEL_OPEN_WIDTH};

// Resources
#[derive(Resource)]
pub struct ModelPanelState {
    pub collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
    pub buttons_spawned: bool,
}
impl Default for ModelPanelState {
    fn default() -> Self {
        Self {
            collapsed: true,
            open_width: PANEL_OPEN_WIDTH,
            closed_width: PANEL_CLOSED_WIDTH,
            buttons_spawned: false,
        }
    }
}

// Components
#[derive(Component)]
pub struct ModelPanelRoot;
#[derive(Component)]
pub struct ModelPanelBody;
#[derive(Component)]
pub struct HeaderNode;
#[derive(Component)]
pub struct TitleText;
#[derive(Component)]
pub struct CollapseButton;
#[derive(Component)]
pub struct CollapseLabel;
#[derive(Component)]
pub struct PlaceButton;

/// Selector button for one catalog entry.
#[derive(Component)]
pub struct ModelButton {
    pub model_id: String,
}
