use bevy::prelude::*;

use super::state::*;
use crate::engine::loading::catalog::{CatalogLoader, ModelCatalog};

// Spawns the model panel with header, place button, and an empty body
// that fills with selector buttons once the catalog arrives.
pub fn spawn_model_panel(mut commands: Commands, state: Res<ModelPanelState>) {
    let width = if state.collapsed { state.closed_width } else { state.open_width };
    let body_display = if state.collapsed { Display::None } else { Display::Flex };

    commands
        .spawn((
            ModelPanelRoot,
            Name::new("ModelPanel"),
            BackgroundColor(Color::srgb(0.10, 0.11, 0.13)),
            Node {
                width: Val::Px(width),
                min_width: Val::Px(0.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                justify_content: JustifyContent::FlexStart,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    HeaderNode,
                    Name::new("Header"),
                    BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(12.0)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::SpaceBetween,
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        TitleText,
                        Name::new("Title"),
                        Text::new("Models"),
                        TextFont { font_size: 18.0, ..default() },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                    ));

                    header
                        .spawn((
                            CollapseButton,
                            Name::new("CollapseButton"),
                            Button,
                            BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            Node {
                                width: Val::Px(28.0),
                                height: Val::Px(28.0),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|btn_parent| {
                            btn_parent.spawn((
                                CollapseLabel,
                                Text::new("x"),
                                TextFont { font_size: 18.0, ..default() },
                                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                            ));
                        });
                });

            parent
                .spawn((
                    ModelPanelBody,
                    Name::new("Body"),
                    BackgroundColor(Color::srgb(0.12, 0.13, 0.15)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        row_gap: Val::Px(8.0),
                        display: body_display,
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    body.spawn((
                        PlaceButton,
                        Button,
                        Name::new("PlaceButton"),
                        BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                        BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Px(36.0),
                            display: Display::Flex,
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new("Place at reticle"),
                            TextFont { font_size: 16.0, ..default() },
                            TextColor(Color::srgb(1.0, 1.0, 1.0)),
                        ));
                    });
                });
        });
}

// One selector button per catalog entry, spawned once after load.
pub fn populate_model_buttons(
    mut commands: Commands,
    mut state: ResMut<ModelPanelState>,
    loader: Res<CatalogLoader>,
    catalogs: Res<Assets<ModelCatalog>>,
    bodies: Query<Entity, With<ModelPanelBody>>,
) {
    if state.buttons_spawned {
        return;
    }
    let Some(catalog) = loader.get(&catalogs) else {
        return;
    };
    let Ok(body) = bodies.single() else {
        return;
    };

    commands.entity(body).with_children(|parent| {
        for entry in &catalog.models {
            parent
                .spawn((
                    ModelButton { model_id: entry.id.clone() },
                    Button,
                    Name::new(format!("ModelButton:{}", entry.id)),
                    BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                    BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(36.0),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new(entry.label.clone()),
                        TextFont { font_size: 16.0, ..default() },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                    ));
                });
        }
    });
    state.buttons_spawned = true;
}

pub fn apply_collapse_state(
    state: Res<ModelPanelState>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<ModelPanelRoot>>,
        Query<&mut Node, With<ModelPanelBody>>,
    )>,
) {
    if !state.is_changed() {
        return;
    }
    if let Ok(mut n) = nodes.p0().single_mut() {
        n.width = Val::Px(if state.collapsed { state.closed_width } else { state.open_width });
    }
    if let Ok(mut n) = nodes.p1().single_mut() {
        n.display = if state.collapsed { Display::None } else { Display::Flex };
    }
}
