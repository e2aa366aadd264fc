use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller};
use crate::engine::core::app_state::{
    SessionEndedEvent, SessionMode, SessionStartedEvent, apply_session_transitions,
    notify_session_changed,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog::{CatalogLoader, ModelCatalog, poll_catalog, start_catalog_load};
use crate::engine::loading::model_loader::{
    ActiveModel, PendingLoad, SelectModelEvent, advance_environment_stage, begin_selected_load,
    recenter_orbit_target, spawn_model_when_ready,
};
use crate::engine::scene::{notify_viewport_resize, setup_scene};
use crate::engine::xr::bridge::{ArBridge, forward_source_requests};
use crate::engine::xr::hit_test::{
    ArRuntime, HitTestState, reset_hit_test_on_session_end, update_reticle_from_hit_test,
};
// Crate tools modules
use crate::tools::model_panel::ModelPanelPlugin;
use crate::tools::placement::{PlaceModelEvent, place_active_model};
use crate::tools::touch::{TouchGestureState, track_touch_gestures};
// Crate web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    // The bridge is shared between the RPC layer (fed by the frontend's
    // WebXR loop) and the hit-test backend that the AR loop polls.
    let bridge = ArBridge::default();
    app.insert_resource(ArRuntime::bridged(&bridge))
        .insert_resource(bridge);

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ModelCatalog as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ModelCatalog>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(ModelPanelPlugin)
        .init_state::<SessionMode>();

    // Initialise resources early
    app.init_resource::<OrbitCamera>()
        .init_resource::<ActiveModel>()
        .init_resource::<PendingLoad>()
        .init_resource::<CatalogLoader>()
        .init_resource::<HitTestState>()
        .init_resource::<TouchGestureState>()
        .add_event::<SelectModelEvent>()
        .add_event::<PlaceModelEvent>()
        .add_event::<SessionStartedEvent>()
        .add_event::<SessionEndedEvent>();

    app.add_systems(Startup, (setup_scene, start_catalog_load));

    // Loading pipeline: environment lighting must land before the model
    // fetch begins, and placement runs in the same frame a model spawns.
    app.add_systems(
        Update,
        (
            poll_catalog,
            begin_selected_load,
            advance_environment_stage,
            spawn_model_when_ready,
            recenter_orbit_target,
            place_active_model,
        )
            .chain(),
    );

    // Session lifecycle and ambient systems run in every mode.
    app.add_systems(
        Update,
        (
            apply_session_transitions,
            notify_session_changed,
            reset_hit_test_on_session_end,
            forward_source_requests,
            track_touch_gestures,
            notify_viewport_resize,
        ),
    );

    // Orbit controls outside immersive sessions, hit-testing inside AR.
    app.add_systems(
        Update,
        camera_controller.run_if(in_state(SessionMode::Inline)),
    )
    .add_systems(
        Update,
        update_reticle_from_hit_test.run_if(in_state(SessionMode::ImmersiveAr)),
    );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
