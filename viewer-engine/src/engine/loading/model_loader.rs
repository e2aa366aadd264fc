use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::pbr::EnvironmentMapLight;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;

use constants::asset_path::{environment_diffuse_path, environment_specular_path, model_path};
use constants::render_settings::ENVIRONMENT_INTENSITY;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::loading::catalog::{CatalogLoader, ModelCatalog};
use crate::engine::scene::ViewerCamera;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::placement::PlaceModelEvent;

/// Request that the named model becomes the active one.
#[derive(Event, Debug, Clone)]
pub struct SelectModelEvent {
    pub model_id: String,
}

/// The model currently attached to the scene, if any. There is never
/// more than one; the swap happens in the frame its replacement spawns.
#[derive(Resource, Default)]
pub struct ActiveModel {
    pub entity: Option<Entity>,
    pub model_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    /// Fetching the fixed prefiltered environment cubemaps.
    Environment,
    /// Environment lighting assigned; fetching the glTF scene.
    Model,
    /// Model spawned; waiting for mesh bounds to recentre the orbit.
    Recenter,
}

/// Staging handles for the two prefiltered environment cubemaps.
/// `EnvironmentMapLight` binds cubemap views, so the environment ships
/// as diffuse/specular KTX2 cubemaps filtered offline from the HDR.
struct EnvironmentHandles {
    diffuse: Handle<Image>,
    specular: Handle<Image>,
}

/// One in-flight load. Dropping it releases the staging handles, which
/// cancels whatever the asset server has not finished fetching.
pub struct LoadInFlight {
    pub model_id: String,
    pub stage: LoadStage,
    environment: Option<EnvironmentHandles>,
    scene: Option<Handle<Scene>>,
    spawned: Option<Entity>,
}

/// At most one load is in flight; a newer selection replaces it.
#[derive(Resource, Default)]
pub struct PendingLoad(pub(crate) Option<LoadInFlight>);

/// Start a chained load for the most recent selection of the frame.
pub fn begin_selected_load(
    mut events: EventReader<SelectModelEvent>,
    mut pending: ResMut<PendingLoad>,
    catalog_loader: Res<CatalogLoader>,
    catalogs: Res<Assets<ModelCatalog>>,
    asset_server: Res<AssetServer>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(selection) = latest_selection(&mut events) else {
        return;
    };

    if let Some(catalog) = catalog_loader.get(&catalogs) {
        if !catalog.contains(&selection) {
            warn!("Ignoring selection of unknown model '{}'", selection);
            rpc_interface.send_notification(
                "load_failed",
                serde_json::json!({ "model": selection, "reason": "unknown model id" }),
            );
            return;
        }
    }

    if let Some(superseded) = pending.0.take() {
        debug!(
            "Selection of '{}' supersedes in-flight load of '{}'",
            selection, superseded.model_id
        );
    }

    info!("Loading environment for model '{}'", selection);
    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({ "model": selection, "stage": "environment" }),
    );

    pending.0 = Some(LoadInFlight {
        model_id: selection,
        stage: LoadStage::Environment,
        environment: Some(EnvironmentHandles {
            diffuse: asset_server.load(environment_diffuse_path()),
            specular: asset_server.load(environment_specular_path()),
        }),
        scene: None,
        spawned: None,
    });
}

/// Last selection in a frame wins; earlier ones are superseded unseen.
fn latest_selection(events: &mut EventReader<SelectModelEvent>) -> Option<String> {
    events.read().last().map(|event| event.model_id.clone())
}

/// Once both cubemaps are in, hand them to the camera's environment
/// light and begin fetching the model itself. The staging handles move
/// into the light component, so nothing else keeps the images alive.
pub fn advance_environment_stage(
    mut pending: ResMut<PendingLoad>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    cameras: Query<Entity, With<ViewerCamera>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(load) = pending.0.as_mut() else {
        return;
    };
    if load.stage != LoadStage::Environment {
        return;
    }
    let Some(handles) = load.environment.as_ref() else {
        return;
    };

    for handle in [&handles.diffuse, &handles.specular] {
        match asset_server.get_load_state(handle) {
            Some(LoadState::Loaded) => {}
            Some(LoadState::Failed(error)) => {
                warn!("Environment load failed: {}", error);
                rpc_interface.send_notification(
                    "load_failed",
                    serde_json::json!({
                        "model": load.model_id,
                        "stage": "environment",
                        "reason": error.to_string(),
                    }),
                );
                pending.0 = None;
                return;
            }
            _ => return,
        }
    }

    let Some(environment) = load.environment.take() else {
        return;
    };
    if let Ok(camera) = cameras.single() {
        commands.entity(camera).insert(EnvironmentMapLight {
            diffuse_map: environment.diffuse,
            specular_map: environment.specular,
            intensity: ENVIRONMENT_INTENSITY,
            ..default()
        });
    }

    info!("Environment ready, loading model '{}'", load.model_id);
    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({ "model": load.model_id, "stage": "model" }),
    );

    load.scene = Some(
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(model_path(&load.model_id))),
    );
    load.stage = LoadStage::Model;
}

/// Swap the freshly loaded model in. The previous active model leaves
/// the scene in the same frame its replacement enters it, so a failed
/// load never strands a half-initialised scene.
pub fn spawn_model_when_ready(
    mut pending: ResMut<PendingLoad>,
    mut active: ResMut<ActiveModel>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut place_events: EventWriter<PlaceModelEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(load) = pending.0.as_mut() else {
        return;
    };
    if load.stage != LoadStage::Model {
        return;
    }
    let Some(scene) = load.scene.clone() else {
        return;
    };

    match asset_server.get_load_state(&scene) {
        Some(LoadState::Loaded) => {}
        Some(LoadState::Failed(error)) => {
            warn!("Model '{}' failed to load: {}", load.model_id, error);
            rpc_interface.send_notification(
                "load_failed",
                serde_json::json!({
                    "model": load.model_id,
                    "stage": "model",
                    "reason": error.to_string(),
                }),
            );
            // Previous active model stays in place.
            pending.0 = None;
            return;
        }
        _ => return,
    }

    let entity = attach_model(&mut commands, &mut active, scene, &load.model_id);
    load.scene = None;
    load.spawned = Some(entity);
    load.stage = LoadStage::Recenter;

    place_events.write(PlaceModelEvent);

    info!("Model '{}' attached to scene", load.model_id);
    rpc_interface
        .send_notification("model_loaded", serde_json::json!({ "model": load.model_id }));
}

/// Swap the scene's model: despawn the previous active entity, spawn
/// the new scene root, and point `ActiveModel` at it. The scene never
/// holds more than one model.
fn attach_model(
    commands: &mut Commands,
    active: &mut ActiveModel,
    scene: Handle<Scene>,
    model_id: &str,
) -> Entity {
    if let Some(previous) = active.entity.take() {
        commands.entity(previous).despawn();
    }

    let entity = commands
        .spawn((
            SceneRoot(scene),
            Transform::IDENTITY,
            Visibility::Inherited,
            Name::new(format!("model:{}", model_id)),
        ))
        .id();
    active.entity = Some(entity);
    active.model_id = Some(model_id.to_string());
    entity
}

/// Recentre the orbit target on the spawned model's bounds. Mesh
/// entities appear a frame or two after the scene root while the glTF
/// scene instantiates, so this retries until bounds exist.
pub fn recenter_orbit_target(
    mut pending: ResMut<PendingLoad>,
    mut orbit: ResMut<OrbitCamera>,
    children: Query<&Children>,
    volumes: Query<(&GlobalTransform, &Aabb)>,
) {
    let Some(load) = pending.0.as_ref() else {
        return;
    };
    if load.stage != LoadStage::Recenter {
        return;
    }
    let Some(root) = load.spawned else {
        return;
    };

    let Some((min, max)) = world_bounds(root, &children, &volumes) else {
        return;
    };

    orbit.recenter((min + max) * 0.5);
    info!("Orbit target recentred on '{}'", load.model_id);
    pending.0 = None;
}

/// Merged world-space bounding box of an entity tree, if any of its
/// descendants carry render bounds.
fn world_bounds(
    root: Entity,
    children: &Query<&Children>,
    volumes: &Query<(&GlobalTransform, &Aabb)>,
) -> Option<(Vec3, Vec3)> {
    let mut merged: Option<(Vec3, Vec3)> = None;
    let mut stack = vec![root];

    while let Some(entity) = stack.pop() {
        if let Ok(kids) = children.get(entity) {
            stack.extend(kids.iter().copied());
        }
        if let Ok((transform, aabb)) = volumes.get(entity) {
            let (lo, hi) = world_aabb(transform, aabb);
            merged = Some(match merged {
                Some((min, max)) => (min.min(lo), max.max(hi)),
                None => (lo, hi),
            });
        }
    }

    merged
}

const CORNER_SIGNS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Axis-aligned world bounds of a local-space `Aabb` under `transform`.
fn world_aabb(transform: &GlobalTransform, aabb: &Aabb) -> (Vec3, Vec3) {
    let center = Vec3::from(aabb.center);
    let half = Vec3::from(aabb.half_extents);
    let mut min = Vec3::MAX;
    let mut max = Vec3::MIN;

    for signs in CORNER_SIGNS {
        let world = transform.transform_point(center + signs * half);
        min = min.min(world);
        max = max.max(world);
    }

    (min, max)
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::SystemState;

    use super::*;

    #[test]
    fn scene_never_holds_more_than_one_model() {
        fn attach(app: &mut App, id: &str) {
            let mut state: SystemState<(Commands, ResMut<ActiveModel>)> =
                SystemState::new(app.world_mut());
            let (mut commands, mut active) = state.get_mut(app.world_mut());
            attach_model(&mut commands, &mut active, Handle::default(), id);
            state.apply(app.world_mut());
        }

        let mut app = App::new();
        app.init_resource::<ActiveModel>();

        attach(&mut app, "chair");
        attach(&mut app, "table");

        let mut models = app.world_mut().query_filtered::<&Name, With<SceneRoot>>();
        let names: Vec<_> = models.iter(app.world()).collect();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].as_str(), "model:table");
        assert_eq!(
            app.world().resource::<ActiveModel>().model_id.as_deref(),
            Some("table")
        );
    }

    #[test]
    fn superseding_selection_drops_staged_handles() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Image>();
        app.init_asset::<ModelCatalog>();
        app.init_resource::<PendingLoad>();
        app.init_resource::<CatalogLoader>();
        app.init_resource::<WebRpcInterface>();
        app.add_event::<SelectModelEvent>();
        app.add_systems(Update, begin_selected_load);

        // The in-flight load holds the only strong handles to its
        // staged image.
        let staged = app
            .world_mut()
            .resource_mut::<Assets<Image>>()
            .add(Image::default());
        let staged_id = staged.id();
        app.world_mut().resource_mut::<PendingLoad>().0 = Some(LoadInFlight {
            model_id: "chair".into(),
            stage: LoadStage::Environment,
            environment: Some(EnvironmentHandles {
                diffuse: staged.clone(),
                specular: staged,
            }),
            scene: None,
            spawned: None,
        });

        app.world_mut().send_event(SelectModelEvent {
            model_id: "table".into(),
        });
        app.update();
        // Second frame lets the asset collector process the dropped
        // handles.
        app.update();

        let pending = app.world().resource::<PendingLoad>();
        assert_eq!(
            pending.0.as_ref().map(|load| load.model_id.as_str()),
            Some("table")
        );
        assert!(
            app.world()
                .resource::<Assets<Image>>()
                .get(staged_id)
                .is_none()
        );
    }

    #[test]
    fn world_aabb_translates_local_bounds() {
        let transform = GlobalTransform::from(Transform::from_xyz(10.0, 0.0, -5.0));
        let aabb = Aabb {
            center: Vec3::new(0.0, 1.0, 0.0).into(),
            half_extents: Vec3::splat(0.5).into(),
        };

        let (min, max) = world_aabb(&transform, &aabb);
        assert!(min.abs_diff_eq(Vec3::new(9.5, 0.5, -5.5), 1e-5));
        assert!(max.abs_diff_eq(Vec3::new(10.5, 1.5, -4.5), 1e-5));
    }

    #[test]
    fn world_aabb_applies_scale() {
        let transform =
            GlobalTransform::from(Transform::from_scale(Vec3::new(2.0, 1.0, 1.0)));
        let aabb = Aabb {
            center: Vec3::ZERO.into(),
            half_extents: Vec3::ONE.into(),
        };

        let (min, max) = world_aabb(&transform, &aabb);
        assert!(min.abs_diff_eq(Vec3::new(-2.0, -1.0, -1.0), 1e-5));
        assert!(max.abs_diff_eq(Vec3::new(2.0, 1.0, 1.0), 1e-5));
    }

    #[test]
    fn last_selection_in_a_frame_wins() {
        #[derive(Resource, Default)]
        struct Captured(Option<String>);

        let mut app = App::new();
        app.add_event::<SelectModelEvent>();
        app.init_resource::<Captured>();
        app.add_systems(
            Update,
            |mut events: EventReader<SelectModelEvent>, mut captured: ResMut<Captured>| {
                if let Some(selection) = latest_selection(&mut events) {
                    captured.0 = Some(selection);
                }
            },
        );

        app.world_mut().send_event(SelectModelEvent {
            model_id: "chair".into(),
        });
        app.world_mut().send_event(SelectModelEvent {
            model_id: "table".into(),
        });
        app.update();

        assert_eq!(
            app.world().resource::<Captured>().0.as_deref(),
            Some("table")
        );
    }
}
