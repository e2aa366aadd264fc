//! Viewer engine: scene hosting, orbit camera, chained asset loading,
//! and the AR hit-test loop.

/// Orbit camera resource and controller for the non-immersive view.
pub mod camera;

/// Application construction, window configuration, and session states.
pub mod core;

/// Model catalog and the two-stage environment/model loader.
pub mod loading;

/// Persistent scene contents: camera entity, lights, reticle.
pub mod scene;

/// Hit-test seam to the platform AR runtime and the reticle update loop.
pub mod xr;
