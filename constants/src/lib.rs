//! Shared tuning values for the AR model viewer.
//!
//! Kept in a separate crate so the engine, tests, and any future
//! pre-processing tools agree on asset layout and render settings.

/// Asset directory layout and fixed asset file names.
pub mod asset_path;

/// Reticle ring geometry.
pub mod reticle;

/// Camera projection, lighting, and orbit controller settings.
pub mod render_settings;

/// Native model panel dimensions.
pub mod ui;
