//! Core application setup and session state management.
//!
//! Handles application lifecycle, window configuration, and the
//! inline/immersive session state machine for native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
pub mod app_setup;

/// Session mode state machine and XR session lifecycle events.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
