//! Orbit camera for the non-immersive view.
//!
//! Inside an immersive session the platform drives the view pose; the
//! controller here only runs in inline mode.

/// Orbit state resource and mouse-driven controller with inertia.
pub mod orbit_camera;
