//! User-facing controls for the viewer.
//!
//! On the web the frontend overlay owns all controls and drives these
//! tools over JSON-RPC; on native the model panel renders the same
//! controls in-engine. Both surfaces speak the same event vocabulary:
//! `SelectModelEvent` to swap the active model, `PlaceModelEvent` to
//! drop it onto the reticle's surface point.

/// Collapsible model selection panel (native builds only).
pub mod model_panel;

/// Placement of the active model onto the reticle pose.
pub mod placement;

/// Touch gesture extension hooks, currently inert.
pub mod touch;
