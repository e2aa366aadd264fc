//! JSON-RPC 2.0 communication layer for the web frontend.
//!
//! Implements bidirectional messaging between the Bevy engine and the
//! hosting page via postMessage, supporting both request-response and
//! notification patterns. The frontend owns the DOM overlay and the
//! WebXR session; the engine owns the scene. Everything that crosses
//! that boundary goes through here.
//!
//! ## Message Flow
//!
//! ```text
//! Frontend (Parent Window)  <──postMessage──>  Bevy (canvas frame)
//!        │                                          │
//!        ├─ Request (with ID) ────────────────────> │
//!        │                                          ├─ Process request
//!        │ <─────────────────── Response (with ID) ─┤
//!        │                                          │
//!        ├─ Notification (no ID, e.g. xr_hits) ───> │
//!        │ <──── Notification (e.g. model_loaded) ──┤
//! ```
//!
//! ## Methods (frontend to engine)
//!
//! ### Model Control
//! - `select_model`: Load a catalog model by id
//! - `place_model`: Move the active model to the reticle
//! - `get_catalog`: List the selectable models
//!
//! ### Session Lifecycle
//! - `session_started`: An immersive session became active
//! - `session_ended`: The immersive session ended
//!
//! ### AR Hit-Testing
//! - `hit_test_source_ready`: Acknowledges `request_hit_test_source`
//! - `xr_hits`: Per-frame hit poses as column-major 4x4 matrices
//!
//! ### Diagnostics
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications (engine to frontend)
//!
//! - `catalog`, `loading_progress`, `model_loaded`, `load_failed`
//! - `session_changed`, `request_hit_test_source`, `viewport_resized`
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// JSON-RPC 2.0 bidirectional communication system.
///
/// Handles request-response patterns, notifications, and the WASM
/// message listener.
pub mod web_rpc;
