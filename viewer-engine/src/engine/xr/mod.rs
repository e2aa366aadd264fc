//! AR hit-testing behind a backend seam.
//!
//! The viewer never talks to the platform AR runtime directly. A
//! `HitTestBackend` exposes the three things the reticle loop needs:
//! request a viewer-anchored hit-test source, poll for its asynchronous
//! arrival, and query the latest frame's results. The WASM build
//! bridges those calls to the frontend's WebXR loop over RPC; tests use
//! a scripted mock.
//!
//! ## Per-session state machine
//!
//! ```text
//! Idle ──session start──> Active (source not requested)
//!   │                        │ first AR frame: request_source(),
//!   │                        │ requested = true (synchronously)
//!   │                        v
//!   │                     Active (acquisition pending) ──poll──┐
//!   │                        v                                 │
//!   │                     Active (source ready)  <─────────────┘
//!   │                        │ per frame: query(); first result
//!   │                        │ drives reticle pose + visibility
//!   └──────session end───────┘ source + requested cleared
//! ```

/// Shared queue between the RPC layer and the bridged backend.
pub mod bridge;

/// Backend trait, per-session hit-test state, and the reticle loop.
pub mod hit_test;
