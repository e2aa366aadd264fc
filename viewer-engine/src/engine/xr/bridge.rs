use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::engine::xr::hit_test::{HitPose, HitTestBackend, HitTestSourceHandle};
use crate::rpc::web_rpc::WebRpcInterface;

/// State shared between the RPC layer, which the frontend's WebXR loop
/// feeds, and the bridged hit-test backend, which the AR loop drains.
#[derive(Default)]
pub struct BridgeShared {
    source_requested: bool,
    source_ready: bool,
    latest_hits: Vec<Mat4>,
}

/// Thread-safe handle to the bridge state. Cheap to clone; the RPC
/// message listener closure on WASM holds one side.
#[derive(Resource, Clone, Default)]
pub struct ArBridge(Arc<Mutex<BridgeShared>>);

impl ArBridge {
    /// Frontend acknowledged the hit-test source acquisition.
    pub fn mark_source_ready(&self) {
        if let Ok(mut shared) = self.0.lock() {
            shared.source_ready = true;
        }
    }

    /// Replace the per-frame hit-test results.
    pub fn push_hits(&self, hits: Vec<Mat4>) {
        if let Ok(mut shared) = self.0.lock() {
            shared.latest_hits = hits;
        }
    }

    /// Take a pending acquisition request, if the AR loop issued one.
    fn take_source_request(&self) -> bool {
        match self.0.lock() {
            Ok(mut shared) => std::mem::take(&mut shared.source_requested),
            Err(_) => false,
        }
    }

    fn shared(&self) -> Arc<Mutex<BridgeShared>> {
        self.0.clone()
    }
}

/// Forward the AR loop's acquisition request to the frontend, which
/// owns the WebXR session and its reference spaces.
pub fn forward_source_requests(
    bridge: Res<ArBridge>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if bridge.take_source_request() {
        rpc_interface.send_notification("request_hit_test_source", serde_json::json!({}));
    }
}

/// Backend that reads poses the frontend forwards over postMessage.
pub struct BridgedHitTest {
    shared: Arc<Mutex<BridgeShared>>,
    next_source_id: u64,
}

impl BridgedHitTest {
    pub fn new(bridge: &ArBridge) -> Self {
        Self {
            shared: bridge.shared(),
            next_source_id: 0,
        }
    }
}

impl HitTestBackend for BridgedHitTest {
    fn request_source(&mut self) {
        if let Ok(mut shared) = self.shared.lock() {
            shared.source_requested = true;
        }
    }

    fn poll_source(&mut self) -> Option<HitTestSourceHandle> {
        let mut shared = self.shared.lock().ok()?;
        if !shared.source_ready {
            return None;
        }
        shared.source_ready = false;
        self.next_source_id += 1;
        Some(HitTestSourceHandle::new(self.next_source_id))
    }

    fn query(&mut self, _source: HitTestSourceHandle) -> Vec<HitPose> {
        match self.shared.lock() {
            Ok(shared) => shared.latest_hits.iter().copied().map(HitPose).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn release(&mut self, _source: HitTestSourceHandle) {
        if let Ok(mut shared) = self.shared.lock() {
            *shared = BridgeShared::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_clears_bridge_state() {
        let bridge = ArBridge::default();
        let mut backend = BridgedHitTest::new(&bridge);

        backend.request_source();
        bridge.mark_source_ready();
        bridge.push_hits(vec![Mat4::IDENTITY]);

        let source = backend.poll_source().unwrap();
        assert_eq!(backend.query(source).len(), 1);

        backend.release(source);
        assert!(backend.query(source).is_empty());
        assert!(!bridge.take_source_request());
        assert!(backend.poll_source().is_none());
    }
}
