use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::{SessionEndedEvent, SessionMode, SessionStartedEvent};
use crate::engine::loading::catalog::{CatalogLoader, ModelCatalog};
use crate::engine::loading::model_loader::SelectModelEvent;
use crate::engine::xr::bridge::ArBridge;
use crate::tools::placement::PlaceModelEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC communication between the
/// frontend and Bevy. Handles both request-response patterns and
/// notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the frontend without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the frontend.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the WebRPC communication layer.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap pre-filter before queuing for JSON parsing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the frontend.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Dispatch incoming messages to method handlers. Notifications (no id)
/// are processed the same as requests; they just get no response. The
/// per-frame `xr_hits` stream relies on that.
fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    loader: Res<CatalogLoader>,
    catalogs: Res<Assets<ModelCatalog>>,
    bridge: Res<ArBridge>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut select_events: EventWriter<SelectModelEvent>,
    mut place_events: EventWriter<PlaceModelEvent>,
    mut started_events: EventWriter<SessionStartedEvent>,
    mut ended_events: EventWriter<SessionEndedEvent>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("RPC parse error: {}", parse_error);
                continue;
            }
        };

        let result = match request.method.as_str() {
            "select_model" => {
                handle_select_model(&request.params, &loader, &catalogs, &mut select_events)
            }
            "place_model" => {
                place_events.write(PlaceModelEvent);
                Ok(serde_json::json!({ "success": true }))
            }
            "session_started" => handle_session_started(&request.params, &mut started_events),
            "session_ended" => {
                ended_events.write(SessionEndedEvent);
                Ok(serde_json::json!({ "success": true }))
            }
            "hit_test_source_ready" => {
                bridge.mark_source_ready();
                Ok(serde_json::json!({ "success": true }))
            }
            "xr_hits" => handle_xr_hits(&request.params, &bridge),
            "get_catalog" => handle_get_catalog(&loader, &catalogs),
            "get_fps" => handle_get_fps(&diagnostics),
            other => {
                warn!("Unknown RPC method: {}", other);
                if let Some(id) = request.id.clone() {
                    rpc_interface.queue_response(create_error_response(
                        id,
                        -32601,
                        "Method not found",
                        Some(serde_json::json!({ "method": other })),
                    ));
                }
                continue;
            }
        };

        let Some(id) = request.id.clone() else {
            if let Err(error) = result {
                warn!("RPC notification '{}' failed: {}", request.method, error.message);
            }
            continue;
        };

        let response = match result {
            Ok(result_value) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: Some(result_value),
                error: None,
                id: Some(id),
            },
            Err(error) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(error),
                id: Some(id),
            },
        };
        rpc_interface.queue_response(response);
    }
}

/// Handle model selection with catalog validation and event dispatch.
fn handle_select_model(
    params: &serde_json::Value,
    loader: &CatalogLoader,
    catalogs: &Assets<ModelCatalog>,
    select_events: &mut EventWriter<SelectModelEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct SelectModelParams {
        model: String,
    }

    let select_params = serde_json::from_value::<SelectModelParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'model' parameter"))?;

    // Reject ids the catalog does not know, once it has loaded. Before
    // that the loading pipeline repeats the check itself.
    if let Some(catalog) = loader.get(catalogs) {
        if !catalog.contains(&select_params.model) {
            return Err(RpcError::invalid_params(&format!(
                "Unknown model: {}",
                select_params.model
            )));
        }
    }

    select_events.write(SelectModelEvent {
        model_id: select_params.model.clone(),
    });

    Ok(serde_json::json!({
        "success": true,
        "model": select_params.model
    }))
}

fn handle_session_started(
    params: &serde_json::Value,
    started_events: &mut EventWriter<SessionStartedEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct SessionStartedParams {
        mode: String,
    }

    let session_params = serde_json::from_value::<SessionStartedParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'mode' parameter"))?;

    let mode = SessionMode::from_session_string(&session_params.mode).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown session mode: {}", session_params.mode))
    })?;

    started_events.write(SessionStartedEvent { mode });

    Ok(serde_json::json!({
        "success": true,
        "mode": session_params.mode
    }))
}

/// Per-frame hit poses from the frontend's WebXR loop.
fn handle_xr_hits(
    params: &serde_json::Value,
    bridge: &ArBridge,
) -> Result<serde_json::Value, RpcError> {
    let hits = hit_matrices_from_params(params)?;
    let count = hits.len();
    bridge.push_hits(hits);

    Ok(serde_json::json!({ "success": true, "count": count }))
}

/// Parse `{ "hits": [[f32; 16], ...] }` into column-major matrices.
fn hit_matrices_from_params(params: &serde_json::Value) -> Result<Vec<Mat4>, RpcError> {
    #[derive(serde::Deserialize)]
    struct XrHitsParams {
        hits: Vec<[f32; 16]>,
    }

    let hit_params = serde_json::from_value::<XrHitsParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'hits' as arrays of 16 floats"))?;

    Ok(hit_params
        .hits
        .iter()
        .map(Mat4::from_cols_array)
        .collect())
}

fn handle_get_catalog(
    loader: &CatalogLoader,
    catalogs: &Assets<ModelCatalog>,
) -> Result<serde_json::Value, RpcError> {
    let catalog = loader
        .get(catalogs)
        .ok_or_else(|| RpcError::internal_error("Catalog not loaded yet"))?;

    Ok(catalog.to_params())
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}
