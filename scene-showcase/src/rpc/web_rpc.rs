use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::scene_context::SceneContext;
use crate::engine::particles::ParticleToggleEvent;
use crate::engine::scene::fog::FogToggleEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
use web_sys::{window, MessageEvent};

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

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC communication between the host
/// page and the engine. The frontend drives the toggles through it and
/// receives fps/click/resize notifications back.
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

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the message bridge to the embedding page.
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

    // Thread-safe message queue for event-listener to ECS handoff.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
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

/// Resource wrapping the thread-safe message queue for event handling.
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

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    context: Res<SceneContext>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut fog_events: EventWriter<FogToggleEvent>,
    mut particle_events: EventWriter<ParticleToggleEvent>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(
                    &request,
                    &diagnostics,
                    &context,
                    &mut fog_events,
                    &mut particle_events,
                ) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("discarding unparseable RPC message: {parse_error}");
            }
        }
    }
}

/// Handle one RPC request and generate a response based on the method.
fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    context: &SceneContext,
    fog_events: &mut EventWriter<FogToggleEvent>,
    particle_events: &mut EventWriter<ParticleToggleEvent>,
) -> Option<RpcResponse> {
    // Only requests with IDs get responses (notifications have none).
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "toggle_fog" => parse_enabled(&request.params).map(|enabled| {
            fog_events.write(FogToggleEvent { enabled });
            serde_json::json!({ "fog": enabled })
        }),
        "toggle_particles" => parse_enabled(&request.params).map(|enabled| {
            particle_events.write(ParticleToggleEvent { enabled });
            serde_json::json!({ "particles": enabled })
        }),
        "get_fps" => Ok(handle_get_fps(diagnostics)),
        "get_click_count" => Ok(serde_json::json!({ "count": context.click_count() })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(RpcError {
                    code: -32601,
                    message: "Method not found".to_string(),
                    data: Some(serde_json::json!({"method": request.method})),
                }),
                id: Some(id),
            });
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// The toggles carry well-formed checkbox state: a single boolean.
fn parse_enabled(params: &serde_json::Value) -> Result<bool, RpcError> {
    #[derive(Deserialize)]
    struct ToggleParams {
        enabled: bool,
    }

    serde_json::from_value::<ToggleParams>(params.clone())
        .map(|p| p.enabled)
        .map_err(|_| RpcError::invalid_params("Expected 'enabled' parameter"))
}

fn handle_get_fps(diagnostics: &DiagnosticsStore) -> serde_json::Value {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    serde_json::json!({ "fps": fps })
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send a serialized message to the parent window hosting the canvas.
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
                    }
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op outside the browser.
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_params_require_a_boolean() {
        assert!(parse_enabled(&serde_json::json!({ "enabled": true })).unwrap());
        assert!(!parse_enabled(&serde_json::json!({ "enabled": false })).unwrap());
        assert!(parse_enabled(&serde_json::json!({ "on": 1 })).is_err());
    }

    #[test]
    fn requests_parse_without_params() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "method": "get_fps", "id": 1}"#).unwrap();
        assert_eq!(request.method, "get_fps");
        assert!(request.params.is_null());
    }
}
