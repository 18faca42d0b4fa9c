use crate::debug::settings::DebugSettings;
use crate::engine::assets::color::{color_from_json, hex_string};
use crate::engine::render::capabilities::{ActiveAntiAliasing, AntiAliasingPlan, GpuCapabilities};
use crate::engine::scene::lighting::SceneLight;
use crate::engine::scroll::progress::ScrollTracker;
use crate::engine::systems::fps_tracking::frame_stats;
use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

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

/// JSON-RPC 2.0 notification, sent without expecting a reply.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Outgoing message queues, flushed to the host page once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
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

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// JSON-RPC over `postMessage` between the engine and its host page.
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

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

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

/// Read-mostly view of the engine handed to request handlers.
///
/// Handlers edit a copy of the debug settings; the copy is written back only
/// if it differs, so queries do not trip change detection.
struct RpcContext<'a> {
    diagnostics: &'a DiagnosticsStore,
    scroll_tracker: &'a ScrollTracker,
    anti_aliasing: Option<AntiAliasingPlan>,
    backend: Option<&'a str>,
    settings: DebugSettings,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    scroll_tracker: Res<ScrollTracker>,
    active_anti_aliasing: Res<ActiveAntiAliasing>,
    capabilities: Option<Res<GpuCapabilities>>,
    mut debug_settings: ResMut<DebugSettings>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if events.is_empty() {
        return;
    }

    let mut context = RpcContext {
        diagnostics: &diagnostics,
        scroll_tracker: &scroll_tracker,
        anti_aliasing: active_anti_aliasing.0,
        backend: capabilities.as_deref().map(|caps| caps.backend.as_str()),
        settings: debug_settings.clone(),
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("RPC request: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {}", parse_error);
            }
        }
    }

    debug_settings.set_if_neq(context.settings);
}

/// Dispatch one request. Notifications (no id) still run but get no reply.
fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_fps" => handle_get_fps(context.diagnostics),
        "get_debug_settings" => Ok(debug_settings_json(&context.settings)),
        "set_light_color" => handle_set_light_color(&request.params, &mut context.settings),
        "set_bloom" => handle_set_bloom(&request.params, &mut context.settings),
        "get_scroll_progress" => Ok(scroll_progress_json(context.scroll_tracker)),
        "get_render_strategy" => Ok(render_strategy_json(context.anti_aliasing, context.backend)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let id = request.id.clone()?;
    Some(match result {
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
    })
}

fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let (fps, frame_time) = frame_stats(diagnostics).unwrap_or((0.0, 0.0));

    Ok(serde_json::json!({
        "fps": fps as f32,
        "frame_time_ms": frame_time as f32,
    }))
}

fn debug_settings_json(settings: &DebugSettings) -> serde_json::Value {
    let lights: serde_json::Map<String, serde_json::Value> = SceneLight::ALL
        .iter()
        .map(|&light| {
            (
                light.to_string().to_owned(),
                hex_string(settings.light_color(light)).into(),
            )
        })
        .collect();

    serde_json::json!({
        "lights": lights,
        "bloom": settings.bloom,
    })
}

fn handle_set_light_color(
    params: &serde_json::Value,
    settings: &mut DebugSettings,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct LightColorParams {
        light: String,
        color: serde_json::Value,
    }

    let light_params = serde_json::from_value::<LightColorParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'light' and 'color' parameters"))?;

    let light = SceneLight::from_string(&light_params.light).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown light: {}", light_params.light))
    })?;
    let color = color_from_json(&light_params.color)
        .ok_or_else(|| RpcError::invalid_params("Colour must be '#rrggbb' or 0..=0xffffff"))?;

    settings.set_light_color(light, color);
    info!("{} light colour set to {}", light.to_string(), hex_string(color));

    Ok(serde_json::json!({
        "light": light.to_string(),
        "color": hex_string(color),
    }))
}

fn handle_set_bloom(
    params: &serde_json::Value,
    settings: &mut DebugSettings,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct BloomParams {
        enabled: Option<bool>,
        strength: Option<f32>,
        radius: Option<f32>,
        threshold: Option<f32>,
    }

    let bloom_params = serde_json::from_value::<BloomParams>(params.clone()).map_err(|_| {
        RpcError::invalid_params("Expected any of 'enabled', 'strength', 'radius', 'threshold'")
    })?;

    if let Some(enabled) = bloom_params.enabled {
        settings.bloom.enabled = enabled;
    }
    if let Some(strength) = bloom_params.strength {
        settings.set_bloom_strength(strength);
    }
    if let Some(radius) = bloom_params.radius {
        settings.set_bloom_radius(radius);
    }
    if let Some(threshold) = bloom_params.threshold {
        settings.set_bloom_threshold(threshold);
    }

    Ok(serde_json::json!(settings.bloom))
}

fn scroll_progress_json(scroll_tracker: &ScrollTracker) -> serde_json::Value {
    serde_json::json!({
        "target": scroll_tracker.target,
        "current": scroll_tracker.current,
        "applied": scroll_tracker.applied,
    })
}

fn render_strategy_json(plan: Option<AntiAliasingPlan>, backend: Option<&str>) -> serde_json::Value {
    match plan {
        Some(plan) => serde_json::json!({
            "target": plan.target,
            "smaa": plan.smaa,
            "backend": backend,
        }),
        None => serde_json::json!({
            "target": null,
            "smaa": false,
            "backend": backend,
        }),
    }
}

fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications before responses, matching queue order on the host side.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a message to the embedding page. A top-level page is its own parent
/// and would hear its own messages, so nothing is sent there.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = window() else {
            error!("Window object not available");
            return;
        };
        let Some(parent) = window.parent().ok().flatten() else {
            return;
        };
        if js_sys::Object::is(parent.as_ref(), window.as_ref()) {
            return;
        }

        match serde_json::to_string(message) {
            Ok(json) => {
                if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                    error!("Failed to send message to parent: {:?}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::render::capabilities::RenderTargetStrategy;
    use serde_json::json;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(1)),
        }
    }

    fn call(
        method: &str,
        params: serde_json::Value,
        settings: DebugSettings,
    ) -> (RpcResponse, DebugSettings) {
        let diagnostics = DiagnosticsStore::default();
        let scroll_tracker = ScrollTracker {
            target: 0.5,
            current: 0.25,
            applied: Some(0.25),
        };
        let mut context = RpcContext {
            diagnostics: &diagnostics,
            scroll_tracker: &scroll_tracker,
            anti_aliasing: Some(AntiAliasingPlan {
                target: RenderTargetStrategy::Plain,
                smaa: true,
            }),
            backend: Some("Gl"),
            settings,
        };
        let response = handle_rpc_request(&request(method, params), &mut context)
            .expect("request with id gets a response");
        (response, context.settings)
    }

    #[test]
    fn unknown_method_is_reported() {
        let (response, _) = call("spin", json!({}), DebugSettings::default());
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.data, Some(json!({ "method": "spin" })));
    }

    #[test]
    fn fps_defaults_to_zero_before_measurements() {
        let (response, _) = call("get_fps", json!(null), DebugSettings::default());
        assert_eq!(response.result.unwrap()["fps"], json!(0.0));
    }

    #[test]
    fn debug_settings_use_hex_colours() {
        let (response, _) = call("get_debug_settings", json!(null), DebugSettings::default());
        let result = response.result.unwrap();
        assert_eq!(result["lights"]["top"], json!("#ff0000"));
        assert_eq!(result["lights"]["inset"], json!("#ffffff"));
        assert_eq!(result["lights"]["bottom"], json!("#750238"));
        assert_eq!(result["lights"].as_object().map(|lights| lights.len()), Some(3));
        assert_eq!(result["bloom"]["enabled"], json!(false));
    }

    #[test]
    fn light_colour_accepts_strings_and_numbers() {
        let (response, settings) = call(
            "set_light_color",
            json!({ "light": "inset", "color": "#00ff80" }),
            DebugSettings::default(),
        );
        assert!(response.error.is_none());
        assert_eq!(settings.inset_color, 0x00ff80);

        let (_, settings) = call(
            "set_light_color",
            json!({ "light": "top", "color": 255 }),
            settings,
        );
        assert_eq!(settings.top_color, 0x0000ff);
    }

    #[test]
    fn bad_light_params_are_rejected() {
        for params in [
            json!({ "light": "rim", "color": "#ffffff" }),
            json!({ "light": "top", "color": "red" }),
            json!({ "color": "#ffffff" }),
        ] {
            let (response, settings) = call("set_light_color", params, DebugSettings::default());
            assert_eq!(response.error.unwrap().code, -32602);
            assert_eq!(settings, DebugSettings::default());
        }
    }

    #[test]
    fn bloom_updates_are_partial_and_clamped() {
        let (response, settings) = call(
            "set_bloom",
            json!({ "enabled": true, "threshold": 4.0 }),
            DebugSettings::default(),
        );
        assert!(settings.bloom.enabled);
        assert_eq!(settings.bloom.threshold, 1.0);
        assert_eq!(settings.bloom.strength, 2.0);
        assert_eq!(response.result.unwrap()["threshold"], json!(1.0));

        let (response, _) = call("set_bloom", json!({ "glow": 1 }), settings);
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[test]
    fn scroll_and_render_queries_report_state() {
        let (response, _) = call("get_scroll_progress", json!(null), DebugSettings::default());
        assert_eq!(
            response.result.unwrap(),
            json!({ "target": 0.5, "current": 0.25, "applied": 0.25 })
        );

        let (response, _) = call("get_render_strategy", json!(null), DebugSettings::default());
        assert_eq!(
            response.result.unwrap(),
            json!({ "target": "plain", "smaa": true, "backend": "Gl" })
        );
    }

    #[test]
    fn notifications_get_no_response() {
        let diagnostics = DiagnosticsStore::default();
        let scroll_tracker = ScrollTracker::default();
        let mut context = RpcContext {
            diagnostics: &diagnostics,
            scroll_tracker: &scroll_tracker,
            anti_aliasing: None,
            backend: None,
            settings: DebugSettings::default(),
        };
        let mut notification = request("set_bloom", json!({ "enabled": true }));
        notification.id = None;

        assert!(handle_rpc_request(&notification, &mut context).is_none());
        assert!(context.settings.bloom.enabled);
    }

    #[test]
    fn queued_requests_update_settings_once() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(WebRpcPlugin)
            .init_resource::<DiagnosticsStore>()
            .init_resource::<ScrollTracker>()
            .init_resource::<ActiveAntiAliasing>()
            .init_resource::<DebugSettings>();

        let queue = std::sync::Arc::new(std::sync::Mutex::new(vec![
            json!({ "jsonrpc": "2.0", "method": "set_bloom", "params": { "strength": 0.5 }, "id": 1 })
                .to_string(),
            "not json".to_string(),
        ]));
        app.insert_resource(MessageQueue(queue.clone()));
        app.update();

        assert_eq!(app.world().resource::<DebugSettings>().bloom.strength, 0.5);
        assert!(queue.lock().map(|queue| queue.is_empty()).unwrap_or(false));

        // A drained request must not be replayed on later frames.
        app.world_mut().resource_mut::<DebugSettings>().bloom.strength = 0.9;
        app.update();
        app.update();
        assert_eq!(app.world().resource::<DebugSettings>().bloom.strength, 0.9);
    }
}
