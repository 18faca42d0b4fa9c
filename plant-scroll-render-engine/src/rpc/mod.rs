//! JSON-RPC 2.0 communication layer between the engine and its host page.
//!
//! When the engine runs inside an iframe, the embedding page can query and
//! tune it through `postMessage`. A top-level page never receives messages
//! back, since it would only be talking to itself.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent)  <──postMessage──>  Bevy (iframe)
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> │
//!        │                                     ├─ Process request
//!        │ <──────────────── Response (with ID) ┤
//!        │                                     │
//!        │ <─────────── Notification (no ID) ──┤
//! ```
//!
//! ## Requests
//!
//! - `get_fps`: smoothed frame rate and frame time
//! - `get_debug_settings`: light colours (`#rrggbb`) and bloom parameters
//! - `set_light_color`: `{ "light": "top" | "inset" | "bottom", "color": "#rrggbb" | 0xrrggbb }`
//! - `set_bloom`: any of `{ "enabled", "strength", "radius", "threshold" }`,
//!   clamped to the control ranges
//! - `get_scroll_progress`: target, scrubbed and applied progress
//! - `get_render_strategy`: render target and SMAA choice
//!
//! ## Notifications
//!
//! - `fps_update` every half second
//! - `scroll_progress` whenever the timeline applies a new value (markers on)
//! - `model_loaded`, `model_load_failed`
//! - `render_strategy` whenever the anti-aliasing plan changes
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({ "data": "value" }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
