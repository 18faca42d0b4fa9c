//! Debug controls for the scene look.
//!
//! A keyboard binding set for every target and the RPC methods in
//! `rpc::web_rpc` both edit the same `DebugSettings` resource.

/// Tunable light colours and bloom parameters.
pub mod settings;

/// Keyboard bindings for the bloom controls.
pub mod keyboard;
