//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with post-processing, asset loading, scroll and
/// debug systems, plus platform-specific configuration.
pub mod app_setup;

/// Application state machine and loading transitions.
///
/// Moves from config loading through model loading to the running scene.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
