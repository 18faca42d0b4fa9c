//! Runtime systems for window tracking and diagnostics.
//!
//! Keeps viewport size in step with the window and reports frame rate to
//! the host page and native overlay.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates native UI overlays.
pub mod fps_tracking;

/// Viewport size tracking with pixel ratio capping and camera aspect updates.
pub mod resize;
