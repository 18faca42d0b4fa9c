//! Scroll-driven timeline for the plant scene.
//!
//! Page scroll (wasm32) or the mouse wheel over a virtual page (native)
//! produces a normalised progress value. Progress is scrubbed towards its
//! target, quantised, and mapped onto the flower yaw, the plants group
//! pitch and the animation clip time.

/// Page scroll and mouse wheel sources feeding the scroll tracker.
pub mod input;

/// Debug overlay showing the applied progress.
pub mod markers;

/// Progress math and the scrubbed scroll tracker resource.
pub mod progress;

/// Mapping from progress to scene pose and the system applying it.
pub mod timeline;
