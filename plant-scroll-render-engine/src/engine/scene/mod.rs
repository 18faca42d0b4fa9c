//! Scene content: the plant hierarchy and its three lights.
//!
//! Spawns the plants group with the glTF flower beneath it and keeps the
//! light colours in step with the debug controls.

/// Top, inset and bottom lights with colour updates from debug settings.
pub mod lighting;

/// Plants group and flower scene root driven by the scroll timeline.
pub mod plants;
