//! Fixed perspective camera for the plant scene.
//!
//! Provides the HDR scene camera with tone mapping and exposure taken from
//! the scene configuration. Post-processing components are attached to it
//! by the render systems.

/// Scene camera marker, spawn system and exposure conversion.
pub mod scene_camera;
