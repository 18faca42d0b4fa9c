//! Post-processing setup for the scene camera.
//!
//! The engine owns the passes themselves; these modules decide which of them
//! the camera carries.

/// GPU capability detection and the anti-aliasing strategy derived from it.
///
/// Chooses between a multisampled HDR target and a plain target with an SMAA pass.
pub mod capabilities;

/// Bloom component driven by the debug controls.
pub mod post_processing;
