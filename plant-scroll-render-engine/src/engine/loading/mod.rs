//! Asset loading systems for the scene configuration and the plant model.
//!
//! Manages the two-stage loading pipeline from config resolution through
//! model and animation loading, with progress tracking for state transitions.

/// Scene configuration loading with fallback to compiled-in defaults.
pub mod config_loader;

/// glTF scene and animation clip loading, failure reporting and animation binding.
pub mod model_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
