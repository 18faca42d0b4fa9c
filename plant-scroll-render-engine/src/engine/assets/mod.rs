//! Scene configuration assets.
//!
//! Handles the JSON scene configuration and the packed colour values it
//! shares with the debug controls.

/// Packed `0xrrggbb` colour parsing and conversion to engine colours.
pub mod color;

/// Scene configuration asset with compiled-in defaults and validation.
pub mod scene_config;
