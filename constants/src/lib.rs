//! Shared defaults for the plant scroll scene.
//!
//! Every value here is the baseline the engine falls back to when
//! `plants.config.json` is missing or leaves a field out.

pub mod camera;
pub mod lighting;
pub mod path;
pub mod render_settings;
pub mod scroll;
