//! Light defaults. Point intensities are in candela, directional in lux.

pub const TOP_COLOR: u32 = 0xff0000;
pub const TOP_INTENSITY: f32 = 1.0;
pub const TOP_RANGE: f32 = 6.0;
pub const TOP_DECAY: f32 = 2.6;
pub const TOP_HEIGHT: f32 = 0.7;

pub const INSET_COLOR: u32 = 0xffffff;
pub const INSET_INTENSITY: f32 = 0.01;
pub const INSET_RANGE: f32 = 1.0;
pub const INSET_DECAY: f32 = 10.0;
pub const INSET_HEIGHT: f32 = 0.0;

pub const BOTTOM_COLOR: u32 = 0x750238;
pub const BOTTOM_ILLUMINANCE: f32 = 0.9;
pub const BOTTOM_HEIGHT: f32 = -2.0;

/// Vertical offset applied to the flower node once the model is in.
pub const FLOWER_OFFSET_Y: f32 = -1.0;
