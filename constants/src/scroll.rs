use std::f32::consts::PI;

/// Flower yaw at full progress.
pub const FLOWER_TURN: f32 = PI * 0.7;

/// Plants group pitch at full progress.
pub const GROUP_TILT: f32 = PI * 0.15;

/// Fraction of the clip covered by the scroll range, played backwards.
pub const ANIMATION_SPAN: f32 = 0.5;

/// Seconds the scrubbed progress takes to catch up with the page.
pub const SCRUB_SECONDS: f32 = 0.1;

/// Decimal places kept on progress before it is applied.
pub const PRECISION: u32 = 3;

pub const MARKERS: bool = true;

/// Height of the virtual page on native builds, in viewports.
pub const PAGE_VIEWPORTS: f32 = 3.0;

/// Pixels scrolled per wheel line on native builds.
pub const LINE_HEIGHT_PX: f32 = 40.0;
