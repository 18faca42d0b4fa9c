/// Linear exposure multiplier applied before tone mapping.
pub const TONE_MAPPING_EXPOSURE: f32 = 1.5;

/// Device pixel ratio is never rendered above this.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Sample count used when multisampled targets are available.
pub const MSAA_SAMPLES: u32 = 4;

pub const BLOOM_ENABLED: bool = false;
pub const BLOOM_STRENGTH: f32 = 2.0;
pub const BLOOM_RADIUS: f32 = 1.0;
pub const BLOOM_THRESHOLD: f32 = 0.0;

/// Debug control ranges, as `(min, max)`.
pub const BLOOM_STRENGTH_RANGE: (f32, f32) = (0.0, 2.0);
pub const BLOOM_RADIUS_RANGE: (f32, f32) = (0.0, 2.0);
pub const BLOOM_THRESHOLD_RANGE: (f32, f32) = (0.0, 1.0);
pub const BLOOM_STEP: f32 = 0.001;

/// Bloom intensity produced by a strength of 1.0.
pub const BLOOM_INTENSITY_PER_STRENGTH: f32 = 0.15;

pub const LOG_FILTER: &str = "wgpu=error,naga=warn";

/// Seconds between FPS notifications sent to the host page.
pub const FPS_NOTIFY_INTERVAL: f32 = 0.5;
