/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 45.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

pub const POSITION: [f32; 3] = [0.0, 2.0, 6.0];
pub const LOOK_AT: [f32; 3] = [0.0, 0.0, 0.0];
