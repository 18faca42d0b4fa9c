//! Viewport tracking for the primary window.
//!
//! The capped pixel ratio only steers the anti-aliasing choice. The surface
//! itself keeps the window's physical size, so dense displays still render at
//! full device resolution; bevy offers no render-scale knob short of an
//! offscreen target.

use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::camera::scene_camera::SceneCamera;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::MAX_PIXEL_RATIO;

/// Logical size of the primary window and its pixel ratio, capped for the
/// anti-aliasing choice.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            pixel_ratio: 1.0,
        }
    }
}

impl ViewportSize {
    pub fn from_window(window: &Window, max_pixel_ratio: f32) -> Self {
        Self {
            width: window.width(),
            height: window.height(),
            pixel_ratio: clamp_pixel_ratio(window.scale_factor(), max_pixel_ratio),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

pub fn clamp_pixel_ratio(device_pixel_ratio: f32, max_pixel_ratio: f32) -> f32 {
    device_pixel_ratio.min(max_pixel_ratio)
}

/// Keep the viewport resource and camera aspect in step with the primary window.
pub fn sync_viewport_size(
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Option<Res<SceneConfig>>,
    mut viewport: ResMut<ViewportSize>,
    mut projections: Query<&mut Projection, With<SceneCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let max_pixel_ratio = config.map_or(MAX_PIXEL_RATIO, |config| config.renderer.max_pixel_ratio);
    let size = ViewportSize::from_window(window, max_pixel_ratio);
    if !viewport.set_if_neq(size) {
        return;
    }

    debug!(
        "Viewport resized to {}x{} at pixel ratio {}",
        size.width, size.height, size.pixel_ratio
    );

    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.aspect_ratio = size.aspect_ratio();
        }
    }
}
