use crate::engine::assets::scene_config::{BloomConfig, SceneConfig};
use crate::engine::scene::lighting::SceneLight;
use bevy::prelude::*;
use constants::render_settings::{
    BLOOM_RADIUS_RANGE, BLOOM_STEP, BLOOM_STRENGTH_RANGE, BLOOM_THRESHOLD_RANGE,
};

/// Live-tunable look of the scene: light colours and bloom.
///
/// Seeded from the scene config, then edited by the keyboard and RPC controls.
/// Systems that style the scene react to change detection on this resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DebugSettings {
    pub top_color: u32,
    pub inset_color: u32,
    pub bottom_color: u32,
    pub bloom: BloomConfig,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

impl DebugSettings {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            top_color: config.lights.top.color,
            inset_color: config.lights.inset.color,
            bottom_color: config.lights.bottom.color,
            bloom: config.bloom,
        }
    }

    pub fn light_color(&self, light: SceneLight) -> u32 {
        match light {
            SceneLight::Top => self.top_color,
            SceneLight::Inset => self.inset_color,
            SceneLight::Bottom => self.bottom_color,
        }
    }

    pub fn set_light_color(&mut self, light: SceneLight, color: u32) {
        let color = color & 0xffffff;
        match light {
            SceneLight::Top => self.top_color = color,
            SceneLight::Inset => self.inset_color = color,
            SceneLight::Bottom => self.bottom_color = color,
        }
    }

    pub fn set_bloom_strength(&mut self, strength: f32) {
        self.bloom.strength = snap_to_control(strength, BLOOM_STRENGTH_RANGE);
    }

    pub fn set_bloom_radius(&mut self, radius: f32) {
        self.bloom.radius = snap_to_control(radius, BLOOM_RADIUS_RANGE);
    }

    pub fn set_bloom_threshold(&mut self, threshold: f32) {
        self.bloom.threshold = snap_to_control(threshold, BLOOM_THRESHOLD_RANGE);
    }
}

/// Round to the slider step and keep inside the slider range.
/// Non-finite input lands on the lower bound.
pub fn snap_to_control(value: f32, (min, max): (f32, f32)) -> f32 {
    if !value.is_finite() {
        return min;
    }
    let stepped = (value / BLOOM_STEP).round() * BLOOM_STEP;
    stepped.clamp(min, max)
}
