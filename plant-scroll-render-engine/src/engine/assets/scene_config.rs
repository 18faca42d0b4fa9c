use crate::engine::assets::color::deserialize_optional_color;
use bevy::prelude::*;
use constants::{camera, lighting, path, render_settings, scroll};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Runtime scene configuration as a Bevy asset. Any field missing from the
/// JSON file keeps its compiled-in default.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub model: ModelConfig,
    pub lights: LightsConfig,
    pub camera: CameraConfig,
    pub renderer: RendererConfig,
    pub bloom: BloomConfig,
    pub scroll: ScrollConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
    pub flower_offset_y: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: path::MODEL_PATH.to_string(),
            flower_offset_y: lighting::FLOWER_OFFSET_Y,
        }
    }
}

/// Point light in physically based units (candela).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointLightConfig {
    pub color: u32,
    pub intensity: f32,
    pub range: f32,
    /// Falloff exponent. Bevy only supports inverse-square falloff, so this
    /// is informational beyond `range`.
    pub decay: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionalLightConfig {
    pub color: u32,
    /// Lux.
    pub illuminance: f32,
    pub height: f32,
}

/// Lights are patched field by field, so each light keeps its own defaults
/// for anything the file leaves out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightsConfig {
    pub top: PointLightConfig,
    pub inset: PointLightConfig,
    pub bottom: DirectionalLightConfig,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            top: PointLightConfig {
                color: lighting::TOP_COLOR,
                intensity: lighting::TOP_INTENSITY,
                range: lighting::TOP_RANGE,
                decay: lighting::TOP_DECAY,
                height: lighting::TOP_HEIGHT,
            },
            inset: PointLightConfig {
                color: lighting::INSET_COLOR,
                intensity: lighting::INSET_INTENSITY,
                range: lighting::INSET_RANGE,
                decay: lighting::INSET_DECAY,
                height: lighting::INSET_HEIGHT,
            },
            bottom: DirectionalLightConfig {
                color: lighting::BOTTOM_COLOR,
                illuminance: lighting::BOTTOM_ILLUMINANCE,
                height: lighting::BOTTOM_HEIGHT,
            },
        }
    }
}

#[derive(Deserialize, Default)]
struct PointLightPatch {
    #[serde(default, deserialize_with = "deserialize_optional_color")]
    color: Option<u32>,
    intensity: Option<f32>,
    range: Option<f32>,
    decay: Option<f32>,
    height: Option<f32>,
}

impl PointLightPatch {
    fn apply(self, base: PointLightConfig) -> PointLightConfig {
        PointLightConfig {
            color: self.color.unwrap_or(base.color),
            intensity: self.intensity.unwrap_or(base.intensity),
            range: self.range.unwrap_or(base.range),
            decay: self.decay.unwrap_or(base.decay),
            height: self.height.unwrap_or(base.height),
        }
    }
}

#[derive(Deserialize, Default)]
struct DirectionalLightPatch {
    #[serde(default, deserialize_with = "deserialize_optional_color")]
    color: Option<u32>,
    illuminance: Option<f32>,
    height: Option<f32>,
}

impl DirectionalLightPatch {
    fn apply(self, base: DirectionalLightConfig) -> DirectionalLightConfig {
        DirectionalLightConfig {
            color: self.color.unwrap_or(base.color),
            illuminance: self.illuminance.unwrap_or(base.illuminance),
            height: self.height.unwrap_or(base.height),
        }
    }
}

impl<'de> Deserialize<'de> for LightsConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct LightsPatch {
            top: PointLightPatch,
            inset: PointLightPatch,
            bottom: DirectionalLightPatch,
        }

        let patch = LightsPatch::deserialize(deserializer)?;
        let defaults = LightsConfig::default();
        Ok(Self {
            top: patch.top.apply(defaults.top),
            inset: patch.inset.apply(defaults.inset),
            bottom: patch.bottom.apply(defaults.bottom),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: camera::FOV_DEGREES,
            near: camera::NEAR,
            far: camera::FAR,
            position: camera::POSITION,
            look_at: camera::LOOK_AT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Linear multiplier, converted to EV100 on the camera.
    pub exposure: f32,
    pub max_pixel_ratio: f32,
    /// Whether the scene lights cast shadows.
    pub shadows: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            exposure: render_settings::TONE_MAPPING_EXPOSURE,
            max_pixel_ratio: render_settings::MAX_PIXEL_RATIO,
            shadows: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    pub enabled: bool,
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            enabled: render_settings::BLOOM_ENABLED,
            strength: render_settings::BLOOM_STRENGTH,
            radius: render_settings::BLOOM_RADIUS,
            threshold: render_settings::BLOOM_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Flower yaw in radians at full progress.
    pub flower_turn: f32,
    /// Plants group pitch in radians at full progress.
    pub group_tilt: f32,
    pub animation_span: f32,
    pub scrub_seconds: f32,
    pub precision: u32,
    pub markers: bool,
    pub page_viewports: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            flower_turn: scroll::FLOWER_TURN,
            group_tilt: scroll::GROUP_TILT,
            animation_span: scroll::ANIMATION_SPAN,
            scrub_seconds: scroll::SCRUB_SECONDS,
            precision: scroll::PRECISION,
            markers: scroll::MARKERS,
            page_viewports: scroll::PAGE_VIEWPORTS,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("model path is empty")]
    EmptyModelPath,
    #[error("camera field of view must lie in (0, 180) degrees, got {0}")]
    FieldOfView(f32),
    #[error("camera clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    ClipPlanes { near: f32, far: f32 },
    #[error("{light} light {field} must be non-negative, got {value}")]
    NegativeLight {
        light: &'static str,
        field: &'static str,
        value: f32,
    },
    #[error("tone mapping exposure must be positive, got {0}")]
    Exposure(f32),
    #[error("max pixel ratio must be at least 1, got {0}")]
    PixelRatio(f32),
    #[error("bloom {field} {value} is outside [{min}, {max}]")]
    BloomRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("scroll scrub must be non-negative, got {0}")]
    Scrub(f32),
    #[error("scroll precision must be at most 6 decimals, got {0}")]
    Precision(u32),
    #[error("native scroll page must span at least one viewport, got {0}")]
    PageViewports(f32),
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.path.trim().is_empty() {
            return Err(ConfigError::EmptyModelPath);
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(camera.fov_degrees));
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return Err(ConfigError::ClipPlanes {
                near: camera.near,
                far: camera.far,
            });
        }

        for (light, config) in [("top", &self.lights.top), ("inset", &self.lights.inset)] {
            check_non_negative(light, "intensity", config.intensity)?;
            check_non_negative(light, "range", config.range)?;
            check_non_negative(light, "decay", config.decay)?;
        }
        check_non_negative("bottom", "illuminance", self.lights.bottom.illuminance)?;

        if !(self.renderer.exposure > 0.0) {
            return Err(ConfigError::Exposure(self.renderer.exposure));
        }
        if !(self.renderer.max_pixel_ratio >= 1.0) {
            return Err(ConfigError::PixelRatio(self.renderer.max_pixel_ratio));
        }

        check_range(
            "strength",
            self.bloom.strength,
            render_settings::BLOOM_STRENGTH_RANGE,
        )?;
        check_range("radius", self.bloom.radius, render_settings::BLOOM_RADIUS_RANGE)?;
        check_range(
            "threshold",
            self.bloom.threshold,
            render_settings::BLOOM_THRESHOLD_RANGE,
        )?;

        if !(self.scroll.scrub_seconds >= 0.0) {
            return Err(ConfigError::Scrub(self.scroll.scrub_seconds));
        }
        if self.scroll.precision > 6 {
            return Err(ConfigError::Precision(self.scroll.precision));
        }
        if !(self.scroll.page_viewports >= 1.0) {
            return Err(ConfigError::PageViewports(self.scroll.page_viewports));
        }

        Ok(())
    }
}

fn check_non_negative(light: &'static str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeLight { light, field, value })
    }
}

fn check_range(field: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::BloomRange {
            field,
            value,
            min,
            max,
        })
    }
}
