use crate::debug::settings::DebugSettings;
use crate::engine::assets::color::color_from_hex;
use crate::engine::assets::scene_config::{PointLightConfig, SceneConfig};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneLight {
    /// Coloured point light above the flower.
    Top,
    /// Faint point light inside the flower.
    Inset,
    /// Directional light shining up from below.
    Bottom,
}

impl SceneLight {
    pub const ALL: [SceneLight; 3] = [SceneLight::Top, SceneLight::Inset, SceneLight::Bottom];

    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" => Some(Self::Top),
            "inset" => Some(Self::Inset),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Inset => "inset",
            Self::Bottom => "bottom",
        }
    }
}

/// Point lights are configured in candela; Bevy takes luminous power.
pub fn candela_to_lumens(candela: f32) -> f32 {
    candela * 4.0 * PI
}

fn point_light(config: &PointLightConfig, shadows_enabled: bool) -> PointLight {
    PointLight {
        color: color_from_hex(config.color),
        intensity: candela_to_lumens(config.intensity),
        range: config.range,
        shadows_enabled,
        ..default()
    }
}

pub fn spawn_lighting(mut commands: Commands, config: Res<SceneConfig>) {
    let lights = &config.lights;
    let shadows_enabled = config.renderer.shadows;

    if lights.top.decay != 2.0 || lights.inset.decay != 2.0 {
        debug!(
            "Point light decay exponents ({}, {}) fall back to inverse-square falloff",
            lights.top.decay, lights.inset.decay
        );
    }

    commands.spawn((
        Name::new("top light"),
        point_light(&lights.top, shadows_enabled),
        Transform::from_xyz(0.0, lights.top.height, 0.0),
        SceneLight::Top,
    ));

    commands.spawn((
        Name::new("inset light"),
        point_light(&lights.inset, shadows_enabled),
        Transform::from_xyz(0.0, lights.inset.height, 0.0),
        SceneLight::Inset,
    ));

    // Aimed at the origin from below, so the light travels up +Y.
    commands.spawn((
        Name::new("bottom light"),
        DirectionalLight {
            color: color_from_hex(lights.bottom.color),
            illuminance: lights.bottom.illuminance,
            shadows_enabled,
            ..default()
        },
        Transform::from_xyz(0.0, lights.bottom.height, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        SceneLight::Bottom,
    ));
}

/// Keep light colours in step with the debug settings.
pub fn apply_light_colors(
    debug_settings: Res<DebugSettings>,
    added: Query<(), Added<SceneLight>>,
    mut point_lights: Query<(&SceneLight, &mut PointLight)>,
    mut directional_lights: Query<(&SceneLight, &mut DirectionalLight)>,
) {
    if !debug_settings.is_changed() && added.is_empty() {
        return;
    }

    for (slot, mut light) in &mut point_lights {
        light.color = color_from_hex(debug_settings.light_color(*slot));
    }

    for (slot, mut light) in &mut directional_lights {
        light.color = color_from_hex(debug_settings.light_color(*slot));
    }
}
