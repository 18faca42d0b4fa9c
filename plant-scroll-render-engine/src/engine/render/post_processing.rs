use crate::debug::settings::DebugSettings;
use crate::engine::assets::scene_config::BloomConfig;
use crate::engine::camera::scene_camera::SceneCamera;
use bevy::core_pipeline::bloom::{Bloom, BloomPrefilter};
use bevy::prelude::*;
use constants::render_settings::BLOOM_INTENSITY_PER_STRENGTH;

/// Map the bloom controls onto the engine's bloom component.
///
/// `strength` scales the composite intensity. `radius` raises
/// `high_pass_frequency`, keeping more of the wide low-frequency mips in the
/// composite so the glow spreads further. `threshold` gates which luminance
/// blooms.
pub fn bloom_from_settings(bloom: &BloomConfig) -> Option<Bloom> {
    if !bloom.enabled {
        return None;
    }

    Some(Bloom {
        intensity: bloom.strength * BLOOM_INTENSITY_PER_STRENGTH,
        high_pass_frequency: (bloom.radius * 0.5).clamp(0.0, 1.0),
        prefilter: BloomPrefilter {
            threshold: bloom.threshold,
            threshold_softness: 0.0,
        },
        ..Bloom::NATURAL
    })
}

pub fn apply_bloom_settings(
    mut commands: Commands,
    debug_settings: Res<DebugSettings>,
    cameras: Query<Entity, With<SceneCamera>>,
    added_cameras: Query<(), Added<SceneCamera>>,
) {
    if !debug_settings.is_changed() && added_cameras.is_empty() {
        return;
    }

    for camera in &cameras {
        match bloom_from_settings(&debug_settings.bloom) {
            Some(bloom) => {
                commands.entity(camera).insert(bloom);
            }
            None => {
                commands.entity(camera).remove::<Bloom>();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(strength: f32, radius: f32, threshold: f32) -> BloomConfig {
        BloomConfig {
            enabled: true,
            strength,
            radius,
            threshold,
        }
    }

    #[test]
    fn disabled_bloom_has_no_component() {
        assert!(bloom_from_settings(&BloomConfig::default()).is_none());
    }

    #[test]
    fn controls_map_onto_bloom() {
        let Some(bloom) = bloom_from_settings(&enabled(2.0, 1.0, 0.25)) else {
            panic!("bloom expected");
        };
        assert!((bloom.intensity - 0.3).abs() < 1e-6);
        assert_eq!(bloom.high_pass_frequency, 0.5);
        assert_eq!(bloom.prefilter.threshold, 0.25);
    }

    #[test]
    fn larger_radius_raises_high_pass_frequency() {
        let frequency = |radius| {
            bloom_from_settings(&enabled(1.0, radius, 0.0))
                .map(|bloom| bloom.high_pass_frequency)
        };
        assert!(frequency(0.2) < frequency(0.8));
        assert_eq!(frequency(0.0), Some(0.0));
    }

    #[test]
    fn wide_radius_is_clamped() {
        let Some(bloom) = bloom_from_settings(&enabled(1.0, 2.0, 0.0)) else {
            panic!("bloom expected");
        };
        assert_eq!(bloom.high_pass_frequency, 1.0);
    }

    #[test]
    fn toggling_bloom_updates_camera() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<DebugSettings>()
            .add_systems(Update, apply_bloom_settings);
        let camera = app.world_mut().spawn(SceneCamera).id();

        app.update();
        assert!(app.world().get::<Bloom>(camera).is_none());

        app.world_mut()
            .resource_mut::<DebugSettings>()
            .bloom
            .enabled = true;
        app.update();
        assert!(app.world().get::<Bloom>(camera).is_some());

        app.world_mut()
            .resource_mut::<DebugSettings>()
            .bloom
            .enabled = false;
        app.update();
        assert!(app.world().get::<Bloom>(camera).is_none());
    }
}
