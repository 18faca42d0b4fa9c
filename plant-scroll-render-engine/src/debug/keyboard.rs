use crate::debug::settings::DebugSettings;
use bevy::prelude::*;

const STRENGTH_STEP: f32 = 0.1;
const RADIUS_STEP: f32 = 0.1;
const THRESHOLD_STEP: f32 = 0.05;

/// Keyboard stand-in for the bloom panel.
///
/// B toggles bloom, Up/Down adjust strength, Right/Left adjust radius and
/// PageUp/PageDown adjust threshold. Settings are only touched on a key press
/// so change detection stays quiet otherwise.
pub fn debug_keyboard_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_settings: ResMut<DebugSettings>,
) {
    let pressed = |up: KeyCode, down: KeyCode| -> f32 {
        let mut delta = 0.0;
        if keyboard.just_pressed(up) {
            delta += 1.0;
        }
        if keyboard.just_pressed(down) {
            delta -= 1.0;
        }
        delta
    };

    let toggle = keyboard.just_pressed(KeyCode::KeyB);
    let strength = pressed(KeyCode::ArrowUp, KeyCode::ArrowDown);
    let radius = pressed(KeyCode::ArrowRight, KeyCode::ArrowLeft);
    let threshold = pressed(KeyCode::PageUp, KeyCode::PageDown);

    if !toggle && strength == 0.0 && radius == 0.0 && threshold == 0.0 {
        return;
    }

    let settings = debug_settings.as_mut();
    if toggle {
        settings.bloom.enabled = !settings.bloom.enabled;
        info!(
            "Bloom {}",
            if settings.bloom.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
    }
    if strength != 0.0 {
        let value = settings.bloom.strength + strength * STRENGTH_STEP;
        settings.set_bloom_strength(value);
        info!("Bloom strength: {:.3}", settings.bloom.strength);
    }
    if radius != 0.0 {
        let value = settings.bloom.radius + radius * RADIUS_STEP;
        settings.set_bloom_radius(value);
        info!("Bloom radius: {:.3}", settings.bloom.radius);
    }
    if threshold != 0.0 {
        let value = settings.bloom.threshold + threshold * THRESHOLD_STEP;
        settings.set_bloom_threshold(value);
        info!("Bloom threshold: {:.3}", settings.bloom.threshold);
    }
}
