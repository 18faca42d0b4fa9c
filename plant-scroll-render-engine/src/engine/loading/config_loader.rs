use crate::debug::settings::DebugSettings;
use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::loading::progress::LoadingProgress;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::SCENE_CONFIG_PATH;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<SceneConfig>>,
}

// Start the loading process
pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene config from {}", SCENE_CONFIG_PATH);
    config_loader.handle = Some(asset_server.load(SCENE_CONFIG_PATH));
}

/// Settle on a configuration once the JSON file has loaded or failed.
/// An unreadable or invalid file falls back to defaults rather than stopping the scene.
pub fn resolve_scene_config(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<SceneConfig>>,
) {
    if loading_progress.config_resolved {
        return;
    }

    let Some(ref handle) = config_loader.handle else {
        return;
    };

    let config = if let Some(config) = configs.get(handle) {
        match config.validate() {
            Ok(()) => {
                info!("✓ Scene config loaded");
                config.clone()
            }
            Err(error) => {
                warn!("Ignoring {}: {}", SCENE_CONFIG_PATH, error);
                SceneConfig::default()
            }
        }
    } else if let LoadState::Failed(error) = asset_server.load_state(handle) {
        warn!("Scene config unavailable, using defaults: {}", error);
        SceneConfig::default()
    } else {
        return;
    };

    commands.insert_resource(DebugSettings::from_config(&config));
    commands.insert_resource(config);
    loading_progress.config_resolved = true;
}
