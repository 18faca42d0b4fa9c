use bevy::prelude::*;

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub config_resolved: bool,
    pub scene_loaded: bool,
    pub scene_failed: bool,
    pub clip_loaded: bool,
    pub clip_failed: bool,
}

impl LoadingProgress {
    /// Both the scene and its clip have either loaded or failed.
    pub fn model_resolved(&self) -> bool {
        (self.scene_loaded || self.scene_failed) && (self.clip_loaded || self.clip_failed)
    }
}
