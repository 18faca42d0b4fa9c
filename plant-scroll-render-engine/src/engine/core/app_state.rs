use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the scene config to load or fail.
    #[default]
    Loading,
    /// Scene spawned, waiting for the model and its animation clip.
    ModelLoading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

pub fn transition_to_model_loading(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.config_resolved {
        info!("→ Transitioning to ModelLoading state");
        next_state.set(AppState::ModelLoading);
    }
}

// A failed model still reaches Running with whatever could be shown.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.model_resolved() {
        info!("→ Model resolved, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
