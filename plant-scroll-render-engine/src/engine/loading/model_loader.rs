use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scroll::progress::ScrollTracker;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::animation::graph::AnimationNodeIndex;
use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

/// Handles for the plant glTF scene and its first animation clip.
#[derive(Resource)]
pub struct PlantModel {
    pub scene: Handle<Scene>,
    pub clip: Handle<AnimationClip>,
}

/// Animation graph driving the plant, plus the clip duration once it is known.
#[derive(Resource)]
pub struct PlantAnimation {
    pub graph: Handle<AnimationGraph>,
    pub node: AnimationNodeIndex,
    pub duration: Option<f32>,
}

pub fn start_model_loading(
    mut commands: Commands,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
) {
    let path = config.model.path.clone();
    info!("Loading plant model from {}", path);

    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
    let clip = asset_server.load(GltfAssetLabel::Animation(0).from_asset(path));
    let (graph, node) = AnimationGraph::from_clip(clip.clone());

    commands.insert_resource(PlantAnimation {
        graph: graphs.add(graph),
        node,
        duration: None,
    });
    commands.insert_resource(PlantModel { scene, clip });
}

/// Track scene and clip load states, reporting failures instead of stalling.
pub fn check_model_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    model: Res<PlantModel>,
    mut animation: ResMut<PlantAnimation>,
    mut scroll_tracker: ResMut<ScrollTracker>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    asset_server: Res<AssetServer>,
    clips: Res<Assets<AnimationClip>>,
) {
    if !loading_progress.scene_loaded && !loading_progress.scene_failed {
        match asset_server.load_state(&model.scene) {
            LoadState::Loaded => {
                info!("✓ Plant scene loaded");
                loading_progress.scene_loaded = true;
                rpc_interface.send_notification("model_loaded", serde_json::json!({}));
            }
            LoadState::Failed(error) => {
                report_load_failure("scene", &error.to_string(), &mut rpc_interface);
                loading_progress.scene_failed = true;
            }
            _ => {}
        }
    }

    if !loading_progress.clip_loaded && !loading_progress.clip_failed {
        if let Some(clip) = clips.get(&model.clip) {
            let duration = clip.duration();
            info!("✓ Plant animation loaded ({:.2}s)", duration);
            animation.duration = Some(duration);
            loading_progress.clip_loaded = true;
            scroll_tracker.invalidate();
        } else if let LoadState::Failed(error) = asset_server.load_state(&model.clip) {
            report_load_failure("animation", &error.to_string(), &mut rpc_interface);
            warn!("Plant model has no usable animation, scroll only rotates it");
            loading_progress.clip_failed = true;
        }
    }
}

fn report_load_failure(part: &str, message: &str, rpc_interface: &mut WebRpcInterface) {
    error!("Failed to load plant {}: {}", part, message);

    let draco = mentions_draco(message);
    if draco {
        error!(
            "The model uses Draco mesh compression, which the glTF loader cannot decode. \
             Re-export it without KHR_draco_mesh_compression."
        );
    }

    rpc_interface.send_notification(
        "model_load_failed",
        serde_json::json!({
            "part": part,
            "message": message,
            "draco": draco,
        }),
    );
}

pub fn mentions_draco(message: &str) -> bool {
    message.to_ascii_lowercase().contains("draco")
}

/// Attach the plant graph to the scene's animation player as soon as the
/// scene spawns it. The clip stays paused; scroll drives its time.
pub fn bind_animation_player(
    mut commands: Commands,
    animation: Option<Res<PlantAnimation>>,
    mut players: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
    mut scroll_tracker: ResMut<ScrollTracker>,
) {
    let Some(animation) = animation else {
        return;
    };

    for (entity, mut player) in &mut players {
        player.play(animation.node).pause();
        commands
            .entity(entity)
            .insert(AnimationGraphHandle(animation.graph.clone()));

        info!("Bound plant animation to player {:?}", entity);
        scroll_tracker.invalidate();
    }
}
