use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::LOG_FILTER;
// Crate engine modules
use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::camera::scene_camera::spawn_scene_camera;
use crate::engine::core::app_state::{AppState, transition_to_model_loading, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{ConfigLoader, resolve_scene_config, start_loading};
use crate::engine::loading::model_loader::{
    bind_animation_player, check_model_loading, start_model_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::render::capabilities::{
    ActiveAntiAliasing, configure_anti_aliasing, detect_gpu_capabilities,
};
use crate::engine::render::post_processing::apply_bloom_settings;
use crate::engine::scene::lighting::{apply_light_colors, spawn_lighting};
use crate::engine::scene::plants::spawn_plants;
use crate::engine::scroll::input::{VirtualPage, read_page_scroll};
use crate::engine::scroll::progress::{ScrollTracker, scrub_scroll_progress};
use crate::engine::scroll::timeline::apply_scroll_timeline;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::resize::{ViewportSize, sync_viewport_size};
// Debug controls and Web RPC
use crate::debug::keyboard::debug_keyboard_system;
use crate::debug::settings::DebugSettings;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(target_arch = "wasm32")]
use crate::engine::scroll::input::setup_page_scroll_listener;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::scroll::input::read_wheel_scroll;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::scroll::markers::{ScrollMarkerText, update_scroll_marker_text};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SceneConfig as a loadable asset type from *.config.json files.
        .add_plugins(JsonAssetPlugin::<SceneConfig>::new(&["config.json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<ViewportSize>()
        .init_resource::<ScrollTracker>()
        .init_resource::<VirtualPage>()
        .init_resource::<DebugSettings>()
        .init_resource::<ActiveAntiAliasing>();

    app.add_systems(Startup, (setup, start_loading, detect_gpu_capabilities));

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(Startup, setup_page_scroll_listener);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, create_native_overlays);
    }

    // State-based system scheduling
    app.add_systems(
        Update,
        (resolve_scene_config, transition_to_model_loading)
            .chain()
            .run_if(in_state(AppState::Loading)),
    )
    .add_systems(
        OnEnter(AppState::ModelLoading),
        (
            start_model_loading,
            spawn_plants,
            spawn_lighting,
            spawn_scene_camera,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (check_model_loading, transition_to_running)
            .chain()
            .run_if(in_state(AppState::ModelLoading)),
    );

    // Systems that keep the scene styled in every state.
    app.add_systems(
        Update,
        (
            (sync_viewport_size, configure_anti_aliasing).chain(),
            bind_animation_player,
            apply_light_colors,
            apply_bloom_settings,
            fps_notification_system,
        ),
    );

    // Scroll input feeds the tracker before the timeline reads it.
    #[cfg(target_arch = "wasm32")]
    let scroll_systems = (
        read_page_scroll,
        scrub_scroll_progress,
        apply_scroll_timeline,
    )
        .chain();

    #[cfg(not(target_arch = "wasm32"))]
    let scroll_systems = (
        read_page_scroll,
        read_wheel_scroll,
        scrub_scroll_progress,
        apply_scroll_timeline,
    )
        .chain();

    app.add_systems(
        Update,
        (scroll_systems, debug_keyboard_system).run_if(in_state(AppState::Running)),
    );

    // Overlay text only exists on native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, (fps_text_update_system, update_scroll_marker_text));
    }

    app
}

// Startup system that only handles basic initialisation
fn setup() {
    info!(
        "Plant scroll render engine v{} starting",
        env!("CARGO_PKG_VERSION")
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));

            parent.spawn((
                Text::new("scroll: -"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                ScrollMarkerText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        level: Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
