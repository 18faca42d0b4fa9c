use crate::engine::camera::scene_camera::SceneCamera;
use crate::engine::systems::resize::ViewportSize;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::core_pipeline::smaa::{Smaa, SmaaPreset};
use bevy::prelude::*;
use bevy::render::renderer::{RenderAdapter, RenderAdapterInfo};
use bevy::render::view::{Msaa, ViewTarget};
use constants::render_settings::MSAA_SAMPLES;
use serde::Serialize;

/// GPU features that steer the post-processing setup.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct GpuCapabilities {
    /// The HDR view format can be rendered with MSAA.
    pub multisample_targets: bool,
    pub backend: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTargetStrategy {
    Multisampled,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AntiAliasingPlan {
    pub target: RenderTargetStrategy,
    pub smaa: bool,
}

impl AntiAliasingPlan {
    pub fn msaa(&self) -> Msaa {
        match self.target {
            RenderTargetStrategy::Multisampled => Msaa::Sample4,
            RenderTargetStrategy::Plain => Msaa::Off,
        }
    }

    pub fn describe(&self) -> &'static str {
        match (self.target, self.smaa) {
            (RenderTargetStrategy::Multisampled, _) => "multisampled render target",
            (RenderTargetStrategy::Plain, true) => "plain render target with SMAA",
            (RenderTargetStrategy::Plain, false) => "plain render target",
        }
    }
}

/// Plan currently applied to the scene camera.
#[derive(Resource, Debug, Default)]
pub struct ActiveAntiAliasing(pub Option<AntiAliasingPlan>);

/// Multisample at native density when the GPU allows it, otherwise fall back
/// to SMAA. Dense displays get neither.
pub fn select_anti_aliasing(pixel_ratio: f32, capabilities: &GpuCapabilities) -> AntiAliasingPlan {
    let native_density = (pixel_ratio - 1.0).abs() < f32::EPSILON;

    if native_density && capabilities.multisample_targets {
        AntiAliasingPlan {
            target: RenderTargetStrategy::Multisampled,
            smaa: false,
        }
    } else {
        AntiAliasingPlan {
            target: RenderTargetStrategy::Plain,
            smaa: native_density,
        }
    }
}

pub fn detect_gpu_capabilities(
    mut commands: Commands,
    adapter: Option<Res<RenderAdapter>>,
    adapter_info: Option<Res<RenderAdapterInfo>>,
) {
    let backend = adapter_info
        .map(|info| format!("{:?}", info.backend))
        .unwrap_or_else(|| "unknown".to_string());

    let multisample_targets = match adapter {
        Some(adapter) => adapter
            .get_texture_format_features(ViewTarget::TEXTURE_FORMAT_HDR)
            .flags
            .sample_count_supported(MSAA_SAMPLES),
        None => {
            warn!("No render adapter available, assuming no multisampled targets");
            false
        }
    };

    info!(
        "GPU backend {}: multisampled HDR targets {}",
        backend,
        if multisample_targets {
            "supported"
        } else {
            "unsupported"
        }
    );

    commands.insert_resource(GpuCapabilities {
        multisample_targets,
        backend,
    });
}

/// Apply the anti-aliasing plan to the scene camera whenever its inputs change.
pub fn configure_anti_aliasing(
    mut commands: Commands,
    viewport: Res<ViewportSize>,
    capabilities: Option<Res<GpuCapabilities>>,
    mut active: ResMut<ActiveAntiAliasing>,
    cameras: Query<Entity, With<SceneCamera>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(capabilities) = capabilities else {
        return;
    };
    let Ok(camera) = cameras.single() else {
        return;
    };

    let plan = select_anti_aliasing(viewport.pixel_ratio, &capabilities);
    if active.0 == Some(plan) {
        return;
    }

    let mut camera_commands = commands.entity(camera);
    camera_commands.insert(plan.msaa());
    if plan.smaa {
        camera_commands.insert(Smaa {
            preset: SmaaPreset::High,
        });
    } else {
        camera_commands.remove::<Smaa>();
    }

    info!("Using {}", plan.describe());
    rpc_interface.send_notification(
        "render_strategy",
        serde_json::json!({
            "target": plan.target,
            "smaa": plan.smaa,
            "backend": capabilities.backend,
        }),
    );
    active.0 = Some(plan);
}
