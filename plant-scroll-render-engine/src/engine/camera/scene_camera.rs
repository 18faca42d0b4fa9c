use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::systems::resize::ViewportSize;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::ShadowFilteringMethod;
use bevy::prelude::*;
use bevy::render::camera::Exposure;
use bevy::render::view::Msaa;

#[derive(Component)]
pub struct SceneCamera;

/// EV100 giving the same pre-tonemapping scale as a linear exposure multiplier.
pub fn exposure_ev100(exposure: f32) -> f32 {
    (1.0 / (1.2 * exposure)).log2()
}

pub fn spawn_scene_camera(
    mut commands: Commands,
    config: Res<SceneConfig>,
    viewport: Res<ViewportSize>,
) {
    let camera = &config.camera;

    commands.spawn((
        Name::new("scene camera"),
        Camera3d::default(),
        // Bloom needs an HDR target.
        Camera {
            hdr: true,
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            aspect_ratio: viewport.aspect_ratio(),
        }),
        Tonemapping::Reinhard,
        Exposure {
            ev100: exposure_ev100(config.renderer.exposure),
        },
        ShadowFilteringMethod::Hardware2x2,
        // Anti-aliasing is chosen once GPU capabilities are known.
        Msaa::Off,
        Transform::from_translation(Vec3::from_array(camera.position))
            .looking_at(Vec3::from_array(camera.look_at), Vec3::Y),
        SceneCamera,
    ));
}
