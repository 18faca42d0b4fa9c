use crate::engine::assets::scene_config::{ScrollConfig, SceneConfig};
use crate::engine::loading::model_loader::PlantAnimation;
use crate::engine::scene::plants::{Flower, PlantsGroup};
use crate::engine::scroll::progress::{ScrollTracker, quantize_progress};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

/// Scene pose for one progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPose {
    pub flower_yaw: f32,
    pub group_pitch: f32,
    /// Clip time, absent until the clip duration is known.
    pub animation_time: Option<f32>,
}

impl ScrollPose {
    /// Rotations grow with progress while the clip plays backwards from the
    /// middle of its span to its start.
    pub fn from_progress(progress: f32, scroll: &ScrollConfig, clip_duration: Option<f32>) -> Self {
        Self {
            flower_yaw: scroll.flower_turn * progress,
            group_pitch: scroll.group_tilt * progress,
            animation_time: clip_duration
                .map(|duration| duration * scroll.animation_span * (1.0 - progress)),
        }
    }
}

/// Push the scrubbed progress into the scene whenever its quantised value moves.
pub fn apply_scroll_timeline(
    config: Res<SceneConfig>,
    mut scroll_tracker: ResMut<ScrollTracker>,
    animation: Option<Res<PlantAnimation>>,
    mut flowers: Query<&mut Transform, (With<Flower>, Without<PlantsGroup>)>,
    mut groups: Query<&mut Transform, (With<PlantsGroup>, Without<Flower>)>,
    mut players: Query<&mut AnimationPlayer>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let progress = quantize_progress(scroll_tracker.current, config.scroll.precision);
    if scroll_tracker.applied == Some(progress) {
        return;
    }
    scroll_tracker.applied = Some(progress);

    let pose = ScrollPose::from_progress(
        progress,
        &config.scroll,
        animation.as_ref().and_then(|animation| animation.duration),
    );

    for mut transform in &mut flowers {
        transform.rotation = Quat::from_rotation_y(pose.flower_yaw);
    }

    for mut transform in &mut groups {
        transform.rotation = Quat::from_rotation_x(pose.group_pitch);
    }

    if let (Some(animation), Some(animation_time)) = (animation.as_ref(), pose.animation_time) {
        for mut player in &mut players {
            if let Some(active) = player.animation_mut(animation.node) {
                active.seek_to(animation_time);
            }
        }
    }

    if config.scroll.markers {
        rpc_interface.send_notification(
            "scroll_progress",
            serde_json::json!({ "progress": progress }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::animation::graph::AnimationNodeIndex;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn start_of_page_is_unrotated_mid_clip() {
        let pose = ScrollPose::from_progress(0.0, &ScrollConfig::default(), Some(4.0));
        assert_eq!(pose.flower_yaw, 0.0);
        assert_eq!(pose.group_pitch, 0.0);
        assert_eq!(pose.animation_time, Some(2.0));
    }

    #[test]
    fn end_of_page_reaches_full_turn_at_clip_start() {
        let pose = ScrollPose::from_progress(1.0, &ScrollConfig::default(), Some(4.0));
        assert!((pose.flower_yaw - PI * 0.7).abs() < EPSILON);
        assert!((pose.group_pitch - PI * 0.15).abs() < EPSILON);
        assert_eq!(pose.animation_time, Some(0.0));
    }

    #[test]
    fn halfway_pose_is_linear() {
        let pose = ScrollPose::from_progress(0.5, &ScrollConfig::default(), Some(3.0));
        assert!((pose.flower_yaw - PI * 0.35).abs() < EPSILON);
        assert!((pose.group_pitch - PI * 0.075).abs() < EPSILON);
        assert_eq!(pose.animation_time, Some(0.75));
    }

    #[test]
    fn unknown_duration_leaves_clip_alone() {
        let pose = ScrollPose::from_progress(0.3, &ScrollConfig::default(), None);
        assert_eq!(pose.animation_time, None);
    }

    fn timeline_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SceneConfig::default())
            .init_resource::<ScrollTracker>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, apply_scroll_timeline);
        app
    }

    #[test]
    fn applies_pose_to_flower_and_group() {
        let mut app = timeline_app();
        let group = app
            .world_mut()
            .spawn((Transform::default(), PlantsGroup))
            .id();
        let flower = app
            .world_mut()
            .spawn((Transform::from_xyz(0.0, -1.0, 0.0), Flower))
            .id();
        app.world_mut().resource_mut::<ScrollTracker>().current = 1.0;

        app.update();

        let flower_transform = app.world().get::<Transform>(flower).unwrap();
        let expected = Quat::from_rotation_y(PI * 0.7);
        assert!(flower_transform.rotation.abs_diff_eq(expected, EPSILON));
        assert_eq!(flower_transform.translation.y, -1.0);

        let group_transform = app.world().get::<Transform>(group).unwrap();
        let expected = Quat::from_rotation_x(PI * 0.15);
        assert!(group_transform.rotation.abs_diff_eq(expected, EPSILON));

        assert_eq!(app.world().resource::<ScrollTracker>().applied, Some(1.0));
    }

    #[test]
    fn seeks_the_paused_clip() {
        let mut app = timeline_app();
        let node = AnimationNodeIndex::new(1);
        app.insert_resource(PlantAnimation {
            graph: Handle::default(),
            node,
            duration: Some(6.0),
        });

        let mut player = AnimationPlayer::default();
        player.play(node).pause();
        let player = app.world_mut().spawn(player).id();
        app.world_mut().resource_mut::<ScrollTracker>().current = 0.25;

        app.update();

        let seek_time = app
            .world()
            .get::<AnimationPlayer>(player)
            .and_then(|player| player.animation(node))
            .map(|active| active.seek_time());
        assert_eq!(seek_time, Some(2.25));
    }

    #[test]
    fn unchanged_progress_is_not_reapplied() {
        let mut app = timeline_app();
        let flower = app.world_mut().spawn((Transform::default(), Flower)).id();
        app.update();

        // A manual edit survives while progress stays put.
        app.world_mut().get_mut::<Transform>(flower).unwrap().rotation =
            Quat::from_rotation_z(1.0);
        app.update();
        assert!(
            app.world()
                .get::<Transform>(flower)
                .unwrap()
                .rotation
                .abs_diff_eq(Quat::from_rotation_z(1.0), EPSILON)
        );

        app.world_mut().resource_mut::<ScrollTracker>().invalidate();
        app.update();
        assert!(
            app.world()
                .get::<Transform>(flower)
                .unwrap()
                .rotation
                .abs_diff_eq(Quat::IDENTITY, EPSILON)
        );
    }
}
