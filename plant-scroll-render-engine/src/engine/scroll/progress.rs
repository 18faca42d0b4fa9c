use crate::engine::assets::scene_config::SceneConfig;
use bevy::prelude::*;

/// Distance below which scrubbing snaps onto its target.
const SNAP_EPSILON: f32 = 1e-4;

/// Progress from the top of the page hitting the top of the viewport to the
/// bottom of the page hitting the bottom of the viewport.
pub fn scroll_progress(scroll_top: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    let scrollable = scroll_height - viewport_height;
    if !(scrollable > 0.0) {
        return 0.0;
    }

    (scroll_top / scrollable).clamp(0.0, 1.0)
}

/// Round progress to a fixed number of decimal places.
pub fn quantize_progress(progress: f32, precision: u32) -> f32 {
    let scale = 10f32.powi(precision as i32);
    (progress * scale).round() / scale
}

/// Exponential approach towards `target` with time constant `scrub_seconds`.
pub fn scrub_towards(current: f32, target: f32, delta_seconds: f32, scrub_seconds: f32) -> f32 {
    if scrub_seconds <= 0.0 {
        return target;
    }

    let blend = 1.0 - (-delta_seconds / scrub_seconds).exp();
    let next = current + (target - current) * blend;
    if (target - next).abs() < SNAP_EPSILON {
        target
    } else {
        next
    }
}

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ScrollTracker {
    /// Latest progress reported by the page.
    pub target: f32,
    /// Scrubbed progress trailing the target.
    pub current: f32,
    /// Quantised progress last pushed into the scene.
    pub applied: Option<f32>,
}

impl ScrollTracker {
    pub fn set_target(&mut self, progress: f32) {
        self.target = progress.clamp(0.0, 1.0);
    }

    /// Force the next timeline pass to reapply the current pose.
    pub fn invalidate(&mut self) {
        self.applied = None;
    }
}

pub fn scrub_scroll_progress(
    time: Res<Time>,
    config: Res<SceneConfig>,
    mut scroll_tracker: ResMut<ScrollTracker>,
) {
    if scroll_tracker.current == scroll_tracker.target {
        return;
    }

    let next = scrub_towards(
        scroll_tracker.current,
        scroll_tracker.target,
        time.delta_secs(),
        config.scroll.scrub_seconds,
    );
    scroll_tracker.current = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn scrub_app(scrub_seconds: f32) -> App {
        let mut config = SceneConfig::default();
        config.scroll.scrub_seconds = scrub_seconds;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .insert_resource(config)
            .insert_resource(ScrollTracker {
                target: 1.0,
                ..default()
            })
            .add_systems(Update, scrub_scroll_progress);
        app
    }

    #[test]
    fn tracker_eases_towards_target_over_frames() {
        let mut app = scrub_app(0.1);

        // The first frame has no elapsed time yet.
        app.update();
        assert_eq!(app.world().resource::<ScrollTracker>().current, 0.0);

        app.update();
        let first = app.world().resource::<ScrollTracker>().current;
        assert!(first > 0.0 && first < 1.0, "current was {first}");

        app.update();
        let second = app.world().resource::<ScrollTracker>().current;
        assert!(second > first && second < 1.0, "current was {second}");

        for _ in 0..100 {
            app.update();
        }
        assert_eq!(app.world().resource::<ScrollTracker>().current, 1.0);
    }

    #[test]
    fn zero_scrub_tracker_jumps_to_target() {
        let mut app = scrub_app(0.0);
        app.update();
        assert_eq!(app.world().resource::<ScrollTracker>().current, 1.0);
    }

    #[test]
    fn progress_spans_top_to_bottom() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 3000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(scroll_progress(-40.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(2400.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn page_that_cannot_scroll_reports_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn quantises_to_three_decimals() {
        assert_eq!(quantize_progress(0.12345, 3), 0.123);
        assert_eq!(quantize_progress(0.9996, 3), 1.0);
        assert_eq!(quantize_progress(0.5, 0), 1.0);
    }

    #[test]
    fn zero_scrub_snaps_immediately() {
        assert_eq!(scrub_towards(0.0, 0.8, 0.016, 0.0), 0.8);
    }

    #[test]
    fn scrub_moves_partway_then_settles() {
        let first = scrub_towards(0.0, 1.0, 0.016, 0.1);
        assert!(first > 0.0 && first < 1.0);

        let mut current = first;
        for _ in 0..200 {
            current = scrub_towards(current, 1.0, 0.016, 0.1);
        }
        assert_eq!(current, 1.0);
    }

    #[test]
    fn scrub_tracks_downward_targets() {
        let next = scrub_towards(1.0, 0.0, 0.05, 0.1);
        assert!(next < 1.0 && next > 0.0);
    }

    #[test]
    fn target_is_clamped() {
        let mut tracker = ScrollTracker::default();
        tracker.set_target(1.7);
        assert_eq!(tracker.target, 1.0);
        tracker.set_target(-0.2);
        assert_eq!(tracker.target, 0.0);
    }
}
