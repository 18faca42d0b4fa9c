use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::scroll::progress::ScrollTracker;
use bevy::prelude::*;

#[derive(Component)]
pub struct ScrollMarkerText;

pub fn marker_label(scroll_tracker: &ScrollTracker) -> String {
    match scroll_tracker.applied {
        Some(applied) => format!(
            "scroll: {:.3} (target {:.3})",
            applied, scroll_tracker.target
        ),
        None => format!("scroll: - (target {:.3})", scroll_tracker.target),
    }
}

pub fn update_scroll_marker_text(
    config: Option<Res<SceneConfig>>,
    scroll_tracker: Res<ScrollTracker>,
    mut query: Query<(&mut Text, &mut Visibility), With<ScrollMarkerText>>,
) {
    let markers = config.is_some_and(|config| config.scroll.markers);

    for (mut text, mut visibility) in &mut query {
        visibility.set_if_neq(if markers {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });

        if markers && scroll_tracker.is_changed() {
            text.0 = marker_label(&scroll_tracker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_shows_applied_and_target() {
        let tracker = ScrollTracker {
            target: 0.5,
            current: 0.42,
            applied: Some(0.42),
        };
        assert_eq!(marker_label(&tracker), "scroll: 0.420 (target 0.500)");
    }

    #[test]
    fn label_before_first_apply() {
        assert_eq!(
            marker_label(&ScrollTracker::default()),
            "scroll: - (target 0.000)"
        );
    }
}
