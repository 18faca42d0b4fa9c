use crate::engine::core::app_state::FpsText;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::render_settings::FPS_NOTIFY_INTERVAL;

/// Smoothed frame rate and frame time in milliseconds, once both are measured.
pub fn frame_stats(diagnostics: &DiagnosticsStore) -> Option<(f64, f64)> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())?;
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|frame_time| frame_time.smoothed())?;
    Some((fps, frame_time))
}

pub fn fps_label(fps: f64, frame_time_ms: f64) -> String {
    format!("FPS: {fps:.1} ({frame_time_ms:.2} ms)")
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();
    if current_time - *last_send_time < FPS_NOTIFY_INTERVAL {
        return;
    }

    if let Some((fps, frame_time)) = frame_stats(&diagnostics) {
        rpc_interface.send_notification(
            "fps_update",
            serde_json::json!({
                "fps": fps as f32,
                "frame_time_ms": frame_time as f32,
            }),
        );
        *last_send_time = current_time;
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let Some((fps, frame_time)) = frame_stats(&diagnostics) else {
        return;
    };

    for mut text in &mut query {
        text.0 = fps_label(fps, frame_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_rounds_for_display() {
        assert_eq!(fps_label(59.94, 16.683), "FPS: 59.9 (16.68 ms)");
    }

    #[test]
    fn no_stats_before_measurements() {
        assert_eq!(frame_stats(&DiagnosticsStore::default()), None);
    }
}
