use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::scroll::progress::{ScrollTracker, scroll_progress};
use crate::engine::systems::resize::ViewportSize;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::scroll::LINE_HEIGHT_PX;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Latest page progress written by the browser listener, taken each frame.
#[derive(Resource)]
pub struct PageScrollQueue(std::sync::Arc<std::sync::Mutex<Option<f32>>>);

#[cfg(target_arch = "wasm32")]
pub fn setup_page_scroll_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let latest: Arc<Mutex<Option<f32>>> = Arc::new(Mutex::new(read_page_progress()));
    let latest_clone = latest.clone();

    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Some(progress) = read_page_progress() {
            if let Ok(mut slot) = latest_clone.lock() {
                *slot = Some(progress);
            }
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    let Some(window) = web_sys::window() else {
        error!("Window object not available, scroll progress disabled");
        return;
    };

    // Resizing changes the scrollable height, so it moves progress too.
    for event in ["scroll", "resize"] {
        if let Err(e) =
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            error!("Failed to register {} listener: {:?}", event, e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(PageScrollQueue(latest));
}

#[cfg(target_arch = "wasm32")]
fn read_page_progress() -> Option<f32> {
    let window = web_sys::window()?;
    let scroll_top = window.scroll_y().ok()? as f32;
    let viewport_height = window.inner_height().ok()?.as_f64()? as f32;
    let scroll_height = window.document()?.document_element()?.scroll_height() as f32;

    Some(scroll_progress(scroll_top, scroll_height, viewport_height))
}

pub fn read_page_scroll(
    page_scroll: Option<Res<PageScrollQueue>>,
    mut scroll_tracker: ResMut<ScrollTracker>,
) {
    let Some(page_scroll) = page_scroll else {
        return;
    };

    let latest = match page_scroll.0.lock() {
        Ok(mut slot) => slot.take(),
        Err(_) => None,
    };

    if let Some(progress) = latest {
        scroll_tracker.set_target(progress);
    }
}

/// Scroll offset within the virtual page used when there is no browser page.
#[derive(Resource, Debug, Default)]
pub struct VirtualPage {
    pub scroll_top: f32,
}

pub fn wheel_delta_px(unit: MouseScrollUnit, y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => y * LINE_HEIGHT_PX,
        MouseScrollUnit::Pixel => y,
    }
}

pub fn read_wheel_scroll(
    mut wheel_events: EventReader<MouseWheel>,
    viewport: Res<ViewportSize>,
    config: Res<SceneConfig>,
    mut page: ResMut<VirtualPage>,
    mut scroll_tracker: ResMut<ScrollTracker>,
) {
    let delta: f32 = wheel_events
        .read()
        .map(|event| wheel_delta_px(event.unit, event.y))
        .sum();

    if delta == 0.0 {
        return;
    }

    let viewport_height = viewport.height;
    let page_height = viewport_height * config.scroll.page_viewports;
    let max_scroll_top = (page_height - viewport_height).max(0.0);

    // Wheel up reports positive y and moves back towards the top.
    page.scroll_top = (page.scroll_top - delta).clamp(0.0, max_scroll_top);
    scroll_tracker.set_target(scroll_progress(
        page.scroll_top,
        page_height,
        viewport_height,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::InputPlugin;

    fn wheel_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin))
            .insert_resource(SceneConfig::default())
            .insert_resource(ViewportSize {
                width: 1000.0,
                height: 500.0,
                pixel_ratio: 1.0,
            })
            .init_resource::<VirtualPage>()
            .init_resource::<ScrollTracker>()
            .add_systems(Update, read_wheel_scroll);
        app
    }

    fn scroll(app: &mut App, unit: MouseScrollUnit, y: f32) {
        app.world_mut().send_event(MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        });
        app.update();
    }

    #[test]
    fn wheel_lines_convert_to_pixels() {
        assert_eq!(wheel_delta_px(MouseScrollUnit::Line, -2.0), -80.0);
        assert_eq!(wheel_delta_px(MouseScrollUnit::Pixel, 12.5), 12.5);
    }

    #[test]
    fn scrolling_down_advances_progress() {
        let mut app = wheel_app();

        // Three viewports of 500px leave 1000px to scroll.
        scroll(&mut app, MouseScrollUnit::Pixel, -250.0);

        assert_eq!(app.world().resource::<VirtualPage>().scroll_top, 250.0);
        assert_eq!(app.world().resource::<ScrollTracker>().target, 0.25);
    }

    #[test]
    fn virtual_page_stops_at_both_ends() {
        let mut app = wheel_app();

        scroll(&mut app, MouseScrollUnit::Pixel, 300.0);
        assert_eq!(app.world().resource::<ScrollTracker>().target, 0.0);

        scroll(&mut app, MouseScrollUnit::Line, -100.0);
        assert_eq!(app.world().resource::<VirtualPage>().scroll_top, 1000.0);
        assert_eq!(app.world().resource::<ScrollTracker>().target, 1.0);
    }

    #[test]
    fn page_listener_progress_is_taken_once() {
        let slot = std::sync::Arc::new(std::sync::Mutex::new(Some(0.4)));
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ScrollTracker>()
            .insert_resource(PageScrollQueue(slot.clone()))
            .add_systems(Update, read_page_scroll);

        app.update();

        assert_eq!(app.world().resource::<ScrollTracker>().target, 0.4);
        assert_eq!(*slot.lock().unwrap(), None);
    }
}
