use eframe::egui;

use mandelscope_core::InputEvent;

/// Map one raw window event to an engine event.
///
/// Key repeats count as separate presses, matching how held keys pan.
pub(crate) fn map_event(event: &egui::Event) -> Option<InputEvent> {
    match event {
        egui::Event::Key {
            key, pressed: true, ..
        } => map_key(*key),
        egui::Event::MouseWheel { delta, .. } => map_wheel(delta.y),
        _ => None,
    }
}

fn map_wheel(delta_y: f32) -> Option<InputEvent> {
    if delta_y > 0.0 {
        Some(InputEvent::ZoomIn)
    } else if delta_y < 0.0 {
        Some(InputEvent::ZoomOut)
    } else {
        None
    }
}

fn map_key(key: egui::Key) -> Option<InputEvent> {
    let event = match key {
        egui::Key::W => InputEvent::PanUp,
        egui::Key::S => InputEvent::PanDown,
        egui::Key::A => InputEvent::PanLeft,
        egui::Key::D => InputEvent::PanRight,
        egui::Key::ArrowUp => InputEvent::IncreaseDepth,
        egui::Key::ArrowDown => InputEvent::DecreaseDepth,
        egui::Key::Plus | egui::Key::Equals => InputEvent::ZoomIn,
        egui::Key::Minus => InputEvent::ZoomOut,
        egui::Key::Escape => InputEvent::Quit,
        _ => return None,
    };
    Some(event)
}
