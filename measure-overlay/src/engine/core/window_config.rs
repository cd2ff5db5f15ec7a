use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    Window {
        title: "Scene Measurement Overlay".into(),
        present_mode: PresentMode::AutoVsync,
        resolution: (1280.0, 800.0).into(),
        ..default()
    }
}
