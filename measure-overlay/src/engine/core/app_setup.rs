use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::asset_paths::{PREFAB_EXTENSION, PROFILE_EXTENSION};
// Crate engine modules
use crate::engine::assets::loader::{
    ProfileLoader, ResolvedPrefabs, resolve_prefabs_system, resolve_profile_system,
    start_profile_loading, transition_to_running,
};
use crate::engine::assets::prefab::MeasurementPrefab;
use crate::engine::assets::profile::{MeasurementProfile, MeasurementSettings};
use crate::engine::camera::viewport_camera::{
    ViewportCamera, camera_controller, spawn_viewport_camera,
};
use crate::engine::core::app_state::AppState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::demo_scene::spawn_demo_scene;
// Crate tools modules
use crate::tools::{
    hud::HudPlugin,
    measure::MeasureToolPlugin,
    tool_manager::{
        ClearMeasurementEvent, MeasurementToolManager, ToolToggleEvent, activate_on_start,
        handle_clear_measurement_events, handle_tool_keyboard_shortcuts,
        handle_tool_toggle_events,
    },
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Profile and prefab descriptions are plain JSON assets.
        .add_plugins(JsonAssetPlugin::<MeasurementProfile>::new(&[PROFILE_EXTENSION]))
        .add_plugins(JsonAssetPlugin::<MeasurementPrefab>::new(&[PREFAB_EXTENSION]))
        .register_type::<MeasurementSettings>()
        .register_type::<MeasurementProfile>();

    app.add_plugins(MeasureToolPlugin);
    app.add_plugins(HudPlugin);

    // Initialise resources early
    app.init_resource::<MeasurementSettings>()
        .init_resource::<ResolvedPrefabs>()
        .init_resource::<ProfileLoader>()
        .init_resource::<MeasurementToolManager>()
        .init_resource::<ViewportCamera>()
        .add_event::<ToolToggleEvent>()
        .add_event::<ClearMeasurementEvent>();

    app.add_systems(
        Startup,
        (start_profile_loading, spawn_viewport_camera, spawn_demo_scene),
    )
    .add_systems(
        Update,
        (
            resolve_profile_system,
            resolve_prefabs_system,
            transition_to_running,
        )
            .chain()
            .run_if(in_state(AppState::Loading)),
    );

    // Camera stays usable while assets load; tool input waits for Running.
    app.add_systems(Update, camera_controller);
    app.add_systems(OnEnter(AppState::Running), activate_on_start);
    app.add_systems(
        Update,
        (
            handle_tool_keyboard_shortcuts,
            handle_tool_toggle_events,
            handle_clear_measurement_events,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    app
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

    DefaultPlugins.set(window_config).set(asset_config)
}
