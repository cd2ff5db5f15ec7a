use crate::engine::assets::profile::MeasurementSettings;
use crate::tools::measure::{MeasureTool, MeasurementEvent};
use bevy::prelude::*;

/// Resource tracking whether the measurement tool is enabled.
#[derive(Resource, Default, Debug)]
pub struct MeasurementToolManager {
    active: bool,
}

impl MeasurementToolManager {
    /// Enable the tool. Returns `false` when it was already enabled.
    pub fn activate(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        true
    }

    /// Disable the tool. Returns `false` when it was already disabled.
    pub fn deactivate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Run condition for systems that only matter while the tool is enabled.
pub fn tool_is_active(manager: Res<MeasurementToolManager>) -> bool {
    manager.is_active()
}

/// Requested change of tool state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    Toggle,
    Activate,
}

/// Source of tool selection for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSelectionSource {
    Keyboard,
    Button,
    Startup,
}

/// Event fired when the tool is toggled via keyboard, toolbar, or startup configuration.
#[derive(Event, Debug, Clone, Copy)]
pub struct ToolToggleEvent {
    pub action: ToolAction,
    pub source: ToolSelectionSource,
}

/// Event fired to drop the current measurement without disabling the tool.
#[derive(Event, Debug, Clone, Copy)]
pub struct ClearMeasurementEvent;

/// Map the configured toggle key and Escape to tool events.
pub fn handle_tool_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<MeasurementSettings>,
    mut toggle_events: EventWriter<ToolToggleEvent>,
    mut clear_events: EventWriter<ClearMeasurementEvent>,
) {
    if keyboard.just_pressed(settings.toggle_key) {
        toggle_events.write(ToolToggleEvent {
            action: ToolAction::Toggle,
            source: ToolSelectionSource::Keyboard,
        });
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        clear_events.write(ClearMeasurementEvent);
    }
}

/// Enable the tool on entering the running state when the profile asks for it.
pub fn activate_on_start(
    settings: Res<MeasurementSettings>,
    mut toggle_events: EventWriter<ToolToggleEvent>,
) {
    if settings.start_active {
        toggle_events.write(ToolToggleEvent {
            action: ToolAction::Activate,
            source: ToolSelectionSource::Startup,
        });
    }
}

/// Apply tool state changes. Disabling the tool drops the current measurement.
pub fn handle_tool_toggle_events(
    mut events: EventReader<ToolToggleEvent>,
    mut manager: ResMut<MeasurementToolManager>,
    mut measure_tool: ResMut<MeasureTool>,
    mut measurement_events: EventWriter<MeasurementEvent>,
) {
    for event in events.read() {
        let was_active = manager.is_active();
        let now_active = match event.action {
            ToolAction::Toggle if was_active => {
                manager.deactivate();
                false
            }
            ToolAction::Toggle | ToolAction::Activate => {
                manager.activate();
                true
            }
        };

        if was_active == now_active {
            continue;
        }

        if now_active {
            info!(
                "Measurement tool activated via {:?}. Click to measure distance, hold Shift while dragging to measure angles.",
                event.source
            );
        } else {
            if measure_tool.session.clear() {
                measurement_events.write(MeasurementEvent::Cleared);
            }
            info!("Measurement tool deactivated via {:?}", event.source);
        }
    }
}

/// Escape clears the measurement in progress while the tool stays enabled.
pub fn handle_clear_measurement_events(
    mut events: EventReader<ClearMeasurementEvent>,
    manager: Res<MeasurementToolManager>,
    mut measure_tool: ResMut<MeasureTool>,
    mut measurement_events: EventWriter<MeasurementEvent>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    if manager.is_active() && measure_tool.session.clear() {
        info!("Measurement cleared");
        measurement_events.write(MeasurementEvent::Cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::app_state::AppState;
    use crate::tools::measure::session::PointerInput;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<MeasurementToolManager>()
            .init_resource::<MeasureTool>()
            .add_event::<ToolToggleEvent>()
            .add_event::<ClearMeasurementEvent>()
            .add_event::<MeasurementEvent>()
            .add_systems(
                Update,
                (handle_tool_toggle_events, handle_clear_measurement_events).chain(),
            );
        app
    }

    fn start_measurement(app: &mut App) {
        app.world_mut()
            .resource_mut::<MeasureTool>()
            .session
            .step(&PointerInput {
                pressed: true,
                held: true,
                hit: Some(Vec3::ONE),
                ..default()
            });
    }

    #[test]
    fn test_manager_state_changes() {
        let mut manager = MeasurementToolManager::default();
        assert!(manager.activate());
        assert!(!manager.activate());
        assert!(manager.deactivate());
        assert!(!manager.deactivate());
        assert!(!manager.is_active());
    }

    #[test]
    fn test_toggle_off_clears_measurement() {
        let mut app = test_app();
        app.world_mut().send_event(ToolToggleEvent {
            action: ToolAction::Toggle,
            source: ToolSelectionSource::Keyboard,
        });
        app.update();
        assert!(app.world().resource::<MeasurementToolManager>().is_active());

        start_measurement(&mut app);
        app.world_mut().send_event(ToolToggleEvent {
            action: ToolAction::Toggle,
            source: ToolSelectionSource::Button,
        });
        app.update();

        assert!(!app.world().resource::<MeasurementToolManager>().is_active());
        assert!(app.world().resource::<MeasureTool>().session.phase().is_idle());
    }

    fn startup_app(start_active: bool) -> App {
        let mut app = test_app();
        app.add_plugins(bevy::state::app::StatesPlugin)
            .init_state::<AppState>()
            .insert_resource(MeasurementSettings {
                start_active,
                ..default()
            })
            .add_systems(OnEnter(AppState::Running), activate_on_start);
        app
    }

    fn enter_running(app: &mut App) {
        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);
        app.update();
        app.update();
    }

    #[test]
    fn test_start_active_profile_enables_tool() {
        let mut app = startup_app(true);
        app.update();
        assert!(!app.world().resource::<MeasurementToolManager>().is_active());

        enter_running(&mut app);
        assert!(app.world().resource::<MeasurementToolManager>().is_active());
    }

    #[test]
    fn test_tool_starts_disabled_by_default() {
        let mut app = startup_app(false);
        enter_running(&mut app);
        assert!(!app.world().resource::<MeasurementToolManager>().is_active());
    }

    #[test]
    fn test_clear_event_keeps_tool_active() {
        let mut app = test_app();
        app.world_mut().send_event(ToolToggleEvent {
            action: ToolAction::Activate,
            source: ToolSelectionSource::Startup,
        });
        app.update();
        start_measurement(&mut app);

        app.world_mut().send_event(ClearMeasurementEvent);
        app.update();

        assert!(app.world().resource::<MeasurementToolManager>().is_active());
        assert!(app.world().resource::<MeasureTool>().session.phase().is_idle());
    }
}
