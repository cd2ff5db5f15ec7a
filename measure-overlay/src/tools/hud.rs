use crate::engine::assets::profile::{MeasurementSettings, key_label};
use crate::tools::tool_manager::{
    MeasurementToolManager, ToolAction, ToolSelectionSource, ToolToggleEvent,
};
use bevy::prelude::*;

const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
const BUTTON_ACTIVE: Color = Color::srgb(0.0, 0.60, 0.20);

pub const HELP_TEXT: &str =
    "Drag or click between two points to measure distance. Hold Shift while dragging to measure angles.";

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct MeasureToggleButton;

#[derive(Component)]
pub struct MeasureToggleLabel;

#[derive(Component)]
pub struct HelpText;

fn button_label(active: bool, toggle_key: KeyCode) -> String {
    let verb = if active { "Measuring" } else { "Measure" };
    format!("{} [{}]", verb, key_label(toggle_key))
}

fn idle_color(active: bool) -> Color {
    if active { BUTTON_ACTIVE } else { BUTTON_IDLE }
}

// Toolbar in the top-left corner with the toggle button and the usage hint
pub fn spawn_hud(
    mut commands: Commands,
    manager: Res<MeasurementToolManager>,
    settings: Res<MeasurementSettings>,
) {
    let active = manager.is_active();

    commands
        .spawn((
            HudRoot,
            Name::new("Toolbar"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Px(12.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    MeasureToggleButton,
                    Button,
                    Name::new("MeasureToggleButton"),
                    BackgroundColor(idle_color(active)),
                    BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                    Node {
                        width: Val::Px(160.0),
                        height: Val::Px(36.0),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                ))
                .with_children(|btn| {
                    btn.spawn((
                        MeasureToggleLabel,
                        Text::new(button_label(active, settings.toggle_key)),
                        TextFont { font_size: 16.0, ..default() },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                    ));
                });

            parent.spawn((
                HelpText,
                Name::new("HelpText"),
                Text::new(HELP_TEXT),
                TextFont { font_size: 14.0, ..default() },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
            ));
        });
}

// Pressing the button toggles the tool through the shared event path
pub fn measure_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<MeasureToggleButton>),
    >,
    manager: Res<MeasurementToolManager>,
    mut toggle_events: EventWriter<ToolToggleEvent>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                toggle_events.write(ToolToggleEvent {
                    action: ToolAction::Toggle,
                    source: ToolSelectionSource::Button,
                });
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(idle_color(manager.is_active())),
        }
    }
}

// Keep label and colour in step with the tool state and the configured key
pub fn sync_measure_button(
    manager: Res<MeasurementToolManager>,
    settings: Res<MeasurementSettings>,
    mut buttons: Query<(&Interaction, &mut BackgroundColor), With<MeasureToggleButton>>,
    mut labels: Query<&mut Text, With<MeasureToggleLabel>>,
) {
    if !(manager.is_changed() || settings.is_changed()) {
        return;
    }
    let active = manager.is_active();

    for (interaction, mut bg) in &mut buttons {
        if *interaction == Interaction::None {
            *bg = BackgroundColor(idle_color(active));
        }
    }
    for mut text in &mut labels {
        text.0 = button_label(active, settings.toggle_key);
    }
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (measure_button_interaction, sync_measure_button).chain(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hud_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<MeasurementToolManager>()
            .init_resource::<MeasurementSettings>()
            .add_event::<ToolToggleEvent>()
            .add_plugins(HudPlugin);
        app
    }

    fn label(app: &mut App) -> String {
        app.world_mut()
            .query_filtered::<&Text, With<MeasureToggleLabel>>()
            .single(app.world())
            .unwrap()
            .0
            .clone()
    }

    #[test]
    fn test_pressing_button_sends_toggle_event() {
        let mut app = hud_app();
        app.update();

        let button = app
            .world_mut()
            .query_filtered::<Entity, With<MeasureToggleButton>>()
            .single(app.world())
            .unwrap();
        app.world_mut()
            .entity_mut(button)
            .insert(Interaction::Pressed);
        app.update();

        let events = app.world().resource::<Events<ToolToggleEvent>>();
        let sent: Vec<_> = events.iter_current_update_events().collect();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].action, ToolAction::Toggle);
        assert_eq!(sent[0].source, ToolSelectionSource::Button);
    }

    #[test]
    fn test_label_follows_tool_state() {
        let mut app = hud_app();
        app.update();
        assert_eq!(label(&mut app), "Measure [M]");

        app.world_mut()
            .resource_mut::<MeasurementToolManager>()
            .activate();
        app.update();
        assert_eq!(label(&mut app), "Measuring [M]");
    }

    #[test]
    fn test_label_shows_configured_key() {
        let mut app = hud_app();
        app.update();

        // The profile loads after the HUD is spawned.
        app.world_mut()
            .resource_mut::<MeasurementSettings>()
            .toggle_key = KeyCode::KeyT;
        app.update();
        assert_eq!(label(&mut app), "Measure [T]");
    }
}
