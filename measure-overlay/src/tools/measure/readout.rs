use super::MeasureTool;
use crate::engine::assets::loader::ResolvedPrefabs;
use crate::engine::assets::prefab::{ReadoutPanelPrefab, TextSlot};
use crate::engine::assets::profile::{MeasurementSettings, rgba};
use crate::tools::tool_manager::MeasurementToolManager;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Root node of the floating readout.
#[derive(Component, Debug)]
pub struct ReadoutPanel {
    pub size: Vec2,
}

#[derive(Component)]
pub struct DistanceText;

#[derive(Component)]
pub struct AngleText;

/// Top-left corner of the panel in window coordinates (y down).
///
/// The panel sits `offset` right of and below the cursor, flipping to the left
/// or above when it would leave the window.
pub fn panel_position(cursor: Vec2, panel_size: Vec2, window_size: Vec2, offset: f32) -> Vec2 {
    let x = if cursor.x + offset + panel_size.x > window_size.x {
        cursor.x - offset - panel_size.x
    } else {
        cursor.x + offset
    };
    let y = if cursor.y + offset + panel_size.y > window_size.y {
        cursor.y - offset - panel_size.y
    } else {
        cursor.y + offset
    };
    Vec2::new(x, y)
}

fn text_line(slot: &TextSlot, prefab: &ReadoutPanelPrefab) -> impl Bundle {
    (
        Name::new(slot.name.clone()),
        Text::new(slot.placeholder.clone()),
        TextFont {
            font_size: prefab.font_size,
            ..default()
        },
        TextColor(rgba(prefab.text_color)),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            right: Val::Px(0.0),
            top: Val::Px(slot.top),
            height: Val::Px(slot.height),
            ..default()
        },
    )
}

pub fn spawn_readout_panel(commands: &mut Commands, prefab: &ReadoutPanelPrefab) -> Entity {
    commands
        .spawn((
            ReadoutPanel {
                size: Vec2::new(prefab.width, prefab.height),
            },
            Name::new(prefab.name.clone()),
            BackgroundColor(rgba(prefab.background)),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(prefab.width),
                height: Val::Px(prefab.height),
                ..default()
            },
            GlobalZIndex(10),
            Visibility::Hidden,
        ))
        .with_children(|panel| {
            panel.spawn((DistanceText, text_line(&prefab.distance_text, prefab)));
            panel.spawn((AngleText, text_line(&prefab.angle_text, prefab)));
        })
        .id()
}

/// Spawn the panel on first activation and rebuild it when the wired prefab changes.
pub fn sync_readout_panel(
    mut commands: Commands,
    manager: Res<MeasurementToolManager>,
    prefabs: Res<ResolvedPrefabs>,
    panels: Query<Entity, With<ReadoutPanel>>,
) {
    let exists = !panels.is_empty();
    if exists && !prefabs.is_changed() {
        return;
    }
    if !exists && !manager.is_active() {
        return;
    }

    for entity in &panels {
        commands.entity(entity).despawn();
    }
    let fallback = ReadoutPanelPrefab::default();
    let prefab = prefabs.readout_panel.as_ref().unwrap_or(&fallback);
    spawn_readout_panel(&mut commands, prefab);
}

fn set_line(text: &mut Text, visibility: &mut Visibility, value: &str) {
    if text.0 != value {
        text.0 = value.to_string();
    }
    let wanted = if value.is_empty() {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    if *visibility != wanted {
        *visibility = wanted;
    }
}

/// Mirror the session readout into the panel; hide the panel while idle.
pub fn update_readout_text(
    measure_tool: Res<MeasureTool>,
    manager: Res<MeasurementToolManager>,
    mut panels: Query<&mut Visibility, With<ReadoutPanel>>,
    mut distance_lines: Query<
        (&mut Text, &mut Visibility),
        (With<DistanceText>, Without<AngleText>, Without<ReadoutPanel>),
    >,
    mut angle_lines: Query<
        (&mut Text, &mut Visibility),
        (With<AngleText>, Without<DistanceText>, Without<ReadoutPanel>),
    >,
) {
    let phase = measure_tool.session.phase();
    let shown = manager.is_active() && !phase.is_idle();

    for mut visibility in &mut panels {
        let wanted = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
    if !shown {
        return;
    }

    let readout = phase.readout();
    for (mut text, mut visibility) in &mut distance_lines {
        set_line(&mut text, &mut visibility, &readout.distance);
    }
    for (mut text, mut visibility) in &mut angle_lines {
        set_line(&mut text, &mut visibility, &readout.angle);
    }
}

/// Keep the panel next to the cursor and on screen.
pub fn follow_cursor(
    settings: Res<MeasurementSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut panels: Query<(&ReadoutPanel, &mut Node, &Visibility)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());

    for (panel, mut node, visibility) in &mut panels {
        if *visibility == Visibility::Hidden {
            continue;
        }
        let position = panel_position(cursor, panel.size, window_size, settings.cursor_offset);
        node.left = Val::Px(position.x);
        node.top = Val::Px(position.y);
    }
}
