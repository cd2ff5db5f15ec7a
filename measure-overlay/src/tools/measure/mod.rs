//! Distance and angle measurement tool.
//!
//! ## Interaction
//!
//! ```text
//! Idle ──press──> FirstPointSet ──release away from start──> DistanceComplete
//!  │                (end follows cursor)
//!  │                    └──release on start, then click──> DistanceComplete
//!  └──Shift+press──> Dragging ──release──> VertexSet ──click──> AngleComplete
//!                    (vertex follows)      (third point follows)
//! ```
//!
//! A distance is measured either by dragging from start to end or by clicking
//! the two points.
//!
//! Starting a new session replaces the previous completed measurement.
//! Escape clears the current measurement; disabling the tool does the same.
//!
//! ## Frame flow
//!
//! 1. `sample_pointer_system` reads the buttons and casts the cursor ray.
//! 2. `measure_tool_system` steps the session with that sample and emits
//!    `MeasurementEvent`s, unless the pointer is over interactive UI.
//! 3. `update_measure_render` rebuilds lines, markers and the angle arc when
//!    the session changes.
//! 4. The readout systems keep the floating panel text and position current.

/// Elementary vector maths and readout formatting.
pub mod geometry;

/// Cursor ray casting against measurable scene geometry.
pub mod picking;

/// Floating readout panel that follows the cursor.
pub mod readout;

/// Line, marker and angle arc visuals.
pub mod render;

/// Measurement session state machine.
pub mod session;

use crate::engine::assets::profile::MeasurementSettings;
use crate::engine::core::app_state::AppState;
use crate::tools::tool_manager::tool_is_active;
use bevy::picking::mesh_picking::ray_cast::MeshRayCast;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use picking::{MeasureLayer, MeasureOverlay, cursor_world_point};
use serde::Serialize;
use session::{MeasureKind, MeasureSession, Measurement, PointerInput, SessionTransition};

#[derive(Resource, Default, Debug)]
pub struct MeasureTool {
    pub session: MeasureSession,
}

/// Notifications about measurement progress.
#[derive(Event, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MeasurementEvent {
    Started { kind: MeasureKind, position: Vec3 },
    Updated { points: Vec<Vec3> },
    VertexFixed { position: Vec3 },
    Completed { measurement: Measurement },
    Cleared,
}

/// Whether the pointer is over an interactive UI node.
pub fn pointer_over_ui(interactions: &Query<&Interaction>) -> bool {
    interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None)
}

/// Pointer state for the current frame.
#[derive(Resource, Default, Debug)]
pub struct PointerSample(pub PointerInput);

/// Read the primary button and cast the cursor ray into the scene.
pub fn sample_pointer_system(
    mut sample: ResMut<PointerSample>,
    settings: Res<MeasurementSettings>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    layers: Query<&MeasureLayer>,
    overlay: Query<(), With<MeasureOverlay>>,
    mut ray_cast: MeshRayCast,
) {
    let hit = match (windows.single(), cameras.single()) {
        (Ok(window), Ok((camera, camera_transform))) => window
            .cursor_position()
            .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor).ok())
            .and_then(|ray| {
                cursor_world_point(
                    &mut ray_cast,
                    ray,
                    camera_transform,
                    &settings,
                    &layers,
                    &overlay,
                )
            }),
        _ => None,
    };

    sample.0 = PointerInput {
        pressed: mouse.just_pressed(MouseButton::Left),
        held: mouse.pressed(MouseButton::Left),
        released: mouse.just_released(MouseButton::Left),
        angle_modifier: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        hit,
    };
}

/// Step the session with this frame's sample and report transitions.
pub fn measure_tool_system(
    mut measure_tool: ResMut<MeasureTool>,
    sample: Res<PointerSample>,
    interactions: Query<&Interaction>,
    mut events: EventWriter<MeasurementEvent>,
) {
    if pointer_over_ui(&interactions) {
        return;
    }

    // Step through a plain `&mut` so change detection only fires on transitions.
    let replaced_completed = measure_tool.session.phase().is_complete();
    let mut session = measure_tool.session.clone();
    let Some(transition) = session.step(&sample.0) else {
        if session.phase() != measure_tool.session.phase() {
            measure_tool.session = session;
        }
        return;
    };
    measure_tool.session = session;

    match transition {
        SessionTransition::Started { kind, position } => {
            if replaced_completed {
                events.write(MeasurementEvent::Cleared);
            }
            events.write(MeasurementEvent::Started { kind, position });
        }
        SessionTransition::Updated => {
            events.write(MeasurementEvent::Updated {
                points: measure_tool.session.phase().polyline(),
            });
        }
        SessionTransition::VertexFixed { position } => {
            events.write(MeasurementEvent::VertexFixed { position });
        }
        SessionTransition::Completed(measurement) => {
            events.write(MeasurementEvent::Completed { measurement });
        }
    }
}

/// Log started and completed measurements as JSON payloads.
pub fn log_measurement_events(mut events: EventReader<MeasurementEvent>) {
    for event in events.read() {
        match event {
            MeasurementEvent::Started { .. } => match serde_json::to_string(event) {
                Ok(payload) => info!("measurement {}", payload),
                Err(err) => warn!("Could not serialise measurement event: {}", err),
            },
            MeasurementEvent::Completed { measurement } => {
                match serde_json::to_string(event) {
                    Ok(payload) => info!("measurement #{} {}", measurement.id(), payload),
                    Err(err) => warn!("Could not serialise measurement event: {}", err),
                }
            }
            MeasurementEvent::Updated { .. } | MeasurementEvent::VertexFixed { .. } => {
                debug!("measurement {:?}", event);
            }
            MeasurementEvent::Cleared => debug!("measurement cleared"),
        }
    }
}

pub struct MeasureToolPlugin;

impl Plugin for MeasureToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeasureTool>()
            .init_resource::<PointerSample>()
            .register_type::<MeasureLayer>()
            .add_event::<MeasurementEvent>()
            .add_systems(
                Update,
                (
                    (sample_pointer_system, measure_tool_system)
                        .chain()
                        .run_if(tool_is_active),
                    render::update_measure_render,
                    readout::sync_readout_panel,
                    readout::update_readout_text,
                    readout::follow_cursor,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(Update, log_measurement_events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<MeasureTool>()
            .init_resource::<PointerSample>()
            .add_event::<MeasurementEvent>()
            .add_systems(Update, measure_tool_system);
        app
    }

    fn feed(app: &mut App, input: PointerInput) {
        app.world_mut().resource_mut::<PointerSample>().0 = input;
        app.update();
    }

    fn press(at: Vec3) -> PointerInput {
        PointerInput {
            pressed: true,
            held: true,
            hit: Some(at),
            ..default()
        }
    }

    fn release(at: Vec3) -> PointerInput {
        PointerInput {
            released: true,
            hit: Some(at),
            ..default()
        }
    }

    fn frame_events(app: &App) -> Vec<MeasurementEvent> {
        app.world()
            .resource::<Events<MeasurementEvent>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    #[test]
    fn test_pointer_over_ui_suppresses_input() {
        let mut app = session_app();
        let button = app.world_mut().spawn(Interaction::Hovered).id();
        feed(&mut app, press(Vec3::ZERO));
        assert!(app.world().resource::<MeasureTool>().session.phase().is_idle());
        assert!(frame_events(&app).is_empty());

        *app.world_mut().get_mut::<Interaction>(button).unwrap() = Interaction::None;
        feed(&mut app, press(Vec3::ZERO));
        assert!(!app.world().resource::<MeasureTool>().session.phase().is_idle());
        assert_eq!(
            frame_events(&app),
            vec![MeasurementEvent::Started {
                kind: MeasureKind::Distance,
                position: Vec3::ZERO
            }]
        );
    }

    #[test]
    fn test_new_measurement_clears_previous_first() {
        let mut app = session_app();
        feed(&mut app, press(Vec3::ZERO));
        feed(&mut app, release(Vec3::X));
        assert!(app.world().resource::<MeasureTool>().session.phase().is_complete());

        app.world_mut()
            .resource_mut::<Events<MeasurementEvent>>()
            .clear();
        feed(&mut app, press(Vec3::Y));
        assert_eq!(
            frame_events(&app),
            vec![
                MeasurementEvent::Cleared,
                MeasurementEvent::Started {
                    kind: MeasureKind::Distance,
                    position: Vec3::Y
                }
            ]
        );
    }

    #[test]
    fn test_completed_event_serialises_with_tags() {
        let event = MeasurementEvent::Completed {
            measurement: Measurement::Distance {
                id: 3,
                start: Vec3::ZERO,
                end: Vec3::X,
                distance: 1.0,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "completed");
        assert_eq!(json["measurement"]["kind"], "distance");
        assert_eq!(json["measurement"]["id"], 3);
    }
}
