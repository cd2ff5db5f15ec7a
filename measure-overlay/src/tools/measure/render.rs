use super::MeasureTool;
use super::geometry::{arc_points, segment_transform};
use super::picking::MeasureOverlay;
use super::session::MeasurePhase;
use crate::engine::assets::loader::ResolvedPrefabs;
use crate::engine::assets::prefab::{AngleMarkerPrefab, PointMarkerPrefab};
use crate::engine::assets::profile::{MeasurementSettings, rgba};
use bevy::prelude::*;
use constants::render_settings::{FALLBACK_MARKER_RADIUS, MIN_SEGMENT_LENGTH};

/// Every entity rebuilt by [`update_measure_render`].
#[derive(Component)]
pub struct MeasureVisual;

#[derive(Component)]
pub struct MeasureLineSegment;

#[derive(Component)]
pub struct PointMarker;

#[derive(Component)]
pub struct AngleMarker;

/// Angle marker geometry relative to the vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleMarkerLayout {
    pub arc: Vec<Vec3>,
    pub first_end: Vec3,
    pub second_end: Vec3,
}

impl AngleMarkerLayout {
    pub fn new(start: Vec3, vertex: Vec3, end: Vec3, prefab: &AngleMarkerPrefab) -> Option<Self> {
        let arc = arc_points(
            Vec3::ZERO,
            start - vertex,
            end - vertex,
            prefab.arc_radius,
            prefab.arc_segments,
        );
        let first_end = *arc.first()?;
        let second_end = *arc.last()?;
        Some(Self {
            arc,
            first_end,
            second_end,
        })
    }
}

/// Vertex of a completed angle measurement, if the arc should be drawn.
pub fn angle_marker_anchor(phase: &MeasurePhase, show_angle_arc: bool) -> Option<(Vec3, Vec3, Vec3)> {
    match *phase {
        MeasurePhase::AngleComplete { start, vertex, end } if show_angle_arc => {
            Some((start, vertex, end))
        }
        _ => None,
    }
}

fn emissive_material(color: Color, strength: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        emissive: color.to_linear() * strength,
        ..default()
    }
}

fn spawn_segments(
    commands: &mut ChildSpawnerCommands,
    points: &[Vec3],
    min_length: f32,
    width: f32,
    mesh_assets: &mut Assets<Mesh>,
    material: &Handle<StandardMaterial>,
) {
    for pair in points.windows(2) {
        let Some((transform, length)) = segment_transform(pair[0], pair[1], min_length) else {
            continue;
        };
        commands.spawn((
            Mesh3d(mesh_assets.add(Cuboid::new(length, width, width))),
            MeshMaterial3d(material.clone()),
            transform,
            MeasureLineSegment,
            MeasureOverlay,
        ));
    }
}

fn spawn_point_marker(
    commands: &mut ChildSpawnerCommands,
    position: Vec3,
    prefab: Option<&PointMarkerPrefab>,
    fallback_color: Color,
    mesh_assets: &mut Assets<Mesh>,
    material_assets: &mut Assets<StandardMaterial>,
) {
    let (name, radius, material) = match prefab {
        Some(prefab) => (
            prefab.name.clone(),
            prefab.radius,
            emissive_material(rgba(prefab.color), prefab.emissive_strength),
        ),
        None => (
            "PointMarker".to_string(),
            FALLBACK_MARKER_RADIUS,
            StandardMaterial {
                base_color: fallback_color,
                ..default()
            },
        ),
    };
    commands.spawn((
        Mesh3d(mesh_assets.add(Sphere::new(radius))),
        MeshMaterial3d(material_assets.add(material)),
        Transform::from_translation(position),
        Name::new(name),
        PointMarker,
        MeasureOverlay,
    ));
}

fn spawn_angle_marker(
    commands: &mut ChildSpawnerCommands,
    (start, vertex, end): (Vec3, Vec3, Vec3),
    prefab: Option<&AngleMarkerPrefab>,
    mesh_assets: &mut Assets<Mesh>,
    material_assets: &mut Assets<StandardMaterial>,
) {
    let mut marker = commands.spawn((
        Transform::from_translation(vertex),
        Visibility::default(),
        Name::new("AngleMarker"),
        AngleMarker,
        MeasureOverlay,
    ));

    // Without a prefab the marker is a bare anchor at the vertex.
    let Some(prefab) = prefab else {
        return;
    };
    let Some(layout) = AngleMarkerLayout::new(start, vertex, end, prefab) else {
        return;
    };
    let material = material_assets.add(emissive_material(
        rgba(prefab.color),
        prefab.emissive_strength,
    ));

    marker.insert(Name::new(prefab.name.clone()));
    marker.with_children(|parent| {
        // Arc chords of narrow angles are shorter than any line threshold.
        spawn_segments(parent, &layout.arc, 0.0, prefab.line_width, mesh_assets, &material);
        for (name, position) in [("StartPoint", layout.first_end), ("EndPoint", layout.second_end)] {
            parent.spawn((
                Mesh3d(mesh_assets.add(Sphere::new(prefab.endpoint_radius))),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(position),
                Name::new(name),
                MeasureOverlay,
            ));
        }
    });
}

/// Renderer: clears previous visuals and rebuilds them from the session whenever
/// the session, settings or prefabs change.
pub fn update_measure_render(
    mut commands: Commands,
    measure_tool: Res<MeasureTool>,
    settings: Res<MeasurementSettings>,
    prefabs: Res<ResolvedPrefabs>,
    mut mesh_assets: ResMut<Assets<Mesh>>,
    mut material_assets: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, With<MeasureVisual>>,
) {
    if !(measure_tool.is_changed() || settings.is_changed() || prefabs.is_changed()) {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let phase = measure_tool.session.phase();
    if phase.is_idle() {
        return;
    }

    let line_material = material_assets.add(StandardMaterial {
        base_color: settings.color(),
        emissive: settings.color().to_linear(),
        unlit: true,
        ..default()
    });
    let polyline = phase.polyline();
    let markers = phase.marker_points();
    let angle = angle_marker_anchor(phase, settings.show_angle_arc);

    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            Name::new("Measurement"),
            MeasureVisual,
            MeasureOverlay,
        ))
        .with_children(|root| {
            spawn_segments(
                root,
                &polyline,
                MIN_SEGMENT_LENGTH,
                settings.line_width,
                &mut mesh_assets,
                &line_material,
            );
            for position in markers {
                spawn_point_marker(
                    root,
                    position,
                    prefabs.point_marker.as_ref(),
                    settings.color(),
                    &mut mesh_assets,
                    &mut material_assets,
                );
            }
            if let Some(anchor) = angle {
                spawn_angle_marker(
                    root,
                    anchor,
                    prefabs.angle_marker.as_ref(),
                    &mut mesh_assets,
                    &mut material_assets,
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::measure::session::PointerInput;

    fn render_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<MeasureTool>()
            .init_resource::<MeasurementSettings>()
            .init_resource::<ResolvedPrefabs>()
            .add_systems(Update, update_measure_render);
        app
    }

    fn drive(app: &mut App, inputs: &[PointerInput]) {
        let mut tool = app.world_mut().resource_mut::<MeasureTool>();
        for input in inputs {
            tool.session.step(input);
        }
    }

    fn count<T: Component>(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<(), With<T>>()
            .iter(app.world())
            .count()
    }

    fn click(at: Vec3, angle_modifier: bool) -> [PointerInput; 2] {
        [
            PointerInput {
                pressed: true,
                held: true,
                angle_modifier,
                hit: Some(at),
                ..default()
            },
            PointerInput {
                released: true,
                hit: Some(at),
                ..default()
            },
        ]
    }

    #[test]
    fn test_angle_layout_ends_on_legs() {
        let prefab = AngleMarkerPrefab::default();
        let layout = AngleMarkerLayout::new(
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -3.0),
            &prefab,
        )
        .unwrap();

        assert_eq!(layout.arc.len(), prefab.arc_segments as usize + 1);
        assert!(layout.first_end.distance(Vec3::X * prefab.arc_radius) < 1e-4);
        assert!(layout.second_end.distance(Vec3::NEG_Z * prefab.arc_radius) < 1e-4);
    }

    #[test]
    fn test_angle_anchor_requires_completion_and_flag() {
        let complete = MeasurePhase::AngleComplete {
            start: Vec3::X,
            vertex: Vec3::ZERO,
            end: Vec3::Z,
        };
        assert!(angle_marker_anchor(&complete, true).is_some());
        assert!(angle_marker_anchor(&complete, false).is_none());
        let pending = MeasurePhase::VertexSet {
            start: Vec3::X,
            vertex: Vec3::ZERO,
            end: Vec3::Z,
        };
        assert!(angle_marker_anchor(&pending, true).is_none());
    }

    #[test]
    fn test_completed_distance_spawns_line_and_two_markers() {
        let mut app = render_app();
        let mut inputs = click(Vec3::ZERO, false).to_vec();
        inputs.extend(click(Vec3::new(2.0, 0.0, 0.0), false));
        drive(&mut app, &inputs);
        app.update();

        assert_eq!(count::<MeasureVisual>(&mut app), 1);
        assert_eq!(count::<MeasureLineSegment>(&mut app), 1);
        assert_eq!(count::<PointMarker>(&mut app), 2);
        assert_eq!(count::<AngleMarker>(&mut app), 0);
    }

    #[test]
    fn test_completed_angle_spawns_arc_from_prefab() {
        let mut app = render_app();
        app.world_mut().resource_mut::<ResolvedPrefabs>().angle_marker =
            Some(AngleMarkerPrefab::default());

        let mut inputs = vec![PointerInput {
            pressed: true,
            held: true,
            angle_modifier: true,
            hit: Some(Vec3::new(2.0, 0.0, 0.0)),
            ..default()
        }];
        inputs.push(PointerInput {
            released: true,
            hit: Some(Vec3::ZERO),
            ..default()
        });
        inputs.extend(click(Vec3::new(0.0, 0.0, 2.0), false));
        drive(&mut app, &inputs);
        app.update();

        assert_eq!(count::<PointMarker>(&mut app), 3);
        assert_eq!(count::<AngleMarker>(&mut app), 1);
        // Two legs plus the arc segments.
        let arc_segments = AngleMarkerPrefab::default().arc_segments as usize;
        assert_eq!(count::<MeasureLineSegment>(&mut app), 2 + arc_segments);
    }

    #[test]
    fn test_narrow_angle_keeps_every_arc_chord() {
        let mut app = render_app();
        app.world_mut().resource_mut::<ResolvedPrefabs>().angle_marker =
            Some(AngleMarkerPrefab::default());

        // Roughly two degrees between the legs.
        let end = Vec3::new(2.0, 0.0, 0.07);
        let mut inputs = vec![
            PointerInput {
                pressed: true,
                held: true,
                angle_modifier: true,
                hit: Some(Vec3::new(2.0, 0.0, 0.0)),
                ..default()
            },
            PointerInput {
                released: true,
                hit: Some(Vec3::ZERO),
                ..default()
            },
        ];
        inputs.extend(click(end, false));
        drive(&mut app, &inputs);
        app.update();

        let arc_segments = AngleMarkerPrefab::default().arc_segments as usize;
        assert_eq!(count::<MeasureLineSegment>(&mut app), 2 + arc_segments);
    }

    #[test]
    fn test_clearing_removes_visuals() {
        let mut app = render_app();
        drive(&mut app, &click(Vec3::ZERO, false));
        app.update();
        assert_eq!(count::<PointMarker>(&mut app), 1);

        app.world_mut().resource_mut::<MeasureTool>().session.clear();
        app.update();
        assert_eq!(count::<MeasureVisual>(&mut app), 0);
        assert_eq!(count::<PointMarker>(&mut app), 0);
    }
}
