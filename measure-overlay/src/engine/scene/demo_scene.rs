use crate::tools::measure::picking::MeasureLayer;
use bevy::prelude::*;

/// Layer used for props in the demo scene; the ground stays on layer 0.
pub const PROP_LAYER: u8 = 1;

#[derive(Component)]
pub struct DemoProp;

pub fn spawn_demo_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(30.0, 30.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.32, 0.34, 0.36),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Name::new("Ground"),
    ));

    let props = [
        (Vec3::new(0.0, 0.5, 0.0), Vec3::splat(1.0), Color::srgb(0.75, 0.30, 0.25)),
        (Vec3::new(3.0, 1.0, -2.0), Vec3::new(1.0, 2.0, 1.0), Color::srgb(0.25, 0.55, 0.75)),
        (Vec3::new(-3.5, 0.75, 1.5), Vec3::new(2.0, 1.5, 0.5), Color::srgb(0.35, 0.70, 0.35)),
    ];
    for (i, (position, size, color)) in props.into_iter().enumerate() {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                ..default()
            })),
            Transform::from_translation(position),
            MeasureLayer(PROP_LAYER),
            DemoProp,
            Name::new(format!("Prop{i}")),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.75))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.85, 0.90),
            metallic: 0.3,
            ..default()
        })),
        Transform::from_xyz(1.5, 0.75, 3.0),
        MeasureLayer(PROP_LAYER),
        DemoProp,
        Name::new("PropSphere"),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}
