use crate::engine::assets::profile::MeasurementSettings;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;

/// Layer an entity is measured on. Entities without it are on layer 0.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct MeasureLayer(pub u8);

/// Tags every entity spawned by the overlay so cursor rays pass through it.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MeasureOverlay;

pub fn layer_matches(mask: u32, layer: u8) -> bool {
    layer < 32 && mask & (1u32 << layer) != 0
}

/// Intersection with the plane facing the camera `distance` units ahead of it.
pub fn fallback_plane_point(
    ray: Ray3d,
    camera_position: Vec3,
    camera_forward: Dir3,
    distance: f32,
) -> Option<Vec3> {
    let plane_origin = camera_position + *camera_forward * distance;
    let t = ray.intersect_plane(plane_origin, InfinitePlane3d::new(camera_forward))?;
    Some(ray.get_point(t))
}

/// World point under the cursor: nearest measurable mesh within range,
/// otherwise the camera-facing fallback plane.
pub fn cursor_world_point(
    ray_cast: &mut MeshRayCast,
    ray: Ray3d,
    camera_transform: &GlobalTransform,
    settings: &MeasurementSettings,
    layers: &Query<&MeasureLayer>,
    overlay: &Query<(), With<MeasureOverlay>>,
) -> Option<Vec3> {
    let mask = settings.measurable_layers;
    let filter = |entity: Entity| {
        !overlay.contains(entity)
            && layer_matches(mask, layers.get(entity).map_or(0, |layer| layer.0))
    };
    let cast_settings = MeshRayCastSettings::default().with_filter(&filter);

    let scene_hit = ray_cast
        .cast_ray(ray, &cast_settings)
        .iter()
        .find(|(_, hit)| hit.distance <= settings.max_measurement_distance)
        .map(|(_, hit)| hit.point);

    scene_hit.or_else(|| {
        fallback_plane_point(
            ray,
            camera_transform.translation(),
            camera_transform.forward(),
            settings.fallback_plane_distance,
        )
    })
}
