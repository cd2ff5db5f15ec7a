use bevy::prelude::*;

const DIRECTION_EPSILON: f32 = 1e-6;

pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

/// Unsigned angle between two directions in degrees.
/// Returns 0 when either direction is degenerate.
pub fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < DIRECTION_EPSILON {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Angle at `vertex` formed by the legs toward `start` and `end`.
pub fn vertex_angle_degrees(start: Vec3, vertex: Vec3, end: Vec3) -> f32 {
    angle_degrees(start - vertex, end - vertex)
}

/// Points of an arc around `vertex`, sweeping from `toward_first` to `toward_second`.
///
/// Returns `segments + 1` points, or nothing when either direction is degenerate.
pub fn arc_points(
    vertex: Vec3,
    toward_first: Vec3,
    toward_second: Vec3,
    radius: f32,
    segments: u32,
) -> Vec<Vec3> {
    let (Some(first), Some(second)) = (
        toward_first.try_normalize(),
        toward_second.try_normalize(),
    ) else {
        return Vec::new();
    };
    let segments = segments.max(1);
    let sweep = Quat::from_rotation_arc(first, second);

    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            vertex + Quat::IDENTITY.slerp(sweep, t) * first * radius
        })
        .collect()
}

/// Placement of a thin box spanning `a` to `b`, aligned along its local X axis.
///
/// Returns the transform and the segment length, or `None` when the segment is
/// not longer than `min_length`. Zero-length segments are always rejected.
pub fn segment_transform(a: Vec3, b: Vec3, min_length: f32) -> Option<(Transform, f32)> {
    let dir = b - a;
    let length = dir.length();
    if length <= min_length.max(0.0) || length <= f32::EPSILON {
        return None;
    }
    let midpoint = (a + b) * 0.5;
    let rotation = Quat::from_rotation_arc(Vec3::X, dir / length);
    Some((
        Transform::from_translation(midpoint).with_rotation(rotation),
        length,
    ))
}

pub fn format_distance(distance: f32) -> String {
    format!("Distance: {distance:.2} units")
}

pub fn format_angle(degrees: f32) -> String {
    format!("Angle: {degrees:.1}°")
}

pub fn format_legs(first: f32, second: Option<f32>) -> String {
    match second {
        Some(second) => format!("A to B: {first:.2}\nB to C: {second:.2}"),
        None => format!("A to B: {first:.2}"),
    }
}
