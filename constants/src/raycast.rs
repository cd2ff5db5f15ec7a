/// Scene hits further than this from the camera are ignored.
pub const MAX_MEASUREMENT_DISTANCE: f32 = 1000.0;

/// Distance in front of the camera of the plane used when nothing is hit.
pub const FALLBACK_PLANE_DISTANCE: f32 = 10.0;

/// Bitmask selecting every measurable layer.
pub const ALL_LAYERS: u32 = u32::MAX;
