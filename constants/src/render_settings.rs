/// Default width of measurement line segments in world units.
pub const DRAW_LINE_WIDTH: f32 = 0.04;

/// Measurement lines shorter than this are not drawn, and a drag shorter than
/// this anchors the start point instead of completing a distance.
pub const MIN_SEGMENT_LENGTH: f32 = 0.02;

/// Radius of the fallback sphere used when no point marker prefab is wired.
pub const FALLBACK_MARKER_RADIUS: f32 = 0.05;

/// Point marker prefab defaults.
pub const POINT_MARKER_RADIUS: f32 = 0.05;
pub const POINT_MARKER_EMISSIVE_STRENGTH: f32 = 0.5;

/// Angle marker prefab defaults.
pub const ANGLE_ARC_RADIUS: f32 = 0.2;
pub const ANGLE_ARC_SEGMENTS: u32 = 20;
pub const ANGLE_ARC_LINE_WIDTH: f32 = 0.02;
pub const ANGLE_ENDPOINT_RADIUS: f32 = 0.025;
pub const ANGLE_MARKER_EMISSIVE_STRENGTH: f32 = 0.5;

/// Linear RGBA colours stored as plain arrays so they serialise cleanly.
pub const MEASUREMENT_COLOR: [f32; 4] = [1.0, 0.92, 0.016, 1.0];
pub const ANGLE_ARC_COLOR: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
