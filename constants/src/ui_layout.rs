/// Readout panel size in logical pixels.
pub const PANEL_WIDTH: f32 = 200.0;
pub const PANEL_HEIGHT: f32 = 100.0;

/// Gap between the cursor and the readout panel.
pub const CURSOR_OFFSET: f32 = 20.0;

pub const PANEL_BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
pub const TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const FONT_SIZE: f32 = 14.0;

/// Each text line occupies a fixed-height row inside the panel.
pub const TEXT_LINE_HEIGHT: f32 = 30.0;
pub const DISTANCE_TEXT_TOP: f32 = 10.0;
pub const ANGLE_TEXT_TOP: f32 = 40.0;
