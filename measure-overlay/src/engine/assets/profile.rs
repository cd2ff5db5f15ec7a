use bevy::prelude::*;
use constants::raycast::{ALL_LAYERS, FALLBACK_PLANE_DISTANCE, MAX_MEASUREMENT_DISTANCE};
use constants::render_settings::{DRAW_LINE_WIDTH, MEASUREMENT_COLOR};
use constants::ui_layout::CURSOR_OFFSET;
use serde::{Deserialize, Serialize};

/// Tunables of the measurement tool.
#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct MeasurementSettings {
    /// Key that toggles the tool on and off.
    pub toggle_key: KeyCode,
    /// Linear RGBA colour of lines and fallback markers.
    pub measurement_color: [f32; 4],
    /// Width of measurement lines in world units.
    pub line_width: f32,
    /// Bitmask of layers the cursor ray can hit.
    pub measurable_layers: u32,
    pub show_angle_arc: bool,
    pub max_measurement_distance: f32,
    pub fallback_plane_distance: f32,
    /// Gap in logical pixels between the cursor and the readout panel.
    pub cursor_offset: f32,
    /// Enable the tool as soon as the profile has loaded.
    pub start_active: bool,
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self {
            toggle_key: KeyCode::KeyM,
            measurement_color: MEASUREMENT_COLOR,
            line_width: DRAW_LINE_WIDTH,
            measurable_layers: ALL_LAYERS,
            show_angle_arc: true,
            max_measurement_distance: MAX_MEASUREMENT_DISTANCE,
            fallback_plane_distance: FALLBACK_PLANE_DISTANCE,
            cursor_offset: CURSOR_OFFSET,
            start_active: false,
        }
    }
}

impl MeasurementSettings {
    pub fn color(&self) -> Color {
        rgba(self.measurement_color)
    }
}

/// Settings plus the prefabs wired into the tool, loaded from `*.profile.json`.
#[derive(Asset, Debug, Clone, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementProfile {
    pub settings: MeasurementSettings,
    /// Asset paths of prefab files; `None` selects the built-in fallback.
    pub ui_prefab: Option<String>,
    pub point_marker_prefab: Option<String>,
    pub angle_marker_prefab: Option<String>,
}

/// Short display name of a key, `M` for `KeyCode::KeyM` and `1` for `KeyCode::Digit1`.
pub fn key_label(key: KeyCode) -> String {
    let name = format!("{key:?}");
    name.strip_prefix("Key")
        .or_else(|| name.strip_prefix("Digit"))
        .unwrap_or(&name)
        .to_string()
}

pub fn rgba(c: [f32; 4]) -> Color {
    Color::linear_rgba(c[0], c[1], c[2], c[3])
}
