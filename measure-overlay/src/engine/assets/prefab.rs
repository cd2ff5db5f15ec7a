use bevy::prelude::*;
use constants::asset_paths::{
    ANGLE_MARKER_PREFAB_PATH, POINT_MARKER_PREFAB_PATH, READOUT_PANEL_PREFAB_PATH,
};
use constants::render_settings::{
    ANGLE_ARC_COLOR, ANGLE_ARC_LINE_WIDTH, ANGLE_ARC_RADIUS, ANGLE_ARC_SEGMENTS,
    ANGLE_ENDPOINT_RADIUS, ANGLE_MARKER_EMISSIVE_STRENGTH, MEASUREMENT_COLOR,
    POINT_MARKER_EMISSIVE_STRENGTH, POINT_MARKER_RADIUS,
};
use constants::ui_layout::{
    ANGLE_TEXT_TOP, DISTANCE_TEXT_TOP, FONT_SIZE, PANEL_BACKGROUND, PANEL_HEIGHT, PANEL_WIDTH,
    TEXT_COLOR, TEXT_LINE_HEIGHT,
};
use serde::{Deserialize, Serialize};

/// Prefab file contents, tagged by `kind`.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementPrefab {
    PointMarker(PointMarkerPrefab),
    AngleMarker(AngleMarkerPrefab),
    ReadoutPanel(ReadoutPanelPrefab),
}

impl MeasurementPrefab {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::PointMarker(_) => "point_marker",
            Self::AngleMarker(_) => "angle_marker",
            Self::ReadoutPanel(_) => "readout_panel",
        }
    }
}

/// Profile field a prefab is wired into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefabSlot {
    ReadoutPanel,
    PointMarker,
    AngleMarker,
}

impl PrefabSlot {
    pub const ALL: [Self; 3] = [Self::ReadoutPanel, Self::PointMarker, Self::AngleMarker];

    /// Name of the `MeasurementProfile` field holding this slot's prefab path.
    pub fn profile_field(self) -> &'static str {
        match self {
            Self::ReadoutPanel => "ui_prefab",
            Self::PointMarker => "point_marker_prefab",
            Self::AngleMarker => "angle_marker_prefab",
        }
    }

    pub fn from_profile_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.profile_field() == field)
    }

    pub fn default_path(self) -> &'static str {
        match self {
            Self::ReadoutPanel => READOUT_PANEL_PREFAB_PATH,
            Self::PointMarker => POINT_MARKER_PREFAB_PATH,
            Self::AngleMarker => ANGLE_MARKER_PREFAB_PATH,
        }
    }

    pub fn default_prefab(self) -> MeasurementPrefab {
        match self {
            Self::ReadoutPanel => MeasurementPrefab::ReadoutPanel(ReadoutPanelPrefab::default()),
            Self::PointMarker => MeasurementPrefab::PointMarker(PointMarkerPrefab::default()),
            Self::AngleMarker => MeasurementPrefab::AngleMarker(AngleMarkerPrefab::default()),
        }
    }

    pub fn accepts(self, prefab: &MeasurementPrefab) -> bool {
        matches!(
            (self, prefab),
            (Self::ReadoutPanel, MeasurementPrefab::ReadoutPanel(_))
                | (Self::PointMarker, MeasurementPrefab::PointMarker(_))
                | (Self::AngleMarker, MeasurementPrefab::AngleMarker(_))
        )
    }
}

/// Emissive sphere placed at each measured point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointMarkerPrefab {
    pub name: String,
    pub radius: f32,
    pub color: [f32; 4],
    /// Emission as a fraction of `color`.
    pub emissive_strength: f32,
}

impl Default for PointMarkerPrefab {
    fn default() -> Self {
        Self {
            name: "PointMarker".into(),
            radius: POINT_MARKER_RADIUS,
            color: MEASUREMENT_COLOR,
            emissive_strength: POINT_MARKER_EMISSIVE_STRENGTH,
        }
    }
}

/// Arc drawn at the vertex of an angle measurement, capped by two small spheres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleMarkerPrefab {
    pub name: String,
    pub arc_radius: f32,
    pub arc_segments: u32,
    pub line_width: f32,
    pub endpoint_radius: f32,
    pub color: [f32; 4],
    pub emissive_strength: f32,
}

impl Default for AngleMarkerPrefab {
    fn default() -> Self {
        Self {
            name: "AngleMarker".into(),
            arc_radius: ANGLE_ARC_RADIUS,
            arc_segments: ANGLE_ARC_SEGMENTS,
            line_width: ANGLE_ARC_LINE_WIDTH,
            endpoint_radius: ANGLE_ENDPOINT_RADIUS,
            color: ANGLE_ARC_COLOR,
            emissive_strength: ANGLE_MARKER_EMISSIVE_STRENGTH,
        }
    }
}

/// One row of text inside the readout panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSlot {
    pub name: String,
    pub top: f32,
    pub height: f32,
    pub placeholder: String,
}

/// Floating panel showing distance and angle text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadoutPanelPrefab {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub background: [f32; 4],
    pub font_size: f32,
    pub text_color: [f32; 4],
    pub distance_text: TextSlot,
    pub angle_text: TextSlot,
}

impl Default for ReadoutPanelPrefab {
    fn default() -> Self {
        Self {
            name: "MeasurementUI".into(),
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            background: PANEL_BACKGROUND,
            font_size: FONT_SIZE,
            text_color: TEXT_COLOR,
            distance_text: TextSlot {
                name: "DistanceText".into(),
                top: DISTANCE_TEXT_TOP,
                height: TEXT_LINE_HEIGHT,
                placeholder: "Distance: 0 units".into(),
            },
            angle_text: TextSlot {
                name: "AngleText".into(),
                top: ANGLE_TEXT_TOP,
                height: TEXT_LINE_HEIGHT,
                placeholder: "Angle: 0°".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefab_tagged_by_kind() {
        let json = serde_json::to_value(MeasurementPrefab::PointMarker(
            PointMarkerPrefab::default(),
        ))
        .unwrap();
        assert_eq!(json["kind"], "point_marker");
        assert_eq!(json["name"], "PointMarker");
    }

    #[test]
    fn test_slots_accept_only_their_kind() {
        for slot in PrefabSlot::ALL {
            assert!(slot.accepts(&slot.default_prefab()));
            assert_eq!(PrefabSlot::from_profile_field(slot.profile_field()), Some(slot));
        }
        assert!(!PrefabSlot::PointMarker.accepts(&PrefabSlot::AngleMarker.default_prefab()));
        assert_eq!(PrefabSlot::from_profile_field("line_width"), None);
    }

    #[test]
    fn test_partial_prefab_fills_defaults() {
        let prefab: MeasurementPrefab =
            serde_json::from_str(r#"{ "kind": "angle_marker", "arc_radius": 0.5 }"#).unwrap();
        match prefab {
            MeasurementPrefab::AngleMarker(angle) => {
                assert_eq!(angle.arc_radius, 0.5);
                assert_eq!(angle.arc_segments, ANGLE_ARC_SEGMENTS);
                assert_eq!(angle.name, "AngleMarker");
            }
            other => panic!("unexpected prefab {}", other.kind_name()),
        }
    }
}
