/// Paths relative to the asset root.
pub const PROFILE_PATH: &str = "measurement/MeasurementTool.profile.json";
pub const POINT_MARKER_PREFAB_PATH: &str = "measurement/prefabs/PointMarker.prefab.json";
pub const ANGLE_MARKER_PREFAB_PATH: &str = "measurement/prefabs/AngleMarker.prefab.json";
pub const READOUT_PANEL_PREFAB_PATH: &str = "measurement/prefabs/MeasurementToolUI.prefab.json";

/// Multi-part extensions registered with the JSON asset loaders.
pub const PROFILE_EXTENSION: &str = "profile.json";
pub const PREFAB_EXTENSION: &str = "prefab.json";
