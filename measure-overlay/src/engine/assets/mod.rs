//! Measurement profile and prefab assets.
//!
//! A profile (`*.profile.json`) carries the tool settings and the asset paths
//! of the prefabs wired into it. Prefabs (`*.prefab.json`) describe how a point
//! marker, an angle marker or the readout panel is built. Both are plain JSON
//! assets loaded through `bevy_common_assets`.
//!
//! ```text
//! MeasurementTool.profile.json
//!   ├─> settings              -> MeasurementSettings resource
//!   ├─> ui_prefab             -> ResolvedPrefabs.readout_panel
//!   ├─> point_marker_prefab   -> ResolvedPrefabs.point_marker
//!   └─> angle_marker_prefab   -> ResolvedPrefabs.angle_marker
//! ```
//!
//! Missing profiles and prefabs are not fatal: the tool falls back to
//! built-in defaults and logs a warning.

/// Startup loading of the profile and the prefabs it references.
pub mod loader;

/// Prefab descriptions and the profile slots they fill.
pub mod prefab;

/// Tool settings and the profile asset.
pub mod profile;
