//! Shared constants for the measurement overlay and its authoring tools.

/// Asset paths for the measurement profile and generated prefabs.
pub mod asset_paths;

/// Line, marker, arc and colour defaults for overlay visuals.
pub mod render_settings;

/// Readout panel geometry and typography.
pub mod ui_layout;

/// Cursor ray casting limits.
pub mod raycast;
