use super::error::{AuthoringError, AuthoringResult};
use super::wiring::{load_or_default_profile, save_profile, wire_defaults};
use crate::engine::assets::prefab::{MeasurementPrefab, PrefabSlot};
use crate::engine::assets::profile::MeasurementProfile;
use constants::asset_paths::PROFILE_PATH;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `value` as pretty JSON, creating missing parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> AuthoringResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AuthoringError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| AuthoringError::json(path, e))?;
    fs::write(path, json).map_err(|e| AuthoringError::io(path, e))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> AuthoringResult<T> {
    let text = fs::read_to_string(path).map_err(|e| AuthoringError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| AuthoringError::json(path, e))
}

/// Write the built-in prefab for `slot` to its default location under `root`.
pub fn create_prefab(root: &Path, slot: PrefabSlot) -> AuthoringResult<PathBuf> {
    let path = root.join(slot.default_path());
    write_json(&path, &slot.default_prefab())?;
    Ok(path)
}

/// Yellow emissive sphere, radius 0.05.
pub fn create_point_marker(root: &Path) -> AuthoringResult<PathBuf> {
    create_prefab(root, PrefabSlot::PointMarker)
}

/// Orange 20-segment arc of radius 0.2 with two end spheres.
pub fn create_angle_marker(root: &Path) -> AuthoringResult<PathBuf> {
    create_prefab(root, PrefabSlot::AngleMarker)
}

/// 200x100 translucent panel with distance and angle lines.
pub fn create_readout_panel(root: &Path) -> AuthoringResult<PathBuf> {
    create_prefab(root, PrefabSlot::ReadoutPanel)
}

pub fn load_prefab(path: &Path) -> AuthoringResult<MeasurementPrefab> {
    read_json(path)
}

/// Write any missing default prefab and wire all three into the profile.
///
/// Prefab files that already exist are kept as they are, and so are the
/// settings of an existing profile.
pub fn add_measurement_tool(root: &Path) -> AuthoringResult<MeasurementProfile> {
    for slot in PrefabSlot::ALL {
        let path = root.join(slot.default_path());
        if path.is_file() {
            println!("Keeping existing {} prefab at {}", slot.profile_field(), path.display());
        } else {
            create_prefab(root, slot)?;
            println!("Created {} prefab at {}", slot.profile_field(), path.display());
        }
    }
    let profile_path = root.join(PROFILE_PATH);
    let mut profile = load_or_default_profile(&profile_path)?;
    wire_defaults(root, &mut profile)?;
    save_profile(&profile_path, &profile)?;
    Ok(profile)
}
