use super::error::{AuthoringError, AuthoringResult};
use super::prefabs::{load_prefab, read_json, write_json};
use crate::engine::assets::prefab::PrefabSlot;
use crate::engine::assets::profile::{MeasurementProfile, MeasurementSettings};
use bevy::reflect::{GetPath, Struct};
use std::path::Path;

pub fn load_profile(path: &Path) -> AuthoringResult<MeasurementProfile> {
    read_json(path)
}

/// Load the profile at `path`, or start from defaults when the file does not exist yet.
pub fn load_or_default_profile(path: &Path) -> AuthoringResult<MeasurementProfile> {
    if path.exists() {
        load_profile(path)
    } else {
        Ok(MeasurementProfile::default())
    }
}

pub fn save_profile(path: &Path, profile: &MeasurementProfile) -> AuthoringResult<()> {
    write_json(path, profile)
}

/// Set the prefab path held by the profile field named `field`.
pub fn wire_prefab(profile: &mut MeasurementProfile, field: &str, path: &str) -> AuthoringResult<()> {
    if PrefabSlot::from_profile_field(field).is_none() {
        return Err(AuthoringError::unknown_field(field));
    }
    let slot = profile
        .path_mut::<Option<String>>(field)
        .map_err(|_| AuthoringError::unknown_field(field))?;
    *slot = Some(path.to_string());
    Ok(())
}

/// Like [`wire_prefab`], but first checks that the prefab file under `root`
/// describes the kind the field expects.
pub fn wire_prefab_checked(
    root: &Path,
    profile: &mut MeasurementProfile,
    field: &str,
    path: &str,
) -> AuthoringResult<()> {
    let slot =
        PrefabSlot::from_profile_field(field).ok_or_else(|| AuthoringError::unknown_field(field))?;
    let prefab = load_prefab(&root.join(path))?;
    if !slot.accepts(&prefab) {
        return Err(AuthoringError::WrongPrefabKind {
            path: path.to_string(),
            field: slot.profile_field(),
            expected: slot.default_prefab().kind_name(),
            found: prefab.kind_name(),
        });
    }
    wire_prefab(profile, field, path)
}

/// Wire every slot whose prefab already exists at its default path under `root`.
///
/// Missing files are skipped and leave the field untouched. Returns the slots
/// that were wired.
pub fn wire_defaults(
    root: &Path,
    profile: &mut MeasurementProfile,
) -> AuthoringResult<Vec<PrefabSlot>> {
    let mut wired = Vec::new();
    for slot in PrefabSlot::ALL {
        if !root.join(slot.default_path()).is_file() {
            continue;
        }
        wire_prefab_checked(root, profile, slot.profile_field(), slot.default_path())?;
        wired.push(slot);
    }
    Ok(wired)
}

/// Restore toggle key `M`, yellow lines, default width and all layers.
pub fn reset_settings(profile: &mut MeasurementProfile) {
    profile.settings = MeasurementSettings::default();
}

/// Settings field names and their values, in declaration order.
pub fn inspect(profile: &MeasurementProfile) -> Vec<(String, String)> {
    let settings = &profile.settings;
    (0..settings.field_len())
        .filter_map(|i| {
            let name = settings.name_at(i)?;
            let value = settings.field_at(i)?;
            Some((name.to_string(), format!("{value:?}")))
        })
        .collect()
}

/// Prefab fields of the profile with their wired paths.
pub fn wired_fields(profile: &MeasurementProfile) -> Vec<(&'static str, Option<String>)> {
    PrefabSlot::ALL
        .into_iter()
        .map(|slot| {
            let path = profile
                .path::<Option<String>>(slot.profile_field())
                .ok()
                .and_then(|path| path.clone());
            (slot.profile_field(), path)
        })
        .collect()
}
