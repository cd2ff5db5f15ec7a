use super::prefab::{
    AngleMarkerPrefab, MeasurementPrefab, PointMarkerPrefab, PrefabSlot, ReadoutPanelPrefab,
};
use super::profile::{MeasurementProfile, MeasurementSettings};
use crate::engine::core::app_state::AppState;
use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::reflect::GetPath;
use constants::asset_paths::PROFILE_PATH;

/// Prefabs wired by the active profile. `None` selects the built-in fallback.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ResolvedPrefabs {
    pub readout_panel: Option<ReadoutPanelPrefab>,
    pub point_marker: Option<PointMarkerPrefab>,
    pub angle_marker: Option<AngleMarkerPrefab>,
}

impl ResolvedPrefabs {
    /// Store `prefab` in `slot`. Returns `false` when the prefab kind does not fit the slot.
    pub fn assign(&mut self, slot: PrefabSlot, prefab: &MeasurementPrefab) -> bool {
        match (slot, prefab) {
            (PrefabSlot::ReadoutPanel, MeasurementPrefab::ReadoutPanel(p)) => {
                self.readout_panel = Some(p.clone());
            }
            (PrefabSlot::PointMarker, MeasurementPrefab::PointMarker(p)) => {
                self.point_marker = Some(p.clone());
            }
            (PrefabSlot::AngleMarker, MeasurementPrefab::AngleMarker(p)) => {
                self.angle_marker = Some(p.clone());
            }
            _ => return false,
        }
        true
    }
}

#[derive(Debug)]
struct PendingPrefab {
    slot: PrefabSlot,
    path: String,
    handle: Handle<MeasurementPrefab>,
}

/// Tracks the profile and prefab loads issued at startup.
#[derive(Resource, Default)]
pub struct ProfileLoader {
    profile: Option<Handle<MeasurementProfile>>,
    profile_resolved: bool,
    pending: Vec<PendingPrefab>,
}

impl ProfileLoader {
    pub fn is_finished(&self) -> bool {
        self.profile_resolved && self.pending.is_empty()
    }
}

/// Prefab paths a profile wires, read through reflection by field name.
pub fn wired_prefab_paths(profile: &MeasurementProfile) -> Vec<(PrefabSlot, String)> {
    PrefabSlot::ALL
        .into_iter()
        .filter_map(|slot| {
            profile
                .path::<Option<String>>(slot.profile_field())
                .ok()
                .and_then(|path| path.clone())
                .map(|path| (slot, path))
        })
        .collect()
}

pub fn start_profile_loading(mut loader: ResMut<ProfileLoader>, asset_server: Res<AssetServer>) {
    loader.profile = Some(asset_server.load(PROFILE_PATH));
}

/// Apply the profile's settings once loaded and request its prefabs.
pub fn resolve_profile_system(
    mut loader: ResMut<ProfileLoader>,
    mut settings: ResMut<MeasurementSettings>,
    asset_server: Res<AssetServer>,
    profiles: Res<Assets<MeasurementProfile>>,
) {
    if loader.profile_resolved {
        return;
    }
    let Some(handle) = loader.profile.clone() else {
        return;
    };

    if let Some(profile) = profiles.get(&handle) {
        *settings = profile.settings.clone();
        let requests = wired_prefab_paths(profile);
        for (slot, path) in requests {
            let handle = asset_server.load(path.clone());
            loader.pending.push(PendingPrefab { slot, path, handle });
        }
        loader.profile_resolved = true;
        info!("Measurement profile loaded from {}", PROFILE_PATH);
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
        warn!(
            "Measurement profile {} failed to load ({}), using built-in defaults",
            PROFILE_PATH, err
        );
        loader.profile_resolved = true;
    }
}

/// Move loaded prefabs into [`ResolvedPrefabs`]; failures fall back to built-ins.
pub fn resolve_prefabs_system(
    mut loader: ResMut<ProfileLoader>,
    mut resolved: ResMut<ResolvedPrefabs>,
    asset_server: Res<AssetServer>,
    prefabs: Res<Assets<MeasurementPrefab>>,
) {
    if loader.pending.is_empty() {
        return;
    }

    loader.pending.retain(|pending| {
        if let Some(prefab) = prefabs.get(&pending.handle) {
            if resolved.assign(pending.slot, prefab) {
                info!("Wired {} prefab from {}", prefab.kind_name(), pending.path);
            } else {
                warn!(
                    "Prefab {} is a {}, which cannot fill `{}`",
                    pending.path,
                    prefab.kind_name(),
                    pending.slot.profile_field()
                );
            }
            return false;
        }
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(pending.handle.id()) {
            warn!("Prefab {} failed to load ({}), using fallback", pending.path, err);
            return false;
        }
        true
    });
}

pub fn transition_to_running(
    loader: Res<ProfileLoader>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loader.is_finished() {
        info!("Measurement assets resolved, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetMetaCheck;
    use bevy::state::app::StatesPlugin;
    use bevy_common_assets::json::JsonAssetPlugin;
    use constants::asset_paths::{PREFAB_EXTENSION, PROFILE_EXTENSION};
    use std::time::Duration;

    fn loading_app(asset_root: &str) -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin {
                file_path: asset_root.to_string(),
                meta_check: AssetMetaCheck::Never,
                ..default()
            },
            StatesPlugin,
            JsonAssetPlugin::<MeasurementProfile>::new(&[PROFILE_EXTENSION]),
            JsonAssetPlugin::<MeasurementPrefab>::new(&[PREFAB_EXTENSION]),
        ))
        .init_state::<AppState>()
        .init_resource::<MeasurementSettings>()
        .init_resource::<ResolvedPrefabs>()
        .init_resource::<ProfileLoader>()
        .add_systems(Startup, start_profile_loading)
        .add_systems(
            Update,
            (
                resolve_profile_system,
                resolve_prefabs_system,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );
        app
    }

    /// Update until the app reaches `Running`, giving asset IO time to finish.
    fn run_until_running(app: &mut App) -> bool {
        for _ in 0..500 {
            app.update();
            if *app.world().resource::<State<AppState>>().get() == AppState::Running {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_missing_profile_falls_back_to_defaults() {
        let mut app = loading_app("no-such-asset-root");
        app.world_mut()
            .resource_mut::<MeasurementSettings>()
            .line_width = 0.5;

        assert!(run_until_running(&mut app));
        // A failed profile leaves whatever settings were in place.
        assert_eq!(app.world().resource::<MeasurementSettings>().line_width, 0.5);
        assert_eq!(
            *app.world().resource::<ResolvedPrefabs>(),
            ResolvedPrefabs::default()
        );
    }

    #[test]
    fn test_shipped_profile_loads_and_wires_prefabs() {
        let mut app = loading_app("assets");

        assert!(run_until_running(&mut app));
        assert!(app.world().resource::<ProfileLoader>().is_finished());
        let resolved = app.world().resource::<ResolvedPrefabs>();
        assert_eq!(resolved.point_marker, Some(PointMarkerPrefab::default()));
        assert_eq!(resolved.angle_marker, Some(AngleMarkerPrefab::default()));
        assert_eq!(resolved.readout_panel, Some(ReadoutPanelPrefab::default()));
        assert_eq!(
            *app.world().resource::<MeasurementSettings>(),
            MeasurementSettings::default()
        );
    }

    #[test]
    fn test_wired_prefab_paths_reads_set_fields() {
        let profile = MeasurementProfile {
            point_marker_prefab: Some("p.prefab.json".into()),
            angle_marker_prefab: Some("a.prefab.json".into()),
            ..default()
        };
        assert_eq!(
            wired_prefab_paths(&profile),
            vec![
                (PrefabSlot::PointMarker, "p.prefab.json".to_string()),
                (PrefabSlot::AngleMarker, "a.prefab.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_assign_rejects_mismatched_kind() {
        let mut resolved = ResolvedPrefabs::default();
        assert!(!resolved.assign(
            PrefabSlot::ReadoutPanel,
            &PrefabSlot::PointMarker.default_prefab()
        ));
        assert_eq!(resolved, ResolvedPrefabs::default());

        assert!(resolved.assign(
            PrefabSlot::AngleMarker,
            &PrefabSlot::AngleMarker.default_prefab()
        ));
        assert_eq!(resolved.angle_marker, Some(AngleMarkerPrefab::default()));
    }

    #[test]
    fn test_loader_without_profile_is_not_finished() {
        let loader = ProfileLoader::default();
        assert!(!loader.is_finished());
    }
}
