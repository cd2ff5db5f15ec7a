use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the measurement profile and its prefabs.
    #[default]
    Loading,
    Running,
}
