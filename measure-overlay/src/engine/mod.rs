//! Host application: window, camera, demo scene and measurement assets.

/// Measurement profile and prefab assets with startup loading.
pub mod assets;

/// Viewport camera navigation.
pub mod camera;

/// App construction, states and window configuration.
pub mod core;

/// Demo scene with measurable geometry.
pub mod scene;
