//! Demo scene providing geometry to measure against.

/// Ground, props and lighting.
pub mod demo_scene;
