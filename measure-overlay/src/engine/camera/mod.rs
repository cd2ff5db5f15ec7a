//! Viewport camera for scene navigation.
//!
//! Right-drag to look around, WASD/QE to fly, scroll to dolly along the view.

/// Viewport camera resource and controller system.
pub mod viewport_camera;
