//! Core application setup and state management.
//!
//! Handles window configuration, plugin initialisation and the loading to
//! running transition.

/// Application setup and plugin configuration for the Bevy engine.
pub mod app_setup;

/// Application state machine.
pub mod app_state;

/// Primary window configuration.
pub mod window_config;
