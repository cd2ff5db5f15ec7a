//! Generation and wiring of measurement prefabs and profiles.
//!
//! Prefabs are written under `<root>/measurement/prefabs/` and referenced from
//! the profile by asset-relative path, so `<root>` is normally the app's
//! `assets/` directory. Profile fields are addressed by name through
//! reflection; see [`wiring::wire_prefab`].

pub mod error;

/// Default prefab files and the one-shot tool setup.
pub mod prefabs;

/// Profile loading, saving, reflection-based wiring and inspection.
pub mod wiring;

pub use error::{AuthoringError, AuthoringResult};
