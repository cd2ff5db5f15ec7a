//! Error types for prefab authoring.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for authoring operations.
pub type AuthoringResult<T> = Result<T, AuthoringError>;

/// Errors that can occur while generating or wiring measurement assets.
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// Reading or writing an asset file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An asset file is not valid JSON for its type.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The profile has no prefab field with this name.
    #[error("profile has no prefab field `{0}`")]
    UnknownField(String),

    /// The prefab file describes a different kind than the field expects.
    #[error("{path} is a {found} prefab, `{field}` expects {expected}")]
    WrongPrefabKind {
        path: String,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl AuthoringError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthoringError::unknown_field("line_width");
        assert!(format!("{err}").contains("line_width"));

        let err = AuthoringError::io(
            "prefabs/PointMarker.prefab.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(format!("{err}").contains("PointMarker.prefab.json"));

        let err = AuthoringError::WrongPrefabKind {
            path: "a.prefab.json".into(),
            field: "ui_prefab",
            expected: "readout_panel",
            found: "point_marker",
        };
        assert!(format!("{err}").contains("point_marker"));
    }
}
