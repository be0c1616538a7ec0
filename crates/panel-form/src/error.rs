use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid schema json: {0}")]
    SchemaJson(#[from] serde_json::Error),
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("field '{field}' has a condition on unknown field '{target}'")]
    UnknownConditionField { field: String, target: String },
    #[error("group '{group}' lists unknown field '{field}'")]
    UnknownGroupField { group: String, field: String },
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),
    #[error("no element named '{0}'")]
    UnknownElement(String),
}
