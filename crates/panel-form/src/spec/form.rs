use std::collections::BTreeSet;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::spec::field::FieldSpec;

/// Titled group of fields rendered together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldGroup {
    pub title: String,
    pub fields: Vec<String>,
    /// Advanced groups are rendered inside the collapsible panel.
    #[serde(default)]
    pub advanced: bool,
}

/// Top-level panel form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormSchema {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<FieldGroup>,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields no group lists, in schema order.
    pub fn ungrouped(&self) -> Vec<&FieldSpec> {
        let grouped: BTreeSet<&str> = self
            .groups
            .iter()
            .flat_map(|group| group.fields.iter().map(String::as_str))
            .collect();
        self.fields
            .iter()
            .filter(|field| !grouped.contains(field.name.as_str()))
            .collect()
    }

    /// Checks names are unique and every condition and group refers to a
    /// known field.
    pub fn check(&self) -> Result<(), PanelError> {
        let mut names = BTreeSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(PanelError::DuplicateField(field.name.clone()));
            }
        }
        for field in &self.fields {
            if let Some(condition) = &field.condition
                && !names.contains(condition.field.as_str())
            {
                return Err(PanelError::UnknownConditionField {
                    field: field.name.clone(),
                    target: condition.field.clone(),
                });
            }
        }
        for group in &self.groups {
            if let Some(missing) = group
                .fields
                .iter()
                .find(|name| !names.contains(name.as_str()))
            {
                return Err(PanelError::UnknownGroupField {
                    group: group.title.clone(),
                    field: missing.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, PanelError> {
        let schema: Self = serde_json::from_str(raw)?;
        schema.check()?;
        Ok(schema)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, PanelError> {
        let schema: Self = toml::from_str(raw)?;
        schema.check()?;
        Ok(schema)
    }

    /// Loads a schema from a `.toml` file, or JSON for any other extension.
    pub fn load(path: &Path) -> Result<Self, PanelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PanelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&raw),
            _ => Self::from_json_str(&raw),
        }
    }
}
