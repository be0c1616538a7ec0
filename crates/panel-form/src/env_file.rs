use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PanelError;
use crate::spec::FieldSpec;
use crate::spec::field::split_list;

/// Current values read from a `KEY=value` env file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvValues {
    values: BTreeMap<String, String>,
}

impl EnvValues {
    /// Parses env file content. Blank lines, `#` comments, lines without `=`
    /// and empty keys are skipped; keys and values are trimmed and later
    /// assignments win.
    pub fn parse(raw: &str) -> Self {
        let values = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { values }
    }

    /// Reads `path`; a missing file yields no values.
    pub fn load(path: &Path) -> Result<Self, PanelError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(Self::parse(&raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(PanelError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored value of `field`, or its schema default.
    pub fn value_for(&self, field: &FieldSpec) -> String {
        self.get(&field.name)
            .map(str::to_string)
            .unwrap_or_else(|| field.default.as_single())
    }

    /// Stored list of `field` split on commas, or its schema default.
    pub fn list_for(&self, field: &FieldSpec) -> Vec<String> {
        match self.get(&field.name) {
            Some(raw) => split_list(raw),
            None => field.default.as_many(),
        }
    }
}
