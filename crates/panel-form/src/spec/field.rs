use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported field widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Password,
    Select,
    /// Select with preset options plus a free-text custom value.
    SelectCustom,
    /// On/off switch submitting `on_value` or `off_value`.
    Toggle,
    /// Set of checkboxes, one per option.
    Checkbox,
}

/// Default value of a field; checkbox sets default to a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldDefault {
    Single(String),
    Many(Vec<String>),
}

impl Default for FieldDefault {
    fn default() -> Self {
        FieldDefault::Single(String::new())
    }
}

impl FieldDefault {
    pub fn as_single(&self) -> String {
        match self {
            FieldDefault::Single(value) => value.clone(),
            FieldDefault::Many(values) => values.join(","),
        }
    }

    pub fn as_many(&self) -> Vec<String> {
        match self {
            FieldDefault::Single(value) => split_list(value),
            FieldDefault::Many(values) => values.clone(),
        }
    }
}

/// Visibility condition: the field shows when `field` currently equals `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub field: String,
    pub value: String,
}

/// Definition of a single configuration field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub default: FieldDefault,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: FieldDefault::default(),
            options: Vec::new(),
            on_value: None,
            off_value: None,
            placeholder: None,
            comment: None,
            condition: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = FieldDefault::Single(default.into());
        self
    }

    pub fn with_defaults<I, S>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default = FieldDefault::Many(defaults.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_switch_values(mut self, on: impl Into<String>, off: impl Into<String>) -> Self {
        self.on_value = Some(on.into());
        self.off_value = Some(off.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn shown_when(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.condition = Some(Condition {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Value submitted while a toggle is on; `"true"` when unset.
    pub fn on_value(&self) -> &str {
        self.on_value.as_deref().unwrap_or("true")
    }

    /// Value submitted while a toggle is off; `"false"` when unset.
    pub fn off_value(&self) -> &str {
        self.off_value.as_deref().unwrap_or("false")
    }
}

/// Splits a stored comma separated list, dropping empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
