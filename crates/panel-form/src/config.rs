use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::markup;
use crate::validate::HostRule;

/// Identifiers and sentinels the fixed-shape behaviours look up.
///
/// Every key has a default matching the agent panel markup, so an empty TOML
/// file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PanelConfig {
    pub metrics: MetricToggleConfig,
    pub custom_dns: CustomValueConfig,
    pub checkbox_group: CheckboxGroupConfig,
    pub host_fields: Vec<HostFieldConfig>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            metrics: MetricToggleConfig::default(),
            custom_dns: CustomValueConfig::default(),
            checkbox_group: CheckboxGroupConfig::default(),
            host_fields: default_host_fields(),
        }
    }
}

/// Selector switching between two mutually exclusive field groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MetricToggleConfig {
    pub selector_id: String,
    pub primary_value: String,
    pub primary_class: String,
    pub secondary_class: String,
}

impl Default for MetricToggleConfig {
    fn default() -> Self {
        Self {
            selector_id: markup::METRIC_SELECTOR_ID.into(),
            primary_value: markup::GRAFANA_VALUE.into(),
            primary_class: markup::GRAFANA_FIELDS_CLASS.into(),
            secondary_class: markup::PUSHGATEWAY_FIELDS_CLASS.into(),
        }
    }
}

/// Selector paired with a free-text input used when the sentinel is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CustomValueConfig {
    pub selector_id: String,
    pub input_class: String,
    pub input_name: String,
    pub sentinel: String,
}

impl Default for CustomValueConfig {
    fn default() -> Self {
        Self {
            selector_id: markup::CUSTOM_DNS_SELECTOR_ID.into(),
            input_class: markup::CUSTOM_DNS_TEXT_CLASS.into(),
            input_name: markup::CUSTOM_DNS_TEXT_NAME.into(),
            sentinel: markup::CUSTOM_SENTINEL.into(),
        }
    }
}

/// Checkbox set where at least one box must be checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CheckboxGroupConfig {
    pub class: String,
    pub message: String,
}

impl Default for CheckboxGroupConfig {
    fn default() -> Self {
        Self {
            class: markup::INBOUND_CHECKBOX_CLASS.into(),
            message: markup::INBOUND_MESSAGE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HostFieldConfig {
    pub id: String,
    pub rule: HostRule,
}

fn default_host_fields() -> Vec<HostFieldConfig> {
    vec![
        HostFieldConfig {
            id: markup::NGINX_FAKE_WEBSITE_ID.into(),
            rule: HostRule::Domain,
        },
        HostFieldConfig {
            id: markup::CF_CLEAN_IP_DOMAIN_ID.into(),
            rule: HostRule::DomainOrIpv4,
        },
    ]
}

impl PanelConfig {
    /// Configuration matching the agent panel markup.
    pub fn agent_panel() -> Self {
        Self::default()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, PanelError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, PanelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PanelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn host_rule_for(&self, id: &str) -> Option<HostRule> {
        self.host_fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.rule)
    }
}
