use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CheckboxGroupConfig, PanelConfig};
use crate::dom::{Document, NodeId};

pub const DOMAIN_MESSAGE: &str =
    "Please enter a valid domain or subdomain (e.g., example.com) without http:// or https://";
pub const DOMAIN_OR_IPV4_MESSAGE: &str =
    "Please enter a valid domain/subdomain (without http/https) OR a valid IPv4 address.";

static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
        .expect("domain pattern compiles")
});

static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((25[0-5]|(2[0-4]|1[0-9]|[1-9])?[0-9])\.){3}(25[0-5]|(2[0-4]|1[0-9]|[1-9])?[0-9])$",
    )
    .expect("ipv4 pattern compiles")
});

/// Format a host-like text field has to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HostRule {
    Domain,
    DomainOrIpv4,
}

impl HostRule {
    pub fn message(self) -> &'static str {
        match self {
            HostRule::Domain => DOMAIN_MESSAGE,
            HostRule::DomainOrIpv4 => DOMAIN_OR_IPV4_MESSAGE,
        }
    }
}

/// Domain or subdomain without a scheme, e.g. `www.example.com`.
pub fn is_domain(value: &str) -> bool {
    if value.starts_with("http://") || value.starts_with("https://") {
        return false;
    }
    DOMAIN.is_match(value)
}

/// Dotted-quad IPv4 address, octets 0-255 without leading zeros.
pub fn is_ipv4(value: &str) -> bool {
    IPV4.is_match(value)
}

/// Message to attach to a field holding `value`, or `None` when it is valid.
///
/// Empty values pass; whether a value is needed at all is up to `required`.
pub fn host_validity(value: &str, rule: HostRule) -> Option<&'static str> {
    if value.is_empty() {
        return None;
    }
    let valid = match rule {
        HostRule::Domain => is_domain(value),
        HostRule::DomainOrIpv4 => is_domain(value) || is_ipv4(value),
    };
    (!valid).then_some(rule.message())
}

/// Re-checks one host field and updates its custom validity.
pub fn validate_host_field(doc: &mut Document, node: NodeId, rule: HostRule) -> bool {
    let message = host_validity(&doc[node].value, rule).unwrap_or_default();
    doc[node].set_custom_validity(message);
    message.is_empty()
}

/// Re-checks every configured host field present in the document.
pub fn validate_host_fields(doc: &mut Document, config: &PanelConfig) {
    for field in &config.host_fields {
        if let Some(node) = doc.by_id(&field.id) {
            validate_host_field(doc, node, field.rule);
        }
    }
}

/// Drops the native `required` flag from every box of the group, then
/// validates it once.
///
/// Native `required` on a checkbox means that very box must be checked, which
/// is not the "at least one" rule.
pub fn initialize_checkbox_group(doc: &mut Document, group: &CheckboxGroupConfig) {
    for node in doc.with_class(&group.class) {
        doc[node].required = false;
    }
    validate_checkbox_group(doc, group);
}

/// Attaches the group message to the first box when nothing is checked.
///
/// Returns whether the rule holds; an absent group counts as valid.
pub fn validate_checkbox_group(doc: &mut Document, group: &CheckboxGroupConfig) -> bool {
    let boxes = doc.with_class(&group.class);
    let Some(first) = boxes.first().copied() else {
        return true;
    };
    let any_checked = boxes.iter().any(|node| doc[*node].checked);
    if any_checked {
        doc[first].set_custom_validity("");
    } else {
        debug!(group = %group.class, "no checkbox selected");
        doc[first].set_custom_validity(group.message.as_str());
    }
    any_checked
}
