//! Fixed identifiers and class names of the agent panel markup.

/// Class of field groups whose visibility depends on a trigger.
pub const CONDITIONAL_FIELD_CLASS: &str = "conditional-field";
/// `data` attribute naming the trigger a conditional field depends on.
pub const CONDITION_FIELD_ATTR: &str = "condition-field";
/// `data` attribute holding the trigger value that makes the field visible.
pub const CONDITION_VALUE_ATTR: &str = "condition-value";

/// Class of the container wrapping every rendered field.
pub const FIELD_CONTAINER_CLASS: &str = "mb-3";
/// Selects carrying this class are left alone by the static required pass.
pub const CUSTOM_SELECT_CLASS: &str = "custom-select";

pub const METRIC_SELECTOR_ID: &str = "METRIC_PUSH_METHOD";
pub const GRAFANA_FIELDS_CLASS: &str = "grafana-fields";
pub const PUSHGATEWAY_FIELDS_CLASS: &str = "pushgateway-fields";
pub const GRAFANA_VALUE: &str = "grafana_agent";

pub const CUSTOM_DNS_SELECTOR_ID: &str = "CUSTOM_DNS";
pub const CUSTOM_DNS_TEXT_CLASS: &str = "custom-dns-text-input";
pub const CUSTOM_DNS_TEXT_NAME: &str = "CUSTOM_DNS_TEXT";
pub const CUSTOM_SENTINEL: &str = "custom";

pub const INBOUND_CHECKBOX_CLASS: &str = "inbound-checkbox";
pub const INBOUND_MESSAGE: &str = "Please select at least one inbound protocol.";

pub const NGINX_FAKE_WEBSITE_ID: &str = "NGINX_FAKE_WEBSITE";
pub const CF_CLEAN_IP_DOMAIN_ID: &str = "CF_CLEAN_IP_DOMAIN";

pub const ADVANCED_PANEL_ID: &str = "collapse-advanced-settings";
pub const HEADER_TOGGLE_CLASS: &str = "btn-header-toggle";
pub const TOGGLE_TEXT_CLASS: &str = "toggle-text";
pub const TOGGLE_ICON_CLASS: &str = "toggle-icon";
pub const SHOW_CLASS: &str = "show";
pub const CHEVRON_UP_CLASS: &str = "bi-chevron-up";
pub const CHEVRON_DOWN_CLASS: &str = "bi-chevron-down";
