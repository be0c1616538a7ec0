#![allow(missing_docs)]

pub mod catalog;
pub mod conditions;
pub mod config;
pub mod dom;
pub mod engine;
pub mod env_file;
pub mod error;
pub mod markup;
pub mod page;
pub mod panel;
pub mod render;
pub mod spec;
pub mod submit;
pub mod toggles;
pub mod validate;

pub use catalog::{agent_panel, format_label};
pub use conditions::{ConditionEntry, ConditionTable};
pub use config::{
    CheckboxGroupConfig, CustomValueConfig, HostFieldConfig, MetricToggleConfig, PanelConfig,
};
pub use dom::{
    Display, Document, Element, ElementKind, Handler, InputType, IssueKind, NodeId,
    ValidityIssue,
};
pub use engine::{
    FieldState, FieldStates, TriggerState, TriggerValue, apply_condition, apply_field_states,
    compute_field_states, initialize_conditions, require_static_inputs,
};
pub use env_file::EnvValues;
pub use error::PanelError;
pub use page::{Event, FieldReport, Page};
pub use panel::{CollapsePanel, PanelState};
pub use render::build_document;
pub use spec::{Condition, FieldDefault, FieldGroup, FieldKind, FieldSpec, FormSchema};
pub use submit::{AlwaysConfirm, Confirmer, SubmitAction, SubmitDecision, confirm_action};
pub use toggles::{toggle_custom_value, toggle_metric_fields};
pub use validate::{
    HostRule, host_validity, initialize_checkbox_group, is_domain, is_ipv4,
    validate_checkbox_group, validate_host_fields,
};
