//! Page lifecycle: the load sequence and event dispatch to the handlers an
//! element is wired to.

use serde::Serialize;
use tracing::{debug, info};

use crate::conditions::ConditionTable;
use crate::config::PanelConfig;
use crate::dom::{Document, Handler, NodeId};
use crate::engine::{apply_condition, initialize_conditions, require_static_inputs};
use crate::env_file::EnvValues;
use crate::panel::{CollapsePanel, PanelState};
use crate::render::{FIELD_ATTR, build_document};
use crate::spec::FormSchema;
use crate::submit::{Confirmer, SubmitAction, SubmitDecision, confirm_action};
use crate::toggles::{toggle_custom_value, toggle_metric_fields};
use crate::validate::{
    initialize_checkbox_group, validate_checkbox_group, validate_host_field,
    validate_host_fields,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Change(NodeId),
    Input(NodeId),
    Click(NodeId),
}

/// State of one rendered field as a user would see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub visible: bool,
    pub required: bool,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Page {
    doc: Document,
    table: ConditionTable,
    config: PanelConfig,
    collapse: Option<CollapsePanel>,
}

impl Page {
    /// Runs the load sequence on a server-rendered document.
    pub fn load(mut doc: Document, config: PanelConfig) -> Self {
        initialize_checkbox_group(&mut doc, &config.checkbox_group);

        let table = ConditionTable::from_document(&doc);
        initialize_conditions(&mut doc, &table, &config.custom_dns);
        require_static_inputs(&mut doc, &config.custom_dns);

        toggle_metric_fields(&mut doc, &config.metrics);
        if let Some(selector) = doc.by_id(&config.custom_dns.selector_id) {
            toggle_custom_value(&mut doc, selector, &config.custom_dns);
        }

        validate_checkbox_group(&mut doc, &config.checkbox_group);
        validate_host_fields(&mut doc, &config);

        let collapse = CollapsePanel::bind(&doc);
        info!(
            elements = doc.len(),
            conditions = table.len(),
            collapsible = collapse.is_some(),
            "page loaded"
        );
        Self {
            doc,
            table,
            config,
            collapse,
        }
    }

    /// Renders `schema` with `values` and loads the result.
    pub fn render(schema: &FormSchema, values: &EnvValues, config: PanelConfig) -> Self {
        let doc = build_document(schema, values, &config);
        Self::load(doc, config)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn conditions(&self) -> &ConditionTable {
        &self.table
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn collapse_panel(&self) -> Option<CollapsePanel> {
        self.collapse
    }

    /// Runs the handlers `event`'s target is wired to, in wiring order.
    pub fn dispatch(&mut self, event: Event) {
        let (Event::Change(target) | Event::Input(target) | Event::Click(target)) = event;
        let Some(element) = self.doc.get(target) else {
            return;
        };
        let handlers = element.handlers.clone();
        debug!(?event, ?handlers, "dispatching");
        for handler in handlers {
            match (event, handler) {
                (Event::Change(_), Handler::Condition) => {
                    apply_condition(&mut self.doc, &self.table, &self.config.custom_dns, target)
                }
                (Event::Change(_), Handler::MetricFields) => {
                    toggle_metric_fields(&mut self.doc, &self.config.metrics)
                }
                (Event::Change(_), Handler::CustomDnsText) => {
                    toggle_custom_value(&mut self.doc, target, &self.config.custom_dns)
                }
                (Event::Change(_), Handler::CheckboxGroup) => {
                    validate_checkbox_group(&mut self.doc, &self.config.checkbox_group);
                }
                (Event::Change(_) | Event::Input(_), Handler::HostPattern) => {
                    if let Some(rule) = self.doc[target]
                        .id
                        .as_deref()
                        .and_then(|id| self.config.host_rule_for(id))
                    {
                        validate_host_field(&mut self.doc, target, rule);
                    }
                }
                (Event::Click(_), Handler::CollapseToggle) => {
                    if let Some(collapse) = self.collapse {
                        collapse.toggle(&mut self.doc);
                    }
                }
                _ => {}
            }
        }
    }

    /// Types `value` into a control: fires `input`, then `change`.
    ///
    /// Returns `false` without firing anything when `target` is not in the
    /// document or is a select that has no such option.
    pub fn set_value(&mut self, target: NodeId, value: impl Into<String>) -> bool {
        let Some(element) = self.doc.get_mut(target) else {
            return false;
        };
        let value = value.into();
        if !element.set_value(value.as_str()) {
            debug!(node = target.index(), %value, "value is not an option");
            return false;
        }
        self.dispatch(Event::Input(target));
        self.dispatch(Event::Change(target));
        true
    }

    pub fn set_checked(&mut self, target: NodeId, checked: bool) {
        let Some(element) = self.doc.get_mut(target) else {
            return;
        };
        element.checked = checked;
        self.dispatch(Event::Change(target));
    }

    /// Clicks the advanced settings toggle; `None` when the panel is not bound.
    pub fn toggle_advanced(&mut self) -> Option<PanelState> {
        let collapse = self.collapse?;
        self.dispatch(Event::Click(collapse.button));
        Some(collapse.state(&self.doc))
    }

    pub fn submit(&self, action: SubmitAction, confirmer: &mut dyn Confirmer) -> SubmitDecision {
        confirm_action(action, &self.doc, confirmer)
    }

    /// One report per rendered field container, in document order.
    pub fn field_reports(&self) -> Vec<FieldReport> {
        let doc = &self.doc;
        let issues = doc.validity_issues();
        let data = doc.form_data();
        doc.iter()
            .filter_map(|container| {
                let name = doc[container].data.get(FIELD_ATTR)?.clone();
                let controls = doc.form_controls_in(container);
                let required = controls.iter().any(|node| doc[*node].required);
                let value = data
                    .iter()
                    .filter(|(key, _)| key == &name)
                    .map(|(_, value)| value.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                let messages = issues
                    .iter()
                    .filter(|issue| controls.contains(&issue.node))
                    .map(|issue| issue.message(&doc[issue.node]))
                    .collect();
                Some(FieldReport {
                    visible: doc.is_rendered(container),
                    required,
                    value,
                    issues: messages,
                    name,
                })
            })
            .collect()
    }
}
