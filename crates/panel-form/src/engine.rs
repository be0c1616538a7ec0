//! Conditional field engine.
//!
//! Visibility and `required` state of dependent fields are computed from
//! trigger values by [`compute_field_states`], which only reads the document.
//! [`apply_field_states`] is the single step that writes the result back.

use std::collections::BTreeMap;

use tracing::debug;

use crate::conditions::ConditionTable;
use crate::config::CustomValueConfig;
use crate::dom::{Display, Document, ElementKind, Handler, InputType, NodeId};
use crate::markup::{CONDITIONAL_FIELD_CLASS, CUSTOM_SELECT_CLASS, FIELD_CONTAINER_CLASS};

/// Current value of a trigger as seen by the conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerValue {
    /// Toggle switch: its value only counts while checked.
    Switch { checked: bool, value: String },
    /// Checkboxes and radios resolve to their value when checked and to
    /// nothing otherwise; text inputs and selects to their literal value.
    Resolved(Option<String>),
}

impl TriggerValue {
    pub fn satisfies(&self, required_value: &str) -> bool {
        match self {
            TriggerValue::Switch { checked, value } => *checked && value == required_value,
            TriggerValue::Resolved(value) => value.as_deref() == Some(required_value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerState {
    pub node: NodeId,
    pub name: String,
    pub value: TriggerValue,
}

impl TriggerState {
    /// Reads the trigger at `node`; elements without a `name` are not triggers.
    pub fn read(doc: &Document, node: NodeId) -> Option<Self> {
        let element = doc.get(node)?;
        let name = element.name.clone()?;
        let value = if element.is_switch() {
            TriggerValue::Switch {
                checked: element.checked,
                value: element.value.clone(),
            }
        } else if element.is_checkable() {
            TriggerValue::Resolved(element.checked.then(|| element.value.clone()))
        } else {
            TriggerValue::Resolved(Some(element.value.clone()))
        };
        Some(Self { node, name, value })
    }
}

/// Computed state of one dependent field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub visible: bool,
    /// `required` flag per managed descendant control.
    pub required: BTreeMap<NodeId, bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStates {
    pub fields: BTreeMap<NodeId, FieldState>,
    /// Hidden fallback inputs of switches and whether they must be disabled.
    pub fallbacks: BTreeMap<NodeId, bool>,
}

impl FieldStates {
    pub fn is_visible(&self, field: NodeId) -> Option<bool> {
        self.fields.get(&field).map(|state| state.visible)
    }

    pub fn is_required(&self, control: NodeId) -> Option<bool> {
        self.fields
            .values()
            .find_map(|state| state.required.get(&control).copied())
    }
}

/// Computes visibility and `required` state for every field depending on
/// `triggers`, without touching the document.
pub fn compute_field_states(
    doc: &Document,
    table: &ConditionTable,
    triggers: &[TriggerState],
    custom: &CustomValueConfig,
) -> FieldStates {
    let custom_selected = doc
        .by_id(&custom.selector_id)
        .is_some_and(|selector| doc[selector].value == custom.sentinel);

    let mut states = FieldStates::default();
    for trigger in triggers {
        for entry in table.for_trigger(&trigger.name) {
            let visible = trigger.value.satisfies(&entry.required_value);
            let required = managed_controls(doc, entry.dependent)
                .into_iter()
                .map(|control| {
                    let paired = doc[control].has_class(&custom.input_class);
                    (control, visible && (!paired || custom_selected))
                })
                .collect();
            states
                .fields
                .insert(entry.dependent, FieldState { visible, required });
        }

        if let TriggerValue::Switch { checked, .. } = trigger.value
            && let Some(fallback) = switch_fallback(doc, trigger.node)
        {
            states.fallbacks.insert(fallback, checked);
        }
    }
    states
}

/// Writes computed states into the document.
pub fn apply_field_states(doc: &mut Document, states: &FieldStates) {
    for (field, state) in &states.fields {
        doc[*field].display = if state.visible {
            Display::Block
        } else {
            Display::Hidden
        };
        for (control, required) in &state.required {
            doc[*control].required = *required;
        }
    }
    for (fallback, disabled) in &states.fallbacks {
        doc[*fallback].disabled = *disabled;
    }
}

/// Re-evaluates every field depending on `trigger` and applies the result.
pub fn apply_condition(
    doc: &mut Document,
    table: &ConditionTable,
    custom: &CustomValueConfig,
    trigger: NodeId,
) {
    let Some(state) = TriggerState::read(doc, trigger) else {
        debug!(node = trigger.index(), "trigger without a name ignored");
        return;
    };
    debug!(trigger = %state.name, value = ?state.value, "applying conditions");
    let states = compute_field_states(doc, table, std::slice::from_ref(&state), custom);
    apply_field_states(doc, &states);
}

/// Elements wired to the condition handler that act as triggers at load time.
pub fn condition_triggers(doc: &Document) -> Vec<NodeId> {
    doc.iter()
        .filter(|node| {
            let element = &doc[*node];
            element.is_wired_to(Handler::Condition)
                && (element.kind == ElementKind::Select
                    || element.input_type() == Some(InputType::Checkbox))
        })
        .collect()
}

/// Brings every dependent field in line with the values the page was
/// rendered with.
pub fn initialize_conditions(doc: &mut Document, table: &ConditionTable, custom: &CustomValueConfig) {
    let triggers: Vec<TriggerState> = condition_triggers(doc)
        .into_iter()
        .filter_map(|node| TriggerState::read(doc, node))
        .collect();
    debug!(triggers = triggers.len(), entries = table.len(), "initializing conditions");
    let states = compute_field_states(doc, table, &triggers, custom);
    apply_field_states(doc, &states);
}

/// Marks displayed controls outside conditional fields as `required`.
///
/// Switches, hidden inputs, checkboxes, the custom value input and selects
/// marked `custom-select` are skipped, as are controls without a field
/// container.
pub fn require_static_inputs(doc: &mut Document, custom: &CustomValueConfig) {
    let targets: Vec<NodeId> = doc
        .iter()
        .filter(|node| {
            let element = &doc[*node];
            let eligible = match element.kind {
                ElementKind::Input(InputType::Hidden | InputType::Checkbox) => false,
                ElementKind::Input(_) => {
                    !element.is_switch() && !element.has_class(&custom.input_class)
                }
                ElementKind::Select => !element.has_class(CUSTOM_SELECT_CLASS),
                ElementKind::Textarea => true,
                _ => false,
            };
            eligible
                && doc
                    .closest_with_class(*node, FIELD_CONTAINER_CLASS)
                    .is_some_and(|container| {
                        !doc[container].has_class(CONDITIONAL_FIELD_CLASS)
                            && doc[container].is_displayed()
                    })
        })
        .collect();
    for node in targets {
        doc[node].required = true;
    }
}

/// Controls whose `required` flag follows the field's visibility.
fn managed_controls(doc: &Document, field: NodeId) -> Vec<NodeId> {
    doc.form_controls_in(field)
        .into_iter()
        .filter(|node| !doc[*node].is_switch() && !doc[*node].is_hidden_input())
        .collect()
}

/// Hidden input next to a switch submitting its "off" value.
fn switch_fallback(doc: &Document, switch: NodeId) -> Option<NodeId> {
    let parent = doc[switch].parent()?;
    let name = doc[switch].name.as_deref()?;
    doc.descendants(parent)
        .into_iter()
        .find(|node| doc[*node].is_hidden_input() && doc[*node].name.as_deref() == Some(name))
}
