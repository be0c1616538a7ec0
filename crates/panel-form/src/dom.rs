//! In-memory document tree the engine reads and mutates.
//!
//! Elements live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Only the attributes the panel cares about are modelled.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Index, IndexMut};

use serde::Serialize;

/// `role` attribute value that marks a checkbox as a toggle switch.
pub const SWITCH_ROLE: &str = "switch";

const VALUE_MISSING_MESSAGE: &str = "Please fill out this field.";
const CHECK_MISSING_MESSAGE: &str = "Please check this box if you want to proceed.";

/// Handle to an element inside the [`Document`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Text,
    Password,
    Checkbox,
    Radio,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Container,
    Input(InputType),
    Select,
    Textarea,
    Button,
    Text,
    Icon,
}

/// Inline `display` style of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    #[default]
    Unset,
    Block,
    #[serde(rename = "none")]
    Hidden,
}

/// Event handlers an element is wired to in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handler {
    Condition,
    MetricFields,
    CustomDnsText,
    CheckboxGroup,
    HostPattern,
    CollapseToggle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub id: Option<String>,
    pub name: Option<String>,
    pub value: String,
    pub checked: bool,
    pub role: Option<String>,
    pub classes: BTreeSet<String>,
    pub data: BTreeMap<String, String>,
    pub required: bool,
    pub disabled: bool,
    pub display: Display,
    pub custom_validity: String,
    pub text: String,
    /// Option values of a select, in order.
    pub options: Vec<String>,
    pub handlers: Vec<Handler>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            name: None,
            value: String::new(),
            checked: false,
            role: None,
            classes: BTreeSet::new(),
            data: BTreeMap::new(),
            required: false,
            disabled: false,
            display: Display::Unset,
            custom_validity: String::new(),
            text: String::new(),
            options: Vec::new(),
            handlers: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn container() -> Self {
        Self::new(ElementKind::Container)
    }

    pub fn input(input_type: InputType) -> Self {
        Self::new(ElementKind::Input(input_type))
    }

    pub fn select() -> Self {
        Self::new(ElementKind::Select)
    }

    /// Checkbox carrying `role="switch"`.
    pub fn switch(name: impl Into<String>, on_value: impl Into<String>) -> Self {
        Self::input(InputType::Checkbox)
            .with_name(name)
            .with_value(on_value)
            .with_role(SWITCH_ROLE)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
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

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_handler(mut self, handler: Handler) -> Self {
        if !self.handlers.contains(&handler) {
            self.handlers.push(handler);
        }
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn input_type(&self) -> Option<InputType> {
        match self.kind {
            ElementKind::Input(input_type) => Some(input_type),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn is_wired_to(&self, handler: Handler) -> bool {
        self.handlers.contains(&handler)
    }

    pub fn is_switch(&self) -> bool {
        self.input_type() == Some(InputType::Checkbox) && self.role.as_deref() == Some(SWITCH_ROLE)
    }

    pub fn is_hidden_input(&self) -> bool {
        self.input_type() == Some(InputType::Hidden)
    }

    /// Checkbox or radio.
    pub fn is_checkable(&self) -> bool {
        matches!(
            self.input_type(),
            Some(InputType::Checkbox | InputType::Radio)
        )
    }

    pub fn is_form_control(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Input(_) | ElementKind::Select | ElementKind::Textarea
        )
    }

    pub fn is_displayed(&self) -> bool {
        self.display != Display::Hidden
    }

    /// Assigns `value`, returning whether it took.
    ///
    /// A select with options keeps its current selection when `value` is not
    /// one of them.
    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.kind == ElementKind::Select
            && !self.options.is_empty()
            && !self.options.contains(&value)
        {
            return false;
        }
        self.value = value;
        true
    }

    /// Mirrors `setCustomValidity`: an empty message clears the error.
    pub fn set_custom_validity(&mut self, message: impl Into<String>) {
        self.custom_validity = message.into();
    }

    fn value_missing(&self) -> bool {
        if self.is_checkable() {
            !self.checked
        } else {
            self.value.is_empty()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum IssueKind {
    ValueMissing,
    Custom(String),
}

/// A control that fails constraint validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidityIssue {
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: IssueKind,
}

impl ValidityIssue {
    pub fn message(&self, element: &Element) -> String {
        match &self.kind {
            IssueKind::Custom(message) => message.clone(),
            IssueKind::ValueMissing if element.is_checkable() => CHECK_MISSING_MESSAGE.into(),
            IssueKind::ValueMissing => VALUE_MISSING_MESSAGE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only an empty root container.
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::container()],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of elements, root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    /// Every element in document order, root excluded.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.root()).into_iter()
    }

    /// Descendants of `node` in document order, `node` excluded.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self[node].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self[current].children.iter().rev().copied());
        }
        out
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.iter()
            .find(|node| self[*node].id.as_deref() == Some(id))
    }

    pub fn with_class(&self, class: &str) -> Vec<NodeId> {
        self.iter().filter(|node| self[*node].has_class(class)).collect()
    }

    /// Like `Element.closest`: `node` itself or its nearest ancestor with `class`.
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self[id].has_class(class) {
                return Some(id);
            }
            current = self[id].parent;
        }
        None
    }

    pub fn form_controls_in(&self, node: NodeId) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|id| self[*id].is_form_control())
            .collect()
    }

    /// Whether `node` and all of its ancestors are displayed.
    pub fn is_rendered(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if !self[id].is_displayed() {
                return false;
            }
            current = self[id].parent;
        }
        true
    }

    /// Controls failing constraint validation, in document order.
    ///
    /// Disabled controls and hidden inputs are barred from validation;
    /// display state is not considered.
    pub fn validity_issues(&self) -> Vec<ValidityIssue> {
        self.iter()
            .filter_map(|node| {
                let element = &self[node];
                if !element.is_form_control() || element.disabled || element.is_hidden_input() {
                    return None;
                }
                let kind = if !element.custom_validity.is_empty() {
                    IssueKind::Custom(element.custom_validity.clone())
                } else if element.required && element.value_missing() {
                    IssueKind::ValueMissing
                } else {
                    return None;
                };
                Some(ValidityIssue {
                    node,
                    name: element.name.clone(),
                    kind,
                })
            })
            .collect()
    }

    pub fn check_validity(&self) -> bool {
        self.validity_issues().is_empty()
    }

    /// Name/value pairs a form submission would carry, in document order.
    pub fn form_data(&self) -> Vec<(String, String)> {
        self.iter()
            .filter_map(|node| {
                let element = &self[node];
                if !element.is_form_control() || element.disabled {
                    return None;
                }
                if element.is_checkable() && !element.checked {
                    return None;
                }
                let name = element.name.as_ref()?;
                Some((name.clone(), element.value.clone()))
            })
            .collect()
    }
}

impl Index<NodeId> for Document {
    type Output = Element;

    fn index(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Document {
    fn index_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }
}
