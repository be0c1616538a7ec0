//! Builds the document the panel is served with from a schema and the
//! current values.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::format_label;
use crate::config::PanelConfig;
use crate::dom::{Document, Element, ElementKind, Handler, InputType, NodeId};
use crate::env_file::EnvValues;
use crate::markup::{
    ADVANCED_PANEL_ID, CHEVRON_DOWN_CLASS, CONDITION_FIELD_ATTR, CONDITION_VALUE_ATTR,
    CONDITIONAL_FIELD_CLASS, FIELD_CONTAINER_CLASS, HEADER_TOGGLE_CLASS, TOGGLE_ICON_CLASS,
    TOGGLE_TEXT_CLASS,
};
use crate::spec::{FieldKind, FieldSpec, FormSchema};

/// `data` attribute naming the field a container renders.
pub const FIELD_ATTR: &str = "field";
pub const FORM_ID: &str = "config-form";
const GROUP_CLASS: &str = "config-group";
const UNGROUPED_TITLE: &str = "Other Settings";

struct Renderer<'a> {
    schema: &'a FormSchema,
    values: &'a EnvValues,
    config: &'a PanelConfig,
    triggers: BTreeSet<&'a str>,
    doc: Document,
}

/// Renders `schema` with `values` (falling back to schema defaults).
///
/// Groups marked advanced go inside the collapsible panel; fields no group
/// lists are rendered last.
pub fn build_document(schema: &FormSchema, values: &EnvValues, config: &PanelConfig) -> Document {
    let triggers = schema
        .fields
        .iter()
        .filter_map(|field| field.condition.as_ref())
        .map(|condition| condition.field.as_str())
        .collect();
    let mut renderer = Renderer {
        schema,
        values,
        config,
        triggers,
        doc: Document::new(),
    };
    renderer.render();
    renderer.doc
}

impl Renderer<'_> {
    fn render(&mut self) {
        let schema = self.schema;
        let root = self.doc.root();
        let form = self.doc.append(root, Element::container().with_id(FORM_ID));

        for group in schema.groups.iter().filter(|group| !group.advanced) {
            self.render_group(form, &group.title, &group.fields);
        }

        let ungrouped: Vec<String> = schema
            .ungrouped()
            .into_iter()
            .map(|field| field.name.clone())
            .collect();
        if !ungrouped.is_empty() {
            self.render_group(form, UNGROUPED_TITLE, &ungrouped);
        }

        let advanced: Vec<_> = schema
            .groups
            .iter()
            .filter(|group| group.advanced)
            .collect();
        if advanced.is_empty() {
            return;
        }
        let button = self.doc.append(
            form,
            Element::new(ElementKind::Button)
                .with_class(HEADER_TOGGLE_CLASS)
                .with_handler(Handler::CollapseToggle),
        );
        self.doc.append(
            button,
            Element::new(ElementKind::Text)
                .with_class(TOGGLE_TEXT_CLASS)
                .with_text("Show"),
        );
        self.doc.append(
            button,
            Element::new(ElementKind::Icon)
                .with_class(TOGGLE_ICON_CLASS)
                .with_class(CHEVRON_DOWN_CLASS),
        );
        let panel = self.doc.append(
            form,
            Element::container()
                .with_id(ADVANCED_PANEL_ID)
                .with_class("collapse"),
        );
        for group in advanced {
            self.render_group(panel, &group.title, &group.fields);
        }
    }

    fn render_group(&mut self, parent: NodeId, title: &str, fields: &[String]) {
        let group = self.doc.append(
            parent,
            Element::container()
                .with_class(GROUP_CLASS)
                .with_data("title", title),
        );
        let schema = self.schema;
        for name in fields {
            if let Some(field) = schema.field(name) {
                self.render_field(group, field);
            }
        }
    }

    fn render_field(&mut self, parent: NodeId, field: &FieldSpec) {
        let mut container = Element::container()
            .with_class(FIELD_CONTAINER_CLASS)
            .with_data(FIELD_ATTR, field.name.as_str());
        if let Some(condition) = &field.condition {
            container = container
                .with_class(CONDITIONAL_FIELD_CLASS)
                .with_data(CONDITION_FIELD_ATTR, condition.field.as_str())
                .with_data(CONDITION_VALUE_ATTR, condition.value.as_str());
            let metrics = &self.config.metrics;
            if condition.field == metrics.selector_id {
                container = container.with_class(if condition.value == metrics.primary_value {
                    metrics.primary_class.as_str()
                } else {
                    metrics.secondary_class.as_str()
                });
            }
        }
        let container = self.doc.append(parent, container);
        self.doc.append(
            container,
            Element::new(ElementKind::Text)
                .with_class("form-label")
                .with_text(format_label(&field.name)),
        );

        match field.kind {
            FieldKind::Text | FieldKind::Password => self.render_text(container, field),
            FieldKind::Select => self.render_select(container, field),
            FieldKind::SelectCustom => self.render_select_custom(container, field),
            FieldKind::Toggle => self.render_toggle(container, field),
            FieldKind::Checkbox => self.render_checkboxes(container, field),
        }
    }

    fn render_text(&mut self, container: NodeId, field: &FieldSpec) {
        let input_type = if field.kind == FieldKind::Password {
            InputType::Password
        } else {
            InputType::Text
        };
        let mut input = Element::input(input_type)
            .with_id(field.name.as_str())
            .with_name(field.name.as_str())
            .with_value(self.values.value_for(field));
        if self.config.host_rule_for(&field.name).is_some() {
            input = input.with_handler(Handler::HostPattern);
        }
        self.doc.append(container, input);
    }

    fn select_for(&self, field: &FieldSpec, options: Vec<String>, value: String) -> Element {
        let mut select = Element::select()
            .with_id(field.name.as_str())
            .with_name(field.name.as_str())
            .with_options(options)
            .with_value(value);
        if self.triggers.contains(field.name.as_str()) {
            select = select.with_handler(Handler::Condition);
        }
        if field.name == self.config.metrics.selector_id {
            select = select.with_handler(Handler::MetricFields);
        }
        select
    }

    /// A stored value outside the options selects the first option.
    fn render_select(&mut self, container: NodeId, field: &FieldSpec) {
        let stored = self.values.value_for(field);
        let value = match field.options.first() {
            Some(first) if !field.options.contains(&stored) => {
                debug!(field = %field.name, %stored, "stored value is not an option");
                first.clone()
            }
            _ => stored,
        };
        let select = self.select_for(field, field.options.clone(), value);
        self.doc.append(container, select);
    }

    /// A stored value outside the presets selects the sentinel and fills the
    /// free-text input.
    fn render_select_custom(&mut self, container: NodeId, field: &FieldSpec) {
        let custom = &self.config.custom_dns;
        let stored = self.values.value_for(field);
        let (selected, text) = if field.options.contains(&stored) {
            (stored, String::new())
        } else {
            (custom.sentinel.clone(), stored)
        };
        let mut options = field.options.clone();
        if !options.contains(&custom.sentinel) {
            options.push(custom.sentinel.clone());
        }
        let select = self
            .select_for(field, options, selected)
            .with_handler(Handler::CustomDnsText);
        self.doc.append(container, select);
        self.doc.append(
            container,
            Element::input(InputType::Text)
                .with_id(custom.input_name.as_str())
                .with_name(custom.input_name.as_str())
                .with_class(custom.input_class.as_str())
                .with_value(text),
        );
    }

    /// Hidden input submitting the off value, followed by the switch.
    fn render_toggle(&mut self, container: NodeId, field: &FieldSpec) {
        let wrapper = self
            .doc
            .append(container, Element::container().with_class("form-switch"));
        self.doc.append(
            wrapper,
            Element::input(InputType::Hidden)
                .with_name(field.name.as_str())
                .with_value(field.off_value()),
        );
        let checked = self.values.value_for(field) == field.on_value();
        self.doc.append(
            wrapper,
            Element::switch(field.name.as_str(), field.on_value())
                .with_id(field.name.as_str())
                .with_checked(checked)
                .with_handler(Handler::Condition),
        );
    }

    fn render_checkboxes(&mut self, container: NodeId, field: &FieldSpec) {
        let selected = self.values.list_for(field);
        for (index, option) in field.options.iter().enumerate() {
            self.doc.append(
                container,
                Element::input(InputType::Checkbox)
                    .with_id(format!("{}_{}", field.name, index))
                    .with_name(field.name.as_str())
                    .with_value(option.as_str())
                    .with_class(self.config.checkbox_group.class.as_str())
                    .with_checked(selected.contains(option))
                    .with_required(true)
                    .with_handler(Handler::CheckboxGroup),
            );
        }
    }
}
