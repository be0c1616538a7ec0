use tracing::debug;

use crate::config::{CustomValueConfig, MetricToggleConfig};
use crate::dom::{Display, Document, NodeId};

fn display_for(visible: bool) -> Display {
    if visible { Display::Block } else { Display::Hidden }
}

/// Shows exactly one of the two metric backend groups.
///
/// Does nothing unless the selector and both groups are present. `required`
/// is left to the condition engine.
pub fn toggle_metric_fields(doc: &mut Document, config: &MetricToggleConfig) {
    let Some(selector) = doc.by_id(&config.selector_id) else {
        return;
    };
    let primary = doc.with_class(&config.primary_class);
    let secondary = doc.with_class(&config.secondary_class);
    if primary.is_empty() || secondary.is_empty() {
        return;
    }

    let show_primary = doc[selector].value == config.primary_value;
    debug!(value = %doc[selector].value, show_primary, "toggling metric fields");
    for node in primary {
        doc[node].display = display_for(show_primary);
    }
    for node in secondary {
        doc[node].display = display_for(!show_primary);
    }
}

/// Shows and requires the free-text input only while the sentinel is selected.
pub fn toggle_custom_value(doc: &mut Document, selector: NodeId, config: &CustomValueConfig) {
    let Some(input) = doc.with_class(&config.input_class).first().copied() else {
        return;
    };
    let Some(selected) = doc.get(selector).map(|element| element.value == config.sentinel) else {
        return;
    };

    let element = &mut doc[input];
    element.display = display_for(selected);
    element.required = selected;
    if !selected {
        element.set_custom_validity("");
    }
}
