use std::collections::BTreeMap;

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::markup::{CONDITION_FIELD_ATTR, CONDITION_VALUE_ATTR, CONDITIONAL_FIELD_CLASS};

/// One dependent field and the trigger value that makes it visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionEntry {
    pub trigger: String,
    pub required_value: String,
    pub dependent: NodeId,
}

/// Dependent fields indexed by trigger name, built once from markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionTable {
    entries: Vec<ConditionEntry>,
    by_trigger: BTreeMap<String, Vec<usize>>,
}

impl ConditionTable {
    /// Scans conditional fields carrying both condition attributes.
    pub fn from_document(doc: &Document) -> Self {
        let entries = doc
            .with_class(CONDITIONAL_FIELD_CLASS)
            .into_iter()
            .filter_map(|node| {
                let element = &doc[node];
                let trigger = element.data.get(CONDITION_FIELD_ATTR);
                let value = element.data.get(CONDITION_VALUE_ATTR);
                match (trigger, value) {
                    (Some(trigger), Some(value)) => Some(ConditionEntry {
                        trigger: trigger.clone(),
                        required_value: value.clone(),
                        dependent: node,
                    }),
                    _ => {
                        debug!(node = node.index(), "conditional field without condition attributes");
                        None
                    }
                }
            });
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ConditionEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            table
                .by_trigger
                .entry(entry.trigger.clone())
                .or_default()
                .push(table.entries.len());
            table.entries.push(entry);
        }
        table
    }

    /// Entries registered against `trigger`, in document order.
    pub fn for_trigger<'a>(&'a self, trigger: &str) -> impl Iterator<Item = &'a ConditionEntry> + 'a {
        self.by_trigger
            .get(trigger)
            .into_iter()
            .flatten()
            .map(|index| &self.entries[*index])
    }

    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.by_trigger.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &[ConditionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
