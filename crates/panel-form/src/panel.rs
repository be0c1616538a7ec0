use serde::Serialize;
use tracing::{debug, error};

use crate::dom::{Document, NodeId};
use crate::markup::{
    ADVANCED_PANEL_ID, CHEVRON_DOWN_CLASS, CHEVRON_UP_CLASS, HEADER_TOGGLE_CLASS, SHOW_CLASS,
    TOGGLE_ICON_CLASS, TOGGLE_TEXT_CLASS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Expanded,
    Collapsed,
}

/// Collapsible "advanced settings" panel and its header button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsePanel {
    pub panel: NodeId,
    pub button: NodeId,
    pub text: Option<NodeId>,
    pub icon: Option<NodeId>,
}

impl CollapsePanel {
    /// Locates the panel elements; logs and returns `None` when the panel or
    /// its button is missing.
    pub fn bind(doc: &Document) -> Option<Self> {
        let panel = doc.by_id(ADVANCED_PANEL_ID);
        let button = doc.with_class(HEADER_TOGGLE_CLASS).first().copied();
        let (Some(panel), Some(button)) = (panel, button) else {
            error!(
                collapse_element = panel.is_some(),
                button = button.is_some(),
                "could not find required elements for collapse handling"
            );
            return None;
        };
        let child = |class: &str| {
            doc.descendants(button)
                .into_iter()
                .find(|node| doc[*node].has_class(class))
        };
        Some(Self {
            panel,
            button,
            text: child(TOGGLE_TEXT_CLASS),
            icon: child(TOGGLE_ICON_CLASS),
        })
    }

    pub fn state(&self, doc: &Document) -> PanelState {
        if doc[self.panel].has_class(SHOW_CLASS) {
            PanelState::Expanded
        } else {
            PanelState::Collapsed
        }
    }

    /// Flips the panel and updates the button label and icon.
    pub fn toggle(&self, doc: &mut Document) -> PanelState {
        let next = match self.state(doc) {
            PanelState::Expanded => PanelState::Collapsed,
            PanelState::Collapsed => PanelState::Expanded,
        };
        let (label, add, remove) = match next {
            PanelState::Expanded => {
                doc[self.panel].add_class(SHOW_CLASS);
                ("Hide", CHEVRON_UP_CLASS, CHEVRON_DOWN_CLASS)
            }
            PanelState::Collapsed => {
                doc[self.panel].remove_class(SHOW_CLASS);
                ("Show", CHEVRON_DOWN_CLASS, CHEVRON_UP_CLASS)
            }
        };
        if let Some(text) = self.text {
            doc[text].text = label.into();
        }
        if let Some(icon) = self.icon {
            doc[icon].remove_class(remove);
            doc[icon].add_class(add);
        }
        debug!(state = ?next, "advanced settings toggled");
        next
    }
}
