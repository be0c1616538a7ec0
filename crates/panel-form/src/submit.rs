use serde::{Deserialize, Serialize};

use crate::dom::{Document, ValidityIssue};

const SAVE_CLOSE_PROMPT: &str = "This will save the configuration and STOP the web panel.\n\nTo reopen, run ./start_panel.sh in server terminal.\n\nProceed?";
const SAVE_CLOSE_BOOTSTRAP_PROMPT: &str = "This will save the configuration, STOP the web panel, and trigger the relevant start/restart script.\n\nTo reopen, run ./start_panel.sh in server terminal.\n\nProceed?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitAction {
    Save,
    SaveClose,
    SaveCloseBootstrap,
}

impl SubmitAction {
    /// Prompt shown before a destructive action, `None` for a plain save.
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            SubmitAction::Save => None,
            SubmitAction::SaveClose => Some(SAVE_CLOSE_PROMPT),
            SubmitAction::SaveCloseBootstrap => Some(SAVE_CLOSE_BOOTSTRAP_PROMPT),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubmitAction::Save => "save",
            SubmitAction::SaveClose => "save_close",
            SubmitAction::SaveCloseBootstrap => "save_close_bootstrap",
        }
    }
}

/// Blocking yes/no prompt shown to the user.
pub trait Confirmer {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirmer for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Confirmer that accepts every prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitDecision {
    /// The user declined the prompt.
    Cancelled,
    /// Confirmed, but some controls fail validation.
    Invalid { issues: Vec<ValidityIssue> },
    /// Form data to submit, `action` included.
    Proceed { data: Vec<(String, String)> },
}

/// Gates a submission behind the action prompt and form validity.
///
/// Validity is checked only after the prompt was accepted.
pub fn confirm_action(
    action: SubmitAction,
    doc: &Document,
    confirmer: &mut dyn Confirmer,
) -> SubmitDecision {
    if let Some(prompt) = action.prompt()
        && !confirmer.confirm(prompt)
    {
        return SubmitDecision::Cancelled;
    }

    let issues = doc.validity_issues();
    if !issues.is_empty() {
        return SubmitDecision::Invalid { issues };
    }

    let mut data = doc.form_data();
    data.push(("action".into(), action.as_str().into()));
    SubmitDecision::Proceed { data }
}
