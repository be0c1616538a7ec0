pub mod check;
pub mod host;
pub mod schema;

use std::path::Path;

use anyhow::{Context, Result};
use panel_form::{FormSchema, agent_panel};

/// Schema at `path`, or the built-in agent panel schema.
pub(crate) fn load_schema(path: Option<&Path>) -> Result<FormSchema> {
    match path {
        Some(path) => FormSchema::load(path)
            .with_context(|| format!("failed to load schema {}", path.display())),
        None => Ok(agent_panel()),
    }
}
