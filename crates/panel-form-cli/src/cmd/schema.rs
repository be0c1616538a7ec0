use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use panel_form::{FormSchema, PanelConfig};

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Schema file (.json or .toml); defaults to the built-in agent panel
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Print the JSON Schema instead of the form schema
    #[arg(long = "json-schema")]
    pub json_schema: bool,
    /// Which document the JSON Schema describes
    #[arg(long, value_enum, default_value = "form", requires = "json_schema")]
    pub of: SchemaTarget,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTarget {
    Form,
    Config,
}

pub fn run(args: &SchemaArgs) -> Result<()> {
    let rendered = if args.json_schema {
        let schema = match args.of {
            SchemaTarget::Form => schemars::schema_for!(FormSchema),
            SchemaTarget::Config => schemars::schema_for!(PanelConfig),
        };
        serde_json::to_string_pretty(&schema)?
    } else {
        let schema = super::load_schema(args.file.as_deref())?;
        tracing::info!(id = %schema.id, fields = schema.fields.len(), "schema loaded");
        serde_json::to_string_pretty(&schema)?
    };
    println!("{rendered}");
    Ok(())
}
