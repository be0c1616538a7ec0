use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use panel_form::{
    Document, EnvValues, FieldKind, FieldReport, FormSchema, NodeId, Page, PanelConfig,
    PanelError,
};
use serde::Serialize;
use tracing::{debug, info};

const MASK: &str = "********";

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Env file holding the current values; a missing file means no values
    #[arg(long, value_name = "FILE")]
    pub env: Option<PathBuf>,
    /// Schema file (.json or .toml); defaults to the built-in agent panel
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,
    /// Panel config (TOML) overriding element ids and classes
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Type a value into a field (applied first)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<Assignment>,
    /// Check a switch or checkbox; NAME=VALUE picks one option of a group
    #[arg(long = "check", value_name = "NAME[=VALUE]", value_parser = parse_target)]
    pub check: Vec<Target>,
    /// Uncheck a switch or checkbox; a bare group name unchecks every option
    #[arg(long = "uncheck", value_name = "NAME[=VALUE]", value_parser = parse_target)]
    pub uncheck: Vec<Target>,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
    /// Fail when the form would not submit
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub value: Option<String>,
}

fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(Assignment {
            name: name.to_string(),
            value: value.to_string(),
        }),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn parse_target(raw: &str) -> Result<Target, String> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (raw, None),
    };
    if name.is_empty() {
        return Err(format!("expected NAME or NAME=VALUE, got '{raw}'"));
    }
    Ok(Target {
        name: name.to_string(),
        value,
    })
}

#[derive(Debug, Serialize)]
struct IssueReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    message: String,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    valid: bool,
    fields: Vec<FieldReport>,
    issues: Vec<IssueReport>,
}

impl CheckReport {
    fn from_page(page: &Page, schema: &FormSchema) -> Self {
        let doc = page.document();
        let issues: Vec<IssueReport> = doc
            .validity_issues()
            .iter()
            .map(|issue| IssueReport {
                name: issue.name.clone(),
                message: issue.message(&doc[issue.node]),
            })
            .collect();
        let fields = page
            .field_reports()
            .into_iter()
            .map(|mut report| {
                let secret = schema
                    .field(&report.name)
                    .is_some_and(|field| field.kind == FieldKind::Password);
                if secret && !report.value.is_empty() {
                    report.value = MASK.into();
                }
                report
            })
            .collect();
        Self {
            valid: issues.is_empty(),
            fields,
            issues,
        }
    }
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let schema = super::load_schema(args.schema.as_deref())?;
    let config = match &args.config {
        Some(path) => PanelConfig::load(path)
            .with_context(|| format!("failed to load panel config {}", path.display()))?,
        None => PanelConfig::agent_panel(),
    };
    let values = match &args.env {
        Some(path) => EnvValues::load(path)
            .with_context(|| format!("failed to read env file {}", path.display()))?,
        None => EnvValues::default(),
    };
    info!(values = values.len(), "rendering panel");

    let mut page = Page::render(&schema, &values, config);
    for assignment in &args.set {
        let node = value_target(page.document(), &assignment.name)?;
        debug!(name = %assignment.name, value = %assignment.value, "typing value");
        if !page.set_value(node, assignment.value.as_str()) {
            bail!(
                "'{}' is not an option of {} (expected one of: {})",
                assignment.value,
                assignment.name,
                page.document()[node].options.join(", ")
            );
        }
    }
    for (targets, checked) in [(&args.check, true), (&args.uncheck, false)] {
        for target in targets {
            for node in checkable_targets(page.document(), target)? {
                page.set_checked(node, checked);
            }
        }
    }

    let report = CheckReport::from_page(&page, &schema);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }
    if args.strict && !report.valid {
        bail!("form has {} validity issue(s)", report.issues.len());
    }
    Ok(())
}

/// Text input, select or textarea addressed by id or name.
fn value_target(doc: &Document, name: &str) -> Result<NodeId> {
    let node = doc
        .by_id(name)
        .filter(|node| doc[*node].is_form_control())
        .or_else(|| {
            doc.iter().find(|node| {
                let element = &doc[*node];
                element.is_form_control()
                    && !element.is_hidden_input()
                    && element.name.as_deref() == Some(name)
            })
        })
        .ok_or_else(|| PanelError::UnknownElement(name.to_string()))?;
    if doc[node].is_checkable() {
        bail!("'{name}' is a checkbox; use --check or --uncheck");
    }
    Ok(node)
}

fn checkable_targets(doc: &Document, target: &Target) -> Result<Vec<NodeId>> {
    let nodes: Vec<NodeId> = doc
        .iter()
        .filter(|node| {
            let element = &doc[*node];
            element.is_checkable()
                && (element.name.as_deref() == Some(target.name.as_str())
                    || element.id.as_deref() == Some(target.name.as_str()))
                && target
                    .value
                    .as_ref()
                    .is_none_or(|value| &element.value == value)
        })
        .collect();
    if nodes.is_empty() {
        let label = match &target.value {
            Some(value) => format!("{}={value}", target.name),
            None => target.name.clone(),
        };
        return Err(PanelError::UnknownElement(label).into());
    }
    Ok(nodes)
}

fn print_table(report: &CheckReport) {
    for field in &report.fields {
        println!(
            "{:<38} {:<7} {:<9} {}",
            field.name,
            if field.visible { "shown" } else { "hidden" },
            if field.required { "required" } else { "optional" },
            field.value
        );
        for issue in &field.issues {
            println!("    ! {issue}");
        }
    }
    if report.valid {
        println!("form is valid");
    } else {
        println!("form is invalid: {} issue(s)", report.issues.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_keeps_equals_in_value() {
        let parsed = parse_assignment("URL=https://x/?a=b").expect("parse");
        assert_eq!(parsed.name, "URL");
        assert_eq!(parsed.value, "https://x/?a=b");
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn target_value_is_optional() {
        assert_eq!(
            parse_target("CF_ENABLE").expect("parse"),
            Target {
                name: "CF_ENABLE".into(),
                value: None
            }
        );
        assert!(parse_target("=x").is_err());
    }
}
