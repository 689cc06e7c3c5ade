//! Schema command implementation for DMI processor CLI
//!
//! Prints the reflected field tables of the built-in entity types.

use super::shared::{RunSummary, setup_logging};
use crate::app::models::{catalog, find_schema};
use crate::app::services::hydration::{FieldDescriptor, TypeConstraint, TypeTag};
use crate::cli::args::{OutputFormat, SchemaArgs};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use tracing::debug;

/// Fields of one entity type selected for output
#[derive(Debug, Serialize)]
struct SchemaView {
    name: &'static str,
    type_set: &'static [&'static str],
    fields: Vec<&'static FieldDescriptor>,
}

/// Schema command runner
pub async fn run_schema(args: SchemaArgs) -> Result<RunSummary> {
    setup_logging(args.get_log_level(), false)?;

    let schemas = match &args.entity {
        Some(name) => {
            let schema = find_schema(name).ok_or_else(|| {
                Error::configuration(format!(
                    "Unknown entity '{}'; known entities: {}",
                    name,
                    catalog()
                        .iter()
                        .map(|schema| schema.name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?;
            vec![schema]
        }
        None => catalog(),
    };

    let views: Vec<SchemaView> = schemas
        .into_iter()
        .map(|schema| SchemaView {
            name: schema.name,
            type_set: schema.type_set,
            fields: schema
                .fields
                .iter()
                .filter(|descriptor| match &args.accepts {
                    Some(query) => constraint_accepts(&descriptor.constraint, query),
                    None => true,
                })
                .collect(),
        })
        .filter(|view| args.accepts.is_none() || !view.fields.is_empty())
        .collect();
    debug!("Printing {} schemas", views.len());

    match args.format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&views)
                .map_err(|e| Error::json("Failed to serialize schemas", e))?;
            println!("{}", rendered);
        }
        OutputFormat::Summary => {
            if views.is_empty() {
                println!("{}", "No matching fields".bright_black());
            }
            for view in &views {
                print_schema(view);
            }
        }
    }

    Ok(RunSummary::default())
}

fn print_schema(view: &SchemaView) {
    println!(
        "\n{} {}",
        view.name.bright_green().bold(),
        format!("[{}]", view.type_set.join(", ")).bright_black()
    );

    if view.fields.is_empty() {
        println!("  {}", "(no fields)".bright_black());
        return;
    }

    let width = view
        .fields
        .iter()
        .map(|descriptor| descriptor.key.len())
        .max()
        .unwrap_or(0);

    for descriptor in &view.fields {
        println!(
            "  {}  {}",
            format!("{:<width$}", descriptor.key, width = width).bright_cyan(),
            describe_constraint(&descriptor.constraint)
        );
    }
}

/// Check whether a field accepts the type named by `query`
///
/// Primitive names go through alias normalization; anything else is matched
/// against entity and capability names verbatim.
fn constraint_accepts(constraint: &TypeConstraint, query: &str) -> bool {
    match constraint {
        TypeConstraint::Untyped => true,
        TypeConstraint::Typed { accepts, .. } => match TypeTag::from_alias(query) {
            Some(tag) => accepts.contains(&tag),
            None => accepts
                .iter()
                .any(|tag| !tag.is_primitive() && tag.name() == query.trim()),
        },
    }
}

fn describe_constraint(constraint: &TypeConstraint) -> String {
    match constraint {
        TypeConstraint::Untyped => "any".to_string(),
        TypeConstraint::Typed { accepts, nullable } => {
            let types = accepts
                .iter()
                .map(|tag| tag.to_string())
                .collect::<Vec<_>>()
                .join(" | ");
            if *nullable {
                format!("{} | null", types)
            } else {
                types
            }
        }
    }
}
