//! Implementation of the `docfill fields` command.

use std::path::PathBuf;

use docfill::{FieldEntry, FillOptions};
use miette::IntoDiagnostic;

use crate::commands::{load_document, parse_key_val, selection_for};
use crate::output::format_fields_table;

/// Arguments for the fields command.
#[derive(Debug, clap::Args)]
pub struct FieldsArgs {
    /// Template file
    pub file: PathBuf,

    /// Only list fields visible under this GROUP=OPTION choice (repeatable)
    #[arg(long, value_parser = parse_key_val)]
    pub select: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the fields command.
pub fn run_fields(args: FieldsArgs) -> miette::Result<i32> {
    let document = match load_document(&args.file, FillOptions::default()) {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };

    let selection = selection_for(&document, &args.select);
    let entries: Vec<&FieldEntry> = if args.select.is_empty() {
        document.registry().entries().iter().collect()
    } else {
        document.registry().visible(&selection).collect()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries).into_diagnostic()?);
    } else if entries.is_empty() {
        println!("No fields found in {}", args.file.display());
    } else {
        println!("{}", format_fields_table(&entries));
    }
    Ok(exitcode::OK)
}
