//! Implementation of the `docfill groups` command.

use std::path::PathBuf;

use docfill::FillOptions;
use miette::IntoDiagnostic;

use crate::commands::load_document;
use crate::output::format_groups_table;

/// Arguments for the groups command.
#[derive(Debug, clap::Args)]
pub struct GroupsArgs {
    /// Template file
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the groups command.
pub fn run_groups(args: GroupsArgs) -> miette::Result<i32> {
    let document = match load_document(&args.file, FillOptions::default()) {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };

    let groups = document.groups();
    if args.json {
        println!("{}", serde_json::to_string_pretty(groups).into_diagnostic()?);
    } else if groups.is_empty() {
        println!("No option groups found in {}", args.file.display());
    } else {
        println!("{}", format_groups_table(groups));
    }
    Ok(exitcode::OK)
}
