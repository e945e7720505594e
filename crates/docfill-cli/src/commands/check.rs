//! Implementation of the `docfill check` command.

use std::path::PathBuf;

use docfill::{FillOptions, LintWarning};
use miette::{IntoDiagnostic, Report};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::load_document;
use crate::output::LintDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with an error status when any warning is found
    #[arg(long)]
    pub strict: bool,
}

/// JSON output for one checked file.
#[derive(Serialize)]
pub struct FileReport {
    pub file: String,
    pub warnings: Vec<WarningReport>,
}

/// JSON output for one warning.
#[derive(Serialize)]
pub struct WarningReport {
    pub code: &'static str,
    pub message: String,
    pub offset: Option<usize>,
}

impl From<&LintWarning> for WarningReport {
    fn from(warning: &LintWarning) -> Self {
        WarningReport {
            code: warning.code(),
            message: warning.to_string(),
            offset: warning.offset(),
        }
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::new();
    let mut total_warnings = 0;
    let mut unreadable = false;

    for path in &args.files {
        let Ok(document) = load_document(path, FillOptions::default()) else {
            unreadable = true;
            continue;
        };
        let warnings = document.lint();
        total_warnings += warnings.len();

        if args.json {
            reports.push(FileReport {
                file: path.display().to_string(),
                warnings: warnings.iter().map(WarningReport::from).collect(),
            });
        } else if warnings.is_empty() {
            println!("{} {}", "✓".green(), path.display());
        } else {
            for warning in &warnings {
                let diagnostic = LintDiagnostic::new(path, document.text(), warning);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            println!(
                "{} {}: {} warning(s)",
                "!".yellow(),
                path.display(),
                warnings.len()
            );
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    }

    if unreadable {
        Ok(exitcode::NOINPUT)
    } else if args.strict && total_warnings > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
