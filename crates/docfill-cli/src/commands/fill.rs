//! Implementation of the `docfill fill` command.

use std::fs;
use std::path::{Path, PathBuf};

use docfill::{canonical_key, FillOptions, Value, Values};
use miette::IntoDiagnostic;

use crate::commands::{load_document, parse_key_val, selection_for};

/// Arguments for the fill command.
#[derive(Debug, clap::Args)]
pub struct FillArgs {
    /// Template file
    pub file: PathBuf,

    /// JSON object of values keyed by field name
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Values in name=value format (repeatable, overrides --values)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Keep sections for this GROUP=OPTION choice (repeatable)
    #[arg(long, value_parser = parse_key_val)]
    pub select: Vec<(String, String)>,

    /// Write the filled document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Text for required fields with no value
    #[arg(long)]
    pub required_glyph: Option<String>,

    /// chrono format for date fields
    #[arg(long)]
    pub date_format: Option<String>,
}

impl FillArgs {
    fn fill_options(&self) -> FillOptions {
        let mut options = FillOptions::default();
        if let Some(glyph) = &self.required_glyph {
            options.required_glyph.clone_from(glyph);
        }
        if let Some(format) = &self.date_format {
            options.date_format.clone_from(format);
        }
        options
    }
}

/// Read a JSON values file, canonicalizing its keys.
fn read_values(path: &Path) -> Result<Values, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read values file {}: {e}", path.display()))?;
    let raw: Values = serde_json::from_str(&content)
        .map_err(|e| format!("invalid values file {}: {e}", path.display()))?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (canonical_key(&key), value))
        .collect())
}

/// Run the fill command.
pub fn run_fill(args: FillArgs) -> miette::Result<i32> {
    let document = match load_document(&args.file, args.fill_options()) {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };

    let mut values = match &args.values {
        Some(path) => match read_values(path) {
            Ok(values) => values,
            Err(message) => {
                eprintln!("Error: {message}");
                return Ok(exitcode::DATAERR);
            }
        },
        None => Values::new(),
    };
    for (key, value) in &args.params {
        values.insert(canonical_key(key), Value::from(value.as_str()));
    }

    // Failures are logged by the registry and the raw text is kept.
    document.registry().coerce_values(&mut values);
    for warning in document.lint_values(&values) {
        log::warn!("{warning}");
    }

    let filled = if args.select.is_empty() {
        document.fill(&values)
    } else {
        let selection = selection_for(&document, &args.select);
        document.fill_with_selection(&selection, &values)
    };

    match &args.output {
        Some(path) => {
            fs::write(path, filled).into_diagnostic()?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{filled}"),
    }
    Ok(exitcode::OK)
}
