//! docfill CLI entry point.
//!
//! Provides command-line tools for working with document templates:
//! - `docfill fields` - List the fields a template asks for
//! - `docfill groups` - List the option groups of a template
//! - `docfill check` - Lint templates
//! - `docfill fill` - Render a filled document

mod commands;
mod output;

use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_fields, run_fill, run_groups, CheckArgs, FieldsArgs, FillArgs, GroupsArgs,
};
use env_logger::Env;

/// Document template tools.
#[derive(Debug, Parser)]
#[command(name = "docfill")]
#[command(about = "Document template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the fields of a template
    Fields(FieldsArgs),
    /// List the option groups of a template
    Groups(GroupsArgs),
    /// Lint templates for malformed placeholders and blocks
    Check(CheckArgs),
    /// Fill a template with values
    Fill(FillArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log warnings by default, debug output with `--verbose`; `RUST_LOG` wins.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Fields(args) => run_fields(args),
        Commands::Groups(args) => run_groups(args),
        Commands::Check(args) => run_check(args),
        Commands::Fill(args) => run_fill(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
