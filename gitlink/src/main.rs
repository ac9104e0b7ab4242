//! @ai:module:intent CLI entry point for the PR results consistency check
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on git, verdict, output

use clap::{Parser, ValueEnum};
use rules_gitlink::{run_verification, GitCli, OutputFormat, VerifyConfig};
use std::process::ExitCode;

/// Fails when a PR bumps benchmark submodules without updating RESULTS.md.
///
/// Reads the revision range from BASE_SHA and HEAD_SHA.
#[derive(Parser)]
#[command(name = "verify-results")]
#[command(author, version, about)]
struct Cli {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let base = std::env::var("BASE_SHA").ok();
    let head = std::env::var("HEAD_SHA").ok();
    let verdict = run_verification(
        base.as_deref(),
        head.as_deref(),
        &GitCli::new("."),
        &VerifyConfig::default(),
        cli.format.into(),
    );

    if verdict.is_success() {
        println!("{}", verdict.message);
    } else {
        eprintln!("{}", verdict.message);
    }
    ExitCode::from(verdict.status.exit_code())
}
