//! @ai:module:intent CLI for regenerating rule benchmark results
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rules_bench::{JsonReporter, Orchestrator, RegenConfig, SelectionRequest};
use rules_gitlink::RevisionRange;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rules-bench")]
#[command(about = "Regenerate RESULTS.md for changed rule benchmarks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run benchmarks and regenerate their results
    Regen {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Repository root (overrides the configuration file)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Base commit SHA (for PRs)
        #[arg(long, env = "BASE_SHA")]
        base: Option<String>,

        /// Head commit SHA (for PRs)
        #[arg(long, env = "HEAD_SHA")]
        head: Option<String>,

        /// Fail if regeneration changes tracked files
        #[arg(long)]
        check: bool,

        /// Regenerate all benchmarks
        #[arg(long)]
        all: bool,

        /// Regenerate a specific benchmark (e.g. 'TDD'); repeatable
        #[arg(long = "bench")]
        benches: Vec<String>,

        /// Number of iterations per benchmark
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        runs: Option<u32>,

        /// Show what would run without executing anything
        #[arg(long)]
        dry_run: bool,

        /// Write a JSON summary of the pass
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// List benchmarks and their toolchains
    List {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Repository root (overrides the configuration file)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "rules-bench.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

struct RegenArgs {
    config: Option<PathBuf>,
    root: Option<PathBuf>,
    base: Option<String>,
    head: Option<String>,
    check: bool,
    all: bool,
    benches: Vec<String>,
    runs: Option<u32>,
    dry_run: bool,
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rules_bench=info".parse()?)
                .add_directive("rules_gitlink=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Regen {
            config,
            root,
            base,
            head,
            check,
            all,
            benches,
            runs,
            dry_run,
            report,
        } => regenerate(RegenArgs {
            config,
            root,
            base,
            head,
            check,
            all,
            benches,
            runs,
            dry_run,
            report,
        }),
        Commands::List {
            config,
            root,
            format,
        } => list(config, root, format),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Load the config file or fall back to defaults, then apply the root override
/// @ai:effects fs:read
fn load_config(path: Option<PathBuf>, root: Option<PathBuf>) -> Result<RegenConfig> {
    let mut config = match path {
        Some(p) => RegenConfig::load(&p)
            .with_context(|| format!("Failed to load config from {}", p.display()))?,
        None => RegenConfig::default(),
    };

    if let Some(root) = root {
        config.paths.root = root;
    }

    Ok(config)
}

/// @ai:intent Run one regeneration pass
/// @ai:effects fs:write, process
fn regenerate(args: RegenArgs) -> Result<()> {
    let mut config = load_config(args.config, args.root)?;
    if let Some(runs) = args.runs {
        config.run.runs = runs;
    }
    config.run.check |= args.check;
    config.run.dry_run |= args.dry_run;
    let config = config.validated()?;

    let range = RevisionRange::from_parts(args.base.as_deref(), args.head.as_deref());
    let request = SelectionRequest::from_flags(args.all, &args.benches, range);

    let orchestrator = Orchestrator::from_config(config);
    let report = orchestrator.run(&request)?;

    tracing::info!(
        "Regenerated {} toolchain(s) across {} benchmark(s)",
        report.toolchain_count(),
        report.benchmarks.len()
    );

    if let Some(path) = args.report {
        JsonReporter::new()
            .generate(&report, &path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!("Pass report written to {}", path.display());
    }

    Ok(())
}

/// @ai:intent List benchmarks with their toolchains
/// @ai:effects fs:read
fn list(config: Option<PathBuf>, root: Option<PathBuf>, format: Format) -> Result<()> {
    let config = load_config(config, root)?.validated()?;
    let inventory = Orchestrator::from_config(config).inventory();

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&inventory)?),
        Format::Text => {
            if inventory.is_empty() {
                println!("No benchmarks found.");
            }
            for entry in &inventory {
                println!("{}", entry.benchmark.rule);
                if entry.toolchains.is_empty() {
                    println!("  (no toolchains)");
                }
                for toolchain in &entry.toolchains {
                    println!(
                        "  {:<12} {:<16} {}",
                        toolchain.language,
                        toolchain.protocol.name(),
                        toolchain.interpreter().as_str()
                    );
                }
            }
        }
    }

    Ok(())
}

/// @ai:intent Write a default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    if output.exists() {
        anyhow::bail!("Config file already exists: {}", output.display());
    }

    RegenConfig::default().save(&output)?;
    println!("Created default configuration at {}", output.display());
    Ok(())
}
