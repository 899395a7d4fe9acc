//! Sitepulse CLI - Main Entry Point
//!
//! Two subcommands, one per pipeline half: `audit` captures a Lighthouse
//! run (optionally persisting the raw report), `report` aggregates the
//! persisted runs into the HTML trend document.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::Config;
use output::OutputFormat;
use sitepulse_audit::{AuditRequest, AuditRunner};

/// Sitepulse - Lighthouse audit capture and trend reporting
#[derive(Parser)]
#[command(name = "sitepulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "sitepulse.toml", global = true)]
    config: PathBuf,

    /// Reports directory override
    #[arg(long, global = true)]
    reports_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one audit against a URL
    Audit(AuditArgs),

    /// Generate the trend report over persisted audits
    Report,
}

#[derive(Args)]
struct AuditArgs {
    /// Page to audit
    url: String,

    /// Category subset to audit
    #[arg(long, value_delimiter = ',', default_value = "performance")]
    categories: Vec<String>,

    /// Persist the raw report for trend aggregation
    #[arg(long)]
    save_report: bool,

    /// Explicit artifact path (default embeds the current time in ms)
    #[arg(long)]
    report_path: Option<PathBuf>,

    /// Check the metrics against the configured performance budget
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let mut config = Config::load(&cli.config)?;
    if let Some(dir) = cli.reports_dir {
        config.reports_dir = dir;
    }

    match cli.command {
        Commands::Audit(args) => audit(args, config, cli.format).await,
        Commands::Report => report(config),
    }
}

async fn audit(args: AuditArgs, config: Config, format: OutputFormat) -> anyhow::Result<()> {
    let runner = AuditRunner::new(config.audit_config());

    // The persister does not create directories; that is on us.
    if args.save_report {
        match args.report_path.as_ref().and_then(|p| p.parent()) {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
            Some(_) => {}
            None => std::fs::create_dir_all(runner.reports_dir())?,
        }
    }

    let request = AuditRequest {
        categories: args.categories,
        save_report: args.save_report,
        report_path: args.report_path,
    };

    let metrics = runner.run(&args.url, request).await?;
    output::print_metrics(&metrics, format);

    if args.check {
        let violations = config.thresholds.violations(&metrics);
        if !violations.is_empty() {
            eprintln!("{}", "Performance budget violations:".red().bold());
            for violation in &violations {
                eprintln!("  - {}", violation);
            }
            std::process::exit(1);
        }
        println!("{}", "Performance budget satisfied".green());
    }

    Ok(())
}

fn report(config: Config) -> anyhow::Result<()> {
    match sitepulse_report::generate_report(&config.reports_dir)? {
        Some(path) => println!("Trend report generated: {}", path.display()),
        None => println!("No performance reports to show."),
    }
    Ok(())
}
