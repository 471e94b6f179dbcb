use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use satbench::driver::{run_all, RunConfig, RunStatus};
use satbench::layout::{Configuration, Workspace};
use satbench::logs::extract::extract_summaries;
use satbench::report;

#[derive(Parser, Debug)]
#[command(name = "satbench")]
#[command(about = "Compare a baseline SAT solver against its BDD-augmented variant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the solver over every CNF file, once per configuration.
    Run {
        #[arg(long)]
        cnf_dir: PathBuf,
        #[arg(long)]
        solver: PathBuf,
        #[arg(long, default_value = "Tests")]
        root: PathBuf,
        #[arg(long, default_value_t = 900)]
        timeout_secs: u64,
    },
    /// Build the batch summary files from the per-run raw logs.
    Extract {
        #[arg(long, default_value = "Tests")]
        root: PathBuf,
    },
    /// Parse the summaries, aggregate, and render tables and charts.
    Report {
        #[arg(long, default_value = "Tests")]
        root: PathBuf,
    },
    /// Run, extract, and report in one go.
    All {
        #[arg(long)]
        cnf_dir: PathBuf,
        #[arg(long)]
        solver: PathBuf,
        #[arg(long, default_value = "Tests")]
        root: PathBuf,
        #[arg(long, default_value_t = 900)]
        timeout_secs: u64,
    },
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter(None, log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            cnf_dir,
            solver,
            root,
            timeout_secs,
        } => {
            let ws = Workspace::new(root);
            cmd_run(&ws, cnf_dir, solver, timeout_secs)?;
        }
        Commands::Extract { root } => {
            let ws = Workspace::new(root);
            cmd_extract(&ws)?;
        }
        Commands::Report { root } => {
            let ws = Workspace::new(root);
            cmd_report(&ws)?;
        }
        Commands::All {
            cnf_dir,
            solver,
            root,
            timeout_secs,
        } => {
            let ws = Workspace::new(root);
            cmd_run(&ws, cnf_dir, solver, timeout_secs)?;
            cmd_extract(&ws)?;
            cmd_report(&ws)?;
        }
    }
    Ok(())
}

fn cmd_run(ws: &Workspace, cnf_dir: PathBuf, solver: PathBuf, timeout_secs: u64) -> Result<()> {
    let cfg = RunConfig {
        solver,
        cnf_dir,
        timeout: Duration::from_secs(timeout_secs),
    };
    let reports = run_all(ws, &cfg)?;
    let completed = reports
        .iter()
        .filter(|r| r.status == RunStatus::Completed)
        .count();
    let timeouts = reports
        .iter()
        .filter(|r| r.status == RunStatus::Timeout)
        .count();
    println!(
        "runs={} completed={} timeouts={} other={}",
        reports.len(),
        completed,
        timeouts,
        reports.len() - completed - timeouts
    );
    Ok(())
}

fn cmd_extract(ws: &Workspace) -> Result<()> {
    ws.ensure()?;
    for config in Configuration::BOTH {
        let stats = extract_summaries(ws, config)?;
        println!(
            "config={} runs={} skipped={}",
            config.label(),
            stats.runs,
            stats.skipped
        );
    }
    Ok(())
}

fn cmd_report(ws: &Workspace) -> Result<()> {
    let summary = report::generate(ws)?;
    println!(
        "artifacts={} dropped={} unmatched={}",
        summary.artifacts.len(),
        summary.dropped,
        summary.unmatched
    );
    Ok(())
}
