//! Runs the external solver over a directory of CNF formulas.
//!
//! One invocation per input file per configuration, sequentially. The
//! solver writes its own raw log into the run folder; the driver captures
//! stdout/stderr alongside it and bounds each run with a wall-clock
//! timeout, killing the child on expiry. A solver that fails to start or
//! exits non-zero is logged and the batch moves on.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{ChildStderr, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::layout::{Configuration, Workspace};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub solver: PathBuf,
    pub cnf_dir: PathBuf,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    NonZeroExit(Option<i32>),
    Timeout,
    SpawnFailed,
}

impl RunStatus {
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Completed => "completed",
            RunStatus::NonZeroExit(_) => "nonzero_exit",
            RunStatus::Timeout => "timeout",
            RunStatus::SpawnFailed => "spawn_failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub input: PathBuf,
    pub config: Configuration,
    pub status: RunStatus,
    pub wall_ms: u128,
}

/// Runs the whole batch: every input once per configuration, in
/// [`Configuration::BOTH`] order.
pub fn run_all(ws: &Workspace, cfg: &RunConfig) -> Result<Vec<RunReport>> {
    ws.ensure()?;
    let inputs = discover_inputs(&cfg.cnf_dir)
        .with_context(|| format!("listing CNF inputs under {}", cfg.cnf_dir.display()))?;
    info!("found {} CNF files under {}", inputs.len(), cfg.cnf_dir.display());

    let mut reports = Vec::with_capacity(inputs.len() * 2);
    for config in Configuration::BOTH {
        for input in &inputs {
            let report = run_one(ws, config, cfg, input)?;
            info!(
                "input={} config={} status={} wall_ms={}",
                report.input.display(),
                config.label(),
                report.status.label(),
                report.wall_ms
            );
            reports.push(report);
        }
    }
    Ok(reports)
}

/// All `.cnf` files under `dir`, recursively, sorted.
pub fn discover_inputs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    collect_inputs(dir, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_inputs(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_inputs(&path, out)?;
            continue;
        }
        if path.extension().and_then(|x| x.to_str()) == Some("cnf") {
            out.push(path);
        }
    }
    Ok(())
}

pub fn run_one(
    ws: &Workspace,
    config: Configuration,
    cfg: &RunConfig,
    input: &Path,
) -> Result<RunReport> {
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let run_dir = ws.run_dir(config, &filename);
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("creating run folder {}", run_dir.display()))?;

    let start = Instant::now();
    let spawned = Command::new(&cfg.solver)
        .arg(input)
        .arg(config.bdd_flag())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            warn!("failed to start solver {}: {e}", cfg.solver.display());
            return Ok(RunReport {
                input: input.to_path_buf(),
                config,
                status: RunStatus::SpawnFailed,
                wall_ms: start.elapsed().as_millis(),
            });
        }
    };

    // Drain the pipes off-thread so a chatty solver cannot fill them and
    // stall while we wait.
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let stdout_reader = thread::spawn(move || drain_stdout(stdout_pipe));
    let stderr_reader = thread::spawn(move || drain_stderr(stderr_pipe));

    let status = loop {
        match child.try_wait()? {
            Some(exit) if exit.success() => break RunStatus::Completed,
            Some(exit) => {
                warn!(
                    "solver exited with status {:?} on {}",
                    exit.code(),
                    input.display()
                );
                break RunStatus::NonZeroExit(exit.code());
            }
            None if start.elapsed() >= cfg.timeout => {
                warn!(
                    "solver exceeded {}s on {}, killing",
                    cfg.timeout.as_secs(),
                    input.display()
                );
                let _ = child.kill();
                child.wait()?;
                break RunStatus::Timeout;
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };
    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    write_capture(&run_dir.join("solver_output.txt"), &stdout)?;
    if !stderr.is_empty() {
        write_capture(&run_dir.join("solver_stderr.txt"), &stderr)?;
    }

    Ok(RunReport {
        input: input.to_path_buf(),
        config,
        status,
        wall_ms: start.elapsed().as_millis(),
    })
}

fn drain_stdout(pipe: Option<ChildStdout>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}

fn drain_stderr(pipe: Option<ChildStderr>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}

fn write_capture(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("writing capture {}", path.display()))?;
    file.write_all(bytes)?;
    Ok(())
}
