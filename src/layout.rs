//! On-disk layout of a benchmark workspace.
//!
//! Everything a comparison produces lives under one root: per-configuration
//! run data, the extracted summary files, and the rendered artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

/// The two solver setups under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configuration {
    Baseline,
    Bdd,
}

impl Configuration {
    /// Run order: the BDD-augmented variant first, then the baseline.
    pub const BOTH: [Configuration; 2] = [Configuration::Bdd, Configuration::Baseline];

    pub fn label(self) -> &'static str {
        match self {
            Configuration::Baseline => "baseline",
            Configuration::Bdd => "bdd",
        }
    }

    /// Value of the solver's BDD command-line flag for this configuration.
    pub fn bdd_flag(self) -> &'static str {
        match self {
            Configuration::Baseline => "false",
            Configuration::Bdd => "true",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the full directory tree, logging each directory that did not
    /// exist yet.
    pub fn ensure(&self) -> io::Result<()> {
        let dirs = [
            self.root.clone(),
            self.data_dir(Configuration::Baseline),
            self.data_dir(Configuration::Bdd),
            self.summaries_dir(),
            self.plots_dir(),
            self.keyword_plots_dir(),
        ];
        for dir in dirs {
            if !dir.exists() {
                fs::create_dir_all(&dir)?;
                info!("created {}", dir.display());
            }
        }
        Ok(())
    }

    /// Directory holding one folder per solver run of the configuration.
    pub fn data_dir(&self, config: Configuration) -> PathBuf {
        self.root.join(format!("{}_data", config.label()))
    }

    /// Folder for a single run, named after the input file.
    pub fn run_dir(&self, config: Configuration, filename: &str) -> PathBuf {
        self.data_dir(config).join(filename)
    }

    pub fn summaries_dir(&self) -> PathBuf {
        self.root.join("summaries")
    }

    /// Batch file of final counter values, one line pair per run.
    pub fn keyword_summary(&self, config: Configuration) -> PathBuf {
        self.summaries_dir()
            .join(format!("{}_keywords.txt", config.label()))
    }

    /// Batch file of first log lines (timing and outcome), one line pair
    /// per run.
    pub fn result_summary(&self, config: Configuration) -> PathBuf {
        self.summaries_dir()
            .join(format!("{}_results.txt", config.label()))
    }

    pub fn plots_dir(&self) -> PathBuf {
        self.root.join("plots")
    }

    pub fn keyword_plots_dir(&self) -> PathBuf {
        self.root.join("keyword_plots")
    }

    pub fn mean_table_txt(&self) -> PathBuf {
        self.root.join("mean_values.txt")
    }

    pub fn mean_table_svg(&self) -> PathBuf {
        self.root.join("mean_values.svg")
    }
}
