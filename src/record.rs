use indexmap::IndexMap;

use crate::error::BenchError;

/// Counter series the solver instrumentation emits, in the order they
/// appear in its logs.
pub const KEYWORDS: [&str; 7] = [
    "restarts",
    "conflicts",
    "decisions",
    "conflicLiterals",
    "blockedRestarts",
    "reducedDatabase",
    "propagations",
];

/// Wall-clock ceiling in seconds for a single solver run. Indeterminate
/// results are always reported at this value, whatever time was logged.
pub const TIMEOUT_SECS: f64 = 900.0;

/// Final counter values of one solver run, keyed by instrumentation
/// keyword. Insertion order follows the log; a repeated keyword overwrites
/// its earlier value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub filename: String,
    pub metrics: IndexMap<String, i64>,
}

impl RunRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        RunRecord {
            filename: filename.into(),
            metrics: IndexMap::new(),
        }
    }

    pub fn metric(&self, keyword: &str) -> Option<i64> {
        self.metrics.get(keyword).copied()
    }

    /// Serializes the metrics back into the summary-file token form,
    /// `keyword:value` separated by single spaces.
    pub fn metrics_line(&self) -> String {
        self.metrics
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Timing and outcome of one solver run, outcome still verbatim from the
/// log. Conversion to [`Outcome`] happens during categorization so an
/// unknown string fails loudly instead of being dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub filename: String,
    pub seconds: f64,
    pub outcome: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sat,
    Unsat,
    Indeterminate,
}

impl Outcome {
    /// Textual forms as the solver writes them.
    pub fn parse(s: &str) -> Result<Outcome, BenchError> {
        match s {
            "SAT" => Ok(Outcome::Sat),
            "UNSAT" => Ok(Outcome::Unsat),
            "indeterminate" => Ok(Outcome::Indeterminate),
            other => Err(BenchError::UnknownOutcome(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Sat => "SAT",
            Outcome::Unsat => "UNSAT",
            Outcome::Indeterminate => "INDETERMINATE",
        }
    }
}

/// A categorized result, time already clamped for indeterminate runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedResult {
    pub filename: String,
    pub seconds: f64,
    pub outcome: Outcome,
}
