use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::time::Duration;

use fingerprint::{ErrorKind, FingerprintError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of one ordered pair: screen result against ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TruePositive,
    FalsePositive,
    TrueNegative,
    FalseNegative,
}

impl Outcome {
    pub fn classify(screen: bool, truth: bool) -> Self {
        match (screen, truth) {
            (true, true) => Outcome::TruePositive,
            (true, false) => Outcome::FalsePositive,
            (false, false) => Outcome::TrueNegative,
            (false, true) => Outcome::FalseNegative,
        }
    }
}

/// TP/FP/TN/FN counters.
///
/// Merging is associative and commutative, so counts from shards of the
/// pair space can be summed in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

impl ConfusionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::TruePositive => self.true_positives += 1,
            Outcome::FalsePositive => self.false_positives += 1,
            Outcome::TrueNegative => self.true_negatives += 1,
            Outcome::FalseNegative => self.false_negatives += 1,
        }
    }

    /// Classify and count one pair.
    pub fn record_pair(&mut self, screen: bool, truth: bool) -> Outcome {
        let outcome = Outcome::classify(screen, truth);
        self.record(outcome);
        outcome
    }

    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// `(TP + TN) / total`, or 0 when nothing was counted.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// `TP / (TP + FN)`, or 0 without positives.
    pub fn true_positive_rate(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// `FP / (FP + TN)`, or 0 without negatives.
    pub fn false_positive_rate(&self) -> f64 {
        ratio(
            self.false_positives,
            self.false_positives + self.true_negatives,
        )
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Add for ConfusionCounts {
    type Output = ConfusionCounts;

    fn add(mut self, rhs: ConfusionCounts) -> ConfusionCounts {
        self += rhs;
        self
    }
}

impl AddAssign for ConfusionCounts {
    fn add_assign(&mut self, rhs: ConfusionCounts) {
        self.true_positives += rhs.true_positives;
        self.false_positives += rhs.false_positives;
        self.true_negatives += rhs.true_negatives;
        self.false_negatives += rhs.false_negatives;
    }
}

impl Sum for ConfusionCounts {
    fn sum<I: Iterator<Item = ConfusionCounts>>(iter: I) -> Self {
        iter.fold(ConfusionCounts::default(), Add::add)
    }
}

/// Configuration for an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Corpus growth per incremental step; `0` means a tenth of the corpus.
    #[serde(default)]
    pub interval: usize,
    /// Fingerprint and score pairs with rayon.
    #[serde(default)]
    pub use_parallel: bool,
    /// Keep the ids of every false-negative pair in the report.
    #[serde(default = "EvaluationConfig::default_record_false_negatives")]
    pub record_false_negatives: bool,
}

impl EvaluationConfig {
    pub(crate) fn default_record_false_negatives() -> bool {
        true
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_false_negatives(mut self, record: bool) -> Self {
        self.record_false_negatives = record;
        self
    }

    /// Step size for a corpus of `corpus_len` graphs.
    pub fn effective_interval(&self, corpus_len: usize) -> usize {
        if self.interval > 0 {
            self.interval
        } else {
            (corpus_len / 10).max(1)
        }
    }

    pub fn validate(&self) -> Result<(), ScreeningError> {
        if self.version < 1 {
            return Err(ScreeningError::InvalidConfig(format!(
                "version must be >= 1 (got {})",
                self.version
            )));
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            version: 1,
            interval: 0,
            use_parallel: false,
            record_false_negatives: Self::default_record_false_negatives(),
        }
    }
}

/// A graph left out of scoring because it could not be fingerprinted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGraph {
    pub id: String,
    pub error: FingerprintError,
}

impl SkippedGraph {
    /// Skipped because it was too path-dense for the configured depth.
    pub fn is_intractable(&self) -> bool {
        self.error.kind() == ErrorKind::PathLimitExceeded
    }
}

/// A pair the oracle accepted but the screen rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FalseNegativePair {
    pub target: String,
    pub query: String,
}

/// Result of scoring every ordered pair of the current corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    /// Graphs that were fingerprinted and scored.
    pub corpus_size: usize,
    pub skipped: Vec<SkippedGraph>,
    pub counts: ConfusionCounts,
    pub elapsed: Duration,
    /// Empty unless `record_false_negatives` is set.
    pub false_negatives: Vec<FalseNegativePair>,
}

impl EvaluationReport {
    /// Graphs offered so far, scored or skipped.
    pub fn graphs_seen(&self) -> usize {
        self.corpus_size + self.skipped.len()
    }
}

/// Errors produced by the evaluation harness.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreeningError {
    #[error("invalid evaluation config: {0}")]
    InvalidConfig(String),

    #[error("fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),
}
