//! # molfp Screening Evaluation (`screening`)
//!
//! Measures how well a fingerprint screen predicts true substructure
//! containment. Every ordered pair of a corpus is screened with
//! [`fingerprint::is_subset`] and checked against an [`ExactMatchOracle`];
//! the outcomes accumulate into [`ConfusionCounts`].
//!
//! ## Core Types
//!
//! - [`Evaluator`]: a growing corpus; graphs are fingerprinted once on
//!   admission and [`Evaluator::evaluate`] rescores all pairs.
//! - [`Admission`]: whether a graph was scored or skipped, and why.
//! - [`EvaluationReport`]: counts, skipped graphs, timing and optionally the
//!   false-negative pairs.
//! - [`run_incremental`]: evaluate after every `interval` new graphs.
//!
//! A graph whose fingerprinting fails (for instance with
//! `PathLimitExceeded`) is reported in [`EvaluationReport::skipped`]; it is
//! never counted as a negative.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use fingerprint::{FingerprintConfig, Fingerprinter};
//! use graph::{Atom, Bond, MolGraph};
//! use screening::{EvaluationConfig, Evaluator};
//!
//! fn chain(n: usize) -> MolGraph {
//!     let mut g = MolGraph::new();
//!     let ids: Vec<_> = (0..n).map(|_| g.add_atom(Atom::new("C"))).collect();
//!     for pair in ids.windows(2) {
//!         g.add_bond(pair[0], pair[1], Bond::single()).unwrap();
//!     }
//!     g
//! }
//!
//! let generator = Arc::new(Fingerprinter::new(FingerprintConfig::default()).unwrap());
//! let oracle = Arc::new(|query: &MolGraph, target: &MolGraph| {
//!     query.atom_count() <= target.atom_count()
//! });
//!
//! let mut evaluator = Evaluator::new(generator, oracle, EvaluationConfig::default()).unwrap();
//! evaluator.add_graph("propane", chain(3));
//! evaluator.add_graph("butane", chain(4));
//!
//! let report = evaluator.evaluate().unwrap();
//! assert_eq!(report.counts.total(), 4);
//! assert_eq!(report.counts.false_negatives, 0);
//! ```
//!
//! ## Observability
//!
//! Install an [`EvaluationMetrics`] implementation via
//! [`set_evaluation_metrics`] to receive skipped graphs and finished
//! evaluations from every [`Evaluator`].

mod harness;
pub mod metrics;
mod oracle;
pub mod types;

pub use crate::harness::{run_incremental, Admission, Evaluator};
pub use crate::metrics::{set_evaluation_metrics, EvaluationMetrics};
pub use crate::oracle::ExactMatchOracle;
pub use crate::types::{
    ConfusionCounts, EvaluationConfig, EvaluationReport, FalseNegativePair, Outcome,
    ScreeningError, SkippedGraph,
};
