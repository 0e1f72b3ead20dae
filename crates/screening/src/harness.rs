//! All-pairs evaluation of a fingerprint screen against an exact-match oracle.
//!
//! For every ordered pair `(A, B)` of the scored corpus, self-pairs included,
//! `A` is the target and `B` the query on both sides of the comparison:
//!
//! - screen: `is_subset(fp(A), fp(B))`
//! - truth: `oracle.contains(query = B, target = A)`
//!
//! Swapping the operands on only one side turns every asymmetric true match
//! into a false negative, so both use the same orientation.

use std::sync::Arc;
use std::time::Instant;

use fingerprint::{is_subset, Fingerprint, FingerprintError, FingerprintGenerator};
use graph::MolGraph;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::metrics::metrics_recorder;
use crate::oracle::ExactMatchOracle;
use crate::types::{
    ConfusionCounts, EvaluationConfig, EvaluationReport, FalseNegativePair, Outcome,
    ScreeningError, SkippedGraph,
};

/// What happened to a graph offered to the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Scored,
    Skipped(FingerprintError),
}

#[derive(Debug)]
struct Entry {
    id: String,
    graph: MolGraph,
    fingerprint: Fingerprint,
}

/// Growing corpus of fingerprinted graphs.
///
/// Graphs are fingerprinted once when admitted; each [`evaluate`](Self::evaluate)
/// rescores every ordered pair of the current corpus.
pub struct Evaluator {
    generator: Arc<dyn FingerprintGenerator>,
    oracle: Arc<dyn ExactMatchOracle>,
    config: EvaluationConfig,
    entries: Vec<Entry>,
    skipped: Vec<SkippedGraph>,
}

impl Evaluator {
    pub fn new(
        generator: Arc<dyn FingerprintGenerator>,
        oracle: Arc<dyn ExactMatchOracle>,
        config: EvaluationConfig,
    ) -> Result<Self, ScreeningError> {
        config.validate()?;
        Ok(Self {
            generator,
            oracle,
            config,
            entries: Vec::new(),
            skipped: Vec::new(),
        })
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Number of scored graphs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped(&self) -> &[SkippedGraph] {
        &self.skipped
    }

    /// Fingerprint and admit one graph.
    pub fn add_graph(&mut self, id: impl Into<String>, graph: MolGraph) -> Admission {
        let fingerprint = self.generator.fingerprint(&graph);
        self.admit(id.into(), graph, fingerprint)
    }

    /// Admit many graphs, fingerprinting them in parallel when configured.
    /// Admissions come back in input order.
    pub fn extend<I>(&mut self, graphs: I) -> Vec<Admission>
    where
        I: IntoIterator<Item = (String, MolGraph)>,
    {
        let graphs: Vec<(String, MolGraph)> = graphs.into_iter().collect();
        let fingerprints: Vec<Result<Fingerprint, FingerprintError>> = if self.config.use_parallel {
            graphs
                .par_iter()
                .map(|(_, g)| self.generator.fingerprint(g))
                .collect()
        } else {
            graphs
                .iter()
                .map(|(_, g)| self.generator.fingerprint(g))
                .collect()
        };

        graphs
            .into_iter()
            .zip(fingerprints)
            .map(|((id, graph), fingerprint)| self.admit(id, graph, fingerprint))
            .collect()
    }

    /// Score every ordered pair of the current corpus.
    pub fn evaluate(&self) -> Result<EvaluationReport, ScreeningError> {
        let start = Instant::now();
        let rows: Vec<(ConfusionCounts, Vec<FalseNegativePair>)> = if self.config.use_parallel {
            (0..self.entries.len())
                .into_par_iter()
                .map(|i| self.score_row(i))
                .collect::<Result<_, _>>()?
        } else {
            (0..self.entries.len())
                .map(|i| self.score_row(i))
                .collect::<Result<_, _>>()?
        };

        let mut counts = ConfusionCounts::default();
        let mut false_negatives = Vec::new();
        for (row_counts, row_misses) in rows {
            counts += row_counts;
            false_negatives.extend(row_misses);
        }
        let elapsed = start.elapsed();

        info!(
            corpus_size = self.entries.len(),
            skipped = self.skipped.len(),
            true_positives = counts.true_positives,
            false_positives = counts.false_positives,
            true_negatives = counts.true_negatives,
            false_negatives = counts.false_negatives,
            elapsed_micros = elapsed.as_micros() as u64,
            "evaluation_complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_evaluation(self.entries.len(), &counts, elapsed);
        }

        Ok(EvaluationReport {
            corpus_size: self.entries.len(),
            skipped: self.skipped.clone(),
            counts,
            elapsed,
            false_negatives,
        })
    }

    fn admit(
        &mut self,
        id: String,
        graph: MolGraph,
        fingerprint: Result<Fingerprint, FingerprintError>,
    ) -> Admission {
        match fingerprint {
            Ok(fingerprint) => {
                self.entries.push(Entry {
                    id,
                    graph,
                    fingerprint,
                });
                Admission::Scored
            }
            Err(err) => {
                warn!(id = %id, error = %err, "graph_skipped");
                if let Some(recorder) = metrics_recorder() {
                    recorder.record_skipped(&id, &err);
                }
                self.skipped.push(SkippedGraph {
                    id,
                    error: err.clone(),
                });
                Admission::Skipped(err)
            }
        }
    }

    /// Pairs with entry `i` as the target.
    fn score_row(
        &self,
        i: usize,
    ) -> Result<(ConfusionCounts, Vec<FalseNegativePair>), ScreeningError> {
        let target = &self.entries[i];
        let mut counts = ConfusionCounts::default();
        let mut misses = Vec::new();
        for query in &self.entries {
            let screen = is_subset(&target.fingerprint, &query.fingerprint)?;
            let truth = self.oracle.contains(&query.graph, &target.graph);
            if counts.record_pair(screen, truth) == Outcome::FalseNegative {
                debug!(target_id = %target.id, query_id = %query.id, "false_negative");
                if self.config.record_false_negatives {
                    misses.push(FalseNegativePair {
                        target: target.id.clone(),
                        query: query.id.clone(),
                    });
                }
            }
        }
        Ok((counts, misses))
    }
}

/// Grow a corpus from `graphs` in steps of the configured interval and
/// evaluate after each step; the last step may be shorter.
pub fn run_incremental<I>(
    generator: Arc<dyn FingerprintGenerator>,
    oracle: Arc<dyn ExactMatchOracle>,
    config: EvaluationConfig,
    graphs: I,
) -> Result<Vec<EvaluationReport>, ScreeningError>
where
    I: IntoIterator<Item = (String, MolGraph)>,
{
    let graphs: Vec<(String, MolGraph)> = graphs.into_iter().collect();
    let step = config.effective_interval(graphs.len());
    let mut evaluator = Evaluator::new(generator, oracle, config)?;
    let mut reports = Vec::with_capacity(graphs.len().div_ceil(step));

    let mut remaining = graphs.into_iter().peekable();
    while remaining.peek().is_some() {
        let chunk: Vec<(String, MolGraph)> = remaining.by_ref().take(step).collect();
        evaluator.extend(chunk);
        reports.push(evaluator.evaluate()?);
    }
    Ok(reports)
}
