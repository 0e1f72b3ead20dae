//! Workspace umbrella crate for molfp molecular fingerprints.
//!
//! Re-exports the graph model, the fingerprint engine and the screening
//! harness so callers can depend on one crate, and adds the YAML
//! configuration loader plus a pair-screening shortcut.
//!
//! ```
//! use molfp::{screen_pair, Atom, Bond, FingerprintConfig, Fingerprinter, MolGraph};
//!
//! let mut ethylamine = MolGraph::new();
//! let c1 = ethylamine.add_atom(Atom::new("C"));
//! let c2 = ethylamine.add_atom(Atom::new("C"));
//! let n = ethylamine.add_atom(Atom::new("N"));
//! ethylamine.add_bond(c1, c2, Bond::single()).unwrap();
//! ethylamine.add_bond(c2, n, Bond::single()).unwrap();
//!
//! let mut amine = MolGraph::new();
//! let c = amine.add_atom(Atom::new("C"));
//! let n = amine.add_atom(Atom::new("N"));
//! amine.add_bond(c, n, Bond::single()).unwrap();
//!
//! let fp = Fingerprinter::new(FingerprintConfig::default()).unwrap();
//! assert!(screen_pair(&fp, &ethylamine, &amine).unwrap());
//! ```

pub mod config;

pub use crate::config::{ConfigLoadError, EvaluationYamlConfig, FingerprintYamlConfig, MolfpConfig};
pub use fingerprint::{
    algorithm_name, is_subset, scaffold_layout, BitHasher, BitVector, BloomFilter, Enumeration,
    ErrorKind, Fingerprint, FingerprintConfig, FingerprintError, FingerprintGenerator,
    FingerprintKind, FingerprintMeta, Fingerprinter, LabelStyle, LabelTable, PathRef, PathWalker,
    Segment, SegmentKind, Token, FINGERPRINT_VERSION, MAX_DEPTH_LIMIT,
};
pub use graph::{
    AnnotatedRings, Atom, AtomId, Bond, BondId, BondOrder, GraphError, MolGraph, Ring,
    RingPerception,
};
pub use screening::{
    run_incremental, set_evaluation_metrics, Admission, ConfusionCounts, EvaluationConfig,
    EvaluationMetrics, EvaluationReport, Evaluator, ExactMatchOracle, FalseNegativePair, Outcome,
    ScreeningError, SkippedGraph,
};

use tracing::debug;

/// Screen one pair: could `query` be a substructure of `target`?
///
/// Fingerprints both graphs with `fingerprinter` and applies [`is_subset`].
/// A `false` answer is definitive; `true` may be a hash-collision false
/// positive.
pub fn screen_pair(
    fingerprinter: &Fingerprinter,
    target: &MolGraph,
    query: &MolGraph,
) -> Result<bool, FingerprintError> {
    let target_fp = fingerprinter.generate(target)?;
    let query_fp = fingerprinter.generate(query)?;
    let hit = is_subset(&target_fp, &query_fp)?;
    debug!(
        kind = fingerprinter.config().kind.as_str(),
        target_bits = target_fp.cardinality(),
        query_bits = query_fp.cardinality(),
        hit,
        "screen_pair"
    );
    Ok(hit)
}
