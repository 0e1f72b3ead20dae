use graph::MolGraph;

/// Ground truth for substructure containment.
///
/// Implementations answer whether `query` occurs in `target` as a subgraph.
/// The harness never consults the oracle while fingerprinting; it is only
/// used to classify screen results.
pub trait ExactMatchOracle: Send + Sync {
    fn contains(&self, query: &MolGraph, target: &MolGraph) -> bool;
}

impl<F> ExactMatchOracle for F
where
    F: Fn(&MolGraph, &MolGraph) -> bool + Send + Sync,
{
    fn contains(&self, query: &MolGraph, target: &MolGraph) -> bool {
        self(query, target)
    }
}
