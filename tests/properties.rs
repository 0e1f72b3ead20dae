//! Property-based tests for fingerprint generation and screening.
//!
//! These hold for any labeled graph:
//! - Generation is deterministic and independent of atom numbering
//! - A graph always screens as a substructure of itself and its supergraphs
//! - Deeper walks only add path keys
//! - Bloom filters never forget an inserted key

mod common;

use proptest::prelude::*;

use molfp::{
    is_subset, Atom, Bond, BondOrder, ConfusionCounts, FingerprintConfig, FingerprintKind,
    Fingerprinter, MolGraph,
};

const SYMBOLS: [&str; 5] = ["C", "N", "O", "S", "Cl"];
const ORDERS: [BondOrder; 3] = [BondOrder::Single, BondOrder::Double, BondOrder::Aromatic];

/// Construction recipe: atom `i > 0` hangs off `parents[i] % i`, extra pairs
/// close rings.
#[derive(Debug, Clone)]
struct Recipe {
    symbols: Vec<usize>,
    parents: Vec<usize>,
    orders: Vec<usize>,
    extra: Vec<(usize, usize, usize)>,
}

impl Recipe {
    fn len(&self) -> usize {
        self.symbols.len()
    }

    fn edges(&self, keep: usize) -> Vec<(usize, usize, BondOrder)> {
        let mut edges = Vec::new();
        for i in 1..keep {
            edges.push((self.parents[i] % i, i, ORDERS[self.orders[i]]));
        }
        for &(a, b, order) in &self.extra {
            let (a, b) = (a % self.len(), b % self.len());
            if a != b && a < keep && b < keep {
                edges.push((a.min(b), a.max(b), ORDERS[order]));
            }
        }
        // First order given for a pair wins, whatever the insertion order.
        let mut seen = std::collections::BTreeSet::new();
        edges.retain(|&(a, b, _)| seen.insert((a, b)));
        edges
    }

    /// The graph on the first `keep` atoms; `reversed` numbers atoms backwards.
    fn build(&self, keep: usize, reversed: bool) -> MolGraph {
        let slot = |i: usize| if reversed { keep - 1 - i } else { i };
        let mut g = MolGraph::new();
        let mut ids = vec![None; keep];
        for k in 0..keep {
            let original = slot(k);
            ids[original] = Some(g.add_atom(Atom::new(SYMBOLS[self.symbols[original]])));
        }
        let ids: Vec<_> = ids.into_iter().map(Option::unwrap).collect();

        let mut edges = self.edges(keep);
        if reversed {
            edges.reverse();
        }
        for (a, b, order) in edges {
            g.add_bond(ids[a], ids[b], Bond::new(order)).unwrap();
        }
        let rings = common::perceive_rings(&g);
        g.set_rings(rings).unwrap();
        g
    }
}

prop_compose! {
    fn arb_recipe()(n in 1usize..9)(
        symbols in prop::collection::vec(0usize..SYMBOLS.len(), n),
        parents in prop::collection::vec(any::<usize>(), n),
        orders in prop::collection::vec(0usize..ORDERS.len(), n),
        extra in prop::collection::vec((any::<usize>(), any::<usize>(), 0usize..ORDERS.len()), 0..3),
    ) -> Recipe {
        Recipe { symbols, parents, orders, extra }
    }
}

fn fingerprinter(kind: FingerprintKind) -> Fingerprinter {
    Fingerprinter::new(FingerprintConfig::new().with_kind(kind)).unwrap()
}

mod generation_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn generation_is_deterministic(recipe in arb_recipe()) {
            let graph = recipe.build(recipe.len(), false);
            for kind in [
                FingerprintKind::PathHashed,
                FingerprintKind::Bloom,
                FingerprintKind::Scaffold,
                FingerprintKind::ShortestPath,
            ] {
                let fp = fingerprinter(kind);
                prop_assert_eq!(fp.generate(&graph).unwrap(), fp.generate(&graph).unwrap());
            }
        }

        #[test]
        fn atom_numbering_is_irrelevant(recipe in arb_recipe()) {
            let forward = recipe.build(recipe.len(), false);
            let backward = recipe.build(recipe.len(), true);
            for kind in [
                FingerprintKind::PathHashed,
                FingerprintKind::Bloom,
                FingerprintKind::ShortestPath,
            ] {
                let fp = fingerprinter(kind);
                prop_assert_eq!(
                    fp.generate(&forward).unwrap().bits,
                    fp.generate(&backward).unwrap().bits
                );
            }
        }

        #[test]
        fn deeper_walks_only_add_keys(recipe in arb_recipe(), depth in 0usize..6) {
            let graph = recipe.build(recipe.len(), false);
            let shallow = Fingerprinter::new(FingerprintConfig::new().with_max_depth(depth))
                .unwrap()
                .path_keys(&graph)
                .unwrap();
            let deep = Fingerprinter::new(FingerprintConfig::new().with_max_depth(depth + 1))
                .unwrap()
                .path_keys(&graph)
                .unwrap();
            prop_assert!(shallow.is_subset(&deep));
        }

        #[test]
        fn bloom_filter_has_no_false_negatives(recipe in arb_recipe()) {
            let graph = recipe.build(recipe.len(), false);
            let fp = fingerprinter(FingerprintKind::Bloom);
            let filter = fp.bloom_filter(&graph).unwrap();
            for key in fp.path_keys(&graph).unwrap() {
                prop_assert!(filter.contains(&key), "lost key {}", key);
            }
        }
    }
}

mod screening_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn graph_screens_inside_itself(recipe in arb_recipe()) {
            let graph = recipe.build(recipe.len(), false);
            for kind in [
                FingerprintKind::PathHashed,
                FingerprintKind::Bloom,
                FingerprintKind::Scaffold,
            ] {
                let fp = fingerprinter(kind).generate(&graph).unwrap();
                prop_assert!(is_subset(&fp, &fp).unwrap());
            }
        }

        #[test]
        fn prefix_subgraph_screens_inside_whole(recipe in arb_recipe(), cut in any::<usize>()) {
            let whole = recipe.build(recipe.len(), false);
            let part = recipe.build(1 + cut % recipe.len(), false);
            for kind in [FingerprintKind::PathHashed, FingerprintKind::Bloom] {
                let fp = fingerprinter(kind);
                prop_assert!(is_subset(
                    &fp.generate(&whole).unwrap(),
                    &fp.generate(&part).unwrap()
                ).unwrap());
            }
        }

        #[test]
        fn confusion_counts_cover_every_pair(pairs in prop::collection::vec((any::<bool>(), any::<bool>()), 0..200)) {
            let mut counts = ConfusionCounts::new();
            for &(screen, truth) in &pairs {
                counts.record_pair(screen, truth);
            }
            prop_assert_eq!(counts.total(), pairs.len() as u64);
            let positives = pairs.iter().filter(|(screen, _)| *screen).count() as u64;
            prop_assert_eq!(counts.true_positives + counts.false_positives, positives);
            prop_assert!((0.0..=1.0).contains(&counts.accuracy()));
        }
    }
}
