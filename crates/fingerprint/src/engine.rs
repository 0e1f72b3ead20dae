//! Fingerprint generation for all four kinds.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use graph::{AnnotatedRings, MolGraph, Ring, RingPerception};
use rayon::prelude::*;
use tracing::{debug, warn, Level};

use crate::bits::BitVector;
use crate::bloom::BloomFilter;
use crate::config::{FingerprintConfig, FingerprintError, FingerprintKind};
use crate::encoder::{LabelStyle, LabelTable};
use crate::fingerprint::{Fingerprint, FingerprintMeta};
use crate::hasher::{BitHasher, Token};
use crate::scaffold::{compose, scaffold_segments};
use crate::walker::{Enumeration, PathWalker};
use crate::{algorithm_name, FINGERPRINT_VERSION};

/// Anything that turns a graph into a fixed-length fingerprint.
///
/// The evaluation harness depends on this seam only; every fingerprint it
/// produces must have exactly [`size`](FingerprintGenerator::size) bits.
pub trait FingerprintGenerator: Send + Sync {
    fn fingerprint(&self, graph: &MolGraph) -> Result<Fingerprint, FingerprintError>;

    fn size(&self) -> usize;
}

/// Generates fingerprints of one [`FingerprintConfig`].
///
/// Holds no per-graph state: a single instance can serve any number of
/// threads, and each call allocates its own label tables and buffers.
#[derive(Clone)]
pub struct Fingerprinter {
    config: FingerprintConfig,
    rings: Arc<dyn RingPerception>,
}

impl fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fingerprinter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Fingerprinter {
    /// Validate `config` and build a generator that reads ring annotations
    /// from the graphs themselves.
    pub fn new(config: FingerprintConfig) -> Result<Self, FingerprintError> {
        config.validate()?;
        Ok(Self {
            config,
            rings: Arc::new(AnnotatedRings),
        })
    }

    /// Replace the ring-perception collaborator.
    pub fn with_ring_perception(mut self, rings: Arc<dyn RingPerception>) -> Self {
        self.rings = rings;
        self
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    /// Fingerprint one graph.
    pub fn generate(&self, graph: &MolGraph) -> Result<Fingerprint, FingerprintError> {
        let start = Instant::now();
        let span = tracing::span!(
            Level::DEBUG,
            "fingerprint.generate",
            kind = self.config.kind.as_str(),
            atoms = graph.atom_count(),
            bonds = graph.bond_count()
        );
        let _guard = span.enter();

        match self.bits(graph) {
            Ok(bits) => {
                debug!(
                    set_bits = bits.cardinality(),
                    elapsed_micros = start.elapsed().as_micros() as u64,
                    "fingerprint_generated"
                );
                Ok(Fingerprint {
                    bits,
                    meta: self.meta(),
                })
            }
            Err(err) => {
                warn!(
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros() as u64,
                    "fingerprint_failed"
                );
                Err(err)
            }
        }
    }

    /// Fingerprint many graphs; results keep input order and one failure
    /// never affects the others.
    pub fn generate_batch(&self, graphs: &[MolGraph]) -> Vec<Result<Fingerprint, FingerprintError>> {
        if self.config.use_parallel {
            graphs.par_iter().map(|g| self.generate(g)).collect()
        } else {
            graphs.iter().map(|g| self.generate(g)).collect()
        }
    }

    /// Deduplicated canonical path keys this configuration hashes for `graph`.
    ///
    /// Scaffold fingerprints report the keys of their full-path segment.
    pub fn path_keys(&self, graph: &MolGraph) -> Result<BTreeSet<String>, FingerprintError> {
        let (enumeration, styles) = self.path_plan();
        path_keys(graph, &self.walker(), enumeration, styles)
    }

    /// Bloom filter over the path-token range holding every path and charge
    /// token of `graph`.
    pub fn bloom_filter(&self, graph: &MolGraph) -> Result<BloomFilter, FingerprintError> {
        let m = self.config.path_bits();
        let n = self.config.bloom_expected_items.unwrap_or(m);
        let mut filter = BloomFilter::new(m, n, self.config.seed)?;
        for key in self.path_keys(graph)? {
            filter.add(&key);
        }
        if self.config.respect_formal_charges {
            for charge in formal_charges(graph) {
                filter.insert(&Token::Charge(charge));
            }
        }
        Ok(filter)
    }

    fn bits(&self, graph: &MolGraph) -> Result<BitVector, FingerprintError> {
        match self.config.kind {
            FingerprintKind::PathHashed | FingerprintKind::ShortestPath => self.hashed_bits(graph),
            FingerprintKind::Bloom => self.bloom_bits(graph),
            FingerprintKind::Scaffold => {
                let rings = self.rings.perceive(graph)?;
                let segments = scaffold_segments(graph, &self.config, &rings)?;
                compose(self.config.size, &segments)
            }
        }
    }

    fn hashed_bits(&self, graph: &MolGraph) -> Result<BitVector, FingerprintError> {
        let cfg = &self.config;
        let hasher = BitHasher::new(cfg.seed);
        let path_bits = cfg.path_bits();
        let mut bits = BitVector::new(cfg.size);

        for key in self.path_keys(graph)? {
            bits.set(hasher.position(&Token::Path(&key), path_bits));
        }
        if cfg.respect_formal_charges {
            for charge in formal_charges(graph) {
                bits.set(hasher.position(&Token::Charge(charge), path_bits));
            }
        }
        if cfg.respect_ring_matches {
            let (offset, bound) = self.ring_range();
            for size in ring_sizes(&self.rings.perceive(graph)?) {
                bits.set(offset + hasher.position(&Token::RingSize(size), bound));
            }
        }
        Ok(bits)
    }

    fn bloom_bits(&self, graph: &MolGraph) -> Result<BitVector, FingerprintError> {
        let cfg = &self.config;
        let mut filter = self.bloom_filter(graph)?;
        let sizes = if cfg.respect_ring_matches {
            ring_sizes(&self.rings.perceive(graph)?)
        } else {
            BTreeSet::new()
        };

        let mut bits = BitVector::new(cfg.size);
        if cfg.ring_bits == 0 {
            for size in sizes {
                filter.insert(&Token::RingSize(size));
            }
        } else {
            let hasher = BitHasher::new(cfg.seed);
            let (offset, bound) = self.ring_range();
            for size in sizes {
                bits.set(offset + hasher.position(&Token::RingSize(size), bound));
            }
        }
        bits.splice(0, filter.bits())?;
        Ok(bits)
    }

    /// Where ring-size tokens land: the reserved tail, or the path range.
    fn ring_range(&self) -> (usize, usize) {
        let cfg = &self.config;
        if cfg.ring_bits > 0 {
            (cfg.path_bits(), cfg.ring_bits)
        } else {
            (0, cfg.size)
        }
    }

    fn path_plan(&self) -> (Enumeration, &'static [LabelStyle]) {
        match self.config.kind {
            FingerprintKind::ShortestPath => (
                Enumeration::ShortestPaths,
                &[LabelStyle::RING_AWARE, LabelStyle::TOPOLOGY],
            ),
            _ => (Enumeration::AllSimplePaths, &[LabelStyle::STANDARD]),
        }
    }

    fn walker(&self) -> PathWalker {
        PathWalker::from_config(&self.config)
    }

    fn meta(&self) -> FingerprintMeta {
        let cfg = &self.config;
        FingerprintMeta {
            fingerprint_version: FINGERPRINT_VERSION,
            algorithm_name: algorithm_name(cfg.kind),
            kind: cfg.kind,
            size: cfg.size,
            max_depth: cfg.max_depth,
            seed: cfg.seed,
            config_version: cfg.version,
        }
    }
}

impl FingerprintGenerator for Fingerprinter {
    fn fingerprint(&self, graph: &MolGraph) -> Result<Fingerprint, FingerprintError> {
        self.generate(graph)
    }

    fn size(&self) -> usize {
        self.config.size
    }
}

/// Walk `graph` once and encode every path under each style.
pub(crate) fn path_keys(
    graph: &MolGraph,
    walker: &PathWalker,
    enumeration: Enumeration,
    styles: &[LabelStyle],
) -> Result<BTreeSet<String>, FingerprintError> {
    let tables: Vec<LabelTable> = styles.iter().map(|s| LabelTable::new(graph, *s)).collect();
    let mut keys = BTreeSet::new();
    walker.walk(graph, enumeration, |path| {
        for table in &tables {
            keys.insert(table.encode(path));
        }
    })?;
    Ok(keys)
}

/// Distinct nonzero formal charges carried by atoms of `graph`.
pub(crate) fn formal_charges(graph: &MolGraph) -> BTreeSet<i8> {
    graph.atoms().filter_map(|(_, atom)| atom.charge()).collect()
}

pub(crate) fn ring_sizes(rings: &[Ring]) -> BTreeSet<usize> {
    rings.iter().map(Ring::size).collect()
}
