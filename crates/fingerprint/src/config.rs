//! Configuration and error types for molfp fingerprint generation.
//!
//! This module defines the public configuration surface of the fingerprint
//! engine. It is free of I/O and environment-dependent behavior so that
//! generation is a pure function of `(graph, config)`.

use graph::GraphError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default fingerprint length in bits.
pub const DEFAULT_SIZE: usize = 1024;
/// Default maximum path length in bonds.
pub const DEFAULT_MAX_DEPTH: usize = 7;
/// Largest accepted `max_depth`. Paths that long already exceed any
/// practical `path_limit` on ring systems.
pub const MAX_DEPTH_LIMIT: usize = 64;
/// Default per-source path budget before a graph is declared intractable.
pub const DEFAULT_PATH_LIMIT: usize = 42_000;
/// Default seed for token hashing.
pub const DEFAULT_SEED: u64 = 0x5EED_C0DE_F1A6_0001;

/// Fingerprint flavor produced by a [`Fingerprinter`](crate::Fingerprinter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintKind {
    /// All simple paths hashed into one fixed vector.
    #[default]
    PathHashed,
    /// All simple paths added to a Bloom filter.
    Bloom,
    /// Fixed multi-segment layout (rings, ring paths, short, medium, full paths).
    Scaffold,
    /// One shortest path per reachable atom pair, bond-sensitive and bond-insensitive.
    ShortestPath,
}

impl FingerprintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FingerprintKind::PathHashed => "path_hashed",
            FingerprintKind::Bloom => "bloom",
            FingerprintKind::Scaffold => "scaffold",
            FingerprintKind::ShortestPath => "shortest_path",
        }
    }
}

/// Configuration for the fingerprint engine.
///
/// The same configuration applied to the same graph always yields a
/// bit-identical fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintConfig {
    /// Configuration schema version.
    ///
    /// Any change that can alter fingerprint bits must bump this version so
    /// stored fingerprints remain comparable only with their own generation.
    pub version: u32,
    pub kind: FingerprintKind,
    /// Total fingerprint length `N` in bits.
    pub size: usize,
    /// Longest path, in bonds, that is enumerated. At most [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
    /// Paths allowed per source atom before generation fails.
    ///
    /// The scaffold kind walks to `max(max_depth, 5)` bonds to fill its
    /// medium segment, and that walk counts against this same limit. With
    /// `max_depth < 5` a scaffold fingerprint can therefore fail on a graph
    /// the path-hashed kind accepts at the same depth.
    pub path_limit: usize,
    /// Hash one token per distinct ring size.
    pub respect_ring_matches: bool,
    /// Hash one token per atom carrying a nonzero formal charge.
    pub respect_formal_charges: bool,
    /// Walk through wildcard atoms instead of skipping them.
    pub hash_pseudo_atoms: bool,
    /// Tail bits `[size - ring_bits, size)` reserved for ring-size tokens.
    ///
    /// `0` hashes ring tokens into the main range. Not used by the scaffold
    /// layout, which has its own ring segment.
    pub ring_bits: usize,
    /// Expected item count `n` of the Bloom filter; `None` uses its bit count.
    pub bloom_expected_items: Option<usize>,
    /// Seed for token hashing.
    pub seed: u64,
    /// Generate batches with rayon.
    pub use_parallel: bool,
}

impl FingerprintConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: FingerprintKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_path_limit(mut self, path_limit: usize) -> Self {
        self.path_limit = path_limit;
        self
    }

    pub fn with_ring_matches(mut self, respect: bool) -> Self {
        self.respect_ring_matches = respect;
        self
    }

    pub fn with_formal_charges(mut self, respect: bool) -> Self {
        self.respect_formal_charges = respect;
        self
    }

    pub fn with_pseudo_atoms(mut self, hash: bool) -> Self {
        self.hash_pseudo_atoms = hash;
        self
    }

    /// Reserve the last `ring_bits` bits for ring-size tokens.
    pub fn with_ring_bits(mut self, ring_bits: usize) -> Self {
        self.ring_bits = ring_bits;
        self
    }

    pub fn with_bloom_expected_items(mut self, items: usize) -> Self {
        self.bloom_expected_items = Some(items);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Bits available to path tokens: everything but the reserved ring tail.
    pub fn path_bits(&self) -> usize {
        self.size.saturating_sub(self.ring_bits)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.version < 1 {
            return Err(FingerprintError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.size < 1 {
            return Err(FingerprintError::InvalidConfigSize { size: self.size });
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(FingerprintError::InvalidConfigMaxDepth {
                depth: self.max_depth,
                max: MAX_DEPTH_LIMIT,
            });
        }
        if self.path_limit < 1 {
            return Err(FingerprintError::InvalidConfigPathLimit {
                limit: self.path_limit,
            });
        }
        if self.ring_bits > 0 && self.ring_bits >= self.size {
            return Err(FingerprintError::InvalidConfigRingBits {
                size: self.size,
                ring_bits: self.ring_bits,
            });
        }
        if self.bloom_expected_items == Some(0) {
            return Err(FingerprintError::InvalidConfigExpectedItems { items: 0 });
        }
        if self.kind == FingerprintKind::Scaffold {
            if self.ring_bits != 0 {
                return Err(FingerprintError::InvalidConfigScaffoldRingBits {
                    ring_bits: self.ring_bits,
                });
            }
            crate::scaffold::scaffold_layout(self.size, self.max_depth)?;
        }
        Ok(())
    }
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            version: 1,
            kind: FingerprintKind::PathHashed,
            size: DEFAULT_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            path_limit: DEFAULT_PATH_LIMIT,
            respect_ring_matches: false,
            respect_formal_charges: false,
            hash_pseudo_atoms: false,
            ring_bits: 0,
            bloom_expected_items: None,
            seed: DEFAULT_SEED,
            use_parallel: false,
        }
    }
}

/// Coarse classification of [`FingerprintError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The graph produced more paths than allowed; skip it or lower the depth.
    PathLimitExceeded,
    /// Bad parameters or incompatible operands.
    InvalidConfiguration,
    /// A graph provider or annotation collaborator failed.
    UpstreamGraph,
}

/// Errors returned by fingerprint generation and comparison.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("path limit exceeded: more than {limit} paths from atom {atom} (reached depth {depth})")]
    PathLimitExceeded {
        atom: usize,
        limit: usize,
        depth: usize,
    },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: size must be >= 1 (got {size})")]
    InvalidConfigSize { size: usize },

    #[error("invalid config: max_depth must be <= {max} (got {depth})")]
    InvalidConfigMaxDepth { depth: usize, max: usize },

    #[error("invalid config: path_limit must be >= 1 (got {limit})")]
    InvalidConfigPathLimit { limit: usize },

    #[error("invalid config: size {size} must exceed reserved ring bits {ring_bits}")]
    InvalidConfigRingBits { size: usize, ring_bits: usize },

    #[error("invalid config: bloom expected items must be >= 1 (got {items})")]
    InvalidConfigExpectedItems { items: usize },

    #[error("invalid config: scaffold size {size} must exceed its fixed segments ({fixed} bits)")]
    InvalidConfigScaffoldSize { size: usize, fixed: usize },

    #[error("invalid config: scaffold layout reserves its own ring segment (ring_bits = {ring_bits})")]
    InvalidConfigScaffoldRingBits { ring_bits: usize },

    #[error("fingerprint length mismatch: {left} bits vs {right} bits")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid fingerprint encoding: {0}")]
    InvalidEncoding(String),

    #[error("upstream graph error: {0}")]
    Upstream(#[from] GraphError),
}

impl FingerprintError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FingerprintError::PathLimitExceeded { .. } => ErrorKind::PathLimitExceeded,
            FingerprintError::Upstream(_) => ErrorKind::UpstreamGraph,
            _ => ErrorKind::InvalidConfiguration,
        }
    }
}
