//! # molfp Fingerprints
//!
//! Path-based substructure-screening fingerprints over labeled molecular
//! graphs. A fingerprint is a fixed-length bit vector; if graph `B` is a
//! substructure of graph `A`, every bit of `fp(B)` is also set in `fp(A)`.
//! The converse does not hold: hash collisions produce false positives, which
//! an exact matcher downstream must weed out.
//!
//! ## Contract
//!
//! - Input graphs are already annotated (see the `graph` crate); this crate
//!   never perceives rings or aromaticity itself.
//! - Generation is a pure function of `(graph, config)`. No global state, no
//!   I/O, no clocks except for log timings.
//!
//! ## Core Pipeline
//!
//! 1.  **Enumeration**: [`PathWalker`] emits every simple path of up to
//!     `max_depth` bonds from every atom (or one shortest path per reachable
//!     pair), failing with [`FingerprintError::PathLimitExceeded`] on
//!     cage-like graphs.
//! 2.  **Encoding**: each path becomes a direction-independent key through a
//!     per-graph [`LabelTable`]; keys are deduplicated.
//! 3.  **Placement**: [`BitHasher`] turns each key (and optional ring-size and
//!     charge tokens) into bit positions.
//!
//! The [`FingerprintKind`] decides how placements are laid out: one hashed
//! range, a Bloom filter, a fixed multi-segment scaffold, or shortest paths
//! under two label styles.
//!
//! ## Example Usage
//!
//! ```
//! use fingerprint::{is_subset, FingerprintConfig, FingerprintKind, Fingerprinter};
//! use graph::{Atom, Bond, MolGraph};
//!
//! let mut acetone = MolGraph::new();
//! let c1 = acetone.add_atom(Atom::new("C"));
//! let c2 = acetone.add_atom(Atom::new("C"));
//! let c3 = acetone.add_atom(Atom::new("C"));
//! let o = acetone.add_atom(Atom::new("O"));
//! acetone.add_bond(c1, c2, Bond::single()).unwrap();
//! acetone.add_bond(c2, c3, Bond::single()).unwrap();
//! acetone.add_bond(c2, o, Bond::double()).unwrap();
//!
//! let mut carbonyl = MolGraph::new();
//! let c = carbonyl.add_atom(Atom::new("C"));
//! let o = carbonyl.add_atom(Atom::new("O"));
//! carbonyl.add_bond(c, o, Bond::double()).unwrap();
//!
//! let config = FingerprintConfig::new().with_kind(FingerprintKind::Bloom);
//! let fp = Fingerprinter::new(config).unwrap();
//! let target = fp.generate(&acetone).unwrap();
//! let query = fp.generate(&carbonyl).unwrap();
//!
//! assert_eq!(target.len(), 1024);
//! assert!(is_subset(&target, &query).unwrap());
//! ```
pub mod bits;
pub mod bloom;
pub mod config;
pub mod encoder;
mod engine;
pub mod fingerprint;
pub mod hasher;
pub mod scaffold;
pub mod walker;

pub use crate::bits::BitVector;
pub use crate::bloom::{optimal_hash_count, BloomFilter};
pub use crate::config::{
    ErrorKind, FingerprintConfig, FingerprintError, FingerprintKind, DEFAULT_MAX_DEPTH,
    DEFAULT_PATH_LIMIT, DEFAULT_SEED, DEFAULT_SIZE, MAX_DEPTH_LIMIT,
};
pub use crate::encoder::{LabelStyle, LabelTable};
pub use crate::engine::{FingerprintGenerator, Fingerprinter};
pub use crate::fingerprint::{is_subset, Fingerprint, FingerprintMeta};
pub use crate::hasher::{BitHasher, Token};
pub use crate::scaffold::{scaffold_layout, Segment, SegmentKind, SCAFFOLD_FIXED_BITS};
pub use crate::walker::{Enumeration, PathRef, PathWalker};

/// Current fingerprint algorithm version for this crate.
pub const FINGERPRINT_VERSION: u16 = 1;

/// Placement scheme shared by every kind.
pub const PLACEMENT_ALGORITHM: &str = "xxh3-splitmix_v1";

/// Human-readable algorithm identifier, e.g. `"bloom/xxh3-splitmix_v1"`.
pub fn algorithm_name(kind: FingerprintKind) -> String {
    format!("{}/{}", kind.as_str(), PLACEMENT_ALGORITHM)
}
