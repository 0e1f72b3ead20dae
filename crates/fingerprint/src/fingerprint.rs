//! Fingerprint and metadata types.
//!
//! The fingerprint schema and metadata are part of the public contract: any
//! change that can alter bits for the same graph and configuration must come
//! with a new [`FINGERPRINT_VERSION`](crate::FINGERPRINT_VERSION).

use serde::{Deserialize, Serialize};

use crate::bits::BitVector;
use crate::config::{FingerprintError, FingerprintKind};

/// A fixed-length fingerprint of one graph.
///
/// Produced fresh for each `(graph, config)` pair; the bit length never
/// changes after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawFingerprint")]
pub struct Fingerprint {
    pub bits: BitVector,
    /// How and with which configuration the fingerprint was produced.
    pub meta: FingerprintMeta,
}

#[derive(Deserialize)]
struct RawFingerprint {
    bits: BitVector,
    meta: FingerprintMeta,
}

impl TryFrom<RawFingerprint> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(raw: RawFingerprint) -> Result<Self, Self::Error> {
        if raw.meta.size != raw.bits.len() {
            return Err(FingerprintError::InvalidEncoding(format!(
                "metadata size {} does not match {} stored bits",
                raw.meta.size,
                raw.bits.len()
            )));
        }
        Ok(Fingerprint {
            bits: raw.bits,
            meta: raw.meta,
        })
    }
}

/// Metadata for traceability and determinism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintMeta {
    /// Algorithm version owned by this crate.
    pub fingerprint_version: u16,
    /// Human-readable algorithm identifier, e.g. `"path_hashed/xxh3-splitmix_v1"`.
    pub algorithm_name: String,
    pub kind: FingerprintKind,
    pub size: usize,
    pub max_depth: usize,
    pub seed: u64,
    /// Configuration schema version supplied at generation time.
    pub config_version: u32,
}

impl Fingerprint {
    /// Length in bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of set bits.
    pub fn cardinality(&self) -> usize {
        self.bits.cardinality()
    }

    /// Storage form of the bits (see [`BitVector::to_bytes`]).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits.to_bytes()
    }
}

/// Substructure screen: can `query` be contained in `target`?
///
/// True iff every bit of `query` is set in `target` **and** `query` has at
/// least one set bit; an all-zero query never matches. A `true` result may be
/// a false positive caused by hash collisions.
///
/// ```
/// use fingerprint::{is_subset, Fingerprinter, FingerprintConfig};
/// use graph::{Atom, Bond, MolGraph};
///
/// let mut ethanol = MolGraph::new();
/// let c1 = ethanol.add_atom(Atom::new("C"));
/// let c2 = ethanol.add_atom(Atom::new("C"));
/// let o = ethanol.add_atom(Atom::new("O"));
/// ethanol.add_bond(c1, c2, Bond::single()).unwrap();
/// ethanol.add_bond(c2, o, Bond::single()).unwrap();
///
/// let mut methanol = MolGraph::new();
/// let c = methanol.add_atom(Atom::new("C"));
/// let o = methanol.add_atom(Atom::new("O"));
/// methanol.add_bond(c, o, Bond::single()).unwrap();
///
/// let fp = Fingerprinter::new(FingerprintConfig::default()).unwrap();
/// let target = fp.generate(&ethanol).unwrap();
/// let query = fp.generate(&methanol).unwrap();
/// assert!(is_subset(&target, &query).unwrap());
/// ```
pub fn is_subset(target: &Fingerprint, query: &Fingerprint) -> Result<bool, FingerprintError> {
    let covered = target.bits.is_superset_of(&query.bits)?;
    Ok(covered && !query.bits.none())
}
