//! Composite scaffold fingerprints.
//!
//! The vector is split into five fixed segments, generated independently
//! and concatenated in this order:
//!
//! | Segment | Offset | Bits | Content |
//! |---------|--------|------|---------|
//! | ring sizes   | 0   | 16         | one token per distinct ring size |
//! | ring paths   | 16  | 128        | paths inside each ring, up to `max_depth` |
//! | short paths  | 144 | 128        | paths of up to 3 bonds |
//! | medium paths | 272 | 256        | paths of up to 5 bonds |
//! | full paths   | 528 | `size - 528` | paths of up to `max_depth` bonds |
//!
//! Every segment only ever sets bits in its own range, so the subset screen
//! on the whole vector is the conjunction of the per-segment screens.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use graph::{MolGraph, Ring};
use serde::{Deserialize, Serialize};

use crate::bits::BitVector;
use crate::config::{FingerprintConfig, FingerprintError};
use crate::encoder::{LabelStyle, LabelTable};
use crate::engine::{formal_charges, path_keys};
use crate::hasher::{BitHasher, Token};
use crate::walker::{Enumeration, PathWalker};

pub const RING_SIZE_BITS: usize = 16;
pub const RING_PATH_BITS: usize = 128;
pub const SHORT_PATH_BITS: usize = 128;
pub const SHORT_PATH_DEPTH: usize = 3;
pub const MEDIUM_PATH_BITS: usize = 256;
pub const MEDIUM_PATH_DEPTH: usize = 5;
/// Bits taken by every segment but the last.
pub const SCAFFOLD_FIXED_BITS: usize =
    RING_SIZE_BITS + RING_PATH_BITS + SHORT_PATH_BITS + MEDIUM_PATH_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    RingSizes,
    RingPaths,
    ShortPaths,
    MediumPaths,
    FullPaths,
}

/// One sub-range of a scaffold fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub offset: usize,
    pub len: usize,
    /// Path depth hashed into the segment; `None` for ring-size tokens.
    pub max_depth: Option<usize>,
}

impl Segment {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// The segment table for a scaffold of `size` bits.
pub fn scaffold_layout(size: usize, max_depth: usize) -> Result<[Segment; 5], FingerprintError> {
    if size <= SCAFFOLD_FIXED_BITS {
        return Err(FingerprintError::InvalidConfigScaffoldSize {
            size,
            fixed: SCAFFOLD_FIXED_BITS,
        });
    }
    let table = [
        (SegmentKind::RingSizes, RING_SIZE_BITS, None),
        (SegmentKind::RingPaths, RING_PATH_BITS, Some(max_depth)),
        (SegmentKind::ShortPaths, SHORT_PATH_BITS, Some(SHORT_PATH_DEPTH)),
        (SegmentKind::MediumPaths, MEDIUM_PATH_BITS, Some(MEDIUM_PATH_DEPTH)),
        (
            SegmentKind::FullPaths,
            size - SCAFFOLD_FIXED_BITS,
            Some(max_depth),
        ),
    ];
    let mut offset = 0;
    Ok(table.map(|(kind, len, max_depth)| {
        let segment = Segment {
            kind,
            offset,
            len,
            max_depth,
        };
        offset += len;
        segment
    }))
}

/// Generate each segment as its own vector, in layout order.
pub(crate) fn scaffold_segments(
    graph: &MolGraph,
    cfg: &FingerprintConfig,
    rings: &[Ring],
) -> Result<Vec<(Segment, BitVector)>, FingerprintError> {
    let layout = scaffold_layout(cfg.size, cfg.max_depth)?;
    let hasher = BitHasher::new(cfg.seed);
    let walker = PathWalker::from_config(cfg);
    let [ring_sizes, ring_paths, short, medium, full] = layout;

    let mut ring_size_bits = BitVector::new(ring_sizes.len);
    let sizes: BTreeSet<usize> = rings.iter().map(Ring::size).collect();
    for size in sizes {
        ring_size_bits.set(hasher.position(&Token::RingSize(size), ring_sizes.len));
    }

    let mut ring_path_bits = BitVector::new(ring_paths.len);
    for ring in rings {
        let sub = graph.ring_subgraph(ring)?;
        let keys = path_keys(&sub, &walker, Enumeration::AllSimplePaths, &[LabelStyle::STANDARD])?;
        for key in keys {
            ring_path_bits.set(hasher.position(&Token::Path(&key), ring_paths.len));
        }
    }

    // One walk serves the three depth-bounded segments; a key always has the
    // same bond count, so bucketing by length is exact.
    let deepest = walker.with_max_depth(cfg.max_depth.max(MEDIUM_PATH_DEPTH));
    let table = LabelTable::new(graph, LabelStyle::STANDARD);
    let mut lengths: BTreeMap<String, usize> = BTreeMap::new();
    deepest.all_simple_paths(graph, |path| {
        lengths.entry(table.encode(path)).or_insert(path.len());
    })?;

    let mut short_bits = BitVector::new(short.len);
    let mut medium_bits = BitVector::new(medium.len);
    let mut full_bits = BitVector::new(full.len);
    for (key, len) in &lengths {
        let token = Token::Path(key);
        if *len <= SHORT_PATH_DEPTH {
            short_bits.set(hasher.position(&token, short.len));
        }
        if *len <= MEDIUM_PATH_DEPTH {
            medium_bits.set(hasher.position(&token, medium.len));
        }
        if *len <= cfg.max_depth {
            full_bits.set(hasher.position(&token, full.len));
        }
    }
    if cfg.respect_formal_charges {
        for charge in formal_charges(graph) {
            full_bits.set(hasher.position(&Token::Charge(charge), full.len));
        }
    }

    Ok(vec![
        (ring_sizes, ring_size_bits),
        (ring_paths, ring_path_bits),
        (short, short_bits),
        (medium, medium_bits),
        (full, full_bits),
    ])
}

/// Concatenate segments into one vector of `size` bits.
pub(crate) fn compose(
    size: usize,
    segments: &[(Segment, BitVector)],
) -> Result<BitVector, FingerprintError> {
    let mut bits = BitVector::new(size);
    for (segment, segment_bits) in segments {
        bits.splice(segment.offset, segment_bits)?;
    }
    Ok(bits)
}
