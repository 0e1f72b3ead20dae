//! Bloom-filter membership over path tokens.
//!
//! # Guarantees
//!
//! - **No false negatives**: a token that was added is always reported present.
//! - **Estimable false positives**: `(1 - e^{-kn/m})^k` for `n` added tokens.
//! - **Determinism**: the same tokens, size and seed give the same bits.
//!
//! The filter stores no items; absence is certain, presence is probabilistic.

use std::f64::consts::LN_2;

use crate::bits::BitVector;
use crate::config::FingerprintError;
use crate::hasher::{BitHasher, Token};

/// Fixed-size Bloom filter with `k` placements per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    bits: BitVector,
    hash_count: usize,
    expected_items: usize,
    hasher: BitHasher,
}

impl BloomFilter {
    /// Create a filter of `size` bits tuned for `expected_items` tokens.
    ///
    /// The hash count is `k = ceil((m / n) * ln 2)`, at least 1.
    pub fn new(size: usize, expected_items: usize, seed: u64) -> Result<Self, FingerprintError> {
        if size == 0 {
            return Err(FingerprintError::InvalidConfigSize { size });
        }
        if expected_items == 0 {
            return Err(FingerprintError::InvalidConfigExpectedItems {
                items: expected_items,
            });
        }
        Ok(Self {
            bits: BitVector::new(size),
            hash_count: optimal_hash_count(size, expected_items),
            expected_items,
            hasher: BitHasher::new(seed),
        })
    }

    /// Number of bits `m`.
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    pub fn expected_items(&self) -> usize {
        self.expected_items
    }

    /// Placements per token `k`.
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Add a path key.
    pub fn add(&mut self, key: &str) {
        self.insert(&Token::Path(key));
    }

    /// Add any token kind.
    pub fn insert(&mut self, token: &Token<'_>) {
        let draws = self.hasher.draws(token, self.bits.len());
        for position in draws.take(self.hash_count) {
            self.bits.set(position);
        }
    }

    /// Was `key` (probably) added?
    pub fn contains(&self, key: &str) -> bool {
        self.contains_token(&Token::Path(key))
    }

    pub fn contains_token(&self, token: &Token<'_>) -> bool {
        self.hasher
            .draws(token, self.bits.len())
            .take(self.hash_count)
            .all(|position| self.bits.get(position))
    }

    /// Forget every token, keeping size and hash count for reuse.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Number of set bits.
    pub fn cardinality(&self) -> usize {
        self.bits.cardinality()
    }

    /// `|A AND B| / m`.
    pub fn intersection_ratio(&self, other: &BloomFilter) -> Result<f64, FingerprintError> {
        let shared = self.bits.intersection_count(&other.bits)?;
        Ok(shared as f64 / self.bits.len() as f64)
    }

    /// False-positive probability once `expected_items` tokens were added.
    pub fn expected_false_positive_rate(&self) -> f64 {
        let k = self.hash_count as f64;
        let n = self.expected_items as f64;
        let m = self.bits.len() as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    pub fn into_bits(self) -> BitVector {
        self.bits
    }
}

/// `ceil((m / n) * ln 2)`, at least 1.
pub fn optimal_hash_count(size: usize, expected_items: usize) -> usize {
    let k = (size as f64 / expected_items.max(1) as f64 * LN_2).ceil();
    (k as usize).max(1)
}
