//! Deterministic placement of tokens into bit ranges.
//!
//! A token is hashed with seeded xxh3; the hash seeds a SplitMix64 generator
//! and bit positions are bounded draws from that generator. The first draw is
//! the position used by fixed fingerprints; Bloom filters take the first `k`.
//! Placement depends only on `(seed, token, bound)`.

use xxhash_rust::xxh3::Xxh3;

const TAG_PATH: u8 = 0x00;
const TAG_RING_SIZE: u8 = 0x01;
const TAG_CHARGE: u8 = 0x02;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// A hashable feature. Kinds are tagged so they never collide with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token<'a> {
    /// Canonical path key.
    Path(&'a str),
    /// Size of a perceived ring.
    RingSize(usize),
    /// Nonzero formal charge carried by some atom.
    Charge(i8),
}

/// Maps tokens to bit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitHasher {
    seed: u64,
}

impl BitHasher {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 64-bit hash of a token under this hasher's seed.
    pub fn token_hash(&self, token: &Token<'_>) -> u64 {
        let mut h = Xxh3::with_seed(self.seed);
        match token {
            Token::Path(key) => {
                h.update(&[TAG_PATH]);
                h.update(key.as_bytes());
            }
            Token::RingSize(size) => {
                h.update(&[TAG_RING_SIZE]);
                h.update(&(*size as u64).to_le_bytes());
            }
            Token::Charge(charge) => {
                h.update(&[TAG_CHARGE]);
                h.update(&charge.to_le_bytes());
            }
        }
        h.digest()
    }

    /// Bit position of `token` in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound == 0`.
    pub fn position(&self, token: &Token<'_>, bound: usize) -> usize {
        self.draws(token, bound).next_position()
    }

    /// Endless sequence of positions in `[0, bound)` for `token`.
    ///
    /// # Panics
    ///
    /// Panics if `bound == 0`.
    pub fn draws(&self, token: &Token<'_>, bound: usize) -> Draws {
        assert!(bound > 0, "cannot place a token into an empty range");
        Draws {
            rng: SplitMix64::new(self.token_hash(token)),
            bound: bound as u64,
        }
    }
}

/// Bounded draws from the generator seeded by one token.
#[derive(Debug, Clone)]
pub struct Draws {
    rng: SplitMix64,
    bound: u64,
}

impl Draws {
    fn next_position(&mut self) -> usize {
        self.rng.next_bounded(self.bound) as usize
    }
}

impl Iterator for Draws {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        Some(self.next_position())
    }
}

/// SplitMix64 generator (Steele, Lea & Flood).
#[derive(Debug, Clone)]
pub(crate) struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let out = splitmix64(self.state);
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        out
    }

    /// Uniform draw in `[0, bound)` by rejection; `bound` must be nonzero.
    pub(crate) fn next_bounded(&mut self, bound: u64) -> u64 {
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return x % bound;
            }
        }
    }
}

#[inline]
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(GOLDEN_GAMMA);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
