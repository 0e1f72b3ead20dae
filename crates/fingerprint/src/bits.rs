//! Fixed-length bit vector backing every fingerprint.

use serde::{Deserialize, Serialize};

use crate::config::FingerprintError;

const WORD_BITS: usize = 64;

/// A bit vector whose length is fixed at construction.
///
/// Bits are stored little-endian within `u64` words; bit `i` lives in word
/// `i / 64` at position `i % 64`. Bits at or past `len` are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBitVector")]
pub struct BitVector {
    len: usize,
    words: Vec<u64>,
}

/// Unchecked wire form of [`BitVector`].
#[derive(Deserialize)]
struct RawBitVector {
    len: usize,
    words: Vec<u64>,
}

impl TryFrom<RawBitVector> for BitVector {
    type Error = FingerprintError;

    fn try_from(raw: RawBitVector) -> Result<Self, Self::Error> {
        let expected = raw.len.div_ceil(WORD_BITS);
        if raw.words.len() != expected {
            return Err(FingerprintError::InvalidEncoding(format!(
                "{} bits need {expected} words (got {})",
                raw.len,
                raw.words.len()
            )));
        }
        let out = BitVector {
            len: raw.len,
            words: raw.words,
        };
        out.check_tail()?;
        Ok(out)
    }
}

impl BitVector {
    /// Create an all-zero vector of `len` bits.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            words: vec![0u64; len.div_ceil(WORD_BITS)],
        }
    }

    /// Length in bits. Never changes after construction.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the vector has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize) {
        assert!(
            index < self.len,
            "bit index {index} out of range for {} bits",
            self.len
        );
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
    }

    /// Read bit `index`; out-of-range indices read as unset.
    pub fn get(&self, index: usize) -> bool {
        index < self.len && (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Number of set bits.
    pub fn cardinality(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True when no bit is set.
    pub fn none(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Reset every bit to zero, keeping the length.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Indices of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(wi * WORD_BITS + bit)
            })
        })
    }

    /// `|self AND other|`.
    pub fn intersection_count(&self, other: &BitVector) -> Result<usize, FingerprintError> {
        self.check_len(other)?;
        Ok(self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum())
    }

    /// True when every bit set in `query` is also set in `self`.
    pub fn is_superset_of(&self, query: &BitVector) -> Result<bool, FingerprintError> {
        self.check_len(query)?;
        Ok(self
            .words
            .iter()
            .zip(&query.words)
            .all(|(t, q)| t & q == *q))
    }

    /// Tanimoto coefficient `|A AND B| / |A OR B|`; two empty vectors score 1.0.
    pub fn tanimoto(&self, other: &BitVector) -> Result<f64, FingerprintError> {
        self.check_len(other)?;
        let (mut and, mut or) = (0u32, 0u32);
        for (a, b) in self.words.iter().zip(&other.words) {
            and += (a & b).count_ones();
            or += (a | b).count_ones();
        }
        if or == 0 {
            return Ok(1.0);
        }
        Ok(f64::from(and) / f64::from(or))
    }

    /// OR `segment` into `self` starting at bit `offset`.
    pub fn splice(&mut self, offset: usize, segment: &BitVector) -> Result<(), FingerprintError> {
        let fits = offset
            .checked_add(segment.len)
            .is_some_and(|end| end <= self.len);
        if !fits {
            return Err(FingerprintError::LengthMismatch {
                left: self.len,
                right: offset.saturating_add(segment.len),
            });
        }
        for bit in segment.iter_ones() {
            self.set(offset + bit);
        }
        Ok(())
    }

    /// Copy of the bits in `[start, start + len)` as a new vector.
    pub fn slice(&self, start: usize, len: usize) -> BitVector {
        let mut out = BitVector::new(len);
        for i in 0..len {
            if self.get(start + i) {
                out.set(i);
            }
        }
        out
    }

    /// Serialize to bytes: bit `i` is `bytes[i / 8] & (1 << (i % 8))`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self.words.iter().flat_map(|w| w.to_le_bytes()).collect();
        out.truncate(self.len.div_ceil(8));
        out
    }

    /// Inverse of [`to_bytes`](Self::to_bytes).
    ///
    /// `bytes` must hold exactly `ceil(len / 8)` bytes and no bit at or past `len`.
    pub fn from_bytes(len: usize, bytes: &[u8]) -> Result<Self, FingerprintError> {
        let expected = len.div_ceil(8);
        if bytes.len() != expected {
            return Err(FingerprintError::InvalidEncoding(format!(
                "{len} bits need {expected} bytes (got {})",
                bytes.len()
            )));
        }
        let mut out = BitVector::new(len);
        for (wi, chunk) in bytes.chunks(8).enumerate() {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            out.words[wi] = u64::from_le_bytes(buf);
        }
        out.check_tail()?;
        Ok(out)
    }

    /// Reject set bits at or past `len` in the last word.
    fn check_tail(&self) -> Result<(), FingerprintError> {
        let tail = self.len % WORD_BITS;
        match self.words.last() {
            Some(last) if tail != 0 && last >> tail != 0 => Err(FingerprintError::InvalidEncoding(
                format!("bits set past length {}", self.len),
            )),
            _ => Ok(()),
        }
    }

    fn check_len(&self, other: &BitVector) -> Result<(), FingerprintError> {
        if self.len == other.len {
            Ok(())
        } else {
            Err(FingerprintError::LengthMismatch {
                left: self.len,
                right: other.len,
            })
        }
    }
}
