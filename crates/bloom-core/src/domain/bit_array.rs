//! Packed bit storage backing the filter.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Fixed-length, densely packed bit array backed by a byte buffer.
///
/// Bit `i` lives in byte `i / 8` under mask `1 << (i % 8)`, so bit 0 of each
/// byte is its least significant bit. The length is fixed at construction
/// and there is no resize: any capacity change means building a new array.
///
/// Accesses outside `[0, len)` are errors, never panics; callers that want
/// to avoid `Result` as control flow range-check their indices first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BitArrayRepr", into = "BitArrayRepr")]
pub struct BitArray {
    bits: BitVec<u8, Lsb0>,
}

impl BitArray {
    /// Allocate a zero-filled array of exactly `length` bits.
    ///
    /// The underlying buffer is rounded up to whole bytes.
    pub fn new(length: usize) -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; length],
        }
    }

    /// Read bit `index`.
    pub fn get(&self, index: usize) -> Result<bool, FilterError> {
        match self.bits.get(index) {
            Some(bit) => Ok(*bit),
            None => Err(FilterError::IndexOutOfBounds {
                index,
                length: self.bits.len(),
            }),
        }
    }

    /// Set or clear bit `index`.
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), FilterError> {
        if index >= self.bits.len() {
            return Err(FilterError::IndexOutOfBounds {
                index,
                length: self.bits.len(),
            });
        }
        self.bits.set(index, value);
        Ok(())
    }

    /// Clear bit `index`. Shorthand for `set(index, false)`.
    pub fn unset(&mut self, index: usize) -> Result<(), FilterError> {
        self.set(index, false)
    }

    /// Total bit count. This is the array length, not a popcount.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the array holds zero bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Size of the underlying buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Raw view of the underlying buffer, `ceil(len / 8)` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// OR every bit of `other` into `self`.
    ///
    /// Callers guarantee equal lengths; the filter merge path validates its
    /// parameters before delegating here.
    pub(crate) fn or_with(&mut self, other: &BitArray) {
        debug_assert_eq!(self.bits.len(), other.bits.len());
        for (byte, other_byte) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *byte |= *other_byte;
        }
    }
}

/// Canonical persisted form: bit count plus the base64-encoded buffer.
#[derive(Serialize, Deserialize)]
struct BitArrayRepr {
    len: u64,
    arr: String,
}

impl From<BitArray> for BitArrayRepr {
    fn from(array: BitArray) -> Self {
        Self {
            len: array.len() as u64,
            arr: BASE64.encode(array.as_bytes()),
        }
    }
}

impl TryFrom<BitArrayRepr> for BitArray {
    type Error = FilterError;

    fn try_from(repr: BitArrayRepr) -> Result<Self, Self::Error> {
        let length = repr.len as usize;
        let bytes = BASE64
            .decode(repr.arr.as_bytes())
            .map_err(|_| FilterError::UndecodableBuffer)?;
        let expected = length.div_ceil(8);
        if bytes.len() != expected {
            return Err(FilterError::BufferLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let mut bits = BitVec::<u8, Lsb0>::from_vec(bytes);
        bits.truncate(length);
        Ok(Self { bits })
    }
}
