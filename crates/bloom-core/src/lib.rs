//! # bloom-core
//!
//! Probabilistic set-membership filter built from two parts:
//!
//! - [`BitArray`]: fixed-length packed bit storage with range-checked
//!   access and a compact persisted form.
//! - [`HasherList`]: a keyed multi-hash generator deriving `k` deterministic
//!   index streams from one primitive by keying each round with its round
//!   number.
//!
//! [`BloomFilter`] composes one of each: `add` sets the hashed bits,
//! `contains` checks them, and the capacity formulas size both components
//! from an expected element count and a target false positive rate.
//!
//! ## Invariants
//!
//! - No false negatives: once added, an item is always reported present.
//! - The hasher range always equals the bit array length, so every hash
//!   output is a valid index. Every construction path enforces this,
//!   deserialization included.
//! - Bits only accumulate. There is no remove; rebuilding is the only way
//!   down.
//!
//! ## Usage
//!
//! ```
//! use bloom_core::BloomFilter;
//!
//! # fn main() -> Result<(), bloom_core::FilterError> {
//! let mut filter = BloomFilter::new(10_000, 0.01)?;
//!
//! filter.add(b"0xABCD1234")?;
//! assert!(filter.contains(b"0xABCD1234")?);
//!
//! // Persist and restore through any serde format.
//! let json = serde_json::to_string(&filter).expect("filter serializes");
//! let restored: BloomFilter = serde_json::from_str(&json).expect("state is intact");
//! assert!(restored.contains(b"0xABCD1234")?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Everything here is synchronous and unsynchronized. A filter shared
//! across threads needs an external read-write lock (`contains` behind the
//! read half, `add` behind the write half); inserts are read-modify-write
//! on bytes and would race otherwise.

pub mod domain;
pub mod error;

// Re-exports for convenience
pub use domain::{
    false_positive_rate, optimal_bit_count, optimal_hasher_count, BitArray, BloomFilter,
    HashAlgorithm, HasherList,
};
pub use error::{ErrorKind, FilterError};
