//! Core data structures.
//!
//! Everything in this layer is pure and in-memory:
//! - No I/O operations
//! - No async code
//! - No internal locking

pub mod bit_array;
pub mod bloom_filter;
pub mod hasher;
pub mod parameters;

pub use bit_array::BitArray;
pub use bloom_filter::BloomFilter;
pub use hasher::{HashAlgorithm, HasherList};
pub use parameters::{false_positive_rate, optimal_bit_count, optimal_hasher_count};
