//! Probabilistic membership filter composing bit storage and keyed hashing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bit_array::BitArray;
use super::hasher::{HashAlgorithm, HasherList};
use super::parameters;
use crate::error::FilterError;

/// Probabilistic set-membership filter.
///
/// May report an item as present when it is not (false positive), but never
/// reports an item absent once it was added. Bits only ever accumulate:
/// there is no remove, and the false positive rate rises monotonically with
/// inserts until the filter is rebuilt.
///
/// The filter exclusively owns its [`BitArray`] and [`HasherList`], and
/// every hash output is a valid bit index because the hasher range equals
/// the array length, which every construction path enforces, including
/// deserialization.
///
/// Not internally synchronized. A filter shared across threads needs an
/// external lock: lookups behind a read lock, inserts behind a write lock.
///
/// ```
/// use bloom_core::BloomFilter;
///
/// # fn main() -> Result<(), bloom_core::FilterError> {
/// let mut filter = BloomFilter::new(1000, 0.01)?;
/// filter.add(b"deadbeef")?;
/// assert!(filter.contains(b"deadbeef")?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BloomFilterRepr", into = "BloomFilterRepr")]
pub struct BloomFilter {
    bit_array: BitArray,
    hashers: HasherList,
}

impl BloomFilter {
    /// Size a fresh filter for `approx_size` expected elements at the target
    /// `false_positive_rate`.
    ///
    /// Bit count and hasher count come from the standard capacity formulas:
    /// `m = round(-n*ln(p) / ln(2)^2)`, `k = round((m/n) * ln(2))`, hashing
    /// with [`HashAlgorithm::HmacSha256`]. Inputs extreme enough to drive
    /// either parameter to zero fail construction rather than clamp.
    pub fn new(approx_size: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        if approx_size == 0 {
            return Err(FilterError::ZeroApproxSize);
        }
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(FilterError::ProbabilityOutOfInterval {
                fp_rate: false_positive_rate,
            });
        }

        let bit_count = parameters::optimal_bit_count(approx_size, false_positive_rate);
        let hasher_count = parameters::optimal_hasher_count(bit_count, approx_size);
        let hashers = HasherList::new(HashAlgorithm::default(), hasher_count, bit_count)?;
        debug!(
            approx_size,
            false_positive_rate, bit_count, hasher_count, "sized membership filter"
        );

        Ok(Self {
            bit_array: BitArray::new(bit_count),
            hashers,
        })
    }

    /// Assemble a filter from restored components.
    ///
    /// The hasher range must equal the bit array length, otherwise hash
    /// outputs could name indices the array does not have.
    pub fn from_parts(bit_array: BitArray, hashers: HasherList) -> Result<Self, FilterError> {
        if hashers.max_result() != bit_array.len() {
            return Err(FilterError::HashRangeMismatch {
                max_result: hashers.max_result(),
                bit_length: bit_array.len(),
            });
        }
        debug!(
            bit_count = bit_array.len(),
            hasher_count = hashers.count(),
            algorithm = %hashers.algorithm(),
            "restored membership filter"
        );
        Ok(Self { bit_array, hashers })
    }

    /// Record `item` as a member. Adding the same item again is a no-op on
    /// the bit array.
    pub fn add(&mut self, item: &[u8]) -> Result<(), FilterError> {
        for index in self.hashers.hash(item) {
            self.bit_array.set(index, true)?;
        }
        Ok(())
    }

    /// Record every item of `items` as a member.
    pub fn add_all<I, T>(&mut self, items: I) -> Result<(), FilterError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        for item in items {
            self.add(item.as_ref())?;
        }
        Ok(())
    }

    /// Test whether `item` might be a member.
    ///
    /// `false` is definitive; `true` may be a false positive. Stops at the
    /// first clear bit. Pure read, no mutation.
    pub fn contains(&self, item: &[u8]) -> Result<bool, FilterError> {
        for index in self.hashers.hash(item) {
            if !self.bit_array.get(index)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Test every item of `items`, preserving order.
    pub fn contains_all<I, T>(&self, items: I) -> Result<Vec<bool>, FilterError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        items
            .into_iter()
            .map(|item| self.contains(item.as_ref()))
            .collect()
    }

    /// Fold another filter's members into this one (set union).
    ///
    /// Both filters must have been built with identical parameters (same
    /// bit count, hasher count, and algorithm), or their bit positions would
    /// not be comparable.
    pub fn merge(&mut self, other: &BloomFilter) -> Result<(), FilterError> {
        if self.hashers != *other.hashers() {
            return Err(FilterError::MergeParameterMismatch);
        }
        self.bit_array.or_with(&other.bit_array);
        Ok(())
    }

    /// Bit array length in bits.
    pub fn size_bits(&self) -> usize {
        self.bit_array.len()
    }

    /// Number of hash rounds per item.
    pub fn hasher_count(&self) -> usize {
        self.hashers.count()
    }

    /// Number of set bits.
    pub fn bits_set(&self) -> usize {
        self.bit_array.count_ones()
    }

    /// Fraction of bits currently set, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        if self.bit_array.is_empty() {
            return 0.0;
        }
        self.bit_array.count_ones() as f64 / self.bit_array.len() as f64
    }

    /// Estimate of the current false positive rate from the fill ratio:
    /// a lookup misreports only if all `k` probed bits happen to be set.
    pub fn estimated_fpr(&self) -> f64 {
        self.fill_ratio().powi(self.hashers.count() as i32)
    }

    /// The owned bit storage.
    pub fn bit_array(&self) -> &BitArray {
        &self.bit_array
    }

    /// The owned hasher list.
    pub fn hashers(&self) -> &HasherList {
        &self.hashers
    }
}

/// Canonical persisted form: the two owned components, each in its own
/// canonical form.
#[derive(Serialize, Deserialize)]
struct BloomFilterRepr {
    bit_array: BitArray,
    hashers: HasherList,
}

impl From<BloomFilter> for BloomFilterRepr {
    fn from(filter: BloomFilter) -> Self {
        Self {
            bit_array: filter.bit_array,
            hashers: filter.hashers,
        }
    }
}

impl TryFrom<BloomFilterRepr> for BloomFilter {
    type Error = FilterError;

    fn try_from(repr: BloomFilterRepr) -> Result<Self, Self::Error> {
        BloomFilter::from_parts(repr.bit_array, repr.hashers)
    }
}
