//! Keyed multi-hash index generation.
//!
//! One keyed primitive, `k` index streams: round `i` keys the hash with the
//! decimal string of `i`, so a single algorithm yields `k` effectively
//! independent position sequences without needing `k` distinct hash
//! functions. Determinism is the core correctness requirement here: the
//! membership test only works because a lookup re-derives exactly the
//! indices an insert set.

use std::fmt;
use std::hash::Hasher as _;
use std::io::Cursor;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha512};
use siphasher::sip::SipHasher24;

use crate::error::FilterError;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Keyed hash primitives available to a [`HasherList`].
///
/// The hash keying is for index stream separation, not security: none of
/// these configurations resist adversarial input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum HashAlgorithm {
    /// HMAC over SHA-256. The default: wide output, keyed by construction.
    #[default]
    HmacSha256,
    /// HMAC over SHA-512.
    HmacSha512,
    /// 32-bit MurmurHash3, seeded per round. Fast, but its narrow output
    /// caps the index range it can cover.
    Murmur3,
    /// SipHash-2-4 with a per-round key.
    SipHash24,
}

impl HashAlgorithm {
    /// Width of the raw hash output in bits.
    pub fn output_bits(&self) -> u32 {
        match self {
            Self::HmacSha256 => 256,
            Self::HmacSha512 => 512,
            Self::Murmur3 => 32,
            Self::SipHash24 => 64,
        }
    }

    /// Stable identifier used in the persisted form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HmacSha256 => "hmac-sha256",
            Self::HmacSha512 => "hmac-sha512",
            Self::Murmur3 => "murmur3-32",
            Self::SipHash24 => "siphash-2-4",
        }
    }

    /// Hash `item` keyed by `round`, returning the leading output bytes as
    /// a native unsigned integer.
    fn hash_round(&self, item: &[u8], round: usize) -> u64 {
        let key = round.to_string();
        match self {
            Self::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(key.as_bytes())
                    .expect("HMAC can take key of any size");
                mac.update(item);
                leading_u64(&mac.finalize().into_bytes())
            }
            Self::HmacSha512 => {
                let mut mac = HmacSha512::new_from_slice(key.as_bytes())
                    .expect("HMAC can take key of any size");
                mac.update(item);
                leading_u64(&mac.finalize().into_bytes())
            }
            Self::Murmur3 => {
                u64::from(murmur3::murmur3_32(&mut Cursor::new(item), round as u32).unwrap_or(0))
            }
            Self::SipHash24 => {
                let (k0, k1) = sip_keys(key.as_bytes());
                let mut hasher = SipHasher24::new_with_keys(k0, k1);
                hasher.write(item);
                hasher.finish()
            }
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = FilterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "hmac-sha256" => Ok(Self::HmacSha256),
            "hmac-sha512" => Ok(Self::HmacSha512),
            "murmur3-32" => Ok(Self::Murmur3),
            "siphash-2-4" => Ok(Self::SipHash24),
            _ => Err(FilterError::UnknownAlgorithm {
                name: name.to_string(),
            }),
        }
    }
}

impl From<HashAlgorithm> for String {
    fn from(algorithm: HashAlgorithm) -> Self {
        algorithm.name().to_string()
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = FilterError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Interpret the first 8 bytes of a hash output as a big-endian unsigned
/// integer.
fn leading_u64(digest: &[u8]) -> u64 {
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Derive a SipHash key pair from raw key material, zero-padded to 16 bytes.
fn sip_keys(material: &[u8]) -> (u64, u64) {
    let mut padded = [0u8; 16];
    let take = material.len().min(16);
    padded[..take].copy_from_slice(&material[..take]);
    let mut k0 = [0u8; 8];
    let mut k1 = [0u8; 8];
    k0.copy_from_slice(&padded[..8]);
    k1.copy_from_slice(&padded[8..]);
    (u64::from_le_bytes(k0), u64::from_le_bytes(k1))
}

/// Produces a fixed number of pseudo-random indices in `[0, max_result)`
/// per item.
///
/// Immutable after construction; one list serves every insert and lookup of
/// its owning filter. `hash` is pure: identical `(algorithm, count,
/// max_result, item)` always yields the identical index sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HasherListRepr", into = "HasherListRepr")]
pub struct HasherList {
    algorithm: HashAlgorithm,
    count: usize,
    max_result: usize,
}

impl HasherList {
    /// Build a list of `count` hash rounds over `[0, max_result)`.
    ///
    /// Rejects zero `count` or `max_result`, and rejects a 32-bit-output
    /// algorithm asked to cover a range past 2^32: a narrower hash cannot
    /// reach those indices, which would quietly break the position spread.
    pub fn new(
        algorithm: HashAlgorithm,
        count: usize,
        max_result: usize,
    ) -> Result<Self, FilterError> {
        if count == 0 {
            return Err(FilterError::ZeroHasherCount);
        }
        if max_result == 0 {
            return Err(FilterError::ZeroHashRange);
        }
        if algorithm.output_bits() == 32 && max_result as u64 > 1 << 32 {
            return Err(FilterError::RangeExceedsHashWidth {
                algorithm,
                max_result,
            });
        }
        Ok(Self {
            algorithm,
            count,
            max_result,
        })
    }

    /// Hash `item` into `count` indices, each in `[0, max_result)`.
    pub fn hash(&self, item: &[u8]) -> Vec<usize> {
        (0..self.count)
            .map(|round| (self.algorithm.hash_round(item, round) % self.max_result as u64) as usize)
            .collect()
    }

    /// The keyed primitive in use.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Number of indices produced per item.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Exclusive upper bound of every produced index.
    pub fn max_result(&self) -> usize {
        self.max_result
    }
}

/// Canonical persisted form of a [`HasherList`].
#[derive(Serialize, Deserialize)]
struct HasherListRepr {
    algo: HashAlgorithm,
    count: u64,
    max: u64,
}

impl From<HasherList> for HasherListRepr {
    fn from(hashers: HasherList) -> Self {
        Self {
            algo: hashers.algorithm,
            count: hashers.count as u64,
            max: hashers.max_result as u64,
        }
    }
}

impl TryFrom<HasherListRepr> for HasherList {
    type Error = FilterError;

    fn try_from(repr: HasherListRepr) -> Result<Self, Self::Error> {
        HasherList::new(repr.algo, repr.count as usize, repr.max as usize)
    }
}
