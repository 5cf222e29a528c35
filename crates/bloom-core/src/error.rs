//! Error types for the membership filter components.

use thiserror::Error;

use crate::domain::hasher::HashAlgorithm;

/// Broad classification of a [`FilterError`].
///
/// Every failure in this crate is a validation failure raised synchronously
/// at the offending call. None of them are transient: a caller that hits one
/// has passed a bad value or restored corrupt state, and retrying the same
/// call will fail the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A constructor or accessor received a value outside its natural domain.
    InvalidArgument,
    /// A well-typed value falls outside the valid numeric range of the
    /// current structure.
    OutOfRange,
    /// The requested hash algorithm does not exist or cannot be used here.
    Configuration,
}

/// Errors raised by bit array, hasher list, and filter operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("approximate size must be positive")]
    ZeroApproxSize,

    #[error("false positive rate {fp_rate} is outside the open interval (0, 1)")]
    ProbabilityOutOfInterval { fp_rate: f64 },

    #[error("hasher count must be positive")]
    ZeroHasherCount,

    #[error("hash result range must be positive")]
    ZeroHashRange,

    #[error("bit index {index} out of bounds for {length}-bit array")]
    IndexOutOfBounds { index: usize, length: usize },

    #[error("hash range {max_result} exceeds the 32-bit output width of {algorithm}")]
    RangeExceedsHashWidth {
        algorithm: HashAlgorithm,
        max_result: usize,
    },

    #[error("unknown hash algorithm: {name}")]
    UnknownAlgorithm { name: String },

    #[error("bit buffer is not valid base64")]
    UndecodableBuffer,

    #[error("bit buffer holds {actual} bytes, expected {expected} for the declared length")]
    BufferLengthMismatch { expected: usize, actual: usize },

    #[error("hash range {max_result} does not match bit array length {bit_length}")]
    HashRangeMismatch {
        max_result: usize,
        bit_length: usize,
    },

    #[error("filters must share size, hasher count, and algorithm to merge")]
    MergeParameterMismatch,
}

impl FilterError {
    /// Classify this error into the coarse [`ErrorKind`] taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroApproxSize
            | Self::ProbabilityOutOfInterval { .. }
            | Self::ZeroHasherCount
            | Self::ZeroHashRange
            | Self::UndecodableBuffer
            | Self::BufferLengthMismatch { .. }
            | Self::HashRangeMismatch { .. }
            | Self::MergeParameterMismatch => ErrorKind::InvalidArgument,
            Self::IndexOutOfBounds { .. } | Self::RangeExceedsHashWidth { .. } => {
                ErrorKind::OutOfRange
            }
            Self::UnknownAlgorithm { .. } => ErrorKind::Configuration,
        }
    }
}
