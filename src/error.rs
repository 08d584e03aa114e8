//! Error types for the dwt-engine crate.

/// Error type for all fallible operations in the crate.
///
/// Configuration failures (bad filter, bad steps, unknown names) are raised
/// before any transform runs. Precondition violations are raised per call,
/// and only in [`Precondition::Reject`](crate::Precondition::Reject) mode for
/// the ones the engines could otherwise pass through.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// Filter taps have an unusable length.
    #[error("invalid filter: {scales} scaling and {coeffs} wavelet taps (need equal, even, >= 2)")]
    InvalidFilter {
        /// Number of scaling (low-pass) taps.
        scales: usize,
        /// Number of wavelet (high-pass) taps.
        coeffs: usize,
    },

    /// No catalog entry matches the given wavelet name.
    #[error("unknown wavelet: {0}")]
    UnknownWavelet(String),

    /// No transform kind matches the given name.
    #[error("unknown transform: {0}")]
    UnknownTransform(String),

    /// A level limit of zero was configured.
    #[error("invalid number of steps: {0} (must be at least 1)")]
    InvalidSteps(usize),

    /// The input has no samples.
    #[error("input is empty")]
    EmptyInput,

    /// The input is shorter than the filter support.
    #[error("input too short: got {len} samples, need at least {min}")]
    TooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// The input length is not a power of two.
    #[error("input length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// A nested input has rows of different lengths.
    #[error("ragged input: row {row} has {got} entries, expected {expected}")]
    RaggedInput {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// An interleaved complex spectrum has an odd number of values.
    #[error("interleaved complex input has odd length {0}")]
    OddSpectrumLength(usize),

    /// A level index lies outside the levels available for the input length.
    #[error("level {requested} out of range, at most {max} levels for this length")]
    LevelOutOfRange {
        /// Level that was requested.
        requested: usize,
        /// Number of levels the input supports.
        max: usize,
    },

    /// The option is not available for the selected transform.
    #[error("unsupported option: {0}")]
    UnsupportedOption(String),
}
