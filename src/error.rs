//! Error types for perf_kernels

use thiserror::Error;

/// Result type alias for driver and configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// A kernel produced output that differs from the precomputed reference.
///
/// Every variant is a correctness defect in the kernel under test, never an
/// environmental fault. Only the first divergence is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// Output sequence has a different length than the reference
    #[error("length mismatch: expected {expected_len} code units, got {actual_len}")]
    LengthMismatch {
        /// Length of the reference sequence
        expected_len: usize,
        /// Length of the kernel output
        actual_len: usize,
    },

    /// First position where the output differs from the reference
    #[error("value mismatch at index {index}: expected {expected}, got {actual}")]
    ValueMismatch {
        /// Index of the first differing code unit
        index: usize,
        /// Reference code unit at `index`
        expected: u8,
        /// Kernel code unit at `index`
        actual: u8,
    },

    /// Summation result differs from the reference sum
    #[error("sum mismatch: expected {expected}, got {actual}")]
    SumMismatch {
        /// Reference sum
        expected: i32,
        /// Kernel sum
        actual: i32,
    },
}

/// Errors surfaced by the benchmark driver
#[derive(Debug, Error)]
pub enum Error {
    /// Kernel output failed verification
    #[error("oracle rejected kernel output: {0}")]
    Oracle(#[from] OracleError),

    /// No kernel registered under this name
    #[error("unknown kernel: {0}")]
    UnknownKernel(String),

    /// Benchmark parameters are unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
