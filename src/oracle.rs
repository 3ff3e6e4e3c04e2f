//! Correctness oracle.
//!
//! A kernel's timing is only meaningful once its output matches the
//! reference exactly. The checks fail fast: sequences are compared by
//! length first, then element by element up to the first divergence.

use crate::error::OracleError;

/// Compare a kernel sum against the reference sum
pub fn check_sum(actual: i32, expected: i32) -> Result<(), OracleError> {
    if actual != expected {
        return Err(OracleError::SumMismatch { expected, actual });
    }
    Ok(())
}

/// Compare kernel code units against the reference code units.
///
/// A length difference is reported without looking at any element.
pub fn check_units(actual: &[u8], expected: &[u8]) -> Result<(), OracleError> {
    if actual.len() != expected.len() {
        return Err(OracleError::LengthMismatch {
            expected_len: expected.len(),
            actual_len: actual.len(),
        });
    }

    match actual.iter().zip(expected).position(|(a, e)| a != e) {
        Some(index) => Err(OracleError::ValueMismatch {
            index,
            expected: expected[index],
            actual: actual[index],
        }),
        None => Ok(()),
    }
}
