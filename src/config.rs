//! Benchmark parameters.
//!
//! These are the only knobs the kernels see: how many integers to sum, how
//! long the text is, and which seed feeds the generator.

use crate::error::{Error, Result};

/// Integer dataset size used by the reference benchmark
pub const DEFAULT_ITEM_COUNT: usize = 100_000;

/// Text dataset length used by the reference benchmark
pub const DEFAULT_TEXT_LEN: usize = 1_000;

/// Generator seed used by the reference benchmark
pub const DEFAULT_SEED: u64 = 1;

/// Parameters for one benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of integers in the summation dataset
    pub item_count: usize,
    /// Number of code units in the text dataset
    pub text_len: usize,
    /// Seed for both dataset generators
    pub seed: u64,
    /// Timed calls per kernel
    pub iterations: u32,
    /// Untimed calls per kernel before timing starts
    pub warmup: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            item_count: DEFAULT_ITEM_COUNT,
            text_len: DEFAULT_TEXT_LEN,
            seed: DEFAULT_SEED,
            iterations: 10,
            warmup: 3,
        }
    }
}

impl BenchConfig {
    /// Reject parameters that would produce no measurement
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_benchmark() {
        let config = BenchConfig::default();
        assert_eq!(config.item_count, 100_000);
        assert_eq!(config.text_len, 1_000);
        assert_eq!(config.seed, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = BenchConfig {
            iterations: 0,
            ..BenchConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
