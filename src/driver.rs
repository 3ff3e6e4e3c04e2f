//! Benchmark driver.
//!
//! Runs a kernel `warmup` times untimed, then `iterations` times timed. The
//! output of every timed call is checked by the oracle after that call's
//! timer stops, so verification never pollutes the measurement. A failed
//! check aborts only the kernel being measured.

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::dataset::{IntegerDataset, TextDataset};
use crate::error::{Error, Result};
use crate::oracle;
use crate::registry::{self, SumKernel, UpperKernel, SUM_KERNELS, UPPER_KERNELS};

/// Which kernel family a report belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Sum,
    Upper,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Sum => write!(f, "sum"),
            Family::Upper => write!(f, "upper"),
        }
    }
}

/// Result of one kernel run that passed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Timed and verified
    Measured { total: Duration, per_iter: Duration },
    /// The kernel cannot run on this CPU
    Skipped { reason: String },
}

/// Report for one kernel
#[derive(Debug)]
pub struct RunReport {
    pub name: &'static str,
    pub family: Family,
    pub outcome: Result<RunOutcome>,
}

/// Holds both datasets for one configuration and runs kernels against them
#[derive(Debug)]
pub struct Driver {
    config: BenchConfig,
    integers: IntegerDataset,
    text: TextDataset,
}

impl Driver {
    /// Validate `config` and generate both datasets
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let integers = IntegerDataset::generate(config.seed, config.item_count);
        let text = TextDataset::generate(config.seed, config.text_len);
        Self::with_datasets(config, integers, text)
    }

    /// Validate `config` and use prepared datasets; the dataset fields of
    /// `config` are ignored
    pub fn with_datasets(
        config: BenchConfig,
        integers: IntegerDataset,
        text: TextDataset,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            integers,
            text,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn integers(&self) -> &IntegerDataset {
        &self.integers
    }

    pub fn text(&self) -> &TextDataset {
        &self.text
    }

    /// Run a kernel of either family by name
    pub fn run(&self, name: &str) -> Result<RunOutcome> {
        if let Some(kernel) = registry::find_sum(name) {
            return self.measure_sum(kernel);
        }
        if let Some(kernel) = registry::find_upper(name) {
            return self.measure_upper(kernel);
        }
        Err(Error::UnknownKernel(name.to_string()))
    }

    pub fn run_sum(&self, name: &str) -> Result<RunOutcome> {
        let kernel = registry::find_sum(name).ok_or_else(|| Error::UnknownKernel(name.to_string()))?;
        self.measure_sum(kernel)
    }

    pub fn run_upper(&self, name: &str) -> Result<RunOutcome> {
        let kernel =
            registry::find_upper(name).ok_or_else(|| Error::UnknownKernel(name.to_string()))?;
        self.measure_upper(kernel)
    }

    /// Run every registered kernel; one report per kernel, failures included
    pub fn run_all(&self) -> Vec<RunReport> {
        let sums = SUM_KERNELS.iter().map(|k| RunReport {
            name: k.name,
            family: Family::Sum,
            outcome: self.measure_sum(k),
        });
        let uppers = UPPER_KERNELS.iter().map(|k| RunReport {
            name: k.name,
            family: Family::Upper,
            outcome: self.measure_upper(k),
        });
        sums.chain(uppers).collect()
    }

    /// Measure and verify a summation kernel
    pub fn measure_sum(&self, kernel: &SumKernel) -> Result<RunOutcome> {
        let data = &self.integers;
        let expected = data.expected_sum();

        if !(kernel.supported)() {
            return Ok(skipped(kernel.name));
        }

        for _ in 0..self.config.warmup {
            black_box((kernel.run)(black_box(data)));
        }

        let mut total = Duration::ZERO;
        for _ in 0..self.config.iterations {
            let start = Instant::now();
            let result = black_box((kernel.run)(black_box(data)));
            total += start.elapsed();

            let Some(actual) = result else {
                return Ok(skipped(kernel.name));
            };
            oracle::check_sum(actual, expected).map_err(|e| {
                warn!(kernel = kernel.name, error = %e, "kernel failed verification");
                Error::from(e)
            })?;
        }

        Ok(self.measured(kernel.name, total))
    }

    /// Measure and verify an uppercase kernel
    pub fn measure_upper(&self, kernel: &UpperKernel) -> Result<RunOutcome> {
        let data = &self.text;

        for _ in 0..self.config.warmup {
            black_box((kernel.run)(black_box(data)));
        }

        let mut total = Duration::ZERO;
        for _ in 0..self.config.iterations {
            let start = Instant::now();
            let result = black_box((kernel.run)(black_box(data)));
            total += start.elapsed();

            oracle::check_units(&result, data.expected_upper()).map_err(|e| {
                warn!(kernel = kernel.name, error = %e, "kernel failed verification");
                Error::from(e)
            })?;
        }

        Ok(self.measured(kernel.name, total))
    }

    fn measured(&self, name: &str, total: Duration) -> RunOutcome {
        let per_iter = total / self.config.iterations;
        info!(kernel = name, ?total, ?per_iter, "kernel verified");
        RunOutcome::Measured { total, per_iter }
    }
}

fn skipped(name: &str) -> RunOutcome {
    let reason = "instruction set not supported on this CPU".to_string();
    warn!(kernel = name, %reason, "skipping kernel");
    RunOutcome::Skipped { reason }
}
