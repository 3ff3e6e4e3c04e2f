//! # Loop, Unrolling and SIMD Kernel Comparison
//!
//! Two micro-kernels, each implemented several functionally identical ways so
//! that the cost of one optimization technique can be measured in isolation:
//!
//! 1. Integer summation: scalar loops, 4-wide unrolling, stable-address
//!    (bounds-check free) traversal, `std::simd` with a runtime lane count,
//!    and x86 SSE2/SSSE3 intrinsics.
//! 2. ASCII uppercase: built-in Unicode transform, explicit range rewrite,
//!    library ASCII transform, `std::simd`, and stable-address rewrites.
//!
//! A timing only means something if the kernel is correct, so every kernel
//! output is checked by the [`oracle`] against a reference computed when the
//! [`dataset`] was generated.
//!
//! ## Lane Reduction
//!
//! Vector kernels accumulate one partial sum per lane and reduce at the end:
//!
//! ```text
//! block 0: [ 3,  1,  4,  1]
//! block 1: [ 5,  9,  2,  6]
//!          ───────────────── lane-wise add
//! acc:     [ 8, 10,  6,  7]  → reduce → 31
//! ```
//!
//! Wrapping `i32` addition is associative and commutative, so the result is
//! bit-identical to a sequential scalar loop.

#![feature(portable_simd)]

pub mod config;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod oracle;
pub mod pinned;
pub mod registry;
pub mod sum;
pub mod upper;

pub use config::BenchConfig;
pub use dataset::{IntegerDataset, TextDataset};
pub use driver::{Driver, Family, RunOutcome, RunReport};
pub use error::{Error, OracleError, Result};
