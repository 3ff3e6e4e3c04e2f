//! Named kernel tables.
//!
//! Each entry adapts one kernel to a uniform signature over the shared
//! dataset so a driver can select kernels by name.

use crate::dataset::{IntegerDataset, TextDataset};
use crate::{sum, upper};

/// One summation kernel.
///
/// `supported` reports whether the kernel can run on this CPU; `run`
/// returns `None` when it cannot.
#[derive(Clone, Copy)]
pub struct SumKernel {
    pub name: &'static str,
    pub supported: fn() -> bool,
    pub run: fn(&IntegerDataset) -> Option<i32>,
}

fn always() -> bool {
    true
}

/// One uppercase kernel
#[derive(Clone, Copy)]
pub struct UpperKernel {
    pub name: &'static str,
    pub run: fn(&TextDataset) -> Vec<u8>,
}

impl std::fmt::Debug for SumKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SumKernel").field("name", &self.name).finish()
    }
}

impl std::fmt::Debug for UpperKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpperKernel").field("name", &self.name).finish()
    }
}

/// Every summation kernel; the first entry is the baseline
pub const SUM_KERNELS: &[SumKernel] = &[
    SumKernel {
        name: "for_each",
        supported: always,
        run: |d| Some(sum::scalar::for_each(d.items())),
    },
    SumKernel {
        name: "for_index",
        supported: always,
        run: |d| Some(sum::scalar::for_index(d.items())),
    },
    SumKernel {
        name: "while_loop",
        supported: always,
        run: |d| Some(sum::scalar::while_loop(d.items())),
    },
    SumKernel {
        name: "while_unrolled",
        supported: always,
        run: |d| Some(sum::unrolled::while_unrolled(d.items())),
    },
    SumKernel {
        name: "unrolled_pinned",
        supported: always,
        run: |d| Some(sum::unrolled::pinned(d.items())),
    },
    SumKernel {
        name: "slice",
        supported: always,
        run: |d| Some(sum::scalar::slice(d.items())),
    },
    SumKernel {
        name: "slice_unrolled",
        supported: always,
        run: |d| Some(sum::unrolled::slice_unrolled(d.items())),
    },
    SumKernel {
        name: "portable_simd",
        supported: always,
        run: |d| Some(sum::portable_simd::sum(d.items())),
    },
    SumKernel {
        name: "sse2",
        supported: || sum::sse2::Capability::detect() != sum::sse2::Capability::Unavailable,
        run: |d| sum::sse2::sum(d.items()),
    },
];

/// Every uppercase kernel; the first entry is the baseline
pub const UPPER_KERNELS: &[UpperKernel] = &[
    UpperKernel {
        name: "to_uppercase",
        run: |d| upper::scalar::to_uppercase(d.base_text()),
    },
    UpperKernel {
        name: "ascii_rewrite",
        run: |d| upper::scalar::ascii_rewrite(d.base_text()),
    },
    UpperKernel {
        name: "library_ascii",
        run: |d| upper::scalar::library_ascii(d.base_text()),
    },
    UpperKernel {
        name: "upper_simd",
        run: |d| upper::portable_simd::to_upper(d.base_text()),
    },
    UpperKernel {
        name: "pinned_indexed",
        run: |d| upper::pinned::indexed(d.base_text()),
    },
    UpperKernel {
        name: "pinned_moving",
        run: |d| upper::pinned::moving(d.base_text()),
    },
];

pub fn find_sum(name: &str) -> Option<&'static SumKernel> {
    SUM_KERNELS.iter().find(|k| k.name == name)
}

pub fn find_upper(name: &str) -> Option<&'static UpperKernel> {
    UPPER_KERNELS.iter().find(|k| k.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique_across_families() {
        let names: Vec<&str> = SUM_KERNELS
            .iter()
            .map(|k| k.name)
            .chain(UPPER_KERNELS.iter().map(|k| k.name))
            .collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_supported_matches_run() {
        let data = IntegerDataset::from_items(vec![1, 2, 3]);
        for kernel in SUM_KERNELS {
            assert_eq!((kernel.supported)(), (kernel.run)(&data).is_some(), "{}", kernel.name);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find_sum("sse2").map(|k| k.name), Some("sse2"));
        assert_eq!(find_upper("pinned_moving").map(|k| k.name), Some("pinned_moving"));
        assert!(find_sum("to_uppercase").is_none());
        assert!(find_upper("missing").is_none());
    }
}
