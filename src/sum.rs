//! # Integer Summation Kernels
//!
//! Every kernel computes the wrapping `i32` sum of the same slice. Each one
//! isolates a single technique so its timing can be attributed to it:
//!
//! | Kernel | Technique |
//! |--------|-----------|
//! | `scalar::for_each` | iterator loop (baseline) |
//! | `scalar::for_index` | explicit index range |
//! | `scalar::while_loop` | index with manual increment |
//! | `scalar::slice` | fold over the borrowed slice |
//! | `unrolled::while_unrolled` | 4 elements per iteration + remainder loop |
//! | `unrolled::slice_unrolled` | `chunks_exact(4)` + remainder |
//! | `unrolled::pinned` | 4-wide through a stable-address view, no bounds checks |
//! | `portable_simd::sum` | `std::simd` with a runtime-selected lane count |
//! | `sse2::sum` | 128-bit intrinsics, SSSE3 horizontal add or SSE2 shuffle reduction |
//!
//! ## The Remainder Loop
//!
//! Blocked kernels can only consume whole blocks. The tail is summed by a
//! scalar loop:
//!
//! ```text
//! n = 7, width = 4
//! last_block = n - n % width = 4
//!
//! index:  0  1  2  3 | 4  5  6
//!         └─ block ──┘ └ tail ┘
//! ```
//!
//! Because `i32` wrapping addition is associative and commutative, the
//! order in which blocks, lanes and the tail are combined never changes the
//! result.

// ============================================================================
// Scalar loops
// ============================================================================

pub mod scalar {
    /// Plain iteration over the elements
    pub fn for_each(items: &[i32]) -> i32 {
        let mut sum = 0i32;
        for &v in items {
            sum = sum.wrapping_add(v);
        }
        sum
    }

    /// Explicit index range `0..n`
    #[allow(clippy::needless_range_loop)]
    pub fn for_index(items: &[i32]) -> i32 {
        let mut sum = 0i32;
        for i in 0..items.len() {
            sum = sum.wrapping_add(items[i]);
        }
        sum
    }

    /// Condition-counted loop with a manually advanced index
    pub fn while_loop(items: &[i32]) -> i32 {
        let mut sum = 0i32;
        let mut i = 0;
        while i < items.len() {
            sum = sum.wrapping_add(items[i]);
            i += 1;
        }
        sum
    }

    /// Fold over the borrowed slice
    pub fn slice(items: &[i32]) -> i32 {
        items.iter().copied().fold(0i32, i32::wrapping_add)
    }
}

// ============================================================================
// 4-wide unrolled loops
// ============================================================================
//
// A CPU can retire several independent adds per cycle; unrolling gives the
// scheduler four loads per iteration and one loop-counter update.

pub mod unrolled {
    use crate::pinned::Pinned;

    /// Elements consumed per unrolled iteration
    pub const BLOCK: usize = 4;

    /// Four bounds-checked loads per iteration, then the remainder
    pub fn while_unrolled(items: &[i32]) -> i32 {
        let n = items.len();
        let last_block = n - n % BLOCK;
        let mut sum = 0i32;
        let mut i = 0;

        while i < last_block {
            sum = sum.wrapping_add(items[i]);
            sum = sum.wrapping_add(items[i + 1]);
            sum = sum.wrapping_add(items[i + 2]);
            sum = sum.wrapping_add(items[i + 3]);
            i += BLOCK;
        }

        while i < n {
            sum = sum.wrapping_add(items[i]);
            i += 1;
        }
        sum
    }

    /// `chunks_exact` lets the compiler drop the per-element bounds checks
    pub fn slice_unrolled(items: &[i32]) -> i32 {
        let chunks = items.chunks_exact(BLOCK);
        let remainder = chunks.remainder();
        let mut sum = 0i32;

        for chunk in chunks {
            sum = sum.wrapping_add(chunk[0]);
            sum = sum.wrapping_add(chunk[1]);
            sum = sum.wrapping_add(chunk[2]);
            sum = sum.wrapping_add(chunk[3]);
        }

        for &v in remainder {
            sum = sum.wrapping_add(v);
        }
        sum
    }

    /// Same unrolling, but loads go straight through a stable base address.
    ///
    /// The view is held only for the duration of the loop.
    pub fn pinned(items: &[i32]) -> i32 {
        let view = Pinned::acquire(items);
        let n = view.len();
        let last_block = view.block_end(BLOCK);
        let mut sum = 0i32;
        let mut i = 0;

        // SAFETY: i + 3 < last_block <= n inside the block loop, i < n in the tail
        unsafe {
            while i < last_block {
                sum = sum.wrapping_add(view.read(i));
                sum = sum.wrapping_add(view.read(i + 1));
                sum = sum.wrapping_add(view.read(i + 2));
                sum = sum.wrapping_add(view.read(i + 3));
                i += BLOCK;
            }

            while i < n {
                sum = sum.wrapping_add(view.read(i));
                i += 1;
            }
        }
        sum
    }
}

// ============================================================================
// Portable SIMD with a runtime lane count
// ============================================================================

pub mod portable_simd {
    use std::simd::num::SimdInt;
    use std::simd::{i32x16, i32x4, i32x8};
    use std::sync::OnceLock;
    use tracing::debug;

    /// Number of `i32` lanes in one vector register
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum VectorWidth {
        /// 128-bit registers (SSE2, NEON, and the fallback)
        Lanes4,
        /// 256-bit registers (AVX2)
        Lanes8,
        /// 512-bit registers (AVX-512F)
        Lanes16,
    }

    impl VectorWidth {
        pub const ALL: [VectorWidth; 3] = [Self::Lanes4, Self::Lanes8, Self::Lanes16];

        pub fn lanes(self) -> usize {
            match self {
                Self::Lanes4 => 4,
                Self::Lanes8 => 8,
                Self::Lanes16 => 16,
            }
        }

        /// Whether the running CPU has registers this wide
        pub fn is_supported(self) -> bool {
            match self {
                Self::Lanes4 => true,
                #[cfg(target_arch = "x86_64")]
                Self::Lanes8 => is_x86_feature_detected!("avx2"),
                #[cfg(target_arch = "x86_64")]
                Self::Lanes16 => is_x86_feature_detected!("avx512f"),
                #[cfg(not(target_arch = "x86_64"))]
                _ => false,
            }
        }

        fn detect() -> Self {
            Self::ALL
                .into_iter()
                .rev()
                .find(|width| width.is_supported())
                .unwrap_or(Self::Lanes4)
        }
    }

    /// Widest vector the running CPU supports, queried once per process
    pub fn vector_width() -> VectorWidth {
        static WIDTH: OnceLock<VectorWidth> = OnceLock::new();
        *WIDTH.get_or_init(|| {
            let width = VectorWidth::detect();
            debug!(lanes = width.lanes(), "selected portable SIMD width");
            width
        })
    }

    /// Sum using the platform vector width
    pub fn sum(items: &[i32]) -> i32 {
        let width = vector_width();
        // SAFETY: vector_width only returns supported widths
        unsafe { sum_unchecked(items, width) }
    }

    /// Sum with an explicit lane count.
    ///
    /// Returns `None` if the running CPU lacks registers of that width.
    pub fn sum_with_width(items: &[i32], width: VectorWidth) -> Option<i32> {
        if !width.is_supported() {
            return None;
        }
        // SAFETY: width was checked against the running CPU
        Some(unsafe { sum_unchecked(items, width) })
    }

    /// Full blocks accumulate lane-wise into one vector; the vector is
    /// reduced to a scalar and the `n % lanes` tail is added afterwards.
    ///
    /// # Safety
    /// `width` must be supported by the running CPU.
    unsafe fn sum_unchecked(items: &[i32], width: VectorWidth) -> i32 {
        let n = items.len();
        let last_block = n - n % width.lanes();
        let (blocks, tail) = items.split_at(last_block);

        let mut sum = match width {
            VectorWidth::Lanes4 => sum_blocks_4(blocks),
            VectorWidth::Lanes8 => sum_blocks_8(blocks),
            VectorWidth::Lanes16 => sum_blocks_16(blocks),
        };

        for &v in tail {
            sum = sum.wrapping_add(v);
        }
        sum
    }

    // Wider accumulators are compiled for the register file they target;
    // without the feature LLVM splits i32x8/i32x16 into 128-bit adds.
    macro_rules! lane_sum {
        ($name:ident, $vector:ty, $lanes:expr $(, $feature:literal)?) => {
            /// `blocks.len()` must be a multiple of the lane count
            $(#[cfg_attr(target_arch = "x86_64", target_feature(enable = $feature))])?
            unsafe fn $name(blocks: &[i32]) -> i32 {
                debug_assert_eq!(blocks.len() % $lanes, 0);
                let mut acc = <$vector>::splat(0);
                for chunk in blocks.chunks_exact($lanes) {
                    acc += <$vector>::from_slice(chunk);
                }
                // Integer reduce_sum wraps, matching the scalar kernels
                acc.reduce_sum()
            }
        };
    }

    lane_sum!(sum_blocks_4, i32x4, 4);
    lane_sum!(sum_blocks_8, i32x8, 8, "avx2");
    lane_sum!(sum_blocks_16, i32x16, 16, "avx512f");

}

// ============================================================================
// x86 hardware intrinsics: SSE2 (4 × i32 per 128-bit register)
// ============================================================================
//
// Reduction of the 4-lane accumulator [a, b, c, d]:
//
// With SSSE3 (phaddd):
// ```text
// hadd(v, v) = [a+b, c+d, a+b, c+d]
// hadd(v, v) = [a+b+c+d, ...]
// ```
//
// SSE2 only (pshufd):
// ```text
// shuffle 0x4E swaps 64-bit halves: [c, d, a, b]; add → [a+c, b+d, ...]
// shuffle 0xB1 swaps 32-bit pairs:  [b+d, a+c, ...]; add → [a+b+c+d, ...]
// ```

pub mod sse2 {
    #[cfg(target_arch = "x86_64")]
    use crate::pinned::Pinned;
    use std::sync::OnceLock;
    use tracing::debug;

    /// Instruction-set support for the 128-bit kernel
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum Capability {
        /// No SSE2: the kernel is skipped
        Unavailable,
        /// SSE2 only: reduce with shuffles
        Basic,
        /// SSE2 + SSSE3: reduce with horizontal adds
        WithHorizontalAdd,
    }

    impl Capability {
        /// Capability of the running CPU, queried once per process
        pub fn detect() -> Self {
            static CAPABILITY: OnceLock<Capability> = OnceLock::new();
            *CAPABILITY.get_or_init(Self::query)
        }

        fn query() -> Self {
            #[cfg(target_arch = "x86_64")]
            {
                let capability = if !is_x86_feature_detected!("sse2") {
                    Self::Unavailable
                } else if is_x86_feature_detected!("ssse3") {
                    Self::WithHorizontalAdd
                } else {
                    Self::Basic
                };
                debug!(?capability, "detected SSE capability");
                capability
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                debug!("SSE kernels unavailable on this architecture");
                Self::Unavailable
            }
        }
    }

    /// Sum with the best reduction the CPU supports.
    ///
    /// Returns `None` when SSE2 is unavailable; that is a skip, not a
    /// correctness failure.
    pub fn sum(items: &[i32]) -> Option<i32> {
        sum_with(items, Capability::detect())
    }

    /// Sum using a specific reduction path.
    ///
    /// Returns `None` if `capability` is `Unavailable` or exceeds what the
    /// running CPU supports.
    pub fn sum_with(items: &[i32], capability: Capability) -> Option<i32> {
        if capability == Capability::Unavailable || capability > Capability::detect() {
            return None;
        }
        imp::sum(items, capability)
    }

    #[cfg(target_arch = "x86_64")]
    mod imp {
        use super::{Capability, Pinned};
        use std::arch::x86_64::*;

        const LANES: usize = 4;

        pub(super) fn sum(items: &[i32], capability: Capability) -> Option<i32> {
            let view = Pinned::acquire(items);
            let n = view.len();
            let last_block = view.block_end(LANES);

            // SAFETY: capability was checked against the running CPU by the caller
            let mut sum = unsafe {
                let acc = accumulate(&view, last_block);
                match capability {
                    Capability::WithHorizontalAdd => reduce_hadd(acc),
                    Capability::Basic => reduce_shuffle(acc),
                    Capability::Unavailable => return None,
                }
            };

            for i in last_block..n {
                // SAFETY: i < n
                sum = sum.wrapping_add(unsafe { view.read(i) });
            }
            Some(sum)
        }

        /// Lane-wise sum of every full 4-element block before `last_block`
        #[target_feature(enable = "sse2")]
        unsafe fn accumulate(view: &Pinned<'_, i32>, last_block: usize) -> __m128i {
            let base = view.as_ptr();
            let mut acc = _mm_setzero_si128();
            let mut i = 0;
            while i < last_block {
                let v = _mm_loadu_si128(base.add(i) as *const __m128i);
                acc = _mm_add_epi32(acc, v);
                i += LANES;
            }
            acc
        }

        #[target_feature(enable = "ssse3")]
        unsafe fn reduce_hadd(v: __m128i) -> i32 {
            let v = _mm_hadd_epi32(v, v);
            let v = _mm_hadd_epi32(v, v);
            _mm_cvtsi128_si32(v)
        }

        #[target_feature(enable = "sse2")]
        unsafe fn reduce_shuffle(v: __m128i) -> i32 {
            let v = _mm_add_epi32(v, _mm_shuffle_epi32(v, 0x4E));
            let v = _mm_add_epi32(v, _mm_shuffle_epi32(v, 0xB1));
            _mm_cvtsi128_si32(v)
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    mod imp {
        use super::Capability;

        pub(super) fn sum(_items: &[i32], _capability: Capability) -> Option<i32> {
            None
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_unavailable_is_skipped() {
            assert_eq!(sum_with(&[1, 2, 3], Capability::Unavailable), None);
        }

        #[test]
        fn test_both_reduction_paths_agree() {
            let items: Vec<i32> = (0..103).collect();
            let expected: i32 = items.iter().sum();
            for capability in [Capability::Basic, Capability::WithHorizontalAdd] {
                if capability <= Capability::detect() {
                    assert_eq!(sum_with(&items, capability), Some(expected), "{capability:?}");
                }
            }
        }

        #[cfg(target_arch = "x86_64")]
        #[test]
        fn test_x86_64_always_has_sse2() {
            assert!(Capability::detect() >= Capability::Basic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_infallible() -> [(&'static str, fn(&[i32]) -> i32); 8] {
        [
            ("for_each", scalar::for_each),
            ("for_index", scalar::for_index),
            ("while_loop", scalar::while_loop),
            ("slice", scalar::slice),
            ("while_unrolled", unrolled::while_unrolled),
            ("slice_unrolled", unrolled::slice_unrolled),
            ("pinned", unrolled::pinned),
            ("portable_simd", portable_simd::sum),
        ]
    }

    #[test]
    fn test_seven_items_cover_block_and_tail() {
        // One full block (0..4) and a 3-element tail (4..7); distinct powers
        // of two make a dropped or doubled element visible in the sum
        let items = [1, 2, 4, 8, 16, 32, 64];
        for (name, kernel) in all_infallible() {
            assert_eq!(kernel(&items), 127, "{name}");
        }
    }

    #[test]
    fn test_empty_sums_to_zero() {
        for (name, kernel) in all_infallible() {
            assert_eq!(kernel(&[]), 0, "{name}");
        }
        assert!(matches!(sse2::sum(&[]), None | Some(0)));
    }

    #[test]
    fn test_wrapping_overflow() {
        let items = [i32::MAX, 1, i32::MAX, 1, 5];
        let expected = i32::MAX.wrapping_add(1).wrapping_add(i32::MAX).wrapping_add(1).wrapping_add(5);
        for (name, kernel) in all_infallible() {
            assert_eq!(kernel(&items), expected, "{name}");
        }
        if let Some(sum) = sse2::sum(&items) {
            assert_eq!(sum, expected);
        }
    }
}
