//! # ASCII Uppercase Kernels
//!
//! Every kernel returns a new buffer the same length as its input in which
//! `a..=z` (97..=122) became `A..=Z` and every other code unit is unchanged.
//! The input is never mutated; in-place variants copy first.

/// Lowest code unit that is rewritten
const LOWER_A: u8 = b'a';
/// Highest code unit that is rewritten
const LOWER_Z: u8 = b'z';
/// Distance between a lowercase letter and its uppercase form
const CASE_OFFSET: u8 = 32;

#[inline(always)]
fn upper_unit(c: u8) -> u8 {
    if (LOWER_A..=LOWER_Z).contains(&c) {
        c - CASE_OFFSET
    } else {
        c
    }
}

// ============================================================================
// Scalar
// ============================================================================

pub mod scalar {
    use super::upper_unit;

    /// Built-in Unicode-aware uppercase (baseline).
    ///
    /// Input that is not valid UTF-8 is decoded lossily, so the oracle will
    /// reject it by length or value.
    pub fn to_uppercase(text: &[u8]) -> Vec<u8> {
        String::from_utf8_lossy(text).to_uppercase().into_bytes()
    }

    /// Explicit range check per code unit into a fresh buffer
    pub fn ascii_rewrite(text: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        for &c in text {
            out.push(upper_unit(c));
        }
        out
    }

    /// Standard library ASCII uppercase
    pub fn library_ascii(text: &[u8]) -> Vec<u8> {
        text.to_ascii_uppercase()
    }
}

// ============================================================================
// Portable SIMD
// ============================================================================

pub mod portable_simd {
    use super::{upper_unit, CASE_OFFSET, LOWER_A, LOWER_Z};
    use std::simd::cmp::SimdPartialOrd;
    use std::simd::num::SimdInt;
    use std::simd::u8x32;

    const LANES: usize = 32;

    /// 32 code units per iteration.
    ///
    /// ```text
    /// text:  [ a,  B,  ' ', z, ...]
    /// mask:  [-1,  0,  0,  -1, ...]   // 'a' <= c <= 'z'
    /// & 32:  [32,  0,  0,  32, ...]
    /// text - [ A,  B,  ' ', Z, ...]
    /// ```
    pub fn to_upper(text: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; text.len()];
        let low = u8x32::splat(LOWER_A);
        let high = u8x32::splat(LOWER_Z);
        let offset = u8x32::splat(CASE_OFFSET);

        let chunks = text.chunks_exact(LANES);
        let remainder = chunks.remainder();
        let tail_start = text.len() - remainder.len();

        for (chunk, dst) in chunks.zip(out.chunks_exact_mut(LANES)) {
            let v = u8x32::from_slice(chunk);
            let is_lower = v.simd_ge(low) & v.simd_le(high);
            // Mask lanes are all-ones (-1) when set
            let shift: u8x32 = is_lower.to_simd().cast::<u8>() & offset;
            (v - shift).copy_to_slice(dst);
        }

        for (dst, &c) in out[tail_start..].iter_mut().zip(remainder) {
            *dst = upper_unit(c);
        }
        out
    }
}

// ============================================================================
// Stable-address, in-place rewrite of a copy
// ============================================================================

pub mod pinned {
    use super::upper_unit;
    use crate::pinned::PinnedMut;

    /// Indexed access through a fixed base address
    pub fn indexed(text: &[u8]) -> Vec<u8> {
        let mut out = text.to_vec();
        let mut view = PinnedMut::acquire(&mut out);
        for i in 0..view.len() {
            // SAFETY: i < len
            unsafe {
                let c = view.read(i);
                view.write(i, upper_unit(c));
            }
        }
        out
    }

    /// A moving pointer advanced until it reaches the end address
    pub fn moving(text: &[u8]) -> Vec<u8> {
        let mut out = text.to_vec();
        let mut view = PinnedMut::acquire(&mut out);
        let (mut cursor, end) = view.as_mut_ptr_range();
        // SAFETY: cursor walks [start, end) of the viewed buffer
        unsafe {
            while cursor < end {
                *cursor = upper_unit(*cursor);
                cursor = cursor.add(1);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_kernels() -> [(&'static str, fn(&[u8]) -> Vec<u8>); 6] {
        [
            ("to_uppercase", scalar::to_uppercase),
            ("ascii_rewrite", scalar::ascii_rewrite),
            ("library_ascii", scalar::library_ascii),
            ("upper_simd", portable_simd::to_upper),
            ("pinned_indexed", pinned::indexed),
            ("pinned_moving", pinned::moving),
        ]
    }

    #[test]
    fn test_mixed_text() {
        for (name, kernel) in all_kernels() {
            assert_eq!(kernel(b"ab CD12"), b"AB CD12", "{name}");
        }
    }

    #[test]
    fn test_alphabet_boundaries() {
        // '`' (96) and '{' (123) sit just outside the lowercase range
        let text = b"`az{@AZ[";
        for (name, kernel) in all_kernels() {
            assert_eq!(kernel(text), b"`AZ{@AZ[", "{name}");
        }
    }

    #[test]
    fn test_simd_block_and_tail() {
        let text: Vec<u8> = (0..70).map(|i| b'a' + (i % 26) as u8).collect();
        let expected: Vec<u8> = text.iter().map(u8::to_ascii_uppercase).collect();
        assert_eq!(portable_simd::to_upper(&text), expected);
    }

    #[test]
    fn test_input_not_mutated() {
        let text = b"hello".to_vec();
        for (_, kernel) in all_kernels() {
            let _ = kernel(&text);
        }
        assert_eq!(text, b"hello");
    }
}
