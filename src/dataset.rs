//! Deterministic input datasets with precomputed reference results.
//!
//! Both datasets are immutable value objects: generated once per benchmark
//! configuration and only ever read by kernels. The same seed and length
//! always reproduce the same contents.

use tracing::debug;

/// Exclusive upper bound of generated integers
pub const ITEM_UPPER_BOUND: i32 = 100;

/// Inclusive lower bound of text draws
const TEXT_DRAW_MIN: u8 = 50;
/// Exclusive upper bound of text draws ('z' is never produced)
const TEXT_DRAW_MAX: u8 = 122;
/// Draws below 'A' collapse to a space
const TEXT_LETTER_MIN: u8 = b'A';

/// Integers to sum, plus their wrapping sum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerDataset {
    items: Vec<i32>,
    expected_sum: i32,
}

impl IntegerDataset {
    /// Draw `n` integers uniformly from `[0, 100)`.
    ///
    /// The reference sum accumulates during generation with the same
    /// wrapping `i32` addition every kernel uses.
    pub fn generate(seed: u64, n: usize) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut items = Vec::with_capacity(n);
        let mut expected_sum = 0i32;
        for _ in 0..n {
            let item = rng.i32(0..ITEM_UPPER_BOUND);
            items.push(item);
            expected_sum = expected_sum.wrapping_add(item);
        }
        debug!(seed, n, expected_sum, "generated integer dataset");
        Self {
            items,
            expected_sum,
        }
    }

    /// Wrap explicit items, computing the reference sum
    pub fn from_items(items: Vec<i32>) -> Self {
        let expected_sum = items.iter().fold(0i32, |acc, &x| acc.wrapping_add(x));
        Self {
            items,
            expected_sum,
        }
    }

    pub fn items(&self) -> &[i32] {
        &self.items
    }

    pub fn expected_sum(&self) -> i32 {
        self.expected_sum
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// ASCII text to uppercase, plus its reference uppercase form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDataset {
    base_text: Vec<u8>,
    expected_upper: Vec<u8>,
}

impl TextDataset {
    /// Draw `len` code units from `[50, 122)`, mapping anything below 'A'
    /// to a space.
    ///
    /// Draws in `[91, 97)` are punctuation (`[`, `\`, `]`, `^`, `_`, `` ` ``)
    /// and are kept as-is.
    pub fn generate(seed: u64, len: usize) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let base_text: Vec<u8> = (0..len)
            .map(|_| {
                let unit = rng.u8(TEXT_DRAW_MIN..TEXT_DRAW_MAX);
                if unit < TEXT_LETTER_MIN {
                    b' '
                } else {
                    unit
                }
            })
            .collect();
        debug!(seed, len, "generated text dataset");
        Self::from_text(base_text)
    }

    /// Wrap explicit text, computing the reference uppercase form
    pub fn from_text(base_text: impl Into<Vec<u8>>) -> Self {
        let base_text = base_text.into();
        let expected_upper = reference_upper(&base_text);
        Self {
            base_text,
            expected_upper,
        }
    }

    pub fn base_text(&self) -> &[u8] {
        &self.base_text
    }

    pub fn expected_upper(&self) -> &[u8] {
        &self.expected_upper
    }

    pub fn len(&self) -> usize {
        self.base_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_text.is_empty()
    }
}

/// Trusted uppercase: lowercase ASCII letters shift to uppercase, every
/// other code unit is copied unchanged.
fn reference_upper(text: &[u8]) -> Vec<u8> {
    text.iter().map(u8::to_ascii_uppercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_generation_is_deterministic() {
        let a = IntegerDataset::generate(1, 10_000);
        let b = IntegerDataset::generate(1, 10_000);
        assert_eq!(a, b);

        let c = IntegerDataset::generate(2, 10_000);
        assert_ne!(a.items(), c.items());
    }

    #[test]
    fn test_integer_items_in_range() {
        let data = IntegerDataset::generate(1, 100_000);
        assert_eq!(data.len(), 100_000);
        assert!(data.items().iter().all(|&x| (0..100).contains(&x)));
    }

    #[test]
    fn test_expected_sum_is_sequential_sum() {
        let data = IntegerDataset::generate(1, 100_000);
        let sum: i64 = data.items().iter().map(|&x| x as i64).sum();
        // Values < 100 over 100k items cannot overflow i32
        assert_eq!(data.expected_sum() as i64, sum);
    }

    #[test]
    fn test_expected_sum_wraps() {
        let data = IntegerDataset::from_items(vec![i32::MAX, 1, 2]);
        assert_eq!(data.expected_sum(), i32::MIN + 2);
    }

    #[test]
    fn test_empty_dataset() {
        let data = IntegerDataset::generate(1, 0);
        assert!(data.is_empty());
        assert_eq!(data.expected_sum(), 0);
    }

    #[test]
    fn test_text_generation_alphabet() {
        let text = TextDataset::generate(1, 1_000);
        assert_eq!(text.len(), 1_000);
        assert_eq!(text.expected_upper().len(), text.base_text().len());
        for &unit in text.base_text() {
            assert!(unit == b' ' || (b'A'..b'z').contains(&unit), "unexpected unit {unit}");
        }
        assert_eq!(text, TextDataset::generate(1, 1_000));
    }

    #[test]
    fn test_reference_upper_keeps_non_letters() {
        let text = TextDataset::from_text("ab CD12[_`".as_bytes());
        assert_eq!(text.expected_upper(), b"AB CD12[_`");
    }
}
