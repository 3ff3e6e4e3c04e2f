#![feature(portable_simd)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perf_kernels::registry::{SUM_KERNELS, UPPER_KERNELS};
use perf_kernels::sum::portable_simd::{self, VectorWidth};
use perf_kernels::sum::sse2::{self, Capability};
use perf_kernels::{IntegerDataset, TextDataset};

const SEED: u64 = 1;
const ITEM_SIZES: &[usize] = &[1_000, 100_000, 1_000_003];
const TEXT_SIZES: &[usize] = &[1_000, 100_000];

// =============================================================================
// Summation Benchmarks
// =============================================================================

fn bench_sum_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sum Items");

    for &size in ITEM_SIZES {
        let data = IntegerDataset::generate(SEED, size);

        for kernel in SUM_KERNELS {
            // Skipped kernels have nothing to measure
            if !(kernel.supported)() {
                continue;
            }
            assert_eq!((kernel.run)(&data), Some(data.expected_sum()), "{}", kernel.name);

            group.bench_with_input(BenchmarkId::new(kernel.name, size), &data, |bencher, data| {
                bencher.iter(|| (kernel.run)(black_box(data)));
            });
        }
    }

    group.finish();
}

fn bench_sum_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sum Vector Width");
    let data = IntegerDataset::generate(SEED, 100_000);

    for width in VectorWidth::ALL {
        if !width.is_supported() {
            continue;
        }
        group.bench_with_input(
            BenchmarkId::new("std::simd", width.lanes()),
            &data,
            |bencher, data| {
                bencher.iter(|| portable_simd::sum_with_width(black_box(data.items()), width));
            },
        );
    }

    for capability in [Capability::Basic, Capability::WithHorizontalAdd] {
        if capability > Capability::detect() {
            continue;
        }
        group.bench_with_input(
            BenchmarkId::new("sse2", format!("{capability:?}")),
            &data,
            |bencher, data| {
                bencher.iter(|| sse2::sum_with(black_box(data.items()), capability));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Uppercase Benchmarks
// =============================================================================

fn bench_to_uppercase(c: &mut Criterion) {
    let mut group = c.benchmark_group("To Uppercase");

    for &size in TEXT_SIZES {
        let text = TextDataset::generate(SEED, size);

        for kernel in UPPER_KERNELS {
            assert_eq!((kernel.run)(&text), text.expected_upper(), "{}", kernel.name);

            group.bench_with_input(BenchmarkId::new(kernel.name, size), &text, |bencher, text| {
                bencher.iter(|| (kernel.run)(black_box(text)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_sum_items, bench_sum_widths, bench_to_uppercase);
criterion_main!(benches);
