//! Criterion benchmarks for character resolution and report building.
//!
//! Per-character cost is dwarfed by the 2 x 5 ms hold on the device, so these
//! mostly guard against the table lookup regressing into something
//! allocation-heavy.
//!
//! Run with:
//! ```bash
//! cargo bench --package linuxkey-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linuxkey_core::{keymap::supported_chars, resolve, KeyboardReport};

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog!\n\
    fn main() { println!(\"{}\", 1 + 2 * 3); }\r\n\
    Caf\u{e9} \u{2014} unsupported characters are skipped.\t~|_";

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_resolve");

    group.bench_function("lowercase_single", |b| b.iter(|| resolve(black_box('q'))));
    group.bench_function("uppercase_single", |b| b.iter(|| resolve(black_box('Q'))));
    group.bench_function("unsupported_single", |b| b.iter(|| resolve(black_box('\u{e9}'))));

    let all: Vec<char> = supported_chars().collect();
    group.bench_function("all_supported", |b| {
        b.iter(|| all.iter().filter_map(|&ch| resolve(black_box(ch))).count())
    });

    group.finish();
}

fn bench_text_to_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_text_to_reports");

    for repeat in [1usize, 16, 256] {
        let text = SAMPLE_TEXT.repeat(repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            b.iter(|| {
                text.chars()
                    .filter_map(resolve)
                    .map(KeyboardReport::press)
                    .filter(|r| !r.is_release())
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_text_to_reports);
criterion_main!(benches);
