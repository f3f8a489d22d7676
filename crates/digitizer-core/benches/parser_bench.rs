//! Criterion benchmarks for the digitizer line parser.
//!
//! Parsing sits on the per-command hot path between the serial read and the
//! first report write, so it should stay far below a millisecond even for
//! rejected lines.
//!
//! Run with:
//! ```bash
//! cargo bench --package digitizer-core --bench parser_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use digitizer_core::{parse_bytes, parse_line};

// ── Line fixtures ─────────────────────────────────────────────────────────────

const ACCEPTED: &[(&str, &str)] = &[
    ("Move", "MOVE 16384 8192\n"),
    ("MoveLowercase", "move 1 2\r\n"),
    ("Click", "CLICK left\n"),
    ("ButtonPress", "BUTTON_PRESS right\n"),
    ("Release", "RELEASE\n"),
    ("MediaPlayPause", "MEDIA_PLAY_PAUSE\n"),
];

const REJECTED: &[(&str, &str)] = &[
    ("Unknown", "SCROLL 1\n"),
    ("OutOfRange", "MOVE 99999 100\n"),
    ("NotAnInteger", "MOVE abc 100\n"),
    ("BadButton", "CLICK middle\n"),
    ("Empty", "   \n"),
];

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_parse_accepted(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_accepted");
    for (name, line) in ACCEPTED {
        group.bench_with_input(BenchmarkId::new("line", name), line, |b, line| {
            b.iter(|| parse_line(black_box(line)))
        });
    }
    group.finish();
}

fn bench_parse_rejected(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rejected");
    for (name, line) in REJECTED {
        group.bench_with_input(BenchmarkId::new("line", name), line, |b, line| {
            b.iter(|| parse_line(black_box(line)))
        });
    }
    group.finish();
}

fn bench_parse_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bytes");
    group.bench_function("Move", |b| {
        b.iter(|| parse_bytes(black_box(b"MOVE 16384 8192\n")))
    });
    group.bench_function("InvalidUtf8", |b| {
        b.iter(|| parse_bytes(black_box(&[0x4D, 0xFF, 0xFE, 0x0A])))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_accepted,
    bench_parse_rejected,
    bench_parse_bytes
);
criterion_main!(benches);
