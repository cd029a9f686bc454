// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use gotest_events::{Parser, classify};

/// Build a transcript with `n` top-level tests, each with two subtests
fn sample_transcript(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str(&format!("=== RUN   TestCase{i}\n"));
        out.push_str(&format!("=== RUN   TestCase{i}/first\n"));
        out.push_str(&format!("=== RUN   TestCase{i}/second\n"));
        out.push_str(&format!("--- FAIL: TestCase{i} (0.01s)\n"));
        out.push_str(&format!("    --- PASS: TestCase{i}/first (0.00s)\n"));
        out.push_str(&format!("    --- FAIL: TestCase{i}/second (0.00s)\n"));
        out.push_str("        case_test.go:42: expected 1, got 2\n");
    }
    out.push_str("FAIL\nexit status 1\nFAIL\tbench/pkg\t1.234s\n");
    out
}

fn events_benchmark(c: &mut Criterion) {
    let transcript = sample_transcript(1_000);

    let mut group = c.benchmark_group("events");
    group.throughput(Throughput::Bytes(transcript.len() as u64));

    group.bench_function("classify_lines", |b| {
        b.iter(|| {
            for line in transcript.lines() {
                std::hint::black_box(classify(line));
            }
        })
    });

    group.bench_function("parse_transcript", |b| {
        b.iter(|| Parser::parse_str(std::hint::black_box(&transcript)))
    });

    group.finish();
}

criterion_group!(benches, events_benchmark);
criterion_main!(benches);
