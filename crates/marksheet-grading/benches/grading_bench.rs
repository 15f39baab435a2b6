// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the grading engine: raw text parsing followed by
// validation and band lookup, the path the result card takes on "calculate".

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use marksheet_core::Subject;
use marksheet_grading::{GradingRules, MarkSet, compute_result};

fn bench_compute_result(c: &mut Criterion) {
    let raw = [
        (Subject::English, "18"),
        (Subject::Maths, "19"),
        (Subject::Hindi, "15"),
        (Subject::SocialStudies, "14"),
        (Subject::Science, "17"),
        (Subject::Gk, "16"),
        (Subject::Computer, "15"),
    ];
    let rules = GradingRules::default();

    c.bench_function("compute_result (7 subjects, from raw text)", |b| {
        b.iter(|| {
            let marks = MarkSet::from_raw(black_box(raw));
            let result = compute_result(&marks, &rules);
            black_box(result.ok());
        });
    });
}

criterion_group!(benches, bench_compute_result);
criterion_main!(benches);
