use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizrace_core::parser::parse_problems_str;

fn bench_parse_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");

    let simple = "5+5,10\n7+3,10\n1+1,2\n8+3,11\n1+2,3\n8+6,14\n3+1,4\n1+4,5\n5+1,6\n2+3,5\n3+3,6\n2+4,6\n";
    group.bench_function("12 rows", |b| {
        b.iter(|| parse_problems_str(black_box(simple), Path::new("problems.csv")))
    });

    let quoted: String = (0..1_000)
        .map(|i| format!("\"what is {i}, doubled\",{}\n", i * 2))
        .collect();
    group.bench_function("1k quoted rows", |b| {
        b.iter(|| parse_problems_str(black_box(&quoted), Path::new("problems.csv")))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_csv);
criterion_main!(benches);
