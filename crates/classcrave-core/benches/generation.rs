use criterion::{black_box, criterion_group, criterion_main, Criterion};

use classcrave_core::config::PracticeAssignmentConfig;
use classcrave_core::create_practice_questions;
use classcrave_core::seed::seeded_value;
use classcrave_core::template::TemplateId;

fn bench_seeded_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("seeded_value");

    group.bench_function("short_key", |b| {
        b.iter(|| seeded_value(black_box("abc|math-addition-facts|0|left"), black_box(100)))
    });

    let long_key = "student-0123456789:assignment-abcdef:1735689600000|".repeat(8);
    group.bench_function("long_key", |b| {
        b.iter(|| seeded_value(black_box(&long_key), black_box(1000)))
    });

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_practice_questions");

    for id in [
        TemplateId::MultiplicationFacts,
        TemplateId::FractionAddition,
        TemplateId::SlopeIntercept,
    ] {
        let config = PracticeAssignmentConfig {
            question_count: Some(60.0),
            ..PracticeAssignmentConfig::for_template(id.as_str())
        };
        group.bench_function(id.as_str(), |b| {
            b.iter(|| create_practice_questions(black_box(&config), black_box("bench-seed")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_seeded_value, bench_generate);
criterion_main!(benches);
