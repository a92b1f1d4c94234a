use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use freeband::{interval_transducer, minimal_transducer, multiply};

fn sample_word(len: usize, alphabet: usize) -> Vec<usize> {
    (0..len).map(|i| i % alphabet).collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let small = sample_word(20, 5);
    let large = sample_word(200, 20);

    c.bench_function("interval_transducer (small)", |b| {
        b.iter(|| interval_transducer(black_box(&small)))
    });
    c.bench_function("interval_transducer (large)", |b| {
        b.iter(|| interval_transducer(black_box(&large)))
    });

    c.bench_function("minimal_transducer (small)", |b| {
        b.iter(|| minimal_transducer(black_box(&small)))
    });
    c.bench_function("minimal_transducer (large)", |b| {
        b.iter(|| minimal_transducer(black_box(&large)))
    });

    let x = minimal_transducer(&sample_word(20, 5)).unwrap();
    let y_word: Vec<usize> = sample_word(20, 5).into_iter().map(|l| l + 5).collect();
    let y = minimal_transducer(&y_word).unwrap();
    c.bench_function("multiply (small x small)", |b| {
        b.iter(|| multiply(black_box(&x), black_box(&y)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
