use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use freq_stat::{Distribution, GroupedInterval, UngroupedObservation, compute};

fn grouped_dataset(classes: usize) -> Distribution {
    let rows = (0..classes)
        .map(|i| {
            let lower = (i * 10) as f64;
            GroupedInterval::new(lower, lower + 10.0, ((i % 7) + 1) as f64)
        })
        .collect();
    Distribution::Grouped(rows)
}

fn ungrouped_dataset(values: usize) -> Distribution {
    let rows = (0..values)
        .map(|i| UngroupedObservation::new(i as f64, ((i % 5) + 1) as f64))
        .collect();
    Distribution::Ungrouped(rows)
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("freq_stats_compute");

    for classes in [8usize, 64, 512] {
        let dataset = grouped_dataset(classes);
        group.throughput(Throughput::Elements(classes as u64));
        group.bench_function(BenchmarkId::new("grouped", classes), |b| {
            b.iter(|| {
                let computation = compute(black_box(&dataset));
                black_box(computation);
            })
        });
    }

    for values in [8usize, 64, 512] {
        let dataset = ungrouped_dataset(values);
        group.throughput(Throughput::Elements(values as u64));
        group.bench_function(BenchmarkId::new("ungrouped", values), |b| {
            b.iter(|| {
                let computation = compute(black_box(&dataset));
                black_box(computation);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
