//! Benchmarks to measure the compute overhead of `lifetime_tracker` logic itself.
//!
//! These benchmarks register and release instances that don't do any actual
//! work, so the measured time is the bookkeeping overhead per lifetime event.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifetime_tracker_overhead");

    // Baseline measurement - no tracking at all
    group.bench_function("baseline_empty", |b| {
        b.iter(|| {
            black_box(());
        });
    });

    {
        let tracker = LifetimeTracker::builder().on_update(|_| {}).build();

        group.bench_function("track_and_drop", |b| {
            b.iter(|| {
                let guard =
                    tracker.track_with(LifetimeConfiguration::new(usize::MAX), "bench::Plain");
                black_box(&guard);
            });
        });

        let grouped = LifetimeConfiguration::new(usize::MAX).with_group("bench");
        group.bench_function("track_and_drop_grouped", |b| {
            b.iter(|| {
                let guard = tracker.track_with(grouped.clone(), "bench::Grouped");
                black_box(&guard);
            });
        });
    }

    {
        let tracker = LifetimeTracker::builder().on_update(|_| {}).build();

        let mut guards = Vec::new();
        for _ in 0..100 {
            guards.push(
                tracker.track_with(LifetimeConfiguration::new(usize::MAX), "bench::Resident"),
            );
        }

        group.bench_function("groups_snapshot_100_instances", |b| {
            b.iter(|| {
                black_box(tracker.groups_snapshot());
            });
        });

        drop(guards);
    }

    group.finish();
}
