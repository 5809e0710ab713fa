// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for notification queue operations.
//!
//! Measures the performance of:
//! - Enqueue + remove on the timer-backed queue
//! - Snapshotting a populated collection
//! - Tick-driven expiry on the synchronous manager

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;
use tokio::time::Instant;
use toastline::notifications::{Manager, NewNotification, ToastQueue};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .expect("failed to build runtime")
}

fn bench_enqueue_remove(c: &mut Criterion) {
    let runtime = runtime();
    let queue = ToastQueue::new(runtime.handle().clone());
    let mut group = c.benchmark_group("toast_queue");

    group.bench_function("enqueue_remove", |b| {
        b.iter(|| {
            let id = queue.enqueue(NewNotification::info(black_box("bench")));
            queue.remove(id);
        });
    });

    for i in 0..50 {
        queue.enqueue(NewNotification::info(format!("n{i}")).with_duration(Duration::from_secs(600)));
    }
    group.bench_function("list_50", |b| {
        b.iter(|| black_box(queue.list()));
    });

    group.finish();
    queue.shutdown();
}

fn bench_manager_expiry(c: &mut Criterion) {
    let mut group = c.benchmark_group("manager");

    group.bench_function("expire_due_100", |b| {
        b.iter(|| {
            let mut manager = Manager::new();
            let start = Instant::now();
            for i in 0..100u64 {
                manager.push_at(
                    NewNotification::info("n").with_duration(Duration::from_millis(i * 10 + 1)),
                    start,
                );
            }
            black_box(manager.expire_due(start + Duration::from_millis(500)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_enqueue_remove, bench_manager_expiry);
criterion_main!(benches);
