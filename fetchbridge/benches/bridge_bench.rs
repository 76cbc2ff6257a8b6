//! Benchmarks for the bridge round-trip.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fetchbridge::bridge::CancellableBridge;
use fetchbridge::cancellation::CancellationToken;
use fetchbridge::operation::FetchRequest;
use fetchbridge::testing::MockLauncher;
use std::sync::Arc;

fn bridge_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    let bridge = CancellableBridge::new(Arc::new(MockLauncher::new()));
    let token = CancellationToken::new();

    c.bench_function("fetch_immediate_completion", |b| {
        b.iter(|| {
            let outcome = runtime.block_on(
                bridge.fetch(black_box(FetchRequest::new("https://example.com")), &token),
            );
            black_box(outcome)
        })
    });
}

criterion_group!(benches, bridge_benchmark);
criterion_main!(benches);
