//! Benchmarks for the binding hot paths
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dashboard::bindings::{main_chart, BindingRegistry};
use dashboard::chart::ChartKind;
use dashboard::dataset::Dataset;
use dashboard::dispatch::{Dispatcher, UpdateRequest};
use dashboard::layout::PropId;
use dashboard::live::{LiveBuffer, Sample};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

fn bench_charts(c: &mut Criterion) {
    let mut group = c.benchmark_group("charts");
    let dataset = Dataset::embedded().unwrap();

    for kind in ChartKind::ALL {
        group.bench_function(format!("main_chart_{}", kind), |b| {
            b.iter(|| main_chart(black_box(&dataset), black_box("India"), kind))
        });
    }

    group.finish();
}

fn bench_live_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_buffer");
    let rt = tokio::runtime::Runtime::new().unwrap();

    let buffer = LiveBuffer::default();
    let sample = Sample::new(chrono::Utc::now(), 100);

    group.throughput(Throughput::Elements(1));
    group.bench_function("append", |b| {
        b.iter(|| rt.block_on(buffer.append(black_box(sample))))
    });
    group.bench_function("snapshot", |b| b.iter(|| rt.block_on(buffer.snapshot())));

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let rt = tokio::runtime::Runtime::new().unwrap();

    let dispatcher = Dispatcher::new(
        BindingRegistry::standard(),
        Arc::new(Dataset::embedded().unwrap()),
        LiveBuffer::default(),
        false,
    );
    let values = HashMap::from([
        (PropId::new("country-dropdown", "value"), json!("India")),
        (PropId::new("chart-type", "value"), json!("bar")),
    ]);

    let initial = UpdateRequest::initial(values.clone());
    group.bench_function("initial_render", |b| {
        b.iter(|| rt.block_on(dispatcher.dispatch(black_box(&initial))).unwrap())
    });

    let chart_type = UpdateRequest::changed(vec![PropId::new("chart-type", "value")], values);
    group.bench_function("chart_type_change", |b| {
        b.iter(|| rt.block_on(dispatcher.dispatch(black_box(&chart_type))).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_charts, bench_live_buffer, bench_dispatch);
criterion_main!(benches);
