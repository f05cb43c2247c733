//! Benchmark: Layered Layout
//!
//! Measures the wave-layering pass over common pipeline shapes, plus the
//! parked-trailing-layer path cyclic input takes.
//! Run: cargo bench --bench layout

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strata::layout::{Layout, LayoutConfig};
use strata::model::{Edge, Node, NodeKind};

/// Generate a linear pipeline (n0 -> n1 -> n2 -> ...)
fn generate_linear(size: usize) -> (Vec<Node>, Vec<Edge>) {
    let nodes = (0..size)
        .map(|i| Node::new(format!("n{i}"), format!("Stage {i}"), NodeKind::Transform))
        .collect();
    let edges = (0..size.saturating_sub(1))
        .map(|i| Edge::new(format!("e{i}"), format!("n{i}"), format!("n{}", i + 1)))
        .collect();
    (nodes, edges)
}

/// Generate a diamond: one source fanning out to `width` middles, all
/// feeding one sink
fn generate_diamond(width: usize) -> (Vec<Node>, Vec<Edge>) {
    let mut nodes = vec![Node::new("source", "Source", NodeKind::Source)];
    for i in 0..width {
        nodes.push(Node::new(
            format!("mid_{i}"),
            format!("Middle {i}"),
            NodeKind::Transform,
        ));
    }
    nodes.push(Node::new("sink", "Sink", NodeKind::Sink));

    let mut edges = Vec::with_capacity(width * 2);
    for i in 0..width {
        edges.push(Edge::new(format!("ei{i}"), "source", format!("mid_{i}")));
        edges.push(Edge::new(format!("eo{i}"), format!("mid_{i}"), "sink"));
    }
    (nodes, edges)
}

/// Generate `size` edgeless nodes, which all land in layer 0
fn generate_parallel(size: usize) -> (Vec<Node>, Vec<Edge>) {
    let nodes = (0..size)
        .map(|i| Node::new(format!("n{i}"), format!("Stage {i}"), NodeKind::Transform))
        .collect();
    (nodes, Vec::new())
}

/// Generate a linear pipeline closed into a ring
fn generate_ring(size: usize) -> (Vec<Node>, Vec<Edge>) {
    let (nodes, mut edges) = generate_linear(size);
    edges.push(Edge::new("eback", format!("n{}", size - 1), "n0"));
    (nodes, edges)
}

fn bench_compute_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout");
    let config = LayoutConfig::default();

    // Linear: one wave per node, the deepest possible layering.
    for size in [10, 50, 100, 250].iter() {
        let input = generate_linear(*size);
        group.bench_with_input(BenchmarkId::new("linear", size), &input, |b, (nodes, edges)| {
            b.iter(|| black_box(Layout::compute(black_box(nodes), black_box(edges), &config)));
        });
    }

    for width in [10, 50, 100].iter() {
        let input = generate_diamond(*width);
        group.bench_with_input(
            BenchmarkId::new("diamond", width),
            &input,
            |b, (nodes, edges)| {
                b.iter(|| black_box(Layout::compute(black_box(nodes), black_box(edges), &config)));
            },
        );
    }

    // Parallel: a single huge wave, the widest possible layer.
    for size in [10, 50, 100, 250].iter() {
        let input = generate_parallel(*size);
        group.bench_with_input(
            BenchmarkId::new("parallel", size),
            &input,
            |b, (nodes, edges)| {
                b.iter(|| black_box(Layout::compute(black_box(nodes), black_box(edges), &config)));
            },
        );
    }

    group.finish();
}

fn bench_cyclic_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout_cyclic");
    let config = LayoutConfig::default();

    // A ring never seeds a wave, so every node takes the parked path.
    for size in [10, 50, 100, 250].iter() {
        let input = generate_ring(*size);
        group.bench_with_input(BenchmarkId::new("ring", size), &input, |b, (nodes, edges)| {
            b.iter(|| black_box(Layout::compute(black_box(nodes), black_box(edges), &config)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_layout, bench_cyclic_layout);
criterion_main!(benches);
