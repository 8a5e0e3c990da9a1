use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use narwhal::embed::{DistanceMatrix, StressEmbedder};
use narwhal::geom::world;
use narwhal::{Entity, EntityConfig, FeatureVector, LayoutGraphBuilder, LayoutOptions, Simulation};
use narwhal_core::FEATURE_DIMS;
use std::hint::black_box;
use std::time::Duration;

const MECHANISMS: &[&str] = &["navigator", "platformer", "dodge_and_catch", "catcher"];

// Spread-out but deterministic feature vectors.
fn synthetic_vectors(n: usize) -> Vec<FeatureVector> {
    (0..n)
        .map(|i| {
            let mut v = [0.0; FEATURE_DIMS];
            for (d, slot) in v.iter_mut().enumerate() {
                *slot = ((i * 31 + d * 17) % 13) as f64 / 13.0;
            }
            FeatureVector::new(v)
        })
        .collect()
}

fn synthetic_gallery(n: usize) -> Vec<Entity> {
    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n {
        let config = EntityConfig {
            id: format!("prim_{i}"),
            name: format!("mechanism_{i}"),
            mechanism: Some(MECHANISMS[i % MECHANISMS.len()].to_string()),
            ..Default::default()
        };
        out.push(Entity::primitive(config));
    }
    for i in 0..n {
        let config = EntityConfig {
            id: format!("orig_{i}"),
            name: format!("variant_{i}"),
            ..Default::default()
        };
        out.push(Entity::variant(config, format!("prim_{i}")));
    }
    out
}

fn bench_embed(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress_embed");
    group.measurement_time(Duration::from_secs(5));
    for &n in &[8usize, 24, 64] {
        let d = DistanceMatrix::from_vectors(&synthetic_vectors(n)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &d, |b, d| {
            b.iter(|| black_box(StressEmbedder::default().embed(black_box(d))));
        });
    }
    group.finish();
}

fn bench_ticks(c: &mut Criterion) {
    let opts = LayoutOptions::default();
    let mut group = c.benchmark_group("simulation_100_ticks");
    for &n in &[8usize, 24, 64] {
        let graph = LayoutGraphBuilder::new(opts.clone())
            .build(&synthetic_gallery(n))
            .unwrap();
        let (cx, cy) = opts.canvas.center();
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter_batched(
                || Simulation::new(graph.clone(), opts.forces, world(cx, cy)),
                |mut sim| black_box(sim.run(100)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_embed, bench_ticks);
criterion_main!(benches);
