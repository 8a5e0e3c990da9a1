mod common;

use narwhal::embed::{DistanceMatrix, StressEmbedder, ring_seed, stress};
use narwhal::{Embedding, FeatureExtractor};

fn gallery_distances() -> DistanceMatrix {
    let prims = common::primitives_only();
    let features = FeatureExtractor.extract_all(prims.iter().map(|e| &e.config));
    DistanceMatrix::from_vectors(&features).unwrap()
}

fn max_abs(e: &Embedding) -> f64 {
    e.points
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max)
}

#[test]
fn distance_matrix_is_symmetric_with_zero_diagonal() {
    let d = gallery_distances();
    assert_eq!(d.len(), 6);
    for i in 0..d.len() {
        assert_eq!(d.get(i, i), 0.0);
        for j in 0..d.len() {
            assert_eq!(d.get(i, j), d.get(j, i));
            assert!(d.get(i, j) >= 0.0);
        }
    }
}

#[test]
fn embedding_is_deterministic() {
    let d = gallery_distances();
    let a = StressEmbedder::default().embed(&d);
    let b = StressEmbedder::default().embed(&d);
    assert_eq!(a, b);
}

#[test]
fn embedding_is_centered_and_unit_scaled() {
    let e = StressEmbedder::default().embed(&gallery_distances());
    assert_eq!(e.len(), 6);
    let c = e.centroid();
    assert!(c.x.abs() < 1e-9 && c.y.abs() < 1e-9, "centroid {c:?}");
    assert!((max_abs(&e) - 1.0).abs() < 1e-12);
}

#[test]
fn optimizer_reduces_stress_from_the_ring_seed() {
    let d = gallery_distances();
    let target = d.normalized();
    let seed = ring_seed(d.len());
    let fitted = StressEmbedder::default().embed_raw(&d);
    let before = stress(&seed, &target);
    let after = stress(&fitted, &target);
    assert!(after < before, "stress went from {before} to {after}");
}

#[test]
fn identical_vectors_collapse_to_one_point() {
    let vectors = vec![[1.0, 2.0, 3.0]; 3];
    let d = DistanceMatrix::from_vectors(&vectors).unwrap();
    assert_eq!(d.max(), 0.0);
    let e = StressEmbedder::default().embed(&d);
    for p in &e.points {
        for q in &e.points {
            assert!((*p - *q).length() < 1e-6);
        }
    }
}

#[test]
fn two_points_end_at_unit_separation() {
    let d = DistanceMatrix::from_vectors(&[[0.0, 0.0], [3.0, 4.0]]).unwrap();
    let raw = StressEmbedder::default().embed_raw(&d);
    let sep = (raw[0] - raw[1]).length();
    assert!((sep - 1.0).abs() < 0.05, "separation {sep}");

    let e = StressEmbedder::default().embed(&d);
    assert!((max_abs(&e) - 1.0).abs() < 1e-12);
}

#[test]
fn trivial_inputs_need_no_optimization() {
    let empty: Vec<[f64; 2]> = Vec::new();
    let e = StressEmbedder::default().embed(&DistanceMatrix::from_vectors(&empty).unwrap());
    assert!(e.is_empty());

    let single = StressEmbedder::default().embed(&DistanceMatrix::from_vectors(&[[5.0]]).unwrap());
    assert_eq!(single.len(), 1);
    assert_eq!(single.points[0], narwhal::geom::point(0.0, 0.0));
}
