use serde::Deserialize;

use super::DistanceMatrix;
use crate::geom::{Point, Vector, point};

const DIST_EPS: f64 = 1e-9;
const RING_RADIUS: f64 = 0.5;
// Below this the centered cloud is treated as a single point and left unscaled.
const DEGENERATE_SPREAD: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedOptions {
    /// Full passes over all pairs. There is no early exit: the same matrix and iteration count
    /// always produce the same output.
    pub iterations: usize,
    pub initial_rate: f64,
    pub floor_rate: f64,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            iterations: 700,
            initial_rate: 0.055,
            floor_rate: 0.004,
        }
    }
}

impl EmbedOptions {
    /// Annealed step size for iteration `iter`: large early moves, fine tuning at the end.
    pub fn learning_rate(&self, iter: usize) -> f64 {
        let progress = if self.iterations == 0 {
            1.0
        } else {
            iter as f64 / self.iterations as f64
        };
        self.initial_rate * (1.0 - progress) + self.floor_rate
    }
}

/// One 2D point per input entity, centered at the origin with `max(|x|, |y|) == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub points: Vec<Point>,
}

impl Embedding {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn centroid(&self) -> Point {
        centroid(&self.points)
    }
}

/// Gradient-descent stress minimization (metric MDS).
#[derive(Debug, Clone, Default)]
pub struct StressEmbedder {
    pub options: EmbedOptions,
}

impl StressEmbedder {
    pub fn new(options: EmbedOptions) -> Self {
        Self { options }
    }

    pub fn with_iterations(iterations: usize) -> Self {
        Self::new(EmbedOptions {
            iterations,
            ..Default::default()
        })
    }

    pub fn embed(&self, d: &DistanceMatrix) -> Embedding {
        let start = std::time::Instant::now();
        let raw = self.embed_raw(d);
        let points = normalize(raw);
        tracing::debug!(
            n = d.len(),
            iterations = self.options.iterations,
            elapsed = ?start.elapsed(),
            "stress embedding finished"
        );
        Embedding { points }
    }

    /// Runs the optimizer and returns positions before centering/scaling, in the units of the
    /// normalized distance matrix.
    pub fn embed_raw(&self, d: &DistanceMatrix) -> Vec<Point> {
        let n = d.len();
        if n <= 1 {
            return vec![point(0.0, 0.0); n];
        }

        let target = d.normalized();
        let mut pos = ring_seed(n);
        let mut grad: Vec<Vector> = vec![Vector::zero(); n];

        for iter in 0..self.options.iterations {
            let lr = self.options.learning_rate(iter);
            grad.fill(Vector::zero());

            for i in 0..n {
                for j in (i + 1)..n {
                    let delta = pos[i] - pos[j];
                    let cur = delta.length() + DIST_EPS;
                    let s = (cur - target.get(i, j)) / cur;
                    // d/dp_i (cur - t)^2 is proportional to s * (p_i - p_j); p_j gets the opposite.
                    grad[i] += delta * s;
                    grad[j] -= delta * s;
                }
            }

            for (p, g) in pos.iter_mut().zip(&grad) {
                *p -= *g * lr;
            }
        }

        pos
    }
}

/// Deterministic start: point `i` at angle `2πi/n` on a circle of radius 0.5.
pub fn ring_seed(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = (i as f64 / n as f64) * std::f64::consts::TAU;
            point(a.cos() * RING_RADIUS, a.sin() * RING_RADIUS)
        })
        .collect()
}

/// `Σ_{i<j} (‖p_i − p_j‖ − D[i][j])²` against an already normalized matrix.
pub fn stress(points: &[Point], target: &DistanceMatrix) -> f64 {
    let n = points.len().min(target.len());
    let mut total = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let e = (points[i] - points[j]).length() - target.get(i, j);
            total += e * e;
        }
    }
    total
}

fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return point(0.0, 0.0);
    }
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector::zero(), |acc, p| acc + p.to_vector());
    (sum / n).to_point()
}

fn normalize(points: Vec<Point>) -> Vec<Point> {
    if points.len() <= 1 {
        return points;
    }
    let c = centroid(&points).to_vector();
    let shifted: Vec<Point> = points.into_iter().map(|p| p - c).collect();
    let max_abs = shifted
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max);
    if max_abs < DEGENERATE_SPREAD {
        return shifted;
    }
    shifted.into_iter().map(|p| (p.to_vector() / max_abs).to_point()).collect()
}
