//! Feature-space distances and their 2D embedding.

use nalgebra::DMatrix;

use crate::error::{Error, Result};

mod stress;

pub use stress::{EmbedOptions, Embedding, StressEmbedder, ring_seed, stress};

/// Symmetric pairwise Euclidean distances between feature vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    d: DMatrix<f64>,
}

impl DistanceMatrix {
    /// Builds the matrix from equally sized vectors.
    ///
    /// Only the upper triangle is computed; the lower triangle is mirrored so `D[i][j]` and
    /// `D[j][i]` are bit-identical and the diagonal is exactly zero.
    pub fn from_vectors<V: AsRef<[f64]>>(vectors: &[V]) -> Result<Self> {
        let n = vectors.len();
        if let Some(first) = vectors.first() {
            let expected = first.as_ref().len();
            for (index, v) in vectors.iter().enumerate() {
                let found = v.as_ref().len();
                if found != expected {
                    return Err(Error::DimensionMismatch {
                        index,
                        expected,
                        found,
                    });
                }
            }
        }

        let mut d = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            for j in (i + 1)..n {
                let v = euclidean(vectors[i].as_ref(), vectors[j].as_ref());
                d[(i, j)] = v;
                d[(j, i)] = v;
            }
        }
        Ok(Self { d })
    }

    pub fn len(&self) -> usize {
        self.d.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.d.nrows() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.d[(i, j)]
    }

    pub fn max(&self) -> f64 {
        self.d.iter().copied().fold(0.0, f64::max)
    }

    /// Divides every entry by the largest one. An all-zero matrix is returned unchanged.
    pub fn normalized(&self) -> Self {
        let max = self.max();
        if max > 0.0 {
            Self { d: &self.d / max }
        } else {
            self.clone()
        }
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.d
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
