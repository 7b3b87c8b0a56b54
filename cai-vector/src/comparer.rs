//! Weighted cosine similarity and Euclidean distance.

use cai_core::config::VectorConfig;
use cai_core::errors::VectorError;

/// Compares vectors after scaling each dimension by a fixed weight.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorComparer {
    weights: Vec<f64>,
}

impl VectorComparer {
    /// Create a comparer with per-dimension weights.
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Unit weights for `dimensions` dimensions.
    pub fn uniform(dimensions: usize) -> Self {
        Self::new(vec![1.0; dimensions])
    }

    pub fn from_config(config: &VectorConfig) -> Self {
        Self::new(config.weights.clone())
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weighted cosine similarity in [0, 1].
    /// Returns 0.0 when either weighted vector has zero magnitude.
    pub fn cosine_similarity(&self, a: &[f64], b: &[f64]) -> Result<f64, VectorError> {
        self.check(a)?;
        self.check(b)?;

        let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
        for ((x, y), w) in a.iter().zip(b).zip(&self.weights) {
            let (x, y) = (x * w, y * w);
            dot += x * y;
            mag_a += x * x;
            mag_b += y * y;
        }
        let denom = mag_a.sqrt() * mag_b.sqrt();
        if denom < f64::EPSILON {
            Ok(0.0)
        } else {
            Ok((dot / denom).clamp(0.0, 1.0))
        }
    }

    /// Weighted Euclidean distance, 0.0 only for identical weighted vectors.
    pub fn euclidean_distance(&self, a: &[f64], b: &[f64]) -> Result<f64, VectorError> {
        self.check(a)?;
        self.check(b)?;

        let sum: f64 = a
            .iter()
            .zip(b)
            .zip(&self.weights)
            .map(|((x, y), w)| {
                let d = (x - y) * w;
                d * d
            })
            .sum();
        Ok(sum.sqrt())
    }

    fn check(&self, v: &[f64]) -> Result<(), VectorError> {
        if v.len() == self.weights.len() {
            Ok(())
        } else {
            Err(VectorError::DimensionMismatch {
                expected: self.weights.len(),
                actual: v.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let c = VectorComparer::uniform(3);
        let v = vec![1.0, 2.0, 3.0];
        let sim = c.cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
        assert_eq!(c.euclidean_distance(&v, &v).unwrap(), 0.0);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        let c = VectorComparer::uniform(2);
        let sim = c.cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn opposite_vectors_clamp_to_zero() {
        let c = VectorComparer::uniform(2);
        assert_eq!(c.cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]).unwrap(), 0.0);
    }

    #[test]
    fn zero_vector_returns_zero() {
        let c = VectorComparer::uniform(3);
        assert_eq!(c.cosine_similarity(&[0.0; 3], &[1.0, 2.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn weights_scale_distance() {
        let c = VectorComparer::new(vec![2.0, 1.0]);
        let d = c.euclidean_distance(&[1.0, 0.0], &[0.0, 0.0]).unwrap();
        assert!((d - 2.0).abs() < 1e-12);
    }

    #[test]
    fn weights_change_cosine_similarity() {
        let a = [1.0, 1.0];
        let b = [1.0, 0.0];
        let flat = VectorComparer::uniform(2).cosine_similarity(&a, &b).unwrap();
        let skewed = VectorComparer::new(vec![3.0, 1.0]).cosine_similarity(&a, &b).unwrap();
        assert!(skewed > flat);
    }

    #[test]
    fn mismatched_lengths_are_reported() {
        let c = VectorComparer::uniform(3);
        assert_eq!(
            c.cosine_similarity(&[1.0], &[1.0, 2.0, 3.0]),
            Err(VectorError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        );
        assert!(c.euclidean_distance(&[1.0; 3], &[1.0; 4]).is_err());
    }
}
