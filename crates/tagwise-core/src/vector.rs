//! Vector math over fixed-length embeddings
//!
//! Vectors are `f32` slices; scalar results are accumulated in `f64`.

use crate::error::{Result, TagwiseError};

fn check_dimensions(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        return Err(TagwiseError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Sum of pairwise products. Lengths are not checked; extra components are ignored.
pub fn dot_product(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| *x as f64 * *y as f64)
        .sum()
}

/// Euclidean norm
pub fn magnitude(v: &[f32]) -> f64 {
    v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt()
}

/// Cosine distance `1 - cos(a, b)`.
///
/// Returns 1.0 (maximum distance for non-negative vectors) when either vector
/// has zero magnitude.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f64> {
    check_dimensions(a, b)?;

    let denom = magnitude(a) * magnitude(b);
    if denom == 0.0 {
        return Ok(1.0);
    }

    let similarity = (dot_product(a, b) / denom).clamp(-1.0, 1.0);
    Ok(1.0 - similarity)
}

pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f64> {
    check_dimensions(a, b)?;

    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt())
}

/// Scale to unit length. Zero vectors are returned unchanged.
pub fn normalize_vector(v: &[f32]) -> Vec<f32> {
    let mag = magnitude(v);
    if mag == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| (*x as f64 / mag) as f32).collect()
}

/// Elementwise mean. Empty input yields an empty vector.
pub fn average_vectors(vectors: &[Vec<f32>]) -> Result<Vec<f32>> {
    let Some(first) = vectors.first() else {
        return Ok(Vec::new());
    };

    let mut sums = vec![0.0f64; first.len()];
    for v in vectors {
        check_dimensions(first, v)?;
        for (sum, x) in sums.iter_mut().zip(v.iter()) {
            *sum += *x as f64;
        }
    }

    let count = vectors.len() as f64;
    Ok(sums.into_iter().map(|s| (s / count) as f32).collect())
}

/// Elementwise weighted mean.
///
/// Fails when the number of weights differs from the number of vectors, when
/// the vectors are ragged, or when the weights sum to zero.
pub fn weighted_average_vectors(vectors: &[Vec<f32>], weights: &[f64]) -> Result<Vec<f32>> {
    if vectors.len() != weights.len() {
        return Err(TagwiseError::DimensionMismatch {
            expected: vectors.len(),
            actual: weights.len(),
        });
    }

    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return Err(TagwiseError::ZeroWeight);
    }

    let Some(first) = vectors.first() else {
        return Ok(Vec::new());
    };

    let mut sums = vec![0.0f64; first.len()];
    for (v, w) in vectors.iter().zip(weights.iter()) {
        check_dimensions(first, v)?;
        for (sum, x) in sums.iter_mut().zip(v.iter()) {
            *sum += *x as f64 * w;
        }
    }

    Ok(sums
        .into_iter()
        .map(|s| (s / total_weight) as f32)
        .collect())
}
