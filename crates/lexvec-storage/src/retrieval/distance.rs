//! Vector distances. Lower is closer.

use lexvec_core::SimilarityFunction;

pub fn distance(similarity: SimilarityFunction, a: &[f32], b: &[f32]) -> f64 {
    match similarity {
        SimilarityFunction::DotProduct => -dot(a, b),
        SimilarityFunction::Cosine => 1.0 - cosine_similarity(a, b),
    }
}

pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

/// Zero-norm vectors have similarity 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let norm_a = dot(a, a).sqrt();
    let norm_b = dot(b, b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot(a, b) / (norm_a * norm_b)
}
