//! Weighted cosine similarity between a user vector and a tool vector.
//!
//! Both operands are scaled by the same weight vector before the cosine is
//! taken, so a zero weight removes a slot from consideration entirely.

use crate::schema::FeatureVector;
use crate::weights::WeightVector;
use tracing::warn;

/// Element-wise product of a binary vector and the weights
#[inline]
fn weighted(vector: &FeatureVector, weights: &WeightVector) -> Vec<f64> {
    vector
        .as_slice()
        .iter()
        .zip(weights.as_slice())
        .map(|(v, w)| f64::from(*v) * w)
        .collect()
}

#[inline]
fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity in [0, 1] for non-negative inputs.
/// Returns 0.0 when either vector has zero magnitude.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product(a, b) / (norm_a * norm_b)
}

/// Round a percentage to one decimal place
#[inline]
pub fn round_score(percent: f64) -> f64 {
    (percent * 10.0).round() / 10.0
}

/// Weighted match score in [0, 100], rounded to one decimal.
///
/// Never fails: a degenerate (zero-magnitude) weighted vector scores 0.0 and
/// any non-finite intermediate is mapped to 0.0 so NaN cannot reach ranking.
/// Vectors of different lengths are never truncated to a common prefix; they
/// score 0.0. [`rank`](crate::rank::rank) rejects them before scoring.
pub fn score(user: &FeatureVector, tool: &FeatureVector, weights: &WeightVector) -> f64 {
    if user.len() != weights.len() || tool.len() != weights.len() {
        warn!(
            "Length mismatch: user {}, tool {}, weights {}; scoring 0",
            user.len(),
            tool.len(),
            weights.len()
        );
        return 0.0;
    }

    let weighted_user = weighted(user, weights);
    let weighted_tool = weighted(tool, weights);

    let cosine = cosine_similarity(&weighted_user, &weighted_tool);
    if !cosine.is_finite() {
        return 0.0;
    }

    round_score(cosine * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(bits: &[u8]) -> FeatureVector {
        FeatureVector::new(bits.to_vec(), "test").unwrap()
    }

    fn wv(weights: &[f64]) -> WeightVector {
        WeightVector::new(weights.to_vec())
    }

    #[test]
    fn test_identical_vectors_score_100() {
        let u = fv(&[1, 0, 1, 1]);
        assert_eq!(score(&u, &u, &WeightVector::uniform(4, 3.0)), 100.0);
    }

    #[test]
    fn test_disjoint_vectors_score_0() {
        assert_eq!(
            score(&fv(&[1, 0, 1]), &fv(&[0, 1, 0]), &wv(&[1.0, 1.0, 1.0])),
            0.0
        );
    }

    #[test]
    fn test_empty_user_is_zero_not_nan() {
        let user = fv(&[0, 0, 0]);
        for tool in [fv(&[1, 0, 1]), fv(&[0, 1, 0]), fv(&[0, 0, 0])] {
            let s = score(&user, &tool, &wv(&[1.0, 1.0, 1.0]));
            assert_eq!(s, 0.0);
            assert!(!s.is_nan());
        }
    }

    #[test]
    fn test_zero_weight_suppresses_agreement() {
        // user and tool agree on Mobile, but the Mobile weight is 0
        let v = fv(&[0, 1, 0]);
        assert_eq!(score(&v, &v, &wv(&[1.0, 0.0, 1.0])), 0.0);
    }

    #[test]
    fn test_all_zero_weights() {
        let u = fv(&[1, 1, 1]);
        assert_eq!(score(&u, &u, &wv(&[0.0, 0.0, 0.0])), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = fv(&[1, 0, 1, 1, 0, 1]);
        let b = fv(&[1, 1, 0, 1, 0, 0]);
        let w = wv(&[8.0, 8.0, 5.0, 3.0, 5.0, 1.0]);
        assert_eq!(score(&a, &b, &w), score(&b, &a, &w));
    }

    #[test]
    fn test_uniform_scaling_is_invariant() {
        let a = fv(&[1, 0, 1, 1, 0]);
        let b = fv(&[1, 1, 1, 0, 0]);
        let w = wv(&[8.0, 5.0, 3.0, 5.0, 2.0]);
        let base = score(&a, &b, &w);
        for k in [0.5, 2.0, 10.0, 1000.0] {
            assert_eq!(score(&a, &b, &w.scaled(k)), base, "k = {k}");
        }
    }

    #[test]
    fn test_per_slot_reweighting_changes_score() {
        let a = fv(&[1, 1, 0]);
        let b = fv(&[1, 0, 1]);
        let flat = score(&a, &b, &wv(&[1.0, 1.0, 1.0]));
        let skewed = score(&a, &b, &wv(&[5.0, 1.0, 1.0]));
        assert_eq!(flat, 50.0);
        assert!(skewed > flat);
    }

    #[test]
    fn test_score_stays_in_range() {
        let vectors: Vec<FeatureVector> = (0u8..16)
            .map(|n| fv(&[n & 1, (n >> 1) & 1, (n >> 2) & 1, (n >> 3) & 1]))
            .collect();
        let w = wv(&[8.0, 5.0, 3.0, 0.0]);
        for u in &vectors {
            for t in &vectors {
                let s = score(u, t, &w);
                assert!((0.0..=100.0).contains(&s), "{s}");
            }
        }
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        assert_eq!(round_score(88.82733452406296), 88.8);
        assert_eq!(round_score(99.99999999999997), 100.0);
        assert_eq!(round_score(37.876102704979346), 37.9);
    }

    #[test]
    fn test_length_mismatch_scores_zero() {
        // a shared [1, 0] prefix would score 100 if truncated
        let user = fv(&[1, 0, 1]);
        let short = fv(&[1, 0]);
        assert_eq!(score(&user, &short, &wv(&[1.0, 1.0, 1.0])), 0.0);
        assert_eq!(score(&short, &user, &wv(&[1.0, 1.0])), 0.0);
        assert_eq!(score(&user, &user, &wv(&[1.0, 1.0])), 0.0);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
    }
}
