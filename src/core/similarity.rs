use aprender::primitives::Vector;
use aprender::text::similarity;

/// Cosine similarity between two vectors
///
/// Returns 0.0 when the lengths differ or either vector has zero norm, so an
/// empty profile never looks similar to anything.
///
/// # Returns
/// Similarity in [-1, 1]; [0, 1] for non-negative text features
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    // Length mismatch and empty input are errors upstream; both mean "unrelated" here
    similarity::cosine_similarity(&Vector::from_slice(a), &Vector::from_slice(b))
        .map_or(0.0, |sim| sim.clamp(-1.0, 1.0))
}

/// Scale a vector to unit L2 norm in place; zero vectors are left untouched
#[inline]
pub fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [0.2, 0.5, 0.1];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
    }

    #[test]
    fn test_zero_and_mismatched_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = [3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-12);
        assert!((v[1] - 0.8).abs() < 1e-12);

        let mut zero = [0.0, 0.0];
        l2_normalize(&mut zero);
        assert_eq!(zero, [0.0, 0.0]);
    }
}
