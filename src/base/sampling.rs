//! Weighted index sampling.
//!
//! All relational draws in the simulation (mate choice in particular) reduce
//! to the same primitive: pick one index from a vector of non-negative
//! relative weights, with probability proportional to each weight. The
//! weights are not required to be normalized.

use crate::errors::SamplingError;
use rand::Rng;

/// Draw one index from `weights`, with probability `weights[k] / sum`.
///
/// Weights must be non-negative and finite, and must sum to a positive
/// total; entries equal to zero are legal and are never selected. Each call
/// is an independent draw with replacement — no state is carried between
/// calls beyond the RNG stream itself.
///
/// The draw places `r` uniformly in `[0, total)` and scans the cumulative
/// sum with `r < cumulative`, so index 0 is selectable at `r = 0` and zero
/// weights can never capture the draw.
///
/// # Errors
/// Returns a [`SamplingError`] if the weight vector is empty, contains a
/// negative or non-finite entry, sums to a non-positive total, or if the
/// cumulative scan fails to resolve an index (a floating-point edge that is
/// treated as a hard failure rather than silently mapped to some index).
pub fn weighted_index<R: Rng + ?Sized>(
    weights: &[f64],
    rng: &mut R,
) -> Result<usize, SamplingError> {
    if weights.is_empty() {
        return Err(SamplingError::EmptyWeights);
    }

    let mut total = 0.0_f64;
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(SamplingError::InvalidWeight { index, value });
        }
        total += value;
    }
    if total <= 0.0 || !total.is_finite() {
        return Err(SamplingError::NonPositiveTotal(total));
    }

    let r = rng.random::<f64>() * total;
    let mut cumulative = 0.0_f64;
    for (index, &value) in weights.iter().enumerate() {
        cumulative += value;
        if r < cumulative {
            return Ok(index);
        }
    }

    // r landed at or beyond the accumulated total, which can only happen
    // through floating-point rounding of the partial sums.
    Err(SamplingError::UnresolvedIndex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_single_positive_weight_always_selected() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(weighted_index(&[0.0, 0.0, 5.0, 0.0], &mut rng), Ok(2));
        }
    }

    #[test]
    fn test_zero_total_is_error() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        assert_eq!(
            weighted_index(&[0.0, 0.0, 0.0], &mut rng),
            Err(SamplingError::NonPositiveTotal(0.0))
        );
    }

    #[test]
    fn test_empty_weights_is_error() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        assert_eq!(weighted_index(&[], &mut rng), Err(SamplingError::EmptyWeights));
    }

    #[test]
    fn test_negative_weight_is_error() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        assert_eq!(
            weighted_index(&[1.0, -0.5, 2.0], &mut rng),
            Err(SamplingError::InvalidWeight {
                index: 1,
                value: -0.5
            })
        );
    }

    #[test]
    fn test_non_finite_weight_is_error() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        assert!(weighted_index(&[1.0, f64::NAN], &mut rng).is_err());
        assert!(weighted_index(&[1.0, f64::INFINITY], &mut rng).is_err());
    }

    #[test]
    fn test_first_index_is_reachable() {
        // Regression guard for the classic cumulative-scan boundary bug
        // where a strict lower-bound comparison makes index 0 unselectable.
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut saw_first = false;
        for _ in 0..1000 {
            if weighted_index(&[1.0, 1.0], &mut rng).unwrap() == 0 {
                saw_first = true;
                break;
            }
        }
        assert!(saw_first);
    }

    #[test]
    fn test_draws_follow_weights() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(123);
        let weights = [1.0, 3.0];
        let mut counts = [0usize; 2];
        for _ in 0..10_000 {
            counts[weighted_index(&weights, &mut rng).unwrap()] += 1;
        }
        // Expected split 2500 / 7500; allow generous slack.
        assert!(counts[0] > 2000 && counts[0] < 3000, "counts: {counts:?}");
        assert!(counts[1] > 7000 && counts[1] < 8000, "counts: {counts:?}");
    }

    #[test]
    fn test_unnormalized_weights() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
        // Same relative weights at a different scale should behave the same.
        for _ in 0..100 {
            let idx = weighted_index(&[0.0, 2000.0, 0.0], &mut rng).unwrap();
            assert_eq!(idx, 1);
        }
    }
}
