//! Reproductive-intensity models.
//!
//! Reproductive intensity is the relative weight with which an individual is
//! chosen as a parent during mate assignment. The main model is stabilizing
//! selection on the quantitative phenotype: intensity is maximal when the
//! phenotype sits at the deme's optimum and decays as a Hill-type curve with
//! growing deviation. A phenotype-independent random-intensity model is
//! provided as an alternative strategy behind the same interface.

use crate::errors::SelectionError;
use crate::simulation::Population;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Strategy interface for assigning reproductive intensities.
///
/// Implementations produce one non-negative weight per individual, aligned
/// with the population's row order. Stochastic models draw from the supplied
/// RNG in row order so that seeded runs stay reproducible.
pub trait IntensityModel {
    /// Assign one reproductive intensity per individual.
    fn intensities<R: Rng + ?Sized>(
        &self,
        population: &Population,
        phenotypes: &[f64],
        rng: &mut R,
    ) -> Vec<f64>;
}

/// Hill-type stabilizing selection around per-deme phenotype optima.
///
/// For an individual with phenotype `z` in a deme with optimum `opt`:
///
/// ```text
/// intensity = k^p / (k^p + |z - opt|^p)
/// ```
///
/// where `p` (`steepness`) controls how sharply intensity falls off and `k`
/// (`half_width`) is the deviation at which intensity reaches one half.
/// Intensity is exactly 1 at zero deviation and approaches 0 for large
/// deviations; the validated parameters make the denominator strictly
/// positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilizingSelection {
    optima: Vec<f64>,
    steepness: f64,
    half_width: f64,
}

impl StabilizingSelection {
    /// Create a new stabilizing-selection model.
    ///
    /// # Arguments
    /// * `optima` - One phenotype optimum per deme (all finite)
    /// * `steepness` - Curve exponent (must be finite and > 0.0)
    /// * `half_width` - Deviation at half-maximal intensity (finite, > 0.0)
    ///
    /// # Errors
    /// Returns an error if parameters are outside valid ranges.
    pub fn new(optima: Vec<f64>, steepness: f64, half_width: f64) -> Result<Self, SelectionError> {
        if !steepness.is_finite() || steepness <= 0.0 {
            return Err(SelectionError::InvalidParameter(format!(
                "steepness must be finite and greater than 0.0, got {steepness}"
            )));
        }
        if !half_width.is_finite() || half_width <= 0.0 {
            return Err(SelectionError::InvalidParameter(format!(
                "half_width must be finite and greater than 0.0, got {half_width}"
            )));
        }
        if let Some(bad) = optima.iter().find(|o| !o.is_finite()) {
            return Err(SelectionError::InvalidParameter(format!(
                "phenotype optimum must be finite, got {bad}"
            )));
        }
        Ok(Self {
            optima,
            steepness,
            half_width,
        })
    }

    /// Number of demes the optimum vector covers.
    #[inline]
    pub fn num_demes(&self) -> usize {
        self.optima.len()
    }

    /// Per-deme phenotype optima.
    pub fn optima(&self) -> &[f64] {
        &self.optima
    }

    /// Intensity of a single phenotype against a single optimum.
    #[inline]
    pub fn intensity(&self, phenotype: f64, optimum: f64) -> f64 {
        let kp = self.half_width.powf(self.steepness);
        let deviation = (phenotype - optimum).abs().powf(self.steepness);
        kp / (kp + deviation)
    }
}

impl IntensityModel for StabilizingSelection {
    fn intensities<R: Rng + ?Sized>(
        &self,
        population: &Population,
        phenotypes: &[f64],
        _rng: &mut R,
    ) -> Vec<f64> {
        debug_assert_eq!(phenotypes.len(), population.size());
        phenotypes
            .iter()
            .enumerate()
            .map(|(i, &z)| self.intensity(z, self.optima[population.deme(i)]))
            .collect()
    }
}

/// Phenotype-independent random reproductive intensity.
///
/// Each individual draws `mean + sigma · N(0, 1)`, one draw per individual
/// in row order. With a mean well above `sigma` the draws stay positive;
/// a draw that comes out negative is an invalid mate-choice weight and will
/// surface as a sampling error during mate assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomIntensity {
    mean: f64,
    sigma: f64,
}

impl RandomIntensity {
    /// Create a new random-intensity model.
    ///
    /// # Errors
    /// Returns an error if `mean` is not finite or `sigma` is negative or
    /// not finite.
    pub fn new(mean: f64, sigma: f64) -> Result<Self, SelectionError> {
        if !mean.is_finite() {
            return Err(SelectionError::InvalidParameter(format!(
                "mean must be finite, got {mean}"
            )));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(SelectionError::InvalidParameter(format!(
                "sigma must be finite and non-negative, got {sigma}"
            )));
        }
        Ok(Self { mean, sigma })
    }

    /// Mean intensity.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the intensity draws.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl IntensityModel for RandomIntensity {
    fn intensities<R: Rng + ?Sized>(
        &self,
        population: &Population,
        _phenotypes: &[f64],
        rng: &mut R,
    ) -> Vec<f64> {
        (0..population.size())
            .map(|_| {
                let z: f64 = rng.sample(StandardNormal);
                self.mean + self.sigma * z
            })
            .collect()
    }
}

/// The selection strategy chosen for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SelectionConfig {
    /// Stabilizing selection on the quantitative phenotype.
    Stabilizing(StabilizingSelection),
    /// Random, phenotype-independent intensity.
    Random(RandomIntensity),
}

impl SelectionConfig {
    /// Number of demes the model constrains, if any.
    ///
    /// The random model carries no per-deme structure and returns `None`.
    pub fn num_demes(&self) -> Option<usize> {
        match self {
            Self::Stabilizing(s) => Some(s.num_demes()),
            Self::Random(_) => None,
        }
    }
}

impl IntensityModel for SelectionConfig {
    fn intensities<R: Rng + ?Sized>(
        &self,
        population: &Population,
        phenotypes: &[f64],
        rng: &mut R,
    ) -> Vec<f64> {
        match self {
            Self::Stabilizing(s) => s.intensities(population, phenotypes, rng),
            Self::Random(r) => r.intensities(population, phenotypes, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::GenotypeMatrix;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn two_deme_population() -> Population {
        Population::new(
            vec![0, 0, 1],
            vec![0, 1, 2],
            GenotypeMatrix::from_counts(1, &[vec![0], vec![1], vec![2]]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_stabilizing_selection_new() {
        let model = StabilizingSelection::new(vec![0.0, 1.0], 2.0, 0.5).unwrap();
        assert_eq!(model.num_demes(), 2);
    }

    #[test]
    fn test_stabilizing_selection_invalid_parameters() {
        assert!(StabilizingSelection::new(vec![0.0], 0.0, 0.5).is_err());
        assert!(StabilizingSelection::new(vec![0.0], -1.0, 0.5).is_err());
        assert!(StabilizingSelection::new(vec![0.0], 2.0, 0.0).is_err());
        assert!(StabilizingSelection::new(vec![0.0], 2.0, -0.5).is_err());
        assert!(StabilizingSelection::new(vec![f64::NAN], 2.0, 0.5).is_err());
    }

    #[test]
    fn test_intensity_is_one_at_optimum() {
        for (steepness, half_width) in [(1.0, 1.0), (2.0, 0.1), (8.0, 3.0)] {
            let model = StabilizingSelection::new(vec![2.5], steepness, half_width).unwrap();
            assert_eq!(model.intensity(2.5, 2.5), 1.0);
        }
    }

    #[test]
    fn test_intensity_is_half_at_half_width() {
        let model = StabilizingSelection::new(vec![0.0], 2.0, 0.75).unwrap();
        let ri = model.intensity(0.75, 0.0);
        assert!((ri - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_intensity_decreases_with_deviation() {
        let model = StabilizingSelection::new(vec![0.0], 2.0, 1.0).unwrap();
        let near = model.intensity(0.5, 0.0);
        let far = model.intensity(3.0, 0.0);
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_intensities_use_each_individuals_deme() {
        let pop = two_deme_population();
        let model = StabilizingSelection::new(vec![0.0, 10.0], 2.0, 1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        // All three phenotypes are 0: deme-0 individuals sit at their
        // optimum, the deme-1 individual is 10 units away.
        let ri = model.intensities(&pop, &[0.0, 0.0, 0.0], &mut rng);
        assert_eq!(ri[0], 1.0);
        assert_eq!(ri[1], 1.0);
        assert!(ri[2] < 0.05);
    }

    #[test]
    fn test_random_intensity_new() {
        assert!(RandomIntensity::new(1.0, 0.25).is_ok());
        assert!(RandomIntensity::new(1.0, 0.0).is_ok());
        assert!(RandomIntensity::new(f64::NAN, 0.25).is_err());
        assert!(RandomIntensity::new(1.0, -0.1).is_err());
    }

    #[test]
    fn test_random_intensity_zero_sigma_is_constant() {
        let pop = two_deme_population();
        let model = RandomIntensity::new(1.0, 0.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let ri = model.intensities(&pop, &[0.0, 0.0, 0.0], &mut rng);
        assert_eq!(ri, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_random_intensity_varies() {
        let pop = two_deme_population();
        let model = RandomIntensity::new(1.0, 0.25).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let ri = model.intensities(&pop, &[0.0, 0.0, 0.0], &mut rng);
        assert_eq!(ri.len(), 3);
        assert!(ri.iter().any(|&v| (v - 1.0).abs() > 1e-9));
    }

    #[test]
    fn test_selection_config_dispatch() {
        let pop = two_deme_population();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let stabilizing = SelectionConfig::Stabilizing(
            StabilizingSelection::new(vec![0.0, 0.0], 2.0, 1.0).unwrap(),
        );
        assert_eq!(stabilizing.num_demes(), Some(2));
        let ri = stabilizing.intensities(&pop, &[0.0, 0.0, 0.0], &mut rng);
        assert_eq!(ri, vec![1.0, 1.0, 1.0]);

        let random = SelectionConfig::Random(RandomIntensity::new(2.0, 0.0).unwrap());
        assert_eq!(random.num_demes(), None);
        let ri = random.intensities(&pop, &[0.0, 0.0, 0.0], &mut rng);
        assert_eq!(ri, vec![2.0, 2.0, 2.0]);
    }
}
