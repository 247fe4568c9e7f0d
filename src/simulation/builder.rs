//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and comprehensive validation.

use crate::base::Genotype;
pub use crate::errors::BuilderError;
use crate::evolution::{
    EpistaticEffect, PhenotypeModel, RandomIntensity, SelectionConfig, StabilizingSelection,
    StepwiseMutation,
};
use crate::simulation::{
    DispersalMatrix, MatingConfig, MortalitySchedule, Population, Simulation, SimulationConfig,
};

/// Builder for constructing [`Simulation`] instances with a fluent API.
///
/// # Examples
///
/// ```
/// use demevo::base::Genotype;
/// use demevo::simulation::SimulationBuilder;
///
/// // Two demes exchanging 10% of gametes, founders at capacity.
/// let sim = SimulationBuilder::new()
///     .steps(100)
///     .capacity(vec![50, 50])
///     .mortality(vec![0.0, 0.2, 0.5])
///     .dispersal(vec![vec![1.0, 0.1], vec![0.1, 1.0]])
///     .locus_effects(vec![1.0, 1.0, 1.0])
///     .dominance(vec![0.5, 0.5, 0.5])
///     .optima(vec![0.0, 3.0])
///     .selection_shape(2.0, 1.0)
///     .mutation_rate(0.001)
///     .founders_at_capacity(3, Genotype::Heterozygous)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(sim.population().size(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    // Required parameters
    steps: Option<usize>,
    capacity: Option<Vec<usize>>,
    mortality: Option<Vec<f64>>,
    dispersal: Option<Vec<Vec<f64>>>,
    locus_effects: Option<Vec<f64>>,
    dominance: Option<Vec<f64>>,

    // Initial population: explicit, or founders filled to capacity
    population: Option<Population>,
    founder_fill: Option<(usize, Genotype)>,

    // Selection: stabilizing (optima + shape) or random intensity
    optima: Option<Vec<f64>>,
    selection_shape: Option<(f64, f64)>,
    random_intensity: Option<(f64, f64)>,

    // Parameters with defaults
    epistasis: Vec<EpistaticEffect>, // Default: none
    selfing_rate: f64,               // Default: 0.0 (no selfing)
    mutation_rate: f64,              // Default: 0.0 (no mutation)
    seed: Option<u64>,               // Default: None (random)
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self {
            steps: None,
            capacity: None,
            mortality: None,
            dispersal: None,
            locus_effects: None,
            dominance: None,
            population: None,
            founder_fill: None,
            optima: None,
            selection_shape: None,
            random_intensity: None,
            epistasis: Vec::new(),
            selfing_rate: 0.0,
            mutation_rate: 0.0,
            seed: None,
        }
    }

    /// Set the number of steps to run (required).
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Set the per-deme carrying capacity (required).
    pub fn capacity(mut self, capacity: Vec<usize>) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the per-age-class mortality schedule (required).
    pub fn mortality(mut self, rates: Vec<f64>) -> Self {
        self.mortality = Some(rates);
        self
    }

    /// Set the dispersal matrix rows (required; square, non-negative).
    pub fn dispersal(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.dispersal = Some(rows);
        self
    }

    /// Set the per-locus additive effects (required).
    pub fn locus_effects(mut self, effects: Vec<f64>) -> Self {
        self.locus_effects = Some(effects);
        self
    }

    /// Set the per-locus dominance coefficients (required).
    pub fn dominance(mut self, dominance: Vec<f64>) -> Self {
        self.dominance = Some(dominance);
        self
    }

    /// Add epistatic interactions to the phenotype model.
    pub fn epistasis(mut self, effects: Vec<EpistaticEffect>) -> Self {
        self.epistasis = effects;
        self
    }

    /// Provide the initial population explicitly.
    pub fn population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    /// Initialize founders at carrying capacity: each deme filled to its
    /// capacity with age-0 individuals whose genotypes are all `fill`.
    pub fn founders_at_capacity(mut self, loci: usize, fill: Genotype) -> Self {
        self.founder_fill = Some((loci, fill));
        self
    }

    /// Set the per-deme phenotype optima for stabilizing selection.
    pub fn optima(mut self, optima: Vec<f64>) -> Self {
        self.optima = Some(optima);
        self
    }

    /// Set the stabilizing-selection shape: curve steepness and the
    /// deviation at half-maximal intensity.
    pub fn selection_shape(mut self, steepness: f64, half_width: f64) -> Self {
        self.selection_shape = Some((steepness, half_width));
        self
    }

    /// Use phenotype-independent random intensity instead of stabilizing
    /// selection.
    pub fn random_intensity(mut self, mean: f64, sigma: f64) -> Self {
        self.random_intensity = Some((mean, sigma));
        self
    }

    /// Set the selfing rate (default 0.0).
    pub fn selfing_rate(mut self, rate: f64) -> Self {
        self.selfing_rate = rate;
        self
    }

    /// Set the per-entry mutation rate (default 0.0).
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the RNG seed for a reproducible run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the simulation, validating the assembled configuration.
    ///
    /// # Errors
    /// Returns [`BuilderError::MissingRequired`] when a required parameter
    /// was never set, or [`BuilderError::InvalidParameter`] when a model
    /// constructor or the engine's shape validation rejects a value.
    pub fn build(self) -> Result<Simulation, BuilderError> {
        let steps = self.steps.ok_or(BuilderError::MissingRequired("steps"))?;
        let capacity = self
            .capacity
            .ok_or(BuilderError::MissingRequired("capacity"))?;
        let mortality_rates = self
            .mortality
            .ok_or(BuilderError::MissingRequired("mortality"))?;
        let dispersal_rows = self
            .dispersal
            .ok_or(BuilderError::MissingRequired("dispersal"))?;
        let locus_effects = self
            .locus_effects
            .ok_or(BuilderError::MissingRequired("locus_effects"))?;
        let dominance = self
            .dominance
            .ok_or(BuilderError::MissingRequired("dominance"))?;

        let mutation = StepwiseMutation::new(self.mutation_rate)
            .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?;

        let phenotype = PhenotypeModel::with_epistasis(locus_effects, dominance, self.epistasis)
            .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?;

        let selection = match (self.random_intensity, self.optima) {
            (Some((mean, sigma)), _) => SelectionConfig::Random(
                RandomIntensity::new(mean, sigma)
                    .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?,
            ),
            (None, Some(optima)) => {
                let (steepness, half_width) = self
                    .selection_shape
                    .ok_or(BuilderError::MissingRequired("selection_shape"))?;
                SelectionConfig::Stabilizing(
                    StabilizingSelection::new(optima, steepness, half_width)
                        .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?,
                )
            }
            (None, None) => return Err(BuilderError::MissingRequired("optima")),
        };

        let mortality = MortalitySchedule::new(mortality_rates)
            .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?;

        let dispersal = DispersalMatrix::from_rows(&dispersal_rows)
            .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?;
        let mating = MatingConfig::new(dispersal, self.selfing_rate)
            .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?;

        let population = match (self.population, self.founder_fill) {
            (Some(population), _) => population,
            (None, Some((loci, fill))) => Population::founders(&capacity, loci, fill),
            (None, None) => return Err(BuilderError::MissingRequired("population")),
        };

        let config = SimulationConfig::new(steps, self.seed);

        Simulation::new(
            population, mutation, phenotype, selection, mortality, mating, capacity, config,
        )
        .map_err(|e| BuilderError::InvalidParameter(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_builder() -> SimulationBuilder {
        SimulationBuilder::new()
            .steps(1)
            .capacity(vec![10])
            .mortality(vec![0.1])
            .dispersal(vec![vec![1.0]])
            .locus_effects(vec![1.0])
            .dominance(vec![0.5])
            .optima(vec![0.0])
            .selection_shape(2.0, 1.0)
            .founders_at_capacity(1, Genotype::HomAncestral)
    }

    #[test]
    fn test_builder_minimal() {
        let sim = minimal_builder().build().unwrap();
        assert_eq!(sim.population().size(), 10);
        assert_eq!(sim.config().steps, 1);
    }

    #[test]
    fn test_builder_missing_steps() {
        let result = SimulationBuilder::new()
            .capacity(vec![10])
            .mortality(vec![0.1])
            .dispersal(vec![vec![1.0]])
            .locus_effects(vec![1.0])
            .dominance(vec![0.5])
            .optima(vec![0.0])
            .selection_shape(2.0, 1.0)
            .founders_at_capacity(1, Genotype::HomAncestral)
            .build();
        assert!(matches!(result, Err(BuilderError::MissingRequired("steps"))));
    }

    #[test]
    fn test_builder_missing_selection() {
        let result = SimulationBuilder::new()
            .steps(1)
            .capacity(vec![10])
            .mortality(vec![0.1])
            .dispersal(vec![vec![1.0]])
            .locus_effects(vec![1.0])
            .dominance(vec![0.5])
            .founders_at_capacity(1, Genotype::HomAncestral)
            .build();
        assert!(matches!(result, Err(BuilderError::MissingRequired("optima"))));
    }

    #[test]
    fn test_builder_missing_shape_with_optima() {
        let result = SimulationBuilder::new()
            .steps(1)
            .capacity(vec![10])
            .mortality(vec![0.1])
            .dispersal(vec![vec![1.0]])
            .locus_effects(vec![1.0])
            .dominance(vec![0.5])
            .optima(vec![0.0])
            .founders_at_capacity(1, Genotype::HomAncestral)
            .build();
        assert!(matches!(
            result,
            Err(BuilderError::MissingRequired("selection_shape"))
        ));
    }

    #[test]
    fn test_builder_random_intensity() {
        let sim = SimulationBuilder::new()
            .steps(1)
            .capacity(vec![10])
            .mortality(vec![0.1])
            .dispersal(vec![vec![1.0]])
            .locus_effects(vec![1.0])
            .dominance(vec![0.5])
            .random_intensity(1.0, 0.0)
            .founders_at_capacity(1, Genotype::HomAncestral)
            .seed(42)
            .build()
            .unwrap();
        assert!(matches!(sim.selection(), SelectionConfig::Random(_)));
    }

    #[test]
    fn test_builder_invalid_mutation_rate() {
        let result = minimal_builder().mutation_rate(1.5).build();
        assert!(matches!(result, Err(BuilderError::InvalidParameter(_))));
    }

    #[test]
    fn test_builder_invalid_selfing_rate() {
        let result = minimal_builder().selfing_rate(2.0).build();
        assert!(matches!(result, Err(BuilderError::InvalidParameter(_))));
    }

    #[test]
    fn test_builder_rejects_mismatched_capacity() {
        // Two capacities against a 1x1 dispersal matrix.
        let result = minimal_builder().capacity(vec![10, 10]).build();
        assert!(matches!(result, Err(BuilderError::InvalidParameter(_))));
    }

    #[test]
    fn test_builder_explicit_population() {
        let population = Population::founders(&[4], 1, Genotype::HomDerived);
        let sim = minimal_builder()
            .capacity(vec![4])
            .population(population)
            .build()
            .unwrap();
        assert_eq!(sim.population().size(), 4);
    }

    #[test]
    fn test_builder_epistasis_validation() {
        let result = minimal_builder()
            .epistasis(vec![EpistaticEffect {
                modulated: 0,
                modulating: 5,
                magnitude: 1.0,
            }])
            .build();
        assert!(matches!(result, Err(BuilderError::InvalidParameter(_))));
    }
}
