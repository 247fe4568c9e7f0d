//! Simulation engine for the metapopulation lifecycle.
//!
//! The engine validates every cross-table shape constraint once at
//! construction, then advances the population through a fixed per-step
//! pipeline: mutation, phenotype, reproductive intensity, mortality,
//! recruitment sizing, mate assignment, inheritance, population update.
//! No stage is skipped or reordered, and each stochastic stage draws from
//! the single engine RNG in a fixed order, so a seeded run reproduces an
//! exact trajectory.

use crate::errors::{ShapeError, SimulationError};
use crate::evolution::{recruit_genotypes, IntensityModel, PhenotypeModel, SelectionConfig, StepwiseMutation};
use crate::simulation::{
    plan_recruitment, assign_parents, MatingConfig, MortalitySchedule, Population,
    SimulationConfig,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Terminal state of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// The final population (demographic and genotype tables).
    pub population: Population,
    /// One phenotype value per terminal individual, in row order.
    pub phenotypes: Vec<f64>,
}

/// Main simulation engine.
#[derive(Debug)]
pub struct Simulation {
    /// Current population
    population: Population,
    /// Mutation operator
    mutation: StepwiseMutation,
    /// Genotype-to-phenotype map
    phenotype: PhenotypeModel,
    /// Reproductive-intensity strategy
    selection: SelectionConfig,
    /// Age-class mortality schedule
    mortality: MortalitySchedule,
    /// Dispersal matrix and selfing rate
    mating: MatingConfig,
    /// Per-deme carrying capacity
    capacity: Vec<usize>,
    /// Run-level settings
    config: SimulationConfig,
    /// Steps taken so far
    step_count: usize,
    /// Random number generator (Xoshiro256++)
    rng: Xoshiro256PlusPlus,
}

impl Simulation {
    /// Create a new simulation, validating all shape constraints.
    ///
    /// # Errors
    /// Returns a [`ShapeError`] (wrapped in [`SimulationError`]) if the
    /// phenotype model's locus count disagrees with the genotype table, the
    /// per-deme vectors disagree on the deme count, or any individual's
    /// deme id is out of range. Nothing is validated lazily: a simulation
    /// that constructs will not fail on shapes mid-run.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        population: Population,
        mutation: StepwiseMutation,
        phenotype: PhenotypeModel,
        selection: SelectionConfig,
        mortality: MortalitySchedule,
        mating: MatingConfig,
        capacity: Vec<usize>,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        if phenotype.num_loci() != population.num_loci() {
            return Err(ShapeError::EffectLengthMismatch {
                loci: population.num_loci(),
                effects: phenotype.num_loci(),
            }
            .into());
        }

        let num_demes = mating.dispersal().num_demes();
        if capacity.len() != num_demes {
            return Err(ShapeError::DemeCountMismatch {
                expected: num_demes,
                found: capacity.len(),
                what: "carrying capacity",
            }
            .into());
        }
        if let Some(optima_demes) = selection.num_demes() {
            if optima_demes != num_demes {
                return Err(ShapeError::DemeCountMismatch {
                    expected: num_demes,
                    found: optima_demes,
                    what: "phenotype optima",
                }
                .into());
            }
        }
        for row in 0..population.size() {
            let deme = population.deme(row);
            if deme >= num_demes {
                return Err(ShapeError::DemeOutOfRange {
                    row,
                    deme,
                    demes: num_demes,
                }
                .into());
            }
        }

        let rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };

        Ok(Self {
            population,
            mutation,
            phenotype,
            selection,
            mortality,
            mating,
            capacity,
            config,
            step_count: 0,
            rng,
        })
    }

    /// Get the current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of steps taken so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Get reference to run-level settings.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Get reference to the mutation operator.
    pub fn mutation(&self) -> &StepwiseMutation {
        &self.mutation
    }

    /// Get reference to the phenotype model.
    pub fn phenotype(&self) -> &PhenotypeModel {
        &self.phenotype
    }

    /// Get reference to the selection strategy.
    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// Get reference to the mortality schedule.
    pub fn mortality(&self) -> &MortalitySchedule {
        &self.mortality
    }

    /// Get reference to the mating configuration.
    pub fn mating(&self) -> &MatingConfig {
        &self.mating
    }

    /// Per-deme carrying capacities.
    pub fn capacity(&self) -> &[usize] {
        &self.capacity
    }

    /// Advance the simulation by one step.
    ///
    /// # Errors
    /// Returns a [`SimulationError`] if a mate-assignment draw fails (for
    /// example, recruits are required but no candidate parent has positive
    /// weight). The population is left as it was before the failed step.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        // 1. Mutate genotypes in place.
        self.mutation
            .mutate_matrix(self.population.genotypes_mut(), &mut self.rng);

        // 2. Phenotypes (pure, parallel).
        let phenotypes = self.phenotype.phenotypes(self.population.genotypes());

        // 3. Reproductive intensity per individual.
        let intensity = self
            .selection
            .intensities(&self.population, &phenotypes, &mut self.rng);

        // 4. Mortality flags.
        let deaths = self.mortality.draw_deaths(&self.population, &mut self.rng);

        // 5. Recruits needed per deme.
        let plan = plan_recruitment(&self.population, &deaths, &self.capacity);

        // 6. Mothers and fathers per recruit slot.
        let parents = assign_parents(
            plan.slots(),
            &self.population,
            &intensity,
            &self.mating,
            &mut self.rng,
        )?;

        // 7. Recruit genotypes by Mendelian transmission.
        let recruits = recruit_genotypes(
            self.population.genotypes(),
            parents.mothers(),
            parents.fathers(),
            &mut self.rng,
        );

        // 8. Merge recruits with aged survivors.
        self.population = self.population.advance(&deaths, plan.slots(), recruits);
        self.step_count += 1;

        Ok(())
    }

    /// Run the simulation for the configured number of steps.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        for _ in 0..self.config.steps {
            self.step()?;
        }
        Ok(())
    }

    /// Run the simulation for a specific number of steps.
    pub fn run_for(&mut self, steps: usize) -> Result<(), SimulationError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Finish the run: one terminal phenotype pass over the final genotype
    /// table, returning the terminal tables and phenotypes together.
    pub fn finalize(self) -> SimulationOutcome {
        let phenotypes = self.phenotype.phenotypes(self.population.genotypes());
        SimulationOutcome {
            population: self.population,
            phenotypes,
        }
    }
}
