//! Dispersal-weighted mate assignment.
//!
//! Every recruit slot gets a mother and a father drawn from the whole
//! living population. A candidate's weight combines its reproductive
//! intensity with the dispersal weight of its deme as a gamete source for
//! the relevant target deme: the recruit's own deme for the mother draw,
//! the mother's deme for the father draw. The selfing rate rescales the
//! mother's own weight as a father candidate, so self-fertilization is a
//! legal outcome whose likelihood the caller controls.

use crate::base::weighted_index;
use crate::errors::{DispersalError, SamplingError, ShapeError};
use crate::simulation::Population;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Square deme-by-deme gamete dispersal weights.
///
/// `get(target, source)` is the relative weight of deme `source` as a
/// gamete source for a recruit in deme `target`. Rows need not be
/// normalized and the matrix need not be symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersalMatrix {
    demes: usize,
    weights: Vec<f64>,
}

impl DispersalMatrix {
    /// Build a dispersal matrix from row vectors.
    ///
    /// # Errors
    /// Returns an error if any row's length differs from the number of rows
    /// or any weight is negative or not finite.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, DispersalError> {
        let demes = rows.len();
        let mut weights = Vec::with_capacity(demes * demes);
        for (target, row) in rows.iter().enumerate() {
            if row.len() != demes {
                return Err(DispersalError::NotSquare {
                    row: target,
                    len: row.len(),
                    demes,
                });
            }
            for (source, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(DispersalError::InvalidWeight {
                        target,
                        source,
                        value,
                    });
                }
                weights.push(value);
            }
        }
        Ok(Self { demes, weights })
    }

    /// A matrix with no between-deme dispersal at all.
    pub fn isolated(demes: usize) -> Self {
        let mut weights = vec![0.0; demes * demes];
        for d in 0..demes {
            weights[d * demes + d] = 1.0;
        }
        Self { demes, weights }
    }

    /// Number of demes the matrix covers.
    #[inline]
    pub fn num_demes(&self) -> usize {
        self.demes
    }

    /// Weight of `source` as a gamete source for a recruit in `target`.
    #[inline]
    pub fn get(&self, target: usize, source: usize) -> f64 {
        self.weights[target * self.demes + source]
    }
}

/// Mating parameters: the dispersal matrix plus the selfing rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatingConfig {
    dispersal: DispersalMatrix,
    selfing_rate: f64,
}

impl MatingConfig {
    /// Create a new mating configuration.
    ///
    /// # Errors
    /// Returns an error if the selfing rate is outside [0.0, 1.0].
    pub fn new(dispersal: DispersalMatrix, selfing_rate: f64) -> Result<Self, ShapeError> {
        if !selfing_rate.is_finite() || !(0.0..=1.0).contains(&selfing_rate) {
            return Err(ShapeError::InvalidRate {
                name: "selfing rate",
                value: selfing_rate,
            });
        }
        Ok(Self {
            dispersal,
            selfing_rate,
        })
    }

    /// The dispersal matrix.
    pub fn dispersal(&self) -> &DispersalMatrix {
        &self.dispersal
    }

    /// The selfing rate.
    #[inline]
    pub fn selfing_rate(&self) -> f64 {
        self.selfing_rate
    }
}

/// One mother and one father per recruit slot, as population row indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MateAssignment {
    mothers: Vec<usize>,
    fathers: Vec<usize>,
}

impl MateAssignment {
    /// Mother row index per recruit slot.
    pub fn mothers(&self) -> &[usize] {
        &self.mothers
    }

    /// Father row index per recruit slot.
    pub fn fathers(&self) -> &[usize] {
        &self.fathers
    }

    /// Number of recruit slots covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.mothers.len()
    }

    /// True if no slots were assigned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mothers.is_empty()
    }
}

/// Assign a mother and a father to every recruit slot.
///
/// Slots are processed in order, with each slot's mother drawn before its
/// father. The mother draw weights candidate `j` by
/// `intensity[j] × dispersal(slot_deme, deme[j])`; the father draw weights
/// it by `intensity[j] × dispersal(deme[mother], deme[j])`, with the
/// mother's own weight additionally multiplied by the selfing rate. The
/// intensity vector and dispersal matrix are read-only for the whole pass.
///
/// # Errors
/// Returns a [`SamplingError`] if any slot's weight vector cannot produce a
/// draw — in particular when no living candidate has positive weight for
/// that slot, or when the population is empty while recruits are required.
pub fn assign_parents<R: Rng + ?Sized>(
    slots: &[usize],
    population: &Population,
    intensity: &[f64],
    mating: &MatingConfig,
    rng: &mut R,
) -> Result<MateAssignment, SamplingError> {
    debug_assert_eq!(intensity.len(), population.size());

    let n = population.size();
    let dispersal = mating.dispersal();
    let selfing = mating.selfing_rate();

    let mut mothers = Vec::with_capacity(slots.len());
    let mut fathers = Vec::with_capacity(slots.len());
    let mut weights = vec![0.0f64; n];

    for &slot_deme in slots {
        for (j, w) in weights.iter_mut().enumerate() {
            *w = intensity[j] * dispersal.get(slot_deme, population.deme(j));
        }
        let mother = weighted_index(&weights, rng)?;

        let mother_deme = population.deme(mother);
        for (j, w) in weights.iter_mut().enumerate() {
            let selfing_factor = if j == mother { selfing } else { 1.0 };
            *w = intensity[j] * dispersal.get(mother_deme, population.deme(j)) * selfing_factor;
        }
        let father = weighted_index(&weights, rng)?;

        mothers.push(mother);
        fathers.push(father);
    }

    Ok(MateAssignment { mothers, fathers })
}
