//! Age-class mortality.
//!
//! Each individual dies in a step with a probability looked up by its age
//! class. The schedule lists one death probability per age class; the last
//! entry applies to that age and every older age (clamped, not
//! extrapolated).

use crate::errors::MortalityError;
use crate::simulation::Population;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-age-class death probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalitySchedule {
    rates: Vec<f64>,
}

impl MortalitySchedule {
    /// Create a new mortality schedule.
    ///
    /// # Errors
    /// Returns an error if the schedule is empty or any probability falls
    /// outside [0.0, 1.0].
    pub fn new(rates: Vec<f64>) -> Result<Self, MortalityError> {
        if rates.is_empty() {
            return Err(MortalityError::EmptySchedule);
        }
        for (age_class, &value) in rates.iter().enumerate() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(MortalityError::InvalidProbability { age_class, value });
            }
        }
        Ok(Self { rates })
    }

    /// Number of distinct age classes in the schedule.
    #[inline]
    pub fn num_age_classes(&self) -> usize {
        self.rates.len()
    }

    /// Death probability for an age, clamping past the last age class.
    #[inline]
    pub fn rate_for_age(&self, age: u32) -> f64 {
        let index = (age as usize).min(self.rates.len() - 1);
        self.rates[index]
    }

    /// Draw one death flag per individual, in row order.
    ///
    /// Every individual is an independent Bernoulli trial with probability
    /// `rate_for_age(age)`.
    pub fn draw_deaths<R: Rng + ?Sized>(&self, population: &Population, rng: &mut R) -> Vec<bool> {
        population
            .ages()
            .iter()
            .map(|&age| rng.random::<f64>() < self.rate_for_age(age))
            .collect()
    }
}
