//! Run-level simulation settings.

use serde::{Deserialize, Serialize};

/// High-level simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of time steps to simulate (0 is legal: the run returns the
    /// initial state's phenotypes unchanged).
    pub steps: usize,
    /// Optional RNG seed for reproducibility
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Create new simulation configuration.
    pub fn new(steps: usize, seed: Option<u64>) -> Self {
        Self { steps, seed }
    }
}
