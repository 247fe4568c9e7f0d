use std::error;
use std::fmt;

/// Errors raised by the weighted index sampler.
///
/// A sampling failure is fatal for the run that triggered it: the draw has no
/// meaningful fallback, so the condition is surfaced instead of substituting
/// an arbitrary index.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// The weight vector was empty.
    EmptyWeights,
    /// A weight was negative or not finite.
    InvalidWeight { index: usize, value: f64 },
    /// The weights summed to zero or a non-positive/non-finite total.
    NonPositiveTotal(f64),
    /// The cumulative scan failed to resolve an index (floating-point edge).
    UnresolvedIndex,
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWeights => write!(f, "Cannot sample from an empty weight vector"),
            Self::InvalidWeight { index, value } => {
                write!(f, "Invalid weight at index {index}: {value}")
            }
            Self::NonPositiveTotal(total) => {
                write!(f, "Weights must sum to a positive total, got {total}")
            }
            Self::UnresolvedIndex => write!(f, "Weighted draw failed to resolve an index"),
        }
    }
}

impl error::Error for SamplingError {}

/// Errors that can occur when constructing a mutation model.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationError {
    /// Invalid mutation rate (must be between 0.0 and 1.0)
    InvalidMutationRate(f64),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::InvalidMutationRate(mu) => {
                write!(
                    f,
                    "Invalid mutation rate: {mu} (must be between 0.0 and 1.0)"
                )
            }
        }
    }
}

impl error::Error for MutationError {}

/// Errors that can occur when constructing a selection model.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Invalid parameter value
    InvalidParameter(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::InvalidParameter(msg) => {
                write!(f, "Invalid selection parameter: {msg}")
            }
        }
    }
}

impl error::Error for SelectionError {}

/// Errors that can occur when constructing a mortality schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum MortalityError {
    /// The schedule contained no age classes.
    EmptySchedule,
    /// A death probability was outside [0, 1].
    InvalidProbability { age_class: usize, value: f64 },
}

impl fmt::Display for MortalityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySchedule => write!(f, "Mortality schedule must have at least one age class"),
            Self::InvalidProbability { age_class, value } => {
                write!(
                    f,
                    "Invalid death probability for age class {age_class}: {value} (must be between 0.0 and 1.0)"
                )
            }
        }
    }
}

impl error::Error for MortalityError {}

/// Errors that can occur when constructing a dispersal matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum DispersalError {
    /// A row's length did not match the number of demes.
    NotSquare { row: usize, len: usize, demes: usize },
    /// A weight was negative or not finite.
    InvalidWeight { target: usize, source: usize, value: f64 },
}

impl fmt::Display for DispersalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSquare { row, len, demes } => {
                write!(
                    f,
                    "Dispersal matrix row {row} has {len} entries, expected {demes}"
                )
            }
            Self::InvalidWeight {
                target,
                source,
                value,
            } => {
                write!(
                    f,
                    "Invalid dispersal weight ({target}, {source}): {value} (must be non-negative and finite)"
                )
            }
        }
    }
}

impl error::Error for DispersalError {}

/// Shape and consistency errors between the population tables and the
/// parameter vectors. All of these are detected at initialization, before
/// any step runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Demographic and genotype tables have different row counts.
    RowCountMismatch { demographic: usize, genotype: usize },
    /// A genotype entry was outside {0, 1, 2}.
    InvalidAlleleCount { row: usize, locus: usize, value: u8 },
    /// A genotype row's length did not match the locus count.
    LocusCountMismatch { expected: usize, found: usize },
    /// Effect or dominance vector length did not match the locus count.
    EffectLengthMismatch { loci: usize, effects: usize },
    /// An epistatic triple referenced a locus outside the genotype.
    EpistaticLocusOutOfRange { index: usize, locus: usize, loci: usize },
    /// Per-deme vectors disagree on the number of demes.
    DemeCountMismatch { expected: usize, found: usize, what: &'static str },
    /// An individual's deme id was outside the deme range.
    DemeOutOfRange { row: usize, deme: usize, demes: usize },
    /// A scalar rate was outside [0, 1].
    InvalidRate { name: &'static str, value: f64 },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowCountMismatch {
                demographic,
                genotype,
            } => {
                write!(
                    f,
                    "Demographic table has {demographic} rows but genotype table has {genotype}"
                )
            }
            Self::InvalidAlleleCount { row, locus, value } => {
                write!(
                    f,
                    "Invalid allele count {value} at row {row}, locus {locus} (must be 0, 1, or 2)"
                )
            }
            Self::LocusCountMismatch { expected, found } => {
                write!(f, "Genotype row has {found} loci, expected {expected}")
            }
            Self::EffectLengthMismatch { loci, effects } => {
                write!(
                    f,
                    "Effect vector has {effects} entries but genotypes carry {loci} loci"
                )
            }
            Self::EpistaticLocusOutOfRange { index, locus, loci } => {
                write!(
                    f,
                    "Epistatic triple {index} references locus {locus}, but only {loci} loci exist"
                )
            }
            Self::DemeCountMismatch {
                expected,
                found,
                what,
            } => {
                write!(f, "{what} covers {found} demes, expected {expected}")
            }
            Self::DemeOutOfRange { row, deme, demes } => {
                write!(
                    f,
                    "Individual {row} belongs to deme {deme}, but only {demes} demes exist"
                )
            }
            Self::InvalidRate { name, value } => {
                write!(f, "Invalid {name}: {value} (must be between 0.0 and 1.0)")
            }
        }
    }
}

impl error::Error for ShapeError {}

/// Errors that can occur during simulation building.
#[derive(Debug)]
pub enum BuilderError {
    /// A required parameter is missing
    MissingRequired(&'static str),
    /// An invalid parameter value was provided
    InvalidParameter(String),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired(param) => {
                write!(f, "Missing required parameter: {param}")
            }
            Self::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {msg}")
            }
        }
    }
}

impl error::Error for BuilderError {}

/// Top-level error type surfaced by the simulation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Input shapes were inconsistent at initialization.
    Shape(ShapeError),
    /// A weighted draw failed mid-step.
    Sampling(SamplingError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(e) => write!(f, "Shape error: {e}"),
            Self::Sampling(e) => write!(f, "Sampling error: {e}"),
        }
    }
}

impl error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            Self::Sampling(e) => Some(e),
        }
    }
}

impl From<ShapeError> for SimulationError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<SamplingError> for SimulationError {
    fn from(e: SamplingError) -> Self {
        Self::Sampling(e)
    }
}
