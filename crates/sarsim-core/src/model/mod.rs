pub mod coverage;
pub mod effectiveness;
pub mod grid;
pub mod probability;
pub mod region;
pub mod target;

use crate::model::grid::Cell;
use crate::model::region::RegionId;
use core::fmt;

/// Rejected simulation parameters, reported before any session state exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    NonPositivePrior { region: RegionId, value: f64 },
    UnnormalizedPriors { sum: f64 },
    NegativeProbability { region: RegionId, value: f64 },
    EmptyGrid { width: u32, height: u32 },
    InvalidPlacementMode { mode: f64 },
    InvalidSweepRange { low: f64, high: f64 },
    EffectivenessOutOfRange { region: RegionId, value: f64 },
    TargetOutOfBounds { region: RegionId, cell: Cell },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NonPositivePrior { region, value } => {
                write!(f, "prior for {region} must be positive, got {value}")
            }
            ConfigurationError::UnnormalizedPriors { sum } => {
                write!(f, "region priors must sum to 1, got {sum}")
            }
            ConfigurationError::NegativeProbability { region, value } => {
                write!(f, "probability for {region} must not be negative, got {value}")
            }
            ConfigurationError::EmptyGrid { width, height } => {
                write!(f, "search grid must be at least 1x1, got {width}x{height}")
            }
            ConfigurationError::InvalidPlacementMode { mode } => {
                write!(f, "placement mode {mode} falls outside the region range")
            }
            ConfigurationError::InvalidSweepRange { low, high } => {
                write!(f, "sweep range [{low}, {high}] is not within [0, 1]")
            }
            ConfigurationError::EffectivenessOutOfRange { region, value } => {
                write!(f, "effectiveness for {region} must lie in [0, 1], got {value}")
            }
            ConfigurationError::TargetOutOfBounds { region, cell } => {
                write!(f, "forced target cell {cell} lies outside the {region} grid")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
