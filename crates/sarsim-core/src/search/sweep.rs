use crate::model::ConfigurationError;
use crate::model::effectiveness::EffectivenessVector;
use crate::model::region::RegionId;
use rand::Rng;

/// Draws a fresh per-region search effectiveness at the start of each round.
///
/// Real crews never sweep a region perfectly, so the default range is
/// [0.2, 0.9]. Degenerate ranges (e.g. [1, 1]) are allowed for scripted
/// exercises.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectivenessSampler {
    low: f64,
    high: f64,
}

impl EffectivenessSampler {
    pub const DEFAULT_RANGE: (f64, f64) = (0.2, 0.9);

    pub fn with_range(low: f64, high: f64) -> Result<Self, ConfigurationError> {
        let valid = (0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high) && low <= high;
        if !valid {
            return Err(ConfigurationError::InvalidSweepRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EffectivenessVector {
        let mut vector = EffectivenessVector::zeroed();
        for region in RegionId::ALL {
            vector.set(region, rng.gen_range(self.low..=self.high));
        }
        vector
    }
}

impl Default for EffectivenessSampler {
    fn default() -> Self {
        let (low, high) = Self::DEFAULT_RANGE;
        Self { low, high }
    }
}
