use crate::model::ConfigurationError;
use crate::model::region::RegionId;
use serde::Serialize;

/// Tolerance for the sum-to-one invariant.
pub const SUM_EPSILON: f64 = 1e-9;

/// Belief that the target lies in each of the three regions.
///
/// The values are non-negative and sum to 1 (within [`SUM_EPSILON`]) at all
/// times. Priors must be strictly positive; posteriors may reach zero when a
/// region has been swept completely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionProbabilities {
    values: [f64; 3],
}

impl RegionProbabilities {
    /// Builds a prior distribution. Each prior must be strictly positive and
    /// the three must sum to 1.
    pub fn new(p1: f64, p2: f64, p3: f64) -> Result<Self, ConfigurationError> {
        let values = [p1, p2, p3];
        for region in RegionId::ALL {
            let value = values[region.index()];
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigurationError::NonPositivePrior { region, value });
            }
        }
        Self::checked_sum(values)
    }

    /// Reinstates a previously computed distribution, e.g. from a snapshot.
    /// Zeros are accepted; the sum-to-one invariant is still enforced.
    pub fn from_parts(values: [f64; 3]) -> Result<Self, ConfigurationError> {
        for region in RegionId::ALL {
            let value = values[region.index()];
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigurationError::NegativeProbability { region, value });
            }
        }
        Self::checked_sum(values)
    }

    /// The classic exercise priors.
    pub fn default_priors() -> Self {
        Self {
            values: [0.2, 0.5, 0.3],
        }
    }

    pub(crate) fn from_normalized(values: [f64; 3]) -> Self {
        debug_assert!((values.iter().sum::<f64>() - 1.0).abs() <= SUM_EPSILON);
        Self { values }
    }

    pub fn get(&self, region: RegionId) -> f64 {
        self.values[region.index()]
    }

    pub fn values(&self) -> [f64; 3] {
        self.values
    }

    fn checked_sum(values: [f64; 3]) -> Result<Self, ConfigurationError> {
        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > SUM_EPSILON {
            return Err(ConfigurationError::UnnormalizedPriors { sum });
        }
        Ok(Self { values })
    }
}

#[cfg(test)]
mod tests {
    use super::{RegionProbabilities, SUM_EPSILON};
    use crate::model::ConfigurationError;
    use crate::model::region::RegionId;

    #[test]
    fn default_priors_sum_to_one() {
        let priors = RegionProbabilities::default_priors();
        let sum: f64 = priors.values().iter().sum();
        assert!((sum - 1.0).abs() <= SUM_EPSILON);
        assert_eq!(priors.get(RegionId::Bravo), 0.5);
    }

    #[test]
    fn zero_prior_is_rejected() {
        let err = RegionProbabilities::new(0.0, 0.5, 0.5).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonPositivePrior {
                region: RegionId::Alpha,
                ..
            }
        ));
    }

    #[test]
    fn negative_prior_is_rejected() {
        let err = RegionProbabilities::new(0.5, -0.1, 0.6).unwrap_err();
        assert!(matches!(err, ConfigurationError::NonPositivePrior { .. }));
    }

    #[test]
    fn unnormalized_priors_are_rejected() {
        let err = RegionProbabilities::new(0.2, 0.2, 0.2).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnnormalizedPriors { .. }));
    }

    #[test]
    fn from_parts_accepts_zero_entries() {
        let probs = RegionProbabilities::from_parts([0.0, 0.4, 0.6]).unwrap();
        assert_eq!(probs.get(RegionId::Alpha), 0.0);
    }

    #[test]
    fn from_parts_still_requires_normalization() {
        let err = RegionProbabilities::from_parts([0.0, 0.4, 0.4]).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnnormalizedPriors { .. }));
    }
}
