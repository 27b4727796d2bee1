use crate::model::effectiveness::EffectivenessVector;
use crate::model::probability::RegionProbabilities;
use crate::model::region::RegionId;
use std::fmt;

/// Revises region probabilities conditioned on a round of non-detection.
#[derive(Debug, Default)]
pub struct BayesianUpdater;

impl BayesianUpdater {
    /// Applies Bayes' rule given that every pass this round came up empty.
    ///
    /// Each region keeps the survival weight `p * (1 - e)`: the belief it
    /// holds the target times the chance the search there would have missed
    /// it. A region with effectiveness 0 (not searched) keeps its full
    /// weight. Weights are then renormalized.
    ///
    /// Pure function: identical inputs yield identical outputs.
    pub fn revise(
        probs: &RegionProbabilities,
        effectiveness: &EffectivenessVector,
    ) -> Result<RegionProbabilities, NormalizationError> {
        let mut weights = [0.0_f64; 3];
        for region in RegionId::ALL {
            weights[region.index()] =
                probs.get(region) * (1.0 - effectiveness.get(region));
        }

        let denominator: f64 = weights.iter().sum();
        if !denominator.is_finite() || denominator <= 0.0 {
            return Err(NormalizationError::ZeroDenominator { denominator });
        }

        for weight in &mut weights {
            *weight /= denominator;
        }
        Ok(RegionProbabilities::from_normalized(weights))
    }
}

/// The posterior could not be normalized: every region's survival weight
/// collapsed, which contradicts the premise that the target is somewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizationError {
    ZeroDenominator { denominator: f64 },
}

impl fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationError::ZeroDenominator { denominator } => {
                write!(
                    f,
                    "posterior denominator collapsed to {denominator}; no region can hold the target"
                )
            }
        }
    }
}

impl std::error::Error for NormalizationError {}

#[cfg(test)]
mod tests {
    use super::{BayesianUpdater, NormalizationError};
    use crate::model::effectiveness::EffectivenessVector;
    use crate::model::probability::{RegionProbabilities, SUM_EPSILON};
    use crate::model::region::RegionId;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn survival_weights_match_hand_computation() {
        let priors = RegionProbabilities::default_priors();
        let effectiveness = EffectivenessVector::new([0.0, 0.5, 0.0]).unwrap();
        let posterior = BayesianUpdater::revise(&priors, &effectiveness).unwrap();
        // Weights: 0.2, 0.25, 0.3 -> denominator 0.75.
        assert!((posterior.get(RegionId::Alpha) - 0.2 / 0.75).abs() < 1e-12);
        assert!((posterior.get(RegionId::Bravo) - 0.25 / 0.75).abs() < 1e-12);
        assert!((posterior.get(RegionId::Charlie) - 0.3 / 0.75).abs() < 1e-12);
    }

    #[test]
    fn searched_region_loses_relative_belief() {
        let priors = RegionProbabilities::default_priors();
        let effectiveness = EffectivenessVector::new([0.0, 0.5, 0.0]).unwrap();
        let posterior = BayesianUpdater::revise(&priors, &effectiveness).unwrap();
        assert!(posterior.get(RegionId::Bravo) < priors.get(RegionId::Bravo));
        assert!(posterior.get(RegionId::Alpha) > priors.get(RegionId::Alpha));
        assert!(posterior.get(RegionId::Charlie) > priors.get(RegionId::Charlie));
    }

    #[test]
    fn unsearched_region_never_loses_belief() {
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..100 {
            let priors = RegionProbabilities::default_priors();
            let values = [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), 0.0];
            let effectiveness = EffectivenessVector::new(values).unwrap();
            let posterior = BayesianUpdater::revise(&priors, &effectiveness).unwrap();
            // Charlie was not searched, so belief in it cannot shrink.
            assert!(posterior.get(RegionId::Charlie) >= priors.get(RegionId::Charlie));
        }
    }

    #[test]
    fn posterior_stays_normalized_across_rounds() {
        let mut rng = SmallRng::seed_from_u64(23);
        let mut probs = RegionProbabilities::default_priors();
        for _ in 0..1_000 {
            let effectiveness = EffectivenessVector::new([
                rng.gen_range(0.0..0.95),
                rng.gen_range(0.0..0.95),
                rng.gen_range(0.0..0.95),
            ])
            .unwrap();
            probs = BayesianUpdater::revise(&probs, &effectiveness).unwrap();
            let sum: f64 = probs.values().iter().sum();
            assert!((sum - 1.0).abs() <= SUM_EPSILON, "sum drifted to {sum}");
        }
    }

    #[test]
    fn collapsed_denominator_is_an_explicit_error() {
        let priors = RegionProbabilities::default_priors();
        let effectiveness = EffectivenessVector::new([1.0, 1.0, 1.0]).unwrap();
        let err = BayesianUpdater::revise(&priors, &effectiveness).unwrap_err();
        assert!(matches!(err, NormalizationError::ZeroDenominator { .. }));
    }

    #[test]
    fn revise_is_pure() {
        let priors = RegionProbabilities::default_priors();
        let effectiveness = EffectivenessVector::new([0.3, 0.6, 0.1]).unwrap();
        let first = BayesianUpdater::revise(&priors, &effectiveness).unwrap();
        let second = BayesianUpdater::revise(&priors, &effectiveness).unwrap();
        assert_eq!(first, second);
    }
}
