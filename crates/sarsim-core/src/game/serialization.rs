use super::session::{SearchSession, SessionSetup};
use crate::model::ConfigurationError;
use crate::model::probability::RegionProbabilities;
use crate::model::region::RegionLayout;
use crate::model::target::TargetLocation;
use serde::{Deserialize, Serialize};

/// A restorable capture of an in-progress session.
///
/// Snapshots carry the belief state and ground truth, not the round-by-round
/// history; restoring yields a session ready to continue sweeping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub round_number: u32,
    pub layout: RegionLayout,
    pub probabilities: [f64; 3],
    pub placement_mode: f64,
    pub sweep_low: f64,
    pub sweep_high: f64,
    pub target: TargetLocation,
}

impl SessionSnapshot {
    pub fn capture(session: &SearchSession) -> Self {
        let (sweep_low, sweep_high) = session.sweep_range();
        SessionSnapshot {
            seed: session.seed(),
            round_number: session.round_number(),
            layout: *session.layout(),
            probabilities: session.probabilities().values(),
            placement_mode: session.placement_mode(),
            sweep_low,
            sweep_high,
            target: *session.target(),
        }
    }

    pub fn restore(self) -> Result<SearchSession, ConfigurationError> {
        let priors = RegionProbabilities::from_parts(self.probabilities)?;
        let setup = SessionSetup::new(self.layout, priors)
            .seed(self.seed)
            .placement_mode(self.placement_mode)
            .sweep_range(self.sweep_low, self.sweep_high)
            .target(self.target);
        let mut session = SearchSession::from_setup(setup)?;
        session.restore_state(self.round_number, priors);
        Ok(session)
    }

    pub fn to_json(session: &SearchSession) -> serde_json::Result<String> {
        let snapshot = Self::capture(session);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
