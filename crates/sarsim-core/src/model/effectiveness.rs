use crate::model::ConfigurationError;
use crate::model::region::RegionId;
use serde::Serialize;

/// Per-region search effectiveness for one round: the fraction of each
/// region's cells inspected. A region not searched this round carries 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectivenessVector {
    values: [f64; 3],
}

impl EffectivenessVector {
    pub fn zeroed() -> Self {
        Self { values: [0.0; 3] }
    }

    /// Builds a vector from explicit values, each required to lie in [0, 1].
    pub fn new(values: [f64; 3]) -> Result<Self, ConfigurationError> {
        for region in RegionId::ALL {
            let value = values[region.index()];
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::EffectivenessOutOfRange { region, value });
            }
        }
        Ok(Self { values })
    }

    pub fn get(&self, region: RegionId) -> f64 {
        self.values[region.index()]
    }

    pub fn values(&self) -> [f64; 3] {
        self.values
    }

    pub(crate) fn set(&mut self, region: RegionId, value: f64) {
        debug_assert!((0.0..=1.0).contains(&value));
        self.values[region.index()] = value;
    }
}
