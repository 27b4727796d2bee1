use crate::model::ConfigurationError;
use crate::model::grid::{Cell, GridDims};
use crate::model::region::RegionId;
use crate::model::target::TargetLocation;
use rand::Rng;
use rand_distr::{Distribution, Triangular};

/// Places the hidden target: local cell uniform over the grid, region drawn
/// from a triangular distribution over [1, 4).
///
/// The mode is the bias knob. The default of 2.5 peaks over Area 2, matching
/// the exercise's asymmetric placement bias.
#[derive(Debug, Clone)]
pub struct TargetPlacer {
    region_pick: Triangular<f64>,
    mode: f64,
}

impl TargetPlacer {
    pub const DEFAULT_MODE: f64 = 2.5;

    pub fn with_mode(mode: f64) -> Result<Self, ConfigurationError> {
        let high = RegionId::ALL.len() as f64 + 1.0;
        let region_pick = Triangular::new(1.0, high, mode)
            .map_err(|_| ConfigurationError::InvalidPlacementMode { mode })?;
        Ok(Self { region_pick, mode })
    }

    /// The mode value that peaks over the given region.
    pub fn mode_for(region: RegionId) -> f64 {
        region.number() as f64 + 0.5
    }

    pub fn mode(&self) -> f64 {
        self.mode
    }

    pub fn place<R: Rng + ?Sized>(&self, dims: GridDims, rng: &mut R) -> TargetLocation {
        let x = rng.gen_range(0..dims.width());
        let y = rng.gen_range(0..dims.height());
        let draw = self.region_pick.sample(rng);
        // The sample lies in [1, 4); flooring yields a 1-based area number.
        // Clamp guards the open upper bound against rounding.
        let number = (draw.floor() as i64).clamp(1, RegionId::ALL.len() as i64) as u8;
        let region = RegionId::from_number(number).unwrap_or(RegionId::Bravo);
        TargetLocation::new(region, Cell::new(x, y))
    }
}
