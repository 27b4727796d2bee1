use crate::model::grid::Cell;
use crate::model::region::RegionId;
use serde::{Deserialize, Serialize};

/// Ground truth: the region holding the target and its local cell within
/// that region's grid. Sampled once per session and immutable afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLocation {
    pub region: RegionId,
    pub cell: Cell,
}

impl TargetLocation {
    pub const fn new(region: RegionId, cell: Cell) -> Self {
        Self { region, cell }
    }
}
