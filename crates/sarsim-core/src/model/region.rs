use crate::model::grid::GridDims;
use crate::model::target::TargetLocation;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RegionId {
    Alpha = 0,
    Bravo = 1,
    Charlie = 2,
}

impl RegionId {
    pub const ALL: [RegionId; 3] = [RegionId::Alpha, RegionId::Bravo, RegionId::Charlie];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(RegionId::Alpha),
            1 => Some(RegionId::Bravo),
            2 => Some(RegionId::Charlie),
            _ => None,
        }
    }

    /// Parses a 1-based area number as shown to the operator.
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(RegionId::Alpha),
            2 => Some(RegionId::Bravo),
            3 => Some(RegionId::Charlie),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Area {}", self.number())
    }
}

/// A point in global map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The fixed arrangement of the three search regions on the map.
///
/// Every region shares the same grid dimensions; only the global origin
/// differs. The origins matter solely for reporting global coordinates to
/// whatever renders the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLayout {
    dims: GridDims,
    origins: [MapPoint; 3],
}

impl RegionLayout {
    pub fn new(dims: GridDims, origins: [MapPoint; 3]) -> Self {
        Self { dims, origins }
    }

    /// The layout of the classic three-area coastal exercise: 50x50 cell
    /// grids anchored at fixed map positions.
    pub fn standard() -> Self {
        Self {
            dims: GridDims::STANDARD,
            origins: [
                MapPoint { x: 130, y: 265 },
                MapPoint { x: 80, y: 255 },
                MapPoint { x: 105, y: 205 },
            ],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn origin(&self, region: RegionId) -> MapPoint {
        self.origins[region.index()]
    }

    /// Converts a target's local cell to global map coordinates.
    pub fn global(&self, target: &TargetLocation) -> MapPoint {
        let origin = self.origin(target.region);
        MapPoint {
            x: origin.x + target.cell.x,
            y: origin.y + target.cell.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MapPoint, RegionId, RegionLayout};
    use crate::model::grid::Cell;
    use crate::model::target::TargetLocation;

    #[test]
    fn number_roundtrip() {
        for (i, region) in RegionId::ALL.iter().enumerate() {
            assert_eq!(RegionId::from_index(i), Some(*region));
            assert_eq!(RegionId::from_number(region.number()), Some(*region));
            assert_eq!(region.index(), i);
        }
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert_eq!(RegionId::from_number(0), None);
        assert_eq!(RegionId::from_number(4), None);
        assert_eq!(RegionId::from_index(3), None);
    }

    #[test]
    fn displays_as_area_number() {
        assert_eq!(RegionId::Bravo.to_string(), "Area 2");
    }

    #[test]
    fn standard_layout_matches_exercise_map() {
        let layout = RegionLayout::standard();
        assert_eq!(layout.dims().cell_count(), 2_500);
        assert_eq!(layout.origin(RegionId::Alpha), MapPoint { x: 130, y: 265 });
        assert_eq!(layout.origin(RegionId::Charlie), MapPoint { x: 105, y: 205 });
    }

    #[test]
    fn global_coordinates_offset_local_cell() {
        let layout = RegionLayout::standard();
        let target = TargetLocation {
            region: RegionId::Bravo,
            cell: Cell { x: 10, y: 10 },
        };
        assert_eq!(layout.global(&target), MapPoint { x: 90, y: 265 });
    }
}
