use crate::model::ConfigurationError;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Dimensions of a region's cell grid, shared by all three regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    width: u32,
    height: u32,
}

impl GridDims {
    pub const STANDARD: GridDims = GridDims {
        width: 50,
        height: 50,
    };

    pub fn new(width: u32, height: u32) -> Result<Self, ConfigurationError> {
        if width == 0 || height == 0 {
            return Err(ConfigurationError::EmptyGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }
}

/// Local cell coordinates within a region grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, GridDims};
    use crate::model::ConfigurationError;

    #[test]
    fn cell_count_multiplies_dimensions() {
        let dims = GridDims::new(3, 4).unwrap();
        assert_eq!(dims.cell_count(), 12);
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert_eq!(
            GridDims::new(0, 50),
            Err(ConfigurationError::EmptyGrid {
                width: 0,
                height: 50
            })
        );
        assert_eq!(
            GridDims::new(50, 0),
            Err(ConfigurationError::EmptyGrid {
                width: 50,
                height: 0
            })
        );
    }

    #[test]
    fn contains_checks_both_axes() {
        let dims = GridDims::new(2, 3).unwrap();
        assert!(dims.contains(Cell::new(1, 2)));
        assert!(!dims.contains(Cell::new(2, 0)));
        assert!(!dims.contains(Cell::new(0, 3)));
    }
}
