use crate::model::coverage::Coverage;
use crate::model::grid::{Cell, GridDims};
use rand::Rng;
use rand::seq::SliceRandom;

/// Samples the subset of cells a search pass actually inspects.
#[derive(Debug, Default)]
pub struct CoverageSampler;

impl CoverageSampler {
    /// Covers `floor(cell_count * effectiveness)` cells chosen uniformly
    /// without replacement. Effectiveness 0 yields an empty set, 1 the full
    /// grid.
    pub fn cover<R: Rng + ?Sized>(dims: GridDims, effectiveness: f64, rng: &mut R) -> Coverage {
        let mut cells = Vec::with_capacity(dims.cell_count());
        for y in 0..dims.height() {
            for x in 0..dims.width() {
                cells.push(Cell::new(x, y));
            }
        }
        cells.shuffle(rng);
        let take = (dims.cell_count() as f64 * effectiveness.clamp(0.0, 1.0)).floor() as usize;
        cells.truncate(take);
        Coverage::from_cells(cells)
    }
}
