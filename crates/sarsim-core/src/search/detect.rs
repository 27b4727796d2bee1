use crate::model::coverage::Coverage;
use crate::model::grid::GridDims;
use crate::model::region::RegionId;
use crate::model::target::TargetLocation;
use crate::search::coverage::CoverageSampler;
use rand::Rng;
use serde::Serialize;

/// Outcome of a single search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchResult {
    Found(RegionId),
    NotFound,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

impl core::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SearchResult::Found(region) => write!(f, "Found in {region}"),
            SearchResult::NotFound => write!(f, "Not Found"),
        }
    }
}

/// One completed pass: the outcome plus the cells inspected, so the caller
/// can merge coverage across repeated passes over the same region.
#[derive(Debug, Clone)]
pub struct SearchPass {
    pub result: SearchResult,
    pub coverage: Coverage,
}

/// Tests whether a pass over a region turned up the target.
#[derive(Debug, Default)]
pub struct DetectionEngine;

impl DetectionEngine {
    /// Found iff the searched region holds the target and the target's cell
    /// was among those inspected. Pure predicate, no sampling.
    pub fn evaluate(
        region: RegionId,
        coverage: &Coverage,
        target: &TargetLocation,
    ) -> SearchResult {
        if region == target.region && coverage.contains(target.cell) {
            SearchResult::Found(region)
        } else {
            SearchResult::NotFound
        }
    }

    /// Samples a coverage set at the given effectiveness and evaluates it.
    pub fn search<R: Rng + ?Sized>(
        region: RegionId,
        dims: GridDims,
        effectiveness: f64,
        target: &TargetLocation,
        rng: &mut R,
    ) -> SearchPass {
        let coverage = CoverageSampler::cover(dims, effectiveness, rng);
        let result = Self::evaluate(region, &coverage, target);
        SearchPass { result, coverage }
    }
}

#[cfg(test)]
mod tests {
    use super::{DetectionEngine, SearchResult};
    use crate::model::coverage::Coverage;
    use crate::model::grid::{Cell, GridDims};
    use crate::model::region::RegionId;
    use crate::model::target::TargetLocation;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn target_at(region: RegionId, x: u32, y: u32) -> TargetLocation {
        TargetLocation::new(region, Cell::new(x, y))
    }

    #[test]
    fn found_when_region_matches_and_cell_covered() {
        let target = target_at(RegionId::Bravo, 10, 10);
        let coverage = Coverage::from_cells([Cell::new(10, 10), Cell::new(0, 0)]);
        assert_eq!(
            DetectionEngine::evaluate(RegionId::Bravo, &coverage, &target),
            SearchResult::Found(RegionId::Bravo)
        );
    }

    #[test]
    fn not_found_when_cell_missing_from_coverage() {
        let target = target_at(RegionId::Bravo, 10, 10);
        let coverage = Coverage::from_cells([Cell::new(0, 0), Cell::new(1, 1)]);
        assert_eq!(
            DetectionEngine::evaluate(RegionId::Bravo, &coverage, &target),
            SearchResult::NotFound
        );
    }

    #[test]
    fn not_found_when_searching_the_wrong_region() {
        let target = target_at(RegionId::Alpha, 10, 10);
        // Same cell covered, but in another region's pass.
        let coverage = Coverage::from_cells([Cell::new(10, 10)]);
        assert_eq!(
            DetectionEngine::evaluate(RegionId::Charlie, &coverage, &target),
            SearchResult::NotFound
        );
    }

    #[test]
    fn full_sweep_of_target_region_always_finds() {
        let dims = GridDims::STANDARD;
        let target = target_at(RegionId::Charlie, 49, 0);
        let mut rng = SmallRng::seed_from_u64(4);
        let pass = DetectionEngine::search(RegionId::Charlie, dims, 1.0, &target, &mut rng);
        assert_eq!(pass.result, SearchResult::Found(RegionId::Charlie));
        assert_eq!(pass.coverage.len(), dims.cell_count());
    }

    #[test]
    fn empty_sweep_never_finds() {
        let dims = GridDims::STANDARD;
        let target = target_at(RegionId::Alpha, 0, 0);
        let mut rng = SmallRng::seed_from_u64(4);
        let pass = DetectionEngine::search(RegionId::Alpha, dims, 0.0, &target, &mut rng);
        assert_eq!(pass.result, SearchResult::NotFound);
        assert!(pass.coverage.is_empty());
    }
}
