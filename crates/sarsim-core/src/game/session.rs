use crate::belief::{BayesianUpdater, NormalizationError};
use crate::model::ConfigurationError;
use crate::model::effectiveness::EffectivenessVector;
use crate::model::probability::RegionProbabilities;
use crate::model::region::{MapPoint, RegionId, RegionLayout};
use crate::model::target::TargetLocation;
use crate::search::detect::{DetectionEngine, SearchPass};
use crate::search::placer::TargetPlacer;
use crate::search::sweep::EffectivenessSampler;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The search activity the driver selected for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundKind {
    /// Search one region twice; the two coverage sets are merged.
    DoubleRegion(RegionId),
    /// Search two distinct regions once each.
    Pair(RegionId, RegionId),
}

impl fmt::Display for RoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundKind::DoubleRegion(region) => write!(f, "{region} twice"),
            RoundKind::Pair(a, b) => write!(f, "Areas {} & {}", a.number(), b.number()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Rounds may still be run; the target has not been detected.
    Sweeping,
    /// A pass detected the target; the session is terminal.
    TargetFound,
}

/// Everything one completed round produced.
#[derive(Debug, Clone)]
pub struct RoundResult {
    /// 1-based number of the round that just ran.
    pub round: u32,
    pub outcomes: [SearchPass; 2],
    /// The round's final effectiveness vector, post-merge for a doubled
    /// region, zero for regions not searched.
    pub effectiveness: EffectivenessVector,
    /// Revised probabilities, present only when every pass came up empty.
    pub probabilities: Option<RegionProbabilities>,
}

impl RoundResult {
    pub fn target_was_found(&self) -> bool {
        self.outcomes.iter().any(|pass| pass.result.is_found())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionError {
    /// A pair round must name two distinct regions.
    InvalidRoundKind { kind: RoundKind },
    /// The target was already detected in an earlier round.
    TargetAlreadyFound,
    Normalization(NormalizationError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidRoundKind { kind } => {
                write!(f, "invalid round kind ({kind}): a pair must name two distinct areas")
            }
            SessionError::TargetAlreadyFound => {
                write!(f, "the target was already found; start a new session")
            }
            SessionError::Normalization(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Normalization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NormalizationError> for SessionError {
    fn from(err: NormalizationError) -> Self {
        SessionError::Normalization(err)
    }
}

/// Construction parameters for a session. `new` fills in the exercise
/// defaults; the remaining fields are knobs for scripted runs and tests.
#[derive(Debug, Clone)]
pub struct SessionSetup {
    pub layout: RegionLayout,
    pub priors: RegionProbabilities,
    pub seed: Option<u64>,
    pub placement_mode: f64,
    pub sweep_range: (f64, f64),
    /// Overrides random placement with a fixed ground truth.
    pub target: Option<TargetLocation>,
}

impl SessionSetup {
    pub fn new(layout: RegionLayout, priors: RegionProbabilities) -> Self {
        Self {
            layout,
            priors,
            seed: None,
            placement_mode: TargetPlacer::DEFAULT_MODE,
            sweep_range: EffectivenessSampler::DEFAULT_RANGE,
            target: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn placement_mode(mut self, mode: f64) -> Self {
        self.placement_mode = mode;
        self
    }

    pub fn sweep_range(mut self, low: f64, high: f64) -> Self {
        self.sweep_range = (low, high);
        self
    }

    pub fn target(mut self, target: TargetLocation) -> Self {
        self.target = Some(target);
        self
    }
}

/// One independent search exercise: owns the region layout, the current
/// belief, the ground-truth target, and a seeded random source.
///
/// The driver picks a [`RoundKind`] each round; the session samples
/// effectiveness, runs the passes, and either terminates on detection or
/// revises the belief on a miss.
#[derive(Debug, Clone)]
pub struct SearchSession {
    layout: RegionLayout,
    probabilities: RegionProbabilities,
    effectiveness: EffectivenessVector,
    target: TargetLocation,
    sweeps: EffectivenessSampler,
    placement_mode: f64,
    rng: StdRng,
    seed: u64,
    round_number: u32,
    phase: SessionPhase,
}

impl SearchSession {
    pub fn new(
        layout: RegionLayout,
        priors: RegionProbabilities,
    ) -> Result<Self, ConfigurationError> {
        Self::from_setup(SessionSetup::new(layout, priors))
    }

    pub fn with_seed(
        layout: RegionLayout,
        priors: RegionProbabilities,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        Self::from_setup(SessionSetup::new(layout, priors).seed(seed))
    }

    pub fn from_setup(setup: SessionSetup) -> Result<Self, ConfigurationError> {
        let placer = TargetPlacer::with_mode(setup.placement_mode)?;
        let (low, high) = setup.sweep_range;
        let sweeps = EffectivenessSampler::with_range(low, high)?;

        let seed = setup.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        // Placement always consumes the same draws so that seeded sessions
        // stay aligned whether or not a target override is supplied.
        let placed = placer.place(setup.layout.dims(), &mut rng);
        let target = match setup.target {
            Some(forced) => {
                if !setup.layout.dims().contains(forced.cell) {
                    return Err(ConfigurationError::TargetOutOfBounds {
                        region: forced.region,
                        cell: forced.cell,
                    });
                }
                forced
            }
            None => placed,
        };

        Ok(Self {
            layout: setup.layout,
            probabilities: setup.priors,
            effectiveness: EffectivenessVector::zeroed(),
            target,
            sweeps,
            placement_mode: setup.placement_mode,
            rng,
            seed,
            round_number: 1,
            phase: SessionPhase::Sweeping,
        })
    }

    /// Runs one round: sample fresh effectiveness, run both passes, then
    /// either terminate on detection or revise the belief.
    pub fn run_round(&mut self, kind: RoundKind) -> Result<RoundResult, SessionError> {
        if self.phase == SessionPhase::TargetFound {
            return Err(SessionError::TargetAlreadyFound);
        }
        if let RoundKind::Pair(a, b) = kind {
            if a == b {
                return Err(SessionError::InvalidRoundKind { kind });
            }
        }

        let sampled = self.sweeps.sample(&mut self.rng);
        let dims = self.layout.dims();

        let (first, second, effectiveness) = match kind {
            RoundKind::DoubleRegion(region) => {
                let nominal = sampled.get(region);
                let first =
                    DetectionEngine::search(region, dims, nominal, &self.target, &mut self.rng);
                let second =
                    DetectionEngine::search(region, dims, nominal, &self.target, &mut self.rng);

                // Two passes over the same ground: the realized effectiveness
                // is what the union of both coverage sets actually inspected.
                let merged = first.coverage.union(&second.coverage);
                let mut vector = EffectivenessVector::zeroed();
                vector.set(region, merged.realized_effectiveness(dims));
                (first, second, vector)
            }
            RoundKind::Pair(a, b) => {
                let first =
                    DetectionEngine::search(a, dims, sampled.get(a), &self.target, &mut self.rng);
                let second =
                    DetectionEngine::search(b, dims, sampled.get(b), &self.target, &mut self.rng);

                let mut vector = EffectivenessVector::zeroed();
                vector.set(a, sampled.get(a));
                vector.set(b, sampled.get(b));
                (first, second, vector)
            }
        };

        self.effectiveness = effectiveness;

        let found = first.result.is_found() || second.result.is_found();
        let probabilities = if found {
            self.phase = SessionPhase::TargetFound;
            None
        } else {
            let revised = BayesianUpdater::revise(&self.probabilities, &self.effectiveness)?;
            self.probabilities = revised;
            Some(revised)
        };

        let round = self.round_number;
        self.round_number += 1;

        Ok(RoundResult {
            round,
            outcomes: [first, second],
            effectiveness: self.effectiveness,
            probabilities,
        })
    }

    pub fn probabilities(&self) -> &RegionProbabilities {
        &self.probabilities
    }

    pub fn effectiveness(&self) -> &EffectivenessVector {
        &self.effectiveness
    }

    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    /// Ground truth. Exposed for scripted exercises and snapshots; the
    /// driver should not consult it while the search is still running.
    pub fn target(&self) -> &TargetLocation {
        &self.target
    }

    /// Global map coordinates of the target, available once it was found.
    pub fn target_global_location(&self) -> Option<MapPoint> {
        match self.phase {
            SessionPhase::TargetFound => Some(self.layout.global(&self.target)),
            SessionPhase::Sweeping => None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 1-based number of the next round to run.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn placement_mode(&self) -> f64 {
        self.placement_mode
    }

    pub fn sweep_range(&self) -> (f64, f64) {
        (self.sweeps.low(), self.sweeps.high())
    }

    pub(crate) fn restore_state(&mut self, round_number: u32, probabilities: RegionProbabilities) {
        self.round_number = round_number.max(1);
        self.probabilities = probabilities;
    }
}
