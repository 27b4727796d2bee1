use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

use sarsim_core::game::session::SessionSetup;
use sarsim_core::model::ConfigurationError;
use sarsim_core::model::grid::GridDims;
use sarsim_core::model::probability::RegionProbabilities;
use sarsim_core::model::region::{MapPoint, RegionLayout};
use sarsim_core::search::{EffectivenessSampler, TargetPlacer};

const PRIOR_SUM_TOLERANCE: f64 = 1e-9;

/// Root simulation configuration loaded from YAML. Every field has a
/// default matching the classic exercise, so an empty file (or no file at
/// all) yields a runnable setup.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    #[serde(default = "default_priors")]
    pub priors: [f64; 3],
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default = "default_origins")]
    pub origins: [[u32; 2]; 3],
    #[serde(default = "default_placement_mode")]
    pub placement_mode: f64,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub round_log: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        for (i, prior) in self.priors.iter().enumerate() {
            if !(*prior > 0.0) || !prior.is_finite() {
                return Err(ValidationError::InvalidField {
                    field: format!("priors[{i}]"),
                    message: "each prior must be a positive number".to_string(),
                });
            }
        }
        let sum: f64 = self.priors.iter().sum();
        if (sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(ValidationError::InvalidField {
                field: "priors".to_string(),
                message: format!("priors must sum to 1, got {sum}"),
            });
        }

        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ValidationError::InvalidField {
                field: "grid".to_string(),
                message: "grid dimensions must be at least 1x1".to_string(),
            });
        }

        let (low, high) = (self.sweep.low, self.sweep.high);
        let sweep_ok = (0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high) && low <= high;
        if !sweep_ok {
            return Err(ValidationError::InvalidField {
                field: "sweep".to_string(),
                message: format!("sweep range [{low}, {high}] must lie within [0, 1]"),
            });
        }

        if !(1.0..=4.0).contains(&self.placement_mode) {
            return Err(ValidationError::InvalidField {
                field: "placement_mode".to_string(),
                message: "placement mode must lie within [1, 4]".to_string(),
            });
        }

        self.logging.normalize();
        Ok(())
    }

    /// Builds the core session setup this configuration describes.
    pub fn session_setup(&self) -> Result<SessionSetup, ConfigurationError> {
        let dims = GridDims::new(self.grid.width, self.grid.height)?;
        let origins = self.origins.map(|[x, y]| MapPoint { x, y });
        let layout = RegionLayout::new(dims, origins);
        let priors =
            RegionProbabilities::new(self.priors[0], self.priors[1], self.priors[2])?;

        let mut setup = SessionSetup::new(layout, priors)
            .placement_mode(self.placement_mode)
            .sweep_range(self.sweep.low, self.sweep.high);
        if let Some(seed) = self.seed {
            setup = setup.seed(seed);
        }
        Ok(setup)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            priors: default_priors(),
            grid: GridConfig::default(),
            origins: default_origins(),
            placement_mode: default_placement_mode(),
            sweep: SweepConfig::default(),
            seed: None,
            round_log: None,
            logging: LoggingConfig::default(),
        }
    }
}

fn default_priors() -> [f64; 3] {
    RegionProbabilities::default_priors().values()
}

fn default_origins() -> [[u32; 2]; 3] {
    [[130, 265], [80, 255], [105, 205]]
}

fn default_placement_mode() -> f64 {
    TargetPlacer::DEFAULT_MODE
}

/// Region grid dimensions, shared by all three areas.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
        }
    }
}

/// The range search effectiveness is drawn from each round.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct SweepConfig {
    pub low: f64,
    pub high: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let (low, high) = EffectivenessSampler::DEFAULT_RANGE;
        Self { low, high }
    }
}

/// Structured logging configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default)]
    pub tracing_level: Option<String>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        self.tracing_level
            .as_deref()
            .and_then(|value| value.parse().ok())
    }

    pub fn normalize(&mut self) {
        if let Some(level) = self.tracing_level.as_mut() {
            *level = level.trim().to_ascii_lowercase();
        }
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
