//! Simulation configuration, loaded from YAML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backtrack::{Aggregation, ConflictProbe, DEFAULT_SIGHT};
use crate::error::WalkError;
use crate::geometry::Point;
use crate::rng::{one_term, two_term, DEFAULT_MODULUS};
use crate::rng::{NativeSource, OneTermGenerator, RandomSource, TwoTermGenerator};
use crate::walk::{WalkKind, WalkOptions, Walker, DEFAULT_MAX_BACKTRACKS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Step policy
    pub kind: WalkKind,

    /// Step budget; negative values are rejected when the walk is built
    #[serde(default = "default_steps")]
    pub steps: i64,

    /// Starting lattice point
    pub start: Point,

    /// Unwind instead of abandoning on self-intersection
    pub backtrack: bool,

    /// Conflict probe lookahead depth
    #[serde(default = "default_sight")]
    pub sight: u32,

    /// How deeper probe results combine across branches
    pub aggregation: Aggregation,

    /// Backtracking episodes allowed per walk (null for unbounded)
    #[serde(default = "default_max_backtracks")]
    pub max_backtracks: Option<u64>,

    /// Direction source
    pub generator: GeneratorConfig,

    /// How often the event consumer drains its queue, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Batch statistics sweep
    pub stats: StatsConfig,
}

fn default_steps() -> i64 {
    100
}
fn default_sight() -> u32 {
    DEFAULT_SIGHT
}
fn default_max_backtracks() -> Option<u64> {
    Some(DEFAULT_MAX_BACKTRACKS)
}
fn default_poll_interval_ms() -> u64 {
    10
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            kind: WalkKind::default(),
            steps: default_steps(),
            start: Point::ORIGIN,
            backtrack: false,
            sight: default_sight(),
            aggregation: Aggregation::default(),
            max_backtracks: default_max_backtracks(),
            generator: GeneratorConfig::default(),
            poll_interval_ms: default_poll_interval_ms(),
            stats: StatsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    #[serde(default = "default_stride")]
    pub stride: usize,

    /// Successful walks averaged per step count
    #[serde(default = "default_walks")]
    pub walks: usize,
}

fn default_max_steps() -> usize {
    100
}
fn default_stride() -> usize {
    5
}
fn default_walks() -> usize {
    500
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            stride: default_stride(),
            walks: default_walks(),
        }
    }
}

/// Which generator drives direction choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Uniform selection from `rand`; seeded from entropy unless `seed` is set
    Native {
        #[serde(default)]
        seed: Option<u64>,
    },
    OneTerm {
        #[serde(default = "default_modulus")]
        modulus: u64,
        #[serde(default = "default_one_term_multiplier")]
        multiplier: u64,
        #[serde(default = "default_one_term_seed")]
        seed: u64,
    },
    TwoTerm {
        #[serde(default = "default_modulus")]
        modulus: u64,
        #[serde(default = "default_multiplier_n2")]
        multiplier_n2: u64,
        #[serde(default = "default_multiplier_n1")]
        multiplier_n1: u64,
        #[serde(default = "default_seed_n2")]
        seed_n2: u64,
        #[serde(default = "default_seed_n1")]
        seed_n1: u64,
    },
}

fn default_modulus() -> u64 {
    DEFAULT_MODULUS
}
fn default_one_term_multiplier() -> u64 {
    one_term::DEFAULT_MULTIPLIER
}
fn default_one_term_seed() -> u64 {
    one_term::DEFAULT_SEED
}
fn default_multiplier_n2() -> u64 {
    two_term::DEFAULT_MULTIPLIER_N2
}
fn default_multiplier_n1() -> u64 {
    two_term::DEFAULT_MULTIPLIER_N1
}
fn default_seed_n2() -> u64 {
    two_term::DEFAULT_SEED_N2
}
fn default_seed_n1() -> u64 {
    two_term::DEFAULT_SEED_N1
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::Native { seed: None }
    }
}

impl GeneratorConfig {
    /// Single-term generator with its default parameters.
    pub fn one_term() -> Self {
        GeneratorConfig::OneTerm {
            modulus: default_modulus(),
            multiplier: default_one_term_multiplier(),
            seed: default_one_term_seed(),
        }
    }

    /// Two-term generator with its default parameters.
    pub fn two_term() -> Self {
        GeneratorConfig::TwoTerm {
            modulus: default_modulus(),
            multiplier_n2: default_multiplier_n2(),
            multiplier_n1: default_multiplier_n1(),
            seed_n2: default_seed_n2(),
            seed_n1: default_seed_n1(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeneratorConfig::Native { .. } => "native",
            GeneratorConfig::OneTerm { .. } => "one_term",
            GeneratorConfig::TwoTerm { .. } => "two_term",
        }
    }

    /// Builds the configured source, validating its parameters.
    pub fn build(&self) -> Result<Box<dyn RandomSource + Send>> {
        let source: Box<dyn RandomSource + Send> = match *self {
            GeneratorConfig::Native { seed: Some(seed) } => Box::new(NativeSource::seeded(seed)),
            GeneratorConfig::Native { seed: None } => Box::new(NativeSource::new()),
            GeneratorConfig::OneTerm {
                modulus,
                multiplier,
                seed,
            } => Box::new(
                OneTermGenerator::with_params(modulus, multiplier, seed)
                    .context("Invalid one-term generator parameters")?,
            ),
            GeneratorConfig::TwoTerm {
                modulus,
                multiplier_n2,
                multiplier_n1,
                seed_n2,
                seed_n1,
            } => Box::new(
                TwoTermGenerator::with_params(
                    modulus,
                    (multiplier_n2, multiplier_n1),
                    (seed_n2, seed_n1),
                )
                .context("Invalid two-term generator parameters")?,
            ),
        };
        Ok(source)
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load from `path` when given and present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn nb_steps(&self) -> Result<usize, WalkError> {
        usize::try_from(self.steps).map_err(|_| WalkError::NegativeSteps(self.steps))
    }

    pub fn walk_options(&self) -> Result<WalkOptions, WalkError> {
        Ok(WalkOptions {
            backtrack: self.backtrack,
            probe: ConflictProbe::new(self.sight, self.aggregation)?,
            max_backtracks: self.max_backtracks,
        })
    }

    pub fn walker(&self) -> Result<Walker, WalkError> {
        Ok(Walker::new(self.kind, self.walk_options()?))
    }

    pub fn build_source(&self) -> Result<Box<dyn RandomSource + Send>> {
        self.generator.build()
    }
}
