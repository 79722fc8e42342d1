//! Engine configuration.
//!
//! Every tunable magnitude lives here with its default. A TOML file only
//! needs the keys it overrides:
//!
//! ```toml
//! [depths]
//! midgame = 5
//!
//! [eval]
//! corner_weight = 1200
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub depths: PhaseDepths,
    pub phases: PhaseThresholds,
    pub eval: EvalConfig,
    pub book: BookConfig,
    pub search: SearchConfig,
}

/// Target search depth per phase. The exhaustive phase always searches to
/// the end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDepths {
    pub opening: u8,
    pub midgame: u8,
    pub endgame: u8,
}

impl Default for PhaseDepths {
    fn default() -> Self {
        Self {
            opening: 3,
            midgame: 4,
            endgame: 6,
        }
    }
}

/// Empty-square counts separating the phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseThresholds {
    /// Opening while at least this many squares are empty
    pub opening_min_empties: u32,
    /// Midgame while at least this many squares are empty
    pub midgame_min_empties: u32,
    /// Solve exactly at or below this many empties
    pub exhaustive_max_empties: u32,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            opening_min_empties: 50,
            midgame_min_empties: 20,
            exhaustive_max_empties: 10,
        }
    }
}

/// One value per heuristic phase. The exhaustive phase uses `endgame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub opening: i32,
    pub midgame: i32,
    pub endgame: i32,
}

impl PhaseWeights {
    pub const fn new(opening: i32, midgame: i32, endgame: i32) -> Self {
        Self {
            opening,
            midgame,
            endgame,
        }
    }
}

/// Per-square value of a legal move, used by the mobility term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveQuality {
    pub corner: i32,
    pub edge: i32,
    pub x_square: i32,
    pub other: i32,
}

impl Default for MoveQuality {
    fn default() -> Self {
        Self {
            corner: 50,
            edge: 20,
            x_square: -30,
            other: 5,
        }
    }
}

/// Row-major, `[row][col]` with row 0 = rank 1.
pub const DEFAULT_POSITIONAL: [[i32; 8]; 8] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub corner_weight: i32,
    /// Per own X-square next to an empty corner
    pub x_square_penalty: i32,
    /// Per own C-square next to an empty corner
    pub c_square_penalty: i32,
    pub mobility_weight: PhaseWeights,
    pub move_quality: MoveQuality,
    /// Scale applied to the summed move quality, in percent
    pub move_quality_percent: PhaseWeights,
    pub stability_weight: PhaseWeights,
    pub disc_weight: PhaseWeights,
    pub positional: [[i32; 8]; 8],
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            corner_weight: 1000,
            x_square_penalty: 500,
            c_square_penalty: 200,
            mobility_weight: PhaseWeights::new(50, 25, 10),
            move_quality: MoveQuality::default(),
            move_quality_percent: PhaseWeights::new(50, 80, 120),
            stability_weight: PhaseWeights::new(50, 80, 120),
            disc_weight: PhaseWeights::new(-1, 1, 20),
            positional: DEFAULT_POSITIONAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub enabled: bool,
    /// Histories this long or longer never hit the book
    pub max_ply: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_ply: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search root moves on the rayon pool
    pub parallel_root: bool,
    /// Nodes between clock reads
    pub check_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel_root: true,
            check_interval: 128,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject settings the search cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.depths;
        if d.opening == 0 || d.midgame == 0 || d.endgame == 0 {
            return Err(ConfigError::Invalid("phase depths must be at least 1".into()));
        }

        let p = &self.phases;
        if p.opening_min_empties > 60 {
            return Err(ConfigError::Invalid(format!(
                "opening_min_empties {} exceeds the 60 empties of the start position",
                p.opening_min_empties
            )));
        }
        if p.midgame_min_empties > p.opening_min_empties {
            return Err(ConfigError::Invalid(format!(
                "midgame_min_empties {} is above opening_min_empties {}",
                p.midgame_min_empties, p.opening_min_empties
            )));
        }
        if p.exhaustive_max_empties >= p.midgame_min_empties {
            return Err(ConfigError::Invalid(format!(
                "exhaustive_max_empties {} must be below midgame_min_empties {}",
                p.exhaustive_max_empties, p.midgame_min_empties
            )));
        }

        let pct = &self.eval.move_quality_percent;
        if pct.opening < 0 || pct.midgame < 0 || pct.endgame < 0 {
            return Err(ConfigError::Invalid("move_quality_percent must not be negative".into()));
        }

        if self.search.check_interval == 0 {
            return Err(ConfigError::Invalid("check_interval must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
