//! Game tuning knobs, persisted as TOML.
//!
//! Every field has a default, so an empty file (or no file) plays the
//! standard game. The CLI overrides individual fields after loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Lower bound of the base question total.
pub const MIN_TOTAL_QUESTIONS: usize = 5;
/// Upper bound of the base question total.
pub const MAX_TOTAL_QUESTIONS: usize = 18;

/// Per-game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Base number of questions before the game may stop on its own.
    #[serde(default = "default_total_questions")]
    pub total_questions: usize,
    /// Extra tie-break questions allowed beyond the base total.
    #[serde(default = "default_tiebreak_extra")]
    pub tiebreak_extra: usize,
    /// Size of the top slice of the ranking used to score questions.
    #[serde(default = "default_focus_size")]
    pub focus_size: usize,
    /// Score distance under which two candidates are a perfect tie.
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f64,
    /// Questions required before a perfect tie ends the game.
    #[serde(default = "default_tie_min_questions")]
    pub tie_min_questions: usize,
    /// Gap under which tie-break questions are asked past the base total.
    #[serde(default = "default_tiebreak_gap")]
    pub tiebreak_gap: f64,
    /// Gap over which the game stops early.
    #[serde(default = "default_early_stop_gap")]
    pub early_stop_gap: f64,
    #[serde(default = "default_early_stop_min_questions")]
    pub early_stop_min_questions: usize,
    /// Slack around structural thresholds in the compatibility filter.
    #[serde(default = "default_structural_margin")]
    pub structural_margin: f64,
    /// Minimum survivors of the structural filter before it is bypassed.
    #[serde(default = "default_min_filtered_candidates")]
    pub min_filtered_candidates: usize,
    /// Candidates reported alongside a normal prediction.
    #[serde(default = "default_alternates")]
    pub alternates: usize,
}

fn default_total_questions() -> usize {
    15
}
fn default_tiebreak_extra() -> usize {
    3
}
fn default_focus_size() -> usize {
    60
}
fn default_tie_epsilon() -> f64 {
    0.001
}
fn default_tie_min_questions() -> usize {
    5
}
fn default_tiebreak_gap() -> f64 {
    2.5
}
fn default_early_stop_gap() -> f64 {
    4.0
}
fn default_early_stop_min_questions() -> usize {
    7
}
fn default_structural_margin() -> f64 {
    0.4
}
fn default_min_filtered_candidates() -> usize {
    5
}
fn default_alternates() -> usize {
    3
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_questions: default_total_questions(),
            tiebreak_extra: default_tiebreak_extra(),
            focus_size: default_focus_size(),
            tie_epsilon: default_tie_epsilon(),
            tie_min_questions: default_tie_min_questions(),
            tiebreak_gap: default_tiebreak_gap(),
            early_stop_gap: default_early_stop_gap(),
            early_stop_min_questions: default_early_stop_min_questions(),
            structural_margin: default_structural_margin(),
            min_filtered_candidates: default_min_filtered_candidates(),
            alternates: default_alternates(),
        }
    }
}

impl GameConfig {
    /// Base question total, clamped to the playable range.
    pub fn total_questions(&self) -> usize {
        self.total_questions
            .clamp(MIN_TOTAL_QUESTIONS, MAX_TOTAL_QUESTIONS)
    }

    /// Hard cap including tie-break questions.
    pub fn max_questions(&self) -> usize {
        self.total_questions() + self.tiebreak_extra
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, path)
    }

    fn from_toml_str(content: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
