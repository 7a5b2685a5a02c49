//! Analysis configuration.
//!
//! Every threshold the analysis uses lives here with a documented default.
//! The defaults are conventions, not fitted values. A TOML file may override
//! any subset:
//!
//! ```toml
//! [bands]
//! high = 0.75
//!
//! [cache]
//! max_size = 0   # disable the result cache
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ReviewError, ReviewResult};

/// Label bands applied to every score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBands {
    /// Scores at or above this get the high-band label (default 0.7)
    pub high: f64,
    /// Scores at or below this get the low-band label (default 0.3)
    pub low: f64,
}

impl Default for ScoreBands {
    fn default() -> Self {
        Self {
            high: 0.7,
            low: 0.3,
        }
    }
}

/// Threshold for turning a score into a state bit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// A score at or above this sets its bit (default 0.5)
    pub threshold: f64,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

/// Clause length band in which readability is maximal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityBand {
    /// Default 8
    pub min_tokens: usize,
    /// Default 60
    pub max_tokens: usize,
}

impl Default for ReadabilityBand {
    fn default() -> Self {
        Self {
            min_tokens: 8,
            max_tokens: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached results; 0 disables caching (default 256)
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_size: 256 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Entries retained by [`AnalysisHistory`](crate::AnalysisHistory) (default 50)
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 50 }
    }
}

/// Complete configuration for a [`ClauseAnalyzer`](crate::ClauseAnalyzer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub bands: ScoreBands,
    pub state: StateConfig,
    pub readability: ReadabilityBand,
    pub cache: CacheConfig,
    pub history: HistoryConfig,
}

impl AnalysisConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> ReviewResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ReviewError::Config {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate("<inline>")
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ReviewResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ReviewError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ReviewError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate(&path.display().to_string())
    }

    fn validate(self, path: &str) -> ReviewResult<Self> {
        let invalid = |message: String| ReviewError::Config {
            path: path.to_string(),
            message,
        };

        let in_unit = |x: f64| (0.0..=1.0).contains(&x);
        if !in_unit(self.bands.low) || !in_unit(self.bands.high) || self.bands.low > self.bands.high
        {
            return Err(invalid(format!(
                "bands must satisfy 0 <= low <= high <= 1, got low={} high={}",
                self.bands.low, self.bands.high
            )));
        }
        if !in_unit(self.state.threshold) {
            return Err(invalid(format!(
                "state.threshold must be within [0, 1], got {}",
                self.state.threshold
            )));
        }
        if self.readability.min_tokens == 0
            || self.readability.min_tokens > self.readability.max_tokens
        {
            return Err(invalid(format!(
                "readability band must satisfy 0 < min_tokens <= max_tokens, got {}..{}",
                self.readability.min_tokens, self.readability.max_tokens
            )));
        }

        Ok(self)
    }

    pub fn with_bands(mut self, high: f64, low: f64) -> Self {
        self.bands = ScoreBands { high, low };
        self
    }

    pub fn with_state_threshold(mut self, threshold: f64) -> Self {
        self.state.threshold = threshold;
        self
    }

    /// Set the result cache size; 0 disables caching.
    pub fn with_cache_size(mut self, max_size: usize) -> Self {
        self.cache.max_size = max_size;
        self
    }

    pub fn with_history_size(mut self, max_entries: usize) -> Self {
        self.history.max_entries = max_entries;
        self
    }
}
