//! Engine configuration
//!
//! Tuning knobs for hit-testing, path sampling and line grouping, stored in TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ScanError;

/// Selection engine settings; missing keys take their defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extra pixels around each word box that still count as a hit
    pub hit_padding: f64,
    /// Spacing, in pixels, between interpolated samples of a drag
    pub sample_step: f64,
    /// Lower bound of the line-grouping tolerance
    pub line_tolerance_min: f64,
    /// Line-grouping tolerance as a share of the median word height
    pub line_tolerance_ratio: f64,
    /// Line tolerance, as a share of the tallest word, when ordering one drag's hits
    pub batch_line_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hit_padding: 1.0,
            sample_step: 1.0,
            line_tolerance_min: 6.0,
            line_tolerance_ratio: 0.5,
            batch_line_ratio: 0.3,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ScanError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ScanError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ScanError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        let finite = [
            self.hit_padding,
            self.sample_step,
            self.line_tolerance_min,
            self.line_tolerance_ratio,
            self.batch_line_ratio,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(ScanError::Config("values must be finite".to_string()));
        }
        if self.sample_step <= 0.0 {
            return Err(ScanError::Config("sample_step must be positive".to_string()));
        }
        if self.hit_padding < 0.0 {
            return Err(ScanError::Config("hit_padding cannot be negative".to_string()));
        }
        if self.line_tolerance_min < 0.0
            || self.line_tolerance_ratio < 0.0
            || self.batch_line_ratio < 0.0
        {
            return Err(ScanError::Config("line tolerances cannot be negative".to_string()));
        }
        Ok(())
    }

    /// Vertical distance within which two word centers share a line
    pub fn line_tolerance(&self, median_height: f64) -> f64 {
        self.line_tolerance_min.max(median_height * self.line_tolerance_ratio)
    }
}
