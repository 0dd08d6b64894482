use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::signal::AnalysisError;

/// How DFT bin indices are turned into Hz.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinScaling {
    /// `k * fs / len(signal)` even when the transform only saw the capped window.
    /// Keeps historical chart labels stable.
    #[default]
    SignalLength,
    /// `k * fs / N` with N the capped window length.
    WindowLength,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectralMethod {
    /// Direct O(N²) transform.
    #[default]
    DirectDft,
    /// rustfft over the same window; identical bins, faster on long windows.
    Fft,
}

/// Tunables for one analysis session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples fed to the transform; longer signals are truncated.
    pub max_transform_samples: usize,
    pub bin_scaling: BinScaling,
    pub spectral_method: SpectralMethod,
    /// Upper frequency for dominant-frequency and peak searches.
    pub spectrum_max_hz: f64,
    pub peak_threshold: f64,
    pub max_peaks: usize,
    /// Most recent band samples used for statistics and ratios.
    pub pattern_window: usize,
    /// Sources whose recordings earn the trusted-ingestion confidence bonus.
    pub trusted_sources: Vec<String>,
    /// Fewer channels than this costs confidence.
    pub min_channels: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_transform_samples: 1024,
            bin_scaling: BinScaling::default(),
            spectral_method: SpectralMethod::default(),
            spectrum_max_hz: 50.0,
            peak_threshold: 0.1,
            max_peaks: 5,
            pattern_window: 50,
            trusted_sources: vec!["PhysioNet".to_owned()],
            min_channels: 8,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, AnalysisError> {
        let config: AnalysisConfig =
            serde_json::from_str(raw).map_err(|e| AnalysisError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.max_transform_samples == 0 {
            return Err(AnalysisError::Config(
                "max_transform_samples must be at least 1".into(),
            ));
        }
        if self.pattern_window == 0 {
            return Err(AnalysisError::Config("pattern_window must be at least 1".into()));
        }
        if !(self.spectrum_max_hz.is_finite() && self.spectrum_max_hz > 0.0) {
            return Err(AnalysisError::Config(
                "spectrum_max_hz must be a positive number".into(),
            ));
        }
        Ok(())
    }

    pub fn is_trusted_source(&self, source: Option<&str>) -> bool {
        source.is_some_and(|s| self.trusted_sources.iter().any(|t| t == s))
    }
}
