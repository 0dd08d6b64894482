use serde::{Deserialize, Serialize};

use crate::signal::error::{ensure_sample_rate, AnalysisError};
use crate::types::Sample;

/// Raw amplitudes of one electrode, ready for spectral and artifact analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelWindow {
    pub label: String,
    pub sample_rate_hz: f64,
    pub samples: Vec<f64>,
}

impl ChannelWindow {
    pub fn new(
        label: impl Into<String>,
        sample_rate_hz: f64,
        samples: Vec<f64>,
    ) -> Result<Self, AnalysisError> {
        ensure_sample_rate(sample_rate_hz)?;
        Ok(Self {
            label: label.into(),
            sample_rate_hz,
            samples,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }
}

/// Ordered band samples for the active view. Appended to during simulation,
/// replaced wholesale when a new recording is loaded.
#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn push_batch(&mut self, batch: impl IntoIterator<Item = Sample>) {
        self.samples.extend(batch);
    }

    pub fn replace(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
    }

    pub fn last_time(&self) -> Option<i64> {
        self.samples.last().map(|s| s.time)
    }

    /// The `count` most recent samples (all of them if fewer are held).
    pub fn recent(&self, count: usize) -> &[Sample] {
        let start = self.samples.len().saturating_sub(count);
        &self.samples[start..]
    }

    /// Scenario label carried by the first sample, if the source tagged one.
    pub fn scenario_label(&self) -> Option<&str> {
        self.samples.first().and_then(|s| s.scenario.as_deref())
    }

    /// Electrodes present on every sample.
    pub fn raw_channel_count(&self) -> usize {
        self.samples
            .iter()
            .map(|s| s.channel_raw.as_ref().map_or(0, Vec::len))
            .min()
            .unwrap_or(0)
    }

    /// Extracts electrode `index` from every sample's raw vector.
    pub fn channel_window(
        &self,
        index: usize,
        sample_rate_hz: f64,
    ) -> Result<ChannelWindow, AnalysisError> {
        if self.samples.is_empty() {
            return Err(AnalysisError::empty("sample buffer"));
        }
        let samples = self
            .samples
            .iter()
            .map(|s| {
                s.channel_raw
                    .as_ref()
                    .and_then(|raw| raw.get(index).copied())
                    .ok_or(AnalysisError::MissingChannel {
                        index,
                        time: s.time,
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        ChannelWindow::new(format!("Ch {index}"), sample_rate_hz, samples)
    }
}
