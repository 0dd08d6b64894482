// src/session.rs
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::assessment::{assess, Assessment, AssessmentInput, BandRatios, PatternFeatures};
use crate::config::AnalysisConfig;
use crate::scenario::Scenario;
use crate::signal::{
    analyze_spectrum, band_power_from_spectrum, compute_signal_statistics, detect_artifacts,
    AnalysisError, BandStatsSet, ChannelWindow, SampleBuffer, SampleSource, SignalStatistics,
    SpectralAnalysis, Spectrum, SpectrumBuilder,
};
use crate::types::{RecordingMetadata, Sample};

/// One channel's spectrum view, raw statistics and assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAnalysis {
    pub channel: String,
    pub sample_rate_hz: f64,
    pub spectral_analysis: Option<SpectralAnalysis>,
    pub statistics: Option<SignalStatistics>,
    pub assessment: Assessment,
}

impl ChannelAnalysis {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Owns the band-sample buffer and everything needed to assess it. One per view.
pub struct AnalysisSession {
    buffer: SampleBuffer,
    metadata: RecordingMetadata,
    scenario: Scenario,
    config: AnalysisConfig,
    builder: SpectrumBuilder,
}

impl AnalysisSession {
    pub fn new(config: AnalysisConfig, scenario: Scenario) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            buffer: SampleBuffer::new(),
            metadata: RecordingMetadata::default(),
            scenario,
            builder: SpectrumBuilder::from_config(&config),
            config,
        })
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.scenario = scenario;
    }

    pub fn metadata(&self) -> &RecordingMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Replaces the buffer with a loaded recording. A scenario label carried by the
    /// samples overrides the current scenario; without one the metadata's dataset
    /// code decides, and with neither the scenario is left alone.
    pub fn load(&mut self, samples: Vec<Sample>, metadata: RecordingMetadata) {
        debug!(
            "loading {} samples from {}",
            samples.len(),
            metadata.source.as_deref().unwrap_or("unknown source")
        );
        self.buffer.replace(samples);
        self.metadata = metadata;
        if let Some(label) = self.buffer.scenario_label() {
            self.scenario = Scenario::from_label(label);
        } else if let Some(code) = self.metadata.dataset_type.as_deref() {
            self.scenario = Scenario::from_dataset_type(code);
        }
    }

    /// Appends the next batch from `source`. Returns how many samples arrived, or
    /// `None` once the source is exhausted.
    pub fn pump_once<S: SampleSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<usize>, AnalysisError> {
        let Some(batch) = source.next_batch()? else {
            return Ok(None);
        };
        let count = batch.len();
        self.buffer.push_batch(batch);
        Ok(Some(count))
    }

    /// Statistics and ratios over the most recent `pattern_window` samples.
    pub fn features(&self) -> Result<PatternFeatures, AnalysisError> {
        let window = self.buffer.recent(self.config.pattern_window);
        let stats = BandStatsSet::from_samples(window)?;
        Ok(PatternFeatures {
            ratios: BandRatios::from_stats(&stats),
            stats,
            band_power: None,
        })
    }

    /// Raw window for electrode `index` of the buffered samples, at the recording's rate.
    pub fn channel_window(&self, index: usize) -> Result<ChannelWindow, AnalysisError> {
        let rate = self.metadata.sampling_rate_hz.ok_or_else(|| {
            AnalysisError::InvalidInput("recording metadata has no sampling rate".into())
        })?;
        self.buffer.channel_window(index, rate)
    }

    fn spectrum(&self, window: &ChannelWindow) -> Result<Spectrum, AnalysisError> {
        self.builder.compute(&window.samples, window.sample_rate_hz)
    }

    pub fn spectral_analysis(
        &self,
        window: &ChannelWindow,
    ) -> Result<SpectralAnalysis, AnalysisError> {
        Ok(analyze_spectrum(&self.spectrum(window)?, &self.config))
    }

    pub fn try_analyze(&self, window: &ChannelWindow) -> Result<Assessment, AnalysisError> {
        let spectrum = self.spectrum(window)?;
        self.assess_spectrum(window, &spectrum)
    }

    fn assess_spectrum(
        &self,
        window: &ChannelWindow,
        spectrum: &Spectrum,
    ) -> Result<Assessment, AnalysisError> {
        let features = self.features()?;
        let band_power = band_power_from_spectrum(spectrum);
        let quality = detect_artifacts(&window.samples, window.sample_rate_hz)?;
        Ok(assess(
            AssessmentInput {
                stats: &features.stats,
                band_power: &band_power,
                quality: &quality,
                scenario: self.scenario,
                metadata: &self.metadata,
            },
            &self.config,
        ))
    }

    /// Full pipeline over `window`. Failures come back as a degraded assessment
    /// carrying the error text.
    pub fn analyze(&self, window: &ChannelWindow) -> Assessment {
        self.try_analyze(window).unwrap_or_else(|err| {
            warn!("analysis of {} failed: {err}", window.label);
            Assessment::failed(self.scenario, err.to_string())
        })
    }

    /// Spectrum, raw statistics and assessment for one channel from a single transform.
    pub fn try_analyze_channel(
        &self,
        window: &ChannelWindow,
    ) -> Result<ChannelAnalysis, AnalysisError> {
        let spectrum = self.spectrum(window)?;
        Ok(ChannelAnalysis {
            channel: window.label.clone(),
            sample_rate_hz: window.sample_rate_hz,
            spectral_analysis: Some(analyze_spectrum(&spectrum, &self.config)),
            statistics: Some(compute_signal_statistics(&window.samples)?),
            assessment: self.assess_spectrum(window, &spectrum)?,
        })
    }

    /// Like [`Self::try_analyze_channel`] but never fails: the spectrum and statistics
    /// are dropped and the assessment carries the error text.
    pub fn analyze_channel(&self, window: &ChannelWindow) -> ChannelAnalysis {
        self.try_analyze_channel(window).unwrap_or_else(|err| {
            warn!("channel analysis of {} failed: {err}", window.label);
            ChannelAnalysis {
                channel: window.label.clone(),
                sample_rate_hz: window.sample_rate_hz,
                spectral_analysis: None,
                statistics: None,
                assessment: Assessment::failed(self.scenario, err.to_string()),
            }
        })
    }
}
