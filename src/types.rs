// src/types.rs
use serde::{Deserialize, Serialize};

/// Canonical EEG frequency bands, in the order every table and chart uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// 0.5-4 Hz
    Delta,
    /// 4-8 Hz
    Theta,
    /// 8-12 Hz
    Alpha,
    /// 12-30 Hz
    Beta,
    /// 30-50 Hz
    Gamma,
}

impl Band {
    pub const ALL: [Band; 5] = [Band::Delta, Band::Theta, Band::Alpha, Band::Beta, Band::Gamma];

    /// Inclusive analysis range in Hz.
    pub const fn range_hz(self) -> (f64, f64) {
        match self {
            Band::Delta => (0.5, 4.0),
            Band::Theta => (4.0, 8.0),
            Band::Alpha => (8.0, 12.0),
            Band::Beta => (12.0, 30.0),
            Band::Gamma => (30.0, 50.0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Band::Delta => "Delta",
            Band::Theta => "Theta",
            Band::Alpha => "Alpha",
            Band::Beta => "Beta",
            Band::Gamma => "Gamma",
        }
    }

    /// Chart color shared by every view of this band.
    pub const fn display_color(self) -> &'static str {
        match self {
            Band::Delta => "#F44336",
            Band::Theta => "#9C27B0",
            Band::Alpha => "#4CAF50",
            Band::Beta => "#2196F3",
            Band::Gamma => "#FF9800",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Band::Delta => (0xF4, 0x43, 0x36),
            Band::Theta => (0x9C, 0x27, 0xB0),
            Band::Alpha => (0x4C, 0xAF, 0x50),
            Band::Beta => (0x21, 0x96, 0xF3),
            Band::Gamma => (0xFF, 0x98, 0x00),
        }
    }

    /// Centre of the band, used when a raw trace is rebuilt from band values.
    pub fn center_hz(self) -> f64 {
        let (low, high) = self.range_hz();
        (low + high) / 2.0
    }

    /// Peak labelling: half-open ranges except gamma, which includes 50 Hz.
    /// Frequencies outside 0.5-50 Hz have no band.
    pub fn classify(frequency_hz: f64) -> Option<Band> {
        if (0.5..4.0).contains(&frequency_hz) {
            Some(Band::Delta)
        } else if (4.0..8.0).contains(&frequency_hz) {
            Some(Band::Theta)
        } else if (8.0..12.0).contains(&frequency_hz) {
            Some(Band::Alpha)
        } else if (12.0..30.0).contains(&frequency_hz) {
            Some(Band::Beta)
        } else if (30.0..=50.0).contains(&frequency_hz) {
            Some(Band::Gamma)
        } else {
            None
        }
    }
}

/// One value per band (µV²-like magnitudes for samples, powers elsewhere).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BandValues {
    pub delta: f64,
    pub theta: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl BandValues {
    pub fn get(&self, band: Band) -> f64 {
        match band {
            Band::Delta => self.delta,
            Band::Theta => self.theta,
            Band::Alpha => self.alpha,
            Band::Beta => self.beta,
            Band::Gamma => self.gamma,
        }
    }

    pub fn set(&mut self, band: Band, value: f64) {
        match band {
            Band::Delta => self.delta = value,
            Band::Theta => self.theta = value,
            Band::Alpha => self.alpha = value,
            Band::Beta => self.beta = value,
            Band::Gamma => self.gamma = value,
        }
    }

    pub fn total(&self) -> f64 {
        Band::ALL.iter().map(|b| self.get(*b)).sum()
    }
}

/// Single time-stamped reading of the five-band decomposition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub time: i64,
    pub bands: BandValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Raw amplitudes across electrodes at this instant, when the source has them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_raw: Option<Vec<f64>>,
}

impl Sample {
    pub fn new(time: i64, bands: BandValues) -> Self {
        Self {
            time,
            bands,
            scenario: None,
            channel_raw: None,
        }
    }

    pub fn with_scenario(mut self, label: impl Into<String>) -> Self {
        self.scenario = Some(label.into());
        self
    }

    pub fn with_channel_raw(mut self, raw: Vec<f64>) -> Self {
        self.channel_raw = Some(raw);
        self
    }
}

/// What the ingestion side knows about a recording.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingMetadata {
    pub source: Option<String>,
    /// Parser code such as `physionet_sleep`.
    pub dataset_type: Option<String>,
    /// Human study label such as `Sleep Study` or `Seizure Detection`.
    #[serde(default)]
    pub study_type: Option<String>,
    pub subjects: Option<String>,
    pub sampling_rate_hz: Option<f64>,
    pub channels: Option<usize>,
}

impl RecordingMetadata {
    pub fn synthetic() -> Self {
        Self {
            source: Some("Synthetic".into()),
            dataset_type: Some("Simulated EEG".into()),
            ..Default::default()
        }
    }
}
