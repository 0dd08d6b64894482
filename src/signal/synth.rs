//! Synthetic recordings for demos and tests.
//!
//! Two flavours, matching the two representations the analysis works on:
//! five-band samples for the live view, and raw multi-channel traces shaped after
//! the public datasets the platform showcases.
use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;
use crate::signal::buffer::ChannelWindow;
use crate::types::{BandValues, RecordingMetadata, Sample};

/// One live-view sample at index `i`: slow sinusoids around typical band levels plus
/// uniform jitter.
pub fn synthetic_band_sample<R: Rng + ?Sized>(i: i64, rng: &mut R) -> Sample {
    let t = i as f64;
    let bands = BandValues {
        alpha: (t * 0.1).sin() * 10.0 + 20.0 + rng.gen::<f64>() * 5.0,
        beta: (t * 0.05 + 1.0).sin() * 15.0 + 30.0 + rng.gen::<f64>() * 7.0,
        theta: (t * 0.07 + 2.0).sin() * 8.0 + 15.0 + rng.gen::<f64>() * 4.0,
        delta: (t * 0.03 + 3.0).sin() * 12.0 + 25.0 + rng.gen::<f64>() * 6.0,
        gamma: (t * 0.15 + 4.0).sin() * 5.0 + 10.0 + rng.gen::<f64>() * 3.0,
    };
    Sample::new(i, bands)
}

pub fn synthetic_band_samples<R: Rng + ?Sized>(
    start: i64,
    count: usize,
    rng: &mut R,
) -> Vec<Sample> {
    (start..start + count as i64)
        .map(|i| synthetic_band_sample(i, rng))
        .collect()
}

/// Dataset shapes the platform can simulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    /// Motor movement/imagery: mu rhythm with a beta component.
    MotorImagery,
    /// Sleep cassette: 1 Hz slow waves with intermittent 12 Hz spindles.
    Sleep,
    /// Scalp seizure recordings: 8 Hz background with sporadic spikes.
    Seizure,
    /// Mental arithmetic: theta with a gamma component.
    MentalArithmetic,
    Generic,
}

impl DatasetKind {
    pub const fn dataset_id(self) -> &'static str {
        match self {
            DatasetKind::MotorImagery => "eegmmidb",
            DatasetKind::Sleep => "sleep-edfx",
            DatasetKind::Seizure => "chbmit",
            DatasetKind::MentalArithmetic => "eegmat",
            DatasetKind::Generic => "generic",
        }
    }

    pub const fn study_type(self) -> &'static str {
        match self {
            DatasetKind::MotorImagery => "Motor Imagery",
            DatasetKind::Sleep => "Sleep Study",
            DatasetKind::Seizure => "Seizure Detection",
            DatasetKind::MentalArithmetic => "Mental Arithmetic",
            DatasetKind::Generic => "General EEG",
        }
    }

    /// Closest analysis scenario for the dataset.
    pub const fn scenario(self) -> Scenario {
        match self {
            DatasetKind::MotorImagery => Scenario::MotorImagery,
            DatasetKind::Sleep => Scenario::SleepStudy,
            DatasetKind::MentalArithmetic => Scenario::MentalState,
            DatasetKind::Seizure | DatasetKind::Generic => Scenario::RealEegData,
        }
    }

    pub fn channel_names(self, count: usize) -> Vec<String> {
        const STANDARD: [&str; 10] = ["Fp1", "Fp2", "F3", "F4", "C3", "C4", "P3", "P4", "O1", "O2"];
        const SLEEP: [&str; 8] = [
            "Fpz-Cz", "Pz-Oz", "EOG-L", "EOG-R", "EMG-Chin", "Airflow", "Thor", "Abdo",
        ];
        const SEIZURE: [&str; 8] = [
            "FP1-F7", "F7-T7", "T7-P7", "P7-O1", "FP1-F3", "F3-C3", "C3-P3", "P3-O1",
        ];
        let names: &[&str] = match self {
            DatasetKind::Sleep => &SLEEP,
            DatasetKind::Seizure => &SEIZURE,
            _ => &STANDARD,
        };
        names.iter().take(count).map(|s| (*s).to_owned()).collect()
    }

    /// Noise-free amplitude at time `t` seconds. Seizure spikes draw from `rng`.
    fn amplitude<R: Rng + ?Sized>(self, t: f64, rng: &mut R) -> f64 {
        let tone = |freq: f64| (2.0 * PI * freq * t).sin();
        match self {
            DatasetKind::MotorImagery => {
                tone(10.0) * (20.0 + 5.0 * (0.1 * t).sin()) + tone(20.0) * 12.0
            }
            DatasetKind::Sleep => {
                let spindle = if (0.5 * t).sin() > 0.7 { 1.0 } else { 0.0 };
                tone(1.0) * 60.0 + tone(12.0) * 15.0 * spindle
            }
            DatasetKind::Seizure => {
                let spike = if rng.gen::<f64>() > 0.95 {
                    100.0 * (-((t % 1.0) * 10.0).powi(2)).exp()
                } else {
                    0.0
                };
                tone(8.0) * 25.0 + spike
            }
            DatasetKind::MentalArithmetic => tone(6.0) * 30.0 + tone(35.0) * 8.0,
            DatasetKind::Generic => tone(10.0) * 20.0,
        }
    }
}

/// Parameters of a simulated recording.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    pub kind: DatasetKind,
    pub sample_rate_hz: f64,
    pub channels: usize,
    pub duration_seconds: f64,
}

impl DatasetProfile {
    pub fn new(
        kind: DatasetKind,
        sample_rate_hz: f64,
        channels: usize,
        duration_seconds: f64,
    ) -> Self {
        Self {
            kind,
            sample_rate_hz,
            channels,
            duration_seconds,
        }
    }
}

/// Multi-channel recording plus the metadata an ingestion path would report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub channels: Vec<ChannelWindow>,
    pub metadata: RecordingMetadata,
}

impl Recording {
    /// Flattens the channels into band-free samples carrying `channel_raw`, so a
    /// session buffer can hold them. Band values are left at zero; use the adapter
    /// when a band decomposition is needed.
    pub fn to_samples(&self) -> Vec<Sample> {
        let len = self.channels.iter().map(ChannelWindow::len).min().unwrap_or(0);
        (0..len)
            .map(|i| {
                let raw = self.channels.iter().map(|c| c.samples[i]).collect();
                Sample::new(i as i64, BandValues::default()).with_channel_raw(raw)
            })
            .collect()
    }
}

/// Each channel gets the dataset waveform plus ±4 µV uniform noise and a slow 0.05 Hz drift.
pub fn synthesize_recording<R: Rng + ?Sized>(profile: &DatasetProfile, rng: &mut R) -> Recording {
    let len = (profile.duration_seconds * profile.sample_rate_hz).round().max(0.0) as usize;
    let names = profile.kind.channel_names(profile.channels);
    let channels = names
        .into_iter()
        .map(|label| {
            let samples = (0..len)
                .map(|i| {
                    let t = i as f64 / profile.sample_rate_hz;
                    let noise = (rng.gen::<f64>() - 0.5) * 8.0;
                    let drift = (2.0 * PI * 0.05 * t).sin() * 3.0;
                    profile.kind.amplitude(t, rng) + noise + drift
                })
                .collect();
            ChannelWindow {
                label,
                sample_rate_hz: profile.sample_rate_hz,
                samples,
            }
        })
        .collect::<Vec<_>>();
    let metadata = RecordingMetadata {
        source: Some("Synthetic".into()),
        dataset_type: Some(profile.kind.dataset_id().into()),
        study_type: Some(profile.kind.study_type().into()),
        subjects: None,
        sampling_rate_hz: Some(profile.sample_rate_hz),
        channels: Some(channels.len()),
    };
    Recording { channels, metadata }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn band_samples_are_deterministic_for_a_seed() {
        let a = synthetic_band_samples(0, 20, &mut StdRng::seed_from_u64(7));
        let b = synthetic_band_samples(0, 20, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.last().map(|s| s.time), Some(19));
    }
    #[test]
    fn band_samples_stay_near_typical_levels() {
        let samples = synthetic_band_samples(0, 200, &mut StdRng::seed_from_u64(1));
        for s in &samples {
            assert!((10.0..=35.0).contains(&s.bands.alpha));
            assert!((5.0..=20.0).contains(&s.bands.gamma));
        }
    }
    #[test]
    fn channel_count_is_limited_by_names() {
        assert_eq!(DatasetKind::Sleep.channel_names(20).len(), 8);
        assert_eq!(DatasetKind::Generic.channel_names(4), vec!["Fp1", "Fp2", "F3", "F4"]);
    }
    #[test]
    fn recording_has_requested_shape() {
        let profile = DatasetProfile::new(DatasetKind::MotorImagery, 160.0, 4, 2.0);
        let recording = synthesize_recording(&profile, &mut StdRng::seed_from_u64(3));
        assert_eq!(recording.channels.len(), 4);
        assert!(recording.channels.iter().all(|c| c.len() == 320));
        assert_eq!(recording.metadata.channels, Some(4));
        let samples = recording.to_samples();
        assert_eq!(samples.len(), 320);
        assert_eq!(samples[5].channel_raw.as_ref().map(Vec::len), Some(4));
    }
}
