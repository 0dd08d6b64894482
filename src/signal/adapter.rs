//! Conversions between the two signal representations.
//!
//! Spectral and artifact analysis need a raw time-domain window; trend and ratio
//! analysis need the five-band decomposition. Neither is derivable from the other
//! without loss, so every crossing goes through one of these functions explicitly.
use std::f64::consts::PI;

use crate::signal::bandpower::band_power_from_spectrum;
use crate::signal::buffer::ChannelWindow;
use crate::signal::error::AnalysisError;
use crate::signal::fft::SpectrumBuilder;
use crate::types::{Band, BandValues, Sample};

/// Splits a raw window into consecutive frames of `frame_len` samples and turns each
/// frame into one band sample holding absolute band power. A trailing partial frame
/// is dropped.
pub fn bands_from_signal(
    window: &ChannelWindow,
    frame_len: usize,
    builder: &SpectrumBuilder,
) -> Result<Vec<Sample>, AnalysisError> {
    if frame_len < 2 {
        return Err(AnalysisError::InvalidInput(format!(
            "frame length {frame_len} is too short for a spectrum"
        )));
    }
    if window.samples.len() < frame_len {
        return Err(AnalysisError::InvalidInput(format!(
            "window of {} samples is shorter than one frame of {frame_len}",
            window.samples.len()
        )));
    }
    window
        .samples
        .chunks_exact(frame_len)
        .enumerate()
        .map(|(i, frame)| {
            let spectrum = builder.compute(frame, window.sample_rate_hz)?;
            let summary = band_power_from_spectrum(&spectrum);
            let mut bands = BandValues::default();
            for power in &summary.bands {
                bands.set(power.band, power.absolute_power);
            }
            Ok(Sample::new(i as i64, bands))
        })
        .collect()
}

/// Rebuilds an approximate trace from band samples: each sample contributes one
/// time step, each band a sinusoid at its centre frequency with amplitude
/// `sqrt(max(value, 0))`.
pub fn signal_from_bands(
    label: impl Into<String>,
    samples: &[Sample],
    sample_rate_hz: f64,
) -> Result<ChannelWindow, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::empty("band sample window"));
    }
    let values: Vec<f64> = samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let t = i as f64 / sample_rate_hz;
            Band::ALL
                .iter()
                .map(|&band| {
                    let amplitude = sample.bands.get(band).max(0.0).sqrt();
                    amplitude * (2.0 * PI * band.center_hz() * t).sin()
                })
                .sum::<f64>()
        })
        .collect();
    ChannelWindow::new(label, sample_rate_hz, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfig, BinScaling};

    fn builder() -> SpectrumBuilder {
        SpectrumBuilder::from_config(&AnalysisConfig::default())
            .with_scaling(BinScaling::WindowLength)
    }

    #[test]
    fn frames_become_band_samples() {
        let samples: Vec<f64> = (0..256)
            .map(|i| 10.0 * (2.0 * PI * 10.0 * i as f64 / 64.0).sin())
            .collect();
        let window = ChannelWindow::new("O1", 64.0, samples).unwrap();
        let bands = bands_from_signal(&window, 64, &builder()).unwrap();
        assert_eq!(bands.len(), 4);
        for sample in &bands {
            assert!((sample.bands.alpha - 25.0).abs() < 1e-6);
            assert!(sample.bands.delta < 1e-9);
        }
    }
    #[test]
    fn short_window_is_rejected() {
        let window = ChannelWindow::new("O1", 64.0, vec![0.0; 10]).unwrap();
        assert!(bands_from_signal(&window, 64, &builder()).is_err());
    }
    #[test]
    fn reconstruction_keeps_length_and_rate() {
        let samples: Vec<Sample> = (0..32)
            .map(|i| {
                let mut bands = BandValues::default();
                bands.alpha = 16.0;
                bands.delta = -4.0;
                Sample::new(i, bands)
            })
            .collect();
        let window = signal_from_bands("recon", &samples, 128.0).unwrap();
        assert_eq!(window.len(), 32);
        assert_eq!(window.sample_rate_hz, 128.0);
        // negative band values contribute nothing; alpha amplitude is 4
        assert!(window.samples.iter().all(|v| v.abs() <= 4.0 + 1e-9));
    }
}
