use std::f64::consts::PI;

use log::debug;
use rustfft::{num_complex::Complex64, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, BinScaling, SpectralMethod};
use crate::signal::error::{ensure_finite, ensure_sample_rate, AnalysisError};
use crate::types::Band;

/// Non-negative half of a magnitude spectrum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spectrum {
    pub sample_rate_hz: f64,
    /// Samples that went into the transform (capped).
    pub window_len: usize,
    /// Length of the signal handed in, before capping.
    pub signal_len: usize,
    pub frequencies_hz: Vec<f64>,
    /// |X[k]| / N
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Bins from 0 Hz up to and including `max_hz`.
    pub fn bins_up_to(&self, max_hz: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies_hz
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
            .take_while(move |(f, _)| *f <= max_hz)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominantFrequency {
    pub frequency_hz: f64,
    pub magnitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectralPeak {
    pub frequency_hz: f64,
    pub magnitude: f64,
    /// `None` when the peak sits outside 0.5-50 Hz.
    pub band: Option<Band>,
}

/// One row of the 0..max_hz spectrum table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectralPoint {
    pub frequency: f64,
    pub magnitude: f64,
    pub power: f64,
}

/// Everything the spectrum view shows for one channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectralAnalysis {
    pub spectral_data: Vec<SpectralPoint>,
    pub dominant_frequency: DominantFrequency,
    pub spectral_peaks: Vec<SpectralPeak>,
}

/// Computes magnitude spectra for a given window cap and backend.
#[derive(Clone, Debug)]
pub struct SpectrumBuilder {
    max_samples: usize,
    scaling: BinScaling,
    method: SpectralMethod,
}

impl Default for SpectrumBuilder {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl SpectrumBuilder {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            max_samples: config.max_transform_samples.max(1),
            scaling: config.bin_scaling,
            method: config.spectral_method,
        }
    }

    pub fn with_method(mut self, method: SpectralMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_scaling(mut self, scaling: BinScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn compute(&self, signal: &[f64], sample_rate_hz: f64) -> Result<Spectrum, AnalysisError> {
        ensure_sample_rate(sample_rate_hz)?;
        ensure_finite(signal, "spectral window")?;
        let n = signal.len().min(self.max_samples);
        let window = &signal[..n];
        let magnitudes = match self.method {
            SpectralMethod::DirectDft => direct_dft_magnitudes(window),
            SpectralMethod::Fft => fft_magnitudes(window),
        };
        let divisor = match self.scaling {
            BinScaling::SignalLength => signal.len(),
            BinScaling::WindowLength => n,
        } as f64;
        let frequencies_hz = (0..magnitudes.len())
            .map(|k| k as f64 * sample_rate_hz / divisor)
            .collect();
        if n < signal.len() {
            debug!(
                "spectrum truncated to {n} of {} samples ({:?} bin scaling)",
                signal.len(),
                self.scaling
            );
        }
        Ok(Spectrum {
            sample_rate_hz,
            window_len: n,
            signal_len: signal.len(),
            frequencies_hz,
            magnitudes,
        })
    }
}

/// Default-configured spectrum: direct DFT over at most 1024 samples.
pub fn compute_spectrum(signal: &[f64], sample_rate_hz: f64) -> Result<Spectrum, AnalysisError> {
    SpectrumBuilder::default().compute(signal, sample_rate_hz)
}

fn direct_dft_magnitudes(window: &[f64]) -> Vec<f64> {
    let n = window.len();
    let scale = n as f64;
    (0..n / 2)
        .map(|k| {
            let sum: Complex64 = window
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    let angle = -2.0 * PI * (k * i) as f64 / scale;
                    Complex64::from_polar(x, angle)
                })
                .sum();
            sum.norm() / scale
        })
        .collect()
}

fn fft_magnitudes(window: &[f64]) -> Vec<f64> {
    let n = window.len();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex64> = window.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    fft.process(&mut buffer);
    buffer
        .iter()
        .take(n / 2)
        .map(|c| c.norm() / n as f64)
        .collect()
}

/// Loudest bin within `[0, max_hz]`; ties keep the lower frequency.
/// An all-zero (or empty) spectrum reports 0 Hz with magnitude 0.
pub fn find_dominant_frequency(spectrum: &Spectrum, max_hz: f64) -> DominantFrequency {
    spectrum.bins_up_to(max_hz).fold(
        DominantFrequency {
            frequency_hz: 0.0,
            magnitude: 0.0,
        },
        |best, (frequency_hz, magnitude)| {
            if magnitude > best.magnitude {
                DominantFrequency {
                    frequency_hz,
                    magnitude,
                }
            } else {
                best
            }
        },
    )
}

/// Strict local maxima above `threshold`, loudest first, at most `limit`.
pub fn find_spectral_peaks_with(
    spectrum: &Spectrum,
    max_hz: f64,
    threshold: f64,
    limit: usize,
) -> Vec<SpectralPeak> {
    if spectrum.signal_len < 3 || spectrum.len() < 3 {
        return Vec::new();
    }
    let mags = &spectrum.magnitudes;
    let mut peaks: Vec<SpectralPeak> = (1..mags.len() - 1)
        .take_while(|&i| spectrum.frequencies_hz[i] <= max_hz)
        .filter(|&i| mags[i] > mags[i - 1] && mags[i] > mags[i + 1] && mags[i] > threshold)
        .map(|i| {
            let frequency_hz = spectrum.frequencies_hz[i];
            SpectralPeak {
                frequency_hz,
                magnitude: mags[i],
                band: Band::classify(frequency_hz),
            }
        })
        .collect();
    peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    peaks.truncate(limit);
    peaks
}

/// Peaks with the fixed 0.1 threshold, top five.
pub fn find_spectral_peaks(spectrum: &Spectrum, max_hz: f64) -> Vec<SpectralPeak> {
    find_spectral_peaks_with(spectrum, max_hz, 0.1, 5)
}

pub fn spectral_listing(spectrum: &Spectrum, max_hz: f64) -> Vec<SpectralPoint> {
    spectrum
        .bins_up_to(max_hz)
        .map(|(frequency, magnitude)| SpectralPoint {
            frequency,
            magnitude,
            power: magnitude * magnitude,
        })
        .collect()
}

pub fn analyze_spectrum(spectrum: &Spectrum, config: &AnalysisConfig) -> SpectralAnalysis {
    let max_hz = config.spectrum_max_hz;
    SpectralAnalysis {
        spectral_data: spectral_listing(spectrum, max_hz),
        dominant_frequency: find_dominant_frequency(spectrum, max_hz),
        spectral_peaks: find_spectral_peaks_with(
            spectrum,
            max_hz,
            config.peak_threshold,
            config.max_peaks,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq_hz: f64, amplitude: f64, sample_rate_hz: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate_hz).sin())
            .collect()
    }

    #[test]
    fn empty_signal_is_rejected() {
        assert!(matches!(
            compute_spectrum(&[], 256.0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
    #[test]
    fn bad_sample_rate_is_rejected() {
        assert!(matches!(
            compute_spectrum(&[1.0, 2.0], 0.0),
            Err(AnalysisError::InvalidSampleRate(_))
        ));
    }
    #[test]
    fn returns_half_spectrum_normalized_by_n() {
        let spectrum = compute_spectrum(&[1.0; 8], 8.0).unwrap();
        assert_eq!(spectrum.len(), 4);
        assert!((spectrum.magnitudes[0] - 1.0).abs() < 1e-12);
        assert!(spectrum.magnitudes[1..].iter().all(|m| m.abs() < 1e-9));
    }
    #[test]
    fn sinusoid_lands_on_its_bin_with_half_amplitude() {
        let signal = sine(10.0, 20.0, 160.0, 160);
        let spectrum = compute_spectrum(&signal, 160.0).unwrap();
        assert!((spectrum.frequencies_hz[10] - 10.0).abs() < 1e-12);
        assert!((spectrum.magnitudes[10] - 10.0).abs() < 1e-6);
        let dominant = find_dominant_frequency(&spectrum, 50.0);
        assert!((dominant.frequency_hz - 10.0).abs() <= 1.0);
        let peaks = find_spectral_peaks(&spectrum, 50.0);
        assert_eq!(peaks[0].band, Some(Band::Alpha));
    }
    #[test]
    fn long_signal_keeps_full_length_bin_scaling_by_default() {
        let signal = sine(10.0, 5.0, 256.0, 2048);
        let spectrum = compute_spectrum(&signal, 256.0).unwrap();
        assert_eq!(spectrum.window_len, 1024);
        assert_eq!(spectrum.len(), 512);
        // bin 1 maps to fs / 2048, not fs / 1024
        assert!((spectrum.frequencies_hz[1] - 0.125).abs() < 1e-12);
        let dominant = find_dominant_frequency(&spectrum, 50.0);
        // the 10 Hz tone sits at bin 40, which this scaling labels 5 Hz
        assert!((dominant.frequency_hz - 5.0).abs() < 1e-9);
    }
    #[test]
    fn window_length_scaling_labels_bins_correctly() {
        let signal = sine(10.0, 5.0, 256.0, 2048);
        let spectrum = SpectrumBuilder::default()
            .with_scaling(BinScaling::WindowLength)
            .compute(&signal, 256.0)
            .unwrap();
        let dominant = find_dominant_frequency(&spectrum, 50.0);
        assert!((dominant.frequency_hz - 10.0).abs() < 1e-9);
    }
    #[test]
    fn fft_backend_matches_direct_dft() {
        let signal: Vec<f64> = sine(6.0, 12.0, 128.0, 300)
            .iter()
            .zip(sine(21.0, 4.0, 128.0, 300))
            .map(|(a, b)| a + b + 0.5)
            .collect();
        let direct = compute_spectrum(&signal, 128.0).unwrap();
        let fast = SpectrumBuilder::default()
            .with_method(SpectralMethod::Fft)
            .compute(&signal, 128.0)
            .unwrap();
        assert_eq!(direct.frequencies_hz, fast.frequencies_hz);
        for (a, b) in direct.magnitudes.iter().zip(&fast.magnitudes) {
            assert!((a - b).abs() < 1e-9);
        }
    }
    #[test]
    fn peaks_are_capped_and_above_threshold() {
        let signal: Vec<f64> = (1..=8)
            .map(|k| sine(4.0 * k as f64, 2.0 + k as f64, 128.0, 128))
            .fold(vec![0.0; 128], |acc, s| {
                acc.iter().zip(s).map(|(a, b)| a + b).collect()
            });
        let spectrum = compute_spectrum(&signal, 128.0).unwrap();
        let peaks = find_spectral_peaks(&spectrum, 50.0);
        assert_eq!(peaks.len(), 5);
        assert!(peaks.iter().all(|p| p.magnitude >= 0.1));
        assert!(peaks.windows(2).all(|w| w[0].magnitude >= w[1].magnitude));
    }
    #[test]
    fn short_signal_has_no_peaks() {
        let spectrum = compute_spectrum(&[5.0, -5.0], 10.0).unwrap();
        assert!(find_spectral_peaks(&spectrum, 50.0).is_empty());
    }
    #[test]
    fn listing_stops_at_max_frequency() {
        let spectrum = compute_spectrum(&sine(5.0, 1.0, 200.0, 200), 200.0).unwrap();
        let listing = spectral_listing(&spectrum, 50.0);
        assert_eq!(listing.len(), 51);
        assert!((listing[5].power - listing[5].magnitude.powi(2)).abs() < 1e-12);
    }
}
