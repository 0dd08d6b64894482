use serde::{Deserialize, Serialize};

use crate::signal::error::AnalysisError;
use crate::signal::fft::{compute_spectrum, Spectrum};
use crate::types::Band;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandPower {
    pub band: Band,
    pub frequency_range: (f64, f64),
    /// Sum of squared bin magnitudes inside the band.
    pub absolute_power: f64,
    /// Average power of the bins that fell inside the band (0 if none did).
    pub mean_bin_power: f64,
    pub relative_power_percent: f64,
    pub display_color: String,
}

/// The five bands in canonical order plus their shared total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandPowerSummary {
    pub bands: Vec<BandPower>,
    pub total_power: f64,
}

impl BandPowerSummary {
    pub fn get(&self, band: Band) -> Option<&BandPower> {
        self.bands.iter().find(|b| b.band == band)
    }

    /// Relative power of `band`, 0 when absent.
    pub fn relative(&self, band: Band) -> f64 {
        self.get(band).map_or(0.0, |b| b.relative_power_percent)
    }
}

/// Band power of a raw signal using the default spectrum settings.
pub fn compute_band_power(
    signal: &[f64],
    sample_rate_hz: f64,
) -> Result<BandPowerSummary, AnalysisError> {
    let spectrum = compute_spectrum(signal, sample_rate_hz)?;
    Ok(band_power_from_spectrum(&spectrum))
}

/// Bins on a shared edge (4, 8, 12, 30 Hz) count towards both neighbours.
pub fn band_power_from_spectrum(spectrum: &Spectrum) -> BandPowerSummary {
    let mut bands: Vec<BandPower> = Band::ALL
        .iter()
        .map(|&band| {
            let (low, high) = band.range_hz();
            let (power, count) = spectrum
                .frequencies_hz
                .iter()
                .zip(&spectrum.magnitudes)
                .filter(|(f, _)| **f >= low && **f <= high)
                .fold((0.0, 0usize), |(p, c), (_, m)| (p + m * m, c + 1));
            BandPower {
                band,
                frequency_range: (low, high),
                absolute_power: power,
                mean_bin_power: if count > 0 { power / count as f64 } else { 0.0 },
                relative_power_percent: 0.0,
                display_color: band.display_color().to_owned(),
            }
        })
        .collect();
    let total_power: f64 = bands.iter().map(|b| b.absolute_power).sum();
    if total_power > 0.0 {
        for band in &mut bands {
            band.relative_power_percent = 100.0 * band.absolute_power / total_power;
        }
    }
    BandPowerSummary { bands, total_power }
}
