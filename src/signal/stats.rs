use serde::{Deserialize, Serialize};

use crate::signal::error::{ensure_finite, AnalysisError};
use crate::types::{Band, Sample};

/// Summary of one band (or one raw channel) over one window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandStats {
    pub mean: f64,
    pub std_dev: f64,
    /// Least-squares slope of value against 0-based sample index.
    pub trend: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

/// Mean, population standard deviation, OLS trend and extrema of a window.
pub fn compute_stats(values: &[f64]) -> Result<BandStats, AnalysisError> {
    ensure_finite(values, "statistics window")?;
    let n = values.len() as f64;
    let mean = mean(values);
    let std_dev = population_variance(values, mean).sqrt();

    let x_mean = (n - 1.0) / 2.0;
    let (numerator, denominator) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, v)| {
            let dx = i as f64 - x_mean;
            (num + dx * (v - mean), den + dx * dx)
        });
    let trend = if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    };

    let (min, max) = min_max(values);
    Ok(BandStats {
        mean,
        std_dev,
        trend,
        min,
        max,
        range: max - min,
    })
}

/// Per-band statistics over the same window of band samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandStatsSet {
    pub delta: BandStats,
    pub theta: BandStats,
    pub alpha: BandStats,
    pub beta: BandStats,
    pub gamma: BandStats,
}

impl BandStatsSet {
    pub fn from_samples(samples: &[Sample]) -> Result<Self, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::empty("band sample window"));
        }
        let of = |band: Band| -> Result<BandStats, AnalysisError> {
            let values: Vec<f64> = samples.iter().map(|s| s.bands.get(band)).collect();
            compute_stats(&values)
        };
        Ok(Self {
            delta: of(Band::Delta)?,
            theta: of(Band::Theta)?,
            alpha: of(Band::Alpha)?,
            beta: of(Band::Beta)?,
            gamma: of(Band::Gamma)?,
        })
    }

    pub fn get(&self, band: Band) -> &BandStats {
        match band {
            Band::Delta => &self.delta,
            Band::Theta => &self.theta,
            Band::Alpha => &self.alpha,
            Band::Beta => &self.beta,
            Band::Gamma => &self.gamma,
        }
    }
}

/// Distribution summary of a raw channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub rms: f64,
    pub zero_crossings: usize,
    pub skewness: f64,
    /// Excess kurtosis (0 for a normal distribution).
    pub kurtosis: f64,
}

/// Skewness and kurtosis are 0 for a constant window.
pub fn compute_signal_statistics(values: &[f64]) -> Result<SignalStatistics, AnalysisError> {
    ensure_finite(values, "signal window")?;
    let n = values.len() as f64;
    let mean = mean(values);
    let variance = population_variance(values, mean);
    let std_dev = variance.sqrt();

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    // upper median for even lengths
    let median = sorted[sorted.len() / 2];

    let (min, max) = min_max(values);
    let rms = (values.iter().map(|v| v * v).sum::<f64>() / n).sqrt();

    let zero_crossings = values
        .windows(2)
        .filter(|pair| (pair[1] >= 0.0) != (pair[0] >= 0.0))
        .count();

    let (skewness, kurtosis) = if std_dev > 0.0 {
        let moment = |power: i32| {
            values
                .iter()
                .map(|v| ((v - mean) / std_dev).powi(power))
                .sum::<f64>()
                / n
        };
        (moment(3), moment(4) - 3.0)
    } else {
        (0.0, 0.0)
    };

    Ok(SignalStatistics {
        mean,
        median,
        std_dev,
        variance,
        min,
        max,
        range: max - min,
        rms,
        zero_crossings,
        skewness,
        kurtosis,
    })
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn population_variance(values: &[f64], mean: f64) -> f64 {
    values
        .iter()
        .map(|v| {
            let delta = v - mean;
            delta * delta
        })
        .sum::<f64>()
        / values.len() as f64
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BandValues;

    #[test]
    fn empty_window_is_invalid_input() {
        assert!(matches!(
            compute_stats(&[]),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
    #[test]
    fn non_finite_value_is_analysis_failure() {
        assert!(matches!(
            compute_stats(&[1.0, f64::NAN]),
            Err(AnalysisError::AnalysisFailure(_))
        ));
    }
    #[test]
    fn constant_window_has_no_spread_or_trend() {
        let stats = compute_stats(&[7.5; 20]).unwrap();
        assert_eq!(stats.mean, 7.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.trend, 0.0);
        assert_eq!(stats.range, 0.0);
    }
    #[test]
    fn single_value_has_zero_trend() {
        let stats = compute_stats(&[3.0]).unwrap();
        assert_eq!(stats.trend, 0.0);
        assert_eq!(stats.min, 3.0);
        assert_eq!(stats.max, 3.0);
    }
    #[test]
    fn linear_ramp_recovers_slope_and_population_std() {
        let values: Vec<f64> = (0..5).map(|i| 2.0 * i as f64 + 1.0).collect();
        let stats = compute_stats(&values).unwrap();
        assert!((stats.trend - 2.0).abs() < 1e-12);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // population variance of 1,3,5,7,9 is 8
        assert!((stats.std_dev - 8f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.range, 8.0);
    }
    #[test]
    fn mean_stays_within_extrema() {
        let windows: [&[f64]; 4] = [
            &[-3.0, 4.0, 0.5],
            &[1e6, -1e6, 3.0, 2.0],
            &[0.1],
            &[-0.2, -0.2, -0.1],
        ];
        for window in windows {
            let stats = compute_stats(window).unwrap();
            assert!(stats.mean >= stats.min && stats.mean <= stats.max);
        }
    }
    #[test]
    fn band_set_reads_each_band_column() {
        let samples: Vec<Sample> = (0..4)
            .map(|i| {
                let mut bands = BandValues::default();
                bands.alpha = 10.0 - i as f64;
                bands.beta = 20.0;
                Sample::new(i, bands)
            })
            .collect();
        let set = BandStatsSet::from_samples(&samples).unwrap();
        assert!((set.alpha.trend + 1.0).abs() < 1e-12);
        assert_eq!(set.beta.mean, 20.0);
        assert_eq!(set.get(Band::Beta).std_dev, 0.0);
    }
    #[test]
    fn signal_statistics_match_hand_computation() {
        let stats = compute_signal_statistics(&[-1.0, 1.0, -1.0, 1.0]).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.median, 1.0);
        assert_eq!(stats.variance, 1.0);
        assert_eq!(stats.rms, 1.0);
        assert_eq!(stats.zero_crossings, 3);
        assert!(stats.skewness.abs() < 1e-12);
        // symmetric two-point distribution: kurtosis 1 - 3
        assert!((stats.kurtosis + 2.0).abs() < 1e-12);
    }
    #[test]
    fn flat_signal_statistics_do_not_produce_nan() {
        let stats = compute_signal_statistics(&[0.0; 16]).unwrap();
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
        assert_eq!(stats.zero_crossings, 0);
    }
}
