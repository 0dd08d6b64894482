use serde::{Deserialize, Serialize};

use crate::signal::BandPowerSummary;
use crate::types::Band;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeStatus {
    #[serde(rename = "Below Normal")]
    Below,
    Normal,
    #[serde(rename = "Above Normal")]
    Above,
}

/// Adult resting-state relative power range in percent.
pub const fn normal_range(band: Band) -> (f64, f64) {
    match band {
        Band::Delta => (10.0, 30.0),
        Band::Theta => (15.0, 25.0),
        Band::Alpha => (20.0, 35.0),
        Band::Beta => (15.0, 30.0),
        Band::Gamma => (5.0, 15.0),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalRangeComparison {
    pub band: Band,
    pub observed_percent: f64,
    pub normal_min: f64,
    pub normal_max: f64,
    pub status: RangeStatus,
    /// Distance past the violated bound, as a percentage of that bound.
    pub deviation_percent: f64,
}

pub fn compare_band(band: Band, observed: f64) -> NormalRangeComparison {
    let (min, max) = normal_range(band);
    let (status, deviation_percent) = if observed < min {
        (RangeStatus::Below, (min - observed) / min * 100.0)
    } else if observed > max {
        (RangeStatus::Above, (observed - max) / max * 100.0)
    } else {
        (RangeStatus::Normal, 0.0)
    };
    NormalRangeComparison {
        band,
        observed_percent: observed,
        normal_min: min,
        normal_max: max,
        status,
        deviation_percent,
    }
}

pub fn compare_to_normal_ranges(band_power: &BandPowerSummary) -> Vec<NormalRangeComparison> {
    Band::ALL
        .iter()
        .map(|&band| compare_band(band, band_power.relative(band)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_and_above_measure_from_violated_bound() {
        let low = compare_band(Band::Delta, 5.0);
        assert_eq!(low.status, RangeStatus::Below);
        assert!((low.deviation_percent - 50.0).abs() < 1e-9);

        let high = compare_band(Band::Gamma, 30.0);
        assert_eq!(high.status, RangeStatus::Above);
        assert!((high.deviation_percent - 100.0).abs() < 1e-9);
    }
    #[test]
    fn bounds_are_normal() {
        for band in Band::ALL {
            let (min, max) = normal_range(band);
            assert_eq!(compare_band(band, min).status, RangeStatus::Normal);
            assert_eq!(compare_band(band, max).deviation_percent, 0.0);
        }
    }
}
