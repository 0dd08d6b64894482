use log::warn;
use serde::{Deserialize, Serialize};

use crate::signal::{AnalysisError, BandStatsSet};

/// Band-mean ratios used by the pattern rules. `None` means the denominator band
/// had a zero mean over the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandRatios {
    /// Attention marker.
    pub theta_beta: Option<f64>,
    /// Alertness marker.
    pub alpha_theta: Option<f64>,
    /// Arousal marker.
    pub beta_alpha: Option<f64>,
    /// Sleep-depth marker.
    pub delta_theta: Option<f64>,
}

/// `numerator / denominator`, refusing a zero denominator.
pub fn try_ratio(
    name: &'static str,
    numerator: f64,
    denominator: f64,
) -> Result<f64, AnalysisError> {
    if denominator == 0.0 {
        return Err(AnalysisError::DivisionByZero { ratio: name });
    }
    Ok(numerator / denominator)
}

fn lenient(name: &'static str, numerator: f64, denominator: f64) -> Option<f64> {
    match try_ratio(name, numerator, denominator) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{err}");
            None
        }
    }
}

impl BandRatios {
    pub fn from_stats(stats: &BandStatsSet) -> Self {
        Self {
            theta_beta: lenient("theta/beta", stats.theta.mean, stats.beta.mean),
            alpha_theta: lenient("alpha/theta", stats.alpha.mean, stats.theta.mean),
            beta_alpha: lenient("beta/alpha", stats.beta.mean, stats.alpha.mean),
            delta_theta: lenient("delta/theta", stats.delta.mean, stats.theta.mean),
        }
    }

    /// Strict variant: the first undefined ratio becomes an error.
    pub fn try_from_stats(stats: &BandStatsSet) -> Result<Self, AnalysisError> {
        Ok(Self {
            theta_beta: Some(try_ratio("theta/beta", stats.theta.mean, stats.beta.mean)?),
            alpha_theta: Some(try_ratio("alpha/theta", stats.alpha.mean, stats.theta.mean)?),
            beta_alpha: Some(try_ratio("beta/alpha", stats.beta.mean, stats.alpha.mean)?),
            delta_theta: Some(try_ratio("delta/theta", stats.delta.mean, stats.theta.mean)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::compute_stats;

    fn stats_with_means(delta: f64, theta: f64, alpha: f64, beta: f64) -> BandStatsSet {
        let flat = |v: f64| compute_stats(&[v, v, v]).unwrap();
        BandStatsSet {
            delta: flat(delta),
            theta: flat(theta),
            alpha: flat(alpha),
            beta: flat(beta),
            gamma: flat(10.0),
        }
    }

    #[test]
    fn ratios_follow_band_means() {
        let ratios = BandRatios::from_stats(&stats_with_means(30.0, 15.0, 20.0, 10.0));
        assert_eq!(ratios.theta_beta, Some(1.5));
        assert_eq!(ratios.alpha_theta, Some(20.0 / 15.0));
        assert_eq!(ratios.beta_alpha, Some(0.5));
        assert_eq!(ratios.delta_theta, Some(2.0));
    }
    #[test]
    fn zero_denominator_is_undefined() {
        let stats = stats_with_means(30.0, 15.0, 20.0, 0.0);
        let ratios = BandRatios::from_stats(&stats);
        assert_eq!(ratios.theta_beta, None);
        assert_eq!(ratios.beta_alpha, Some(0.0));
        assert!(matches!(
            BandRatios::try_from_stats(&stats),
            Err(AnalysisError::DivisionByZero { ratio: "theta/beta" })
        ));
    }
}
