//! Signal-quality heuristics for a raw channel.
//!
//! Three independent checks feed one score:
//! - amplitude outliers beyond 3 standard deviations,
//! - back-to-back sample jumps larger than 50 units (a cheap EMG proxy),
//! - 2-second window means drifting more than 2 standard deviations from the global mean.
//!
//! `score = 100 - 2 * amplitude% - 1.5 * muscle% - (15 if drift)`, clamped to 0..=100.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::signal::error::{ensure_finite, ensure_sample_rate, AnalysisError};
use crate::signal::stats::{mean, population_variance};

pub const AMPLITUDE_SIGMA: f64 = 3.0;
pub const MUSCLE_JUMP: f64 = 50.0;
pub const DRIFT_SIGMA: f64 = 2.0;
pub const DRIFT_WINDOW_SECONDS: f64 = 2.0;
pub const DRIFT_PENALTY: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactSeverity {
    None,
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityGrade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            QualityGrade::Excellent
        } else if score >= 70.0 {
            QualityGrade::Good
        } else if score >= 50.0 {
            QualityGrade::Fair
        } else {
            QualityGrade::Poor
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            QualityGrade::Excellent => "#22c55e",
            QualityGrade::Good => "#eab308",
            QualityGrade::Fair => "#f97316",
            QualityGrade::Poor => "#ef4444",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    pub amplitude_artifact_count: usize,
    pub amplitude_artifact_percent: f64,
    pub amplitude_artifact_severity: ArtifactSeverity,
    pub muscle_artifact_count: usize,
    pub muscle_artifact_percent: f64,
    pub muscle_artifact_severity: ArtifactSeverity,
    pub baseline_drift_detected: bool,
    pub baseline_drift_severity: ArtifactSeverity,
    pub overall_grade: QualityGrade,
    pub overall_score: f64,
}

pub fn detect_artifacts(
    signal: &[f64],
    sample_rate_hz: f64,
) -> Result<QualityAssessment, AnalysisError> {
    ensure_sample_rate(sample_rate_hz)?;
    ensure_finite(signal, "artifact window")?;
    let total = signal.len();
    let mean = mean(signal);
    let std_dev = population_variance(signal, mean).sqrt();

    let amplitude_artifact_count = signal
        .iter()
        .filter(|v| (*v - mean).abs() > AMPLITUDE_SIGMA * std_dev)
        .count();

    let muscle_artifact_count = signal
        .windows(3)
        .filter(|w| (w[2] - w[1]).abs() > MUSCLE_JUMP && (w[1] - w[0]).abs() > MUSCLE_JUMP)
        .count();

    let baseline_drift_detected = detect_drift(signal, sample_rate_hz, mean, std_dev);

    let amplitude_artifact_percent = percent(amplitude_artifact_count, total);
    let muscle_artifact_percent = percent(muscle_artifact_count, total);
    let overall_score =
        quality_score(amplitude_artifact_percent, muscle_artifact_percent, baseline_drift_detected);
    debug!(
        "artifacts: amplitude={amplitude_artifact_count} muscle={muscle_artifact_count} \
         drift={baseline_drift_detected} score={overall_score:.1}"
    );

    Ok(QualityAssessment {
        amplitude_artifact_count,
        amplitude_artifact_percent,
        amplitude_artifact_severity: graded(amplitude_artifact_count, total, 0.05, 0.02),
        muscle_artifact_count,
        muscle_artifact_percent,
        muscle_artifact_severity: graded(muscle_artifact_count, total, 0.10, 0.05),
        baseline_drift_detected,
        baseline_drift_severity: if baseline_drift_detected {
            ArtifactSeverity::Medium
        } else {
            ArtifactSeverity::None
        },
        overall_grade: QualityGrade::from_score(overall_score),
        overall_score,
    })
}

/// Windows start at 0 and advance while `start < len - window`, so a final window
/// that ends exactly on the last sample is not inspected.
fn detect_drift(signal: &[f64], sample_rate_hz: f64, mean: f64, std_dev: f64) -> bool {
    let window = (sample_rate_hz * DRIFT_WINDOW_SECONDS).floor() as usize;
    if window == 0 || signal.len() <= window {
        return false;
    }
    let last_start = signal.len() - window;
    (0..last_start).step_by(window).any(|start| {
        let window_mean = self::mean(&signal[start..start + window]);
        (window_mean - mean).abs() > std_dev * DRIFT_SIGMA
    })
}

pub fn quality_score(amplitude_percent: f64, muscle_percent: f64, drift: bool) -> f64 {
    let mut score = 100.0;
    score -= amplitude_percent * 2.0;
    score -= muscle_percent * 1.5;
    if drift {
        score -= DRIFT_PENALTY;
    }
    score.clamp(0.0, 100.0)
}

fn percent(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

fn graded(count: usize, total: usize, high: f64, medium: f64) -> ArtifactSeverity {
    let count = count as f64;
    let total = total as f64;
    if count > total * high {
        ArtifactSeverity::High
    } else if count > total * medium {
        ArtifactSeverity::Medium
    } else {
        ArtifactSeverity::Low
    }
}
