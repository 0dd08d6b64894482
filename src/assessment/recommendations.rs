use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;
use crate::signal::{ArtifactSeverity, QualityAssessment};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub recommendation: String,
    pub rationale: String,
}

impl Recommendation {
    fn new(
        category: &str,
        priority: Priority,
        recommendation: &str,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            category: category.to_owned(),
            priority,
            recommendation: recommendation.to_owned(),
            rationale: rationale.into(),
        }
    }
}

/// Advisory list in insertion order: quality, scenario advice, clinical review.
pub fn generate_recommendations(
    quality: &QualityAssessment,
    scenario: Scenario,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    if quality.overall_score < 70.0 {
        out.push(Recommendation::new(
            "Signal Quality",
            Priority::High,
            "Improve electrode contact and reduce movement artifacts",
            format!("Signal quality score: {:.1}%", quality.overall_score),
        ));
    }
    match scenario {
        Scenario::MotorImagery => out.push(Recommendation::new(
            "Motor BCI",
            Priority::Medium,
            "Focus on C3/C4 electrode positioning for optimal motor imagery detection",
            "Motor cortex activity is best captured over sensorimotor areas",
        )),
        Scenario::SleepStudy => out.push(Recommendation::new(
            "Sleep Analysis",
            Priority::Medium,
            "Consider additional sleep staging with EOG and EMG channels",
            "Comprehensive sleep analysis requires multi-modal signals",
        )),
        _ => {}
    }
    if quality.amplitude_artifact_severity == ArtifactSeverity::High {
        out.push(Recommendation::new(
            "Clinical",
            Priority::High,
            "Review for potential seizure activity or equipment malfunction",
            "High amplitude artifacts may indicate pathological activity",
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::QualityGrade;

    fn quality(score: f64, amplitude: ArtifactSeverity) -> QualityAssessment {
        QualityAssessment {
            amplitude_artifact_count: 0,
            amplitude_artifact_percent: 0.0,
            amplitude_artifact_severity: amplitude,
            muscle_artifact_count: 0,
            muscle_artifact_percent: 0.0,
            muscle_artifact_severity: ArtifactSeverity::Low,
            baseline_drift_detected: false,
            baseline_drift_severity: ArtifactSeverity::None,
            overall_grade: QualityGrade::from_score(score),
            overall_score: score,
        }
    }

    #[test]
    fn clean_generic_recording_needs_nothing() {
        let recs =
            generate_recommendations(&quality(100.0, ArtifactSeverity::Low), Scenario::RealEegData);
        assert!(recs.is_empty());
    }
    #[test]
    fn order_follows_insertion() {
        let recs =
            generate_recommendations(&quality(60.0, ArtifactSeverity::High), Scenario::SleepStudy);
        let categories: Vec<&str> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Signal Quality", "Sleep Analysis", "Clinical"]);
        assert_eq!(recs[0].rationale, "Signal quality score: 60.0%");
        assert_eq!(recs[1].priority, Priority::Medium);
    }
}
