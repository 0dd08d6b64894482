// src/assessment/mod.rs
// Turns numeric features into findings, range comparisons and advice.
pub mod norms;
pub mod patterns;
pub mod ratios;
pub mod recommendations;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::scenario::{MedicalContext, Scenario};
use crate::signal::{BandPowerSummary, BandStatsSet, QualityAssessment};
use crate::types::RecordingMetadata;

pub use norms::{compare_to_normal_ranges, NormalRangeComparison, RangeStatus};
pub use patterns::{detect_patterns, relative_power_findings};
pub use ratios::{try_ratio, BandRatios};
pub use recommendations::{generate_recommendations, Priority, Recommendation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    High,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[serde(rename = "type")]
    pub finding_type: String,
    pub description: String,
    pub severity: Severity,
    pub clinical_note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Numeric features handed to the prompt builder. Formatting is the caller's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFeatures {
    pub stats: BandStatsSet,
    pub ratios: BandRatios,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_power: Option<BandPowerSummary>,
}

/// Everything one assessment is derived from.
#[derive(Clone, Debug)]
pub struct AssessmentInput<'a> {
    pub stats: &'a BandStatsSet,
    pub band_power: &'a BandPowerSummary,
    pub quality: &'a QualityAssessment,
    pub scenario: Scenario,
    pub metadata: &'a RecordingMetadata,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub scenario: Scenario,
    pub stats: Option<BandStatsSet>,
    pub ratios: BandRatios,
    pub band_power: Option<BandPowerSummary>,
    pub quality: Option<QualityAssessment>,
    pub findings: Vec<Finding>,
    pub normal_ranges: Vec<NormalRangeComparison>,
    pub recommendations: Vec<Recommendation>,
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_context: Option<MedicalContext>,
    /// Set when the pipeline could not finish; the tables are then empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl Assessment {
    pub fn failed(scenario: Scenario, reason: impl Into<String>) -> Self {
        Self {
            scenario,
            stats: None,
            ratios: BandRatios::default(),
            band_power: None,
            quality: None,
            findings: Vec::new(),
            normal_ranges: Vec::new(),
            recommendations: Vec::new(),
            confidence_score: 0.0,
            medical_context: None,
            failure: Some(reason.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `85 * quality / 100`, +10 for a trusted source, -10 when the recording has fewer
/// channels than `config.min_channels`, clamped to 40..=95. Unknown channel counts
/// are not penalised.
pub fn confidence_score(
    quality: &QualityAssessment,
    metadata: &RecordingMetadata,
    config: &AnalysisConfig,
) -> f64 {
    let mut confidence = 85.0 * (quality.overall_score / 100.0);
    if config.is_trusted_source(metadata.source.as_deref()) {
        confidence += 10.0;
    }
    if metadata.channels.is_some_and(|c| c < config.min_channels) {
        confidence -= 10.0;
    }
    confidence.clamp(40.0, 95.0)
}

pub fn assess(input: AssessmentInput<'_>, config: &AnalysisConfig) -> Assessment {
    let ratios = BandRatios::from_stats(input.stats);
    let mut findings = detect_patterns(input.stats, &ratios, input.scenario);
    findings.extend(relative_power_findings(input.band_power, input.scenario));
    let assessment = Assessment {
        scenario: input.scenario,
        stats: Some(*input.stats),
        ratios,
        band_power: Some(input.band_power.clone()),
        quality: Some(*input.quality),
        normal_ranges: compare_to_normal_ranges(input.band_power),
        recommendations: generate_recommendations(input.quality, input.scenario),
        confidence_score: confidence_score(input.quality, input.metadata, config),
        medical_context: Some(MedicalContext::lookup(
            input.scenario,
            input.metadata.study_type.as_deref(),
        )),
        findings,
        failure: None,
    };
    info!(
        "{} assessment: {} finding(s), quality {:.1}, confidence {:.1}",
        assessment.scenario,
        assessment.findings.len(),
        input.quality.overall_score,
        assessment.confidence_score
    );
    assessment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{
        compute_band_power, compute_stats, detect_artifacts, ArtifactSeverity, QualityGrade,
    };

    fn quality(score: f64) -> QualityAssessment {
        QualityAssessment {
            amplitude_artifact_count: 0,
            amplitude_artifact_percent: 0.0,
            amplitude_artifact_severity: ArtifactSeverity::Low,
            muscle_artifact_count: 0,
            muscle_artifact_percent: 0.0,
            muscle_artifact_severity: ArtifactSeverity::Low,
            baseline_drift_detected: false,
            baseline_drift_severity: ArtifactSeverity::None,
            overall_grade: QualityGrade::from_score(score),
            overall_score: score,
        }
    }

    fn metadata(source: Option<&str>, channels: Option<usize>) -> RecordingMetadata {
        RecordingMetadata {
            source: source.map(str::to_owned),
            channels,
            ..Default::default()
        }
    }

    #[test]
    fn confidence_blends_quality_and_source() {
        let config = AnalysisConfig::default();
        let physionet = metadata(Some("PhysioNet"), Some(64));
        assert!((confidence_score(&quality(100.0), &physionet, &config) - 95.0).abs() < 1e-9);
        let sparse = metadata(None, Some(4));
        assert!((confidence_score(&quality(100.0), &sparse, &config) - 75.0).abs() < 1e-9);
        assert_eq!(confidence_score(&quality(10.0), &sparse, &config), 40.0);
        let unknown = metadata(None, None);
        assert!((confidence_score(&quality(80.0), &unknown, &config) - 68.0).abs() < 1e-9);
    }
    #[test]
    fn assessment_serializes_findings_exactly() {
        let flat = |v: f64| compute_stats(&[v, v]).unwrap();
        let stats = BandStatsSet {
            delta: flat(35.0),
            theta: flat(15.0),
            alpha: flat(20.0),
            beta: flat(15.0),
            gamma: flat(10.0),
        };
        let signal: Vec<f64> = (0..256).map(|i| (i as f64 * 0.3).sin() * 10.0).collect();
        let band_power = compute_band_power(&signal, 256.0).unwrap();
        let quality = detect_artifacts(&signal, 256.0).unwrap();
        let meta = RecordingMetadata::synthetic();
        let assessment = assess(
            AssessmentInput {
                stats: &stats,
                band_power: &band_power,
                quality: &quality,
                scenario: Scenario::SleepStudy,
                metadata: &meta,
            },
            &AnalysisConfig::default(),
        );
        assert_eq!(assessment.findings[0].finding_type, "Deep Sleep Signature");
        assert_eq!(assessment.normal_ranges.len(), 5);
        let json = assessment.to_json().unwrap();
        assert!(json.contains("\"type\": \"Deep Sleep Signature\""));
        let back: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(back.findings, assessment.findings);
        assert_eq!(back.scenario, Scenario::SleepStudy);
        let context = back.medical_context.unwrap();
        assert!(context.scenario.expected_patterns.delta.contains("N3"));
        assert_eq!(context.study.application, "General EEG analysis");
    }
    #[test]
    fn failed_assessment_is_empty() {
        let failed = Assessment::failed(Scenario::MotorImagery, "window is empty");
        assert!(failed.is_failure());
        assert_eq!(failed.confidence_score, 0.0);
        assert!(failed.findings.is_empty() && failed.normal_ranges.is_empty());
        assert!(failed.medical_context.is_none());
        let json = failed.to_json().unwrap();
        let back: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(back.failure.as_deref(), Some("window is empty"));
    }
}
