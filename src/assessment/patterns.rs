//! Scenario threshold rules.
//!
//! Two families: trend/ratio rules over band-sample statistics, which carry a
//! confidence, and relative-power rules over a raw channel's band power, which do not.
use log::debug;

use crate::assessment::ratios::BandRatios;
use crate::assessment::{Finding, Severity};
use crate::scenario::Scenario;
use crate::signal::{BandPowerSummary, BandStatsSet};
use crate::types::Band;

fn rule_finding(
    scenario: Scenario,
    kind: &str,
    description: &str,
    severity: Severity,
    confidence: f64,
) -> Finding {
    Finding {
        finding_type: kind.to_owned(),
        description: description.to_owned(),
        severity,
        clinical_note: scenario.medical_context().clinical_significance.clone(),
        confidence: Some(confidence),
    }
}

/// Evaluates the rules of `scenario`. Zero, one or several findings may fire;
/// `RealEegData` has no rules.
pub fn detect_patterns(
    stats: &BandStatsSet,
    ratios: &BandRatios,
    scenario: Scenario,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    match scenario {
        Scenario::MotorImagery => {
            if stats.alpha.trend < -0.1 {
                findings.push(rule_finding(
                    scenario,
                    "Alpha ERD",
                    "Event-related desynchronization indicating motor cortex activation",
                    Severity::Normal,
                    (70.0 + stats.alpha.trend.abs() * 100.0).min(90.0),
                ));
            }
            if stats.beta.mean > 25.0 && stats.beta.std_dev > 5.0 {
                findings.push(rule_finding(
                    scenario,
                    "Beta Enhancement",
                    "Increased beta activity suggesting motor preparation or execution",
                    Severity::Mild,
                    (60.0 + (stats.beta.mean - 20.0) * 2.0).min(95.0),
                ));
            }
        }
        Scenario::SleepStudy => {
            if stats.delta.mean > 30.0 {
                findings.push(rule_finding(
                    scenario,
                    "Deep Sleep Signature",
                    "High delta activity characteristic of N3 deep sleep stage",
                    Severity::Normal,
                    (70.0 + (stats.delta.mean - 30.0) * 2.0).min(95.0),
                ));
            }
            if let Some(theta_beta) = ratios.theta_beta.filter(|r| *r > 1.5) {
                findings.push(rule_finding(
                    scenario,
                    "REM-like Activity",
                    "Theta dominance over beta suggesting REM sleep or drowsiness",
                    Severity::Mild,
                    (60.0 + theta_beta * 10.0).min(90.0),
                ));
            }
        }
        Scenario::MentalState => {
            if let Some(theta_beta) = ratios.theta_beta.filter(|r| *r > 2.0) {
                findings.push(rule_finding(
                    scenario,
                    "ADHD-like Pattern",
                    "Elevated theta/beta ratio often associated with attention deficits",
                    Severity::Moderate,
                    (60.0 + (theta_beta - 2.0) * 20.0).min(85.0),
                ));
            }
            let calm = ratios.beta_alpha.is_some_and(|r| r < 1.2);
            if stats.alpha.mean > 25.0 && calm {
                findings.push(rule_finding(
                    scenario,
                    "Relaxed Awareness",
                    "High alpha with low beta indicating calm, relaxed mental state",
                    Severity::Normal,
                    (70.0 + (stats.alpha.mean - 20.0) * 2.0).min(90.0),
                ));
            }
        }
        Scenario::EmotionRecognition => {
            if stats.beta.std_dev > 8.0 {
                findings.push(rule_finding(
                    scenario,
                    "Emotional Reactivity",
                    "High beta variability suggesting active emotional processing",
                    Severity::Mild,
                    (60.0 + stats.beta.std_dev * 2.0).min(80.0),
                ));
            }
            if stats.theta.mean > 20.0 {
                findings.push(rule_finding(
                    scenario,
                    "Limbic Activation",
                    "Elevated theta activity associated with emotional and memory processing",
                    Severity::Mild,
                    (60.0 + (stats.theta.mean - 15.0) * 3.0).min(85.0),
                ));
            }
        }
        Scenario::RealEegData => {}
    }
    debug!("{} pattern finding(s) for {scenario}", findings.len());
    findings
}

/// Relative-power findings over a raw channel's band decomposition.
pub fn relative_power_findings(
    band_power: &BandPowerSummary,
    scenario: Scenario,
) -> Vec<Finding> {
    let finding = |kind: &str, severity, description: &str, note: &str| Finding {
        finding_type: kind.to_owned(),
        description: description.to_owned(),
        severity,
        clinical_note: note.to_owned(),
        confidence: None,
    };
    let mut findings = Vec::new();
    match scenario {
        Scenario::MotorImagery if band_power.relative(Band::Alpha) < 15.0 => {
            findings.push(finding(
                "Motor Imagery Pattern",
                Severity::Moderate,
                "Reduced alpha activity suggests active motor imagery or execution",
                "Consistent with mu rhythm suppression during motor tasks",
            ));
        }
        Scenario::SleepStudy if band_power.relative(Band::Delta) > 40.0 => {
            findings.push(finding(
                "Deep Sleep Pattern",
                Severity::Normal,
                "High delta activity indicates slow-wave sleep",
                "Normal sleep architecture - Stage 3/4 NREM sleep",
            ));
        }
        Scenario::MentalState if band_power.relative(Band::Beta) > 25.0 => {
            findings.push(finding(
                "Heightened Cognitive State",
                Severity::Mild,
                "Elevated beta activity suggests active mental processing",
                "May indicate concentration, anxiety, or cognitive effort",
            ));
        }
        _ => {}
    }
    findings
}
