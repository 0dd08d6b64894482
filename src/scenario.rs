// src/scenario.rs
use std::collections::HashMap;
use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Recording contexts the rule engine knows. Anything else is treated as generic
/// real data, which has no scenario rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    #[serde(rename = "Motor Imagery Task")]
    MotorImagery,
    #[serde(rename = "Sleep Study")]
    SleepStudy,
    #[serde(rename = "Mental State Classification")]
    MentalState,
    #[serde(rename = "Emotion Recognition")]
    EmotionRecognition,
    #[default]
    #[serde(rename = "Real EEG Data")]
    RealEegData,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::MotorImagery,
        Scenario::SleepStudy,
        Scenario::MentalState,
        Scenario::EmotionRecognition,
        Scenario::RealEegData,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Scenario::MotorImagery => "Motor Imagery Task",
            Scenario::SleepStudy => "Sleep Study",
            Scenario::MentalState => "Mental State Classification",
            Scenario::EmotionRecognition => "Emotion Recognition",
            Scenario::RealEegData => "Real EEG Data",
        }
    }

    /// Exact-label lookup; unknown labels fall back to `RealEegData`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.label() == label)
            .unwrap_or_else(|| {
                debug!("unrecognised scenario label {label:?}; using generic context");
                Scenario::RealEegData
            })
    }

    /// Scenario implied by a parser dataset-type code such as `physionet_sleep`.
    pub fn from_dataset_type(dataset_type: &str) -> Self {
        match dataset_type {
            "physionet_motor" => Scenario::MotorImagery,
            "physionet_sleep" => Scenario::SleepStudy,
            "kaggle_mental" => Scenario::MentalState,
            "kaggle_emotion" => Scenario::EmotionRecognition,
            _ => Scenario::RealEegData,
        }
    }

    pub fn medical_context(self) -> &'static ScenarioMedicalContext {
        &MEDICAL_CONTEXTS[&self]
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpectedPatterns {
    pub alpha: String,
    pub beta: String,
    pub theta: String,
    pub delta: String,
    pub gamma: String,
}

impl ExpectedPatterns {
    fn new(alpha: &str, beta: &str, theta: &str, delta: &str, gamma: &str) -> Self {
        Self {
            alpha: alpha.to_owned(),
            beta: beta.to_owned(),
            theta: theta.to_owned(),
            delta: delta.to_owned(),
            gamma: gamma.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbnormalPattern {
    pub pattern: String,
    pub interpretation: String,
}

/// Reference text handed to report and prompt builders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioMedicalContext {
    pub expected_patterns: ExpectedPatterns,
    pub clinical_significance: String,
    pub research_context: String,
    pub abnormal_patterns: Vec<AbnormalPattern>,
    pub therapeutic_applications: String,
}

impl ScenarioMedicalContext {
    fn new(
        expected_patterns: ExpectedPatterns,
        clinical_significance: &str,
        research_context: &str,
        abnormal_patterns: &[(&str, &str)],
        therapeutic_applications: &str,
    ) -> Self {
        Self {
            expected_patterns,
            clinical_significance: clinical_significance.to_owned(),
            research_context: research_context.to_owned(),
            abnormal_patterns: abnormal_patterns
                .iter()
                .map(|(pattern, interpretation)| AbnormalPattern {
                    pattern: (*pattern).to_owned(),
                    interpretation: (*interpretation).to_owned(),
                })
                .collect(),
            therapeutic_applications: therapeutic_applications.to_owned(),
        }
    }
}

/// Application summary for a recording's study type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyContext {
    pub application: String,
    pub clinical_relevance: String,
    pub key_findings: String,
}

impl StudyContext {
    fn new(application: &str, clinical_relevance: &str, key_findings: &str) -> Self {
        Self {
            application: application.to_owned(),
            clinical_relevance: clinical_relevance.to_owned(),
            key_findings: key_findings.to_owned(),
        }
    }

    /// Unknown or missing study types get the general entry.
    pub fn for_study_type(study_type: Option<&str>) -> &'static StudyContext {
        study_type
            .and_then(|key| STUDY_CONTEXTS.get(key))
            .unwrap_or(&*GENERAL_STUDY)
    }
}

/// Both context records attached to an assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalContext {
    pub scenario: ScenarioMedicalContext,
    pub study: StudyContext,
}

impl MedicalContext {
    pub fn lookup(scenario: Scenario, study_type: Option<&str>) -> Self {
        Self {
            scenario: scenario.medical_context().clone(),
            study: StudyContext::for_study_type(study_type).clone(),
        }
    }
}

static GENERAL_STUDY: Lazy<StudyContext> = Lazy::new(|| {
    StudyContext::new(
        "General EEG analysis",
        "Neurological assessment",
        "Spectral power distribution, artifact detection",
    )
});

static STUDY_CONTEXTS: Lazy<HashMap<&'static str, StudyContext>> = Lazy::new(|| {
    HashMap::from([
        (
            "Motor Imagery",
            StudyContext::new(
                "Brain-Computer Interface (BCI) development",
                "Motor rehabilitation, prosthetic control",
                "Mu rhythm (8-12 Hz) suppression over motor areas",
            ),
        ),
        (
            "Sleep Study",
            StudyContext::new(
                "Sleep disorder diagnosis and monitoring",
                "Sleep apnea, insomnia, circadian rhythm disorders",
                "Sleep stage classification, slow-wave activity analysis",
            ),
        ),
        (
            "Mental Arithmetic",
            StudyContext::new(
                "Cognitive load assessment, attention monitoring",
                "ADHD diagnosis, cognitive training",
                "Theta/beta ratio, sustained attention patterns",
            ),
        ),
        (
            "Seizure Detection",
            StudyContext::new(
                "Epilepsy monitoring and seizure prediction",
                "Seizure onset detection, medication optimization",
                "Spike-wave patterns, interictal activity",
            ),
        ),
    ])
});

static MEDICAL_CONTEXTS: Lazy<HashMap<Scenario, ScenarioMedicalContext>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        Scenario::MotorImagery,
        ScenarioMedicalContext::new(
            ExpectedPatterns::new(
                "Event-related desynchronization (ERD) in 8-12 Hz range over motor cortex",
                "Increased beta power (13-30 Hz) during motor planning, beta rebound post-movement",
                "Minimal theta activity, may increase during complex motor sequences",
                "Low delta activity, should remain stable during task",
                "Brief gamma bursts (30-100 Hz) during motor execution",
            ),
            "Motor imagery patterns are crucial for brain-computer interface (BCI) development, \
             stroke rehabilitation, and understanding motor cortex plasticity",
            "Based on Pfurtscheller & Neuper (2001) motor imagery paradigms and Blankertz et al. \
             BCI competition datasets",
            &[
                (
                    "Absent alpha ERD",
                    "May indicate motor cortex dysfunction or poor task engagement",
                ),
                (
                    "Excessive theta",
                    "Could suggest cognitive fatigue or attention deficits",
                ),
                (
                    "Bilateral activation",
                    "Normal finding, though lateralization indicates specificity",
                ),
            ],
            "Stroke rehabilitation, spinal cord injury treatment, motor skill learning enhancement",
        ),
    );
    table.insert(
        Scenario::SleepStudy,
        ScenarioMedicalContext::new(
            ExpectedPatterns::new(
                "Present during wake/drowsy states (8-13 Hz), diminishes in deeper sleep stages",
                "High during wake, decreases through sleep stages, may increase during REM",
                "Increases during N1/N2 sleep, prominent in REM sleep (4-8 Hz)",
                "Dominant in N3 deep sleep (0.5-4 Hz), critical for sleep quality assessment",
                "Brief bursts during REM, associated with dream consciousness",
            ),
            "Sleep stage classification essential for diagnosing sleep disorders, optimizing \
             sleep quality, and understanding circadian rhythms",
            "Based on Rechtschaffen & Kales sleep staging criteria and modern AASM guidelines",
            &[
                (
                    "Reduced delta in N3",
                    "Indicates poor sleep quality, common in aging and depression",
                ),
                (
                    "Excessive beta in sleep",
                    "May suggest hyperarousal, anxiety, or medication effects",
                ),
                (
                    "Alpha intrusion in NREM",
                    "Associated with non-restorative sleep and fibromyalgia",
                ),
            ],
            "Sleep apnea diagnosis, insomnia treatment, circadian rhythm disorders, \
             neurofeedback therapy",
        ),
    );
    table.insert(
        Scenario::MentalState,
        ScenarioMedicalContext::new(
            ExpectedPatterns::new(
                "Increased during relaxed awareness (8-13 Hz), eyes-closed resting state",
                "Elevated during focused attention and cognitive tasks (13-30 Hz)",
                "Present during meditative states and creative thinking (4-8 Hz)",
                "Minimal during wake states, may increase with fatigue",
                "Bursts during high-level cognitive processing and attention",
            ),
            "Mental state monitoring enables objective assessment of attention, stress, \
             meditation depth, and cognitive load",
            "Based on attention research by Klimesch et al. and meditation neuroscience by \
             Davidson & Lutz",
            &[
                (
                    "Persistent high beta",
                    "May indicate anxiety, stress, or hypervigilance",
                ),
                (
                    "Reduced alpha variability",
                    "Could suggest attention deficits or cognitive rigidity",
                ),
                (
                    "Excessive theta in wake",
                    "Possible indicator of ADHD or drowsiness",
                ),
            ],
            "ADHD treatment, meditation training, stress management, attention enhancement",
        ),
    );
    table.insert(
        Scenario::EmotionRecognition,
        ScenarioMedicalContext::new(
            ExpectedPatterns::new(
                "Frontal alpha asymmetry: left > right for positive emotions, right > left for negative",
                "Increased during emotional arousal, particularly in frontal regions",
                "Enhanced during emotional processing, especially in limbic areas",
                "Generally stable, may increase with very high emotional intensity",
                "Brief bursts during emotional awareness and integration",
            ),
            "Emotional state detection crucial for depression treatment, anxiety management, \
             and affective disorder research",
            "Based on Davidson's approach-withdrawal model and Russell's circumplex model of affect",
            &[
                (
                    "Reversed alpha asymmetry",
                    "May indicate depression vulnerability or negative mood states",
                ),
                (
                    "Excessive frontal theta",
                    "Could suggest emotional dysregulation or trauma responses",
                ),
                (
                    "Reduced emotional reactivity",
                    "Possible indicator of anhedonia or emotional blunting",
                ),
            ],
            "Depression treatment, anxiety therapy, emotion regulation training, PTSD treatment",
        ),
    );
    table.insert(
        Scenario::RealEegData,
        ScenarioMedicalContext::new(
            ExpectedPatterns::new(
                "Variable patterns depending on specific research context and experimental conditions",
                "Context-dependent activation reflecting cognitive and motor demands",
                "Task-specific modulation based on memory, attention, and emotional processes",
                "Baseline activity modulated by arousal level and sleep pressure",
                "Brief, task-related bursts associated with conscious processing",
            ),
            "Authentic research data provides ground truth for validating EEG analysis methods \
             and understanding neural mechanisms",
            "Represents actual human brain activity recorded under controlled experimental \
             conditions",
            &[
                (
                    "Artifact contamination",
                    "Eye blinks, muscle tension, or electrode artifacts may distort patterns",
                ),
                (
                    "Individual differences",
                    "Natural variation in brain anatomy and function affects signal characteristics",
                ),
            ],
            "Research validation, method development, personalized medicine approaches",
        ),
    );
    table
});

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn labels_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_label(scenario.label()), scenario);
        }
    }
    #[test]
    fn unknown_label_falls_back_to_generic() {
        assert_eq!(Scenario::from_label("Seizure Detection"), Scenario::RealEegData);
        assert_eq!(Scenario::from_label("sleep study"), Scenario::RealEegData);
        assert_eq!(Scenario::default(), Scenario::RealEegData);
    }
    #[test]
    fn dataset_type_codes_map_to_scenarios() {
        assert_eq!(Scenario::from_dataset_type("physionet_motor"), Scenario::MotorImagery);
        assert_eq!(Scenario::from_dataset_type("physionet_sleep"), Scenario::SleepStudy);
        assert_eq!(Scenario::from_dataset_type("kaggle_mental"), Scenario::MentalState);
        assert_eq!(
            Scenario::from_dataset_type("kaggle_emotion"),
            Scenario::EmotionRecognition
        );
        assert_eq!(Scenario::from_dataset_type("chbmit"), Scenario::RealEegData);
    }
    #[test]
    fn every_scenario_has_context() {
        for scenario in Scenario::ALL {
            let context = scenario.medical_context();
            assert!(!context.clinical_significance.is_empty());
            assert!(!context.abnormal_patterns.is_empty());
        }
        assert!(Scenario::SleepStudy
            .medical_context()
            .expected_patterns
            .delta
            .contains("N3"));
    }
    #[test]
    fn study_context_falls_back_to_general() {
        let seizure = StudyContext::for_study_type(Some("Seizure Detection"));
        assert_eq!(seizure.key_findings, "Spike-wave patterns, interictal activity");
        assert_eq!(
            StudyContext::for_study_type(Some("General EEG")).application,
            "General EEG analysis"
        );
        assert_eq!(StudyContext::for_study_type(None), &*GENERAL_STUDY);
    }
    #[test]
    fn medical_context_round_trips_through_json() {
        let context = MedicalContext::lookup(Scenario::MotorImagery, Some("Motor Imagery"));
        let json = serde_json::to_string(&context).unwrap();
        let back: MedicalContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, context);
    }
    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Scenario::MentalState).unwrap();
        assert_eq!(json, "\"Mental State Classification\"");
    }
}
