// src/lib.rs
pub mod assessment;
pub mod config;
pub mod scenario;
pub mod session;
pub mod signal;
pub mod types;

pub use assessment::{assess, Assessment, AssessmentInput, Finding, PatternFeatures, Severity};
pub use config::{AnalysisConfig, BinScaling, SpectralMethod};
pub use scenario::{MedicalContext, Scenario, ScenarioMedicalContext, StudyContext};
pub use session::{AnalysisSession, ChannelAnalysis};
pub use signal::AnalysisError;
pub use types::{Band, BandValues, RecordingMetadata, Sample};
