// src/signal/mod.rs
// Raw-signal and band-sample processing: everything that turns numbers into features.
pub mod adapter;
pub mod artifacts;
pub mod bandpower;
pub mod buffer;
pub mod error;
pub mod fft;
pub mod plot;
pub mod source;
pub mod stats;
pub mod synth;
pub use adapter::{bands_from_signal, signal_from_bands};
pub use artifacts::{detect_artifacts, ArtifactSeverity, QualityAssessment, QualityGrade};
pub use bandpower::{band_power_from_spectrum, compute_band_power, BandPower, BandPowerSummary};
pub use buffer::{ChannelWindow, SampleBuffer};
pub use error::AnalysisError;
pub use fft::{
    analyze_spectrum, compute_spectrum, find_dominant_frequency, find_spectral_peaks,
    spectral_listing, DominantFrequency, SpectralAnalysis, SpectralPeak, Spectrum,
    SpectrumBuilder,
};
pub use plot::{render_band_series_png, render_spectrum_png, PlotStyle};
pub use source::{ManualSource, SampleSource, SyntheticSource};
pub use stats::{
    compute_signal_statistics, compute_stats, BandStats, BandStatsSet, SignalStatistics,
};
pub use synth::{synthesize_recording, DatasetKind, DatasetProfile, Recording};
