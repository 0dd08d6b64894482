// src/main.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use eeg_insight::signal::{
    bands_from_signal, render_band_series_png, render_spectrum_png, synthesize_recording,
    DatasetKind, DatasetProfile, PlotStyle, SpectrumBuilder,
};
use eeg_insight::{AnalysisConfig, AnalysisSession};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

const CONFIG_ENV: &str = "EEG_INSIGHT_CONFIG";
const PLOT_DIR_ENV: &str = "EEG_INSIGHT_PLOT_DIR";

fn load_config() -> Result<AnalysisConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from);
    match path {
        Some(path) => {
            info!("reading config from {}", path.display());
            AnalysisConfig::load(&path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn run_profile(
    profile: &DatasetProfile,
    config: &AnalysisConfig,
    rng: &mut StdRng,
    plot_dir: Option<&PathBuf>,
) -> Result<()> {
    let recording = synthesize_recording(profile, rng);
    let window = recording
        .channels
        .first()
        .context("recording has no channels")?;
    let frame_len = profile.sample_rate_hz.round() as usize;
    let builder = SpectrumBuilder::from_config(config);
    let scenario = profile.kind.scenario();
    let bands = bands_from_signal(window, frame_len, &builder)?
        .into_iter()
        .map(|s| s.with_scenario(scenario.label()))
        .collect::<Vec<_>>();

    let mut session = AnalysisSession::new(config.clone(), scenario)?;
    session.load(bands, recording.metadata.clone());
    let analysis = session.analyze_channel(window);
    println!("{}", analysis.to_json()?);

    if let Some(dir) = plot_dir {
        let style = PlotStyle::default();
        let stem = profile.kind.dataset_id();
        let spectrum = builder.compute(&window.samples, window.sample_rate_hz)?;
        let spectrum_png = render_spectrum_png(&spectrum, config.spectrum_max_hz, &style)?;
        std::fs::write(dir.join(format!("{stem}-spectrum.png")), spectrum_png)?;
        let bands_png = render_band_series_png(session.buffer().samples(), &style)?;
        std::fs::write(dir.join(format!("{stem}-bands.png")), bands_png)?;
        info!("wrote charts for {stem} to {}", dir.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let config = load_config()?;
    let plot_dir = std::env::var(PLOT_DIR_ENV).ok().map(PathBuf::from);
    if let Some(dir) = &plot_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut rng = StdRng::seed_from_u64(42);
    let profiles = [
        DatasetProfile::new(DatasetKind::MotorImagery, 160.0, 10, 10.0),
        DatasetProfile::new(DatasetKind::Sleep, 100.0, 8, 30.0),
        DatasetProfile::new(DatasetKind::Seizure, 256.0, 8, 10.0),
        DatasetProfile::new(DatasetKind::MentalArithmetic, 500.0, 10, 10.0),
        DatasetProfile::new(DatasetKind::Generic, 256.0, 4, 8.0),
    ];
    for profile in &profiles {
        info!("analysing synthetic {} recording", profile.kind.study_type());
        run_profile(profile, &config, &mut rng, plot_dir.as_ref())?;
    }
    Ok(())
}
