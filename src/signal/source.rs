use std::collections::VecDeque;

use rand::{rngs::StdRng, SeedableRng};

use crate::signal::error::AnalysisError;
use crate::signal::synth::synthetic_band_samples;
use crate::types::Sample;

/// Anything that can yield batches of band samples on demand.
pub trait SampleSource {
    fn next_batch(&mut self) -> Result<Option<Vec<Sample>>, AnalysisError>;
}

/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<Vec<Sample>>,
}

impl ManualSource {
    pub fn new(batches: impl IntoIterator<Item = Vec<Sample>>) -> Self {
        Self {
            queue: batches.into_iter().collect(),
        }
    }
}

impl SampleSource for ManualSource {
    fn next_batch(&mut self) -> Result<Option<Vec<Sample>>, AnalysisError> {
        Ok(self.queue.pop_front())
    }
}

/// Endless live-view simulation: every batch continues the time axis of the last.
pub struct SyntheticSource {
    rng: StdRng,
    next_time: i64,
    batch_len: usize,
    scenario: Option<String>,
}

impl SyntheticSource {
    pub fn new(seed: u64, batch_len: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_time: 0,
            batch_len: batch_len.max(1),
            scenario: None,
        }
    }

    /// Tags every generated sample with a scenario label.
    pub fn with_scenario(mut self, label: impl Into<String>) -> Self {
        self.scenario = Some(label.into());
        self
    }
}

impl SampleSource for SyntheticSource {
    fn next_batch(&mut self) -> Result<Option<Vec<Sample>>, AnalysisError> {
        let mut batch = synthetic_band_samples(self.next_time, self.batch_len, &mut self.rng);
        if let Some(label) = &self.scenario {
            for sample in &mut batch {
                sample.scenario = Some(label.clone());
            }
        }
        self.next_time += self.batch_len as i64;
        Ok(Some(batch))
    }
}
