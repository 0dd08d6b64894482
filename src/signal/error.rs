use thiserror::Error;
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("sample rate must be a positive finite number, got {0}")]
    InvalidSampleRate(f64),
    #[error("{ratio} is undefined: denominator band mean is zero")]
    DivisionByZero { ratio: &'static str },
    #[error("analysis failed: {0}")]
    AnalysisFailure(String),
    #[error("channel {index} missing from sample at time {time}")]
    MissingChannel { index: usize, time: i64 },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl AnalysisError {
    pub(crate) fn empty(what: &str) -> Self {
        AnalysisError::InvalidInput(format!("{what} is empty"))
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for AnalysisError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for AnalysisError {
    fn from(value: image::ImageError) -> Self {
        AnalysisError::Plot(value.to_string())
    }
}
/// Rejects windows that would poison later arithmetic with NaN.
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<(), AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::empty(what));
    }
    if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(AnalysisError::AnalysisFailure(format!(
            "{what} holds non-finite value {value} at index {index}"
        )));
    }
    Ok(())
}
pub(crate) fn ensure_sample_rate(sample_rate_hz: f64) -> Result<(), AnalysisError> {
    if sample_rate_hz.is_finite() && sample_rate_hz > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidSampleRate(sample_rate_hz))
    }
}
