use thiserror::Error;
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("not a readable SEG-Y file: {0}")]
    Format(String),
    #[error("invalid trace header byte {byte}: {reason}")]
    HeaderField { byte: usize, reason: &'static str },
    #[error("file contains no traces")]
    EmptyFile,
    #[error("spectrum needs at least two samples per trace, got {samples}")]
    DegenerateSpectrum { samples: usize },
    #[error("sample interval must be greater than zero, got {0} s")]
    InvalidSampleInterval(f32),
    #[error("trace index {index} out of range for {count} traces")]
    TraceIndex { index: usize, count: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for SectionError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        SectionError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for SectionError {
    fn from(value: image::ImageError) -> Self {
        SectionError::Plot(value.to_string())
    }
}
impl From<serde_json::Error> for SectionError {
    fn from(value: serde_json::Error) -> Self {
        SectionError::Config(value.to_string())
    }
}
pub type Result<T> = std::result::Result<T, SectionError>;
