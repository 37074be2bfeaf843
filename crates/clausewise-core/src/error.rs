use thiserror::Error;

/// Failures surfaced to the caller of the analysis pipeline.
///
/// Degraded summarization is not an error; see
/// [`crate::summarizer::SummarySource`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Unsupported file type. Please upload PDF, Word, or text files. ({0})")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Failed to process document: {format} extraction failed: {cause}")]
    ExtractionFailed { format: &'static str, cause: String },

    #[error("Analysis error: {0}")]
    AnalysisFailure(String),
}

impl Error {
    /// True for errors the caller caused and could fix.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::UnsupportedFormat(_) | Error::FileTooLarge { .. }
        )
    }

    pub fn extraction(format: &'static str, cause: impl std::fmt::Display) -> Self {
        Error::ExtractionFailed {
            format,
            cause: cause.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
