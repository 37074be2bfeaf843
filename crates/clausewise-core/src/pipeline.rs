use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::analyzer::ClauseAnalyzer;
use crate::error::{Error, Result};
use crate::extract::TextExtractor;
use crate::summarizer::{FallbackReason, Summarizer, SummarySource};
use crate::types::{AnalysisResult, Language};

/// An uploaded document as received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// One analysis request: a file, raw text, or both (the file wins).
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    pub file: Option<Upload>,
    pub text: Option<String>,
    /// Any language code; unsupported codes render English.
    pub language: String,
}

const MISSING_INPUT: &str = "Either file or text must be provided";

/// Extraction → summarization → clause analysis, strictly in sequence.
pub struct Pipeline {
    extractor: TextExtractor,
    summarizer: Arc<dyn Summarizer>,
}

impl Pipeline {
    pub fn new(extractor: TextExtractor, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            extractor,
            summarizer,
        }
    }

    pub fn summarizer_mode(&self) -> &'static str {
        self.summarizer.mode()
    }

    pub fn extractor(&self) -> &TextExtractor {
        &self.extractor
    }

    /// Document text for `req`, validated to be non-blank.
    pub async fn resolve_text(&self, req: AnalyzeRequest) -> Result<String> {
        if let Some(upload) = req.file {
            let extractor = self.extractor.clone();
            let filename = upload.filename.clone();
            let text = tokio::task::spawn_blocking(move || {
                extractor.extract(&upload.bytes, upload.media_type.as_deref(), &upload.filename)
            })
            .await
            .map_err(|e| Error::AnalysisFailure(format!("extraction task failed: {e}")))??;

            if text.trim().is_empty() {
                return Err(Error::InvalidInput(format!(
                    "No text could be extracted from {filename}"
                )));
            }
            return Ok(text);
        }

        match req.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(Error::InvalidInput(MISSING_INPUT.into())),
        }
    }

    pub async fn run(&self, req: AnalyzeRequest) -> Result<AnalysisResult> {
        let lang = Language::resolve(&req.language);
        if Language::from_code(&req.language).is_none() {
            info!(requested = %req.language, "unsupported language code, rendering English");
        }

        let text = self.resolve_text(req).await?;
        let summary = self.summarizer.summarize(&text, lang).await;
        match &summary.source {
            SummarySource::Remote => {}
            SummarySource::Fallback(FallbackReason::MissingCredential) => {
                debug!(language = lang.code(), "no summarizer credential, using placeholder");
            }
            SummarySource::Fallback(reason) => {
                warn!(%reason, language = lang.code(), "summarization degraded, using placeholder");
            }
        }

        let result = ClauseAnalyzer::default().analyze_in(&text, &summary.text, lang);
        info!(
            language = lang.code(),
            chars = text.chars().count(),
            findings = result.findings.len(),
            risk_score = result.risk_score,
            risk_band = ?result.risk_band(),
            "document analyzed"
        );
        Ok(result)
    }
}
