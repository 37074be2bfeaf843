use async_trait::async_trait;
use serde::Serialize;

use crate::locale::{LocalizationTable, TextKey};
use crate::types::Language;

/// Why a summary came from the placeholder rather than the remote model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No credential configured; permanent fallback mode.
    MissingCredential,
    /// The model was still loading after the single retry.
    ModelLoading,
    /// Non-success HTTP status other than the loading signal.
    Status(u16),
    /// Network failure or timeout.
    Transport(String),
    /// Response body did not contain a usable summary.
    Malformed(String),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::MissingCredential => f.write_str("no API credential configured"),
            FallbackReason::ModelLoading => f.write_str("model still loading after retry"),
            FallbackReason::Status(code) => write!(f, "HTTP {code}"),
            FallbackReason::Transport(e) => write!(f, "transport error: {e}"),
            FallbackReason::Malformed(e) => write!(f, "malformed response: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    Remote,
    Fallback(FallbackReason),
}

/// A summary is always present; `source` records which path produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub source: SummarySource,
}

impl Summary {
    pub fn remote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: SummarySource::Remote,
        }
    }

    /// Localized placeholder for `lang`.
    pub fn placeholder(lang: Language, reason: FallbackReason) -> Self {
        Self {
            text: LocalizationTable::builtin()
                .text(TextKey::PlaceholderSummary, lang)
                .to_string(),
            source: SummarySource::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, SummarySource::Fallback(_))
    }
}

/// Produces a short summary of a document. Implementations never fail:
/// any problem degrades to [`Summary::placeholder`].
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, lang: Language) -> Summary;

    /// "remote" or "fallback", for health reporting.
    fn mode(&self) -> &'static str;
}

/// Always answers with the localized placeholder.
#[derive(Debug, Clone, Default)]
pub struct FallbackSummarizer;

#[async_trait]
impl Summarizer for FallbackSummarizer {
    async fn summarize(&self, _text: &str, lang: Language) -> Summary {
        Summary::placeholder(lang, FallbackReason::MissingCredential)
    }

    fn mode(&self) -> &'static str {
        "fallback"
    }
}
