use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clausewise_core::{
    config::Config,
    locale::{LocalizationTable, TextKey},
    summarizer::{FallbackReason, FallbackSummarizer, Summarizer, Summary},
    Language,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Summarizes documents through a hosted Hugging Face inference endpoint
/// (`facebook/bart-large-cnn` by default).
///
/// Never fails: timeouts, HTTP errors and unparseable bodies all degrade to
/// the localized placeholder. A 503 means the model is still loading; that
/// one case waits `warmup_backoff` and retries exactly once.
pub struct HuggingFaceSummarizer {
    client: reqwest::Client,
    pub url: String,
    api_key: String,
    pub timeout: Duration,
    pub warmup_backoff: Duration,
    pub max_input_chars: usize,
}

impl HuggingFaceSummarizer {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
            warmup_backoff: Duration::from_secs(10),
            max_input_chars: 1500,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_warmup_backoff(mut self, backoff: Duration) -> Self {
        self.warmup_backoff = backoff;
        self
    }

    pub fn with_max_input_chars(mut self, chars: usize) -> Self {
        self.max_input_chars = chars;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.summarizer_url, &config.huggingface_api_key)
            .with_timeout(Duration::from_secs(config.summarizer_timeout_s))
            .with_warmup_backoff(Duration::from_secs(config.summarizer_warmup_backoff_s))
            .with_max_input_chars(config.summarizer_max_input_chars)
    }

    /// Request body for `text`: localized instruction plus the truncated document.
    pub fn request_for(&self, text: &str, lang: Language) -> SummaryRequest {
        let prompt = LocalizationTable::builtin().text(TextKey::SummaryPrompt, lang);
        let excerpt: String = text.chars().take(self.max_input_chars).collect();
        SummaryRequest {
            inputs: format!("{prompt}: {excerpt}"),
            parameters: SummaryParameters::default(),
        }
    }

    async fn attempt(&self, body: &SummaryRequest) -> Attempt {
        let response = match self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "summarizer request timed out"
                );
                return Attempt::Failed(FallbackReason::Transport(format!(
                    "timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
            Err(e) => {
                warn!("summarizer request failed: {}", e);
                return Attempt::Failed(FallbackReason::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Attempt::Loading;
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!(status = %status, "summarizer returned non-200: {}", message);
            return Attempt::Failed(FallbackReason::Status(status.as_u16()));
        }

        let parsed: Vec<SummaryItem> = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("failed to parse summarizer response: {}", e);
                return Attempt::Failed(FallbackReason::Malformed(e.to_string()));
            }
        };

        match parsed
            .into_iter()
            .next()
            .and_then(|item| item.summary_text)
            .map(|s| s.trim().to_string())
        {
            Some(text) if !text.is_empty() => Attempt::Done(text),
            _ => {
                warn!("summarizer response carried no summary_text");
                Attempt::Failed(FallbackReason::Malformed("missing summary_text".into()))
            }
        }
    }
}

enum Attempt {
    Done(String),
    Loading,
    Failed(FallbackReason),
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest {
    pub inputs: String,
    pub parameters: SummaryParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryParameters {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
    pub temperature: f32,
}

impl Default for SummaryParameters {
    fn default() -> Self {
        Self {
            max_length: 200,
            min_length: 80,
            do_sample: false,
            temperature: 0.3,
        }
    }
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str, lang: Language) -> Summary {
        let body = self.request_for(text, lang);

        info!(
            url = %self.url,
            language = lang.code(),
            input_chars = text.chars().count().min(self.max_input_chars),
            "calling summarization API"
        );

        let mut retried = false;
        loop {
            match self.attempt(&body).await {
                Attempt::Done(summary) => {
                    info!(summary_len = summary.len(), retried, "summary received");
                    return Summary::remote(summary);
                }
                Attempt::Loading if !retried => {
                    info!(
                        backoff_secs = self.warmup_backoff.as_secs_f32(),
                        "model loading, retrying once after backoff"
                    );
                    tokio::time::sleep(self.warmup_backoff).await;
                    retried = true;
                }
                Attempt::Loading => {
                    warn!("model still loading after retry");
                    return Summary::placeholder(lang, FallbackReason::ModelLoading);
                }
                Attempt::Failed(reason) => {
                    debug!(%reason, "falling back to placeholder summary");
                    return Summary::placeholder(lang, reason);
                }
            }
        }
    }

    fn mode(&self) -> &'static str {
        "remote"
    }
}

/// The configured summarizer: remote when a credential is present, the
/// placeholder otherwise.
pub fn summarizer_from_config(config: &Config) -> Arc<dyn Summarizer> {
    if config.has_credential() {
        info!(url = %config.summarizer_url, "remote summarization enabled");
        Arc::new(HuggingFaceSummarizer::from_config(config))
    } else {
        info!("HUGGINGFACE_API_KEY not set, summaries use the placeholder text");
        Arc::new(FallbackSummarizer)
    }
}
