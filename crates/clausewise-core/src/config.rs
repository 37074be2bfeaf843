use std::collections::HashMap;
use std::path::Path;

use crate::extract::{TextExtractor, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES};

pub const DEFAULT_SUMMARIZER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Full service configuration.
/// Values come from the process environment first, then `.env`, then defaults.
#[derive(Clone)]
pub struct Config {
    /// Inference API token. Empty means permanent fallback summarization.
    pub huggingface_api_key: String,
    pub summarizer_url: String,
    pub summarizer_timeout_s: u64,
    /// Wait before the single retry on a "model loading" response.
    pub summarizer_warmup_backoff_s: u64,
    /// Characters of document text sent for summarization.
    pub summarizer_max_input_chars: usize,

    // Web
    pub web_bind: String,
    pub web_port: u16,
    pub cors_origins: Vec<String>,

    // Uploads
    pub max_upload_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("huggingface_api_key", &if self.has_credential() { "<set>" } else { "<unset>" })
            .field("summarizer_url", &self.summarizer_url)
            .field("summarizer_timeout_s", &self.summarizer_timeout_s)
            .field("summarizer_warmup_backoff_s", &self.summarizer_warmup_backoff_s)
            .field("summarizer_max_input_chars", &self.summarizer_max_input_chars)
            .field("web_bind", &self.web_bind)
            .field("web_port", &self.web_port)
            .field("cors_origins", &self.cors_origins)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("allowed_extensions", &self.allowed_extensions)
            .finish()
    }
}

fn parse_dotenv(path: &Path) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Ok(contents) = std::fs::read_to_string(path) else {
        return map;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim().trim_matches('"');
            map.insert(k.trim().to_string(), v.to_string());
        }
    }
    map
}

/// Key lookup over process env with a `.env` fallback.
pub struct EnvSource {
    dotenv: HashMap<String, String>,
    use_process_env: bool,
}

impl EnvSource {
    pub fn process(dotenv_path: impl AsRef<Path>) -> Self {
        Self {
            dotenv: parse_dotenv(dotenv_path.as_ref()),
            use_process_env: true,
        }
    }

    /// Lookup over a fixed map only; ignores the process environment.
    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self {
            dotenv: map,
            use_process_env: false,
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        let from_env = if self.use_process_env {
            std::env::var(key).ok()
        } else {
            None
        };
        from_env.or_else(|| self.dotenv.get(key).cloned())
    }

    fn get_str(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn get_u16(&self, key: &str, default: u16) -> u16 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn get_usize(&self, key: &str, default: usize) -> usize {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn get_list(&self, key: &str, default: &[&str]) -> Vec<String> {
        match self.get(key) {
            Some(raw) => split_list(&raw),
            None => default.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_source(&EnvSource::process(".env"))
    }

    pub fn from_source(src: &EnvSource) -> Self {
        Config {
            huggingface_api_key: src.get_str("HUGGINGFACE_API_KEY", "").trim().to_string(),
            summarizer_url: src.get_str("SUMMARIZER_URL", DEFAULT_SUMMARIZER_URL),
            summarizer_timeout_s: src.get_u64("SUMMARIZER_TIMEOUT_S", 30),
            summarizer_warmup_backoff_s: src.get_u64("SUMMARIZER_WARMUP_BACKOFF_S", 10),
            summarizer_max_input_chars: src.get_usize("SUMMARIZER_MAX_INPUT_CHARS", 1500),
            web_bind: src.get_str("WEB_BIND", "0.0.0.0"),
            web_port: src.get_u16("WEB_PORT", 8000),
            cors_origins: src.get_list("CORS_ORIGINS", &["http://localhost:3000"]),
            max_upload_bytes: src.get_usize("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            allowed_extensions: src.get_list("ALLOWED_EXTENSIONS", DEFAULT_ALLOWED_EXTENSIONS),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.huggingface_api_key.is_empty()
    }

    pub fn extractor(&self) -> TextExtractor {
        TextExtractor::new(self.allowed_extensions.clone(), self.max_upload_bytes)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_source(&EnvSource::from_map(HashMap::new()))
    }
}
