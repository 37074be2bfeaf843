pub mod huggingface;

pub use huggingface::{summarizer_from_config, HuggingFaceSummarizer};
