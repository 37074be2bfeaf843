pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod locale;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
