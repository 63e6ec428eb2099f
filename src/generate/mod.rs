pub mod deepseek;

use async_trait::async_trait;
use thiserror::Error;

pub use deepseek::DeepSeekClient;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Generator request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Generator is not configured: {0}")]
    NotConfigured(String),
    #[error("Generator returned an unexpected response: {0}")]
    Malformed(String),
}

/// Produces example sentences for a Chinese word. Either the full list
/// comes back or an error does; partial output is never returned.
#[async_trait]
pub trait ExampleGenerator: Send + Sync {
    async fn generate(&self, chinese: &str, count: u32) -> Result<Vec<String>, GenerateError>;
}
