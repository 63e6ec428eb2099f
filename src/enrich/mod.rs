pub mod cedict;
pub mod google;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use cedict::{Cedict, CedictDefinitions, DictEntry};
pub use google::GoogleTranslate;

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("Translation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Translation service returned an unexpected response")]
    Malformed,
    #[error("No definitions found for '{0}'")]
    NoDefinitions(String),
}

/// One source of English definitions. `Ok(None)` means "nothing here,
/// try the next provider"; an error aborts the whole chain.
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn definitions(&self, chinese: &str) -> Result<Option<Vec<String>>, EnrichmentError>;
}

pub struct Enrichment {
    pub pinyin: String,
    pub definitions: Vec<String>,
}

/// Derives pinyin and definitions for a Chinese term. Definition
/// providers are tried in order until one yields a non-empty result.
pub struct Enricher {
    cedict: Arc<Cedict>,
    providers: Vec<Box<dyn DefinitionProvider>>,
}

impl Enricher {
    pub fn new(cedict: Arc<Cedict>, providers: Vec<Box<dyn DefinitionProvider>>) -> Self {
        Enricher { cedict, providers }
    }

    pub fn romanize(&self, text: &str) -> String {
        self.cedict.romanize(text)
    }

    pub async fn definitions(&self, chinese: &str) -> Result<Vec<String>, EnrichmentError> {
        for provider in &self.providers {
            match provider.definitions(chinese).await? {
                Some(defs) if !defs.is_empty() => return Ok(defs),
                _ => {
                    log::info!(
                        "No definitions from {} for '{}', trying next provider",
                        provider.name(),
                        chinese
                    );
                }
            }
        }

        Err(EnrichmentError::NoDefinitions(chinese.to_string()))
    }

    pub async fn enrich(&self, chinese: &str) -> Result<Enrichment, EnrichmentError> {
        let definitions = self.definitions(chinese).await?;

        Ok(Enrichment {
            pinyin: self.romanize(chinese),
            definitions,
        })
    }
}
