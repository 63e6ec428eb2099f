use std::time::Duration;

use async_trait::async_trait;

use crate::enrich::{DefinitionProvider, EnrichmentError};

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Network fallback when the local dictionary has no entry. Returns a
/// single machine translation as the only definition.
pub struct GoogleTranslate {
    client: reqwest::Client,
}

impl GoogleTranslate {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(GoogleTranslate { client })
    }
}

#[async_trait]
impl DefinitionProvider for GoogleTranslate {
    fn name(&self) -> &'static str {
        "google-translate"
    }

    async fn definitions(&self, chinese: &str) -> Result<Option<Vec<String>>, EnrichmentError> {
        let body: serde_json::Value = self
            .client
            .get(TRANSLATE_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", "zh-CN"),
                ("tl", "en"),
                ("dt", "t"),
                ("q", chinese),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Response shape: [[["translated","original",..],..],..]
        let segments = body
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or(EnrichmentError::Malformed)?;

        let translation: String = segments
            .iter()
            .filter_map(|seg| seg.get(0).and_then(|t| t.as_str()))
            .collect();

        if translation.is_empty() {
            Ok(None)
        } else {
            Ok(Some(vec![translation]))
        }
    }
}
