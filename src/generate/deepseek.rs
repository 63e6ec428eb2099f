use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::generate::{ExampleGenerator, GenerateError};

const MODEL: &str = "deepseek-chat";

/// DeepSeek-backed sentence generator (OpenAI-compatible chat
/// completions with a JSON response format).
pub struct DeepSeekClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct ExamplesPayload {
    examples: Vec<String>,
}

impl DeepSeekClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(DeepSeekClient {
            client,
            base_url,
            api_key,
        })
    }

    fn system_prompt(count: u32) -> String {
        format!(
            "你是一位中文教师，面向HSK4水平的学生。当学生给出一个词语时，你需用中文回复{}个不同的例句来演示该词的用法。\
             请以JSON格式输出，键为'examples'，值为例句组成的数组。不要编号，不要拼音、英语或任何额外解释。",
            count
        )
    }
}

/// The model replies with a JSON object {"examples": [...]}.
fn parse_examples_content(content: &str) -> Result<Vec<String>, GenerateError> {
    let payload: ExamplesPayload = serde_json::from_str(content)
        .map_err(|e| GenerateError::Malformed(format!("invalid examples payload: {}", e)))?;
    Ok(payload.examples)
}

#[async_trait]
impl ExampleGenerator for DeepSeekClient {
    async fn generate(&self, chinese: &str, count: u32) -> Result<Vec<String>, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerateError::NotConfigured("DEEPSEEK_API_KEY is not set".to_string())
        })?;

        let body = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": Self::system_prompt(count) },
                { "role": "user", "content": chinese },
            ],
            "stream": false,
            "response_format": { "type": "json_object" },
        });

        let response: ChatResponse = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| GenerateError::Malformed("empty choices".to_string()))?;

        parse_examples_content(content)
    }
}
