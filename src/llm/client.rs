use crate::error::{Result, ValidatorError};
use crate::llm::types::*;
use reqwest::blocking::Client;
use std::time::Duration;

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Reads `OLLAMA_BASE_URL`, defaulting to a local server.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        Self::new(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub(crate) fn chat(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        temperature: Option<f32>,
    ) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let payload = ChatRequest {
            model: model.to_string(),
            messages,
            stream: false,
            options: temperature.map(|temperature| ChatOptions { temperature }),
        };

        let res = self.client.post(&url).json(&payload).send()?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text()?;
            return Err(ValidatorError::SummarizationFailed(format!(
                "Ollama API Error (status {}): {}",
                status, err_text
            )));
        }

        let body: ChatResponse = res.json()?;
        if let Some(error) = body.error {
            return Err(ValidatorError::SummarizationFailed(error));
        }

        let message = body.message.ok_or_else(|| {
            ValidatorError::SummarizationFailed("No message returned".to_string())
        })?;

        if message.content.trim().is_empty() {
            return Err(ValidatorError::SummarizationFailed(
                "Model returned an empty message".to_string(),
            ));
        }

        Ok(message.content)
    }
}
