use crate::error::Result;
use crate::llm::client::OllamaClient;
use crate::llm::prompts::{summary_user_prompt, SYSTEM_PROMPT_SUMMARY};
use crate::llm::types::ChatMessage;
use crate::schema::IncomeStatementRecord;
use crate::summary::NarrativeSummarizer;
use log::info;

pub const DEFAULT_MODEL: &str = "mistral";

pub struct OllamaSummarizer {
    client: OllamaClient,
    model: String,
}

impl OllamaSummarizer {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Reads `OLLAMA_BASE_URL` and `OLLAMA_MODEL`.
    pub fn from_env() -> Result<Self> {
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(OllamaClient::from_env()?, model))
    }
}

impl NarrativeSummarizer for OllamaSummarizer {
    fn summarize(&self, records: &[IncomeStatementRecord]) -> Result<String> {
        info!("Summarizing {} records with {}", records.len(), self.model);
        let records_json = serde_json::to_string_pretty(records)?;
        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT_SUMMARY),
            ChatMessage::user(summary_user_prompt(&records_json)),
        ];
        self.client.chat(&self.model, messages, Some(0.2))
    }
}
