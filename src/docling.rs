use crate::convert::{ConvertedDocument, DocumentConverter};
use crate::error::{Result, ValidatorError};
use crate::pdf::page_count;
use log::{debug, info};
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_DOCLING_URL: &str = "http://localhost:5001";
const CONVERT_PATH: &str = "/v1/convert/file";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    document: ConvertedContent,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ConvertedContent {
    md_content: Option<String>,
}

/// Converter backed by a docling-serve instance.
#[derive(Clone)]
pub struct DoclingConverter {
    client: Client,
    base_url: String,
}

impl DoclingConverter {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Reads `DOCLING_BASE_URL`, defaulting to a local instance.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("DOCLING_BASE_URL").unwrap_or_else(|_| DEFAULT_DOCLING_URL.to_string());
        Self::new(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl DocumentConverter for DoclingConverter {
    fn convert(&self, pdf: &[u8], name: &str) -> Result<ConvertedDocument> {
        let pages = page_count(pdf)?;
        info!("Converting {} ({} pages) with docling", name, pages);

        let part = multipart::Part::bytes(pdf.to_vec())
            .file_name(name.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new()
            .part("files", part)
            .text("to_formats", "md");

        let url = format!("{}{}", self.base_url, CONVERT_PATH);
        let res = self.client.post(&url).multipart(form).send()?;
        let status = res.status();

        if !status.is_success() {
            let error_text = res.text()?;
            return Err(ValidatorError::ConversionFailed(format!(
                "docling returned status {}: {}",
                status, error_text
            )));
        }

        let body: ConvertResponse = res.json()?;
        if !body.errors.is_empty() {
            debug!("docling reported errors for {}: {:?}", name, body.errors);
        }

        let markdown = body.document.md_content.ok_or_else(|| {
            ValidatorError::ConversionFailed(format!(
                "docling returned no markdown for {} (status {})",
                name,
                body.status.as_deref().unwrap_or("unknown")
            ))
        })?;

        Ok(ConvertedDocument {
            markdown,
            page_count: pages,
        })
    }
}
