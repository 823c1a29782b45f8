use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Page index {index} is out of range for a document with {page_count} pages")]
    PageOutOfRange { index: usize, page_count: usize },

    #[error("Invalid artifact name '{0}'")]
    InvalidArtifactName(String),

    #[error("Document conversion failed: {0}")]
    ConversionFailed(String),

    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(String),
}

#[cfg(any(feature = "docling", feature = "ollama"))]
impl From<reqwest::Error> for ValidatorError {
    fn from(e: reqwest::Error) -> Self {
        ValidatorError::HttpError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
