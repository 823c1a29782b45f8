//! # Income Statement Validator
//!
//! A library for locating income statements inside financial PDF reports, parsing their
//! tables into typed records, and reconciling a self-reported net income figure against
//! the one found in the document.
//!
//! ## Pipeline
//!
//! For every uploaded document:
//!
//! 1. **Page selection**: pages mentioning every income statement keyword are kept
//! 2. **Splicing**: the kept pages are copied into a derived PDF
//! 3. **Conversion**: the derived PDF is turned into markdown by a [`DocumentConverter`]
//! 4. **Table extraction**: pipe-delimited blocks mentioning a financial keyword are collected
//! 5. **Interpretation**: each block becomes an [`IncomeStatementRecord`], and records with
//!    no positive net income are dropped
//!
//! A failing document yields an [`ErrorResult`] and the rest of the batch carries on.
//! Uploaded and derived files live in an [`ArtifactStore`] that is cleared after each batch.
//!
//! ## Example
//!
//! ```rust,ignore
//! use income_statement_validator::*;
//!
//! let mut store = MemoryArtifactStore::new();
//! store.put("Q3FY25.pdf", std::fs::read("Q3FY25.pdf")?)?;
//!
//! let validator = StatementValidator::new(
//!     ValidatorConfig::default(),
//!     Box::new(LopdfSplicer),
//!     Box::new(DoclingConverter::from_env()?),
//! )?;
//!
//! let report = validator.run(
//!     &mut store,
//!     &[ValidationRequest::new("Q3FY25.pdf", Some(3834.0))],
//! );
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

pub mod artifacts;
pub mod batch;
pub mod cells;
pub mod config;
pub mod convert;
pub mod error;
pub mod interpreter;
pub mod pages;
pub mod pdf;
pub mod pipeline;
pub mod schema;
pub mod summary;
pub mod tables;

#[cfg(feature = "docling")]
pub mod docling;

#[cfg(feature = "ollama")]
pub mod llm;

pub use artifacts::{ArtifactStore, BatchScope, DirectoryArtifactStore, MemoryArtifactStore};
pub use batch::BatchValidator;
pub use cells::{extract_number, parse_column, CellError};
pub use config::{ValidatorConfig, DEFAULT_KEYWORDS};
pub use convert::{ConvertedDocument, DocumentConverter};
pub use error::{Result, ValidatorError};
pub use interpreter::{interpret, Reconciliation};
pub use pages::{select_pages, PagedDocument};
pub use pdf::{LopdfSplicer, PageSplicer, PdfDocument};
pub use pipeline::ValidationPipeline;
pub use schema::*;
pub use summary::{summarize_or_explain, NarrativeSummarizer};
pub use tables::{extract_tables, TableBlock};

#[cfg(feature = "docling")]
pub use docling::DoclingConverter;

#[cfg(feature = "ollama")]
pub use llm::{OllamaClient, OllamaSummarizer};

use chrono::{DateTime, Utc};
use log::info;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything returned to the caller of one batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub results: Vec<ValidationOutcome>,
    /// Free-text summary, absent when no summarizer is configured
    pub summary: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ValidationReport {
    pub fn records(&self) -> impl Iterator<Item = &IncomeStatementRecord> {
        self.results.iter().filter_map(ValidationOutcome::as_record)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ErrorResult> {
        self.results.iter().filter_map(ValidationOutcome::as_error)
    }
}

/// Entry point: batch validation followed by an optional narrative summary.
pub struct StatementValidator {
    batch: BatchValidator,
    summarizer: Option<Box<dyn NarrativeSummarizer>>,
}

impl StatementValidator {
    /// Fails with [`ValidatorError::InvalidConfig`] when `config` does not validate.
    pub fn new(
        config: ValidatorConfig,
        splicer: Box<dyn PageSplicer>,
        converter: Box<dyn DocumentConverter>,
    ) -> Result<Self> {
        let pipeline = ValidationPipeline::new(config, splicer, converter)?;
        Ok(Self {
            batch: BatchValidator::new(pipeline),
            summarizer: None,
        })
    }

    pub fn with_summarizer(mut self, summarizer: Box<dyn NarrativeSummarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn validate_batch(
        &self,
        store: &mut dyn ArtifactStore,
        requests: &[ValidationRequest],
    ) -> Vec<ValidationOutcome> {
        self.batch.validate_batch(store, requests)
    }

    /// Never fails: document errors are reported per entry and a failed summary is replaced
    /// by an explanation.
    pub fn run(
        &self,
        store: &mut dyn ArtifactStore,
        requests: &[ValidationRequest],
    ) -> ValidationReport {
        let results = self.validate_batch(store, requests);

        let summary = self.summarizer.as_deref().map(|summarizer| {
            let records: Vec<IncomeStatementRecord> = results
                .iter()
                .filter_map(ValidationOutcome::as_record)
                .cloned()
                .collect();
            summarize_or_explain(summarizer, &records)
        });

        info!(
            "Batch finished with {} results (summary: {})",
            results.len(),
            summary.is_some()
        );

        ValidationReport {
            results,
            summary,
            generated_at: Utc::now(),
        }
    }
}

/// Validates a batch with the default configuration and the lopdf splicer.
pub fn validate_batch(
    store: &mut dyn ArtifactStore,
    converter: Box<dyn DocumentConverter>,
    requests: &[ValidationRequest],
) -> Result<Vec<ValidationOutcome>> {
    let validator =
        StatementValidator::new(ValidatorConfig::default(), Box::new(LopdfSplicer), converter)?;
    Ok(validator.validate_batch(store, requests))
}
