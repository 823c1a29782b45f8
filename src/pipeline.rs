use crate::artifacts::ArtifactStore;
use crate::config::ValidatorConfig;
use crate::convert::DocumentConverter;
use crate::error::Result;
use crate::interpreter::{interpret, round2, Reconciliation};
use crate::pages::select_pages;
use crate::pdf::{PageSplicer, PdfDocument};
use crate::schema::IncomeStatementRecord;
use crate::tables::extract_tables;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Name of the derived document holding the selected pages of `document_id`.
pub fn filtered_artifact_name(document_id: &str) -> String {
    let stem = Path::new(document_id)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(document_id);
    format!("{}_filtered_income.pdf", stem)
}

/// Runs one document through page selection, splicing, conversion and interpretation.
pub struct ValidationPipeline {
    config: ValidatorConfig,
    splicer: Box<dyn PageSplicer>,
    converter: Box<dyn DocumentConverter>,
}

impl ValidationPipeline {
    pub fn new(
        config: ValidatorConfig,
        splicer: Box<dyn PageSplicer>,
        converter: Box<dyn DocumentConverter>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            splicer,
            converter,
        })
    }

    /// Income statement records found in the stored document `document_id`.
    ///
    /// An empty result means no income statement page, no relevant table or no positive
    /// net income was found. Errors mean the document itself could not be processed.
    pub fn validate_one(
        &self,
        store: &mut dyn ArtifactStore,
        document_id: &str,
        submitted_net_income: Option<f64>,
    ) -> Result<Vec<IncomeStatementRecord>> {
        let start = Instant::now();

        let source = store.get(document_id)?;
        let document = PdfDocument::from_bytes(&source)?;
        let pages = select_pages(
            &document,
            &self.config.page_keywords,
            self.config.min_keyword_hits,
        )?;

        if pages.is_empty() {
            debug!("No income statement pages found in {}", document_id);
            return Ok(Vec::new());
        }
        debug!("Income statement pages in {}: {:?}", document_id, pages);

        let filtered_name = filtered_artifact_name(document_id);
        let filtered = self.splicer.splice(&source, &pages)?;
        store.put(&filtered_name, filtered.clone())?;

        let converted = self.converter.convert(&filtered, &filtered_name)?;
        let tables = extract_tables(&converted.markdown, &self.config.table_keywords);
        let reconciliation = Reconciliation::from_tolerance(self.config.net_income_tolerance);

        let mut records: Vec<IncomeStatementRecord> = tables
            .iter()
            .map(|table| interpret(table, submitted_net_income, reconciliation))
            .filter(IncomeStatementRecord::is_reportable)
            .collect();

        let elapsed = round2(start.elapsed().as_secs_f64());
        for record in &mut records {
            record.provenance.file_name = document_id.to_string();
            record.provenance.filtered_pdf = filtered_name.clone();
            record.provenance.page_count = converted.page_count;
            record.provenance.processing_time_seconds = elapsed;
        }

        info!(
            "{}: {} candidate tables, {} records",
            document_id,
            tables.len(),
            records.len()
        );
        Ok(records)
    }
}
