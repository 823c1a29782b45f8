use crate::error::Result;
use crate::schema::IncomeStatementRecord;
use log::warn;

/// Produces a free-text account of validation results, typically with a language model.
pub trait NarrativeSummarizer {
    fn summarize(&self, records: &[IncomeStatementRecord]) -> Result<String>;
}

pub fn unavailable_summary(detail: &str) -> String {
    format!(
        "Summary unavailable: the language model call failed ({}).",
        detail
    )
}

/// Summary of `records`, or a fixed explanation embedding the error when the call fails.
pub fn summarize_or_explain(
    summarizer: &dyn NarrativeSummarizer,
    records: &[IncomeStatementRecord],
) -> String {
    match summarizer.summarize(records) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("Summarization failed: {}", e);
            unavailable_summary(&e.to_string())
        }
    }
}
