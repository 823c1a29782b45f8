use crate::error::Result;

/// Text rendering of a document. Tables appear as pipe-delimited rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    pub markdown: String,
    pub page_count: usize,
}

/// Layout analysis that turns PDF bytes into markdown-like text.
pub trait DocumentConverter {
    /// `name` identifies the document in logs and remote requests.
    fn convert(&self, pdf: &[u8], name: &str) -> Result<ConvertedDocument>;
}

impl<F> DocumentConverter for F
where
    F: Fn(&[u8], &str) -> Result<ConvertedDocument>,
{
    fn convert(&self, pdf: &[u8], name: &str) -> Result<ConvertedDocument> {
        self(pdf, name)
    }
}
