use crate::error::{Result, ValidatorError};
use log::debug;

/// Read-only, page-addressable text view of a document.
pub trait PagedDocument {
    fn page_count(&self) -> usize;

    /// Plain text of the page at a 0-based index.
    fn page_text(&self, index: usize) -> Result<String>;
}

impl PagedDocument for Vec<String> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.get(index)
            .cloned()
            .ok_or(ValidatorError::PageOutOfRange {
                index,
                page_count: self.len(),
            })
    }
}

/// Number of keywords contained in `text`, compared case-insensitively as substrings.
pub fn keyword_hits<S: AsRef<str>>(text: &str, keywords: &[S]) -> usize {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| lowered.contains(&k.as_ref().to_lowercase()))
        .count()
}

/// Returns the 0-based indices, in document order, of every page on which at least
/// `min_hits` of the keywords occur. An empty result means no income statement was found.
pub fn select_pages<D, S>(document: &D, keywords: &[S], min_hits: usize) -> Result<Vec<usize>>
where
    D: PagedDocument + ?Sized,
    S: AsRef<str>,
{
    let mut selected = Vec::new();
    for index in 0..document.page_count() {
        let text = document.page_text(index)?;
        let hits = keyword_hits(&text, keywords);
        if hits >= min_hits {
            debug!("Page {} matched {} keywords", index, hits);
            selected.push(index);
        }
    }
    Ok(selected)
}
