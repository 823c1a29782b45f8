use crate::error::{Result, ValidatorError};
use crate::pages::PagedDocument;
use log::debug;
use lopdf::Document;

/// A parsed PDF addressed by 0-based page index.
pub struct PdfDocument {
    doc: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes)?;
        let page_numbers = doc.get_pages().into_keys().collect();
        Ok(Self { doc, page_numbers })
    }

    fn page_number(&self, index: usize) -> Result<u32> {
        self.page_numbers
            .get(index)
            .copied()
            .ok_or(ValidatorError::PageOutOfRange {
                index,
                page_count: self.page_numbers.len(),
            })
    }
}

impl PagedDocument for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page_number = self.page_number(index)?;
        Ok(self.doc.extract_text(&[page_number])?)
    }
}

pub fn page_count(bytes: &[u8]) -> Result<usize> {
    Ok(Document::load_mem(bytes)?.get_pages().len())
}

/// Builds a new document holding a subset of the pages of another one.
pub trait PageSplicer {
    /// `pages` are 0-based indices. The result keeps the pages in their original order.
    fn splice(&self, source: &[u8], pages: &[usize]) -> Result<Vec<u8>>;
}

/// Splices by deleting every unselected page, so page objects are carried over untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfSplicer;

impl PageSplicer for LopdfSplicer {
    fn splice(&self, source: &[u8], pages: &[usize]) -> Result<Vec<u8>> {
        let mut doc = Document::load_mem(source)?;
        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();

        if let Some(&index) = pages.iter().find(|&&i| i >= page_numbers.len()) {
            return Err(ValidatorError::PageOutOfRange {
                index,
                page_count: page_numbers.len(),
            });
        }

        let to_delete: Vec<u32> = page_numbers
            .iter()
            .enumerate()
            .filter(|(index, _)| !pages.contains(index))
            .map(|(_, number)| *number)
            .collect();

        debug!(
            "Keeping {} of {} pages, deleting {}",
            page_numbers.len() - to_delete.len(),
            page_numbers.len(),
            to_delete.len()
        );

        doc.delete_pages(&to_delete);
        doc.prune_objects();

        let mut out = Vec::new();
        doc.save_to(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// One page per entry, one text line per inner entry.
    pub(crate) fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });

        let mut kids = Vec::new();
        for lines in pages {
            let mut operations = Vec::new();
            for (i, line) in lines.iter().enumerate() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
                operations.push(Operation::new(
                    "Td",
                    vec![50.into(), (800 - 14 * i as i64).into()],
                ));
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
                operations.push(Operation::new("ET", vec![]));
            }
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_reads_page_text_by_index() {
        let bytes = build_pdf(&[&["Cover page"], &["Total income 10", "Profit after tax 2"]]);
        let pdf = PdfDocument::from_bytes(&bytes).unwrap();
        assert_eq!(pdf.page_count(), 2);
        assert!(pdf.page_text(0).unwrap().contains("Cover page"));
        let second = pdf.page_text(1).unwrap();
        assert!(second.contains("Total income 10"));
        assert!(second.contains("Profit after tax 2"));
        assert!(matches!(
            pdf.page_text(2),
            Err(ValidatorError::PageOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn test_splice_keeps_selected_pages_in_order() {
        let bytes = build_pdf(&[&["page one"], &["page two"], &["page three"]]);
        let spliced = LopdfSplicer.splice(&bytes, &[0, 2]).unwrap();

        assert_eq!(page_count(&spliced).unwrap(), 2);
        let pdf = PdfDocument::from_bytes(&spliced).unwrap();
        assert!(pdf.page_text(0).unwrap().contains("page one"));
        assert!(pdf.page_text(1).unwrap().contains("page three"));
    }

    #[test]
    fn test_splice_rejects_unknown_page() {
        let bytes = build_pdf(&[&["only page"]]);
        let result = LopdfSplicer.splice(&bytes, &[0, 3]);
        assert!(matches!(
            result,
            Err(ValidatorError::PageOutOfRange {
                index: 3,
                page_count: 1
            })
        ));
    }

    #[test]
    fn test_garbage_bytes_are_a_pdf_error() {
        assert!(matches!(
            PdfDocument::from_bytes(b"not a pdf"),
            Err(ValidatorError::PdfError(_))
        ));
    }
}
