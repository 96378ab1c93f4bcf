// src/reader/pdf.rs
use std::future::Future;
use std::path::Path;

use lopdf::Document;

use super::{DocumentReader, PageText};
use crate::utils::error::ReadError;

/// Extracts page text straight from PDF bytes with lopdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfReader;

impl PdfReader {
    /// One page per PDF page, in page order. Pages without a text layer come
    /// back empty rather than failing the document.
    pub fn parse_pages(bytes: &[u8]) -> Result<Vec<PageText>, ReadError> {
        let doc = Document::load_mem(bytes).map_err(|e| ReadError::Pdf(format!("failed to load PDF: {}", e)))?;

        let mut pages = Vec::new();
        for (page_number, _page_id) in doc.get_pages() {
            let text = doc
                .extract_text(&[page_number])
                .map_err(|e| ReadError::Pdf(format!("failed to extract text from page {}: {}", page_number, e)))?;
            pages.push(PageText::new(page_number, &text));
        }

        Ok(pages)
    }
}

impl DocumentReader for PdfReader {
    fn read(&self, path: &Path) -> impl Future<Output = Result<Vec<PageText>, ReadError>> + Send {
        let path = path.to_path_buf();
        async move {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| ReadError::Io { path: path.clone(), source })?;

            // lopdf parsing is CPU-bound
            let pages = tokio::task::spawn_blocking(move || Self::parse_pages(&bytes))
                .await
                .map_err(|e| ReadError::Pdf(format!("extraction task failed: {}", e)))??;

            tracing::debug!("Extracted {} pages from {}", pages.len(), path.display());
            Ok(pages)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_one_page_per_pdf_page() {
        let bytes = fixtures::pdf_with_pages(&["METHODS OVERVIEW", "Results and findings"]);
        let pages = PdfReader::parse_pages(&bytes).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert!(pages[0].text.contains("METHODS OVERVIEW"));
        assert_eq!(pages[1].page_number, 2);
        assert!(pages[1].text.contains("Results and findings"));
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let result = PdfReader::parse_pages(b"%PDF-1.7 not really a pdf");
        assert!(matches!(result, Err(ReadError::Pdf(_))));
    }

    #[test]
    fn reads_pdf_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.pdf");
        std::fs::write(&path, fixtures::pdf_with_pages(&["Literature review notes"])).unwrap();

        let pages = tokio_test::block_on(PdfReader.read(&path)).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text.contains("Literature review notes"));
    }
}
