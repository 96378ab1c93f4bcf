// src/reader/mod.rs
//! Page text readers.
//!
//! Each reader hands back one [`PageText`] per page: PDFs through lopdf, plain
//! text split on form feeds, HTML exports through scraper.

pub mod html;
pub mod pdf;
pub mod text;

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::error::ReadError;

pub use html::HtmlReader;
pub use pdf::PdfReader;
pub use text::PlainTextReader;

/// Extracted text of a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: u32, // 1-based
    pub text: String,     // trimmed page text
    pub char_count: usize, // characters before trimming
}

impl PageText {
    pub fn new(page_number: u32, raw: &str) -> Self {
        Self {
            page_number,
            text: raw.trim().to_string(),
            char_count: raw.chars().count(),
        }
    }
}

/// Numbers raw page strings from 1 in order.
pub fn number_pages<'a, I>(raw_pages: I) -> Vec<PageText>
where
    I: IntoIterator<Item = &'a str>,
{
    raw_pages
        .into_iter()
        .zip(1u32..)
        .map(|(raw, page_number)| PageText::new(page_number, raw))
        .collect()
}

/// Anything that can turn a document path into ordered page text.
pub trait DocumentReader {
    fn read(&self, path: &Path) -> impl Future<Output = Result<Vec<PageText>, ReadError>> + Send;
}

/// Picks a reader by file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileReader {
    text: PlainTextReader,
    html: HtmlReader,
    pdf: PdfReader,
}

impl FileReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text an external extractor left next to a PDF, used when lopdf fails.
    fn pdf_sidecar(path: &Path) -> PathBuf {
        path.with_extension("txt")
    }
}

impl DocumentReader for FileReader {
    fn read(&self, path: &Path) -> impl Future<Output = Result<Vec<PageText>, ReadError>> + Send {
        let path = path.to_path_buf();
        let text = self.text;
        let html = self.html;
        let pdf = self.pdf;
        async move {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase())
                .unwrap_or_default();

            match extension.as_str() {
                "html" | "htm" => html.read(&path).await,
                "pdf" => match pdf.read(&path).await {
                    Err(ReadError::Pdf(reason)) => {
                        let sidecar = Self::pdf_sidecar(&path);
                        if !tokio::fs::try_exists(&sidecar).await.unwrap_or(false) {
                            return Err(ReadError::Pdf(reason));
                        }
                        tracing::warn!(
                            "PDF extraction failed for {} ({}), reading {} instead",
                            path.display(),
                            reason,
                            sidecar.display()
                        );
                        text.read(&sidecar).await
                    }
                    other => other,
                },
                _ => text.read(&path).await,
            }
        }
    }
}
