// src/reader/text.rs
use std::future::Future;
use std::path::Path;

use super::{number_pages, DocumentReader, PageText};
use crate::utils::error::ReadError;

/// Page break emitted by pdftotext and most text exporters.
const FORM_FEED: char = '\x0c';

/// Reads UTF-8 text files, one page per form-feed separated chunk.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextReader;

impl PlainTextReader {
    /// Splits already-loaded text into pages.
    pub fn split_pages(content: &str) -> Vec<PageText> {
        if content.is_empty() {
            return Vec::new();
        }

        let mut raw_pages: Vec<&str> = content.split(FORM_FEED).collect();
        // A final form feed terminates the last page rather than opening a new one
        if raw_pages.len() > 1 && raw_pages.last().is_some_and(|last| last.trim().is_empty()) {
            raw_pages.pop();
        }

        number_pages(raw_pages)
    }
}

impl DocumentReader for PlainTextReader {
    fn read(&self, path: &Path) -> impl Future<Output = Result<Vec<PageText>, ReadError>> + Send {
        let path = path.to_path_buf();
        async move {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ReadError::Io { path: path.clone(), source })?;

            let pages = Self::split_pages(&content);
            tracing::debug!("Read {} pages ({} bytes) from {}", pages.len(), content.len(), path.display());
            Ok(pages)
        }
    }
}
