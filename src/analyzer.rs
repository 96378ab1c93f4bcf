// src/analyzer.rs
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::extractors::section::{Section, SectionDetector};
use crate::reader::{DocumentReader, PageText};
use crate::utils::error::ReadError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub filename: String,
    pub total_pages: usize,
    pub total_characters: usize,
    pub total_sections: usize,
    pub processing_timestamp: String, // RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything learned about one document. A failed read is still a
/// `DocumentAnalysis`: empty pages and sections, no full text, and the cause in
/// `metadata.error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub metadata: DocumentMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    pub pages: Vec<PageText>,
    pub sections: Vec<Section>,
}

impl DocumentAnalysis {
    pub fn failed(filename: &str, error: &ReadError) -> Self {
        Self {
            metadata: DocumentMetadata {
                filename: filename.to_string(),
                total_pages: 0,
                total_characters: 0,
                total_sections: 0,
                processing_timestamp: chrono::Utc::now().to_rfc3339(),
                error: Some(error.to_string()),
            },
            full_text: None,
            pages: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.metadata.error.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentAnalyzer {
    detector: SectionDetector,
}

impl DocumentAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { detector: SectionDetector::new(config) }
    }

    /// Reads and analyzes one document. Read failures come back as a failed
    /// analysis rather than an error.
    pub async fn analyze_document<R: DocumentReader>(&self, reader: &R, path: &Path) -> DocumentAnalysis {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match reader.read(path).await {
            Ok(pages) => self.analyze_pages(&filename, pages),
            Err(e) => {
                tracing::error!("Error analyzing document {}: {}", path.display(), e);
                DocumentAnalysis::failed(&filename, &e)
            }
        }
    }

    /// Section detection over already-extracted pages.
    pub fn analyze_pages(&self, filename: &str, pages: Vec<PageText>) -> DocumentAnalysis {
        let full_text: String = pages.iter().map(|page| format!("{}\n", page.text)).collect();
        let sections = self.detector.detect(&full_text, filename, &pages);

        if pages.is_empty() || full_text.trim().is_empty() {
            tracing::warn!("{} has no extractable text", filename);
        }
        tracing::info!("Analyzed {}: {} pages, {} sections", filename, pages.len(), sections.len());

        DocumentAnalysis {
            metadata: DocumentMetadata {
                filename: filename.to_string(),
                total_pages: pages.len(),
                total_characters: full_text.chars().count(),
                total_sections: sections.len(),
                processing_timestamp: chrono::Utc::now().to_rfc3339(),
                error: None,
            },
            full_text: Some(full_text),
            pages,
            sections,
        }
    }
}
