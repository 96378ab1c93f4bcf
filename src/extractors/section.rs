// src/extractors/section.rs

// --- Imports ---
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::strategies;
use crate::config::AnalyzerConfig;
use crate::reader::PageText;

// --- Constants ---
const BASE_CONFIDENCE: f64 = 0.5;
const QUALITY_BONUS: f64 = 0.1;
const RICH_CONTENT_CHARS: usize = 100; // content longer than this earns a bonus
const DESCRIPTIVE_TITLE_CHARS: usize = 10; // so does a title longer than this
const MIN_TITLE_CHARS: usize = 3; // titles must be strictly longer

// --- Data Structures ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Header,
    Paragraph,
    List,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::Header => "header",
            DetectionMethod::Paragraph => "paragraph",
            DetectionMethod::List => "list",
        }
    }

    fn confidence_boost(&self) -> f64 {
        match self {
            DetectionMethod::Header => 0.3,
            DetectionMethod::Paragraph => 0.2,
            DetectionMethod::List => 0.1,
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw finding of one detection pass, before deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSection {
    pub section_title: String,
    pub page_number: u32,
    pub content: String,
    pub detection_method: DetectionMethod,
}

/// A deduplicated section of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub document: String,         // source filename
    pub section_id: String,       // "<filename>_section_<n>"
    pub section_title: String,
    pub page_number: u32,
    pub content: String,
    pub detection_method: DetectionMethod,
    pub word_count: usize,
    pub confidence_score: f64,    // 0.0..=1.0
}

impl Section {
    fn from_candidate(candidate: CandidateSection, filename: &str, index: usize) -> Self {
        let confidence_score =
            calculate_confidence(candidate.detection_method, &candidate.content, &candidate.section_title);

        Self {
            document: filename.to_string(),
            section_id: format!("{}_section_{}", filename, index),
            word_count: candidate.content.split_whitespace().count(),
            confidence_score,
            section_title: candidate.section_title,
            page_number: candidate.page_number,
            content: candidate.content,
            detection_method: candidate.detection_method,
        }
    }
}

// --- Main Detector Structure ---
#[derive(Debug, Clone, Default)]
pub struct SectionDetector {
    config: AnalyzerConfig,
}

impl SectionDetector {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Runs the header, paragraph and list passes over every page and
    /// deduplicates their combined findings.
    pub fn detect(&self, full_text: &str, filename: &str, pages: &[PageText]) -> Vec<Section> {
        tracing::debug!(
            "Detecting sections in {} ({} pages, {} chars)",
            filename,
            pages.len(),
            full_text.chars().count()
        );

        let headers = strategies::detect_headers(pages, &self.config);
        let paragraphs = strategies::detect_paragraphs(pages, &self.config);
        let lists = strategies::detect_lists(pages, &self.config);

        tracing::debug!(
            "{}: {} header, {} paragraph, {} list candidates",
            filename,
            headers.len(),
            paragraphs.len(),
            lists.len()
        );

        // Strategy order is the tie-breaker for duplicate titles
        let candidates = headers.into_iter().chain(paragraphs).chain(lists);
        self.process_detected_sections(candidates, filename)
    }

    /// Drops invalid and duplicate titles, keeping the first occurrence, and
    /// numbers the survivors. Stops once `max_sections` are kept.
    pub fn process_detected_sections<I>(&self, candidates: I, filename: &str) -> Vec<Section>
    where
        I: IntoIterator<Item = CandidateSection>,
    {
        let mut seen_titles: HashSet<String> = HashSet::new();
        let mut sections = Vec::new();

        for candidate in candidates {
            if sections.len() >= self.config.max_sections {
                tracing::debug!("{}: section limit {} reached", filename, self.config.max_sections);
                break;
            }
            if !is_valid_section(&candidate, &seen_titles) {
                continue;
            }

            seen_titles.insert(candidate.section_title.clone());
            let index = sections.len() + 1;
            sections.push(Section::from_candidate(candidate, filename, index));
        }

        sections
    }
}

fn is_valid_section(candidate: &CandidateSection, seen_titles: &HashSet<String>) -> bool {
    let title = &candidate.section_title;
    !title.is_empty() && title.chars().count() > MIN_TITLE_CHARS && !seen_titles.contains(title)
}

/// Base 0.5, plus a per-method boost and small bonuses for substantial
/// content and descriptive titles. Never above 1.0.
pub fn calculate_confidence(method: DetectionMethod, content: &str, title: &str) -> f64 {
    let mut score = BASE_CONFIDENCE + method.confidence_boost();

    if content.chars().count() > RICH_CONTENT_CHARS {
        score += QUALITY_BONUS;
    }
    if title.chars().count() > DESCRIPTIVE_TITLE_CHARS {
        score += QUALITY_BONUS;
    }

    score.min(1.0)
}
