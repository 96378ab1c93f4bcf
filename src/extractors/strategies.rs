// src/extractors/strategies.rs
//! The three independent detection passes. Each one walks every page and
//! returns raw candidates; deduplication happens later in `section.rs`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::section::{CandidateSection, DetectionMethod};
use crate::config::AnalyzerConfig;
use crate::reader::PageText;

// --- Constants ---
const MIN_HEADER_LINE_LENGTH: usize = 5; // shorter lines are never headers
const MAX_TITLE_CHARS: usize = 50;       // paragraph/list titles are cut here
const ELLIPSIS: &str = "...";

// --- Regex Patterns (Lazy Static) ---
// Header patterns in priority order; the first one that yields an acceptable title wins.
static HEADER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Pattern 1: ALL CAPS line
        r"^([A-Z][A-Z\s]{5,40})$",

        // Pattern 2: Numbered heading, "2. Methods" or "1.1 Supervised Learning"; the number stays in the title
        r"^(\d+(?:\.\d+)*\.?\s+[A-Z][^.!?]*)$",

        // Pattern 3: Title Case followed by a colon
        r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*):",

        // Pattern 4: "Chapter 3: ..." / "Section 2 - ..."
        r"(?:Chapter|Section)\s+\d+[:\-\s]*(.+)",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

// Lines that end the content gathered under a header
static HEADER_STOP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^[A-Z][A-Z\s]{5,}$",  // ALL CAPS, six characters or more
        r"^\d+\.?\s+[A-Z]",     // single-level numbered, capitalized
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

static LIST_ITEM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^[•\-\*]\s+.+",     // bullets
        r"^\d+[\.\)]\s+.+",   // 1. or 1)
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

// --- Header strategy ---

/// Scans each page line by line for header-looking lines.
pub fn detect_headers(pages: &[PageText], config: &AnalyzerConfig) -> Vec<CandidateSection> {
    let mut sections = Vec::new();

    for page in pages {
        for line in page.text.split('\n') {
            let line = line.trim();
            if line.chars().count() < MIN_HEADER_LINE_LENGTH {
                continue;
            }

            let Some(title) = match_header(line) else { continue };
            let content = extract_content_after_header(&page.text, &title, config.max_section_length);
            if content.is_empty() {
                tracing::trace!("Header '{}' on page {} has no content, skipped", title, page.page_number);
                continue;
            }

            sections.push(CandidateSection {
                section_title: title,
                page_number: page.page_number,
                content,
                detection_method: DetectionMethod::Header,
            });
        }
    }

    sections
}

/// Returns the cleaned title of the first header pattern that accepts `line`.
pub fn match_header(line: &str) -> Option<String> {
    for pattern in HEADER_PATTERNS.iter() {
        let Some(caps) = pattern.captures(line) else { continue };
        let Some(group) = caps.get(1) else { continue };

        let title = group.as_str().trim().trim_end_matches(':');
        let length = title.chars().count();
        if length > 5 && length < 80 {
            return Some(title.to_string());
        }
    }
    None
}

/// Joins the lines after the first line containing `title` until the next
/// header-looking line, or until the gathered text passes `max_length`.
pub fn extract_content_after_header(page_text: &str, title: &str, max_length: usize) -> String {
    let mut content_lines: Vec<&str> = Vec::new();
    let mut joined_length = 0usize;
    let mut found_header = false;

    for line in page_text.split('\n') {
        let line = line.trim();

        if line.contains(title) {
            found_header = true;
            continue;
        }
        if !found_header || line.is_empty() {
            continue;
        }

        if is_header_boundary(line) || joined_length > max_length {
            break;
        }

        if !content_lines.is_empty() {
            joined_length += 1; // separator
        }
        joined_length += line.chars().count();
        content_lines.push(line);
    }

    content_lines.join(" ")
}

fn is_header_boundary(line: &str) -> bool {
    HEADER_STOP_PATTERNS.iter().any(|re| re.is_match(line))
}

// --- Paragraph strategy ---

/// Splits pages on blank lines and keeps blocks within the configured length range.
pub fn detect_paragraphs(pages: &[PageText], config: &AnalyzerConfig) -> Vec<CandidateSection> {
    let mut sections = Vec::new();

    for page in pages {
        let paragraphs = page.text.split("\n\n").map(str::trim).filter(|p| !p.is_empty());

        for paragraph in paragraphs {
            let length = paragraph.chars().count();
            if length < config.min_section_length || length > config.max_section_length {
                continue;
            }

            sections.push(CandidateSection {
                section_title: paragraph_title(paragraph),
                page_number: page.page_number,
                content: paragraph.to_string(),
                detection_method: DetectionMethod::Paragraph,
            });
        }
    }

    sections
}

/// First sentence (up to the first ". "), truncated.
pub fn paragraph_title(paragraph: &str) -> String {
    let first_sentence = paragraph.split(". ").next().unwrap_or(paragraph);
    truncate_title(first_sentence)
}

// --- List strategy ---

/// Finds list items and gathers their wrapped lines and sibling items.
pub fn detect_lists(pages: &[PageText], config: &AnalyzerConfig) -> Vec<CandidateSection> {
    let mut sections = Vec::new();

    for page in pages {
        let lines: Vec<&str> = page.text.split('\n').collect();

        for (index, line) in lines.iter().enumerate() {
            let line = line.trim();
            if !is_list_item(line) {
                continue;
            }

            let content = gather_list_content(&lines, index, config.max_lookahead_lines);
            if content.chars().count() <= config.min_section_length {
                continue;
            }

            sections.push(CandidateSection {
                section_title: truncate_title(line),
                page_number: page.page_number,
                content,
                detection_method: DetectionMethod::List,
            });
        }
    }

    sections
}

pub fn is_list_item(line: &str) -> bool {
    LIST_ITEM_PATTERNS.iter().any(|re| re.is_match(line))
}

/// Another list item, or any non-empty line not opening with a capital letter.
///
/// The second arm also swallows unrelated lowercase lines that merely follow a
/// list; known weakness of the heuristic, kept as is.
fn is_continuation_line(line: &str) -> bool {
    is_list_item(line) || (!line.is_empty() && !line.starts_with(|c: char| c.is_ascii_uppercase()))
}

/// Content for the list item at `start`, looking at most `lookahead` lines ahead.
pub fn gather_list_content(lines: &[&str], start: usize, lookahead: usize) -> String {
    let Some(first) = lines.get(start) else { return String::new() };
    let mut content = first.trim().to_string();
    let end = lines.len().min(start + lookahead + 1);

    for next_line in lines.iter().take(end).skip(start + 1) {
        let next_line = next_line.trim();
        if next_line.is_empty() {
            continue;
        }
        if !is_continuation_line(next_line) {
            break;
        }

        content.push(if is_list_item(next_line) { '\n' } else { ' ' });
        content.push_str(next_line);
    }

    content
}

fn truncate_title(text: &str) -> String {
    if text.chars().count() > MAX_TITLE_CHARS {
        let mut title: String = text.chars().take(MAX_TITLE_CHARS).collect();
        title.push_str(ELLIPSIS);
        title
    } else {
        text.to_string()
    }
}
