// src/output.rs
//! Turns ranked sections into the collection output document.

use crate::models::{CollectionOutput, ExtractedSection, OutputMetadata, SubsectionAnalysis};
use crate::ranking::RankedSection;

const REFINED_TEXT_CHARS: usize = 500;

/// Builds the output from the top `top_n` ranked sections.
pub fn assemble(
    input_documents: Vec<String>,
    persona: &str,
    job_to_be_done: &str,
    ranked: &[RankedSection],
    top_n: usize,
    processing_timestamp: String,
) -> CollectionOutput {
    let top = &ranked[..ranked.len().min(top_n)];

    let extracted_sections = top
        .iter()
        .map(|r| ExtractedSection {
            document: r.scored.section.document.clone(),
            section_title: r.scored.section.section_title.clone(),
            importance_rank: r.importance_rank,
            page_number: r.scored.section.page_number,
        })
        .collect();

    let subsection_analysis = top
        .iter()
        .map(|r| SubsectionAnalysis {
            document: r.scored.section.document.clone(),
            refined_text: refine_text(&r.scored.section.content, REFINED_TEXT_CHARS),
            page_number: r.scored.section.page_number,
        })
        .collect();

    CollectionOutput {
        metadata: OutputMetadata {
            input_documents,
            persona: persona.to_string(),
            job_to_be_done: job_to_be_done.to_string(),
            processing_timestamp,
        },
        extracted_sections,
        subsection_analysis,
    }
}

/// Collapses whitespace and cuts at a word boundary so the result, ellipsis
/// included, is at most `max_chars` long.
pub fn refine_text(content: &str, max_chars: usize) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let budget = max_chars.saturating_sub(3);
    let mut refined = String::new();
    for word in collapsed.split(' ') {
        let needed = if refined.is_empty() { word.chars().count() } else { word.chars().count() + 1 };
        if refined.chars().count() + needed > budget {
            break;
        }
        if !refined.is_empty() {
            refined.push(' ');
        }
        refined.push_str(word);
    }

    if refined.is_empty() {
        // a single word longer than the budget
        refined = collapsed.chars().take(budget).collect();
    }
    refined.push_str("...");
    refined
}
