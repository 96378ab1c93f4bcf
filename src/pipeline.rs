// src/pipeline.rs
//! Reader → detector → persona scoring → ranking → output, for one collection.

use std::path::Path;

use crate::analyzer::{DocumentAnalysis, DocumentAnalyzer};
use crate::config::{AnalyzerConfig, RankingWeights};
use crate::models::{CollectionInput, CollectionOutput};
use crate::output;
use crate::persona::{self, PersonaContext, PersonaSummary, ScoredSection};
use crate::ranking::{RankedSection, SectionRanker};
use crate::reader::{DocumentReader, PageText};

/// Everything produced for a collection; the output is what gets saved.
#[derive(Debug, Clone)]
pub struct CollectionResult {
    pub persona: PersonaContext,
    pub analyses: Vec<DocumentAnalysis>,
    pub ranked: Vec<RankedSection>,
    pub summary: PersonaSummary,
    pub output: CollectionOutput,
}

impl CollectionResult {
    pub fn failed_documents(&self) -> usize {
        self.analyses.iter().filter(|a| a.is_failure()).count()
    }
}

pub struct CollectionProcessor<R> {
    reader: R,
    analyzer: DocumentAnalyzer,
    ranker: SectionRanker,
    top_sections: usize,
}

impl<R: DocumentReader> CollectionProcessor<R> {
    pub fn new(reader: R, config: AnalyzerConfig, weights: RankingWeights, top_sections: usize) -> Self {
        Self {
            reader,
            analyzer: DocumentAnalyzer::new(config),
            ranker: SectionRanker::new(weights),
            top_sections,
        }
    }

    /// Processes every document of `input` found under `docs_dir`. A document
    /// that cannot be read is recorded as failed and skipped.
    pub async fn process(&self, input: &CollectionInput, docs_dir: &Path) -> CollectionResult {
        let persona = PersonaContext::new(&input.persona.role, &input.job_to_be_done.task);

        let mut analyses = Vec::with_capacity(input.documents.len());
        for document in &input.documents {
            let path = docs_dir.join(&document.filename);
            tracing::info!("Processing document: {}", path.display());
            analyses.push(self.analyzer.analyze_document(&self.reader, &path).await);
        }

        let scored: Vec<ScoredSection> = analyses
            .iter()
            .flat_map(|analysis| analysis.sections.iter().cloned())
            .map(|section| persona::score(section, &persona))
            .collect();

        let summary = persona::summarize(&scored, persona.detected_role);
        tracing::info!(
            "Scored {} sections: {} high, {} medium, {} low (average relevance {})",
            summary.total_sections_analyzed,
            summary.high_priority_sections,
            summary.medium_priority_sections,
            summary.low_priority_sections,
            summary.average_relevance_score
        );

        let ranked = self.ranker.rank(scored, &persona);
        let output = output::assemble(
            input.documents.iter().map(|d| d.filename.clone()).collect(),
            &input.persona.role,
            &input.job_to_be_done.task,
            &ranked,
            self.top_sections,
            chrono::Utc::now().to_rfc3339(),
        );

        CollectionResult { persona, analyses, ranked, summary, output }
    }
}

/// Single-document path over already-extracted pages.
pub fn rank_pages(
    filename: &str,
    pages: Vec<PageText>,
    persona: &PersonaContext,
    config: AnalyzerConfig,
    weights: RankingWeights,
) -> Vec<RankedSection> {
    let analysis = DocumentAnalyzer::new(config).analyze_pages(filename, pages);
    let scored = analysis
        .sections
        .into_iter()
        .map(|section| persona::score(section, persona))
        .collect();
    SectionRanker::new(weights).rank(scored, persona)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::DetectionMethod;
    use crate::models::{DocumentRef, JobToBeDone, Persona};
    use crate::persona::{Priority, Role, Task};
    use crate::reader::{number_pages, FileReader};

    const SCENARIO: &str = "Chapter 1: Introduction\nML is a subset of AI.\n1.1 Supervised Learning\nUses labeled data.\n• Classification\n• Regression";
    const ROLE: &str = "PhD Researcher in Computational Biology";
    const TASK: &str = "Prepare a literature review for machine learning research";

    #[test]
    fn end_to_end_scenario() {
        let persona = PersonaContext::new(ROLE, TASK);
        assert_eq!(persona.detected_role, Role::Researcher);
        assert_eq!(persona.detected_task, Task::Prepare);

        let ranked = rank_pages(
            "ml.pdf",
            number_pages([SCENARIO]),
            &persona,
            AnalyzerConfig::default(),
            RankingWeights::default(),
        );

        for title in ["Introduction", "1.1 Supervised Learning"] {
            let section = ranked
                .iter()
                .find(|r| r.scored.section.section_title == title)
                .unwrap_or_else(|| panic!("{title} not ranked"));
            assert_eq!(section.scored.section.detection_method, DetectionMethod::Header);
            assert!(section.scored.persona_priority >= Priority::Medium, "{title}: {:?}", section.scored.persona_priority);
        }

        let ranks: Vec<u32> = ranked.iter().map(|r| r.importance_rank).collect();
        assert_eq!(ranks, (1..=ranked.len() as u32).collect::<Vec<_>>());
        assert!(ranked.windows(2).all(|w| w[0].final_relevance_score >= w[1].final_relevance_score));
    }

    #[test]
    fn identical_input_ranks_identically() {
        let persona = PersonaContext::new(ROLE, TASK);
        let run = || rank_pages("ml.pdf", number_pages([SCENARIO]), &persona, AnalyzerConfig::default(), RankingWeights::default());
        let first: Vec<String> = run().into_iter().map(|r| r.scored.section.section_id).collect();
        let second: Vec<String> = run().into_iter().map(|r| r.scored.section.section_id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn collection_survives_unreadable_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ml.txt"), SCENARIO).unwrap();
        std::fs::write(
            dir.path().join("notes.txt"),
            "RESEARCH DATA NOTES\nThe dataset and results are summarized.\x0cSecond page of notes about methods.",
        )
        .unwrap();

        let input = CollectionInput {
            challenge_info: None,
            documents: ["ml.txt", "missing.pdf", "notes.txt"]
                .iter()
                .map(|f| DocumentRef { filename: f.to_string(), title: String::new() })
                .collect(),
            persona: Persona { role: ROLE.to_string() },
            job_to_be_done: JobToBeDone { task: TASK.to_string() },
        };

        let processor = CollectionProcessor::new(FileReader::new(), AnalyzerConfig::default(), RankingWeights::default(), 3);
        let result = tokio_test::block_on(processor.process(&input, dir.path()));

        assert_eq!(result.analyses.len(), 3);
        assert_eq!(result.failed_documents(), 1);
        assert!(result.analyses[1].metadata.error.is_some());
        assert!(result.ranked.iter().any(|r| r.scored.section.document == "notes.txt"));
        assert!(result.ranked.iter().all(|r| r.scored.section.document != "missing.pdf"));

        assert_eq!(result.output.extracted_sections.len(), 3);
        assert_eq!(result.output.metadata.input_documents, vec!["ml.txt", "missing.pdf", "notes.txt"]);
        assert_eq!(result.summary.total_sections_analyzed, result.ranked.len());
    }

    #[test]
    fn collection_reads_pdf_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("study.pdf"),
            crate::reader::pdf::fixtures::pdf_with_pages(&["The research data and results of this study are summarized here"]),
        )
        .unwrap();

        let input = CollectionInput {
            challenge_info: None,
            documents: vec![DocumentRef { filename: "study.pdf".to_string(), title: String::new() }],
            persona: Persona { role: ROLE.to_string() },
            job_to_be_done: JobToBeDone { task: TASK.to_string() },
        };

        let processor = CollectionProcessor::new(FileReader::new(), AnalyzerConfig::default(), RankingWeights::default(), 5);
        let result = tokio_test::block_on(processor.process(&input, dir.path()));

        assert_eq!(result.failed_documents(), 0);
        assert_eq!(result.analyses[0].metadata.total_pages, 1);
        assert!(!result.ranked.is_empty());
        assert!(result.ranked.iter().all(|r| r.scored.section.document == "study.pdf"));
    }
}
