// src/ranking/mod.rs
//! Final ordering of scored sections.

use serde::{Deserialize, Serialize};

use crate::config::RankingWeights;
use crate::persona::{PersonaContext, ScoredSection};

/// A scored section with its place in the final ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    #[serde(flatten)]
    pub scored: ScoredSection,
    pub final_relevance_score: f64,
    pub importance_rank: u32, // 1 = most important
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SectionRanker {
    weights: RankingWeights,
}

impl SectionRanker {
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    /// Blend of persona relevance and job alignment, clamped to [0, 1].
    pub fn combined_score(&self, section: &ScoredSection) -> f64 {
        let score = self.weights.relevance * section.persona_relevance_score
            + self.weights.job_alignment * section.job_alignment_score;
        score.clamp(0.0, 1.0)
    }

    /// Orders sections by descending combined score and numbers them from 1.
    /// Equal scores keep their input order.
    pub fn rank(&self, sections: Vec<ScoredSection>, persona: &PersonaContext) -> Vec<RankedSection> {
        let mut scored: Vec<(f64, ScoredSection)> = sections
            .into_iter()
            .map(|section| (self.combined_score(&section), section))
            .collect();

        // sort_by is stable, which is what keeps ties in detection order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let ranked: Vec<RankedSection> = scored
            .into_iter()
            .zip(1u32..)
            .map(|((final_relevance_score, scored), importance_rank)| RankedSection {
                scored,
                final_relevance_score,
                importance_rank,
            })
            .collect();

        if let Some(top) = ranked.first() {
            tracing::debug!(
                "Ranked {} sections for {} / {}; top '{}' at {:.4}",
                ranked.len(),
                persona.detected_role,
                persona.detected_task,
                top.scored.section.section_title,
                top.final_relevance_score
            );
        }

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::section::{DetectionMethod, Section};
    use crate::persona::Priority;

    fn scored(title: &str, relevance: f64, alignment: f64) -> ScoredSection {
        ScoredSection {
            section: Section {
                document: "doc.pdf".to_string(),
                section_id: format!("doc.pdf_{title}"),
                section_title: title.to_string(),
                page_number: 1,
                content: String::new(),
                detection_method: DetectionMethod::Paragraph,
                word_count: 0,
                confidence_score: 0.7,
            },
            persona_relevance_score: relevance,
            persona_insights: Vec::new(),
            key_concepts: Vec::new(),
            persona_priority: Priority::Low,
            job_alignment_score: alignment,
        }
    }

    fn persona() -> PersonaContext {
        PersonaContext::new("Researcher", "Literature review")
    }

    fn titles(ranked: &[RankedSection]) -> Vec<&str> {
        ranked.iter().map(|r| r.scored.section.section_title.as_str()).collect()
    }

    #[test]
    fn orders_by_combined_score() {
        let ranker = SectionRanker::default();
        let ranked = ranker.rank(
            vec![scored("Low", 0.1, 0.0), scored("High", 1.0, 1.0), scored("Mid", 0.5, 0.2)],
            &persona(),
        );
        assert_eq!(titles(&ranked), vec!["High", "Mid", "Low"]);
        let ranks: Vec<u32> = ranked.iter().map(|r| r.importance_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!((ranked[0].final_relevance_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranker = SectionRanker::default();
        let ranked = ranker.rank(
            vec![
                scored("First", 0.5, 0.5),
                scored("Better", 0.9, 0.5),
                scored("Second", 0.5, 0.5),
                scored("Third", 0.5, 0.5),
            ],
            &persona(),
        );
        assert_eq!(titles(&ranked), vec!["Better", "First", "Second", "Third"]);
    }

    #[test]
    fn weights_change_the_order() {
        let sections = || vec![scored("Relevant", 0.9, 0.0), scored("Aligned", 0.0, 1.0)];
        let alignment_first = SectionRanker::new(RankingWeights { relevance: 0.2, job_alignment: 0.8 });
        assert_eq!(titles(&alignment_first.rank(sections(), &persona())), vec!["Aligned", "Relevant"]);
        assert_eq!(titles(&SectionRanker::default().rank(sections(), &persona())), vec!["Relevant", "Aligned"]);
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(SectionRanker::default().rank(Vec::new(), &persona()).is_empty());
    }

    #[test]
    fn ranked_section_serializes_flat() {
        let ranked = SectionRanker::default().rank(vec![scored("Only", 0.4, 0.4)], &persona());
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["importance_rank"], 1);
        assert_eq!(json["section_title"], "Only");
        assert_eq!(json["persona_priority"], "low");
    }
}
