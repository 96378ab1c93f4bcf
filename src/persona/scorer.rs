// src/persona/scorer.rs
use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::classifier::PersonaContext;
use super::taxonomy::{Role, Task, INSIGHT_RULES};
use crate::extractors::section::Section;

// --- Constants ---
const ROLE_WEIGHT: f64 = 0.4;
const TASK_WEIGHT: f64 = 0.3;
const DIRECT_WEIGHT: f64 = 0.3;
const RELEVANCE_SCALE: f64 = 10.0;
const MAX_KEY_CONCEPTS: usize = 10;
const MIN_ALIGNMENT_WORD_CHARS: usize = 4;
const TOP_INSIGHTS: usize = 5;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Failed to compile WORD_RE"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        })
    }
}

/// A section enriched with its persona-specific signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSection {
    #[serde(flatten)]
    pub section: Section,
    pub persona_relevance_score: f64,
    pub persona_insights: Vec<String>,
    pub key_concepts: Vec<String>,
    pub persona_priority: Priority,
    pub job_alignment_score: f64,
}

/// Scores one section against the persona. Depends on nothing but its inputs,
/// so sections can be scored in any order.
pub fn score(section: Section, persona: &PersonaContext) -> ScoredSection {
    let role = persona.detected_role;
    let task = persona.detected_task;
    let titled_content = format!("{} {}", section.content, section.section_title);

    let persona_relevance_score = compute_relevance_score(&titled_content, role, task, &persona.task_description);
    let job_alignment_score = compute_job_alignment(&titled_content, &persona.task_description);
    let persona_insights = extract_insights(&section.content, role, task);
    let key_concepts = find_key_concepts(&section.content, role);
    let persona_priority = determine_priority(persona_relevance_score, persona_insights.len(), key_concepts.len());

    tracing::trace!(
        "{}: relevance {:.3}, alignment {:.3}, priority {}",
        section.section_id,
        persona_relevance_score,
        job_alignment_score,
        persona_priority
    );

    ScoredSection {
        section,
        persona_relevance_score,
        persona_insights,
        key_concepts,
        persona_priority,
        job_alignment_score,
    }
}

/// Lower-cased word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Weighted share of role, task and literal task-description words among all
/// tokens, scaled by ten and capped at 1.0.
pub fn compute_relevance_score(text: &str, role: Role, task: Task, task_description: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }
    let total = tokens.len() as f64;

    let role_terms = role.keywords();
    let task_terms = task.keywords();
    let description_words: HashSet<String> = tokenize(task_description).into_iter().collect();

    let role_matches = tokens.iter().filter(|t| role_terms.contains(&t.as_str())).count();
    let task_matches = tokens.iter().filter(|t| task_terms.contains(&t.as_str())).count();
    let direct_matches = tokens
        .iter()
        .filter(|t| t.chars().count() > 3 && description_words.contains(t.as_str()))
        .count();

    let combined = ROLE_WEIGHT * (role_matches as f64 / total)
        + TASK_WEIGHT * (task_matches as f64 / total)
        + DIRECT_WEIGHT * (direct_matches as f64 / total);

    (combined * RELEVANCE_SCALE).min(1.0)
}

/// Share of the task description's longer words that also occur in `text`.
pub fn compute_job_alignment(text: &str, task_description: &str) -> f64 {
    let long_words = |source: &str| -> HashSet<String> {
        tokenize(source)
            .into_iter()
            .filter(|w| w.chars().count() >= MIN_ALIGNMENT_WORD_CHARS)
            .collect()
    };

    let task_words = long_words(task_description);
    if task_words.is_empty() {
        return 0.0;
    }
    let content_words = long_words(text);

    let matched = task_words.intersection(&content_words).count();
    (matched as f64 / task_words.len() as f64).min(1.0)
}

/// Fires each applicable insight rule at most once, in rule-table order.
pub fn extract_insights(content: &str, role: Role, task: Task) -> Vec<String> {
    let lowered = content.to_lowercase();

    INSIGHT_RULES
        .iter()
        .filter(|rule| rule.applies(role, task))
        .filter(|rule| rule.triggers.iter().any(|trigger| lowered.contains(trigger)))
        .map(|rule| rule.insight.to_string())
        .collect()
}

/// Role keywords (longer than three characters) found in the content, first
/// occurrence order, at most ten.
pub fn find_key_concepts(content: &str, role: Role) -> Vec<String> {
    let role_terms = role.keywords();
    let mut concepts: Vec<String> = Vec::new();

    for token in tokenize(content) {
        if concepts.len() >= MAX_KEY_CONCEPTS {
            break;
        }
        if token.chars().count() > 3 && role_terms.contains(&token.as_str()) && !concepts.contains(&token) {
            concepts.push(token);
        }
    }

    concepts
}

pub fn determine_priority(relevance: f64, insight_count: usize, concept_count: usize) -> Priority {
    if relevance >= 0.6 && insight_count >= 2 {
        Priority::High
    } else if relevance >= 0.3 && (insight_count >= 1 || concept_count >= 3) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Aggregate view of a scored run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaSummary {
    pub persona_type: Role,
    pub total_sections_analyzed: usize,
    pub high_priority_sections: usize,
    pub medium_priority_sections: usize,
    pub low_priority_sections: usize,
    pub average_relevance_score: f64,
    pub top_insights: Vec<String>,
}

pub fn summarize(sections: &[ScoredSection], role: Role) -> PersonaSummary {
    let count_priority = |p: Priority| sections.iter().filter(|s| s.persona_priority == p).count();
    let high = count_priority(Priority::High);
    let medium = count_priority(Priority::Medium);

    let relevance_sum: f64 = sections.iter().map(|s| s.persona_relevance_score).sum();
    let average = relevance_sum / sections.len().max(1) as f64;

    // Frequencies in first-seen order; the stable sort keeps that order among equals
    let mut frequencies: Vec<(&str, usize)> = Vec::new();
    for insight in sections.iter().flat_map(|s| s.persona_insights.iter()) {
        match frequencies.iter_mut().find(|entry| entry.0 == insight.as_str()) {
            Some(entry) => entry.1 += 1,
            None => frequencies.push((insight.as_str(), 1)),
        }
    }
    frequencies.sort_by(|a, b| b.1.cmp(&a.1));

    PersonaSummary {
        persona_type: role,
        total_sections_analyzed: sections.len(),
        high_priority_sections: high,
        medium_priority_sections: medium,
        low_priority_sections: sections.len() - high - medium,
        average_relevance_score: (average * 1000.0).round() / 1000.0,
        top_insights: frequencies.into_iter().take(TOP_INSIGHTS).map(|(i, _)| i.to_string()).collect(),
    }
}
