// src/persona/taxonomy.rs
//! Fixed role/task vocabularies. Declaration order matters: it is the last
//! tie-breaker during classification and the emission order of insights.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Researcher,
    Student,
    Analyst,
    Teacher,
    Manager,
    Entrepreneur,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Review,
    Learn,
    Analyze,
    Prepare,
    Summarize,
    General,
}

/// Keywords counted when voting for a role, and matched as whole tokens when scoring.
pub const ROLE_TERMS: [(Role, &[&str]); 6] = [
    (Role::Researcher, &["research", "study", "analysis", "methodology", "data", "experiment", "hypothesis", "literature", "publication", "findings", "results", "conclusion"]),
    (Role::Student, &["learn", "study", "understand", "concept", "theory", "practice", "example", "exercise", "exam", "assignment", "knowledge", "skill"]),
    (Role::Analyst, &["analyze", "evaluate", "assess", "trend", "pattern", "metric", "performance", "comparison", "forecast", "strategy", "insight", "recommendation"]),
    (Role::Teacher, &["teach", "explain", "instruction", "curriculum", "lesson", "education", "training", "guidance", "demonstration", "assessment", "learning", "development"]),
    (Role::Manager, &["manage", "plan", "organize", "control", "strategy", "decision", "resource", "team", "process", "objective", "performance", "leadership"]),
    (Role::Entrepreneur, &["business", "opportunity", "market", "innovation", "startup", "venture", "revenue", "growth", "investment", "competition", "strategy", "scalability"]),
];

/// Broader identity words, tried in order only when no role keyword matched.
pub const ROLE_FALLBACK_TERMS: [(Role, &[&str]); 6] = [
    (Role::Researcher, &["phd", "research", "scientist", "academic"]),
    (Role::Student, &["student", "undergraduate", "graduate"]),
    (Role::Analyst, &["analyst", "investment", "business"]),
    (Role::Teacher, &["teacher", "trainer", "instructor"]),
    (Role::Manager, &["manager", "director", "executive"]),
    (Role::Entrepreneur, &["entrepreneur", "founder", "startup"]),
];

pub const TASK_TERMS: [(Task, &[&str]); 5] = [
    (Task::Review, &["review", "summary", "overview", "evaluation", "assessment", "analysis"]),
    (Task::Learn, &["learn", "understand", "study", "master", "practice", "acquire"]),
    (Task::Analyze, &["analyze", "examine", "investigate", "evaluate", "assess", "compare"]),
    (Task::Prepare, &["prepare", "plan", "organize", "design", "develop", "create"]),
    (Task::Summarize, &["summarize", "condense", "extract", "highlight", "synthesize", "distill"]),
];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Researcher => "researcher",
            Role::Student => "student",
            Role::Analyst => "analyst",
            Role::Teacher => "teacher",
            Role::Manager => "manager",
            Role::Entrepreneur => "entrepreneur",
            Role::General => "general",
        }
    }

    /// The role's keyword list; empty for `General`.
    pub fn keywords(&self) -> &'static [&'static str] {
        ROLE_TERMS
            .iter()
            .find(|(role, _)| role == self)
            .map(|(_, terms)| *terms)
            .unwrap_or(&[])
    }
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Review => "review",
            Task::Learn => "learn",
            Task::Analyze => "analyze",
            Task::Prepare => "prepare",
            Task::Summarize => "summarize",
            Task::General => "general",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        TASK_TERMS
            .iter()
            .find(|(task, _)| task == self)
            .map(|(_, terms)| *terms)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who an insight rule listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightTarget {
    Role(Role),
    Task(Task),
}

/// Emits `insight` once when the content contains any trigger substring.
#[derive(Debug, Clone, Copy)]
pub struct InsightRule {
    pub target: InsightTarget,
    pub triggers: &'static [&'static str],
    pub insight: &'static str,
}

pub const INSIGHT_RULES: [InsightRule; 11] = [
    // Role rules
    InsightRule { target: InsightTarget::Role(Role::Researcher), triggers: &["methodology", "method", "approach"], insight: "Research methodology identified" },
    InsightRule { target: InsightTarget::Role(Role::Researcher), triggers: &["data", "dataset", "sample"], insight: "Data sources and datasets mentioned" },
    InsightRule { target: InsightTarget::Role(Role::Researcher), triggers: &["result", "finding", "conclusion"], insight: "Research findings and results presented" },
    InsightRule { target: InsightTarget::Role(Role::Student), triggers: &["concept", "principle", "theory"], insight: "Key concepts for learning identified" },
    InsightRule { target: InsightTarget::Role(Role::Student), triggers: &["example", "illustration", "case"], insight: "Examples and illustrations available" },
    InsightRule { target: InsightTarget::Role(Role::Student), triggers: &["exercise", "problem", "practice"], insight: "Practice materials and exercises found" },
    InsightRule { target: InsightTarget::Role(Role::Analyst), triggers: &["trend", "pattern", "analysis"], insight: "Analytical insights and trends identified" },
    InsightRule { target: InsightTarget::Role(Role::Analyst), triggers: &["metric", "kpi", "performance"], insight: "Performance metrics and KPIs mentioned" },
    InsightRule { target: InsightTarget::Role(Role::Analyst), triggers: &["forecast", "prediction", "projection"], insight: "Forecasting and predictive information" },
    // Task rules
    InsightRule { target: InsightTarget::Task(Task::Review), triggers: &["summary", "overview", "abstract"], insight: "Summary content suitable for review" },
    InsightRule { target: InsightTarget::Task(Task::Analyze), triggers: &["comparison", "contrast", "versus"], insight: "Comparative analysis opportunities" },
];

impl InsightRule {
    pub fn applies(&self, role: Role, task: Task) -> bool {
        match self.target {
            InsightTarget::Role(r) => r == role,
            InsightTarget::Task(t) => t == task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_twelve_keywords() {
        for (role, terms) in ROLE_TERMS {
            assert_eq!(terms.len(), 12, "{role}");
        }
        assert!(Role::General.keywords().is_empty());
    }

    #[test]
    fn every_task_has_six_keywords() {
        for (task, terms) in TASK_TERMS {
            assert_eq!(terms.len(), 6, "{task}");
        }
        assert!(Task::General.keywords().is_empty());
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Entrepreneur).unwrap(), "\"entrepreneur\"");
        assert_eq!(serde_json::to_string(&Task::Summarize).unwrap(), "\"summarize\"");
        assert_eq!(Role::Analyst.to_string(), "analyst");
    }
}
