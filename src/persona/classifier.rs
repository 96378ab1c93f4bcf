// src/persona/classifier.rs
use serde::{Deserialize, Serialize};

use super::taxonomy::{Role, Task, ROLE_FALLBACK_TERMS, ROLE_TERMS, TASK_TERMS};

/// Classified reader persona, shared read-only by every section scored in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaContext {
    pub role_description: String,
    pub task_description: String,
    pub detected_role: Role,
    pub detected_task: Task,
}

impl PersonaContext {
    pub fn new(role_description: &str, task_description: &str) -> Self {
        let detected_role = classify_role(role_description);
        let detected_task = classify_task(task_description);
        tracing::info!(
            "Persona classified as role '{}' with task '{}'",
            detected_role,
            detected_task
        );

        Self {
            role_description: role_description.to_string(),
            task_description: task_description.to_string(),
            detected_role,
            detected_task,
        }
    }
}

/// Maps a free-text role to a [`Role`], falling back to identity words and
/// finally to `General`.
pub fn classify_role(role_description: &str) -> Role {
    let normalized = role_description.to_lowercase();

    if let Some(role) = vote(&normalized, &ROLE_TERMS) {
        return role;
    }

    let fallback = ROLE_FALLBACK_TERMS
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| normalized.contains(term)))
        .map(|(role, _)| *role);

    tracing::debug!("No role keywords in '{}', fallback gave {:?}", normalized, fallback);
    fallback.unwrap_or(Role::General)
}

/// Maps a free-text task to a [`Task`]; `General` when nothing matches.
pub fn classify_task(task_description: &str) -> Task {
    let normalized = task_description.to_lowercase();
    vote(&normalized, &TASK_TERMS).unwrap_or(Task::General)
}

/// Keyword-count vote over `table` in declaration order.
///
/// Highest count wins. Equal counts go to the label whose matching keyword
/// appears earliest in `text`, then to the earlier declared label.
///
/// Declaration order alone is not enough: in "Prepare a literature review for
/// machine learning research" the `review`, `learn` and `prepare` labels each
/// hit once, and the description leads with what the reader wants to do, so it
/// must classify as `prepare` rather than the first declared `review`.
fn vote<L: Copy>(text: &str, table: &[(L, &[&str])]) -> Option<L> {
    let mut best: Option<(L, usize, usize)> = None; // (label, count, first position)

    for (label, keywords) in table {
        let mut count = 0;
        let mut first_position = usize::MAX;
        for keyword in keywords.iter() {
            if let Some(position) = text.find(keyword) {
                count += 1;
                first_position = first_position.min(position);
            }
        }
        if count == 0 {
            continue;
        }

        let replaces = match best {
            None => true,
            Some((_, best_count, best_position)) => {
                count > best_count || (count == best_count && first_position < best_position)
            }
        };
        if replaces {
            best = Some((*label, count, first_position));
        }
    }

    best.map(|(label, _, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_persona() {
        assert_eq!(classify_role("PhD Researcher in Computational Biology"), Role::Researcher);
        assert_eq!(classify_task("Prepare a literature review for machine learning research"), Task::Prepare);
    }

    #[test]
    fn highest_count_wins() {
        // analyst: analyze, trend, forecast; manager: plan
        assert_eq!(classify_role("I plan to analyze trend data and forecast"), Role::Analyst);
        // analyze: examine, compare; review: evaluation
        assert_eq!(classify_task("Examine and compare evaluation results"), Task::Analyze);
    }

    #[test]
    fn equal_counts_go_to_earliest_mention() {
        assert_eq!(classify_task("summarize then review"), Task::Summarize);
        assert_eq!(classify_task("review then summarize"), Task::Review);
    }

    #[test]
    fn equal_position_goes_to_declaration_order() {
        // "study" is a researcher and a student keyword
        assert_eq!(classify_role("study"), Role::Researcher);
    }

    #[test]
    fn role_fallback_terms() {
        assert_eq!(classify_role("Senior Scientist"), Role::Researcher);
        assert_eq!(classify_role("Undergraduate Chemistry Major"), Role::Student);
        assert_eq!(classify_role("Financial Analyst"), Role::Analyst);
        assert_eq!(classify_role("Corporate Instructor"), Role::Teacher);
        assert_eq!(classify_role("Executive Director"), Role::Manager);
        assert_eq!(classify_role("Company Founder"), Role::Entrepreneur);
    }

    #[test]
    fn unmatched_descriptions_degrade_to_general() {
        assert_eq!(classify_role("Food Contractor"), Role::General);
        assert_eq!(classify_role(""), Role::General);
        assert_eq!(classify_task("Find vegetarian dishes for a buffet"), Task::General);
        assert_eq!(classify_task(""), Task::General);
    }

    #[test]
    fn context_keeps_descriptions() {
        let persona = PersonaContext::new("Travel Planner", "Plan a trip of 4 days");
        assert_eq!(persona.role_description, "Travel Planner");
        assert_eq!(persona.detected_role, Role::Manager); // "plan" in "planner"
        assert_eq!(persona.detected_task, Task::Prepare);
    }
}
