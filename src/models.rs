// src/models.rs
use serde::{Deserialize, Serialize};

/// Collection description, as handed in by the caller.
/// Example:
/// ```json
/// { "documents": [{ "filename": "guide.pdf", "title": "Guide" }],
///   "persona": { "role": "Travel Planner" },
///   "job_to_be_done": { "task": "Plan a trip of 4 days" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<ChallengeInfo>,
    pub documents: Vec<DocumentRef>,
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeInfo {
    pub challenge_id: String,
    pub test_case_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

// --- Output ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionOutput {
    pub metadata: OutputMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_collection_input() {
        let raw = r#"{
            "documents": [{"filename": "a.pdf", "title": "A"}, {"filename": "b.pdf"}],
            "persona": {"role": "Food Contractor"},
            "job_to_be_done": {"task": "Prepare a vegetarian buffet menu"}
        }"#;
        let input: CollectionInput = serde_json::from_str(raw).unwrap();
        assert!(input.challenge_info.is_none());
        assert_eq!(input.documents.len(), 2);
        assert_eq!(input.documents[1].title, "");
        assert_eq!(input.persona.role, "Food Contractor");
    }

    #[test]
    fn parses_challenge_info() {
        let raw = r#"{
            "challenge_info": {"challenge_id": "round_1b_002", "test_case_name": "travel_planner"},
            "documents": [],
            "persona": {"role": "Travel Planner"},
            "job_to_be_done": {"task": "Plan a trip"}
        }"#;
        let input: CollectionInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.challenge_info.unwrap().test_case_name, "travel_planner");
    }
}
