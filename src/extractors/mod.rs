// src/extractors/mod.rs
pub mod section;
pub mod strategies;

// Re-export key extraction types for convenience
pub use section::{
    calculate_confidence,
    CandidateSection,
    DetectionMethod,
    Section,
    SectionDetector,
};
