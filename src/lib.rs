// src/lib.rs
//! Persona-driven section extraction.
//!
//! Page text is segmented into candidate sections by three independent
//! heuristics (headers, paragraphs, list items), each section is scored for a
//! reader persona and task by keyword overlap, and the scored sections are
//! ranked into a single ordered list.

pub mod analyzer;
pub mod config;
pub mod extractors;
pub mod models;
pub mod output;
pub mod persona;
pub mod pipeline;
pub mod ranking;
pub mod reader;
pub mod storage;
pub mod utils;

pub use analyzer::{DocumentAnalysis, DocumentAnalyzer};
pub use config::{AnalyzerConfig, RankingWeights};
pub use extractors::{DetectionMethod, Section, SectionDetector};
pub use persona::{PersonaContext, Priority, Role, ScoredSection, Task};
pub use pipeline::{CollectionProcessor, CollectionResult};
pub use ranking::{RankedSection, SectionRanker};
pub use reader::{DocumentReader, FileReader, PageText, PdfReader};
pub use utils::AppError;
