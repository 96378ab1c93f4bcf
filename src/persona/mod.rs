// src/persona/mod.rs
pub mod classifier;
pub mod scorer;
pub mod taxonomy;

// Re-export key persona types for convenience
pub use classifier::{classify_role, classify_task, PersonaContext};
pub use scorer::{score, summarize, PersonaSummary, Priority, ScoredSection};
pub use taxonomy::{Role, Task};
