// src/config.rs
use std::str::FromStr;

/// Limits that shape section detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Shortest paragraph kept, and the threshold list content must exceed.
    pub min_section_length: usize,
    /// Longest paragraph kept; also the header content stop threshold.
    pub max_section_length: usize,
    /// Sections surviving deduplication per document.
    pub max_sections: usize,
    /// Lines inspected after a list item when gathering its content.
    pub max_lookahead_lines: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_section_length: 30,
            max_section_length: 2000,
            max_sections: 50,
            max_lookahead_lines: 5,
        }
    }
}

impl AnalyzerConfig {
    /// Defaults, overridden by `MIN_SECTION_LENGTH`, `MAX_SECTION_LENGTH`,
    /// `MAX_SECTIONS` and `MAX_LOOKAHEAD_LINES` when they parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_section_length: env_or("MIN_SECTION_LENGTH", defaults.min_section_length),
            max_section_length: env_or("MAX_SECTION_LENGTH", defaults.max_section_length),
            max_sections: env_or("MAX_SECTIONS", defaults.max_sections),
            max_lookahead_lines: env_or("MAX_LOOKAHEAD_LINES", defaults.max_lookahead_lines),
        }
    }
}

/// How the ranker blends the two per-section signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub relevance: f64,
    pub job_alignment: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self { relevance: 0.7, job_alignment: 0.3 }
    }
}

fn env_or<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => {
                tracing::debug!("Using {}={} from environment", key, value);
                value
            }
            Err(_) => {
                tracing::warn!("Ignoring unparseable {}='{}', using default {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_detection_limits() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.min_section_length, 30);
        assert_eq!(config.max_section_length, 2000);
        assert_eq!(config.max_sections, 50);
        assert_eq!(config.max_lookahead_lines, 5);
    }

    #[test]
    fn env_or_falls_back_on_garbage() {
        std::env::set_var("PERSONA_EXTRACTOR_TEST_LIMIT", "not-a-number");
        assert_eq!(env_or("PERSONA_EXTRACTOR_TEST_LIMIT", 7usize), 7);
        std::env::set_var("PERSONA_EXTRACTOR_TEST_LIMIT", " 12 ");
        assert_eq!(env_or("PERSONA_EXTRACTOR_TEST_LIMIT", 7usize), 12);
        std::env::remove_var("PERSONA_EXTRACTOR_TEST_LIMIT");
        assert_eq!(env_or("PERSONA_EXTRACTOR_TEST_LIMIT", 7usize), 7);
    }

    #[test]
    fn ranking_weights_sum_to_one() {
        let weights = RankingWeights::default();
        assert!((weights.relevance + weights.job_alignment - 1.0).abs() < 1e-9);
    }
}
