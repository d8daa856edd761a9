//! Speech-response evaluation
//!
//! Decides whether noisy ASR transcripts represent a plausible attempt at a
//! target phoneme or word. Phonemes are matched very leniently (kids age
//! 5-7, recognizers struggle with isolated sounds); words more strictly.

pub mod phoneme;
pub mod word;

use serde::{Deserialize, Serialize};

pub use phoneme::{accept_list, match_phoneme};
pub use word::match_word;

/// How sure the matcher is that the child said the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Judgement for one scoring call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    pub confidence: Confidence,
    pub best_transcript: String,
}

impl MatchResult {
    /// A positive judgement backed by the given transcript
    pub fn hit(confidence: Confidence, best_transcript: &str) -> Self {
        Self {
            matched: true,
            confidence,
            best_transcript: best_transcript.to_string(),
        }
    }

    /// A negative judgement; keeps the best transcript around for logging
    pub fn miss(best_transcript: &str) -> Self {
        Self {
            matched: false,
            confidence: Confidence::Low,
            best_transcript: best_transcript.to_string(),
        }
    }
}

/// Strip a raw transcript down to lowercase letters, apostrophes and spaces
pub fn normalize_transcript(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == '\'' || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize a whole candidate set in transcript order
pub fn normalize_all(transcripts: &[String]) -> Vec<String> {
    transcripts.iter().map(|t| normalize_transcript(t)).collect()
}

/// First transcript in the set, used as the fallback "best" on a miss
pub(crate) fn first_or_empty(normalized: &[String]) -> &str {
    normalized.first().map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_noise() {
        assert_eq!(normalize_transcript("  Cat!  "), "cat");
        assert_eq!(normalize_transcript("DON'T stop?"), "don't stop");
        assert_eq!(normalize_transcript("123"), "");
    }

    #[test]
    fn test_normalize_keeps_inner_spaces() {
        assert_eq!(normalize_transcript("i see a cat"), "i see a cat");
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
    }
}
