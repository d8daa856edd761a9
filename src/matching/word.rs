//! Word matching
//!
//! Stricter than phoneme matching but still forgiving. Ordered cascade,
//! first satisfied tier wins: exact → substring → child-speech variant →
//! edit distance → accept-any (lenient).

use strsim::levenshtein;
use tracing::debug;

use super::{first_or_empty, normalize_all, Confidence, MatchResult};

/// Common phonological substitutions in young children's speech.
///
/// Rules apply independently, one variant per rule — a transcript needing
/// two simultaneous substitutions falls through to the edit-distance tier.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("th", "f"), // "thin" → "fin"
    ("th", "d"), // "the" → "de"
    ("r", "w"),  // "red" → "wed"
    ("l", "w"),  // "leg" → "weg"
];

/// One variant per substitution rule that actually changes the word
fn child_variants(word: &str) -> Vec<String> {
    let mut variants = Vec::new();
    for (pattern, replacement) in SUBSTITUTIONS {
        let v = word.replace(pattern, replacement);
        if v != word {
            variants.push(v);
        }
    }
    variants
}

/// Edit-distance budget: tight for short words, two edits for longer ones
fn max_distance(expected: &str) -> usize {
    if expected.len() <= 3 {
        1
    } else {
        2
    }
}

/// Match a child's spoken word against the expected word.
pub fn match_word(expected_word: &str, transcripts: &[String], lenient: bool) -> MatchResult {
    let expected = expected_word.to_lowercase().trim().to_string();

    if transcripts.is_empty() {
        return MatchResult::miss("");
    }

    let normalized = normalize_all(transcripts);

    // Tier 1: Exact match (whole transcript or any word within it)
    for t in &normalized {
        if t == &expected || t.split_whitespace().any(|w| w == expected) {
            debug!("Word '{}' matched exactly: '{}'", expected, t);
            return MatchResult::hit(Confidence::High, t);
        }
    }

    // Tier 2: Contains match (child might say filler words)
    for t in &normalized {
        if t.contains(&expected) {
            debug!("Word '{}' matched as substring: '{}'", expected, t);
            return MatchResult::hit(Confidence::Medium, t);
        }
    }

    // Tier 3: Common child substitutions
    let variants = child_variants(&expected);
    for t in &normalized {
        for variant in &variants {
            if t.split_whitespace().any(|w| w == variant) || t.contains(variant.as_str()) {
                debug!("Word '{}' matched via variant '{}': '{}'", expected, variant, t);
                return MatchResult::hit(Confidence::Medium, t);
            }
        }
    }

    // Tier 4: Edit distance over each spoken word
    let budget = max_distance(&expected);
    for t in &normalized {
        for word in t.split_whitespace() {
            let dist = levenshtein(&expected, word);
            if dist <= budget {
                debug!(
                    "Word '{}' matched within distance {} (≤{}): '{}'",
                    expected, dist, budget, t
                );
                return MatchResult::hit(Confidence::Medium, t);
            }
        }
    }

    // Tier 5: Lenient mode — accept any sound
    if lenient && normalized.iter().any(|t| !t.is_empty()) {
        debug!("Word '{}' accepted leniently: '{}'", expected, normalized[0]);
        return MatchResult::hit(Confidence::Low, &normalized[0]);
    }

    MatchResult::miss(first_or_empty(&normalized))
}
