//! Phoneme matching
//!
//! Isolated phoneme sounds are routinely transcribed as unrelated short
//! words ("t" comes back as "tea"), so matching runs a three-tier cascade:
//! accept-table → first-letter/prefix heuristic → accept-any (lenient).

use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::debug;

use super::{first_or_empty, normalize_all, Confidence, MatchResult};

lazy_static! {
    /// For each phoneme the app teaches, the strings a speech recognizer is
    /// likely to produce when a child says that sound in isolation.
    static ref PHONEME_ACCEPT_MAP: HashMap<&'static str, &'static [&'static str]> = {
        let entries: &[(&str, &[&str])] = &[
            // Single consonants
            ("c", &["see", "sea", "c", "k", "key", "ski", "cee", "si", "seek"]),
            ("s", &["s", "es", "yes", "us", "ss", "ass", "ace"]),
            ("m", &["m", "am", "um", "em", "him", "mm", "hmm", "me"]),
            ("h", &["h", "age", "ha", "hey", "hay", "ach", "huh"]),
            ("b", &["b", "be", "bee", "beat", "bead", "v", "bee's"]),
            ("f", &["f", "if", "off", "of", "eff", "enough"]),
            ("d", &["d", "dee", "the", "de", "did", "do"]),
            ("l", &["l", "el", "ill", "all", "elle", "hell", "al"]),
            ("p", &["p", "pee", "pe", "pea", "pp"]),
            ("j", &["j", "jay", "je", "day", "g", "gee"]),
            ("r", &["r", "are", "our", "er", "or", "ah"]),
            ("n", &["n", "in", "an", "en", "and", "end", "hen"]),
            ("g", &["g", "gee", "ge", "ji", "key", "ghee"]),
            ("t", &["t", "tea", "tee", "to", "too", "it", "t's"]),
            ("w", &["w", "we", "wee", "double", "you"]),
            ("z", &["z", "zee", "is", "zed", "z's"]),
            ("k", &["k", "key", "okay", "k's", "cake"]),
            ("x", &["x", "ex", "eggs", "x's"]),
            // Short vowels
            ("a", &["a", "ah", "uh", "ha", "ay", "hey", "aah", "i"]),
            ("i", &["i", "e", "ee", "it", "ih", "eye", "aye"]),
            ("o", &["o", "oh", "owe", "or", "all", "awe", "ooh"]),
            ("u", &["u", "uh", "up", "a", "ugh", "huh", "oo"]),
            ("e", &["e", "eh", "a", "air", "yeah", "ed", "head"]),
            // Digraphs — easier because they sound more like real words
            ("sh", &["sh", "she", "shh", "show", "shush", "ship", "shah", "shoe"]),
            ("ch", &["ch", "chew", "chi", "check", "church", "cheese", "choose"]),
            ("th", &["th", "the", "they", "that", "this", "thee", "think", "though"]),
            // Common blends (when they appear as standalone phoneme cards)
            ("st", &["st", "stay", "stop", "still", "start", "east"]),
            ("cl", &["cl", "clear", "clean", "class", "clay"]),
            ("fr", &["fr", "free", "from", "fry", "for"]),
            ("fl", &["fl", "fly", "flow", "floor", "flat", "flo"]),
            ("sp", &["sp", "spy", "spin", "spot", "spa"]),
            ("mp", &["mp", "imp", "amp", "um"]),
            ("nd", &["nd", "and", "end", "hand"]),
            ("lk", &["lk", "elk", "ilk", "milk", "walk"]),
            ("ng", &["ng", "ring", "sing", "in"]),
            ("ck", &["ck", "k", "key", "check"]),
        ];
        entries.iter().copied().collect()
    };
}

/// Accept list for a phoneme, if the curriculum teaches it
pub fn accept_list(phoneme: &str) -> Option<&'static [&'static str]> {
    PHONEME_ACCEPT_MAP.get(phoneme).copied()
}

/// Match a child's spoken phoneme against expected values.
///
/// `lenient` is set by the caller from the second attempt onward; it turns
/// on the accept-any tier so a struggling learner is never blocked.
pub fn match_phoneme(phoneme: &str, transcripts: &[String], lenient: bool) -> MatchResult {
    let p = phoneme.to_lowercase().trim().to_string();

    if transcripts.is_empty() {
        return MatchResult::miss("");
    }

    let normalized = normalize_all(transcripts);

    // Tier 1: Accept map lookup — whole transcript or any word within it
    if let Some(accept) = accept_list(&p) {
        for t in &normalized {
            let word_hit = t.split_whitespace().any(|w| accept.iter().any(|a| *a == w));
            if word_hit || accept.iter().any(|a| *a == t.as_str()) {
                debug!("Phoneme '{}' accepted via table: '{}'", p, t);
                return MatchResult::hit(Confidence::High, t);
            }
        }
    }

    // Tier 2: First-letter heuristic (single-letter phonemes only)
    if p.len() == 1 {
        let initial = p.chars().next();
        for t in &normalized {
            if !t.is_empty() && t.chars().next() == initial {
                debug!("Phoneme '{}' accepted via first letter: '{}'", p, t);
                return MatchResult::hit(Confidence::Medium, t);
            }
        }
    }

    // Tier 2b: For digraphs, check if transcript starts with the digraph
    if p.len() == 2 {
        for t in &normalized {
            if t.starts_with(p.as_str()) {
                debug!("Phoneme '{}' accepted via prefix: '{}'", p, t);
                return MatchResult::hit(Confidence::Medium, t);
            }
        }
    }

    // Tier 3: Lenient mode (2nd attempt onward) — accept ANY sound
    if lenient && normalized.iter().any(|t| !t.is_empty()) {
        debug!("Phoneme '{}' accepted leniently: '{}'", p, normalized[0]);
        return MatchResult::hit(Confidence::Low, &normalized[0]);
    }

    MatchResult::miss(first_or_empty(&normalized))
}
