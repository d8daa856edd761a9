//! Curriculum data
//!
//! The 14-day Blending Bootcamp word list. Static content; the engine only
//! needs the day → word → phoneme records and never edits them.
//!
//! Phase 1 (Days 1-4): Sound Glue — simple CVC words.
//! Phase 2 (Days 5-9): Automatic Blending — CCVC / CVCC words and speed drills.
//! Phase 3 (Days 10-14): Transfer to Reading — decodable sentences.

use serde::{Deserialize, Serialize};

use crate::error::{TutorError, TutorResult};
use crate::matching::accept_list;

/// One word to blend, with its ordered phoneme sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub phonemes: Vec<String>,
}

/// One day of the curriculum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub day: u32,
    pub phase: u32,
    pub title: String,
    pub description: String,
    pub words: Vec<WordEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decodable_text: Option<String>,
}

fn entry(word: &str, phonemes: &[&str]) -> WordEntry {
    WordEntry {
        word: word.to_string(),
        phonemes: phonemes.iter().map(|p| p.to_string()).collect(),
    }
}

fn lesson(
    day: u32,
    phase: u32,
    title: &str,
    description: &str,
    words: Vec<WordEntry>,
    decodable_text: Option<&str>,
) -> Lesson {
    Lesson {
        day,
        phase,
        title: title.to_string(),
        description: description.to_string(),
        words,
        decodable_text: decodable_text.map(str::to_string),
    }
}

/// The built-in 14-day curriculum
pub fn curriculum() -> Vec<Lesson> {
    vec![
        // ---- Phase 1: Sound Glue ----
        lesson(
            1,
            1,
            "First Sounds",
            "Blend simple three-sound words with short vowels.",
            vec![
                entry("cat", &["c", "a", "t"]),
                entry("sat", &["s", "a", "t"]),
                entry("mat", &["m", "a", "t"]),
                entry("hat", &["h", "a", "t"]),
                entry("bat", &["b", "a", "t"]),
            ],
            None,
        ),
        lesson(
            2,
            1,
            "Short I Words",
            "Practise blending words with the short i sound.",
            vec![
                entry("sit", &["s", "i", "t"]),
                entry("bit", &["b", "i", "t"]),
                entry("hit", &["h", "i", "t"]),
                entry("fit", &["f", "i", "t"]),
                entry("pin", &["p", "i", "n"]),
            ],
            None,
        ),
        lesson(
            3,
            1,
            "Short O Words",
            "Blend words with the short o sound.",
            vec![
                entry("dog", &["d", "o", "g"]),
                entry("log", &["l", "o", "g"]),
                entry("hot", &["h", "o", "t"]),
                entry("pot", &["p", "o", "t"]),
                entry("mop", &["m", "o", "p"]),
            ],
            None,
        ),
        lesson(
            4,
            1,
            "Short U & E Words",
            "Blend words with short u and short e sounds.",
            vec![
                entry("sun", &["s", "u", "n"]),
                entry("run", &["r", "u", "n"]),
                entry("bug", &["b", "u", "g"]),
                entry("bed", &["b", "e", "d"]),
                entry("red", &["r", "e", "d"]),
            ],
            None,
        ),
        // ---- Phase 2: Automatic Blending ----
        lesson(
            5,
            2,
            "Beginning Blends",
            "Blend words that start with two consonants.",
            vec![
                entry("stop", &["s", "t", "o", "p"]),
                entry("clap", &["c", "l", "a", "p"]),
                entry("frog", &["f", "r", "o", "g"]),
                entry("flag", &["f", "l", "a", "g"]),
                entry("spin", &["s", "p", "i", "n"]),
            ],
            None,
        ),
        lesson(
            6,
            2,
            "Ending Blends",
            "Blend words that end with two consonants.",
            vec![
                entry("jump", &["j", "u", "m", "p"]),
                entry("hand", &["h", "a", "n", "d"]),
                entry("milk", &["m", "i", "l", "k"]),
                entry("pond", &["p", "o", "n", "d"]),
                entry("dust", &["d", "u", "s", "t"]),
            ],
            None,
        ),
        lesson(
            7,
            2,
            "Digraph Sounds",
            "Blend words with sh, ch, and th digraphs.",
            vec![
                entry("ship", &["sh", "i", "p"]),
                entry("chip", &["ch", "i", "p"]),
                entry("thin", &["th", "i", "n"]),
                entry("shop", &["sh", "o", "p"]),
                entry("chop", &["ch", "o", "p"]),
            ],
            None,
        ),
        lesson(
            8,
            2,
            "Speed Drill 1",
            "Blend familiar words quickly to build fluency.",
            vec![
                entry("cat", &["c", "a", "t"]),
                entry("ship", &["sh", "i", "p"]),
                entry("frog", &["f", "r", "o", "g"]),
                entry("hand", &["h", "a", "n", "d"]),
                entry("bed", &["b", "e", "d"]),
                entry("stop", &["s", "t", "o", "p"]),
            ],
            None,
        ),
        lesson(
            9,
            2,
            "Speed Drill 2",
            "More speed practice with mixed word types.",
            vec![
                entry("thin", &["th", "i", "n"]),
                entry("clap", &["c", "l", "a", "p"]),
                entry("dust", &["d", "u", "s", "t"]),
                entry("pin", &["p", "i", "n"]),
                entry("flag", &["f", "l", "a", "g"]),
                entry("chop", &["ch", "o", "p"]),
            ],
            None,
        ),
        // ---- Phase 3: Transfer to Reading ----
        lesson(
            10,
            3,
            "Reading Sentences 1",
            "Read short sentences built from words you know.",
            vec![
                entry("the", &["th", "e"]),
                entry("cat", &["c", "a", "t"]),
                entry("sat", &["s", "a", "t"]),
                entry("mat", &["m", "a", "t"]),
                entry("hat", &["h", "a", "t"]),
            ],
            Some("The cat sat on the mat. The cat has a hat."),
        ),
        lesson(
            11,
            3,
            "Reading Sentences 2",
            "Read sentences with action words.",
            vec![
                entry("dog", &["d", "o", "g"]),
                entry("run", &["r", "u", "n"]),
                entry("jump", &["j", "u", "m", "p"]),
                entry("stop", &["s", "t", "o", "p"]),
                entry("hot", &["h", "o", "t"]),
            ],
            Some("The dog can run and jump. Stop! It is hot."),
        ),
        lesson(
            12,
            3,
            "Mini Story 1",
            "Read a short story about a frog.",
            vec![
                entry("frog", &["f", "r", "o", "g"]),
                entry("log", &["l", "o", "g"]),
                entry("pond", &["p", "o", "n", "d"]),
                entry("bug", &["b", "u", "g"]),
                entry("sun", &["s", "u", "n"]),
            ],
            Some("A frog sat on a log. The log is in the pond. The frog can see a bug. The sun is hot."),
        ),
        lesson(
            13,
            3,
            "Mini Story 2",
            "Read a story about a trip to the shop.",
            vec![
                entry("shop", &["sh", "o", "p"]),
                entry("chip", &["ch", "i", "p"]),
                entry("milk", &["m", "i", "l", "k"]),
                entry("hand", &["h", "a", "n", "d"]),
                entry("flag", &["f", "l", "a", "g"]),
            ],
            Some("We go to the shop. I get a chip and milk. I hold them in my hand. The shop has a big flag."),
        ),
        lesson(
            14,
            3,
            "Graduation Day",
            "Read a final story and celebrate all you have learned!",
            vec![
                entry("clap", &["c", "l", "a", "p"]),
                entry("spin", &["s", "p", "i", "n"]),
                entry("dust", &["d", "u", "s", "t"]),
                entry("red", &["r", "e", "d"]),
                entry("thin", &["th", "i", "n"]),
            ],
            Some("Clap your hands and spin! Dust off the thin red hat. You did it! You can read!"),
        ),
    ]
}

/// Lesson lookup by day number
pub fn lesson_for_day(day: u32) -> Option<Lesson> {
    curriculum().into_iter().find(|l| l.day == day)
}

/// Check that every phoneme the curriculum uses is matchable: either it has
/// an accept-table entry or it qualifies for the prefix heuristic (1-2
/// characters). Longer unknown phonemes would only ever pass leniently.
pub fn validate_coverage(lessons: &[Lesson]) -> TutorResult<()> {
    for l in lessons {
        for w in &l.words {
            for p in &w.phonemes {
                if accept_list(p).is_none() && !(1..=2).contains(&p.len()) {
                    return Err(TutorError::Curriculum(format!(
                        "day {} word '{}': phoneme '{}' has no accept list and no prefix fallback",
                        l.day, w.word, p
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourteen_days_in_order() {
        let c = curriculum();
        assert_eq!(c.len(), 14);
        for (i, l) in c.iter().enumerate() {
            assert_eq!(l.day, i as u32 + 1);
            assert!(!l.words.is_empty());
        }
    }

    #[test]
    fn test_lookup_by_day() {
        assert_eq!(lesson_for_day(7).map(|l| l.title), Some("Digraph Sounds".to_string()));
        assert!(lesson_for_day(15).is_none());
    }

    #[test]
    fn test_phase_three_has_decodable_text() {
        for l in curriculum() {
            assert_eq!(l.phase == 3, l.decodable_text.is_some(), "day {}", l.day);
        }
    }

    #[test]
    fn test_builtin_curriculum_fully_covered() {
        validate_coverage(&curriculum()).expect("coverage");
    }

    #[test]
    fn test_every_builtin_phoneme_has_accept_list() {
        // Stronger than validate_coverage: the shipped table should never
        // need the prefix fallback for its own content
        for l in curriculum() {
            for w in &l.words {
                for p in &w.phonemes {
                    assert!(accept_list(p).is_some(), "phoneme '{}' missing", p);
                }
            }
        }
    }
}
