//! Blending exercise flow
//!
//! One word is one exercise: the child sounds out each phoneme in order,
//! then says the blended word. The progression lives in an explicit state
//! machine with a pure transition function; `ExerciseRunner` executes the
//! resulting effects (prompt, listen, score) against the session.
//!
//! Retry policy: the first failed attempt retries strictly, the second is
//! scored leniently, and two failures skip the target. The learner can
//! always move forward.

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::curriculum::{Lesson, WordEntry};
use crate::error::TutorResult;
use crate::matching::{match_phoneme, match_word, Confidence, MatchResult};
use crate::prompt::Prompter;
use crate::session::Session;

/// What the child is currently being asked to say
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// One phoneme of the word, by index
    Phoneme(usize),
    /// The whole blended word
    Word,
    /// Exercise finished
    Done,
}

/// Stage within the current target's attempt cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Prompt/TTS phase, no scoring
    Play,
    /// One capture is (about to be) in flight
    Listen,
    /// Matched; brief acknowledgment before advancing
    Correct,
    /// Missed but attempts remain; loops back to Listen
    Retry,
    /// Out of attempts; acknowledged and advanced anyway
    Skipped,
    /// Terminal
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseState {
    pub target: Target,
    pub stage: Stage,
    /// Failed attempts at the current target; resets when the target changes
    pub attempts: u32,
}

impl ExerciseState {
    pub fn new() -> Self {
        Self {
            target: Target::Phoneme(0),
            stage: Stage::Play,
            attempts: 0,
        }
    }

    /// Leniency kicks in from the second attempt onward
    pub fn lenient(&self) -> bool {
        self.attempts >= 1
    }
}

impl Default for ExerciseState {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs to the transition function
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Start the exercise
    Begin,
    /// The prompt for the current target finished playing
    PromptDone,
    /// A capture settled and was scored
    Scored(MatchResult),
    /// Feedback acknowledgment finished
    AckDone,
}

/// Side effects the driver must execute after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SpeakPhoneme(String),
    SpeakWord(String),
    /// Capture one attempt and score it against the current target
    Listen { lenient: bool },
    NotifyCorrect(MatchResult),
    NotifyRetry(MatchResult),
    NotifySkip,
    Complete,
}

/// Pure transition function: `(state, event) -> (state, effects)`.
/// Unexpected events leave the state unchanged with no effects.
pub fn step(
    entry: &WordEntry,
    state: ExerciseState,
    event: Event,
    max_attempts: u32,
) -> (ExerciseState, Vec<Effect>) {
    match (state.stage, event) {
        (_, Event::Begin) => {
            let next = ExerciseState::new();
            (next, vec![prompt_effect(entry, next.target)])
        }

        (Stage::Play, Event::PromptDone) => (
            ExerciseState {
                stage: Stage::Listen,
                ..state
            },
            vec![Effect::Listen {
                lenient: state.lenient(),
            }],
        ),

        (Stage::Listen, Event::Scored(result)) => {
            if result.matched {
                (
                    ExerciseState {
                        stage: Stage::Correct,
                        ..state
                    },
                    vec![Effect::NotifyCorrect(result)],
                )
            } else {
                let attempts = state.attempts + 1;
                if attempts >= max_attempts {
                    (
                        ExerciseState {
                            stage: Stage::Skipped,
                            attempts,
                            ..state
                        },
                        vec![Effect::NotifySkip],
                    )
                } else {
                    (
                        ExerciseState {
                            stage: Stage::Retry,
                            attempts,
                            ..state
                        },
                        vec![Effect::NotifyRetry(result)],
                    )
                }
            }
        }

        // Retry loops straight back to listening; the prompt is not replayed
        (Stage::Retry, Event::AckDone) => (
            ExerciseState {
                stage: Stage::Listen,
                ..state
            },
            vec![Effect::Listen {
                lenient: state.lenient(),
            }],
        ),

        (Stage::Correct | Stage::Skipped, Event::AckDone) => {
            let next_target = advance(entry, state.target);
            if next_target == Target::Done {
                (
                    ExerciseState {
                        target: Target::Done,
                        stage: Stage::Complete,
                        attempts: 0,
                    },
                    vec![Effect::Complete],
                )
            } else {
                // Attempt counter resets exactly here, on target change
                (
                    ExerciseState {
                        target: next_target,
                        stage: Stage::Play,
                        attempts: 0,
                    },
                    vec![prompt_effect(entry, next_target)],
                )
            }
        }

        _ => (state, Vec::new()),
    }
}

fn advance(entry: &WordEntry, target: Target) -> Target {
    match target {
        Target::Phoneme(i) if i + 1 < entry.phonemes.len() => Target::Phoneme(i + 1),
        Target::Phoneme(_) => Target::Word,
        Target::Word | Target::Done => Target::Done,
    }
}

fn prompt_effect(entry: &WordEntry, target: Target) -> Effect {
    match target {
        Target::Phoneme(i) => Effect::SpeakPhoneme(entry.phonemes[i].clone()),
        Target::Word | Target::Done => Effect::SpeakWord(entry.word.clone()),
    }
}

/// In-memory summary of one lesson run; nothing here persists
#[derive(Debug, Default, Clone, Serialize)]
pub struct LessonReport {
    pub words_attempted: u32,
    pub words_completed: u32,
    pub phonemes_skipped: u32,
    pub words_skipped: u32,
    pub lenient_passes: u32,
    /// True if the session went away mid-lesson
    pub aborted: bool,
}

/// Drives exercises against a session: executes effects, captures attempts,
/// scores them, and discards anything that settled after the session moved on.
pub struct ExerciseRunner {
    session: Arc<Session>,
    prompter: Arc<dyn Prompter>,
    config: Config,
}

impl ExerciseRunner {
    pub fn new(session: Arc<Session>, prompter: Arc<dyn Prompter>, config: Config) -> Self {
        Self {
            session,
            prompter,
            config,
        }
    }

    /// Run a whole day's lesson. Stops early only on session teardown.
    pub async fn run_lesson(&self, lesson: &Lesson) -> TutorResult<LessonReport> {
        info!("📚 Day {}: {}", lesson.day, lesson.title);
        self.prompter.speak_text(&lesson.description).await?;

        let mut report = LessonReport::default();
        for entry in &lesson.words {
            report.words_attempted += 1;
            if !self.run_word(entry, &mut report).await? {
                report.aborted = true;
                return Ok(report);
            }
        }

        if let Some(text) = &lesson.decodable_text {
            self.prompter.speak_text("Now read with me:").await?;
            self.prompter.speak_text(text).await?;
        }

        info!(
            "🎉 Lesson done: {}/{} words, {} phonemes skipped, {} lenient passes",
            report.words_completed,
            report.words_attempted,
            report.phonemes_skipped,
            report.lenient_passes
        );
        Ok(report)
    }

    /// Run one word exercise to completion.
    /// Returns false if the session was torn down before it finished.
    pub async fn run_word(&self, entry: &WordEntry, report: &mut LessonReport) -> TutorResult<bool> {
        // New target word: fresh epoch, so anything still in flight from the
        // previous word settles stale and is discarded.
        let mut epoch = self.session.advance_epoch();

        let mut state = ExerciseState::new();
        let mut effects: VecDeque<Effect> = VecDeque::new();

        let (begun, initial) = step(entry, state, Event::Begin, self.config.max_attempts);
        state = begun;
        effects.extend(initial);

        while let Some(effect) = effects.pop_front() {
            let event = match effect {
                Effect::SpeakPhoneme(p) => {
                    self.prompter.speak_phoneme(&p).await?;
                    Some(Event::PromptDone)
                }
                Effect::SpeakWord(w) => {
                    self.prompter.speak_word(&w).await?;
                    Some(Event::PromptDone)
                }
                Effect::Listen { lenient } => {
                    let outcome = self.session.capture(self.timeout_for(state.target)).await;
                    // Staleness gate: score nothing that settled after the
                    // session moved on
                    if !self.session.is_current(epoch) {
                        debug!("Discarding stale capture for '{}'", entry.word);
                        return Ok(false);
                    }
                    let result = self.score(entry, state.target, &outcome.transcripts, lenient);
                    info!(
                        "🎯 {} heard {:?} (asr confidence {:.2}, attempt {}): {:?} {:?}",
                        describe(entry, state.target),
                        outcome.transcripts,
                        outcome.confidence,
                        state.attempts,
                        result.matched,
                        result.confidence
                    );
                    Some(Event::Scored(result))
                }
                Effect::NotifyCorrect(result) => {
                    if result.confidence == Confidence::Low {
                        report.lenient_passes += 1;
                    }
                    self.prompter.speak_text("Great job!").await?;
                    Some(Event::AckDone)
                }
                Effect::NotifyRetry(_) => {
                    self.prompter.speak_text("Almost! Try once more.").await?;
                    Some(Event::AckDone)
                }
                Effect::NotifySkip => {
                    match state.target {
                        Target::Word => report.words_skipped += 1,
                        _ => report.phonemes_skipped += 1,
                    }
                    self.prompter.speak_text("Good try! Let's keep going.").await?;
                    Some(Event::AckDone)
                }
                Effect::Complete => {
                    report.words_completed += 1;
                    return Ok(true);
                }
            };

            if let Some(event) = event {
                let before = state.target;
                let (next, new_effects) = step(entry, state, event, self.config.max_attempts);
                state = next;
                effects.extend(new_effects);
                if state.target != before {
                    // Target changed within the word; refresh the epoch so a
                    // cancelled capture from the old target can never score
                    epoch = self.session.advance_epoch();
                }
            }
        }

        // Effect queue drained without Complete: only possible if the FSM
        // was fed an event it ignored, which run_word never does
        Ok(true)
    }

    fn timeout_for(&self, target: Target) -> Duration {
        match target {
            Target::Phoneme(_) => Duration::from_millis(self.config.phoneme_timeout_ms),
            _ => Duration::from_millis(self.config.word_timeout_ms),
        }
    }

    fn score(
        &self,
        entry: &WordEntry,
        target: Target,
        transcripts: &[String],
        lenient: bool,
    ) -> MatchResult {
        match target {
            Target::Phoneme(i) => match_phoneme(&entry.phonemes[i], transcripts, lenient),
            _ => match_word(&entry.word, transcripts, lenient),
        }
    }
}

fn describe(entry: &WordEntry, target: Target) -> String {
    match target {
        Target::Phoneme(i) => format!("phoneme '{}' of '{}'", entry.phonemes[i], entry.word),
        _ => format!("word '{}'", entry.word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::Confidence;

    fn cat() -> WordEntry {
        WordEntry {
            word: "cat".to_string(),
            phonemes: vec!["c".to_string(), "a".to_string(), "t".to_string()],
        }
    }

    fn hit() -> MatchResult {
        MatchResult::hit(Confidence::High, "see")
    }

    fn miss() -> MatchResult {
        MatchResult::miss("zzqx")
    }

    #[test]
    fn test_begin_prompts_first_phoneme() {
        let entry = cat();
        let (state, effects) = step(&entry, ExerciseState::new(), Event::Begin, 2);
        assert_eq!(state.target, Target::Phoneme(0));
        assert_eq!(state.stage, Stage::Play);
        assert_eq!(effects, vec![Effect::SpeakPhoneme("c".to_string())]);
    }

    #[test]
    fn test_first_listen_is_strict() {
        let entry = cat();
        let (state, _) = step(&entry, ExerciseState::new(), Event::Begin, 2);
        let (state, effects) = step(&entry, state, Event::PromptDone, 2);
        assert_eq!(state.stage, Stage::Listen);
        assert_eq!(effects, vec![Effect::Listen { lenient: false }]);
    }

    #[test]
    fn test_match_advances_and_resets_attempts() {
        let entry = cat();
        let state = ExerciseState {
            target: Target::Phoneme(0),
            stage: Stage::Listen,
            attempts: 1,
        };
        let (state, effects) = step(&entry, state, Event::Scored(hit()), 2);
        assert_eq!(state.stage, Stage::Correct);
        assert!(matches!(effects[0], Effect::NotifyCorrect(_)));

        let (state, effects) = step(&entry, state, Event::AckDone, 2);
        assert_eq!(state.target, Target::Phoneme(1));
        assert_eq!(state.stage, Stage::Play);
        assert_eq!(state.attempts, 0);
        assert_eq!(effects, vec![Effect::SpeakPhoneme("a".to_string())]);
    }

    #[test]
    fn test_first_failure_retries_then_listens_leniently() {
        let entry = cat();
        let state = ExerciseState {
            target: Target::Phoneme(0),
            stage: Stage::Listen,
            attempts: 0,
        };
        let (state, effects) = step(&entry, state, Event::Scored(miss()), 2);
        assert_eq!(state.stage, Stage::Retry);
        assert_eq!(state.attempts, 1);
        assert!(matches!(effects[0], Effect::NotifyRetry(_)));

        let (state, effects) = step(&entry, state, Event::AckDone, 2);
        assert_eq!(state.stage, Stage::Listen);
        assert_eq!(effects, vec![Effect::Listen { lenient: true }]);
    }

    #[test]
    fn test_second_failure_skips() {
        let entry = cat();
        let state = ExerciseState {
            target: Target::Phoneme(2),
            stage: Stage::Listen,
            attempts: 1,
        };
        let (state, effects) = step(&entry, state, Event::Scored(miss()), 2);
        assert_eq!(state.stage, Stage::Skipped);
        assert_eq!(effects, vec![Effect::NotifySkip]);

        // Skip still advances — to the word phase, since "t" was last
        let (state, effects) = step(&entry, state, Event::AckDone, 2);
        assert_eq!(state.target, Target::Word);
        assert_eq!(effects, vec![Effect::SpeakWord("cat".to_string())]);
    }

    #[test]
    fn test_word_match_completes_exercise() {
        let entry = cat();
        let state = ExerciseState {
            target: Target::Word,
            stage: Stage::Listen,
            attempts: 0,
        };
        let (state, _) = step(&entry, state, Event::Scored(hit()), 2);
        let (state, effects) = step(&entry, state, Event::AckDone, 2);
        assert_eq!(state.target, Target::Done);
        assert_eq!(state.stage, Stage::Complete);
        assert_eq!(effects, vec![Effect::Complete]);
    }

    #[test]
    fn test_stray_event_is_ignored() {
        let entry = cat();
        let state = ExerciseState::new();
        let (next, effects) = step(&entry, state, Event::AckDone, 2);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}
