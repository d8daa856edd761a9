//! End-to-end exercise runs over a scripted transcript source.

mod common;
use common::{word, TestHarness};

use wordpets::curriculum;
use wordpets::exercise::LessonReport;

#[tokio::test]
async fn perfect_word_run_completes_without_skips() {
    let h = TestHarness::new();
    // One attempt per phoneme, then the blended word
    h.source.enqueue(&["see"], 0.9);
    h.source.enqueue(&["ah"], 0.8);
    h.source.enqueue(&["tea"], 0.9);
    h.source.enqueue(&["cat"], 0.95);

    let mut report = LessonReport::default();
    let finished = h
        .runner
        .run_word(&word("cat", &["c", "a", "t"]), &mut report)
        .await
        .expect("run");

    assert!(finished);
    assert_eq!(report.words_completed, 1);
    assert_eq!(report.phonemes_skipped, 0);
    assert_eq!(report.lenient_passes, 0);
    assert_eq!(h.source.remaining(), 0);
}

#[tokio::test]
async fn garbage_retry_passes_leniently_on_second_attempt() {
    let h = TestHarness::new();
    // First attempt at "c" is garbage (strict reject), second is garbage
    // again but lenient mode accepts it
    h.source.enqueue(&["zzqx"], 0.3);
    h.source.enqueue(&["zzqx"], 0.3);
    h.source.enqueue(&["ah"], 0.8);
    h.source.enqueue(&["tea"], 0.9);
    h.source.enqueue(&["cat"], 0.9);

    let mut report = LessonReport::default();
    let finished = h
        .runner
        .run_word(&word("cat", &["c", "a", "t"]), &mut report)
        .await
        .expect("run");

    assert!(finished);
    assert_eq!(report.words_completed, 1);
    assert_eq!(report.phonemes_skipped, 0);
    assert_eq!(report.lenient_passes, 1);
}

#[tokio::test]
async fn silence_twice_skips_the_phoneme_but_never_blocks() {
    let h = TestHarness::new();
    // The child says nothing at all for "c"; leniency has nothing to
    // accept, so the second miss skips
    h.source.enqueue_silence();
    h.source.enqueue_silence();
    h.source.enqueue(&["ah"], 0.8);
    h.source.enqueue(&["tea"], 0.9);
    h.source.enqueue(&["cat"], 0.9);

    let mut report = LessonReport::default();
    let finished = h
        .runner
        .run_word(&word("cat", &["c", "a", "t"]), &mut report)
        .await
        .expect("run");

    assert!(finished);
    assert_eq!(report.words_completed, 1);
    assert_eq!(report.phonemes_skipped, 1);
    assert_eq!(report.words_skipped, 0);
}

#[tokio::test]
async fn silent_word_phase_is_skipped_and_still_counts_completion() {
    let h = TestHarness::new();
    h.source.enqueue(&["see"], 0.9);
    h.source.enqueue(&["ah"], 0.8);
    h.source.enqueue(&["tea"], 0.9);
    h.source.enqueue_silence();
    h.source.enqueue_silence();

    let mut report = LessonReport::default();
    let finished = h
        .runner
        .run_word(&word("cat", &["c", "a", "t"]), &mut report)
        .await
        .expect("run");

    assert!(finished);
    assert_eq!(report.words_skipped, 1);
    // Skip is a designed fallback, not a failure: the word still finishes
    assert_eq!(report.words_completed, 1);
}

#[tokio::test]
async fn torn_down_session_aborts_without_scoring() {
    let h = TestHarness::new();
    h.source.enqueue(&["see"], 0.9);
    h.session.teardown();

    let mut report = LessonReport::default();
    let finished = h
        .runner
        .run_word(&word("cat", &["c", "a", "t"]), &mut report)
        .await
        .expect("run");

    assert!(!finished);
    assert_eq!(report.words_completed, 0);
    assert_eq!(report.phonemes_skipped, 0);
}

#[tokio::test]
async fn full_lesson_with_correct_answers() {
    let h = TestHarness::new();
    let lesson = curriculum::lesson_for_day(1).expect("day 1");

    for entry in &lesson.words {
        for p in &entry.phonemes {
            // Every accept list contains the phoneme string itself
            h.source.enqueue(&[p.as_str()], 0.9);
        }
        h.source.enqueue(&[entry.word.as_str()], 0.9);
    }

    let report = h.runner.run_lesson(&lesson).await.expect("lesson");

    assert!(!report.aborted);
    assert_eq!(report.words_attempted, lesson.words.len() as u32);
    assert_eq!(report.words_completed, lesson.words.len() as u32);
    assert_eq!(report.phonemes_skipped, 0);
    assert_eq!(report.words_skipped, 0);
    assert_eq!(h.source.remaining(), 0);
}

#[tokio::test]
async fn digraph_word_with_child_speech() {
    let h = TestHarness::new();
    // "thin" said with th→f fronting at the word phase
    h.source.enqueue(&["the"], 0.7); // th accept list
    h.source.enqueue(&["it"], 0.7); // i accept list
    h.source.enqueue(&["in"], 0.7); // n accept list
    h.source.enqueue(&["fin"], 0.8); // child variant tier

    let mut report = LessonReport::default();
    let finished = h
        .runner
        .run_word(&word("thin", &["th", "i", "n"]), &mut report)
        .await
        .expect("run");

    assert!(finished);
    assert_eq!(report.words_completed, 1);
    assert_eq!(report.lenient_passes, 0);
}
