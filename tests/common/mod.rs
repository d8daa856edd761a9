use std::sync::Arc;

use wordpets::capture::ScriptedSource;
use wordpets::config::Config;
use wordpets::curriculum::WordEntry;
use wordpets::exercise::ExerciseRunner;
use wordpets::prompt::SilentPrompter;
use wordpets::session::Session;

/// A runner wired to a scripted source, plus a handle to feed the script
pub struct TestHarness {
    pub source: Arc<ScriptedSource>,
    pub session: Arc<Session>,
    pub runner: ExerciseRunner,
}

impl TestHarness {
    pub fn new() -> Self {
        let source = Arc::new(ScriptedSource::new());
        let session = Arc::new(Session::new(source.clone()));
        let runner = ExerciseRunner::new(
            Arc::clone(&session),
            Arc::new(SilentPrompter),
            Config::default(),
        );
        Self {
            source,
            session,
            runner,
        }
    }
}

pub fn word(word: &str, phonemes: &[&str]) -> WordEntry {
    WordEntry {
        word: word.to_string(),
        phonemes: phonemes.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn transcripts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
