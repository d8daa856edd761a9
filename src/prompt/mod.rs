//! Prompting (TTS boundary)
//!
//! The engine never synthesizes audio; it hands utterances to a `Prompter`.
//! Plain TTS reads "c" as "see", so letter phonemes go through a
//! respelling table first ("kuh").

use anyhow::Result;
use async_trait::async_trait;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;

lazy_static! {
    /// How each phoneme should be spoken aloud (phonetic respelling)
    static ref PHONEME_PRONUNCIATION: HashMap<&'static str, &'static str> = {
        let entries: &[(&str, &str)] = &[
            // Consonants — short phonetic sounds
            ("b", "buh"), ("c", "kuh"), ("d", "duh"), ("f", "fff"),
            ("g", "guh"), ("h", "huh"), ("j", "juh"), ("k", "kuh"),
            ("l", "lll"), ("m", "mmm"), ("n", "nnn"), ("p", "puh"),
            ("q", "kwuh"), ("r", "rrr"), ("s", "sss"), ("t", "tuh"),
            ("v", "vvv"), ("w", "wuh"), ("x", "ks"), ("y", "yuh"),
            ("z", "zzz"),
            // Short vowels
            ("a", "aah"), ("e", "eh"), ("i", "ih"), ("o", "oh"), ("u", "uh"),
            // Digraphs
            ("sh", "shh"), ("ch", "chuh"), ("th", "thh"), ("ck", "kuh"),
            ("ng", "nng"),
            // Blends — say them blended
            ("st", "sst"), ("cl", "cluh"), ("fr", "frr"), ("fl", "fluh"),
            ("sp", "ssp"), ("mp", "mmp"), ("nd", "nnd"), ("lk", "lk"),
        ];
        entries.iter().copied().collect()
    };
}

/// Spoken form of a phoneme; unknown phonemes are read as written
pub fn pronunciation(phoneme: &str) -> &str {
    PHONEME_PRONUNCIATION
        .get(phoneme)
        .copied()
        .unwrap_or(phoneme)
}

/// Trait for prompters
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Speak a phoneme's sound (respelled, not its letter name)
    async fn speak_phoneme(&self, phoneme: &str) -> Result<()>;

    /// Speak a whole word
    async fn speak_word(&self, word: &str) -> Result<()>;

    /// Speak arbitrary feedback text
    async fn speak_text(&self, text: &str) -> Result<()>;

    /// Get the prompter name
    fn name(&self) -> &str;
}

/// Prints prompts to the terminal; the demo stand-in for real TTS
#[derive(Debug, Default)]
pub struct ConsolePrompter;

#[async_trait]
impl Prompter for ConsolePrompter {
    async fn speak_phoneme(&self, phoneme: &str) -> Result<()> {
        println!("🔊 [{}] \"{}\"", phoneme, pronunciation(phoneme));
        Ok(())
    }

    async fn speak_word(&self, word: &str) -> Result<()> {
        println!("🔊 \"{}\"", word);
        Ok(())
    }

    async fn speak_text(&self, text: &str) -> Result<()> {
        println!("💬 {}", text);
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Discards all prompts; used by tests and scripted runs
#[derive(Debug, Default)]
pub struct SilentPrompter;

#[async_trait]
impl Prompter for SilentPrompter {
    async fn speak_phoneme(&self, _phoneme: &str) -> Result<()> {
        Ok(())
    }

    async fn speak_word(&self, _word: &str) -> Result<()> {
        Ok(())
    }

    async fn speak_text(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

/// Factory to create the configured prompter
pub fn create_prompter(config: &Config) -> Arc<dyn Prompter> {
    let prompter: Arc<dyn Prompter> = match config.prompter.as_str() {
        "console" => Arc::new(ConsolePrompter),
        "silent" => Arc::new(SilentPrompter),
        other => {
            warn!("Unknown prompter '{}', falling back to console", other);
            Arc::new(ConsolePrompter)
        }
    };
    info!("✅ Prompter '{}' initialized", prompter.name());
    prompter
}
