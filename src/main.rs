//! WordPets - Phonics Tutor
//!
//! Terminal front-end for the WordPets blending exercises. A typed line
//! stands in for one listening attempt; `--script` replays attempts from a
//! file instead.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wordpets::capture::{self, ScriptedSource, TranscriptSource};
use wordpets::config::Config;
use wordpets::curriculum;
use wordpets::exercise::ExerciseRunner;
use wordpets::prompt;
use wordpets::session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Curriculum day to run (1-14)
    #[arg(short, long, default_value_t = 1)]
    day: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Replay listening attempts from a file (one line per attempt,
    /// `|`-separated alternatives) instead of reading typed input
    #[arg(long)]
    script: Option<PathBuf>,

    /// Use an explicit config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🐾 WordPets v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let lesson = curriculum::lesson_for_day(args.day)
        .ok_or_else(|| anyhow::anyhow!("No lesson for day {} (valid: 1-14)", args.day))?;
    curriculum::validate_coverage(std::slice::from_ref(&lesson))?;

    // Build the transcript source
    let source: Arc<dyn TranscriptSource> = match &args.script {
        Some(path) => {
            let script = std::fs::read_to_string(path)?;
            let scripted = ScriptedSource::new();
            scripted.load_script(&script);
            info!("📜 Scripted mode: {} attempts queued", scripted.remaining());
            Arc::new(scripted)
        }
        None => {
            info!("⌨️ Typed mode: answer each prompt with a line of text");
            Arc::from(capture::create_source(&config)?)
        }
    };

    let session = Arc::new(Session::new(source));
    let prompter = prompt::create_prompter(&config);
    let runner = ExerciseRunner::new(Arc::clone(&session), prompter, config);

    let report = runner.run_lesson(&lesson).await?;
    session.teardown();

    println!();
    println!(
        "Day {} report: {}/{} words completed, {} phonemes skipped, {} words skipped, {} lenient passes",
        lesson.day,
        report.words_completed,
        report.words_attempted,
        report.phonemes_skipped,
        report.words_skipped,
        report.lenient_passes
    );

    Ok(())
}
