//! Command-line front end for the composition pipeline.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use clap::Parser;

use storycut::config::ConfigManager;
use storycut::logging::LogCallback;
use storycut::media::runner::FfmpegRunner;
use storycut::models::{CaptionMode, TimedWord};
use storycut::pipeline;

#[derive(Parser, Debug)]
#[command(name = "storycut", version = storycut::version(), about = "Compose a narrated video from speech, background video, and music")]
struct Cli {
    /// Narration/speech audio file (its duration drives the composition)
    speech: PathBuf,

    /// Background video file
    video: PathBuf,

    /// Background music file
    music: PathBuf,

    /// Output video path
    #[arg(short, long)]
    output: PathBuf,

    /// Config file (TOML); defaults are used when absent
    #[arg(short, long, default_value = "storycut.toml")]
    config: PathBuf,

    /// Text file with the narration (proportional caption modes)
    #[arg(long)]
    narration: Option<PathBuf>,

    /// JSON transcript of timed words (word-exact caption modes)
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Caption mode override: none, proportional_sentences,
    /// proportional_word_chunks, word_chunks, sentence_chunks, single_words
    #[arg(long, value_parser = parse_caption_mode)]
    captions: Option<CaptionMode>,

    /// Playback speed override (e.g. 1.25)
    #[arg(long)]
    speed: Option<f64>,

    /// Print the composition log to stdout
    #[arg(short, long)]
    verbose: bool,
}

fn parse_caption_mode(s: &str) -> Result<CaptionMode, String> {
    match s {
        "none" => Ok(CaptionMode::None),
        "proportional_sentences" => Ok(CaptionMode::ProportionalSentences),
        "proportional_word_chunks" => Ok(CaptionMode::ProportionalWordChunks),
        "word_chunks" => Ok(CaptionMode::WordChunks),
        "sentence_chunks" => Ok(CaptionMode::SentenceChunks),
        "single_words" => Ok(CaptionMode::SingleWords),
        other => Err(format!("unknown caption mode '{}'", other)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("storycut=info")),
        )
        .init();

    let mut manager = ConfigManager::new(&cli.config);
    manager
        .load_or_default()
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let mut settings = manager.settings().clone();

    if let Some(mode) = cli.captions {
        settings.captions.mode = mode;
    }
    if let Some(speed) = cli.speed {
        if speed <= 0.0 {
            bail!("playback speed must be positive, got {}", speed);
        }
        settings.playback.speed = speed;
    }

    let mut request = settings.build_request(&cli.speech, &cli.video, &cli.music, &cli.output);

    if let Some(path) = &cli.narration {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading narration from {}", path.display()))?;
        request = request.with_narration(text);
    }
    if let Some(path) = &cli.transcript {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading transcript from {}", path.display()))?;
        let words: Vec<TimedWord> = serde_json::from_str(&json)
            .with_context(|| format!("parsing transcript {}", path.display()))?;
        request = request.with_transcript(words);
    }

    let mode = request.captions.mode;
    if mode.needs_narration() && request.narration.is_none() {
        bail!("caption mode requires --narration <file>");
    }
    if mode.needs_transcript() && request.transcript.is_none() {
        bail!("caption mode requires --transcript <file>");
    }

    let callback: Option<LogCallback> = if cli.verbose {
        Some(Box::new(|line| println!("{}", line)))
    } else {
        None
    };

    let output = pipeline::compose(request, &settings, Arc::new(FfmpegRunner::new()), callback)?;
    println!("{}", output.display());
    Ok(())
}
