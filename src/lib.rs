//! storycut - narrated-video composition engine.
//!
//! Takes three inputs (speech audio, a long background video, a long
//! background music track) and produces one short vertical video: the
//! visuals and music trimmed to the speech's duration, the audio mixed
//! with the music attenuated and ducked under the speech, and optional
//! captions timed either proportionally from the narration text or
//! word-exactly from a transcript.
//!
//! All media work is delegated to ffmpeg/ffprobe subprocesses; this crate
//! decides what to run and in what order. The [`pipeline::compose`]
//! function is the main entry point:
//!
//! ```no_run
//! use std::sync::Arc;
//! use storycut::config::Settings;
//! use storycut::media::runner::FfmpegRunner;
//! use storycut::models::CompositionRequest;
//!
//! let settings = Settings::default();
//! let request = settings.build_request("speech.mp3", "gameplay.mp4", "lofi.mp3", "story.mp4");
//! let output = storycut::pipeline::compose(request, &settings, Arc::new(FfmpegRunner::new()), None)?;
//! # Ok::<(), storycut::pipeline::PipelineError>(())
//! ```

pub mod config;
pub mod logging;
pub mod media;
pub mod models;
pub mod pipeline;
pub mod subtitles;

pub use config::{ConfigManager, Settings};
pub use models::CompositionRequest;
pub use pipeline::{compose, PipelineError};

/// Crate version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
