//! ffmpeg filter-graph builders.

use std::path::Path;

use crate::models::{DuckingSettings, MixSettings, SubtitleFormat};

/// Build the speech+music mixing filter graph.
///
/// With ducking, the music channel (`[1:a]`) is sidechain-compressed keyed
/// by the speech channel (`[0:a]`) before the weighted mix. The mix always
/// uses `duration=first` so the speech channel's length stays
/// authoritative, with a smooth dropout transition at the boundary.
pub fn mix_filter(mix: &MixSettings, ducking: &DuckingSettings) -> String {
    let weights = format!("{} {}", mix.speech_weight, mix.music_weight);
    if ducking.enabled {
        format!(
            "[1:a][0:a]sidechaincompress=threshold={}:ratio={}:attack={}:release={}[duck];\
             [0:a][duck]amix=inputs=2:weights={}:duration=first:dropout_transition=3[a]",
            ducking.threshold, ducking.ratio, ducking.attack_ms, ducking.release_ms, weights
        )
    } else {
        format!(
            "[0:a][1:a]amix=inputs=2:weights={}:duration=first:dropout_transition=3[a]",
            weights
        )
    }
}

/// Music attenuation applied before any mixing, so it composes with
/// ducking.
pub fn volume_filter(db_reduction: f64) -> String {
    format!("volume=-{}dB", db_reduction)
}

/// Subtitle burn-in filter for the mux step.
pub fn burn_filter(subtitle_path: &Path, format: SubtitleFormat) -> String {
    let path = escape_filter_path(&subtitle_path.display().to_string());
    match format {
        SubtitleFormat::Ass => format!("ass='{}'", path),
        SubtitleFormat::Srt => format!("subtitles='{}'", path),
    }
}

/// Video timestamp scaling for a non-unity playback speed.
pub fn speed_video_filter(speed: f64) -> String {
    format!("setpts=PTS/{}", speed)
}

/// Audio tempo scaling for a non-unity playback speed.
///
/// ffmpeg's atempo accepts 0.5-2.0 per stage, so out-of-range speeds are
/// decomposed into a chain of in-range factors.
pub fn speed_audio_filter(speed: f64) -> String {
    // The pipeline rejects non-positive speeds before building filters;
    // a unity floor here keeps the decomposition terminating regardless.
    let speed = if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        1.0
    };

    let mut factors = Vec::new();
    let mut remaining = speed;
    while remaining > 2.0 {
        factors.push(2.0);
        remaining /= 2.0;
    }
    while remaining < 0.5 {
        factors.push(0.5);
        remaining /= 0.5;
    }
    factors.push(remaining);

    factors
        .iter()
        .map(|f| format!("atempo={}", f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Escape a path for use inside an ffmpeg filter argument.
///
/// Colons, quotes, and backslashes are all meaningful to the filter graph
/// parser.
fn escape_filter_path(path: &str) -> String {
    path.replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}
