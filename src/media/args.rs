//! ffmpeg argument builders for the composition steps.
//!
//! Each builder returns the full argument vector for one invocation, so
//! tests can assert the exact command without running ffmpeg. All builders
//! pass `-y`: intermediate files live in an exclusively-owned working
//! directory and the final output is the caller's to overwrite.

use std::path::Path;

use crate::models::{CompositionRequest, EncodeSettings, SubtitleFormat};

use super::filters;

fn duration_arg(seconds: f64) -> String {
    format!("{:.3}", seconds.max(0.0))
}

fn s(v: impl Into<String>) -> String {
    v.into()
}

fn p(path: &Path) -> String {
    path.display().to_string()
}

/// Trim the background video to `[0, duration]`, dropping its audio.
///
/// Always re-encodes: a stream copy would cut on the nearest keyframe, not
/// the exact boundary.
pub fn trim_video_args(
    input: &Path,
    duration_secs: f64,
    encode: &EncodeSettings,
    output: &Path,
) -> Vec<String> {
    vec![
        s("-y"),
        s("-ss"),
        s("0"),
        s("-t"),
        duration_arg(duration_secs),
        s("-i"),
        p(input),
        s("-c:v"),
        s("libx264"),
        s("-preset"),
        encode.preset.clone(),
        s("-crf"),
        encode.crf.to_string(),
        s("-an"),
        p(output),
    ]
}

/// Trim the background music to `[0, duration]` and attenuate it pre-mix.
pub fn trim_music_args(
    input: &Path,
    duration_secs: f64,
    db_reduction: f64,
    encode: &EncodeSettings,
    output: &Path,
) -> Vec<String> {
    vec![
        s("-y"),
        s("-ss"),
        s("0"),
        s("-t"),
        duration_arg(duration_secs),
        s("-i"),
        p(input),
        s("-af"),
        filters::volume_filter(db_reduction),
        s("-c:a"),
        s("aac"),
        s("-b:a"),
        encode.audio_bitrate.clone(),
        p(output),
    ]
}

/// Mix speech and attenuated music into one stream.
pub fn mix_args(
    speech: &Path,
    trimmed_music: &Path,
    request: &CompositionRequest,
    output: &Path,
) -> Vec<String> {
    vec![
        s("-y"),
        s("-i"),
        p(speech),
        s("-i"),
        p(trimmed_music),
        s("-filter_complex"),
        filters::mix_filter(&request.mix, &request.ducking),
        s("-map"),
        s("[a]"),
        s("-c:a"),
        s("aac"),
        s("-b:a"),
        request.encode.audio_bitrate.clone(),
        p(output),
    ]
}

/// Mux the trimmed video with the mixed audio into the output container.
///
/// With a burn-in subtitle or a non-unity playback speed the video must be
/// re-encoded (filters cannot apply to a copied stream); otherwise the
/// video stream is copied verbatim. Audio is always re-encoded, and
/// `-shortest` bounds the output to the shorter stream.
pub fn mux_args(
    trimmed_video: &Path,
    mixed_audio: &Path,
    burn_subtitle: Option<(&Path, SubtitleFormat)>,
    request: &CompositionRequest,
    output: &Path,
) -> Vec<String> {
    let speed = request.playback_speed;
    let unity_speed = (speed - 1.0).abs() < f64::EPSILON;

    let mut video_filters = Vec::new();
    if let Some((path, format)) = burn_subtitle {
        video_filters.push(filters::burn_filter(path, format));
    }
    if !unity_speed {
        video_filters.push(filters::speed_video_filter(speed));
    }

    let mut args = vec![
        s("-y"),
        s("-i"),
        p(trimmed_video),
        s("-i"),
        p(mixed_audio),
        s("-map"),
        s("0:v:0"),
        s("-map"),
        s("1:a:0"),
    ];

    if video_filters.is_empty() {
        args.extend([s("-c:v"), s("copy")]);
    } else {
        args.extend([
            s("-filter:v"),
            video_filters.join(","),
            s("-c:v"),
            s("libx264"),
            s("-preset"),
            request.encode.preset.clone(),
            s("-crf"),
            request.encode.crf.to_string(),
        ]);
    }

    if !unity_speed {
        args.extend([s("-filter:a"), filters::speed_audio_filter(speed)]);
    }

    args.extend([
        s("-c:a"),
        s("aac"),
        s("-b:a"),
        request.encode.audio_bitrate.clone(),
        s("-shortest"),
        p(output),
    ]);

    args
}
