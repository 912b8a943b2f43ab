//! The composition request: one immutable bundle of everything the
//! pipeline needs to produce a single output video.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::words::TimedWord;

/// Caption timing strategy (or no captions at all).
///
/// Proportional modes derive timing from the narration text and the speech
/// duration; exact modes require a [`TimedWord`] transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionMode {
    /// No subtitle track.
    #[default]
    None,
    /// One caption per sentence, duration proportional to character count.
    ProportionalSentences,
    /// Fixed-size word-token chunks, duration proportional to token count.
    ProportionalWordChunks,
    /// Fixed-size chunks with word-exact transcript timing.
    WordChunks,
    /// Sentence-bounded chunks with word-exact transcript timing.
    SentenceChunks,
    /// One word per caption, punctuation folded into the previous word.
    SingleWords,
}

impl CaptionMode {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Subtitle format this mode renders to, if any.
    ///
    /// Proportional modes use the plain-timed format (SRT); exact modes use
    /// the styled format (ASS).
    pub fn format(&self) -> Option<SubtitleFormat> {
        match self {
            Self::None => None,
            Self::ProportionalSentences | Self::ProportionalWordChunks => {
                Some(SubtitleFormat::Srt)
            }
            Self::WordChunks | Self::SentenceChunks | Self::SingleWords => {
                Some(SubtitleFormat::Ass)
            }
        }
    }

    /// Whether this mode times captions from the transcript.
    pub fn needs_transcript(&self) -> bool {
        matches!(
            self,
            Self::WordChunks | Self::SentenceChunks | Self::SingleWords
        )
    }

    /// Whether this mode times captions from the raw narration text.
    pub fn needs_narration(&self) -> bool {
        matches!(self, Self::ProportionalSentences | Self::ProportionalWordChunks)
    }
}

/// Subtitle output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip: numbered blocks, millisecond timestamps.
    Srt,
    /// Advanced SubStation Alpha: styled, centisecond timestamps.
    Ass,
}

impl SubtitleFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
        }
    }
}

/// Speech/music mixing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixSettings {
    /// Music attenuation before mixing, in dB.
    #[serde(default = "default_music_db_reduction")]
    pub music_db_reduction: f64,

    /// amix weight for the speech channel.
    #[serde(default = "default_weight")]
    pub speech_weight: f64,

    /// amix weight for the music channel.
    #[serde(default = "default_weight")]
    pub music_weight: f64,
}

fn default_music_db_reduction() -> f64 {
    8.0
}

fn default_weight() -> f64 {
    1.0
}

impl Default for MixSettings {
    fn default() -> Self {
        Self {
            music_db_reduction: default_music_db_reduction(),
            speech_weight: default_weight(),
            music_weight: default_weight(),
        }
    }
}

/// Sidechain-compression (ducking) parameters.
///
/// When enabled, the music channel is compressed keyed by the speech
/// channel, so the music dips under speech but recovers between phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuckingSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Compressor threshold (linear amplitude).
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Compression ratio.
    #[serde(default = "default_ratio")]
    pub ratio: f64,

    /// Attack time in milliseconds.
    #[serde(default = "default_attack_ms")]
    pub attack_ms: u32,

    /// Release time in milliseconds.
    #[serde(default = "default_release_ms")]
    pub release_ms: u32,
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    0.05
}

fn default_ratio() -> f64 {
    4.0
}

fn default_attack_ms() -> u32 {
    15
}

fn default_release_ms() -> u32 {
    300
}

impl Default for DuckingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: default_threshold(),
            ratio: default_ratio(),
            attack_ms: default_attack_ms(),
            release_ms: default_release_ms(),
        }
    }
}

/// Video encoding parameters for the re-encode paths (trim, burn-in).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// x264 CRF quality factor (lower = higher quality, typical 18-23).
    #[serde(default = "default_crf")]
    pub crf: u32,

    /// x264 speed preset.
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Audio bitrate for AAC encodes (e.g. "192k").
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
}

fn default_crf() -> u32 {
    18
}

fn default_preset() -> String {
    "veryfast".to_string()
}

fn default_audio_bitrate() -> String {
    "192k".to_string()
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            crf: default_crf(),
            preset: default_preset(),
            audio_bitrate: default_audio_bitrate(),
        }
    }
}

/// Caption mode, chunking bounds, layout, and style.
///
/// Colors are `#RRGGBB` or `#RRGGBBAA` hex strings; alpha 00 is opaque in
/// the rendered ASS output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionSettings {
    #[serde(default)]
    pub mode: CaptionMode,

    /// Burn captions into the video pixels; when false the subtitle file is
    /// written next to the output container instead.
    #[serde(default = "default_true")]
    pub burn_in: bool,

    /// Tokens per chunk for the fixed-chunk modes.
    #[serde(default = "default_words_per_chunk")]
    pub words_per_chunk: usize,

    /// Upper bound on words per event in sentence-bounded chunking.
    #[serde(default = "default_max_words_per_event")]
    pub max_words_per_event: usize,

    /// SRT line wrap width in characters.
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    /// Maximum wrapped lines per SRT block (extra lines are dropped).
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    #[serde(default = "default_font")]
    pub font: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    #[serde(default = "default_outline_color")]
    pub outline_color: String,

    #[serde(default = "default_back_color")]
    pub back_color: String,

    #[serde(default = "default_true")]
    pub bold: bool,

    #[serde(default)]
    pub italic: bool,

    /// Outline thickness in pixels.
    #[serde(default = "default_outline")]
    pub outline: f64,

    /// Shadow depth in pixels.
    #[serde(default = "default_shadow")]
    pub shadow: f64,

    /// Numpad-style alignment anchor (2 = bottom center, 5 = middle center).
    #[serde(default = "default_alignment")]
    pub alignment: u32,

    /// Vertical margin in pixels.
    #[serde(default = "default_margin_v")]
    pub margin_v: u32,

    /// ASS canvas width.
    #[serde(default = "default_play_res_x")]
    pub play_res_x: u32,

    /// ASS canvas height.
    #[serde(default = "default_play_res_y")]
    pub play_res_y: u32,
}

fn default_words_per_chunk() -> usize {
    6
}

fn default_max_words_per_event() -> usize {
    7
}

fn default_wrap_width() -> usize {
    42
}

fn default_max_lines() -> usize {
    2
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_font_size() -> u32 {
    64
}

fn default_primary_color() -> String {
    "#FFFFFF".to_string()
}

fn default_outline_color() -> String {
    "#000000".to_string()
}

fn default_back_color() -> String {
    "#00000080".to_string()
}

fn default_outline() -> f64 {
    3.0
}

fn default_shadow() -> f64 {
    1.0
}

fn default_alignment() -> u32 {
    5
}

fn default_margin_v() -> u32 {
    60
}

fn default_play_res_x() -> u32 {
    1080
}

fn default_play_res_y() -> u32 {
    1920
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            mode: CaptionMode::default(),
            burn_in: true,
            words_per_chunk: default_words_per_chunk(),
            max_words_per_event: default_max_words_per_event(),
            wrap_width: default_wrap_width(),
            max_lines: default_max_lines(),
            font: default_font(),
            font_size: default_font_size(),
            primary_color: default_primary_color(),
            outline_color: default_outline_color(),
            back_color: default_back_color(),
            bold: true,
            italic: false,
            outline: default_outline(),
            shadow: default_shadow(),
            alignment: default_alignment(),
            margin_v: default_margin_v(),
            play_res_x: default_play_res_x(),
            play_res_y: default_play_res_y(),
        }
    }
}

/// Immutable configuration bundle for one composition.
///
/// Constructed once by the caller and never mutated. Narration text and
/// transcript come from the external text-generation and transcription
/// collaborators; whichever the caption mode needs must be present.
#[derive(Debug, Clone)]
pub struct CompositionRequest {
    /// Narration/speech audio; its duration is authoritative for the whole
    /// composition.
    pub speech_audio: PathBuf,
    /// Long background video to trim.
    pub background_video: PathBuf,
    /// Long background music to trim and attenuate.
    pub background_music: PathBuf,
    /// Final container path.
    pub output_path: PathBuf,
    /// Raw narration text (proportional caption modes).
    pub narration: Option<String>,
    /// Timestamped transcript (exact caption modes).
    pub transcript: Option<Vec<TimedWord>>,
    pub mix: MixSettings,
    pub ducking: DuckingSettings,
    pub encode: EncodeSettings,
    pub captions: CaptionSettings,
    /// Playback speed multiplier applied at mux time (1.0 = unchanged).
    pub playback_speed: f64,
}

impl CompositionRequest {
    pub fn new(
        speech_audio: impl Into<PathBuf>,
        background_video: impl Into<PathBuf>,
        background_music: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            speech_audio: speech_audio.into(),
            background_video: background_video.into(),
            background_music: background_music.into(),
            output_path: output_path.into(),
            narration: None,
            transcript: None,
            mix: MixSettings::default(),
            ducking: DuckingSettings::default(),
            encode: EncodeSettings::default(),
            captions: CaptionSettings::default(),
            playback_speed: 1.0,
        }
    }

    pub fn with_narration(mut self, text: impl Into<String>) -> Self {
        self.narration = Some(text.into());
        self
    }

    pub fn with_transcript(mut self, words: Vec<TimedWord>) -> Self {
        self.transcript = Some(words);
        self
    }

    pub fn with_captions(mut self, captions: CaptionSettings) -> Self {
        self.captions = captions;
        self
    }

    pub fn with_playback_speed(mut self, speed: f64) -> Self {
        self.playback_speed = speed;
        self
    }

    /// The three input paths, in probe/trim order.
    pub fn input_paths(&self) -> [&PathBuf; 3] {
        [
            &self.speech_audio,
            &self.background_video,
            &self.background_music,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_mode_picks_format() {
        assert_eq!(CaptionMode::None.format(), None);
        assert_eq!(
            CaptionMode::ProportionalSentences.format(),
            Some(SubtitleFormat::Srt)
        );
        assert_eq!(CaptionMode::SingleWords.format(), Some(SubtitleFormat::Ass));
    }

    #[test]
    fn caption_mode_declares_inputs() {
        assert!(CaptionMode::WordChunks.needs_transcript());
        assert!(!CaptionMode::WordChunks.needs_narration());
        assert!(CaptionMode::ProportionalSentences.needs_narration());
        assert!(!CaptionMode::None.needs_transcript());
    }

    #[test]
    fn request_builder_defaults() {
        let req = CompositionRequest::new("s.mp3", "v.mp4", "m.mp3", "out.mp4");
        assert_eq!(req.playback_speed, 1.0);
        assert!(req.captions.mode.is_none());
        assert!(req.ducking.enabled);
        assert_eq!(req.mix.music_db_reduction, 8.0);
    }

    #[test]
    fn caption_settings_deserialize_with_defaults() {
        let s: CaptionSettings = toml::from_str("mode = \"single_words\"").unwrap();
        assert_eq!(s.mode, CaptionMode::SingleWords);
        assert_eq!(s.words_per_chunk, 6);
        assert!(s.burn_in);
    }
}
