//! Settings struct with TOML-based sections.
//!
//! Each section maps to a TOML table and carries serde defaults, so a
//! partial config file (or none at all) still yields a usable setup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::{
    CaptionSettings, CompositionRequest, DuckingSettings, EncodeSettings, MixSettings,
};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Speech/music mix parameters.
    #[serde(default)]
    pub mix: MixSettings,

    /// Sidechain ducking parameters.
    #[serde(default)]
    pub ducking: DuckingSettings,

    /// Encoding parameters.
    #[serde(default)]
    pub encode: EncodeSettings,

    /// Caption mode and style.
    #[serde(default)]
    pub captions: CaptionSettings,

    /// Playback adjustments.
    #[serde(default)]
    pub playback: PlaybackSettings,
}

impl Settings {
    /// Assemble a composition request from these settings and the caller's
    /// input/output paths.
    pub fn build_request(
        &self,
        speech_audio: impl Into<PathBuf>,
        background_video: impl Into<PathBuf>,
        background_music: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> CompositionRequest {
        CompositionRequest {
            speech_audio: speech_audio.into(),
            background_video: background_video.into(),
            background_music: background_music.into(),
            output_path: output_path.into(),
            narration: None,
            transcript: None,
            mix: self.mix.clone(),
            ducking: self.ducking.clone(),
            encode: self.encode.clone(),
            captions: self.captions.clone(),
            playback_speed: self.playback.speed,
        }
    }
}

/// Folders for temporary artifacts and per-job logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root folder that working areas are created under.
    #[serde(default = "default_temp_root")]
    pub temp_root: String,

    /// Folder for per-composition log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_temp_root() -> String {
    ".temp".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            temp_root: default_temp_root(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Use compact log format (filter ffmpeg output, show tail on error).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of tool output lines kept for error diagnosis.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Progress update step percentage.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: default_error_tail(),
            progress_step: default_progress_step(),
        }
    }
}

/// Playback adjustments applied at mux time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Speed multiplier (1.0 = unchanged).
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_speed() -> f64 {
    1.0
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: default_speed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaptionMode;

    #[test]
    fn empty_toml_yields_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.paths.temp_root, ".temp");
        assert!(settings.ducking.enabled);
        assert_eq!(settings.playback.speed, 1.0);
    }

    #[test]
    fn partial_section_overrides_merge_with_defaults() {
        let settings: Settings = toml::from_str(
            "[captions]\nmode = \"word_chunks\"\nfont = \"Impact\"\n\n[playback]\nspeed = 1.25\n",
        )
        .unwrap();
        assert_eq!(settings.captions.mode, CaptionMode::WordChunks);
        assert_eq!(settings.captions.font, "Impact");
        assert_eq!(settings.captions.words_per_chunk, 6);
        assert_eq!(settings.playback.speed, 1.25);
    }

    #[test]
    fn build_request_carries_sections() {
        let mut settings = Settings::default();
        settings.mix.music_db_reduction = 12.0;
        settings.playback.speed = 1.5;
        let req = settings.build_request("s.mp3", "v.mp4", "m.mp3", "o.mp4");
        assert_eq!(req.mix.music_db_reduction, 12.0);
        assert_eq!(req.playback_speed, 1.5);
    }
}
