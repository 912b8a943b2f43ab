//! Per-composition working directory.
//!
//! Intermediate artifacts (trimmed video, trimmed music, mixed audio,
//! subtitle file) live in a directory exclusively owned by one composition,
//! created fresh per run and removed on drop whether the run succeeded or
//! not. Artifact names are fixed; uniqueness comes from the directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::models::SubtitleFormat;

/// Exclusively-owned scratch directory for one composition.
pub struct WorkingArea {
    dir: TempDir,
}

impl WorkingArea {
    /// Create a fresh working directory under `temp_root`, creating the
    /// root itself if needed.
    pub fn create_under(temp_root: &Path) -> io::Result<Self> {
        fs::create_dir_all(temp_root)?;
        let dir = tempfile::Builder::new()
            .prefix("compose-")
            .tempdir_in(temp_root)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Background video trimmed to the speech duration.
    pub fn trimmed_video(&self) -> PathBuf {
        self.dir.path().join("video_trim.mp4")
    }

    /// Background music trimmed and attenuated.
    pub fn trimmed_music(&self) -> PathBuf {
        self.dir.path().join("music_trim.m4a")
    }

    /// Speech/music mix.
    pub fn mixed_audio(&self) -> PathBuf {
        self.dir.path().join("mixed_audio.m4a")
    }

    /// Rendered subtitle file.
    pub fn subtitle(&self, format: SubtitleFormat) -> PathBuf {
        self.dir
            .path()
            .join(format!("captions.{}", format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_under_missing_root() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        let area = WorkingArea::create_under(&nested).unwrap();
        assert!(area.path().starts_with(&nested));
        assert!(area.path().is_dir());
    }

    #[test]
    fn two_areas_never_collide() {
        let root = tempdir().unwrap();
        let a = WorkingArea::create_under(root.path()).unwrap();
        let b = WorkingArea::create_under(root.path()).unwrap();
        assert_ne!(a.path(), b.path());
        assert_ne!(a.mixed_audio(), b.mixed_audio());
    }

    #[test]
    fn removed_on_drop() {
        let root = tempdir().unwrap();
        let area = WorkingArea::create_under(root.path()).unwrap();
        let path = area.path().to_path_buf();
        assert!(path.exists());
        drop(area);
        assert!(!path.exists());
    }

    #[test]
    fn subtitle_path_follows_format() {
        let root = tempdir().unwrap();
        let area = WorkingArea::create_under(root.path()).unwrap();
        assert!(area.subtitle(SubtitleFormat::Srt).ends_with("captions.srt"));
        assert!(area.subtitle(SubtitleFormat::Ass).ends_with("captions.ass"));
    }
}
