//! Format-specific caption writers.

pub mod ass;
pub mod srt;

pub use ass::{render_ass, write_ass_file};
pub use srt::{render_srt, write_srt_file};
