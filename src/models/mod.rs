//! Core data model: transcript words and the composition request.

mod request;
mod words;

pub use request::{
    CaptionMode, CaptionSettings, CompositionRequest, DuckingSettings, EncodeSettings,
    MixSettings, SubtitleFormat,
};
pub use words::TimedWord;
