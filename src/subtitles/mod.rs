//! Caption timing and rendering.
//!
//! - **types**: core data structures (CaptionEvent, TimeFormat, AssColor)
//! - **timing**: proportional and transcript-exact timing strategies
//! - **writers**: SRT and ASS output
//!
//! The pipeline's subtitle step picks a timing strategy from the configured
//! [`crate::models::CaptionMode`], then renders with the matching writer.

mod error;
pub mod timing;
mod types;
pub mod writers;

pub use error::{RenderError, RenderResult};
pub use types::{AssColor, CaptionEvent, TimeFormat};

use crate::models::{CaptionMode, CompositionRequest};

/// Build caption events for a request, given the authoritative duration.
///
/// Returns `None` when the caption mode is `None`. Proportional modes fall
/// back to an empty event list when no narration text was provided; exact
/// modes likewise when no transcript was provided (the pipeline validates
/// those cases before getting here).
pub fn build_events(request: &CompositionRequest, total_duration: f64) -> Option<Vec<CaptionEvent>> {
    let captions = &request.captions;
    let events = match captions.mode {
        CaptionMode::None => return None,
        CaptionMode::ProportionalSentences => timing::proportional_sentence_events(
            request.narration.as_deref().unwrap_or_default(),
            total_duration,
        ),
        CaptionMode::ProportionalWordChunks => timing::proportional_word_chunk_events(
            request.narration.as_deref().unwrap_or_default(),
            captions.words_per_chunk,
            total_duration,
        ),
        CaptionMode::WordChunks => timing::word_chunk_events(
            request.transcript.as_deref().unwrap_or_default(),
            captions.words_per_chunk,
        ),
        CaptionMode::SentenceChunks => timing::sentence_chunk_events(
            request.transcript.as_deref().unwrap_or_default(),
            captions.max_words_per_event,
        ),
        CaptionMode::SingleWords => {
            timing::single_word_events(request.transcript.as_deref().unwrap_or_default())
        }
    };
    Some(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaptionSettings, TimedWord};

    #[test]
    fn mode_none_builds_nothing() {
        let req = CompositionRequest::new("s", "v", "m", "o");
        assert!(build_events(&req, 10.0).is_none());
    }

    #[test]
    fn dispatches_on_mode() {
        let mut req = CompositionRequest::new("s", "v", "m", "o")
            .with_narration("A first sentence right here. And then a second one.")
            .with_transcript(vec![
                TimedWord::new("hey", 0.0, 0.4),
                TimedWord::new("you", 0.5, 0.8),
            ]);

        req.captions = CaptionSettings {
            mode: CaptionMode::ProportionalSentences,
            ..CaptionSettings::default()
        };
        assert_eq!(build_events(&req, 10.0).unwrap().len(), 2);

        req.captions.mode = CaptionMode::SingleWords;
        assert_eq!(build_events(&req, 10.0).unwrap().len(), 2);
    }
}
