//! Timestamped transcript words from the transcription collaborator.

use serde::{Deserialize, Serialize};

/// A single transcribed word with start/end timestamps in seconds.
///
/// Produced externally (speech recognition) and consumed by the subtitle
/// timing strategies. The source emits words time-ordered and
/// non-overlapping, but nothing here relies on that: any span with
/// `end < start` is clamped at read time via [`TimedWord::clamped_end`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedWord {
    /// Word text (may be a bare punctuation token).
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl TimedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// End time, clamped so it never precedes the start.
    pub fn clamped_end(&self) -> f64 {
        self.end.max(self.start)
    }

    /// True if the token consists entirely of punctuation characters.
    pub fn is_punctuation(&self) -> bool {
        let t = self.text.trim();
        !t.is_empty() && t.chars().all(is_punct_char)
    }

    /// True if the token ends a sentence (`.`, `!`, `?`, or `…`, optionally
    /// followed by a closing quote).
    pub fn is_sentence_end(&self) -> bool {
        let t = self.text.trim().trim_end_matches(['"', '\u{201d}', '\u{2019}', '\'']);
        t.ends_with(['.', '!', '?', '\u{2026}'])
    }
}

fn is_punct_char(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | '!'
            | '?'
            | ';'
            | ':'
            | '-'
            | '\u{2013}'
            | '\u{2014}'
            | '('
            | ')'
            | '['
            | ']'
            | '"'
            | '\u{201c}'
            | '\u{201d}'
            | '\''
            | '\u{2019}'
            | '\u{2026}'
    )
}
