//! SRT caption writer.
//!
//! Sequential numbered blocks with millisecond timestamps
//! (`HH:MM:SS,mmm --> HH:MM:SS,mmm`) and line-wrapped text.

use std::fs;
use std::path::Path;

use crate::subtitles::error::{RenderError, RenderResult};
use crate::subtitles::types::{CaptionEvent, TimeFormat};

/// Render caption events to SRT content.
///
/// Text is wrapped at `wrap_width` characters on word boundaries; lines
/// beyond `max_lines` are dropped, not re-wrapped. An empty event list
/// produces an empty string.
pub fn render_srt(events: &[CaptionEvent], wrap_width: usize, max_lines: usize) -> String {
    let mut output = String::new();

    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            TimeFormat::Milliseconds.format(event.start),
            TimeFormat::Milliseconds.format(event.end)
        ));
        for line in wrap_text(&event.text, wrap_width, max_lines) {
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}

/// Render and write to `path`.
pub fn write_srt_file(
    path: &Path,
    events: &[CaptionEvent],
    wrap_width: usize,
    max_lines: usize,
) -> RenderResult<()> {
    let content = render_srt(events, wrap_width, max_lines);
    fs::write(path, content).map_err(|e| RenderError::io(path, e))
}

/// Greedy word wrap. A single word longer than the width gets its own line.
fn wrap_text(text: &str, wrap_width: usize, max_lines: usize) -> Vec<String> {
    let wrap_width = wrap_width.max(1);
    let max_lines = max_lines.max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= wrap_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(max_lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_numbered_blocks() {
        let events = vec![
            CaptionEvent::new(1.0, 4.0, "Hello, world!"),
            CaptionEvent::new(5.0, 8.0, "Second caption."),
        ];
        let output = render_srt(&events, 42, 2);
        let expected = "1\n00:00:01,000 --> 00:00:04,000\nHello, world!\n\n2\n00:00:05,000 --> 00:00:08,000\nSecond caption.\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn empty_events_produce_empty_output() {
        assert_eq!(render_srt(&[], 42, 2), "");
    }

    #[test]
    fn wraps_at_width() {
        let lines = wrap_text("one two three four five", 9, 5);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn truncates_beyond_max_lines() {
        let lines = wrap_text("one two three four five", 5, 2);
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn oversized_word_gets_own_line() {
        let lines = wrap_text("hi incomprehensibilities yo", 8, 5);
        assert_eq!(lines, vec!["hi", "incomprehensibilities", "yo"]);
    }

    #[test]
    fn timestamps_round_trip_within_a_millisecond() {
        let events = vec![CaptionEvent::new(1.2345, 3.9996, "text")];
        let output = render_srt(&events, 42, 2);
        let timing_line = output.lines().nth(1).unwrap();
        let (start, end) = timing_line.split_once(" --> ").unwrap();
        let start = TimeFormat::Milliseconds.parse(start).unwrap();
        let end = TimeFormat::Milliseconds.parse(end).unwrap();
        assert!((start - 1.2345).abs() <= 0.001);
        assert!((end - 3.9996).abs() <= 0.001);
    }
}
