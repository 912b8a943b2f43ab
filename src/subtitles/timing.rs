//! Caption timing strategies.
//!
//! Two proportional strategies derive timing from raw narration text and a
//! total duration; three exact strategies derive it from a transcript of
//! timestamped words. All strategies produce ascending, non-overlapping
//! events and clamp any degenerate `end < start` span.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::TimedWord;
use crate::subtitles::types::CaptionEvent;

/// Fragments shorter than this merge into the previous sentence so a
/// two-word tail never flashes on screen alone.
const MIN_SENTENCE_CHARS: usize = 10;

/// A word run with optional internal apostrophes, or a punctuation run.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w]+(?:['\u{2019}][\w]+)*|[^\w\s]+").expect("token regex"));

/// Split narration text into sentences.
///
/// A sentence ends at `.`, `!`, or `?` (optionally followed by a closing
/// quote) when the next character is whitespace or end of input. Short
/// fragments are merged into the previous sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            if let Some(&q) = chars.peek() {
                if matches!(q, '"' | '\u{201d}' | '\u{2019}' | '\'') {
                    current.push(q);
                    chars.next();
                }
            }
            // Only a real boundary if followed by whitespace or end,
            // so "3.5" stays intact.
            match chars.peek() {
                None => {}
                Some(next) if next.is_whitespace() => {}
                Some(_) => continue,
            }
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if trimmed.is_empty() {
        current.clear();
        return;
    }
    if trimmed.chars().count() < MIN_SENTENCE_CHARS {
        if let Some(prev) = sentences.last_mut() {
            prev.push(' ');
            prev.push_str(trimmed);
        } else {
            sentences.push(trimmed.to_string());
        }
    } else {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// Tokenize narration text into word/punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Allocate `total_duration` across weighted units, cumulatively.
///
/// Each unit gets `total * weight / total_weight`; the final end is set to
/// `total_duration` exactly to absorb floating rounding drift.
fn allocate_proportional(units: Vec<(String, usize)>, total_duration: f64) -> Vec<CaptionEvent> {
    let units: Vec<(String, usize)> = units
        .into_iter()
        .filter(|(text, _)| !text.trim().is_empty())
        .collect();

    let total_weight: usize = units.iter().map(|(_, w)| *w).sum();
    if total_weight == 0 || total_duration <= 0.0 {
        return Vec::new();
    }

    let mut events = Vec::with_capacity(units.len());
    let mut cursor = 0.0;
    let count = units.len();
    for (i, (text, weight)) in units.into_iter().enumerate() {
        let end = if i + 1 == count {
            total_duration
        } else {
            cursor + total_duration * weight as f64 / total_weight as f64
        };
        events.push(CaptionEvent::new(cursor, end, text));
        cursor = end;
    }
    events
}

/// One event per sentence, duration proportional to character count.
pub fn proportional_sentence_events(text: &str, total_duration: f64) -> Vec<CaptionEvent> {
    let units = split_sentences(text)
        .into_iter()
        .map(|s| {
            let weight = s.chars().count();
            (s, weight)
        })
        .collect();
    allocate_proportional(units, total_duration)
}

/// Fixed-size token chunks, duration proportional to token count.
pub fn proportional_word_chunk_events(
    text: &str,
    chunk_size: usize,
    total_duration: f64,
) -> Vec<CaptionEvent> {
    let tokens = tokenize(text);
    let units = tokens
        .chunks(chunk_size.max(1))
        .map(|chunk| (chunk.join(" "), chunk.len()))
        .collect();
    allocate_proportional(units, total_duration)
}

/// Fixed-size chunks with exact transcript timing.
///
/// Each chunk spans `[first.start, max(first.start, last.end)]`, guarding
/// against a degenerate chunk whose last word ends before it starts.
pub fn word_chunk_events(words: &[TimedWord], chunk_size: usize) -> Vec<CaptionEvent> {
    words
        .chunks(chunk_size.max(1))
        .filter_map(chunk_event)
        .collect()
}

/// Sentence-bounded chunks with exact transcript timing.
///
/// Words are partitioned into sentences first, then each sentence is
/// sub-chunked independently, so no event ever spans a sentence boundary.
pub fn sentence_chunk_events(words: &[TimedWord], max_words_per_event: usize) -> Vec<CaptionEvent> {
    let mut events = Vec::new();
    let mut sentence: Vec<&TimedWord> = Vec::new();

    let flush = |sentence: &mut Vec<&TimedWord>, events: &mut Vec<CaptionEvent>| {
        for chunk in sentence.chunks(max_words_per_event.max(1)) {
            if let Some(event) = chunk_event_refs(chunk) {
                events.push(event);
            }
        }
        sentence.clear();
    };

    for word in words {
        sentence.push(word);
        if word.is_sentence_end() {
            flush(&mut sentence, &mut events);
        }
    }
    flush(&mut sentence, &mut events);

    events
}

/// One event per word.
///
/// A punctuation-only token is never emitted on its own: it is appended to
/// the previous event's text and extends that event's end time. A leading
/// punctuation token with no prior event is dropped.
pub fn single_word_events(words: &[TimedWord]) -> Vec<CaptionEvent> {
    let mut events: Vec<CaptionEvent> = Vec::new();

    for word in words {
        let token = word.text.trim();
        if token.is_empty() {
            continue;
        }
        if word.is_punctuation() {
            if let Some(prev) = events.last_mut() {
                prev.text.push_str(token);
                prev.end = word.clamped_end().max(prev.start).max(prev.end);
            }
            continue;
        }
        events.push(CaptionEvent::new(word.start, word.clamped_end(), token));
    }

    events
}

fn chunk_event(chunk: &[TimedWord]) -> Option<CaptionEvent> {
    let first = chunk.first()?;
    let last = chunk.last()?;
    let text = chunk
        .iter()
        .map(|w| w.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }
    Some(CaptionEvent::new(first.start, last.clamped_end(), text))
}

fn chunk_event_refs(chunk: &[&TimedWord]) -> Option<CaptionEvent> {
    let first = chunk.first()?;
    let last = chunk.last()?;
    let text = chunk
        .iter()
        .map(|w| w.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }
    Some(CaptionEvent::new(first.start, last.clamped_end(), text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64) -> TimedWord {
        TimedWord::new(text, start, end)
    }

    #[test]
    fn splits_sentences_on_terminal_punctuation() {
        let sentences = split_sentences("First sentence here. Second sentence follows! Third one?");
        assert_eq!(
            sentences,
            vec![
                "First sentence here.",
                "Second sentence follows!",
                "Third one?"
            ]
        );
    }

    #[test]
    fn merges_short_fragment_into_previous() {
        let sentences = split_sentences("Hello there. Ok.");
        assert_eq!(sentences, vec!["Hello there. Ok."]);
    }

    #[test]
    fn keeps_closing_quote_with_sentence() {
        let sentences = split_sentences("\u{201c}Leave now.\u{201d} Nobody moved a muscle.");
        assert_eq!(
            sentences,
            vec!["\u{201c}Leave now.\u{201d}", "Nobody moved a muscle."]
        );
    }

    #[test]
    fn decimal_point_is_not_a_boundary() {
        let sentences = split_sentences("It took 3.5 seconds to fall. Then silence everywhere.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.5"));
    }

    #[test]
    fn tokenizes_words_and_punctuation() {
        assert_eq!(tokenize("It's over, now!"), vec!["It's", "over", ",", "now", "!"]);
        assert_eq!(tokenize("wait... what"), vec!["wait", "...", "what"]);
    }

    #[test]
    fn proportional_intervals_are_contiguous_and_exact() {
        let text = "A short first sentence. A somewhat longer second sentence here. The third.";
        let total = 12.5;
        let events = proportional_sentence_events(text, total);
        assert!(!events.is_empty());

        assert_eq!(events[0].start, 0.0);
        for pair in events.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[0].end);
        }
        assert_eq!(events.last().unwrap().end, total);
    }

    #[test]
    fn proportional_weights_follow_length() {
        let events =
            proportional_sentence_events("Tiny one here padded. A very much longer sentence than the first one.", 10.0);
        assert_eq!(events.len(), 2);
        assert!(events[0].duration() < events[1].duration());
    }

    #[test]
    fn proportional_word_chunks_cover_total() {
        let text = "one two three four five six seven eight nine ten eleven twelve thirteen";
        let events = proportional_word_chunk_events(text, 6, 26.0);
        assert_eq!(events.len(), 3);
        assert_eq!(events.last().unwrap().end, 26.0);
    }

    #[test]
    fn empty_text_yields_no_events() {
        assert!(proportional_sentence_events("", 10.0).is_empty());
        assert!(proportional_word_chunk_events("   ", 6, 10.0).is_empty());
    }

    #[test]
    fn chunks_thirteen_words_into_6_6_1() {
        let words: Vec<TimedWord> = (0..13)
            .map(|i| word(&format!("w{}", i), i as f64, i as f64 + 0.5))
            .collect();
        let events = word_chunk_events(&words, 6);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].text.split_whitespace().count(), 6);
        assert_eq!(events[1].text.split_whitespace().count(), 6);
        assert_eq!(events[2].text.split_whitespace().count(), 1);
        assert_eq!(events[0].start, 0.0);
        assert_eq!(events[0].end, 5.5);
    }

    #[test]
    fn chunk_guards_degenerate_end() {
        let words = vec![word("a", 1.0, 1.2), word("b", 1.2, 0.4)];
        let events = word_chunk_events(&words, 6);
        assert_eq!(events.len(), 1);
        assert!(events[0].end >= events[0].start);
    }

    #[test]
    fn sentence_chunks_never_cross_boundaries() {
        let words = vec![
            word("One", 0.0, 0.2),
            word("two", 0.2, 0.4),
            word("three.", 0.4, 0.6),
            word("Four", 0.6, 0.8),
            word("five", 0.8, 1.0),
            word("six", 1.0, 1.2),
            word("seven.", 1.2, 1.4),
        ];
        let events = sentence_chunk_events(&words, 3);
        // First sentence: one event of 3. Second sentence: 3 + 1.
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].text, "One two three.");
        assert_eq!(events[1].text, "Four five six");
        assert_eq!(events[2].text, "seven.");
    }

    #[test]
    fn single_word_folds_punctuation() {
        let words = vec![word("It's", 0.0, 0.4), word(".", 0.4, 0.4)];
        let events = single_word_events(&words);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text, "It's.");
        assert_eq!(events[0].start, 0.0);
        assert_eq!(events[0].end, 0.4);
    }

    #[test]
    fn single_word_event_count_matches_non_punct_tokens() {
        let words = vec![
            word(",", 0.0, 0.0),
            word("first", 0.1, 0.3),
            word(",", 0.3, 0.3),
            word("second", 0.4, 0.7),
            word("!", 0.7, 0.8),
            word("third", 0.9, 1.2),
        ];
        let non_punct = words.iter().filter(|w| !w.is_punctuation()).count();
        let events = single_word_events(&words);
        assert_eq!(events.len(), non_punct);
        assert_eq!(events[0].text, "first,");
        assert_eq!(events[1].text, "second!");
        assert_eq!(events[1].end, 0.8);
    }
}
