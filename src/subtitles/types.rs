//! Core caption types.
//!
//! Timing is stored as `f64` seconds throughout; rounding to the target
//! format's unit (milliseconds for SRT, centiseconds for ASS) happens only
//! at write time through [`TimeFormat`].

/// One timed subtitle display unit.
///
/// Invariant: `0 <= start <= end` and the text is never empty. The timers
/// uphold this by clamping degenerate spans and skipping empty chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEvent {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Display text.
    pub text: String,
}

impl CaptionEvent {
    /// Create an event, clamping `end` so it never precedes `start`.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        let start = start.max(0.0);
        Self {
            start,
            end: end.max(start),
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Timestamp encoding for a subtitle format, parameterized by sub-second
/// unit and separator.
///
/// SRT uses `HH:MM:SS,mmm`; ASS uses `H:MM:SS.cc`. Both formats share the
/// same hour/minute/second structure, so one formatter covers both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// Millisecond precision, comma separator, two-digit hours (SRT).
    Milliseconds,
    /// Centisecond precision, dot separator, one-digit hours (ASS).
    Centiseconds,
}

impl TimeFormat {
    /// Subdivisions of a second for this format's final field.
    fn units_per_second(&self) -> u64 {
        match self {
            Self::Milliseconds => 1000,
            Self::Centiseconds => 100,
        }
    }

    /// Format a time in seconds as a timestamp string.
    ///
    /// Negative inputs are clamped to zero.
    pub fn format(&self, seconds: f64) -> String {
        let total = (seconds.max(0.0) * self.units_per_second() as f64).round() as u64;
        let frac = total % self.units_per_second();
        let total_secs = total / self.units_per_second();
        let secs = total_secs % 60;
        let mins = (total_secs / 60) % 60;
        let hours = total_secs / 3600;

        match self {
            Self::Milliseconds => format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, frac),
            Self::Centiseconds => format!("{}:{:02}:{:02}.{:02}", hours, mins, secs, frac),
        }
    }

    /// Parse a timestamp back to seconds. Used by round-trip tests.
    pub fn parse(&self, s: &str) -> Option<f64> {
        let sep = match self {
            Self::Milliseconds => ',',
            Self::Centiseconds => '.',
        };
        let (hms, frac) = s.split_once(sep)?;
        let mut parts = hms.split(':');
        let hours: u64 = parts.next()?.parse().ok()?;
        let mins: u64 = parts.next()?.parse().ok()?;
        let secs: u64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        let frac: u64 = frac.parse().ok()?;
        let whole = (hours * 3600 + mins * 60 + secs) as f64;
        Some(whole + frac as f64 / self.units_per_second() as f64)
    }
}

/// ASS color in &HAABBGGRR notation.
///
/// Alpha is inverted relative to CSS: 0 is opaque, 255 fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl AssColor {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0 }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string.
    ///
    /// The trailing AA byte is CSS-style opacity (FF = opaque) and is
    /// converted to ASS transparency.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if !matches!(s.len(), 6 | 8) || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        let (r, g, b) = (byte(0)?, byte(2)?, byte(4)?);
        let a = if s.len() == 8 { 255 - byte(6)? } else { 0 };
        Some(Self { r, g, b, a })
    }

    /// Render as an ASS style color (&HAABBGGRR).
    pub fn to_ass_string(&self) -> String {
        format!("&H{:02X}{:02X}{:02X}{:02X}", self.a, self.b, self.g, self.r)
    }
}
