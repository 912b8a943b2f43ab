//! ASS caption writer.
//!
//! Emits a `[Script Info]` header with the canvas resolution, a single
//! named style built from [`CaptionSettings`], and one `Dialogue:` line per
//! event with centisecond timestamps (`H:MM:SS.cc`).

use std::fs;
use std::path::Path;

use crate::models::CaptionSettings;
use crate::subtitles::error::{RenderError, RenderResult};
use crate::subtitles::types::{AssColor, CaptionEvent, TimeFormat};

/// Name of the single style every dialogue line references.
pub const STYLE_NAME: &str = "Caption";

/// Render caption events to ASS content.
///
/// An empty event list produces a header-only file.
pub fn render_ass(events: &[CaptionEvent], style: &CaptionSettings) -> String {
    let mut output = String::new();

    output.push_str("[Script Info]\n");
    output.push_str("ScriptType: v4.00+\n");
    output.push_str(&format!("PlayResX: {}\n", style.play_res_x));
    output.push_str(&format!("PlayResY: {}\n", style.play_res_y));
    output.push_str("WrapStyle: 0\n");
    output.push_str("ScaledBorderAndShadow: yes\n\n");

    output.push_str("[V4+ Styles]\n");
    output.push_str(
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
         BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
         BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n",
    );
    output.push_str(&style_line(style));
    output.push('\n');

    output.push_str("[Events]\n");
    output.push_str("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n");
    for event in events {
        output.push_str(&format!(
            "Dialogue: 0,{},{},{},,0,0,0,,{}\n",
            TimeFormat::Centiseconds.format(event.start),
            TimeFormat::Centiseconds.format(event.end),
            STYLE_NAME,
            escape_text(&event.text)
        ));
    }

    output
}

/// Render and write to `path`.
pub fn write_ass_file(
    path: &Path,
    events: &[CaptionEvent],
    style: &CaptionSettings,
) -> RenderResult<()> {
    let content = render_ass(events, style);
    fs::write(path, content).map_err(|e| RenderError::io(path, e))
}

fn style_line(style: &CaptionSettings) -> String {
    let primary = parse_color(&style.primary_color, AssColor::from_rgb(255, 255, 255));
    let outline = parse_color(&style.outline_color, AssColor::from_rgb(0, 0, 0));
    let back = parse_color(&style.back_color, AssColor::from_rgb(0, 0, 0));

    format!(
        "Style: {},{},{},{},{},{},{},{},{},0,0,100,100,0,0,1,{},{},{},10,10,{},1\n",
        STYLE_NAME,
        style.font,
        style.font_size,
        primary.to_ass_string(),
        primary.to_ass_string(),
        outline.to_ass_string(),
        back.to_ass_string(),
        ass_bool(style.bold),
        ass_bool(style.italic),
        style.outline,
        style.shadow,
        style.alignment,
        style.margin_v,
    )
}

fn parse_color(hex: &str, fallback: AssColor) -> AssColor {
    AssColor::from_hex(hex).unwrap_or(fallback)
}

/// ASS booleans: -1 is true, 0 is false.
fn ass_bool(value: bool) -> i32 {
    if value {
        -1
    } else {
        0
    }
}

/// Replace literal braces, which ASS reserves for inline override codes.
fn escape_text(text: &str) -> String {
    text.replace('{', "(").replace('}', ")")
}
