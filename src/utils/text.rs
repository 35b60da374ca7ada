//! Display-width aware text helpers for modal layout.

use crate::constants::ELLIPSIS;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width in terminal cells
#[must_use]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Wrap text to `width` cells, keeping blank lines.
///
/// Every input line yields at least one output line.
#[must_use]
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        let options = textwrap::Options::new(width).break_words(true);
        out.extend(textwrap::wrap(line, options).into_iter().map(|l| l.into_owned()));
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Cut `s` to at most `width` cells without an ellipsis
#[must_use]
pub fn take_width(s: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Fit `s` into `width` cells, replacing the tail with an ellipsis when it
/// does not fit
#[must_use]
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    format!("{}{}", take_width(s, width - 1), ELLIPSIS)
}

/// Right-pad `s` with spaces to exactly `width` cells, truncating first
#[must_use]
pub fn pad_to_width(s: &str, width: usize) -> String {
    let fitted = truncate_to_width(s, width);
    let pad = width.saturating_sub(display_width(&fitted));
    format!("{}{}", fitted, " ".repeat(pad))
}
