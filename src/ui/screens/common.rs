//! Chrome and input helpers shared by the modal screens.

use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

/// Rounded modal frame with an optional bold title
pub fn modal_block(title: Option<String>, theme: &Theme) -> Block<'static> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.background).fg(theme.text_fg));
    if let Some(title) = title {
        block = block
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
    }
    block
}

/// Clear `area`, draw `block` on it and return the inner area
pub fn draw_frame(f: &mut Frame, area: Rect, block: Block<'_>) -> Rect {
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    inner
}

/// Muted hint line
pub fn hint_line(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(theme.muted_fg)))
}

/// `Ctrl+<c>` without other modifiers besides shift
pub fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT)
        && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

/// Character typed without Ctrl or Alt
pub fn printable_char(key: &KeyEvent) -> Option<char> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

/// True when every character of `query` occurs in `text`, in order.
///
/// Both sides are compared lowercased.
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let mut haystack = text.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|q| haystack.any(|c| c == q))
}

/// Spans of `text` with each greedily matched query character in accent style
pub fn highlight_matches(text: &str, query: &str, theme: &Theme) -> Vec<Span<'static>> {
    let normal = Style::default().fg(theme.text_fg);
    if query.is_empty() {
        return vec![Span::styled(text.to_string(), normal)];
    }
    let accent = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);

    let mut pending = query.chars().flat_map(char::to_lowercase).peekable();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_matched = false;

    for c in text.chars() {
        let mut matched = false;
        for lower in c.to_lowercase() {
            if pending.peek() == Some(&lower) {
                pending.next();
                matched = true;
            }
        }
        if matched != run_matched && !run.is_empty() {
            let style = if run_matched { accent } else { normal };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_matched = matched;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, if run_matched { accent } else { normal }));
    }
    spans
}

/// First row to draw so that `cursor` is inside a window of `visible` rows
pub fn window_start(cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        return cursor;
    }
    cursor.saturating_sub(visible - 1)
}
