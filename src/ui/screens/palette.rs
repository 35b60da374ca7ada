//! Fuzzy command palette grouped by section headers.

use super::common::{draw_frame, fuzzy_match, highlight_matches, is_ctrl, modal_block, printable_char};
use crate::constants::{
    PALETTE_FALLBACK_VISIBLE, PALETTE_HINTS, PALETTE_HINTS_FILTERING, PALETTE_LABEL_WIDTH, PALETTE_MAX_VISIBLE,
    PALETTE_MAX_WIDTH, PALETTE_MIN_VISIBLE, PALETTE_MIN_WIDTH, PALETTE_NO_MATCHES, PALETTE_NO_RESULTS,
    PALETTE_PLACEHOLDER, PALETTE_SHORTCUT_WIDTH,
};
use crate::icons::UiIcon;
use crate::ui::core::{Action, Screen, ScreenContext, ScreenKind, ScreenResult};
use crate::ui::layout::LayoutManager;
use crate::utils::text::{display_width, pad_to_width};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::fmt;

/// One palette row: a selectable command or a section header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteItem {
    pub id: String,
    pub label: String,
    pub description: String,
    pub is_section: bool,
    pub is_mru: bool,
    pub shortcut: Option<String>,
    pub icon: Option<UiIcon>,
}

impl PaletteItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Non-selectable group header
    pub fn section(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_section: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: UiIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn recent(mut self) -> Self {
        self.is_mru = true;
        self
    }

    fn matches(&self, query: &str) -> bool {
        let combined = format!("{} {}", self.label, self.description);
        fuzzy_match(&combined, query)
    }
}

type SelectHook = Box<dyn FnMut(&str) -> Action>;
type CancelHook = Box<dyn FnMut() -> Action>;

pub struct PaletteScreen {
    items: Vec<PaletteItem>,
    /// Indices into `items`, headers kept only when an item below them matches
    filtered: Vec<usize>,
    query: String,
    filter_active: bool,
    cursor: usize,
    scroll_offset: usize,
    width: u16,
    height: u16,
    ctx: ScreenContext,
    on_select: Option<SelectHook>,
    on_cancel: Option<CancelHook>,
}

impl fmt::Debug for PaletteScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteScreen")
            .field("items", &self.items.len())
            .field("filtered", &self.filtered.len())
            .field("query", &self.query)
            .field("filter_active", &self.filter_active)
            .field("cursor", &self.cursor)
            .field("scroll_offset", &self.scroll_offset)
            .finish()
    }
}

impl PaletteScreen {
    /// The filter input is focused on open
    pub fn new(items: Vec<PaletteItem>, ctx: ScreenContext) -> Self {
        let cursor = items.iter().position(|item| !item.is_section).unwrap_or(0);
        let filtered = (0..items.len()).collect();
        Self {
            items,
            filtered,
            query: String::new(),
            filter_active: true,
            cursor,
            scroll_offset: 0,
            width: 0,
            height: 0,
            ctx,
            on_select: None,
            on_cancel: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn on_select(mut self, hook: impl FnMut(&str) -> Action + 'static) -> Self {
        self.on_select = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, hook: impl FnMut() -> Action + 'static) -> Self {
        self.on_cancel = Some(Box::new(hook));
        self
    }

    pub fn filtered(&self) -> Vec<&PaletteItem> {
        self.filtered.iter().map(|&i| &self.items[i]).collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn filter_active(&self) -> bool {
        self.filter_active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Row under the cursor
    pub fn current(&self) -> Option<&PaletteItem> {
        self.filtered.get(self.cursor).map(|&i| &self.items[i])
    }

    /// Number of item rows that fit in the current viewport
    pub fn visible_rows(&self) -> usize {
        if self.height == 0 {
            return PALETTE_FALLBACK_VISIBLE;
        }
        let mut rows = i32::from(self.height) - 5;
        if !self.filter_active {
            rows += 2;
        }
        rows.clamp(PALETTE_MIN_VISIBLE as i32, PALETTE_MAX_VISIBLE as i32) as usize
    }

    fn is_section_at(&self, row: usize) -> bool {
        self.filtered.get(row).is_some_and(|&i| self.items[i].is_section)
    }

    fn apply_filter(&mut self) {
        let query = self.query.trim().to_lowercase();

        if query.is_empty() {
            self.filtered = (0..self.items.len()).collect();
        } else {
            self.filtered.clear();
            let mut pending_section = None;
            for (i, item) in self.items.iter().enumerate() {
                if item.is_section {
                    pending_section = Some(i);
                    continue;
                }
                if item.matches(&query) {
                    if let Some(section) = pending_section.take() {
                        self.filtered.push(section);
                    }
                    self.filtered.push(i);
                }
            }
        }

        if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len().saturating_sub(1);
        }
        match (self.cursor..self.filtered.len()).find(|&row| !self.is_section_at(row)) {
            Some(row) => self.cursor = row,
            None => {
                self.cursor = (0..self.filtered.len())
                    .find(|&row| !self.is_section_at(row))
                    .unwrap_or(0);
            }
        }
        self.scroll_offset = 0;
    }

    fn move_up(&mut self) {
        if let Some(row) = (0..self.cursor).rev().find(|&row| !self.is_section_at(row)) {
            self.cursor = row;
            if self.cursor < self.scroll_offset {
                self.scroll_offset = self.cursor;
            }
        }
    }

    fn move_down(&mut self) {
        let visible = self.visible_rows();
        if let Some(row) = (self.cursor + 1..self.filtered.len()).find(|&row| !self.is_section_at(row)) {
            self.cursor = row;
            if self.cursor >= self.scroll_offset + visible {
                self.scroll_offset = self.cursor + 1 - visible;
            }
        }
    }

    fn cancel(&mut self) -> ScreenResult {
        match self.on_cancel.as_mut() {
            Some(hook) => ScreenResult::close_with(hook()),
            None => ScreenResult::close(),
        }
    }

    fn select(&mut self) -> ScreenResult {
        let Some(item) = self.current().filter(|item| !item.is_section) else {
            return ScreenResult::stay();
        };
        let id = item.id.clone();
        match self.on_select.as_mut() {
            Some(hook) => ScreenResult::close_with(hook(&id)),
            None => ScreenResult::close(),
        }
    }

    /// Window of rows to draw, shifted only as far as needed to show the cursor
    fn window(&self) -> (usize, usize) {
        let visible = self.visible_rows();
        let mut start = self.scroll_offset.min(self.filtered.len());
        if self.cursor >= start + visible {
            start = self.cursor + 1 - visible;
        } else if self.cursor < start {
            start = self.cursor;
        }
        let end = (start + visible).min(self.filtered.len());
        (start, end)
    }

    /// Position text such as `3 of 12 ▼`
    pub fn footer_text(&self) -> String {
        if self.filtered.is_empty() {
            return PALETTE_NO_MATCHES.to_string();
        }
        let mut text = format!("{} of {}", self.cursor + 1, self.filtered.len());
        if self.filtered.len() > self.visible_rows() {
            let (start, end) = self.window();
            let more_below = end < self.filtered.len();
            match (start > 0, more_below) {
                (true, true) => text.push_str(" ↕"),
                (true, false) => text.push_str(" ▲"),
                (false, true) => text.push_str(" ▼"),
                (false, false) => {}
            }
        }
        text
    }

    fn box_width(&self) -> u16 {
        if self.width == 0 {
            return PALETTE_MAX_WIDTH;
        }
        (u32::from(self.width) * 4 / 5).clamp(u32::from(PALETTE_MIN_WIDTH), u32::from(PALETTE_MAX_WIDTH)) as u16
    }

    fn input_line(&self) -> Line<'static> {
        let theme = &self.ctx.theme;
        let prompt = match self.ctx.icons.icon_prefix(UiIcon::FilterSearch, self.ctx.show_icons) {
            icon if icon.is_empty() => "> ".to_string(),
            icon => icon,
        };
        let mut spans = vec![Span::styled(format!(" {}", prompt), Style::default().fg(theme.accent))];
        if self.query.is_empty() {
            spans.push(Span::styled("█", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                PALETTE_PLACEHOLDER,
                Style::default().fg(theme.muted_fg).add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::styled(self.query.clone(), Style::default().fg(theme.text_fg)));
            spans.push(Span::styled("█", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    }

    fn item_line(&self, row: usize, item: &PaletteItem, width: usize) -> Line<'static> {
        let theme = &self.ctx.theme;
        let icon = match item.icon {
            Some(icon) if self.ctx.show_icons => self.ctx.icons.ui_icon(icon),
            _ => "",
        };

        if item.is_section {
            let label = if icon.is_empty() {
                item.label.clone()
            } else {
                format!("{}  {}", icon, item.label)
            };
            return Line::from(Span::styled(
                format!(" {}", label),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
        }

        let desc_width = width.saturating_sub(PALETTE_LABEL_WIDTH + PALETTE_SHORTCUT_WIDTH + 8);
        let label = pad_to_width(&item.label, PALETTE_LABEL_WIDTH);
        let desc = pad_to_width(&item.description, desc_width);
        let icon = pad_to_width(icon, 1);
        let shortcut_style = Style::default()
            .fg(theme.accent_fg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        if row == self.cursor {
            let selected = Style::default().bg(theme.accent_dim).fg(theme.text_fg);
            spans.push(Span::styled("▎", selected.fg(theme.accent).add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" {} ", icon), selected.fg(theme.accent)));
            spans.push(Span::styled(label, selected.add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" {}", desc), selected.fg(theme.muted_fg)));
        } else {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {} ", icon), Style::default().fg(theme.muted_fg)));
            let query = self.query.trim();
            spans.extend(highlight_matches(&label, query, theme));
            spans.push(Span::styled(format!(" {}", desc), Style::default().fg(theme.muted_fg)));
        }
        if let Some(shortcut) = &item.shortcut {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {} ", shortcut), shortcut_style));
        }
        Line::from(spans)
    }

    fn footer_line(&self, width: usize) -> Line<'static> {
        let theme = &self.ctx.theme;
        let count = self.footer_text();
        let hints = if self.filter_active {
            PALETTE_HINTS_FILTERING
        } else {
            PALETTE_HINTS
        };
        let gap = width
            .saturating_sub(display_width(&count) + display_width(hints) + 2)
            .max(1);
        Line::from(vec![
            Span::styled(format!(" {}", count), Style::default().fg(theme.muted_fg)),
            Span::raw(" ".repeat(gap)),
            Span::styled(hints, Style::default().fg(theme.muted_fg)),
        ])
    }
}

impl Screen for PaletteScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Palette
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenResult {
        if is_ctrl(&key, 'c') {
            return self.cancel();
        }
        if is_ctrl(&key, 'k') {
            self.move_up();
            return ScreenResult::stay();
        }
        if is_ctrl(&key, 'j') {
            self.move_down();
            return ScreenResult::stay();
        }

        match key.code {
            KeyCode::Enter => return self.select(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Esc if self.filter_active => self.filter_active = false,
            KeyCode::Esc => return self.cancel(),
            KeyCode::Backspace if self.filter_active => {
                if self.query.pop().is_some() {
                    self.apply_filter();
                }
            }
            _ if self.filter_active => {
                if let Some(c) = printable_char(&key) {
                    self.query.push(c);
                    self.apply_filter();
                }
            }
            KeyCode::Char('f') => self.filter_active = true,
            KeyCode::Char('k') => self.move_up(),
            KeyCode::Char('j') => self.move_down(),
            _ => {}
        }
        ScreenResult::stay()
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        let (start, end) = self.window();
        let list_rows = (end - start).max(1);
        let chrome = if self.filter_active { 6 } else { 4 };
        let height = u16::try_from(list_rows + chrome).unwrap_or(u16::MAX);
        let rect = LayoutManager::centered_fixed(self.box_width(), height, area);
        let inner = draw_frame(f, rect, modal_block(None, &self.ctx.theme));
        let width = usize::from(inner.width);

        let mut constraints = Vec::new();
        if self.filter_active {
            constraints.extend([Constraint::Length(1), Constraint::Length(1)]);
        }
        constraints.extend([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)]);
        let rows = LayoutManager::modal_rows(inner, &constraints);
        let mut slot = 0;

        if self.filter_active {
            f.render_widget(Paragraph::new(self.input_line()), rows[0]);
            let separator = Span::styled("─".repeat(width), Style::default().fg(self.ctx.theme.border_dim));
            f.render_widget(Paragraph::new(Line::from(separator)), rows[1]);
            slot = 2;
        }

        let lines: Vec<Line<'static>> = if self.filtered.is_empty() {
            vec![Line::from(Span::styled(
                format!(" {}", PALETTE_NO_RESULTS),
                Style::default()
                    .fg(self.ctx.theme.muted_fg)
                    .add_modifier(Modifier::ITALIC),
            ))]
        } else {
            (start..end)
                .map(|row| self.item_line(row, &self.items[self.filtered[row]], width))
                .collect()
        };
        f.render_widget(Paragraph::new(lines), rows[slot]);
        f.render_widget(Paragraph::new(self.footer_line(width)), rows[slot + 2]);
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}
