//! Multi-select list with a sticky incremental filter.

use super::common::{draw_frame, fuzzy_match, hint_line, is_ctrl, modal_block, printable_char, window_start};
use crate::constants::{CHECKLIST_HINTS, CHECKLIST_HINTS_FILTERING};
use crate::ui::core::{Action, Screen, ScreenContext, ScreenKind, ScreenResult};
use crate::ui::layout::LayoutManager;
use crate::utils::text::truncate_to_width;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            checked: false,
        }
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

type CloseHook = Box<dyn FnMut(Vec<String>) -> Action>;

pub struct ChecklistScreen {
    items: Vec<ChecklistItem>,
    /// Indices into `items` that pass the filter, in insertion order
    filtered: Vec<usize>,
    cursor: usize,
    checked: HashSet<String>,
    filter_active: bool,
    filter_text: String,
    title: String,
    placeholder: String,
    empty_text: String,
    width: u16,
    height: u16,
    ctx: ScreenContext,
    on_close: Option<CloseHook>,
}

impl fmt::Debug for ChecklistScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecklistScreen")
            .field("title", &self.title)
            .field("items", &self.items.len())
            .field("filtered", &self.filtered.len())
            .field("cursor", &self.cursor)
            .field("filter_active", &self.filter_active)
            .field("filter_text", &self.filter_text)
            .finish()
    }
}

impl ChecklistScreen {
    pub fn new(items: Vec<ChecklistItem>, title: impl Into<String>, ctx: ScreenContext) -> Self {
        let checked = items.iter().filter(|item| item.checked).map(|item| item.id.clone()).collect();
        let filtered = (0..items.len()).collect();
        Self {
            items,
            filtered,
            cursor: 0,
            checked,
            filter_active: false,
            filter_text: String::new(),
            title: title.into(),
            placeholder: "Filter...".to_string(),
            empty_text: "No items".to_string(),
            width: 0,
            height: 0,
            ctx,
            on_close: None,
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_empty_text(mut self, empty_text: impl Into<String>) -> Self {
        self.empty_text = empty_text.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Called with the checked ids, in list order, when the screen closes
    #[must_use]
    pub fn on_close(mut self, hook: impl FnMut(Vec<String>) -> Action + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Items passing the current filter
    pub fn filtered(&self) -> Vec<&ChecklistItem> {
        self.filtered.iter().map(|&i| &self.items[i]).collect()
    }

    pub fn filtered_ids(&self) -> Vec<&str> {
        self.filtered.iter().map(|&i| self.items[i].id.as_str()).collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filter_active(&self) -> bool {
        self.filter_active
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    /// Checked ids in list order
    pub fn checked_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| self.checked.contains(&item.id))
            .map(|item| item.id.clone())
            .collect()
    }

    fn apply_filter(&mut self) {
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| fuzzy_match(&item.label, &self.filter_text))
            .map(|(i, _)| i)
            .collect();
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.filtered.len() {
            self.cursor += 1;
        }
    }

    fn toggle_current(&mut self) {
        let Some(&index) = self.filtered.get(self.cursor) else {
            return;
        };
        let id = &self.items[index].id;
        if !self.checked.remove(id) {
            self.checked.insert(id.clone());
        }
    }

    fn close(&mut self) -> ScreenResult {
        let checked = self.checked_ids();
        match self.on_close.as_mut() {
            Some(hook) => ScreenResult::close_with(hook(checked)),
            None => ScreenResult::close(),
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> ScreenResult {
        match key.code {
            KeyCode::Esc => self.filter_active = false,
            KeyCode::Enter => self.toggle_current(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Backspace => {
                if self.filter_text.pop().is_some() {
                    self.apply_filter();
                }
            }
            _ => {
                if let Some(c) = printable_char(&key) {
                    self.filter_text.push(c);
                    self.apply_filter();
                }
            }
        }
        ScreenResult::stay()
    }

    fn box_width(&self) -> u16 {
        if self.width == 0 {
            70
        } else {
            (u32::from(self.width) * 3 / 5).clamp(50, 90) as u16
        }
    }

    fn visible_rows(&self) -> usize {
        if self.height == 0 {
            10
        } else {
            usize::from(self.height.saturating_sub(10)).clamp(3, 20)
        }
    }

    fn filter_line(&self) -> Line<'static> {
        let theme = &self.ctx.theme;
        if self.filter_active {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(theme.accent)),
                Span::styled(self.filter_text.clone(), Style::default().fg(theme.text_fg)),
                Span::styled("█", Style::default().fg(theme.accent)),
            ])
        } else if !self.filter_text.is_empty() {
            Line::from(vec![
                Span::styled("filter: ", Style::default().fg(theme.muted_fg)),
                Span::styled(self.filter_text.clone(), Style::default().fg(theme.text_fg)),
            ])
        } else {
            Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(theme.muted_fg).add_modifier(Modifier::ITALIC),
            ))
        }
    }

    fn item_lines(&self, width: usize, visible: usize) -> Vec<Line<'static>> {
        let theme = &self.ctx.theme;
        if self.filtered.is_empty() {
            return vec![Line::from(Span::styled(
                self.empty_text.clone(),
                Style::default().fg(theme.muted_fg).add_modifier(Modifier::ITALIC),
            ))];
        }

        let start = window_start(self.cursor, visible);
        self.filtered
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(row, &index)| {
                let item = &self.items[index];
                let mark = if self.checked.contains(&item.id) { "[x]" } else { "[ ]" };
                let label = truncate_to_width(&item.label, width.saturating_sub(6));
                if row == self.cursor {
                    let selected = Style::default().bg(theme.accent_dim).fg(theme.text_fg);
                    Line::from(vec![
                        Span::styled("▎", selected.fg(theme.accent)),
                        Span::styled(format!("{} {}", mark, label), selected.add_modifier(Modifier::BOLD)),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw(" "),
                        Span::styled(mark, Style::default().fg(theme.muted_fg)),
                        Span::styled(format!(" {}", label), Style::default().fg(theme.text_fg)),
                    ])
                }
            })
            .collect()
    }
}

impl Screen for ChecklistScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Checklist
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenResult {
        if is_ctrl(&key, 'c') {
            return self.close();
        }
        if self.filter_active {
            return self.handle_filter_key(key);
        }

        match key.code {
            KeyCode::Char('f') => self.filter_active = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current(),
            KeyCode::Char('q') | KeyCode::Esc => return self.close(),
            _ => {}
        }
        ScreenResult::stay()
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        let visible = self.visible_rows();
        let list_rows = u16::try_from(self.filtered.len().clamp(1, visible)).unwrap_or(1);
        let rect = LayoutManager::centered_fixed(self.box_width(), list_rows + 5, area);
        let inner = draw_frame(f, rect, modal_block(Some(self.title.clone()), &self.ctx.theme));

        let rows = LayoutManager::modal_rows(
            inner,
            &[Constraint::Length(1), Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)],
        );

        f.render_widget(Paragraph::new(self.filter_line()), rows[0]);
        f.render_widget(
            Paragraph::new(self.item_lines(usize::from(inner.width), visible)),
            rows[1],
        );

        let hints = if self.filter_active {
            CHECKLIST_HINTS_FILTERING
        } else {
            CHECKLIST_HINTS
        };
        let footer = format!("{} selected • {}", self.checked.len(), hints);
        f.render_widget(Paragraph::new(hint_line(&footer, &self.ctx.theme)), rows[3]);
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}
