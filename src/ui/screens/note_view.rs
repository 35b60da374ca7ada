//! Read-only scrollable note viewer.

use super::common::{draw_frame, hint_line, is_ctrl, modal_block};
use crate::constants::{NOTE_VIEW_FOOTER, NOTE_VIEW_FOOTER_EXTERNAL};
use crate::ui::core::{Action, Screen, ScreenContext, ScreenKind, ScreenResult};
use crate::ui::layout::LayoutManager;
use crate::utils::text::wrap_lines;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::fmt;

const FALLBACK_WIDTH: u16 = 100;
const FALLBACK_HEIGHT: u16 = 30;

type EditHook = Box<dyn FnMut() -> Action>;

pub struct NoteViewScreen {
    title: String,
    text: String,
    /// `text` wrapped to the current inner width
    lines: Vec<String>,
    offset: usize,
    width: u16,
    height: u16,
    ctx: ScreenContext,
    on_edit: Option<EditHook>,
    on_edit_external: Option<EditHook>,
}

impl fmt::Debug for NoteViewScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteViewScreen")
            .field("title", &self.title)
            .field("lines", &self.lines.len())
            .field("offset", &self.offset)
            .finish()
    }
}

impl NoteViewScreen {
    pub fn new(title: impl Into<String>, text: impl Into<String>, ctx: ScreenContext) -> Self {
        let mut screen = Self {
            title: title.into(),
            text: text.into(),
            lines: Vec::new(),
            offset: 0,
            width: 0,
            height: 0,
            ctx,
            on_edit: None,
            on_edit_external: None,
        };
        screen.rewrap();
        screen
    }

    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.resize(width, height);
        self
    }

    #[must_use]
    pub fn on_edit(mut self, hook: impl FnMut() -> Action + 'static) -> Self {
        self.on_edit = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_edit_external(mut self, hook: impl FnMut() -> Action + 'static) -> Self {
        self.on_edit_external = Some(Box::new(hook));
        self
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Wrapped lines currently laid out
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn visible_lines(&self) -> usize {
        usize::from(self.box_size().1.saturating_sub(5)).max(1)
    }

    pub fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.visible_lines())
    }

    fn box_size(&self) -> (u16, u16) {
        let width = if self.width == 0 {
            FALLBACK_WIDTH
        } else {
            self.width.saturating_sub(4).min(FALLBACK_WIDTH)
        };
        let height = if self.height == 0 {
            FALLBACK_HEIGHT
        } else {
            self.height.saturating_sub(4).min(FALLBACK_HEIGHT)
        };
        (width, height)
    }

    fn rewrap(&mut self) {
        let wrap_width = usize::from(self.box_size().0.saturating_sub(4)).max(1);
        self.lines = wrap_lines(&self.text, wrap_width);
        self.offset = self.offset.min(self.max_offset());
    }

    fn scroll_by(&mut self, delta: isize) {
        let target = self.offset.saturating_add_signed(delta);
        self.offset = target.min(self.max_offset());
    }

    fn edit(&mut self, external: bool) -> ScreenResult {
        let hook = if external {
            self.on_edit_external.as_mut()
        } else {
            self.on_edit.as_mut()
        };
        match (hook, external) {
            (Some(hook), _) => ScreenResult::close_with(hook()),
            (None, false) => ScreenResult::close(),
            (None, true) => ScreenResult::stay(),
        }
    }
}

impl Screen for NoteViewScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::NoteView
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenResult {
        let page = self.visible_lines() as isize;
        if is_ctrl(&key, 'd') {
            self.scroll_by(page / 2);
            return ScreenResult::stay();
        }
        if is_ctrl(&key, 'u') {
            self.scroll_by(-(page / 2));
            return ScreenResult::stay();
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Char('g') | KeyCode::Home => self.offset = 0,
            KeyCode::Char('G') | KeyCode::End => self.offset = self.max_offset(),
            KeyCode::Char('e') => return self.edit(false),
            KeyCode::Char('E') => return self.edit(true),
            KeyCode::Char('q') | KeyCode::Esc => return ScreenResult::close(),
            _ => {}
        }
        ScreenResult::stay()
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        let theme = &self.ctx.theme;
        let (width, height) = self.box_size();
        let rect = LayoutManager::centered_fixed(width, height, area);
        let inner = draw_frame(f, rect, modal_block(Some(self.title.clone()), theme));
        let visible = self.visible_lines();

        let rows = LayoutManager::modal_rows(
            inner,
            &[
                Constraint::Length(1),
                Constraint::Length(u16::try_from(visible).unwrap_or(u16::MAX)),
                Constraint::Length(1),
                Constraint::Length(1),
            ],
        );
        let body_area = Rect {
            x: rows[1].x.saturating_add(1),
            width: rows[1].width.saturating_sub(2),
            ..rows[1]
        };

        let body: Vec<Line<'static>> = self
            .lines
            .iter()
            .skip(self.offset)
            .take(visible)
            .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(theme.text_fg))))
            .collect();
        f.render_widget(Paragraph::new(body), body_area);

        let hints = if self.on_edit_external.is_some() {
            NOTE_VIEW_FOOTER_EXTERNAL
        } else {
            NOTE_VIEW_FOOTER
        };
        let position = if self.lines.len() > visible {
            format!("{}/{} • {}", self.offset + visible.min(self.lines.len()), self.lines.len(), hints)
        } else {
            hints.to_string()
        };
        f.render_widget(Paragraph::new(hint_line(&position, theme)), rows[3]);
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.rewrap();
    }
}
