//! Multiline input with optional validation and external editor hand-off.

use super::common::{draw_frame, hint_line, is_ctrl, modal_block};
use crate::constants::{
    TEXTAREA_DEFAULT_HEIGHT, TEXTAREA_DEFAULT_WIDTH, TEXTAREA_FOOTER, TEXTAREA_FOOTER_EXTERNAL, TEXTAREA_MAX_HEIGHT,
    TEXTAREA_MAX_WIDTH, TEXTAREA_MIN_HEIGHT, TEXTAREA_MIN_WIDTH,
};
use crate::ui::core::{Action, Screen, ScreenContext, ScreenKind, ScreenResult};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::fmt;
use tui_textarea::{CursorMove, Input, Key, TextArea};

type ValidateHook = Box<dyn Fn(&str) -> String>;
type SubmitHook = Box<dyn FnMut(&str) -> Result<Action, String>>;
type ExternalHook = Box<dyn FnMut(&str) -> Action>;
type CancelHook = Box<dyn FnMut() -> Action>;

pub struct TextareaScreen {
    textarea: TextArea<'static>,
    title: String,
    prompt: String,
    error: Option<String>,
    width: u16,
    height: u16,
    ctx: ScreenContext,
    validate: Option<ValidateHook>,
    on_submit: Option<SubmitHook>,
    on_edit_external: Option<ExternalHook>,
    on_cancel: Option<CancelHook>,
}

impl fmt::Debug for TextareaScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextareaScreen")
            .field("title", &self.title)
            .field("value", &self.value())
            .field("error", &self.error)
            .field("external", &self.on_edit_external.is_some())
            .finish()
    }
}

impl TextareaScreen {
    /// Editor seeded with `value`, cursor at the end of the text
    pub fn new(title: impl Into<String>, prompt: impl Into<String>, value: &str, ctx: ScreenContext) -> Self {
        let mut textarea = TextArea::new(value.split('\n').map(String::from).collect());
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_style(Style::default().fg(ctx.theme.text_fg).bg(ctx.theme.background));
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ctx.theme.border_dim)),
        );

        Self {
            textarea,
            title: title.into(),
            prompt: prompt.into(),
            error: None,
            width: 0,
            height: 0,
            ctx,
            validate: None,
            on_submit: None,
            on_edit_external: None,
            on_cancel: None,
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.textarea.set_placeholder_text(placeholder);
        self.textarea
            .set_placeholder_style(Style::default().fg(self.ctx.theme.muted_fg));
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Checked before submit; a non-blank return value is shown as the error
    #[must_use]
    pub fn validate(mut self, hook: impl Fn(&str) -> String + 'static) -> Self {
        self.validate = Some(Box::new(hook));
        self
    }

    /// `Err` keeps the screen open with the message displayed
    #[must_use]
    pub fn on_submit(mut self, hook: impl FnMut(&str) -> Result<Action, String> + 'static) -> Self {
        self.on_submit = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_edit_external(mut self, hook: impl FnMut(&str) -> Action + 'static) -> Self {
        self.on_edit_external = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, hook: impl FnMut() -> Action + 'static) -> Self {
        self.on_cancel = Some(Box::new(hook));
        self
    }

    /// Current text, lines joined with `\n`
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn external_editor_available(&self) -> bool {
        self.on_edit_external.is_some()
    }

    pub fn footer_text(&self) -> &'static str {
        if self.external_editor_available() {
            TEXTAREA_FOOTER_EXTERNAL
        } else {
            TEXTAREA_FOOTER
        }
    }

    fn submit(&mut self) -> ScreenResult {
        let value = self.value();

        if let Some(validate) = &self.validate {
            let error = validate(&value);
            let error = error.trim();
            if !error.is_empty() {
                self.error = Some(error.to_string());
                return ScreenResult::stay();
            }
        }

        match self.on_submit.as_mut().map(|hook| hook(&value)) {
            None => ScreenResult::close(),
            Some(Ok(action)) => ScreenResult::close_with(action),
            Some(Err(error)) => {
                self.error = Some(error);
                ScreenResult::stay()
            }
        }
    }

    fn cancel(&mut self) -> ScreenResult {
        match self.on_cancel.as_mut() {
            Some(hook) => ScreenResult::close_with(hook()),
            None => ScreenResult::close(),
        }
    }

    fn box_size(&self) -> (u16, u16) {
        if self.width == 0 || self.height == 0 {
            return (TEXTAREA_DEFAULT_WIDTH, TEXTAREA_DEFAULT_HEIGHT);
        }
        let width = (u32::from(self.width) * 62 / 100).clamp(u32::from(TEXTAREA_MIN_WIDTH), u32::from(TEXTAREA_MAX_WIDTH));
        let height = (self.height / 2).clamp(TEXTAREA_MIN_HEIGHT, TEXTAREA_MAX_HEIGHT);
        (width as u16, height)
    }
}

/// Translate a terminal key event into the editor's input type
fn to_input(key: KeyEvent) -> Input {
    let code = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Null,
    };
    Input {
        key: code,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
    }
}

impl Screen for TextareaScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Textarea
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenResult {
        if is_ctrl(&key, 's') {
            return self.submit();
        }
        if is_ctrl(&key, 'x') {
            let value = self.value();
            return match self.on_edit_external.as_mut() {
                Some(hook) => ScreenResult::close_with(hook(&value)),
                None => ScreenResult::stay(),
            };
        }
        if key.code == KeyCode::Esc || is_ctrl(&key, 'c') {
            return self.cancel();
        }

        if self.textarea.input(to_input(key)) {
            self.error = None;
        }
        ScreenResult::stay()
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        let theme = &self.ctx.theme;
        let (width, height) = self.box_size();
        let rect = LayoutManager::centered_fixed(width, height, area);
        let inner = draw_frame(f, rect, modal_block(Some(self.title.clone()), theme));

        let error_rows = if self.error.is_some() { 1 } else { 0 };
        let rows = LayoutManager::modal_rows(
            inner,
            &[
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(error_rows),
                Constraint::Length(1),
            ],
        );

        let prompt = Line::from(Span::styled(
            self.prompt.clone(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(prompt), rows[0]);
        f.render_widget(&self.textarea, rows[1]);

        if let Some(error) = &self.error {
            let line = Line::from(Span::styled(error.clone(), Style::default().fg(theme.error_fg)));
            f.render_widget(Paragraph::new(line), rows[2]);
        }
        f.render_widget(Paragraph::new(hint_line(self.footer_text(), theme)), rows[3]);
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}
