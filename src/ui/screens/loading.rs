//! Animated overlay shown while background work runs.

use super::common::{draw_frame, modal_block};
use crate::constants::{ELLIPSIS, LOADING_HEIGHT, LOADING_TIP_MAX_LINES, LOADING_WIDTH};
use crate::icons::UiIcon;
use crate::theme::Theme;
use crate::tips::{Tip, TipOperation};
use crate::ui::core::{Screen, ScreenContext, ScreenKind, ScreenResult};
use crate::ui::layout::LayoutManager;
use crate::utils::text::{take_width, wrap_lines};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TEXT_SPINNER: [&str; 3] = ["...", ".. ", ".  "];
const BRAILLE_SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug)]
pub struct LoadingScreen {
    message: String,
    operation: TipOperation,
    tip_id: &'static str,
    tip_text: &'static str,
    tip_lines: Vec<String>,
    spinner_frames: Vec<String>,
    frame_index: usize,
    border_index: usize,
    ctx: ScreenContext,
}

impl LoadingScreen {
    pub fn new(message: &str, tip: &Tip, operation: TipOperation, ctx: ScreenContext) -> Self {
        let frames: &[&str] = if ctx.nerd_font() {
            &BRAILLE_SPINNER
        } else {
            &TEXT_SPINNER
        };
        Self {
            message: message.to_string(),
            operation,
            tip_id: tip.id,
            tip_text: tip.text,
            tip_lines: tip_lines(tip.text, inner_text_width()),
            spinner_frames: frames.iter().map(|frame| frame.to_string()).collect(),
            frame_index: 0,
            border_index: 0,
            ctx,
        }
    }

    /// Replace the spinner animation; an empty sequence is ignored
    pub fn set_spinner_frames(&mut self, frames: Vec<String>) {
        if frames.is_empty() {
            return;
        }
        self.spinner_frames = frames;
        self.frame_index = 0;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.ctx.theme = theme;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn operation(&self) -> TipOperation {
        self.operation
    }

    pub fn tip_id(&self) -> &'static str {
        self.tip_id
    }

    pub fn tip_text(&self) -> &'static str {
        self.tip_text
    }

    /// Tip body as drawn, at most two lines
    pub fn tip_lines(&self) -> &[String] {
        &self.tip_lines
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn border_index(&self) -> usize {
        self.border_index
    }

    pub fn spinner(&self) -> &str {
        self.spinner_frames
            .get(self.frame_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn border_colors(&self) -> [Color; 4] {
        let theme = &self.ctx.theme;
        [theme.accent, theme.success_fg, theme.warn_fg, theme.accent]
    }
}

fn inner_text_width() -> usize {
    usize::from(LOADING_WIDTH - 8)
}

/// Wrap `text` and cap it at two lines, marking the cut with an ellipsis
fn tip_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = wrap_lines(text, width);
    if lines.len() > LOADING_TIP_MAX_LINES {
        lines.truncate(LOADING_TIP_MAX_LINES);
        if let Some(last) = lines.last_mut() {
            *last = format!("{}{}", take_width(last, width.saturating_sub(1)), ELLIPSIS);
        }
    }
    lines
}

impl Screen for LoadingScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Loading
    }

    fn handle_key(&mut self, _key: KeyEvent) -> ScreenResult {
        ScreenResult::stay()
    }

    fn tick(&mut self) {
        self.frame_index = (self.frame_index + 1) % self.spinner_frames.len().max(1);
        self.border_index = (self.border_index + 1) % self.border_colors().len();
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        let theme = &self.ctx.theme;
        let rect = LayoutManager::centered_fixed(LOADING_WIDTH, LOADING_HEIGHT, area);
        let border = self.border_colors()[self.border_index];
        let block = modal_block(None, theme).border_style(Style::default().fg(border));
        let inner = draw_frame(f, rect, block);

        let label = self.ctx.icons.label_with_icon(UiIcon::Tip, "Tip:", self.ctx.show_icons);
        let mut lines = vec![
            Line::from(Span::styled(
                self.spinner().to_string(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.message.clone(),
                Style::default().fg(theme.text_fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "-".repeat(inner_text_width() + 2),
                Style::default().fg(theme.border_dim),
            )),
            Line::from(Span::styled(
                label,
                Style::default().fg(theme.cyan).add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(self.tip_lines.iter().map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(theme.muted_fg).add_modifier(Modifier::ITALIC),
            ))
        }));

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }
}
