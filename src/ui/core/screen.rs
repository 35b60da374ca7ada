use super::actions::Action;
use crate::ui::screens::ModalScreen;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::fmt;

/// Discriminant of a modal screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Checklist,
    Palette,
    Textarea,
    NoteView,
    Loading,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Checklist => "checklist",
            Self::Palette => "palette",
            Self::Textarea => "textarea",
            Self::NoteView => "noteview",
            Self::Loading => "loading",
        };
        f.write_str(name)
    }
}

/// What the manager does with the active screen after a key
#[derive(Debug)]
pub enum Transition {
    Stay,
    Close,
    Replace(Box<ModalScreen>),
}

/// Result of delivering one key to a screen
#[derive(Debug)]
pub struct ScreenResult {
    pub transition: Transition,
    pub action: Action,
}

impl ScreenResult {
    #[must_use]
    pub fn stay() -> Self {
        Self {
            transition: Transition::Stay,
            action: Action::None,
        }
    }

    #[must_use]
    pub fn stay_with(action: Action) -> Self {
        Self {
            transition: Transition::Stay,
            action,
        }
    }

    #[must_use]
    pub fn close() -> Self {
        Self {
            transition: Transition::Close,
            action: Action::None,
        }
    }

    #[must_use]
    pub fn close_with(action: Action) -> Self {
        Self {
            transition: Transition::Close,
            action,
        }
    }

    #[must_use]
    pub fn replace(screen: impl Into<ModalScreen>, action: Action) -> Self {
        Self {
            transition: Transition::Replace(Box::new(screen.into())),
            action,
        }
    }

    #[must_use]
    pub fn is_close(&self) -> bool {
        matches!(self.transition, Transition::Close)
    }

    #[must_use]
    pub fn is_stay(&self) -> bool {
        matches!(self.transition, Transition::Stay)
    }
}

/// Contract shared by every modal screen.
///
/// `tick` only advances animation counters and `render` never mutates state.
pub trait Screen {
    fn kind(&self) -> ScreenKind;

    fn handle_key(&mut self, key: KeyEvent) -> ScreenResult;

    fn tick(&mut self) {}

    fn render(&self, f: &mut Frame, area: Rect);

    /// New viewport size; layout is recomputed on the next render
    fn resize(&mut self, _width: u16, _height: u16) {}
}
