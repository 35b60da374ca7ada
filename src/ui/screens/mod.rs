//! Modal screens.
//!
//! Each screen owns its state and reacts to keys through the [`Screen`]
//! trait. [`ModalScreen`] is the closed set the manager holds.

mod checklist;
pub mod common;
mod loading;
mod note_view;
mod palette;
mod textarea;

pub use checklist::{ChecklistItem, ChecklistScreen};
pub use loading::LoadingScreen;
pub use note_view::NoteViewScreen;
pub use palette::{PaletteItem, PaletteScreen};
pub use textarea::TextareaScreen;

use crate::ui::core::{Screen, ScreenKind, ScreenResult};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

#[derive(Debug)]
pub enum ModalScreen {
    Checklist(ChecklistScreen),
    Palette(PaletteScreen),
    Textarea(TextareaScreen),
    NoteView(NoteViewScreen),
    Loading(LoadingScreen),
}

impl ModalScreen {
    fn inner(&self) -> &dyn Screen {
        match self {
            Self::Checklist(s) => s,
            Self::Palette(s) => s,
            Self::Textarea(s) => s,
            Self::NoteView(s) => s,
            Self::Loading(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Checklist(s) => s,
            Self::Palette(s) => s,
            Self::Textarea(s) => s,
            Self::NoteView(s) => s,
            Self::Loading(s) => s,
        }
    }
}

impl Screen for ModalScreen {
    fn kind(&self) -> ScreenKind {
        self.inner().kind()
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenResult {
        self.inner_mut().handle_key(key)
    }

    fn tick(&mut self) {
        self.inner_mut().tick();
    }

    fn render(&self, f: &mut Frame, area: Rect) {
        self.inner().render(f, area);
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.inner_mut().resize(width, height);
    }
}

impl From<ChecklistScreen> for ModalScreen {
    fn from(screen: ChecklistScreen) -> Self {
        Self::Checklist(screen)
    }
}

impl From<PaletteScreen> for ModalScreen {
    fn from(screen: PaletteScreen) -> Self {
        Self::Palette(screen)
    }
}

impl From<TextareaScreen> for ModalScreen {
    fn from(screen: TextareaScreen) -> Self {
        Self::Textarea(screen)
    }
}

impl From<NoteViewScreen> for ModalScreen {
    fn from(screen: NoteViewScreen) -> Self {
        Self::NoteView(screen)
    }
}

impl From<LoadingScreen> for ModalScreen {
    fn from(screen: LoadingScreen) -> Self {
        Self::Loading(screen)
    }
}
