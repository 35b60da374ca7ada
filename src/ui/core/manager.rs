//! Owner of the single active modal screen.

use super::actions::Action;
use super::context::ScreenContext;
use super::screen::{Screen, ScreenKind, Transition};
use crate::tips::{operation_from_context, TipMemory};
use crate::ui::screens::{LoadingScreen, ModalScreen};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::fmt;

/// Identity of one opened screen; never reused within a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenToken(u64);

impl fmt::Display for ScreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a finished background command asks of the manager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Close the owning screen
    pub close: bool,
    /// Message for the status line
    pub status: Option<String>,
}

impl CommandOutcome {
    #[must_use]
    pub fn close() -> Self {
        Self {
            close: true,
            status: None,
        }
    }

    #[must_use]
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            close: false,
            status: Some(message.into()),
        }
    }
}

/// An action together with the screen that owns its execution.
///
/// Actions emitted while a screen stays open, or by the screen that replaces
/// it, are owned by the active screen. Actions emitted on close are unowned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub owner: Option<ScreenToken>,
    pub action: Action,
}

#[derive(Debug)]
struct ActiveScreen {
    token: ScreenToken,
    screen: ModalScreen,
}

/// Routes key, tick and resize events to at most one modal screen
#[derive(Debug)]
pub struct ScreenManager {
    active: Option<ActiveScreen>,
    next_token: u64,
    retired: Vec<ScreenToken>,
    width: u16,
    height: u16,
    status: Option<String>,
    tips: TipMemory,
    ctx: ScreenContext,
}

impl ScreenManager {
    #[must_use]
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            active: None,
            next_token: 1,
            retired: Vec::new(),
            width: 0,
            height: 0,
            status: None,
            tips: TipMemory::new(),
            ctx,
        }
    }

    #[must_use]
    pub fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn active_kind(&self) -> Option<ScreenKind> {
        self.active.as_ref().map(|active| active.screen.kind())
    }

    #[must_use]
    pub fn active_token(&self) -> Option<ScreenToken> {
        self.active.as_ref().map(|active| active.token)
    }

    #[must_use]
    pub fn active_screen(&self) -> Option<&ModalScreen> {
        self.active.as_ref().map(|active| &active.screen)
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    #[must_use]
    pub fn tip_memory(&self) -> &TipMemory {
        &self.tips
    }

    /// Tokens of screens closed since the last call; their tasks should be
    /// cancelled
    pub fn take_retired(&mut self) -> Vec<ScreenToken> {
        std::mem::take(&mut self.retired)
    }

    /// Make `screen` the active modal, replacing any current one
    pub fn open(&mut self, screen: impl Into<ModalScreen>) -> ScreenToken {
        let mut screen = screen.into();
        if self.width > 0 || self.height > 0 {
            screen.resize(self.width, self.height);
        }

        self.retire_active();
        let token = ScreenToken(self.next_token);
        self.next_token += 1;
        log::debug!("Opening {} screen {}", screen.kind(), token);
        self.active = Some(ActiveScreen { token, screen });
        token
    }

    /// Open the loading overlay with a tip chosen for the operation
    pub fn show_loading(&mut self, message: &str, operation: &str) -> ScreenToken {
        let op = operation_from_context(operation, message);
        let tip = self.tips.next_tip(op);
        let screen = LoadingScreen::new(message, tip, op, self.ctx.clone());
        self.open(screen)
    }

    /// Dismiss the active screen, if any
    pub fn close(&mut self) -> Option<ScreenToken> {
        let token = self.active_token();
        self.retire_active();
        token
    }

    fn retire_active(&mut self) {
        if let Some(active) = self.active.take() {
            log::debug!("Closing {} screen {}", active.screen.kind(), active.token);
            self.retired.push(active.token);
        }
    }

    /// Deliver a key to the active screen
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Dispatch> {
        let active = self.active.as_mut()?;
        let result = active.screen.handle_key(key);
        let action = result.action;

        let owner = match result.transition {
            Transition::Stay => self.active_token(),
            Transition::Close => {
                self.retire_active();
                None
            }
            Transition::Replace(next) => Some(self.open(*next)),
        };

        if action.is_none() {
            None
        } else {
            Some(Dispatch { owner, action })
        }
    }

    /// Advance the active screen's animation
    pub fn tick(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.screen.tick();
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if let Some(active) = self.active.as_mut() {
            active.screen.resize(width, height);
        }
    }

    /// Apply the result of a background command.
    ///
    /// Results owned by a screen that is no longer active are discarded and
    /// `false` is returned. Failures go to the status line and never close
    /// the screen.
    pub fn complete(&mut self, owner: Option<ScreenToken>, result: anyhow::Result<CommandOutcome>) -> bool {
        if let Some(token) = owner {
            if self.active_token() != Some(token) {
                log::debug!("Discarding late completion for screen {}", token);
                return false;
            }
        }

        match result {
            Ok(outcome) => {
                if let Some(message) = outcome.status {
                    self.status = Some(message);
                }
                if outcome.close && owner.is_some() {
                    self.retire_active();
                }
            }
            Err(e) => {
                log::error!("Command failed: {:#}", e);
                self.status = Some(format!("Error: {:#}", e));
            }
        }
        true
    }

    /// Draw the active screen over `area`
    pub fn render(&self, f: &mut Frame, area: Rect) {
        if let Some(active) = &self.active {
            active.screen.render(f, area);
        }
    }
}
