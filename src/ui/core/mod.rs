//! Core UI functionality for lazyworktree.
//!
//! # Module Components
//!
//! - [`actions`] - Outbound commands emitted by screens
//! - [`context`] - Theme and icon dependencies shared by screens
//! - [`event_handler`] - Terminal input and tick source
//! - [`manager`] - Single-active-screen lifecycle and dispatch
//! - [`screen`] - The contract every modal screen implements
//! - [`task_manager`] - Background command execution and cancellation

pub mod actions;
pub mod context;
pub mod event_handler;
pub mod manager;
pub mod screen;
pub mod task_manager;

pub use actions::Action;
pub use context::ScreenContext;
pub use event_handler::{EventHandler, EventType};
pub use manager::{CommandOutcome, Dispatch, ScreenManager, ScreenToken};
pub use screen::{Screen, ScreenKind, ScreenResult, Transition};
pub use task_manager::{TaskCompletion, TaskId, TaskManager};
