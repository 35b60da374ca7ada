//! UI module for lazyworktree
//!
//! This module holds the modal screens, the manager that owns them, and the
//! thin host that draws the base view and runs the terminal loop.

pub mod app;
pub mod core;
pub mod layout;
pub mod renderer;
pub mod screens;

pub use app::App;
pub use layout::LayoutManager;
pub use renderer::run_app;
