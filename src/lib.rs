//! lazyworktree - a terminal dashboard for git worktrees
//!
//! This library provides the modal screen subsystem of the dashboard and the
//! pieces it depends on.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`security`] - Trust-on-first-use store for local files
//! * [`tips`] - Contextual tips for the loading overlay and help
//! * [`ui`] - Screen manager, modal screens and the terminal host
//! * [`utils`] - Worktree naming, path and text helpers

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Icon providers and semantic icon lookups
pub mod icons;

/// Logging setup and the in-memory log buffer
pub mod logger;

/// Trust store for files that may be executed
pub mod security;

/// Colour themes and custom theme resolution
pub mod theme;

/// Loading and help tips
pub mod tips;

/// Terminal user interface
pub mod ui;

/// Worktree naming, path and text helpers
pub mod utils;
