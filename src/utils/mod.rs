//! Helpers shared by the screens and the command line.
//!
//! - [`worktree`] - worktree-name templating and branch-name sanitising
//! - [`path`] - `~`/environment expansion and lexical absolute paths
//! - [`text`] - display-width aware wrapping, truncation and padding

pub mod path;
pub mod text;
pub mod worktree;
