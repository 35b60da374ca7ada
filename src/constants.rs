//! Constants used throughout the application
//!
//! This module centralizes file names, UI text and fixed modal geometry.

// Application identity
pub const APP_NAME: &str = "lazyworktree";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "lazyworktree.toml";
pub const TRUST_DB_FILE_NAME: &str = "trusted.json";
pub const LOG_FILE_NAME: &str = "lazyworktree.log";

// Permissions for files the trust store writes
pub const DATA_DIR_PERMS: u32 = 0o700;
pub const TRUST_DB_FILE_PERMS: u32 = 0o600;

/// Block size used when hashing files for trust checks
pub const HASH_BLOCK_SIZE: usize = 64 * 1024;

// Worktree naming
pub const MAX_WORKTREE_NAME_LEN: usize = 100;
pub const DEFAULT_PR_TEMPLATE: &str = "pr-{number}-{title}";
pub const DEFAULT_ISSUE_TEMPLATE: &str = "issue-{number}-{title}";

// Loading overlay geometry
pub const LOADING_WIDTH: u16 = 60;
pub const LOADING_HEIGHT: u16 = 10;
pub const LOADING_TIP_MAX_LINES: usize = 2;

// Command palette geometry
pub const PALETTE_MIN_WIDTH: u16 = 60;
pub const PALETTE_MAX_WIDTH: u16 = 110;
pub const PALETTE_FALLBACK_VISIBLE: usize = 12;
pub const PALETTE_MIN_VISIBLE: usize = 5;
pub const PALETTE_MAX_VISIBLE: usize = 20;
pub const PALETTE_LABEL_WIDTH: usize = 28;
pub const PALETTE_SHORTCUT_WIDTH: usize = 6;

// Textarea geometry
pub const TEXTAREA_DEFAULT_WIDTH: u16 = 88;
pub const TEXTAREA_DEFAULT_HEIGHT: u16 = 22;
pub const TEXTAREA_MIN_WIDTH: u16 = 62;
pub const TEXTAREA_MAX_WIDTH: u16 = 100;
pub const TEXTAREA_MIN_HEIGHT: u16 = 15;
pub const TEXTAREA_MAX_HEIGHT: u16 = 28;

// UI text
pub const ELLIPSIS: &str = "…";
pub const PALETTE_PLACEHOLDER: &str = "Type a command...";
pub const PALETTE_NO_RESULTS: &str = "No commands match your filter.";
pub const PALETTE_NO_MATCHES: &str = "No matches";
pub const PALETTE_HINTS_FILTERING: &str = "↑↓ navigate • ⏎ select • Esc close";
pub const PALETTE_HINTS: &str = "f filter • ↑↓ navigate • ⏎ select • Esc close";
pub const TEXTAREA_FOOTER: &str = "Ctrl+S save • Esc cancel • Enter newline";
pub const TEXTAREA_FOOTER_EXTERNAL: &str = "Ctrl+S save • Ctrl+X editor • Esc cancel • Enter newline";
pub const NOTE_VIEW_FOOTER: &str = "j/k scroll • Ctrl+D/U half page • e edit • q close";
pub const NOTE_VIEW_FOOTER_EXTERNAL: &str = "j/k scroll • Ctrl+D/U half page • e edit • E editor • q close";
pub const CHECKLIST_HINTS: &str = "f filter • Space toggle • ↑↓ navigate • q close";
pub const CHECKLIST_HINTS_FILTERING: &str = "type to filter • Esc done";
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
pub const BASE_HINTS: &str = "p palette • n note • ? help • q quit";

// Host
/// Files in the working directory the trust dialog offers
pub const TRUST_CANDIDATES: &[&str] = &[".wt", LOCAL_CONFIG_FILE_NAME];
pub const SCRATCH_NOTE: &str = "scratch";
pub const TICK_RATE_MS: u64 = 100;
