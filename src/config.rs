//! Configuration management for lazyworktree
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_ISSUE_TEMPLATE, DEFAULT_PR_TEMPLATE, LOCAL_CONFIG_FILE_NAME,
    MAX_WORKTREE_NAME_LEN,
};
use crate::icons::IconTheme;
use crate::theme::{self, CustomTheme, Theme};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub worktree: WorktreeConfig,
    pub logging: LoggingConfig,
    /// Custom themes keyed by name
    pub themes: HashMap<String, CustomTheme>,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Built-in or custom theme name
    pub theme: String,
    /// Icon set: "ascii" or "nerd-font"
    pub icons: String,
    /// Draw icons next to labels
    pub show_icons: bool,
}

/// Worktree naming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorktreeConfig {
    /// Template for worktrees created from pull requests
    /// Placeholders: {number}, {title}, {generated}, {pr_author}
    pub pr_template: String,
    /// Template for worktrees created from issues
    /// Placeholders: {number}, {title}, {generated}
    pub issue_template: String,
    /// Maximum length of a sanitised title (0 = no limit)
    pub max_name_length: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a log file under the data directory
    pub enabled: bool,
    /// One of "error", "warn", "info", "debug", "trace"
    pub level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: theme::default_dark().to_string(),
            icons: "ascii".to_string(),
            show_icons: true,
        }
    }
}

impl Default for WorktreeConfig {
    fn default() -> Self {
        Self {
            pr_template: DEFAULT_PR_TEMPLATE.to_string(),
            issue_template: DEFAULT_ISSUE_TEMPLATE.to_string(),
            max_name_length: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level; validation guarantees this succeeds for a loaded config
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        Self::load_with_override(None)
    }

    /// Load configuration, preferring an explicit path over the lookup order
    pub fn load_with_override(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.as_ref().display()))?;
        log::info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        // 2. Check XDG config directory
        Self::get_default_config_path().ok().filter(|path| path.exists())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if IconTheme::from_name(&self.ui.icons).is_none() {
            anyhow::bail!("Invalid icons '{}': expected \"ascii\" or \"nerd-font\"", self.ui.icons);
        }

        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            anyhow::bail!("Invalid logging level '{}'", self.logging.level);
        }

        Self::validate_template("pr_template", &self.worktree.pr_template)?;
        Self::validate_template("issue_template", &self.worktree.issue_template)?;

        if self.worktree.max_name_length > MAX_WORKTREE_NAME_LEN {
            anyhow::bail!(
                "max_name_length cannot exceed {}, got {}",
                MAX_WORKTREE_NAME_LEN,
                self.worktree.max_name_length
            );
        }

        Ok(())
    }

    fn validate_template(field: &str, template: &str) -> Result<()> {
        if template.trim().is_empty() {
            anyhow::bail!("{} cannot be empty", field);
        }
        if !template.contains("{number}") && !template.contains("{title}") && !template.contains("{generated}") {
            anyhow::bail!("{} '{}' contains no placeholder", field, template);
        }
        Ok(())
    }

    /// Icon set selected by `[ui] icons`
    #[must_use]
    pub fn icon_theme(&self) -> IconTheme {
        IconTheme::from_name(&self.ui.icons).unwrap_or_default()
    }

    /// Flattened colours for the configured theme
    #[must_use]
    pub fn effective_theme(&self) -> Theme {
        theme::effective_theme(&self.ui.theme, &self.themes)
    }

    /// Built-in theme names followed by custom ones
    #[must_use]
    pub fn available_themes(&self) -> Vec<String> {
        theme::available_themes_with_customs(&self.themes)
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# lazyworktree configuration file\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_FILE_NAME))
    }
}
