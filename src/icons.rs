//! Icon service for resolving semantic glyph names
//!
//! Every glyph a screen draws goes through an [`IconProvider`]. The default
//! provider returns plain ASCII fallbacks; the Nerd Font provider supplies
//! patched-font characters. The active provider is chosen once at startup and
//! handed to screens through a cloneable [`IconService`].

use crate::theme::Theme;
use ratatui::{
    style::{Color, Style},
    text::Span,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Icon set variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconTheme {
    /// ASCII characters (maximum compatibility)
    #[default]
    Ascii,
    /// Nerd Font glyphs (requires a patched font)
    NerdFont,
}

impl IconTheme {
    /// Parse a configuration or command line value
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ascii" | "text" | "none" => Some(Self::Ascii),
            "nerd-font" | "nerdfont" | "nerd" => Some(Self::NerdFont),
            _ => None,
        }
    }
}

/// Semantic names for UI glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiIcon {
    HelpTitle,
    Navigation,
    StatusPane,
    LogPane,
    CommitTree,
    WorktreeActions,
    BranchNaming,
    ViewingTools,
    RepoOps,
    BackgroundRefresh,
    FilterSearch,
    StatusIndicators,
    StatusClean,
    StatusDirty,
    HelpNavigation,
    ShellCompletion,
    Configuration,
    IconConfiguration,
    Tip,
    PrSelect,
    IssueSelect,
    CiCheck,
    ListSelect,
}

/// Source of every glyph rendered by the screens
pub trait IconProvider: Send + Sync {
    fn pr_icon(&self) -> &'static str;
    fn issue_icon(&self) -> &'static str;
    /// Glyph for a CI conclusion; empty when the provider has none
    fn ci_icon(&self, conclusion: &str) -> &'static str;
    /// Glyph for a semantic UI name; empty when the provider has none
    fn ui_icon(&self, icon: UiIcon) -> &'static str;
}

/// Plain-text fallbacks
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiIcons;

impl IconProvider for AsciiIcons {
    fn pr_icon(&self) -> &'static str {
        "PR"
    }

    fn issue_icon(&self) -> &'static str {
        "ISS"
    }

    fn ci_icon(&self, _conclusion: &str) -> &'static str {
        ""
    }

    fn ui_icon(&self, _icon: UiIcon) -> &'static str {
        ""
    }
}

/// Nerd Font glyphs
#[derive(Debug, Default, Clone, Copy)]
pub struct NerdFontIcons;

impl IconProvider for NerdFontIcons {
    fn pr_icon(&self) -> &'static str {
        "\u{f407}"
    }

    fn issue_icon(&self) -> &'static str {
        "\u{f41b}"
    }

    fn ci_icon(&self, conclusion: &str) -> &'static str {
        match conclusion {
            "success" => "\u{f00c}",
            "failure" => "\u{f00d}",
            "pending" | "" => "\u{f192}",
            "skipped" => "\u{f05e}",
            "cancelled" => "\u{f28d}",
            _ => "\u{f128}",
        }
    }

    fn ui_icon(&self, icon: UiIcon) -> &'static str {
        match icon {
            UiIcon::HelpTitle => "\u{f059}",
            UiIcon::Navigation => "\u{f14e}",
            UiIcon::StatusPane => "\u{f0ca}",
            UiIcon::LogPane => "\u{f1da}",
            UiIcon::CommitTree => "\u{e729}",
            UiIcon::WorktreeActions => "\u{f1bb}",
            UiIcon::BranchNaming => "\u{e725}",
            UiIcon::ViewingTools => "\u{f06e}",
            UiIcon::RepoOps => "\u{f1d3}",
            UiIcon::BackgroundRefresh => "\u{f021}",
            UiIcon::FilterSearch => "\u{f002}",
            UiIcon::StatusIndicators => "\u{f05a}",
            UiIcon::StatusClean => "\u{f00c}",
            UiIcon::StatusDirty => "\u{f111}",
            UiIcon::HelpNavigation => "\u{f0a9}",
            UiIcon::ShellCompletion => "\u{f120}",
            UiIcon::Configuration => "\u{f013}",
            UiIcon::IconConfiguration => "\u{f1fc}",
            UiIcon::Tip => "\u{f0eb}",
            UiIcon::PrSelect => "\u{f407}",
            UiIcon::IssueSelect => "\u{f41b}",
            UiIcon::CiCheck => "\u{f4a1}",
            UiIcon::ListSelect => "\u{f0ae}",
        }
    }
}

/// Cloneable handle on the provider chosen at startup
#[derive(Clone)]
pub struct IconService {
    current_theme: IconTheme,
    provider: Arc<dyn IconProvider>,
}

impl fmt::Debug for IconService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconService").field("theme", &self.current_theme).finish()
    }
}

impl Default for IconService {
    fn default() -> Self {
        Self::new(IconTheme::default())
    }
}

impl IconService {
    /// Create a new icon service with a built-in provider
    #[must_use]
    pub fn new(theme: IconTheme) -> Self {
        let provider: Arc<dyn IconProvider> = match theme {
            IconTheme::Ascii => Arc::new(AsciiIcons),
            IconTheme::NerdFont => Arc::new(NerdFontIcons),
        };
        Self {
            current_theme: theme,
            provider,
        }
    }

    /// Wrap an arbitrary provider
    #[must_use]
    pub fn with_provider(theme: IconTheme, provider: Arc<dyn IconProvider>) -> Self {
        Self {
            current_theme: theme,
            provider,
        }
    }

    #[must_use]
    pub fn theme(&self) -> IconTheme {
        self.current_theme
    }

    #[must_use]
    pub fn pr_icon(&self) -> &'static str {
        self.provider.pr_icon()
    }

    #[must_use]
    pub fn issue_icon(&self) -> &'static str {
        self.provider.issue_icon()
    }

    #[must_use]
    pub fn ci_icon(&self, conclusion: &str) -> &'static str {
        self.provider.ci_icon(conclusion)
    }

    #[must_use]
    pub fn ui_icon(&self, icon: UiIcon) -> &'static str {
        self.provider.ui_icon(icon)
    }

    /// Icon followed by a space, or nothing when icons are off or empty
    #[must_use]
    pub fn icon_prefix(&self, icon: UiIcon, show_icons: bool) -> String {
        if !show_icons {
            return String::new();
        }
        with_space(self.ui_icon(icon))
    }

    #[must_use]
    pub fn label_with_icon(&self, icon: UiIcon, label: &str, show_icons: bool) -> String {
        format!("{}{}", self.icon_prefix(icon, show_icons), label)
    }

    /// Clean/dirty marker for a worktree row
    #[must_use]
    pub fn status_indicator(&self, clean: bool, show_icons: bool) -> &'static str {
        let glyph = if show_icons {
            self.ui_icon(if clean { UiIcon::StatusClean } else { UiIcon::StatusDirty })
        } else {
            ""
        };
        match (glyph.is_empty(), clean) {
            (false, _) => glyph,
            (true, true) => " ",
            (true, false) => "~",
        }
    }

    /// Glyph for a CI conclusion with letter fallbacks
    #[must_use]
    pub fn ci_status_icon(&self, conclusion: &str, is_draft: bool, show_icons: bool) -> &'static str {
        if is_draft {
            return "D";
        }
        if show_icons {
            let icon = self.ci_icon(conclusion);
            if !icon.is_empty() {
                return icon;
            }
        }
        match conclusion {
            "success" => "S",
            "failure" => "F",
            "skipped" => "-",
            "cancelled" => "C",
            "pending" => "P",
            _ => "?",
        }
    }

    /// CI icon drawn as a pill between two powerline half-circles
    #[must_use]
    pub fn render_ci_bubble(&self, theme: &Theme, conclusion: &str, show_icons: bool) -> Vec<Span<'static>> {
        let icon = self.ci_status_icon(conclusion, false, show_icons);
        let (bg, fg) = ci_conclusion_colors(theme, conclusion);
        vec![
            Span::styled("\u{e0b6}", Style::default().fg(bg)),
            Span::styled(format!(" {icon} "), Style::default().bg(bg).fg(fg)),
            Span::styled("\u{e0b4}", Style::default().fg(bg)),
        ]
    }
}

fn with_space(icon: &str) -> String {
    if icon.is_empty() {
        String::new()
    } else {
        format!("{icon} ")
    }
}

/// (background, foreground) colours for a CI conclusion
#[must_use]
pub fn ci_conclusion_colors(theme: &Theme, conclusion: &str) -> (Color, Color) {
    match conclusion {
        "success" => (theme.success_fg, theme.accent_fg),
        "failure" => (theme.error_fg, theme.accent_fg),
        "pending" | "" => (theme.warn_fg, theme.accent_fg),
        _ => (theme.border_dim, theme.text_fg),
    }
}

#[must_use]
pub fn arrow_up(show_icons: bool) -> &'static str {
    if show_icons {
        "↑"
    } else {
        "Up"
    }
}

#[must_use]
pub fn arrow_down(show_icons: bool) -> &'static str {
    if show_icons {
        "↓"
    } else {
        "Down"
    }
}

#[must_use]
pub fn arrow_left(show_icons: bool) -> &'static str {
    if show_icons {
        "←"
    } else {
        "Left"
    }
}

#[must_use]
pub fn arrow_right(show_icons: bool) -> &'static str {
    if show_icons {
        "→"
    } else {
        "Right"
    }
}

/// Expand/collapse marker for grouped rows
#[must_use]
pub fn disclosure_indicator(collapsed: bool, show_icons: bool) -> &'static str {
    match (show_icons, collapsed) {
        (true, true) => "▶",
        (true, false) => "▼",
        (false, true) => ">",
        (false, false) => "v",
    }
}
