//! Colour themes for every rendered screen.
//!
//! A [`Theme`] is a flat record of named colours. Built-in themes live in a
//! static table; custom themes come from the configuration file and may name
//! a `base` to inherit from, overriding any subset of fields.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const DRACULA_NAME: &str = "dracula";
pub const DRACULA_LIGHT_NAME: &str = "dracula-light";

/// Flat colour record consumed by the screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub accent_fg: Color,
    pub accent_dim: Color,
    pub border: Color,
    pub border_dim: Color,
    pub muted_fg: Color,
    pub text_fg: Color,
    pub success_fg: Color,
    pub warn_fg: Color,
    pub error_fg: Color,
    pub cyan: Color,
}

impl Default for Theme {
    fn default() -> Self {
        DRACULA
    }
}

const fn hex(value: u32) -> Color {
    Color::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

#[allow(clippy::too_many_arguments)]
const fn palette(
    background: u32,
    accent: u32,
    accent_fg: u32,
    accent_dim: u32,
    border: u32,
    border_dim: u32,
    muted_fg: u32,
    text_fg: u32,
    success_fg: u32,
    warn_fg: u32,
    error_fg: u32,
    cyan: u32,
) -> Theme {
    Theme {
        background: hex(background),
        accent: hex(accent),
        accent_fg: hex(accent_fg),
        accent_dim: hex(accent_dim),
        border: hex(border),
        border_dim: hex(border_dim),
        muted_fg: hex(muted_fg),
        text_fg: hex(text_fg),
        success_fg: hex(success_fg),
        warn_fg: hex(warn_fg),
        error_fg: hex(error_fg),
        cyan: hex(cyan),
    }
}

const DRACULA: Theme = palette(
    0x282A36, 0xBD93F9, 0x282A36, 0x44475A, 0x6272A4, 0x3B3E4F, 0x6272A4, 0xF8F8F2, 0x50FA7B, 0xFFB86C, 0xFF5555,
    0x8BE9FD,
);

static BUILTIN_THEMES: [(&str, Theme); 15] = [
    (DRACULA_NAME, DRACULA),
    (
        DRACULA_LIGHT_NAME,
        palette(
            0xF8F8F2, 0x7D56C1, 0xFFFFFF, 0xE6E0F5, 0xA599C9, 0xD9D4E8, 0x6C6F85, 0x282A36, 0x1F8A3B, 0xB25E00,
            0xD12F2F, 0x0E7C8C,
        ),
    ),
    (
        "narna",
        palette(
            0x0D1117, 0x41ADFF, 0x0D1117, 0x1F2F44, 0x30363D, 0x21262D, 0x8B949E, 0xE6EDF3, 0x3FB950, 0xD29922,
            0xF85149, 0x39C5CF,
        ),
    ),
    (
        "clean-light",
        palette(
            0xFFFFFF, 0x0969DA, 0xFFFFFF, 0xDDF4FF, 0xD0D7DE, 0xEAEEF2, 0x6E7781, 0x1F2328, 0x1A7F37, 0x9A6700,
            0xCF222E, 0x1B7C83,
        ),
    ),
    (
        "catppuccin-latte",
        palette(
            0xEFF1F5, 0x8839EF, 0xEFF1F5, 0xDCE0E8, 0xACB0BE, 0xCCD0DA, 0x6C6F85, 0x4C4F69, 0x40A02B, 0xDF8E1D,
            0xD20F39, 0x04A5E5,
        ),
    ),
    (
        "rose-pine-dawn",
        palette(
            0xFAF4ED, 0x907AA9, 0xFAF4ED, 0xF2E9E1, 0xDFDAD9, 0xF4EDE8, 0x9893A5, 0x575279, 0x56949F, 0xEA9D34,
            0xB4637A, 0x286983,
        ),
    ),
    (
        "one-light",
        palette(
            0xFAFAFA, 0x4078F2, 0xFAFAFA, 0xE5E5E6, 0xC8C8C9, 0xE5E5E6, 0xA0A1A7, 0x383A42, 0x50A14F, 0xC18401,
            0xE45649, 0x0184BC,
        ),
    ),
    (
        "everforest-light",
        palette(
            0xFDF6E3, 0x8DA101, 0xFDF6E3, 0xEFEBD4, 0xBDC3AF, 0xE6E2CC, 0x939F91, 0x5C6A72, 0x8DA101, 0xDFA000,
            0xF85552, 0x35A77C,
        ),
    ),
    (
        "solarized-dark",
        palette(
            0x002B36, 0x268BD2, 0xFDF6E3, 0x073642, 0x586E75, 0x073642, 0x657B83, 0x839496, 0x859900, 0xB58900,
            0xDC322F, 0x2AA198,
        ),
    ),
    (
        "solarized-light",
        palette(
            0xFDF6E3, 0x268BD2, 0xFDF6E3, 0xEEE8D5, 0x93A1A1, 0xEEE8D5, 0x93A1A1, 0x657B83, 0x859900, 0xB58900,
            0xDC322F, 0x2AA198,
        ),
    ),
    (
        "gruvbox-dark",
        palette(
            0x282828, 0xFE8019, 0x282828, 0x3C3836, 0x665C54, 0x504945, 0x928374, 0xEBDBB2, 0xB8BB26, 0xFABD2F,
            0xFB4934, 0x8EC07C,
        ),
    ),
    (
        "gruvbox-light",
        palette(
            0xFBF1C7, 0xAF3A03, 0xFBF1C7, 0xEBDBB2, 0xBDAE93, 0xD5C4A1, 0x928374, 0x3C3836, 0x79740E, 0xB57614,
            0x9D0006, 0x427B58,
        ),
    ),
    (
        "nord",
        palette(
            0x2E3440, 0x88C0D0, 0x2E3440, 0x3B4252, 0x4C566A, 0x434C5E, 0x616E88, 0xECEFF4, 0xA3BE8C, 0xEBCB8B,
            0xBF616A, 0x8FBCBB,
        ),
    ),
    (
        "monokai",
        palette(
            0x272822, 0xF92672, 0x272822, 0x3E3D32, 0x75715E, 0x49483E, 0x75715E, 0xF8F8F2, 0xA6E22E, 0xE6DB74,
            0xF92672, 0x66D9EF,
        ),
    ),
    (
        "catppuccin-mocha",
        palette(
            0x1E1E2E, 0xCBA6F7, 0x1E1E2E, 0x313244, 0x585B70, 0x45475A, 0x7F849C, 0xCDD6F4, 0xA6E3A1, 0xF9E2AF,
            0xF38BA8, 0x89DCEB,
        ),
    ),
];

/// Custom theme as declared in the configuration file.
///
/// Every colour is optional; unset fields inherit from `base`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomTheme {
    pub base: Option<String>,
    pub background: Option<String>,
    pub accent: Option<String>,
    pub accent_fg: Option<String>,
    pub accent_dim: Option<String>,
    pub border: Option<String>,
    pub border_dim: Option<String>,
    pub muted_fg: Option<String>,
    pub text_fg: Option<String>,
    pub success_fg: Option<String>,
    pub warn_fg: Option<String>,
    pub error_fg: Option<String>,
    pub cyan: Option<String>,
}

/// Name of the default dark theme
#[must_use]
pub fn default_dark() -> &'static str {
    DRACULA_NAME
}

/// Name of the default light theme
#[must_use]
pub fn default_light() -> &'static str {
    DRACULA_LIGHT_NAME
}

/// Names of the built-in themes, in catalogue order
#[must_use]
pub fn available_themes() -> Vec<&'static str> {
    BUILTIN_THEMES.iter().map(|(name, _)| *name).collect()
}

/// Built-in names followed by custom names that do not shadow a built-in
#[must_use]
pub fn available_themes_with_customs(customs: &HashMap<String, CustomTheme>) -> Vec<String> {
    let mut names: Vec<String> = available_themes().into_iter().map(str::to_string).collect();
    let mut custom_names: Vec<&String> = customs.keys().filter(|name| !is_builtin(name)).collect();
    custom_names.sort();
    names.extend(custom_names.into_iter().cloned());
    names
}

/// Case-insensitive built-in lookup
#[must_use]
pub fn builtin(name: &str) -> Option<Theme> {
    let wanted = name.trim().to_lowercase();
    BUILTIN_THEMES
        .iter()
        .find(|(candidate, _)| *candidate == wanted)
        .map(|(_, theme)| *theme)
}

#[must_use]
pub fn is_builtin(name: &str) -> bool {
    builtin(name).is_some()
}

/// Built-in theme by name, falling back to the default dark theme
#[must_use]
pub fn get_theme(name: &str) -> Theme {
    builtin(name).unwrap_or_default()
}

fn parse_color(value: &Option<String>) -> Option<Color> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())?.parse().ok()
}

/// Layer one custom theme's overrides over `base`.
///
/// Values that fail to parse as a colour are ignored.
#[must_use]
pub fn merge_theme(base: Theme, custom: &CustomTheme) -> Theme {
    let pick = |value: &Option<String>, fallback: Color| parse_color(value).unwrap_or(fallback);
    Theme {
        background: pick(&custom.background, base.background),
        accent: pick(&custom.accent, base.accent),
        accent_fg: pick(&custom.accent_fg, base.accent_fg),
        accent_dim: pick(&custom.accent_dim, base.accent_dim),
        border: pick(&custom.border, base.border),
        border_dim: pick(&custom.border_dim, base.border_dim),
        muted_fg: pick(&custom.muted_fg, base.muted_fg),
        text_fg: pick(&custom.text_fg, base.text_fg),
        success_fg: pick(&custom.success_fg, base.success_fg),
        warn_fg: pick(&custom.warn_fg, base.warn_fg),
        error_fg: pick(&custom.error_fg, base.error_fg),
        cyan: pick(&custom.cyan, base.cyan),
    }
}

/// Resolve `name` against the built-ins and the custom theme table.
///
/// Custom themes follow their `base` chain down to a built-in root and the
/// overrides are applied from the root upwards, so the requested theme wins.
/// A chain that ends without a built-in (no base, unknown base, or a cycle)
/// is layered over the default theme. Unknown names yield the default.
#[must_use]
pub fn effective_theme(name: &str, customs: &HashMap<String, CustomTheme>) -> Theme {
    let mut chain: Vec<&CustomTheme> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut current = name.trim().to_string();

    let root = loop {
        if let Some(theme) = builtin(&current) {
            break theme;
        }
        if !seen.insert(current.clone()) {
            log::warn!("Theme inheritance cycle detected at '{}'", current);
            break Theme::default();
        }
        let Some(custom) = customs.get(&current) else {
            if chain.is_empty() {
                log::warn!("Unknown theme '{}', using {}", current, DRACULA_NAME);
            }
            break Theme::default();
        };
        chain.push(custom);
        match custom.base.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            Some(base) => current = base.to_string(),
            None => break Theme::default(),
        }
    };

    chain.iter().rev().fold(root, |theme, custom| merge_theme(theme, custom))
}
