use crate::icons::{IconService, IconTheme};
use crate::theme::Theme;

/// Rendering dependencies handed to every screen at construction
#[derive(Debug, Clone, Default)]
pub struct ScreenContext {
    pub theme: Theme,
    pub icons: IconService,
    pub show_icons: bool,
}

impl ScreenContext {
    #[must_use]
    pub fn new(theme: Theme, icons: IconService, show_icons: bool) -> Self {
        Self {
            theme,
            icons,
            show_icons,
        }
    }

    /// Whether glyph-font characters may be drawn
    #[must_use]
    pub fn nerd_font(&self) -> bool {
        self.show_icons && self.icons.theme() == IconTheme::NerdFont
    }
}
