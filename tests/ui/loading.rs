use crate::support::{contains, key, render_rows};
use crossterm::event::KeyCode;
use lazyworktree::icons::{IconService, IconTheme};
use lazyworktree::theme::Theme;
use lazyworktree::tips::{TipOperation, LOADING_TIPS};
use lazyworktree::ui::core::{Screen, ScreenContext};
use lazyworktree::ui::screens::LoadingScreen;

fn loading(ctx: ScreenContext) -> LoadingScreen {
    LoadingScreen::new("Fetching remotes", &LOADING_TIPS[0], TipOperation::Fetch, ctx)
}

#[test]
fn test_border_cycles_through_palette() {
    let mut screen = loading(ScreenContext::default());
    let theme = Theme::default();
    assert_eq!(
        screen.border_colors(),
        [theme.accent, theme.success_fg, theme.warn_fg, theme.accent]
    );

    let mut seen = Vec::new();
    for _ in 0..5 {
        seen.push(screen.border_index());
        screen.tick();
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 0]);
}

#[test]
fn test_spinner_depends_on_icon_set() {
    let mut text = loading(ScreenContext::default());
    assert_eq!(text.spinner(), "...");
    text.tick();
    assert_eq!(text.spinner(), ".. ");
    text.tick();
    text.tick();
    assert_eq!(text.frame_index(), 0);

    let ctx = ScreenContext::new(Theme::default(), IconService::new(IconTheme::NerdFont), true);
    let glyphs = loading(ctx);
    assert_ne!(glyphs.spinner(), "...");
}

#[test]
fn test_keys_do_not_close() {
    let mut screen = loading(ScreenContext::default());
    assert!(screen.handle_key(key(KeyCode::Esc)).is_stay());
    assert!(screen.handle_key(key(KeyCode::Char('q'))).is_stay());
    assert_eq!(screen.tip_id(), LOADING_TIPS[0].id);
    assert_eq!(screen.operation(), TipOperation::Fetch);
}

#[test]
fn test_render_message_and_tip() {
    let screen = loading(ScreenContext::default());
    let rows = render_rows(80, 24, |f| screen.render(f, f.area()));
    assert!(contains(&rows, "Fetching remotes"));
    assert!(contains(&rows, "Tip:"));
    assert!(contains(&rows, "help guide"));
}

#[test]
fn test_set_theme_changes_border() {
    let mut screen = loading(ScreenContext::default());
    let nord = lazyworktree::theme::builtin("nord").unwrap();
    screen.set_theme(nord);
    assert_eq!(screen.border_colors()[0], nord.accent);
    assert_eq!(screen.border_colors()[2], nord.warn_fg);
}
