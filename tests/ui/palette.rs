use crate::support::{ch, contains, ctrl, key, render_rows, type_text};
use crossterm::event::KeyCode;
use lazyworktree::constants::PALETTE_NO_RESULTS;
use lazyworktree::ui::core::{Action, Screen, ScreenContext};
use lazyworktree::ui::screens::common::highlight_matches;
use lazyworktree::ui::screens::{PaletteItem, PaletteScreen};
use proptest::prelude::*;

fn items() -> Vec<PaletteItem> {
    vec![
        PaletteItem::section("Worktree"),
        PaletteItem::new("create", "Create worktree", "From a branch"),
        PaletteItem::section("Status"),
        PaletteItem::new("refresh-status", "Refresh status", "Reload git status"),
        PaletteItem::section("Navigation"),
        PaletteItem::new("focus-worktrees", "Focus worktrees", "Jump to the list"),
    ]
}

fn palette() -> PaletteScreen {
    PaletteScreen::new(items(), ScreenContext::default()).on_select(|id| Action::RunCommand(id.to_string()))
}

fn labels(screen: &PaletteScreen) -> Vec<String> {
    screen.filtered().iter().map(|item| item.label.clone()).collect()
}

#[test]
fn test_headers_without_matches_are_omitted() {
    let mut screen = palette();
    screen.handle_key(ch('w'));
    assert_eq!(
        labels(&screen),
        vec!["Worktree", "Create worktree", "Navigation", "Focus worktrees"]
    );
    assert_eq!(screen.current().map(|item| item.id.as_str()), Some("create"));
}

#[test]
fn test_enter_selects_and_closes() {
    let mut screen = palette();
    screen.handle_key(key(KeyCode::Down));
    let result = screen.handle_key(key(KeyCode::Enter));
    assert!(result.is_close());
    assert_eq!(result.action, Action::RunCommand("refresh-status".to_string()));
}

#[test]
fn test_filter_mode_keys() {
    let mut screen = palette();
    assert!(screen.filter_active());

    // Letters go to the query while filtering
    type_text(&mut screen, "jk");
    assert_eq!(screen.query(), "jk");

    screen.handle_key(key(KeyCode::Backspace));
    screen.handle_key(key(KeyCode::Backspace));
    assert_eq!(screen.filtered().len(), 6);

    // Esc leaves filter mode first, then closes
    assert!(screen.handle_key(key(KeyCode::Esc)).is_stay());
    assert!(!screen.filter_active());
    screen.handle_key(ch('j'));
    assert_eq!(screen.current().map(|item| item.id.as_str()), Some("refresh-status"));
    screen.handle_key(ch('f'));
    assert!(screen.filter_active());
    screen.handle_key(ctrl('j'));
    assert_eq!(screen.current().map(|item| item.id.as_str()), Some("focus-worktrees"));
    screen.handle_key(ctrl('k'));
    assert_eq!(screen.current().map(|item| item.id.as_str()), Some("refresh-status"));

    screen.handle_key(key(KeyCode::Esc));
    assert!(screen.handle_key(key(KeyCode::Esc)).is_close());
}

#[test]
fn test_ctrl_c_cancels_while_filtering() {
    let mut screen = PaletteScreen::new(items(), ScreenContext::default())
        .on_cancel(|| Action::ShowStatus("cancelled".to_string()));
    let result = screen.handle_key(ctrl('c'));
    assert!(result.is_close());
    assert_eq!(result.action, Action::ShowStatus("cancelled".to_string()));
}

#[test]
fn test_scroll_follows_cursor() {
    let many: Vec<PaletteItem> = (0..30)
        .map(|i| PaletteItem::new(format!("cmd-{}", i), format!("Command {}", i), ""))
        .collect();
    let mut screen = PaletteScreen::new(many, ScreenContext::default()).with_size(100, 10);
    assert_eq!(screen.visible_rows(), 5);

    for _ in 0..7 {
        screen.handle_key(key(KeyCode::Down));
    }
    assert_eq!(screen.cursor(), 7);
    assert_eq!(screen.scroll_offset(), 3);
    assert_eq!(screen.footer_text(), "8 of 30 ↕");

    for _ in 0..7 {
        screen.handle_key(key(KeyCode::Up));
    }
    assert_eq!(screen.scroll_offset(), 0);
    assert_eq!(screen.footer_text(), "1 of 30 ▼");
}

#[test]
fn test_highlight_marks_matched_characters() {
    let theme = ScreenContext::default().theme;
    let spans = highlight_matches("Create worktree", "cw", &theme);
    let matched: Vec<String> = spans
        .iter()
        .filter(|span| span.style.fg == Some(theme.accent))
        .map(|span| span.content.to_string())
        .collect();
    assert_eq!(matched, vec!["C", "w"]);
}

#[test]
fn test_render_footer_and_empty_state() {
    let mut screen = palette().with_size(120, 30);
    let rows = render_rows(120, 30, |f| screen.render(f, f.area()));
    assert!(contains(&rows, "Type a command..."));
    assert!(contains(&rows, "2 of 6"));
    assert!(contains(&rows, "Create worktree"));

    type_text(&mut screen, "zzz");
    let rows = render_rows(120, 30, |f| screen.render(f, f.area()));
    assert!(contains(&rows, PALETTE_NO_RESULTS));
    assert!(contains(&rows, "No matches"));
}

proptest! {
    #[test]
    fn prop_filter_shrinks_and_cursor_avoids_headers(query in "[a-z ]{0,8}") {
        let mut screen = palette();
        let mut previous = screen.filtered().len();

        for c in query.chars() {
            screen.handle_key(ch(c));
            let current = screen.filtered().len();
            prop_assert!(current <= previous);
            previous = current;

            let has_command = screen.filtered().iter().any(|item| !item.is_section);
            if has_command {
                prop_assert!(!screen.current().unwrap().is_section);
            }

            // Headers only appear above a matching command
            let filtered = screen.filtered();
            for (i, item) in filtered.iter().enumerate() {
                if item.is_section {
                    prop_assert!(filtered.get(i + 1).is_some_and(|next| !next.is_section));
                }
            }
        }
    }
}
