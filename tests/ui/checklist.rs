use crate::support::{ch, contains, ctrl, key, render_rows, type_text};
use crossterm::event::KeyCode;
use lazyworktree::ui::core::{Action, Screen, ScreenContext};
use lazyworktree::ui::screens::{ChecklistItem, ChecklistScreen};
use proptest::prelude::*;

fn items() -> Vec<ChecklistItem> {
    vec![ChecklistItem::new("one", "One"), ChecklistItem::new("two", "Two")]
}

fn checklist() -> ChecklistScreen {
    ChecklistScreen::new(items(), "Pick", ScreenContext::default())
}

#[test]
fn test_filter_is_sticky_after_escape() {
    let mut screen = checklist();

    screen.handle_key(ch('f'));
    screen.handle_key(ch('t'));
    assert!(screen.filter_active());
    assert_eq!(screen.filtered_ids(), vec!["two"]);

    screen.handle_key(key(KeyCode::Esc));
    assert!(!screen.filter_active());
    assert_eq!(screen.filtered_ids(), vec!["two"]);
    assert_eq!(screen.filter_text(), "t");
}

#[test]
fn test_toggle_and_close_hook() {
    let mut screen = checklist().on_close(|checked| Action::ApplyChecklist {
        target: "pick".to_string(),
        checked,
    });

    screen.handle_key(ch(' '));
    screen.handle_key(ch('j'));
    screen.handle_key(key(KeyCode::Enter));
    assert!(screen.is_checked("one"));
    assert!(screen.is_checked("two"));

    let result = screen.handle_key(ch('q'));
    assert!(result.is_close());
    assert_eq!(
        result.action,
        Action::ApplyChecklist {
            target: "pick".to_string(),
            checked: vec!["one".to_string(), "two".to_string()],
        }
    );
}

#[test]
fn test_filter_mode_takes_letters_literally() {
    let mut screen = checklist();
    screen.handle_key(ch('f'));
    type_text(&mut screen, "q");
    assert!(screen.handle_key(ch('j')).is_stay());
    assert_eq!(screen.filter_text(), "qj");
    assert!(screen.filtered().is_empty());

    // Toggling with nothing under the cursor is harmless
    screen.handle_key(key(KeyCode::Enter));
    assert!(screen.checked_ids().is_empty());

    assert!(screen.handle_key(ctrl('c')).is_close());
}

#[test]
fn test_initially_checked_items() {
    let screen = ChecklistScreen::new(
        vec![ChecklistItem::new("a", "A").checked(true), ChecklistItem::new("b", "B")],
        "Pick",
        ScreenContext::default(),
    );
    assert_eq!(screen.checked_ids(), vec!["a".to_string()]);
}

#[test]
fn test_render_shows_marks_and_count() {
    let mut screen = checklist().with_size(100, 30);
    screen.handle_key(ch(' '));

    let rows = render_rows(100, 30, |f| screen.render(f, f.area()));
    assert!(contains(&rows, "Pick"));
    assert!(contains(&rows, "[x] One"));
    assert!(contains(&rows, "[ ] Two"));
    assert!(contains(&rows, "1 selected"));
}

#[test]
fn test_empty_text_when_nothing_matches() {
    let mut screen = checklist().with_empty_text("Nothing here");
    screen.handle_key(ch('f'));
    type_text(&mut screen, "zz");

    let rows = render_rows(100, 30, |f| screen.render(f, f.area()));
    assert!(contains(&rows, "Nothing here"));
}

fn item_keys() -> impl Strategy<Value = Vec<char>> {
    proptest::collection::vec(prop_oneof![Just('j'), Just('k'), Just(' ')], 0..40)
}

proptest! {
    #[test]
    fn prop_even_toggles_leave_state_unchanged(moves in item_keys(), target in 0usize..2, times in 0usize..4) {
        let mut screen = checklist();
        for c in moves {
            screen.handle_key(ch(c));
        }
        let before = screen.checked_ids();

        // Park the cursor on the target row, then toggle an even number of times
        for _ in 0..2 {
            screen.handle_key(ch('k'));
        }
        for _ in 0..target {
            screen.handle_key(ch('j'));
        }
        for _ in 0..times * 2 {
            screen.handle_key(ch(' '));
        }

        prop_assert_eq!(screen.checked_ids(), before);
    }
}
