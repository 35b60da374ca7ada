use crate::support::{ch, contains, ctrl, key, render_rows};
use crossterm::event::KeyCode;
use lazyworktree::ui::core::{Action, Screen, ScreenContext};
use lazyworktree::ui::screens::NoteViewScreen;

fn note(lines: usize) -> String {
    (1..=lines).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n")
}

#[test]
fn test_half_page_scrolling() {
    let mut screen = NoteViewScreen::new("Note", note(30), ScreenContext::default()).with_size(80, 18);
    assert_eq!(screen.visible_lines(), 9);

    screen.handle_key(ctrl('d'));
    assert_eq!(screen.offset(), 4);
    screen.handle_key(key(KeyCode::Down));
    assert_eq!(screen.offset(), 5);
    screen.handle_key(ctrl('u'));
    assert_eq!(screen.offset(), 1);
    screen.handle_key(key(KeyCode::PageUp));
    assert_eq!(screen.offset(), 0);
    screen.handle_key(key(KeyCode::End));
    assert_eq!(screen.offset(), 21);
    screen.handle_key(key(KeyCode::PageDown));
    assert_eq!(screen.offset(), 21);
}

#[test]
fn test_short_note_does_not_scroll() {
    let mut screen = NoteViewScreen::new("Note", "just one line", ScreenContext::default()).with_size(80, 24);
    screen.handle_key(ch('j'));
    screen.handle_key(ctrl('d'));
    assert_eq!(screen.offset(), 0);
    assert_eq!(screen.max_offset(), 0);
}

#[test]
fn test_resize_rewraps_and_clamps() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu".repeat(3);
    let mut screen = NoteViewScreen::new("Note", text, ScreenContext::default()).with_size(40, 14);
    let narrow = screen.lines().len();
    screen.handle_key(key(KeyCode::End));

    screen.resize(200, 60);
    assert!(screen.lines().len() < narrow);
    assert!(screen.offset() <= screen.max_offset());
}

#[test]
fn test_edit_hooks() {
    let mut screen = NoteViewScreen::new("Note", "text", ScreenContext::default())
        .on_edit(|| Action::EditInline {
            target: "wt".to_string(),
        })
        .on_edit_external(|| Action::EditExternal {
            target: "wt".to_string(),
            value: "text".to_string(),
        });

    let inline = screen.handle_key(ch('e'));
    assert!(inline.is_close());
    assert_eq!(
        inline.action,
        Action::EditInline {
            target: "wt".to_string()
        }
    );

    let external = screen.handle_key(ch('E'));
    assert!(external.is_close());
    assert!(matches!(external.action, Action::EditExternal { .. }));

    assert!(screen.handle_key(key(KeyCode::Esc)).is_close());
    assert!(screen.handle_key(ch('q')).is_close());
}

#[test]
fn test_render_shows_window() {
    let mut screen = NoteViewScreen::new("Note", note(30), ScreenContext::default()).with_size(80, 18);
    screen.handle_key(ch('j'));

    let rows = render_rows(80, 18, |f| screen.render(f, f.area()));
    assert!(contains(&rows, "line 2"));
    assert!(contains(&rows, "line 10"));
    assert!(!contains(&rows, "line 11"));
    assert!(contains(&rows, "10/30"));
}
