use crate::support::{contains, ctrl, key, render_rows, type_text};
use crossterm::event::KeyCode;
use lazyworktree::constants::{TEXTAREA_FOOTER, TEXTAREA_FOOTER_EXTERNAL};
use lazyworktree::ui::core::{Action, Screen, ScreenContext};
use lazyworktree::ui::screens::TextareaScreen;
use std::cell::RefCell;
use std::rc::Rc;

fn screen(value: &str) -> TextareaScreen {
    TextareaScreen::new("Note", "Edit note", value, ScreenContext::default())
}

#[test]
fn test_ctrl_s_submits_value() {
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let mut textarea = screen("hello").on_submit(move |value| {
        *sink.borrow_mut() = Some(value.to_string());
        Ok(Action::SaveText {
            target: "note".to_string(),
            value: value.to_string(),
        })
    });

    let result = textarea.handle_key(ctrl('s'));
    assert!(result.is_close());
    assert_eq!(seen.borrow().as_deref(), Some("hello"));
    assert_eq!(
        result.action,
        Action::SaveText {
            target: "note".to_string(),
            value: "hello".to_string(),
        }
    );
}

#[test]
fn test_validation_error_keeps_screen_open() {
    let submitted = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&submitted);
    let mut textarea = screen("")
        .validate(|value| {
            if value.is_empty() {
                "  Value required  ".to_string()
            } else {
                "   ".to_string()
            }
        })
        .on_submit(move |_| {
            *flag.borrow_mut() = true;
            Ok(Action::None)
        });

    assert!(textarea.handle_key(ctrl('s')).is_stay());
    assert_eq!(textarea.error(), Some("Value required"));
    assert!(!*submitted.borrow());

    type_text(&mut textarea, "x");
    assert_eq!(textarea.error(), None);

    // A blank validation message counts as success
    assert!(textarea.handle_key(ctrl('s')).is_close());
    assert!(*submitted.borrow());
}

#[test]
fn test_ctrl_x_hands_off_current_value() {
    let mut textarea = screen("draft").on_edit_external(|value| Action::EditExternal {
        target: "note".to_string(),
        value: value.to_string(),
    });
    type_text(&mut textarea, "!");

    let result = textarea.handle_key(ctrl('x'));
    assert!(result.is_close());
    assert_eq!(
        result.action,
        Action::EditExternal {
            target: "note".to_string(),
            value: "draft!".to_string(),
        }
    );
}

#[test]
fn test_cancel_paths() {
    let mut textarea = screen("x").on_cancel(|| Action::ShowStatus("cancelled".to_string()));
    let result = textarea.handle_key(key(KeyCode::Esc));
    assert!(result.is_close());
    assert_eq!(result.action, Action::ShowStatus("cancelled".to_string()));

    let mut textarea = screen("x");
    let result = textarea.handle_key(ctrl('c'));
    assert!(result.is_close());
    assert!(result.action.is_none());
}

#[test]
fn test_multiline_editing() {
    let mut textarea = screen("line one");
    textarea.handle_key(key(KeyCode::Enter));
    type_text(&mut textarea, "line two");
    assert_eq!(textarea.value(), "line one\nline two");

    let seeded = screen("a\nb");
    assert_eq!(seeded.value(), "a\nb");
}

#[test]
fn test_render_footer_and_error() {
    let mut textarea = screen("").on_submit(|_| Err("Name already exists".to_string()));
    let rows = render_rows(120, 40, |f| textarea.render(f, f.area()));
    assert!(contains(&rows, "Edit note"));
    assert!(contains(&rows, TEXTAREA_FOOTER));

    textarea.handle_key(ctrl('s'));
    let rows = render_rows(120, 40, |f| textarea.render(f, f.area()));
    assert!(contains(&rows, "Name already exists"));

    let external = screen("").on_edit_external(|_| Action::None);
    let rows = render_rows(120, 40, |f| external.render(f, f.area()));
    assert!(contains(&rows, TEXTAREA_FOOTER_EXTERNAL));
}
