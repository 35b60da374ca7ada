use crate::support::{ch, contains, ctrl, key, render_rows};
use crossterm::event::KeyCode;
use lazyworktree::config::Config;
use lazyworktree::constants::BASE_HINTS;
use lazyworktree::logger::Logger;
use lazyworktree::security::{TrustStatus, TrustStore};
use lazyworktree::ui::core::{Action, ScreenKind};
use lazyworktree::ui::App;
use std::time::Duration;
use tempfile::TempDir;

fn app() -> (App, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let trust = TrustStore::with_db_path(dir.path().join("trusted.json"));
    (App::new(Config::default(), trust, Logger::new()), dir)
}

fn type_keys(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(ch(c));
    }
}

#[tokio::test]
async fn test_palette_opens_and_closes() {
    let (mut app, _dir) = app();

    app.handle_key(ch('p'));
    assert_eq!(app.screens().active_kind(), Some(ScreenKind::Palette));

    // First Escape leaves the filter, the second closes
    app.handle_key(key(KeyCode::Esc));
    assert!(app.screens().is_active());
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.screens().is_active());
    assert!(!app.should_quit());

    app.handle_key(ch('q'));
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_quit_letter_goes_to_active_screen() {
    let (mut app, _dir) = app();

    app.handle_key(ch('n'));
    type_keys(&mut app, "q");
    assert!(!app.should_quit());
    assert_eq!(app.screens().active_kind(), Some(ScreenKind::Textarea));
}

#[tokio::test]
async fn test_note_save_and_reopen() {
    let (mut app, _dir) = app();

    app.handle_key(ch('v'));
    assert_eq!(app.screens().status(), Some("No note for scratch"));

    app.handle_key(ch('n'));
    type_keys(&mut app, "hi");
    app.handle_key(ctrl('s'));
    assert!(!app.screens().is_active());
    assert_eq!(app.note("scratch"), Some("hi"));
    assert_eq!(app.screens().status(), Some("Saved scratch"));

    app.handle_key(ch('v'));
    assert_eq!(app.screens().active_kind(), Some(ScreenKind::NoteView));
    app.handle_key(ch('e'));
    assert_eq!(app.screens().active_kind(), Some(ScreenKind::Textarea));

    app.handle_key(key(KeyCode::Esc));
    assert!(!app.screens().is_active());
    assert_eq!(app.screens().status(), Some("Edit cancelled"));
    assert_eq!(app.note("scratch"), Some("hi"));
}

#[tokio::test]
async fn test_external_edit_round_trip() {
    let (mut app, _dir) = app();

    app.handle_key(ch('n'));
    type_keys(&mut app, "draft");
    app.handle_key(ctrl('x'));
    assert!(!app.screens().is_active());

    let edit = app.take_external_edit().unwrap();
    assert_eq!(edit.target, "scratch");
    assert_eq!(edit.value, "draft");
    assert!(app.take_external_edit().is_none());

    app.finish_external_edit(edit.target, Ok("final".to_string()));
    assert_eq!(app.note("scratch"), Some("final"));

    app.finish_external_edit("scratch".to_string(), Err(anyhow::anyhow!("editor crashed")));
    assert_eq!(app.screens().status(), Some("Error: editor crashed"));
    assert_eq!(app.note("scratch"), Some("final"));
}

#[tokio::test]
async fn test_worktree_namer() {
    let (mut app, _dir) = app();

    app.handle_key(ch('w'));
    app.handle_key(ctrl('s'));
    assert_eq!(app.screens().active_kind(), Some(ScreenKind::Textarea));

    type_keys(&mut app, "42 Fix login");
    app.handle_key(ctrl('s'));
    assert!(!app.screens().is_active());
    assert!(app.screens().status().unwrap().starts_with("Worktree name: pr-42-"));
}

#[tokio::test]
async fn test_unknown_command_sets_status() {
    let (mut app, _dir) = app();
    app.apply(None, Action::RunCommand("nope".to_string()));
    assert_eq!(app.screens().status(), Some("Unknown command: nope"));

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.screens().status(), None);
}

#[tokio::test]
async fn test_trust_file_runs_in_background() {
    let (mut app, dir) = app();
    let file = dir.path().join(".wt");
    std::fs::write(&file, "echo hi").unwrap();

    app.apply(None, Action::Batch(vec![Action::TrustFile(file.clone())]));

    let mut delivered = 0;
    for _ in 0..200 {
        delivered += app.process_completions();
        if delivered > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(delivered, 1);
    assert!(app.screens().status().unwrap().starts_with("Trusted"));
    assert_eq!(app.active_task_count(), 0);

    let reloaded = TrustStore::with_db_path(dir.path().join("trusted.json"));
    assert_eq!(reloaded.check_trust(&file), TrustStatus::Trusted);
}

#[tokio::test]
async fn test_render_base_view() {
    let (mut app, _dir) = app();
    let rows = render_rows(100, 30, |f| app.render(f, f.area()));
    assert!(contains(&rows, "lazyworktree"));
    assert!(contains(&rows, BASE_HINTS));

    app.handle_key(ch('?'));
    assert_eq!(app.screens().active_kind(), Some(ScreenKind::NoteView));
    let rows = render_rows(100, 30, |f| app.render(f, f.area()));
    assert!(contains(&rows, "Help"));
}
