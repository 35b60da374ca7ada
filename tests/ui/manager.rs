use crate::support::{ch, ctrl, key};
use crossterm::event::KeyCode;
use lazyworktree::ui::core::{
    Action, CommandOutcome, Dispatch, ScreenContext, ScreenKind, ScreenManager, TaskManager,
};
use lazyworktree::ui::screens::{
    ChecklistItem, ChecklistScreen, ModalScreen, NoteViewScreen, PaletteItem, PaletteScreen, TextareaScreen,
};
use std::time::Duration;

fn manager() -> ScreenManager {
    ScreenManager::new(ScreenContext::default())
}

fn note(text: &str) -> NoteViewScreen {
    NoteViewScreen::new("Note", text, ScreenContext::default())
}

#[test]
fn test_single_active_screen() {
    let mut screens = manager();
    assert!(!screens.is_active());
    assert!(screens.handle_key(ch('j')).is_none());

    let first = screens.open(note("first"));
    let second = screens.open(note("second"));
    assert_ne!(first, second);
    assert_eq!(screens.active_token(), Some(second));
    assert_eq!(screens.take_retired(), vec![first]);

    assert_eq!(screens.close(), Some(second));
    assert!(!screens.is_active());
    assert_eq!(screens.take_retired(), vec![second]);
    assert_eq!(screens.close(), None);
}

#[test]
fn test_tokens_display_with_hash() {
    let mut screens = manager();
    let token = screens.open(note("x"));
    assert!(token.to_string().starts_with('#'));
}

#[test]
fn test_stale_completion_is_discarded() {
    let mut screens = manager();
    let old = screens.open(note("old"));
    let current = screens.open(note("current"));

    assert!(!screens.complete(Some(old), Ok(CommandOutcome::close())));
    assert_eq!(screens.active_token(), Some(current));
    assert_eq!(screens.status(), None);
}

#[test]
fn test_failure_sets_status_and_keeps_screen() {
    let mut screens = manager();
    let token = screens.open(note("body"));

    assert!(screens.complete(Some(token), Err(anyhow::anyhow!("boom"))));
    assert_eq!(screens.status(), Some("Error: boom"));
    assert_eq!(screens.active_token(), Some(token));
}

#[test]
fn test_success_can_close_owner() {
    let mut screens = manager();
    let token = screens.open(note("body"));

    assert!(screens.complete(
        Some(token),
        Ok(CommandOutcome {
            close: true,
            status: Some("Done".to_string()),
        })
    ));
    assert!(!screens.is_active());
    assert_eq!(screens.status(), Some("Done"));
}

#[test]
fn test_unowned_completion_leaves_screen_open() {
    let mut screens = manager();
    screens.open(note("body"));

    assert!(screens.complete(None, Ok(CommandOutcome::close())));
    assert!(screens.is_active());
}

#[test]
fn test_close_action_is_unowned() {
    let mut screens = manager();
    let checklist = ChecklistScreen::new(
        vec![ChecklistItem::new("a", "A"), ChecklistItem::new("b", "B")],
        "Pick",
        ScreenContext::default(),
    )
    .on_close(|checked| Action::ApplyChecklist {
        target: "pick".to_string(),
        checked,
    });
    let token = screens.open(checklist);

    assert!(screens.handle_key(ch(' ')).is_none());
    assert_eq!(screens.active_token(), Some(token));

    let dispatch = screens.handle_key(key(KeyCode::Esc));
    assert_eq!(
        dispatch,
        Some(Dispatch {
            owner: None,
            action: Action::ApplyChecklist {
                target: "pick".to_string(),
                checked: vec!["a".to_string()],
            },
        })
    );
    assert!(!screens.is_active());
    assert_eq!(screens.take_retired(), vec![token]);
}

#[test]
fn test_palette_selection_dispatches_command() {
    let mut screens = manager();
    let palette = PaletteScreen::new(
        vec![
            PaletteItem::section("General"),
            PaletteItem::new("help", "Help", "Keys and tips"),
        ],
        ScreenContext::default(),
    )
    .on_select(|id| Action::RunCommand(id.to_string()));
    screens.open(palette);

    let dispatch = screens.handle_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(dispatch.owner, None);
    assert_eq!(dispatch.action, Action::RunCommand("help".to_string()));
}

#[test]
fn test_staying_action_is_owned_by_active_screen() {
    let mut screens = manager();
    let textarea = TextareaScreen::new("Name", "Name", "", ScreenContext::default())
        .on_submit(|_| Err("not yet".to_string()))
        .on_cancel(|| Action::ShowStatus("cancelled".to_string()));
    let token = screens.open(textarea);

    assert!(screens.handle_key(ctrl('s')).is_none());
    assert_eq!(screens.active_token(), Some(token));

    let dispatch = screens.handle_key(key(KeyCode::Esc)).unwrap();
    assert_eq!(dispatch.owner, None);
}

#[test]
fn test_show_loading_picks_tip() {
    let mut screens = manager();
    assert_eq!(screens.tip_memory().last_tip_id(), "");

    screens.show_loading("Fetching remotes", "fetch");
    assert_eq!(screens.active_kind(), Some(ScreenKind::Loading));

    let Some(ModalScreen::Loading(loading)) = screens.active_screen() else {
        panic!("expected the loading overlay");
    };
    assert_eq!(loading.message(), "Fetching remotes");
    assert_eq!(screens.tip_memory().last_tip_id(), loading.tip_id());

    screens.tick();
    let Some(ModalScreen::Loading(loading)) = screens.active_screen() else {
        panic!("expected the loading overlay");
    };
    assert_eq!(loading.frame_index(), 1);
}

#[test]
fn test_loading_tips_do_not_repeat_back_to_back() {
    let mut screens = manager();
    let mut previous = String::new();
    for _ in 0..10 {
        screens.show_loading("Working", "general");
        let id = screens.tip_memory().last_tip_id().to_string();
        assert_ne!(id, previous);
        previous = id;
    }
}

#[test]
fn test_resize_reaches_new_screens() {
    let mut screens = manager();
    screens.resize(80, 18);

    screens.open(note(&(1..=30).map(|i| i.to_string()).collect::<Vec<_>>().join("\n")));
    let Some(ModalScreen::NoteView(view)) = screens.active_screen() else {
        panic!("expected the note view");
    };
    assert_eq!(view.visible_lines(), 9);

    screens.resize(80, 24);
    let Some(ModalScreen::NoteView(view)) = screens.active_screen() else {
        panic!("expected the note view");
    };
    assert_eq!(view.visible_lines(), 15);
}

#[tokio::test]
async fn test_closing_owner_cancels_its_tasks() {
    let mut screens = manager();
    let (mut tasks, _completions) = TaskManager::new();

    let token = screens.show_loading("Waiting", "general");
    tasks.spawn(Some(token), "sleep".to_string(), async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(CommandOutcome::close())
    });
    tasks.spawn(None, "detached".to_string(), async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(CommandOutcome::default())
    });
    assert_eq!(tasks.task_count(), 2);

    screens.close();
    for retired in screens.take_retired() {
        assert_eq!(tasks.cancel_owned_by(retired), 1);
    }
    assert_eq!(tasks.task_count(), 1);
}
