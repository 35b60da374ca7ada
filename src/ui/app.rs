//! Host for the modal screens: base view, action routing, background work.

use crate::config::Config;
use crate::constants::{BASE_HINTS, SCRATCH_NOTE, TRUST_CANDIDATES};
use crate::icons::{IconService, UiIcon};
use crate::logger::Logger;
use crate::security::{TrustStatus, TrustStore};
use crate::tips::help_lines;
use crate::ui::core::{
    Action, CommandOutcome, ScreenContext, ScreenManager, ScreenToken, TaskCompletion, TaskManager,
};
use crate::ui::layout::LayoutManager;
use crate::ui::screens::{
    ChecklistItem, ChecklistScreen, NoteViewScreen, PaletteItem, PaletteScreen, TextareaScreen,
};
use crate::utils::worktree::{generate_pr_worktree_name, sanitize_branch_name, PrInfo};
use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Text waiting to be handed to `$EDITOR` by the terminal loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEdit {
    pub target: String,
    pub value: String,
}

pub struct App {
    config: Config,
    screens: ScreenManager,
    task_manager: TaskManager,
    completions: mpsc::UnboundedReceiver<TaskCompletion>,
    trust: Arc<TrustStore>,
    logger: Logger,
    notes: HashMap<String, String>,
    pending_edit: Option<ExternalEdit>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, trust: TrustStore, logger: Logger) -> Self {
        let ctx = ScreenContext::new(
            config.effective_theme(),
            IconService::new(config.icon_theme()),
            config.ui.show_icons,
        );
        let (task_manager, completions) = TaskManager::new();

        Self {
            config,
            screens: ScreenManager::new(ctx),
            task_manager,
            completions,
            trust: Arc::new(trust),
            logger,
            notes: HashMap::new(),
            pending_edit: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn screens(&self) -> &ScreenManager {
        &self.screens
    }

    pub fn screens_mut(&mut self) -> &mut ScreenManager {
        &mut self.screens
    }

    pub fn note(&self, target: &str) -> Option<&str> {
        self.notes.get(target).map(String::as_str)
    }

    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    fn ctx(&self) -> ScreenContext {
        self.screens.context().clone()
    }

    /// Route a key to the active screen, or to the base view when none is open
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.screens.is_active() {
            if let Some(dispatch) = self.screens.handle_key(key) {
                self.apply(dispatch.owner, dispatch.action);
            }
            self.cancel_retired();
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('p') | KeyCode::Char(':') => self.open_palette(),
            KeyCode::Char('?') => self.run_command("help"),
            KeyCode::Char('n') => self.run_command("note"),
            KeyCode::Char('v') => self.run_command("view-note"),
            KeyCode::Char('w') => self.run_command("worktree-name"),
            KeyCode::Char('t') => self.run_command("trust"),
            KeyCode::Char('L') => self.run_command("logs"),
            KeyCode::Esc => self.screens.clear_status(),
            _ => {}
        }
    }

    pub fn tick(&mut self) {
        self.screens.tick();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screens.resize(width, height);
    }

    /// Deliver finished background commands to the screen manager
    pub fn process_completions(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.task_manager.finish(completion.id);
            log::debug!("Task {} finished: {}", completion.id, completion.description);
            if self.screens.complete(completion.owner, completion.result) {
                delivered += 1;
            }
        }
        self.cancel_retired();
        delivered
    }

    /// Abort background work owned by screens that have closed
    fn cancel_retired(&mut self) {
        for token in self.screens.take_retired() {
            let cancelled = self.task_manager.cancel_owned_by(token);
            if cancelled > 0 {
                log::info!("Cancelled {} task(s) owned by screen {}", cancelled, token);
            }
        }
    }

    /// Execute an action emitted by a screen
    pub fn apply(&mut self, owner: Option<ScreenToken>, action: Action) {
        if !action.is_none() {
            log::debug!("Applying action: {}", action.describe());
        }

        match action {
            Action::RunCommand(id) => self.run_command(&id),
            Action::ApplyChecklist { target, checked } => self.apply_checklist(owner, &target, checked),
            Action::SaveText { target, value } => {
                self.screens.set_status(format!("Saved {}", target));
                self.notes.insert(target, value);
            }
            Action::EditExternal { target, value } => {
                self.pending_edit = Some(ExternalEdit { target, value });
            }
            Action::EditInline { target } => self.open_note_editor(&target),
            Action::TrustFile(path) => self.trust_file(owner, path),
            Action::ShowStatus(message) => self.screens.set_status(message),
            Action::Batch(actions) => {
                for action in actions {
                    self.apply(owner, action);
                }
            }
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
    }

    /// Pending external edit, if a screen asked for one
    pub fn take_external_edit(&mut self) -> Option<ExternalEdit> {
        self.pending_edit.take()
    }

    /// Store the text returned by the external editor
    pub fn finish_external_edit(&mut self, target: String, result: anyhow::Result<String>) {
        match result {
            Ok(value) => self.apply(None, Action::SaveText { target, value }),
            Err(e) => {
                log::error!("External editor failed: {:#}", e);
                self.screens.set_status(format!("Error: {:#}", e));
            }
        }
    }

    fn run_command(&mut self, id: &str) {
        match id {
            "help" => self.open_help(),
            "logs" => self.open_logs(),
            "note" => self.open_note_editor(SCRATCH_NOTE),
            "view-note" => self.open_note_view(SCRATCH_NOTE),
            "worktree-name" => self.open_worktree_namer(),
            "trust" => self.open_trust_checklist(),
            "fetch" => self.run_git(&["fetch", "--all", "--prune"], "Fetching remotes", "fetch"),
            "pull" => self.run_git(&["pull", "--ff-only"], "Updating from upstream", "sync"),
            "push" => self.run_git(&["push"], "Pushing to upstream", "push"),
            "quit" => self.should_quit = true,
            other => {
                log::warn!("Unknown command: {}", other);
                self.screens.set_status(format!("Unknown command: {}", other));
            }
        }
    }

    fn open_palette(&mut self) {
        let palette = PaletteScreen::new(palette_items(), self.ctx()).on_select(|id| Action::RunCommand(id.to_string()));
        self.screens.open(palette);
    }

    fn open_help(&mut self) {
        let mut text = String::from(
            "Keys\n\
             \n\
             p, :  command palette\n\
             n     edit the scratch note\n\
             v     view the scratch note\n\
             w     build a worktree name\n\
             t     trust local files\n\
             L     recent log lines\n\
             q     quit\n\
             \n\
             Tips\n\
             \n",
        );
        text.push_str(&help_lines().join("\n"));
        self.screens.open(NoteViewScreen::new("Help", text, self.ctx()));
    }

    fn open_logs(&mut self) {
        let logs = self.logger.get_logs();
        let text = if logs.is_empty() {
            "No log entries yet.".to_string()
        } else {
            logs.join("\n")
        };
        self.screens.open(NoteViewScreen::new("Logs", text, self.ctx()));
    }

    fn open_note_editor(&mut self, target: &str) {
        let value = self.notes.get(target).cloned().unwrap_or_default();
        let submit_target = target.to_string();
        let external_target = target.to_string();
        let screen = TextareaScreen::new("Note", format!("Note for {}", target), &value, self.ctx())
            .with_placeholder("Write a note...")
            .on_submit(move |value| {
                Ok(Action::SaveText {
                    target: submit_target.clone(),
                    value: value.trim_end().to_string(),
                })
            })
            .on_edit_external(move |value| Action::EditExternal {
                target: external_target.clone(),
                value: value.to_string(),
            })
            .on_cancel(|| Action::ShowStatus("Edit cancelled".to_string()));
        self.screens.open(screen);
    }

    fn open_note_view(&mut self, target: &str) {
        let Some(value) = self.notes.get(target).cloned() else {
            self.screens.set_status(format!("No note for {}", target));
            return;
        };
        let inline_target = target.to_string();
        let external_target = target.to_string();
        let external_value = value.clone();
        let screen = NoteViewScreen::new(format!("Note: {}", target), value, self.ctx())
            .on_edit(move || Action::EditInline {
                target: inline_target.clone(),
            })
            .on_edit_external(move || Action::EditExternal {
                target: external_target.clone(),
                value: external_value.clone(),
            });
        self.screens.open(screen);
    }

    fn open_worktree_namer(&mut self) {
        let template = self.config.worktree.pr_template.clone();
        let max_len = self.config.worktree.max_name_length;
        let screen = TextareaScreen::new("Worktree name", "PR number and title, e.g. 42 Fix login", "", self.ctx())
            .validate(|value| {
                if value.trim().is_empty() {
                    "Enter a PR number and title".to_string()
                } else {
                    String::new()
                }
            })
            .on_submit(move |value| {
                let pr = parse_pr_input(value)?;
                let generated = sanitize_branch_name(&pr.title, max_len);
                let name = generate_pr_worktree_name(&pr, &template, &generated);
                Ok(Action::ShowStatus(format!("Worktree name: {}", name)))
            });
        self.screens.open(screen);
    }

    fn open_trust_checklist(&mut self) {
        let items: Vec<ChecklistItem> = TRUST_CANDIDATES
            .iter()
            .filter_map(|name| {
                let path = PathBuf::from(name);
                match self.trust.check_trust(&path) {
                    TrustStatus::NotFound => None,
                    status => Some(ChecklistItem::new(*name, *name).checked(status == TrustStatus::Trusted)),
                }
            })
            .collect();

        if items.is_empty() {
            self.screens.set_status("No local files to trust");
            return;
        }

        let screen = ChecklistScreen::new(items, "Trust files", self.ctx())
            .with_empty_text("No matching files")
            .on_close(|checked| Action::ApplyChecklist {
                target: "trust".to_string(),
                checked,
            });
        self.screens.open(screen);
    }

    fn apply_checklist(&mut self, owner: Option<ScreenToken>, target: &str, checked: Vec<String>) {
        match target {
            "trust" => {
                let pending: Vec<Action> = checked
                    .into_iter()
                    .filter(|name| self.trust.check_trust(name) != TrustStatus::Trusted)
                    .map(|name| Action::TrustFile(PathBuf::from(name)))
                    .collect();
                if pending.is_empty() {
                    self.screens.set_status("Nothing new to trust");
                } else {
                    self.apply(owner, Action::Batch(pending));
                }
            }
            other => {
                self.screens
                    .set_status(format!("{} item(s) selected for {}", checked.len(), other));
            }
        }
    }

    fn trust_file(&mut self, owner: Option<ScreenToken>, path: PathBuf) {
        let trust = Arc::clone(&self.trust);
        let description = format!("trust {}", path.display());
        self.task_manager.spawn(owner, description, async move {
            let shown = path.display().to_string();
            tokio::task::spawn_blocking(move || trust.trust_file(&path))
                .await
                .context("Trust task panicked")?
                .with_context(|| format!("Failed to trust {}", shown))?;
            Ok(CommandOutcome::status(format!("Trusted {}", shown)))
        });
    }

    /// Run git in the background behind a loading overlay owned by the task
    fn run_git(&mut self, args: &[&str], message: &str, operation: &str) {
        let token = self.screens.show_loading(message, operation);
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        let description = format!("git {}", args.join(" "));
        let done = format!("{} done", message);

        self.task_manager.spawn(Some(token), description.clone(), async move {
            let output = tokio::process::Command::new("git")
                .args(&args)
                .output()
                .await
                .context("Failed to run git")?;
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                anyhow::bail!("{} failed: {}", description, stderr.trim());
            }
            Ok(CommandOutcome {
                close: true,
                status: Some(done),
            })
        });
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let ctx = self.screens.context();
        let theme = &ctx.theme;
        let (body, status_area) = LayoutManager::main_layout(area);

        let title = ctx.icons.label_with_icon(UiIcon::WorktreeActions, "lazyworktree", ctx.show_icons);
        let mut lines = vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("theme {} • icons {}", self.config.ui.theme, self.config.ui.icons),
                Style::default().fg(theme.muted_fg),
            )),
        ];
        if let Some(note) = self.notes.get(SCRATCH_NOTE) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                note.lines().next().unwrap_or_default().to_string(),
                Style::default().fg(theme.text_fg),
            )));
        }
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme.background)),
            body,
        );

        let status = match self.screens.status() {
            Some(message) => Span::styled(message.to_string(), Style::default().fg(theme.warn_fg)),
            None => Span::styled(BASE_HINTS, Style::default().fg(theme.muted_fg)),
        };
        let mut spans = vec![Span::raw(" "), status];
        let tasks = self.task_manager.task_count();
        if tasks > 0 {
            spans.push(Span::styled(
                format!("  [{} running]", tasks),
                Style::default().fg(theme.cyan),
            ));
        }
        f.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.border_dim)),
            status_area,
        );

        self.screens.render(f, area);
    }
}

/// `"42 Fix login"` or `"#42 Fix login"`
fn parse_pr_input(value: &str) -> Result<PrInfo, String> {
    let value = value.trim();
    let (number, title) = value.split_once(char::is_whitespace).unwrap_or((value, ""));
    let number = number
        .trim_start_matches('#')
        .parse()
        .map_err(|_| format!("'{}' is not a PR number", number))?;
    let title = title.trim();
    if title.is_empty() {
        return Err("A title is required after the PR number".to_string());
    }
    Ok(PrInfo {
        number,
        title: title.to_string(),
        author: String::new(),
    })
}

fn palette_items() -> Vec<PaletteItem> {
    vec![
        PaletteItem::section("Worktree").with_icon(UiIcon::WorktreeActions),
        PaletteItem::new("worktree-name", "Name a worktree", "Build a worktree name from a PR")
            .with_icon(UiIcon::BranchNaming)
            .with_shortcut("w"),
        PaletteItem::new("note", "Edit note", "Write the scratch note").with_shortcut("n"),
        PaletteItem::new("view-note", "View note", "Read the scratch note").with_shortcut("v"),
        PaletteItem::section("Repository").with_icon(UiIcon::RepoOps),
        PaletteItem::new("fetch", "Fetch remotes", "git fetch --all --prune").with_icon(UiIcon::BackgroundRefresh),
        PaletteItem::new("pull", "Pull", "Fast-forward from upstream"),
        PaletteItem::new("push", "Push", "Push the current branch"),
        PaletteItem::section("Security").with_icon(UiIcon::Configuration),
        PaletteItem::new("trust", "Trust files", "Approve local config files").with_shortcut("t"),
        PaletteItem::section("General").with_icon(UiIcon::HelpTitle),
        PaletteItem::new("help", "Help", "Keys and tips").with_shortcut("?"),
        PaletteItem::new("logs", "Logs", "Recent log lines").with_shortcut("L"),
        PaletteItem::new("quit", "Quit", "Exit lazyworktree").with_shortcut("q"),
    ]
}
