use std::path::PathBuf;

/// Outbound command emitted by a screen for the host to run.
///
/// Actions are plain data so the host can log, route and cancel them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Action {
    /// Run a palette command by id
    RunCommand(String),
    /// Persist the checked ids of a checklist
    ApplyChecklist { target: String, checked: Vec<String> },
    /// Save edited text for a target such as a worktree note
    SaveText { target: String, value: String },
    /// Hand text to the external editor
    EditExternal { target: String, value: String },
    /// Reopen a target for inline editing
    EditInline { target: String },
    /// Record a file as trusted
    TrustFile(PathBuf),
    /// Show a message on the status line
    ShowStatus(String),
    /// Run several actions in order
    Batch(Vec<Action>),

    // App control
    Quit,
    #[default]
    None,
}

impl Action {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Short label used in log lines
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::RunCommand(id) => format!("run command '{}'", id),
            Self::ApplyChecklist { target, checked } => {
                format!("apply {} checked item(s) to {}", checked.len(), target)
            }
            Self::SaveText { target, .. } => format!("save text for {}", target),
            Self::EditExternal { target, .. } => format!("edit {} externally", target),
            Self::EditInline { target } => format!("edit {}", target),
            Self::TrustFile(path) => format!("trust {}", path.display()),
            Self::ShowStatus(_) => "status".to_string(),
            Self::Batch(actions) => format!("batch of {}", actions.len()),
            Self::Quit => "quit".to_string(),
            Self::None => "none".to_string(),
        }
    }
}
