//! Contextual tips shown by the loading overlay and the help screen.

use std::fmt;

/// Area of functionality a tip belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipCategory {
    Navigation,
    Worktree,
    Repo,
    Tools,
    Tips,
}

/// Background operation a tip is relevant to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TipOperation {
    #[default]
    General,
    Create,
    Refresh,
    Fetch,
    Sync,
    Push,
    Rerun,
    Command,
}

impl TipOperation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Create => "create",
            Self::Refresh => "refresh",
            Self::Fetch => "fetch",
            Self::Sync => "sync",
            Self::Push => "push",
            Self::Rerun => "rerun",
            Self::Command => "command",
        }
    }

    /// Operations the host names explicitly instead of describing them
    fn from_explicit_name(name: &str) -> Option<Self> {
        match name {
            "push" => Some(Self::Push),
            "sync" => Some(Self::Sync),
            "rerun" => Some(Self::Rerun),
            _ => None,
        }
    }
}

impl fmt::Display for TipOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tip {
    pub id: &'static str,
    pub text: &'static str,
    pub category: TipCategory,
    pub operations: &'static [TipOperation],
    pub priority: i32,
    pub show_in_help: bool,
}

impl Tip {
    #[must_use]
    pub fn applies_to(&self, operation: TipOperation) -> bool {
        self.operations.contains(&operation)
    }
}

use TipCategory as C;
use TipOperation as O;

/// Built-in tip catalogue, in declaration order
pub static LOADING_TIPS: &[Tip] = &[
    Tip {
        id: "help",
        text: "Press '?' to open the help guide at any time.",
        category: C::Tips,
        operations: &[O::General],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "search",
        text: "Use '/' for incremental search in the focused pane.",
        category: C::Navigation,
        operations: &[O::General, O::Refresh],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "filter",
        text: "Press 'f' to filter the focused pane; press Esc to clear an active filter.",
        category: C::Navigation,
        operations: &[O::General, O::Refresh],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "create",
        text: "Press 'c' to create a worktree from a branch, PR/MR, issue, or custom flow.",
        category: C::Worktree,
        operations: &[O::General, O::Create],
        priority: 2,
        show_in_help: true,
    },
    Tip {
        id: "layout",
        text: "Press 'L' to toggle between default and top pane layouts.",
        category: C::Navigation,
        operations: &[O::General, O::Refresh],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "panes",
        text: "Use '1', '2', '3', '[', ']', or Tab to move between panes quickly.",
        category: C::Navigation,
        operations: &[O::General],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "zoom",
        text: "Press '=' to zoom the focused pane, then press '=' again to unzoom.",
        category: C::Navigation,
        operations: &[O::General],
        priority: 1,
        show_in_help: false,
    },
    Tip {
        id: "palette",
        text: "Press ':' or Ctrl+P to open the Command Palette, including active tmux and zellij sessions.",
        category: C::Tools,
        operations: &[O::General, O::Command],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "notes",
        text: "Press 'i' to open worktree notes; existing notes open in the viewer first.",
        category: C::Worktree,
        operations: &[O::General, O::Create],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "taskboard",
        text: "Press 'T' to open Taskboard and toggle markdown checkbox tasks across worktrees.",
        category: C::Worktree,
        operations: &[O::General, O::Create],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "sync",
        text: "Use 'S' to synchronise with upstream (pull then push) when the worktree is clean.",
        category: C::Repo,
        operations: &[O::General, O::Sync],
        priority: 2,
        show_in_help: true,
    },
    Tip {
        id: "push",
        text: "Use 'P' to push the current branch to its upstream; set upstream when prompted.",
        category: C::Repo,
        operations: &[O::General, O::Push],
        priority: 2,
        show_in_help: false,
    },
    Tip {
        id: "fetch",
        text: "Press 'R' to fetch all remotes and refresh upstream tracking information.",
        category: C::Repo,
        operations: &[O::General, O::Fetch],
        priority: 2,
        show_in_help: false,
    },
    Tip {
        id: "refresh",
        text: "Press 'r' to refresh worktrees and, on GitHub/GitLab, refresh PR and CI data.",
        category: C::Repo,
        operations: &[O::General, O::Refresh],
        priority: 2,
        show_in_help: false,
    },
    Tip {
        id: "ci",
        text: "Press 'v' to open CI checks, Enter to open a job, and Ctrl+v to view logs in the pager.",
        category: C::Repo,
        operations: &[O::General, O::Refresh, O::Rerun],
        priority: 2,
        show_in_help: true,
    },
    Tip {
        id: "status-jump",
        text: "In the Status pane, use Ctrl+Left and Ctrl+Right to jump between folders.",
        category: C::Navigation,
        operations: &[O::General, O::Refresh],
        priority: 1,
        show_in_help: true,
    },
    Tip {
        id: "run",
        text: "Press '!' to run a command in the selected worktree with command history support.",
        category: C::Tools,
        operations: &[O::General, O::Command],
        priority: 1,
        show_in_help: false,
    },
    Tip {
        id: "lazygit",
        text: "Press 'g' to open LazyGit in the selected worktree.",
        category: C::Tools,
        operations: &[O::General],
        priority: 1,
        show_in_help: false,
    },
    Tip {
        id: "jump",
        text: "Press Enter on a worktree to jump there and change directory via shell integration.",
        category: C::Worktree,
        operations: &[O::General, O::Create],
        priority: 1,
        show_in_help: false,
    },
];

/// Map the host's loading context to a tip operation.
///
/// The push, sync and rerun operation names are taken as-is; anything else is
/// classified by keywords in the message.
#[must_use]
pub fn operation_from_context(operation: &str, message: &str) -> TipOperation {
    if let Some(op) = TipOperation::from_explicit_name(&operation.trim().to_lowercase()) {
        return op;
    }

    let lower = message.to_lowercase();
    if lower.contains("refresh") {
        TipOperation::Refresh
    } else if lower.contains("fetch") {
        TipOperation::Fetch
    } else if lower.contains("push") {
        TipOperation::Push
    } else if lower.contains("sync") || lower.contains("synchron") || lower.contains("updating") {
        TipOperation::Sync
    } else if lower.contains("create") {
        TipOperation::Create
    } else if lower.contains("running") {
        TipOperation::Command
    } else {
        TipOperation::General
    }
}

/// Pick a tip from `tips` for `operation`, avoiding `previous_id` when another
/// candidate exists. Returns `None` only for an empty catalogue.
#[must_use]
pub fn select_tip_from<'a>(tips: &'a [Tip], operation: TipOperation, previous_id: &str) -> Option<&'a Tip> {
    let contextual: Vec<&Tip> = tips.iter().filter(|tip| tip.applies_to(operation)).collect();
    let mut pool = if contextual.is_empty() {
        tips.iter().collect()
    } else {
        contextual
    };

    if pool.len() > 1 && !previous_id.is_empty() {
        let filtered: Vec<&Tip> = pool.iter().copied().filter(|tip| tip.id != previous_id).collect();
        if !filtered.is_empty() {
            pool = filtered;
        }
    }

    if pool.is_empty() {
        return None;
    }
    Some(pool[fastrand::usize(..pool.len())])
}

/// Pick a tip from the built-in catalogue
#[must_use]
pub fn select_tip(operation: TipOperation, previous_id: &str) -> &'static Tip {
    select_tip_from(LOADING_TIPS, operation, previous_id).unwrap_or(&LOADING_TIPS[0])
}

/// Tips flagged for the help screen, in declaration order
#[must_use]
pub fn help_tips() -> Vec<&'static Tip> {
    LOADING_TIPS.iter().filter(|tip| tip.show_in_help).collect()
}

/// Help tips formatted as bullet lines
#[must_use]
pub fn help_lines() -> Vec<String> {
    help_tips().into_iter().map(|tip| format!("- {}", tip.text)).collect()
}

/// Remembers the last tip shown so consecutive overlays differ
#[derive(Debug, Clone, Default)]
pub struct TipMemory {
    last_tip_id: String,
}

impl TipMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_tip_id(&self) -> &str {
        &self.last_tip_id
    }

    /// Select a tip for `operation` and remember it
    pub fn next_tip(&mut self, operation: TipOperation) -> &'static Tip {
        let tip = select_tip(operation, &self.last_tip_id);
        self.last_tip_id = tip.id.to_string();
        tip
    }
}
