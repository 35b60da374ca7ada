#[path = "utils/path.rs"]
mod path;

#[path = "utils/text.rs"]
mod text;

#[path = "utils/worktree.rs"]
mod worktree;
