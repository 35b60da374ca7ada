use lazyworktree::utils::worktree::{
    apply_template, generate_issue_worktree_name, generate_pr_worktree_name, sanitize_branch_name, IssueInfo, PrInfo,
};
use proptest::prelude::*;

fn pr() -> PrInfo {
    PrInfo {
        number: 123,
        title: "Fix: Login bug (urgent)".to_string(),
        author: "Jane.Doe".to_string(),
    }
}

#[test]
fn test_template_truncation() {
    let title = "a".repeat(150);
    let name = apply_template("x{title}", &[("{title}", title.as_str())]);
    assert_eq!(name.chars().count(), 100);
    assert!(name.starts_with("xaaa"));
    assert!(!name.ends_with('-'));
}

#[test]
fn test_truncation_retrims_dash() {
    let value = format!("{}-tail", "b".repeat(99));
    let name = apply_template("{v}", &[("{v}", value.as_str())]);
    assert_eq!(name, "b".repeat(99));
}

#[test]
fn test_pr_placeholders() {
    assert_eq!(generate_pr_worktree_name(&pr(), "pr-{number}-{title}", ""), "pr-123-fix-login-bug-urgent");
    assert_eq!(generate_pr_worktree_name(&pr(), "{pr_author}/{number}", ""), "jane-doe/123");
    assert_eq!(
        generate_pr_worktree_name(&pr(), "pr-{number}-{generated}", "Session Cookie Fix"),
        "pr-123-session-cookie-fix"
    );
    assert_eq!(
        generate_pr_worktree_name(&pr(), "pr-{number}-{generated}", ""),
        "pr-123-fix-login-bug-urgent"
    );
}

#[test]
fn test_issue_placeholders() {
    let issue = IssueInfo {
        number: 7,
        title: "Crash on start!".to_string(),
    };
    assert_eq!(generate_issue_worktree_name(&issue, "issue-{number}-{title}", ""), "issue-7-crash-on-start");
    // The author placeholder does not apply to issues
    assert_eq!(generate_issue_worktree_name(&issue, "{number}-{pr_author}", ""), "7-{pr_author}");
}

#[test]
fn test_empty_title_trims_trailing_dash() {
    let empty = PrInfo {
        number: 5,
        title: "!!!".to_string(),
        author: String::new(),
    };
    assert_eq!(generate_pr_worktree_name(&empty, "pr-{number}-{title}", ""), "pr-5");
}

proptest! {
    #[test]
    fn prop_sanitize_is_idempotent(s in ".{0,80}", n in 0usize..40) {
        let once = sanitize_branch_name(&s, n);
        prop_assert_eq!(sanitize_branch_name(&once, n), once.clone());
        prop_assert!(!once.starts_with('-'));
        prop_assert!(!once.ends_with('-'));
        if n > 0 {
            prop_assert!(once.len() <= n);
        }
    }

    #[test]
    fn prop_template_output_is_bounded(template in "[a-z{}-]{0,20}(\\{title\\})?[a-z-]{0,10}", title in ".{0,200}") {
        let name = apply_template(&template, &[("{title}", title.as_str())]);
        prop_assert!(name.chars().count() <= 100);
        prop_assert!(!name.ends_with('-'));
    }
}
