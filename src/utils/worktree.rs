//! Worktree names derived from pull requests and issues.

use crate::constants::MAX_WORKTREE_NAME_LEN;

/// Pull request fields used by name templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrInfo {
    pub number: u64,
    pub title: String,
    pub author: String,
}

/// Issue fields used by name templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueInfo {
    pub number: u64,
    pub title: String,
}

/// Lowercase `name` and collapse every run of non-alphanumeric characters
/// into a single `-`, with no leading or trailing `-`.
///
/// A non-zero `max_len` truncates the result, after which trailing `-` are
/// trimmed again.
#[must_use]
pub fn sanitize_branch_name(name: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }

    let mut out = out.trim_end_matches('-').to_string();
    if max_len > 0 && out.len() > max_len {
        out.truncate(max_len);
        out.truncate(out.trim_end_matches('-').len());
    }
    out
}

/// Substitute `{placeholder}` tokens in a single left-to-right pass.
///
/// Substituted values are never rescanned. The result has trailing `-`
/// removed and is capped at 100 characters.
#[must_use]
pub fn apply_template(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut name = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        name.push_str(&rest[..start]);
        let tail = &rest[start..];
        match replacements.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                name.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                name.push('{');
                rest = &tail[1..];
            }
        }
    }
    name.push_str(rest);

    let name = name.trim_end_matches('-');
    if name.chars().count() > MAX_WORKTREE_NAME_LEN {
        let truncated: String = name.chars().take(MAX_WORKTREE_NAME_LEN).collect();
        truncated.trim_end_matches('-').to_string()
    } else {
        name.to_string()
    }
}

fn generated_or(title: &str, generated_title: &str) -> String {
    if generated_title.is_empty() {
        title.to_string()
    } else {
        sanitize_branch_name(generated_title, 0)
    }
}

/// Name for a worktree created from a pull request.
///
/// Placeholders: `{number}`, `{title}`, `{generated}`, `{pr_author}`.
#[must_use]
pub fn generate_pr_worktree_name(pr: &PrInfo, template: &str, generated_title: &str) -> String {
    let number = pr.number.to_string();
    let title = sanitize_branch_name(&pr.title, 0);
    let generated = generated_or(&title, generated_title);
    let author = sanitize_branch_name(&pr.author, 0);

    apply_template(
        template,
        &[
            ("{number}", number.as_str()),
            ("{title}", title.as_str()),
            ("{generated}", generated.as_str()),
            ("{pr_author}", author.as_str()),
        ],
    )
}

/// Name for a worktree created from an issue.
///
/// Placeholders: `{number}`, `{title}`, `{generated}`.
#[must_use]
pub fn generate_issue_worktree_name(issue: &IssueInfo, template: &str, generated_title: &str) -> String {
    let number = issue.number.to_string();
    let title = sanitize_branch_name(&issue.title, 0);
    let generated = generated_or(&title, generated_title);

    apply_template(
        template,
        &[("{number}", number.as_str()), ("{title}", title.as_str()), ("{generated}", generated.as_str())],
    )
}
