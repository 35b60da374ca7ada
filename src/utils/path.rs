//! Path expansion and normalisation.

use crate::constants::APP_NAME;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Per-user data directory: `$XDG_DATA_HOME/lazyworktree` when the variable is
/// set and non-empty, `~/.local/share/lazyworktree` otherwise
#[must_use]
pub fn app_data_dir() -> PathBuf {
    app_data_dir_from(std::env::var_os("XDG_DATA_HOME"), dirs::home_dir())
}

/// [`app_data_dir`] with the environment supplied by the caller
#[must_use]
pub fn app_data_dir_from(xdg_data_home: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    let data_home = match xdg_data_home {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home.unwrap_or_default().join(".local").join("share"),
    };
    data_home.join(APP_NAME)
}

/// Expand a leading `~` to the home directory and `$VAR` / `${VAR}`
/// references to their environment values. Unset variables expand to
/// nothing.
pub fn expand_path(path: &str) -> Result<String> {
    let path = match path.strip_prefix('~') {
        Some(rest) => {
            let home = dirs::home_dir().context("Could not determine home directory")?;
            let rest = rest.trim_start_matches('/');
            if rest.is_empty() {
                home.to_string_lossy().into_owned()
            } else {
                home.join(rest).to_string_lossy().into_owned()
            }
        }
        None => path.to_string(),
    };
    Ok(expand_env(&path, |name| std::env::var(name).ok()))
}

/// Replace `$VAR` and `${VAR}` using `lookup`.
///
/// A `$` not followed by a variable name is kept as-is.
pub fn expand_env(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                rest = &braced[end + 1..];
                continue;
            }
        }

        let len = after
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
            .map_or(after.len(), |(i, _)| i);
        if len == 0 {
            out.push('$');
        } else {
            out.push_str(&lookup(&after[..len]).unwrap_or_default());
        }
        rest = &after[len..];
    }

    out.push_str(rest);
    out
}

/// Absolute form of `path` relative to the current directory, with `.` and
/// `..` removed lexically. Symlinks are not followed.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&joined))
}

/// Lexically clean a path
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
