//! Ref-name namespaces, parsing, and git-style validation.
//!
//! Full ref names are path-like: `refs/heads/main` for local branches,
//! `refs/remotes/origin/main` for remote-tracking branches. The short
//! display form strips the namespace prefix; for remote branches the first
//! segment of the short form is the remote name.

use crate::error::{RefError, RefResult};

/// Namespace prefix for local branches.
pub const LOCAL_NAMESPACE: &str = "refs/heads/";

/// Namespace prefix for remote-tracking branches.
pub const REMOTE_NAMESPACE: &str = "refs/remotes/";

/// Characters that are forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

/// Returns `true` if the full ref name lives under the remote namespace.
pub fn is_remote_name(full: &str) -> bool {
    full.starts_with(REMOTE_NAMESPACE)
}

/// The short display form of a full ref name: the name with its namespace
/// prefix stripped. Names outside both namespaces are returned unchanged.
pub fn short_name(full: &str) -> &str {
    full.strip_prefix(LOCAL_NAMESPACE)
        .or_else(|| full.strip_prefix(REMOTE_NAMESPACE))
        .unwrap_or(full)
}

/// Split the short display form of a remote branch into (remote, branch).
///
/// Returns `None` when there is no `/` or the `/` is the first character,
/// since neither yields a usable remote segment.
pub fn split_remote(short: &str) -> Option<(&str, &str)> {
    let idx = short.find('/')?;
    if idx == 0 {
        return None;
    }
    Some((&short[..idx], &short[idx + 1..]))
}

/// Validate a branch name (the short form, without namespace prefix).
///
/// Follows git-style naming conventions: non-empty, no forbidden characters,
/// no `..` or `@{`, no leading/trailing `.` or `/`, no `.lock` suffix, no
/// empty or dot-leading path components.
pub fn validate_branch_name(name: &str) -> RefResult<()> {
    let reject = |reason: String| {
        Err(RefError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return reject("name must not be empty".into());
    }
    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return reject(format!("contains forbidden character: {ch:?}"));
    }
    if name.contains("..") {
        return reject("must not contain '..'".into());
    }
    if name.contains("@{") {
        return reject("must not contain '@{'".into());
    }
    if name.starts_with('/') || name.ends_with('/') {
        return reject("must not start or end with '/'".into());
    }
    if name.ends_with('.') {
        return reject("must not end with '.'".into());
    }
    if name.ends_with(".lock") {
        return reject("must not end with '.lock'".into());
    }
    for component in name.split('/') {
        if component.is_empty() {
            return reject("path components must not be empty".into());
        }
        if component.starts_with('.') {
            return reject(format!("component must not start with '.': {component:?}"));
        }
    }

    Ok(())
}
