//! Path helpers for stored urls.
//!
//! Three shapes of path show up in the detail bag:
//!
//! - absolute: rooted at the server, `/app/news/page`
//! - app-relative: rooted at the application, `~/news/page`
//! - anything else (`news/page`, `https://...`), which is left alone
use crate::errors::DetailError;
use regex::Regex;
use std::sync::OnceLock;

const APP_RELATIVE_PREFIX: &str = "~/";

fn app_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/[^\s?#]*$").expect("app path pattern compiles")
    })
}

/// Rooted at the server. Protocol-relative urls (`//host/...`) are not.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}

pub fn is_app_relative(path: &str) -> bool {
    path == "~" || path.starts_with(APP_RELATIVE_PREFIX)
}

/// An application root must be a rooted path with no query or fragment.
pub fn validate_app_path(app_path: &str) -> Result<&str, DetailError> {
    if app_path_pattern().is_match(app_path) && !app_path.starts_with("//")
    {
        Ok(app_path)
    } else {
        Err(DetailError::InvalidPath(app_path.to_string()))
    }
}

fn trim_root(app_path: &str) -> &str {
    app_path.trim_end_matches('/')
}

/// The part of `path` after `app_path`, if `path` lives under it. The match
/// only counts on a segment boundary, so `/app/older` is not under
/// `/app/old`.
fn strip_root<'a>(path: &'a str, app_path: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(trim_root(app_path))?;
    match rest.chars().next() {
        None | Some('/') | Some('?') | Some('#') => Some(rest),
        _ => None,
    }
}

fn join_root(app_path: &str, rest: &str) -> String {
    let joined = format!("{}{}", trim_root(app_path), rest);
    if joined.starts_with('/') {
        joined
    } else {
        format!("/{joined}")
    }
}

/// `/app/news` under application `/app` becomes `~/news`. Paths that are
/// not absolute, or not under the application, come back unchanged.
pub fn to_relative(path: &str, app_path: &str) -> String {
    if !is_absolute(path) {
        return path.to_string();
    }
    match strip_root(path, app_path) {
        Some(rest) => format!(
            "{APP_RELATIVE_PREFIX}{}",
            rest.strip_prefix('/').unwrap_or(rest)
        ),
        None => path.to_string(),
    }
}

/// The inverse of `to_relative`: `~/news` under application `/app` becomes
/// `/app/news`.
pub fn to_absolute(path: &str, app_path: &str) -> String {
    if path == "~" {
        return join_root(app_path, "/");
    }
    match path.strip_prefix(APP_RELATIVE_PREFIX) {
        Some(rest) => join_root(app_path, &format!("/{rest}")),
        None => path.to_string(),
    }
}

/// Move an absolute path from one application root to another, keeping
/// everything past the root. Relative paths are root-independent and are
/// returned unchanged, as are absolute paths outside `from_app_path`.
///
/// There is no memory of earlier calls: rebasing twice with a pair where
/// `to_app_path` lives under `from_app_path` rewrites twice.
pub fn rebase(
    current_path: &str,
    from_app_path: &str,
    to_app_path: &str,
) -> Result<String, DetailError> {
    validate_app_path(from_app_path)?;
    validate_app_path(to_app_path)?;

    if !is_absolute(current_path) {
        return Ok(current_path.to_string());
    }
    Ok(match strip_root(current_path, from_app_path) {
        Some(rest) => join_root(to_app_path, rest),
        None => current_path.to_string(),
    })
}
