#![allow(missing_docs)]

use std::sync::atomic::{AtomicU64, Ordering};

// Monotonic token arbitrating overlapping navigation requests: the
// last token issued is the only one allowed to mutate the document.
static NAV_TOKEN: AtomicU64 = AtomicU64::new(0);

pub fn next_nav_token() -> u64 {
    NAV_TOKEN.fetch_add(1, Ordering::SeqCst) + 1
}

pub fn current_nav_token() -> u64 {
    NAV_TOKEN.load(Ordering::SeqCst)
}

pub fn reset_nav_token(value: Option<u64>) {
    NAV_TOKEN.store(value.unwrap_or(0), Ordering::SeqCst);
}

/// Final non-empty segment of a path, with any query or fragment part
/// stripped. Returns `None` for empty and root-like paths so the
/// caller can substitute its default document.
pub fn leaf_segment(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.rsplit('/').next() {
        None | Some("") => None,
        Some(segment) => Some(segment),
    }
}

/// Whether a nav entry's href points at `target`: an exact match, or a
/// longer path whose final segment is `target`.
pub fn matches_target(href: &str, target: &str) -> bool {
    if href.is_empty() || target.is_empty() {
        return false;
    }
    if href == target {
        return true;
    }
    match href.strip_suffix(target) {
        Some(prefix) => prefix.ends_with('/'),
        None => false,
    }
}

/// Whether an anchor href is an in-app destination worth intercepting:
/// non-empty, not a bare fragment, not absolute, not a script URL.
pub fn is_internal_href(href: &str) -> bool {
    !href.is_empty()
        && href != "#"
        && !href.starts_with("http")
        && !href.starts_with("javascript:")
}

/// Position of `value` inside `[min, max]` as a percentage, clamped to
/// `[0, 100]`. Degenerate or non-finite inputs resolve to zero.
pub fn percent_between(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() || !(max > min) {
        return 0.0;
    }
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}
