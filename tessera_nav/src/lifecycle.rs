#![allow(missing_docs)]
//! Component lifecycle registry.
//!
//! Every document- or window-level listener and every per-container
//! widget bind is keyed through this registry, so that re-binding
//! after a content swap is an explicit operation instead of an
//! implicit dataset flag scattered across binders.

use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    static BOUND: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Well-known registry keys owned by the composition root.
pub mod keys {
    pub const NAVIGATOR_DOCUMENT: &str = "navigator.document";
    pub const DROPDOWN_DOCUMENT: &str = "dropdown.document";
    pub const SIDEBAR_PANEL: &str = "sidebar.panel";
    pub const SIDEBAR_WINDOW: &str = "sidebar.window";
    pub const SIDEBAR_MOBILE_TOGGLE: &str = "sidebar.mobile-toggle";
    pub const EDITOR: &str = "editor.textarea";
    pub const SHELL_CONTENT_REPLACED: &str = "shell.content-replaced";
}

/// Run `bind` unless `key` is already bound. Returns whether it ran.
pub fn bind_once(key: &str, bind: impl FnOnce()) -> bool {
    let fresh = BOUND.with(|bound| bound.borrow_mut().insert(key.to_owned()));
    if fresh {
        bind();
    }
    fresh
}

/// Forget a binding so the next `bind_once` for `key` runs again.
/// Returns whether the key was bound.
pub fn release(key: &str) -> bool {
    BOUND.with(|bound| bound.borrow_mut().remove(key))
}

/// Release then bind: the re-binding entry point used after a swap.
pub fn rebind(key: &str, bind: impl FnOnce()) {
    release(key);
    bind_once(key, bind);
}

pub fn is_bound(key: &str) -> bool {
    BOUND.with(|bound| bound.borrow().contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_once_runs_exactly_once() {
        let mut runs = 0;
        assert!(bind_once("test.once", || runs += 1));
        assert!(!bind_once("test.once", || runs += 1));
        assert_eq!(runs, 1);
        assert!(is_bound("test.once"));
    }

    #[test]
    fn release_allows_binding_again() {
        let mut runs = 0;
        bind_once("test.release", || runs += 1);
        assert!(release("test.release"));
        assert!(!is_bound("test.release"));
        assert!(!release("test.release"));
        bind_once("test.release", || runs += 1);
        assert_eq!(runs, 2);
    }

    #[test]
    fn rebind_always_runs() {
        let mut runs = 0;
        rebind("test.rebind", || runs += 1);
        rebind("test.rebind", || runs += 1);
        assert_eq!(runs, 2);
        assert!(is_bound("test.rebind"));
    }
}
