#![allow(missing_docs)]
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

/// A CSS transition the code must wait out before touching the DOM
/// again. Durations live here as named configuration instead of bare
/// milliseconds at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration_ms: i32,
}

impl Transition {
    /// Dropdown menus fade out before they can be display-hidden.
    pub const DROPDOWN_CLOSE: Transition = Transition { duration_ms: 200 };
    /// Default settle time for nav list geometry changes.
    pub const HIGHLIGHT: Transition = Transition { duration_ms: 300 };
    /// Hand-off to the parent entry when a group collapses over its
    /// active child.
    pub const HIGHLIGHT_HANDOFF: Transition = Transition { duration_ms: 50 };
    /// Sub-list expansion is the slowest transition in the nav.
    pub const HIGHLIGHT_EXPAND: Transition = Transition { duration_ms: 400 };

    /// Run `callback` once the transition's nominal duration has
    /// elapsed.
    pub fn after<F: FnOnce() + 'static>(self, callback: F) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(callback);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            self.duration_ms,
        );
    }
}
