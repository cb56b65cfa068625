#![allow(missing_docs)]
//! Collapsible sidebar controller.
//!
//! Desktop behavior: the panel expands on hover and collapses on
//! leave, unless pinned. Pinning forces expansion and survives page
//! loads through client storage. Mobile behavior: pin and hover are
//! disabled; a dedicated header button toggles an overlay state that
//! a backdrop click or a completed navigation closes.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use tessera_nav::{active, dom, lifecycle, markup};

use crate::transition::Transition;

/// Viewport width at and below which the mobile layout applies.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Storage key for the persisted pinned flag.
pub const PINNED_STORAGE_KEY: &str = "sidebarPinned";

const SIDEBAR_SELECTOR: &str = ".chat-sidebar";
const TOGGLE_BTN_SELECTOR: &str = ".sidebar-toggle-btn";
const MOBILE_BTN_SELECTOR: &str = ".mobile-menu-btn";
const OVERLAY_SELECTOR: &str = ".sidebar-overlay";
const OVERLAY_CLASS: &str = "sidebar-overlay";
const GROUP_TOGGLE_SELECTOR: &str = ".nav-link-toggle";
const EXPANDED_GROUP_SELECTOR: &str = ".nav-item.expanded";

const PINNED_CLASS: &str = "pinned";
const EXPANDED_CLASS: &str = "is-expanded";
const MOBILE_OPEN_CLASS: &str = "mobile-open";
const LAYOUT_PINNED_CLASS: &str = "sidebar-pinned";
const OVERLAY_ACTIVE_CLASS: &str = "active";

/// Sidebar panel state. `pinned` persists across page loads; the
/// other flags are session-only and reset on viewport-class change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub pinned: bool,
    pub expanded: bool,
    pub mobile_open: bool,
}

impl SidebarState {
    /// Pinning forces expansion; unpinning collapses unless the
    /// pointer is currently over the panel. Ignored on mobile.
    pub fn set_pinned(&mut self, pinned: bool, pointer_over: bool, mobile: bool) {
        if mobile {
            return;
        }
        self.pinned = pinned;
        if pinned {
            self.expanded = true;
        } else if !pointer_over {
            self.expanded = false;
        }
    }

    /// Hover-driven expansion. Ignored on mobile.
    pub fn set_expanded(&mut self, expanded: bool, mobile: bool) {
        if mobile {
            return;
        }
        self.expanded = expanded;
    }

    /// A viewport-class change resets the desktop flags: mobile clears
    /// them unconditionally, desktop restores the persisted pin.
    pub fn handle_viewport_change(&mut self, mobile: bool, stored_pinned: bool) {
        if mobile {
            self.pinned = false;
            self.expanded = false;
        } else if stored_pinned {
            self.pinned = true;
            self.expanded = true;
        }
    }

    pub fn toggle_mobile(&mut self) {
        self.mobile_open = !self.mobile_open;
    }

    pub fn close_mobile(&mut self) {
        self.mobile_open = false;
    }
}

thread_local! {
    static STATE: RefCell<SidebarState> = RefCell::new(SidebarState::default());
}

fn with_state<R>(f: impl FnOnce(&mut SidebarState) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Bind the sidebar panel: hover, pin toggle, group toggles, overlay,
/// the window resize handler, and the initial restore from storage.
/// The panel lives in the sticky region, so this runs once at boot
/// (and again only if the panel itself is ever reloaded).
pub fn bind() {
    lifecycle::rebind(lifecycle::keys::SIDEBAR_PANEL, || {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(sidebar) = document.query_selector(SIDEBAR_SELECTOR).ok().flatten() else {
            return;
        };

        ensure_overlay(&document);
        bind_pin_toggle(&sidebar);
        bind_hover(&sidebar);
        bind_group_toggles(&sidebar);
        bind_resize();

        let snapshot = with_state(|state| {
            *state = SidebarState::default();
            state.handle_viewport_change(is_mobile(), stored_pinned());
            *state
        });
        reflect(&snapshot, &document, &sidebar);
    });
}

/// Bind the mobile menu button. The button lives in the header, which
/// is replaced by partial swaps, so the composition root re-invokes
/// this after every content replacement.
pub fn bind_mobile_toggle() {
    lifecycle::rebind(lifecycle::keys::SIDEBAR_MOBILE_TOGGLE, || {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(button) = document.query_selector(MOBILE_BTN_SELECTOR).ok().flatten() else {
            return;
        };
        let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            event.stop_propagation();
            let snapshot = with_state(|state| {
                state.toggle_mobile();
                *state
            });
            reflect_current(&snapshot);
        }) as Box<dyn FnMut(_)>);
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    });
}

/// Close the mobile overlay, e.g. after a completed navigation.
pub fn close_mobile() {
    let snapshot = with_state(|state| {
        state.close_mobile();
        *state
    });
    reflect_current(&snapshot);
}

/// Re-evaluate the viewport class and reflect the resulting state.
pub fn handle_viewport_change() {
    let snapshot = with_state(|state| {
        state.handle_viewport_change(is_mobile(), stored_pinned());
        *state
    });
    reflect_current(&snapshot);
}

fn bind_pin_toggle(sidebar: &web_sys::Element) {
    let Some(toggle) = sidebar.query_selector(TOGGLE_BTN_SELECTOR).ok().flatten() else {
        return;
    };
    let sidebar_el = sidebar.clone();
    let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        event.stop_propagation();
        let pinned = !with_state(|state| state.pinned);
        let pointer_over = sidebar_el.matches(":hover").unwrap_or(false);
        let snapshot = with_state(|state| {
            state.set_pinned(pinned, pointer_over, is_mobile());
            *state
        });
        persist_pinned(snapshot.pinned);
        reflect_current(&snapshot);
    }) as Box<dyn FnMut(_)>);
    let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn bind_hover(sidebar: &web_sys::Element) {
    let over = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if is_mobile() || with_state(|state| state.pinned) {
            return;
        }
        // Hovering the pin button itself must not flap the panel.
        if let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            && target.closest(TOGGLE_BTN_SELECTOR).ok().flatten().is_some()
        {
            return;
        }
        let snapshot = with_state(|state| {
            state.set_expanded(true, false);
            *state
        });
        reflect_current(&snapshot);
    }) as Box<dyn FnMut(_)>);
    let _ = sidebar.add_event_listener_with_callback("pointerover", over.as_ref().unchecked_ref());
    over.forget();

    let leave = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if is_mobile() || with_state(|state| state.pinned) {
            return;
        }
        let snapshot = with_state(|state| {
            state.set_expanded(false, false);
            *state
        });
        reflect_current(&snapshot);
    }) as Box<dyn FnMut(_)>);
    let _ = sidebar.add_event_listener_with_callback("pointerleave", leave.as_ref().unchecked_ref());
    leave.forget();
}

fn bind_resize() {
    lifecycle::bind_once(lifecycle::keys::SIDEBAR_WINDOW, || {
        let Some(window) = dom::window() else {
            return;
        };
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            handle_viewport_change();
            active::apply_highlight();
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    });
}

fn bind_group_toggles(sidebar: &web_sys::Element) {
    let Ok(toggles) = sidebar.query_selector_all(GROUP_TOGGLE_SELECTOR) else {
        return;
    };
    for index in 0..toggles.length() {
        let Some(toggle) = dom::element_at(&toggles, index) else {
            continue;
        };
        let toggle_el = toggle.clone();
        let sidebar_el = sidebar.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            let arrow_click = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                .is_some_and(|target| target.class_list().contains(markup::NAV_ARROW_CLASS));
            let has_link = toggle_el
                .get_attribute("href")
                .as_deref()
                .is_some_and(tessera_utils::is_internal_href);
            // A body click on a toggle that carries a real link
            // navigates; only the arrow (or a linkless toggle) folds.
            if !arrow_click && has_link {
                return;
            }
            event.prevent_default();
            event.stop_propagation();
            let Some(group) = toggle_el.parent_element() else {
                return;
            };
            toggle_group(&sidebar_el, &group);
        }) as Box<dyn FnMut(_)>);
        let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Expand or collapse a group. Opening one closes its siblings, and
/// collapsing over the active child hands the highlight to the parent
/// entry until the group is opened again.
fn toggle_group(sidebar: &web_sys::Element, group: &web_sys::Element) {
    let class_list = group.class_list();
    let was_expanded = class_list.contains(markup::EXPANDED_CLASS);
    let has_active_child = class_list.contains(markup::HAS_ACTIVE_CHILD_CLASS);

    if !was_expanded && let Ok(open_groups) = sidebar.query_selector_all(EXPANDED_GROUP_SELECTOR) {
        for index in 0..open_groups.length() {
            let Some(other) = dom::element_at(&open_groups, index) else {
                continue;
            };
            if !other.is_same_node(Some(group)) {
                let _ = other.class_list().remove_1(markup::EXPANDED_CLASS);
            }
        }
    }

    let now_expanded = class_list.toggle(markup::EXPANDED_CLASS).unwrap_or(!was_expanded);

    if was_expanded && !now_expanded && has_active_child {
        let _ = class_list.add_1(markup::ACTIVE_CLASS);
        Transition::HIGHLIGHT_HANDOFF.after(active::apply_highlight);
    } else if !was_expanded && now_expanded && has_active_child {
        let _ = class_list.remove_1(markup::ACTIVE_CLASS);
        Transition::HIGHLIGHT_EXPAND.after(active::apply_highlight);
    } else {
        Transition::HIGHLIGHT.after(active::apply_highlight);
    }
}

fn ensure_overlay(document: &web_sys::Document) {
    if document
        .query_selector(OVERLAY_SELECTOR)
        .ok()
        .flatten()
        .is_some()
    {
        return;
    }
    let Ok(overlay) = document.create_element("div") else {
        return;
    };
    let _ = overlay.set_attribute("class", OVERLAY_CLASS);
    let Some(body) = document.body() else {
        return;
    };
    let _ = body.append_child(&overlay);

    let closure = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
        close_mobile();
    }) as Box<dyn FnMut(_)>);
    let _ = overlay.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn reflect_current(state: &SidebarState) {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(sidebar) = document.query_selector(SIDEBAR_SELECTOR).ok().flatten() else {
        return;
    };
    reflect(state, &document, &sidebar);
}

fn reflect(state: &SidebarState, document: &web_sys::Document, sidebar: &web_sys::Element) {
    let class_list = sidebar.class_list();
    let _ = class_list.toggle_with_force(PINNED_CLASS, state.pinned);
    let _ = class_list.toggle_with_force(EXPANDED_CLASS, state.expanded);
    let _ = class_list.toggle_with_force(MOBILE_OPEN_CLASS, state.mobile_open);

    if let Ok(Some(layout)) = document.query_selector(markup::LAYOUT_SELECTOR) {
        let _ = layout
            .class_list()
            .toggle_with_force(LAYOUT_PINNED_CLASS, state.pinned);
    }
    if let Ok(Some(overlay)) = document.query_selector(OVERLAY_SELECTOR) {
        let _ = overlay
            .class_list()
            .toggle_with_force(OVERLAY_ACTIVE_CLASS, state.mobile_open);
    }
}

fn persist_pinned(pinned: bool) {
    let Some(window) = dom::window() else {
        return;
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return;
    };
    let _ = storage.set_item(PINNED_STORAGE_KEY, if pinned { "true" } else { "false" });
}

/// The persisted pinned flag; absent or unreadable storage reads as
/// unpinned.
pub fn stored_pinned() -> bool {
    let Some(window) = dom::window() else {
        return false;
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return false;
    };
    matches!(storage.get_item(PINNED_STORAGE_KEY), Ok(Some(value)) if value == "true")
}

fn is_mobile() -> bool {
    viewport_width() <= MOBILE_BREAKPOINT_PX
}

fn viewport_width() -> f64 {
    dom::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_forces_expansion() {
        let mut state = SidebarState::default();
        state.set_pinned(true, false, false);
        assert!(state.pinned);
        assert!(state.expanded);
    }

    #[test]
    fn unpin_collapses_unless_pointer_over() {
        let mut state = SidebarState {
            pinned: true,
            expanded: true,
            mobile_open: false,
        };
        state.set_pinned(false, true, false);
        assert!(!state.pinned);
        assert!(state.expanded);

        state.set_pinned(false, false, false);
        assert!(!state.expanded);
    }

    #[test]
    fn mobile_ignores_pin_and_hover() {
        let mut state = SidebarState::default();
        state.set_pinned(true, false, true);
        assert_eq!(state, SidebarState::default());

        state.set_expanded(true, true);
        assert!(!state.expanded);
    }

    #[test]
    fn narrow_viewport_clears_desktop_flags() {
        let mut state = SidebarState::default();
        state.set_pinned(true, false, false);

        state.handle_viewport_change(true, true);
        assert!(!state.pinned);
        assert!(!state.expanded);
    }

    #[test]
    fn wide_viewport_restores_stored_pin() {
        let mut state = SidebarState::default();
        state.handle_viewport_change(false, true);
        assert!(state.pinned);
        assert!(state.expanded);

        let mut state = SidebarState::default();
        state.handle_viewport_change(false, false);
        assert_eq!(state, SidebarState::default());
    }

    #[test]
    fn mobile_overlay_toggles_and_closes() {
        let mut state = SidebarState::default();
        state.toggle_mobile();
        assert!(state.mobile_open);
        state.toggle_mobile();
        assert!(!state.mobile_open);

        state.toggle_mobile();
        state.close_mobile();
        assert!(!state.mobile_open);
    }

    #[test]
    fn viewport_change_does_not_touch_mobile_overlay() {
        let mut state = SidebarState {
            pinned: false,
            expanded: false,
            mobile_open: true,
        };
        state.handle_viewport_change(true, false);
        assert!(state.mobile_open);
    }
}
