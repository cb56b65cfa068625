#![allow(missing_docs)]
//! Dropdown selector controller. One delegated document listener owns
//! toggling, option selection, and outside-click closing for every
//! dropdown on the page; menus are mutually exclusive.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use tessera_nav::{dom, lifecycle};

use crate::transition::Transition;

const WRAPPER_SELECTOR: &str = ".dropdown-wrapper";
const BUTTON_SELECTOR: &str = ".dropdown-button";
const MENU_SELECTOR: &str = ".ui-dropdown-menu";
const OPTION_SELECTOR: &str = ".dropdown-option";
const CURRENT_NAME_SELECTOR: &str = ".dropdown-current-name";
const CURRENT_LOGO_SELECTOR: &str = ".dropdown-current-logo";

const OPEN_CLASS: &str = "show";
const ACTIVE_CLASS: &str = "active";

/// Bind every dropdown wrapper on the page. Safe to call after each
/// swap; the shared document listeners install only once, so sticky
/// wrappers never accumulate duplicates.
pub fn bind_all() {
    let Some(document) = dom::document() else {
        return;
    };
    lifecycle::bind_once(lifecycle::keys::DROPDOWN_DOCUMENT, || {
        install_document_handler(&document);
        guard_scroll_chaining(&document);
    });

    let Ok(wrappers) = document.query_selector_all(WRAPPER_SELECTOR) else {
        return;
    };
    for index in 0..wrappers.length() {
        let Some(wrapper) = dom::element_at(&wrappers, index) else {
            continue;
        };
        bind(&wrapper);
    }
}

/// Check a single wrapper's parts. A wrapper missing its button or
/// menu simply never activates.
pub fn bind(wrapper: &web_sys::Element) {
    if wrapper.query_selector(MENU_SELECTOR).ok().flatten().is_none() {
        web_sys::console::warn_1(&"dropdown missing its menu part".into());
        return;
    }
    if wrapper
        .query_selector(BUTTON_SELECTOR)
        .ok()
        .flatten()
        .is_none()
    {
        web_sys::console::warn_1(&"dropdown missing its button part".into());
    }
}

fn install_document_handler(document: &web_sys::Document) {
    let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        let Some(document) = dom::document() else {
            return;
        };
        let target = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok());

        // Button click: toggle this menu, closing every other one.
        if let Some(button) = target
            .as_ref()
            .and_then(|t| t.closest(BUTTON_SELECTOR).ok().flatten())
        {
            let Some(wrapper) = button.closest(WRAPPER_SELECTOR).ok().flatten() else {
                return;
            };
            let Some(menu) = wrapper.query_selector(MENU_SELECTOR).ok().flatten() else {
                return;
            };
            let was_open = menu.class_list().contains(OPEN_CLASS);
            close_all_except(&document, Some(&wrapper));
            if was_open {
                close(&wrapper);
            } else {
                open_menu(&wrapper, &menu);
            }
            return;
        }

        // Option click: apply the selection and close.
        if let Some(option) = target
            .as_ref()
            .and_then(|t| t.closest(OPTION_SELECTOR).ok().flatten())
        {
            let Some(wrapper) = option.closest(WRAPPER_SELECTOR).ok().flatten() else {
                return;
            };
            apply_selection(&wrapper, &option);
            close(&wrapper);
            return;
        }

        // Anywhere else: close whatever is open.
        let inside = target
            .as_ref()
            .and_then(|t| t.closest(WRAPPER_SELECTOR).ok().flatten());
        if inside.is_none() {
            close_all_except(&document, None);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn open_menu(wrapper: &web_sys::Element, menu: &web_sys::Element) {
    if let Some(button) = wrapper.query_selector(BUTTON_SELECTOR).ok().flatten() {
        let _ = button.class_list().add_1(ACTIVE_CLASS);
    }
    if let Some(menu_el) = menu.dyn_ref::<web_sys::HtmlElement>() {
        let _ = menu_el.style().set_property("display", "block");
        // Reflow so the show transition starts from the hidden state.
        let _ = menu_el.offset_width();
    }
    let _ = menu.class_list().add_1(OPEN_CLASS);
}

fn close(wrapper: &web_sys::Element) {
    if let Some(button) = wrapper.query_selector(BUTTON_SELECTOR).ok().flatten() {
        let _ = button.class_list().remove_1(ACTIVE_CLASS);
    }
    let Some(menu) = wrapper.query_selector(MENU_SELECTOR).ok().flatten() else {
        return;
    };
    let _ = menu.class_list().remove_1(OPEN_CLASS);

    let menu = menu.clone();
    Transition::DROPDOWN_CLOSE.after(move || {
        if menu.class_list().contains(OPEN_CLASS) {
            // Reopened during the fade.
            return;
        }
        if let Some(menu_el) = menu.dyn_ref::<web_sys::HtmlElement>() {
            let _ = menu_el.style().set_property("display", "none");
        }
    });
}

fn close_all_except(document: &web_sys::Document, keep: Option<&web_sys::Element>) {
    let Ok(wrappers) = document.query_selector_all(WRAPPER_SELECTOR) else {
        return;
    };
    for index in 0..wrappers.length() {
        let Some(wrapper) = dom::element_at(&wrappers, index) else {
            continue;
        };
        if keep.is_some_and(|kept| wrapper.is_same_node(Some(kept))) {
            continue;
        }
        let Some(menu) = wrapper.query_selector(MENU_SELECTOR).ok().flatten() else {
            continue;
        };
        if menu.class_list().contains(OPEN_CLASS) {
            close(&wrapper);
        }
    }
}

/// Copy the selected option's display data into the wrapper's current
/// slots, when the markup provides them.
fn apply_selection(wrapper: &web_sys::Element, option: &web_sys::Element) {
    if let Some(name) = option.get_attribute("data-name")
        && let Some(slot) = wrapper.query_selector(CURRENT_NAME_SELECTOR).ok().flatten()
    {
        slot.set_text_content(Some(&name));
    }
    if let Some(logo) = option.get_attribute("data-logo")
        && let Some(slot) = wrapper.query_selector(CURRENT_LOGO_SELECTOR).ok().flatten()
    {
        let _ = slot.set_attribute("src", &logo);
    }
}

/// Consume wheel events at a menu's scroll edges so the page behind
/// it does not scroll. Delegated so it covers menus injected later.
fn guard_scroll_chaining(document: &web_sys::Document) {
    let closure = Closure::wrap(Box::new(move |event: web_sys::WheelEvent| {
        let Some(menu) = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|target| target.closest(MENU_SELECTOR).ok().flatten())
        else {
            return;
        };
        let at_top = menu.scroll_top() <= 0 && event.delta_y() < 0.0;
        let at_bottom = menu.scroll_top() + menu.client_height() >= menu.scroll_height()
            && event.delta_y() > 0.0;
        if at_top || at_bottom {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}
