//! Composition root: the one place that knows which fragments load
//! into which containers, which widgets exist, and what happens after
//! a partial swap.

use futures_util::future::join_all;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::spawn_local;

use tessera_components::{dropdown, editor, sidebar, slider};
use tessera_nav::{active, dom, fragment, lifecycle, markup, navigator};

/// Shared fragments and the placeholder containers that receive them.
/// A page without a given placeholder simply skips that fragment.
const FRAGMENTS: [(&str, &str); 4] = [
    ("header-container", "components/header.html"),
    ("sidebar-container", "components/sidebar.html"),
    ("chat-sidebar-container", "components/chat-sidebar.html"),
    ("activity-sidebar-container", "components/activity-sidebar.html"),
];

/// Boot the shell. Call once from the page's init script; the wasm
/// entry point does so automatically.
pub fn boot() {
    #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
    console_error_panic_hook::set_once();

    navigator::install();
    subscribe_content_replaced();

    let Some(document) = dom::document() else {
        return;
    };

    let pending: Vec<(&str, &str)> = FRAGMENTS
        .into_iter()
        .filter(|(container_id, _)| document.get_element_by_id(container_id).is_some())
        .collect();

    spawn_local(async move {
        // Sidebar binding and the first active-item pass need the
        // fragment markup in place, so the loads are awaited first.
        let loads = pending.into_iter().map(|(container_id, resource_path)| async move {
            if let Err(err) = fragment::load(container_id, resource_path).await {
                web_sys::console::error_1(
                    &format!("failed to load fragment {resource_path}: {err}").into(),
                );
            }
        });
        join_all(loads).await;

        sidebar::bind();
        bind_widgets();
        active::refresh();
    });
}

/// Everything that binds to swappable content. Runs at boot and again
/// after every content replacement.
fn bind_widgets() {
    sidebar::bind_mobile_toggle();
    dropdown::bind_all();
    slider::bind_all();
    editor::bind();
}

fn subscribe_content_replaced() {
    lifecycle::bind_once(lifecycle::keys::SHELL_CONTENT_REPLACED, || {
        let Some(document) = dom::document() else {
            return;
        };
        let closure = Closure::wrap(Box::new(move |_event: web_sys::CustomEvent| {
            // An in-app navigation always dismisses the mobile drawer.
            sidebar::close_mobile();
            bind_widgets();
        }) as Box<dyn FnMut(_)>);
        let _ = document.add_event_listener_with_callback(
            markup::CONTENT_REPLACED_EVENT,
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    });
}
