#![allow(missing_docs)]
//! Partial navigator: intercepts in-app link clicks, fetches the
//! destination page, swaps everything except the sticky region, and
//! keeps title, history, and active-item marking consistent.
//!
//! Every failure path ends in a full browser navigation to the
//! requested URL, so a broken swap can never strand the user.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::spawn_local;

use crate::active;
use crate::dom;
use crate::error::NavError;
use crate::fetch::fetch_text;
use crate::lifecycle;
use crate::markup;
use crate::stylesheets;

/// State payload pushed with every recorded navigation and read back
/// on `popstate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub url: String,
}

/// Navigate in-app to `target_url`, falling back to a full browser
/// navigation on any failure. `record_history` pushes a history entry
/// carrying the URL; popstate-driven re-navigation passes `false`.
pub async fn navigate(target_url: &str, record_history: bool) {
    let token = tessera_utils::next_nav_token();
    match swap(target_url, record_history, token).await {
        Ok(applied) => {
            if !applied {
                web_sys::console::log_1(
                    &format!("discarding stale navigation to {target_url}").into(),
                );
            }
        }
        Err(err) => {
            web_sys::console::error_1(
                &format!("navigation to {target_url} failed: {err}").into(),
            );
            fallback(target_url);
        }
    }
}

/// Ask the navigator to navigate from anywhere in the page, without a
/// direct dependency: dispatches the navigate event the installed
/// listener consumes. Without an installed navigator the event is
/// simply ignored and the caller's markup keeps its default behavior.
pub fn request_navigation(url: &str) {
    let Some(document) = dom::document() else {
        return;
    };
    let event_init = web_sys::CustomEventInit::new();
    event_init.set_detail(&JsValue::from_str(url));
    if let Ok(event) =
        web_sys::CustomEvent::new_with_event_init_dict(markup::NAVIGATE_EVENT, &event_init)
    {
        let _ = document.dispatch_event(&event);
    }
}

/// Install the document-level click interceptor, the popstate handler,
/// and the navigate-event hook. Keyed through the lifecycle registry;
/// calling twice is a no-op.
pub fn install() {
    lifecycle::bind_once(lifecycle::keys::NAVIGATOR_DOCUMENT, || {
        let Some(window) = dom::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let click = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            let Some(href) = intercepted_href(&event) else {
                return;
            };
            event.prevent_default();
            spawn_local(async move {
                navigate(&href, true).await;
            });
        }) as Box<dyn FnMut(_)>);
        let _ = document.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());
        click.forget();

        let popstate = Closure::wrap(Box::new(move |event: web_sys::PopStateEvent| {
            match history_state(&event.state()) {
                Some(state) => spawn_local(async move {
                    navigate(&state.url, false).await;
                }),
                None => {
                    // Nothing reconstructable for this entry.
                    let Some(window) = dom::window() else {
                        return;
                    };
                    let _ = window.location().reload();
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref());
        popstate.forget();

        let navigate_hook = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
            let Some(url) = event.detail().as_string() else {
                return;
            };
            spawn_local(async move {
                navigate(&url, true).await;
            });
        }) as Box<dyn FnMut(_)>);
        let _ = document.add_event_listener_with_callback(
            markup::NAVIGATE_EVENT,
            navigate_hook.as_ref().unchecked_ref(),
        );
        navigate_hook.forget();
    });
}

/// Full browser navigation: the guaranteed recovery path.
fn fallback(url: &str) {
    let Some(window) = dom::window() else {
        return;
    };
    let _ = window.location().set_href(url);
}

/// The swap itself. Returns `Ok(false)` when a newer navigation was
/// issued while this one was in flight; the stale response is dropped
/// before any DOM mutation.
async fn swap(target_url: &str, record_history: bool, token: u64) -> Result<bool, NavError> {
    let window = dom::window().ok_or(NavError::StructureMismatch("window"))?;
    let document = window
        .document()
        .ok_or(NavError::StructureMismatch("document"))?;

    let html = fetch_text(&window, target_url).await?;
    if token != tessera_utils::current_nav_token() {
        return Ok(false);
    }

    let incoming = parse_document(&html)?;
    let incoming_root = incoming
        .query_selector(markup::LAYOUT_SELECTOR)
        .ok()
        .flatten()
        .ok_or(NavError::StructureMismatch("fetched layout root"))?;
    let live_root = document
        .query_selector(markup::LAYOUT_SELECTOR)
        .ok()
        .flatten()
        .ok_or(NavError::StructureMismatch("live layout root"))?;

    stylesheets::reconcile(&incoming);

    for child in direct_children(&live_root) {
        if child.id() != markup::STICKY_REGION_ID {
            child.remove();
        }
    }

    for child in direct_children(&incoming_root) {
        if child.id() == markup::STICKY_REGION_ID {
            continue;
        }
        let adopted = document
            .import_node_with_deep(&child, true)
            .map_err(|_| NavError::StructureMismatch("imported content"))?;
        live_root
            .append_child(&adopted)
            .map_err(|_| NavError::StructureMismatch("layout root append"))?;
    }

    let title = incoming.title();
    document.set_title(&title);

    if record_history {
        push_history(&window, target_url, &title);
    }

    active::refresh();
    notify_content_replaced(&document, target_url);

    Ok(true)
}

fn parse_document(html: &str) -> Result<web_sys::Document, NavError> {
    let parser =
        web_sys::DomParser::new().map_err(|_| NavError::StructureMismatch("DOMParser"))?;
    parser
        .parse_from_string(html, web_sys::SupportedType::TextHtml)
        .map_err(|_| NavError::StructureMismatch("text/html parse"))
}

/// Direct element children, collected up front so removal during
/// iteration cannot skip entries of the live collection.
fn direct_children(root: &web_sys::Element) -> Vec<web_sys::Element> {
    let children = root.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .collect()
}

/// History push failures are non-fatal: the page content is already
/// correct, only the back button degrades.
fn push_history(window: &web_sys::Window, url: &str, title: &str) {
    let Ok(history) = window.history() else {
        return;
    };
    let state = HistoryState {
        url: url.to_owned(),
    };
    let Ok(json) = serde_json::to_string(&state) else {
        return;
    };
    let Ok(js_state) = js_sys::JSON::parse(&json) else {
        return;
    };
    let _ = history.push_state_with_url(&js_state, title, Some(url));
}

/// Typed view of a popstate state object, via the JSON bridge.
pub(crate) fn history_state(value: &JsValue) -> Option<HistoryState> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let json = js_sys::JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&json).ok()
}

fn notify_content_replaced(document: &web_sys::Document, url: &str) {
    let event_init = web_sys::CustomEventInit::new();
    event_init.set_detail(&JsValue::from_str(url));
    if let Ok(event) = web_sys::CustomEvent::new_with_event_init_dict(
        markup::CONTENT_REPLACED_EVENT,
        &event_init,
    ) {
        let _ = document.dispatch_event(&event);
    }
}

/// An href worth intercepting: the click landed on (or inside) an
/// anchor within a navigation region, the href is an in-app path, and
/// the click is not on a group-toggle arrow.
fn intercepted_href(event: &web_sys::MouseEvent) -> Option<String> {
    let target = event.target()?;
    let element = target.dyn_into::<web_sys::Element>().ok()?;
    if element.class_list().contains(markup::NAV_ARROW_CLASS) {
        // Arrow clicks toggle the group, they never navigate.
        return None;
    }
    let anchor = element.closest("a").ok().flatten()?;
    anchor
        .closest(markup::NAV_REGION_SELECTOR)
        .ok()
        .flatten()?;
    let href = anchor.get_attribute("href")?;
    tessera_utils::is_internal_href(&href).then_some(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_state_round_trips_through_json() {
        let state = HistoryState {
            url: "/settings.html".to_owned(),
        };
        let json = serde_json::to_string(&state).unwrap();
        let parsed: HistoryState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
