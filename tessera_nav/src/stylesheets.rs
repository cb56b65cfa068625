//! Stylesheet reconciler: any stylesheet referenced by a fetched
//! document must also be loaded in the live one. Links are appended,
//! never removed; growth over a session is accepted.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::dom;

const STYLESHEET_SELECTOR: &str = "link[rel=\"stylesheet\"]";

thread_local! {
    // Hrefs appended (or observed live) this session. Checking this
    // first keeps repeat reconciles against the same document a no-op.
    static SEEN: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Append a stylesheet link for every href in `incoming` that the live
/// document does not already carry. Idempotent per href.
pub fn reconcile(incoming: &web_sys::Document) {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(head) = document.head() else {
        return;
    };

    // Live links count as seen even when some other script added them.
    if let Ok(live) = document.query_selector_all(STYLESHEET_SELECTOR) {
        for index in 0..live.length() {
            let Some(link) = dom::element_at(&live, index) else {
                continue;
            };
            if let Some(href) = link.get_attribute("href") {
                SEEN.with(|seen| seen.borrow_mut().insert(href));
            }
        }
    }

    let Ok(links) = incoming.query_selector_all(STYLESHEET_SELECTOR) else {
        return;
    };
    for index in 0..links.length() {
        let Some(link) = dom::element_at(&links, index) else {
            continue;
        };
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        let fresh = SEEN.with(|seen| seen.borrow_mut().insert(href.clone()));
        if !fresh {
            continue;
        }
        let Ok(clone) = document.create_element("link") else {
            continue;
        };
        let _ = clone.set_attribute("rel", "stylesheet");
        let _ = clone.set_attribute("href", &href);
        let _ = head.append_child(&clone);
    }
}
