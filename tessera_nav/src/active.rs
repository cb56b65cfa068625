#![allow(missing_docs)]
//! Active-item tracker: decides which navigation entry (and ancestor
//! group) carries the active marking for a target path, and positions
//! the sliding highlight indicator behind it.

use wasm_bindgen::JsCast;

use crate::dom;
use crate::markup;

/// Pixel placement of the highlight indicator, relative to the nav
/// list's origin. Horizontal extent is not tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightGeometry {
    pub top: f64,
    pub height: f64,
}

/// Re-derive the active entry from the current location and reposition
/// the highlight. The navigator calls this after every swap.
pub fn refresh() {
    set_active(None);
}

/// Mark the entry matching `target_path` (or the current location when
/// omitted) active, expanding its ancestor group. A path with no
/// matching entry leaves every entry unmarked; that is a valid state,
/// not an error.
pub fn set_active(target_path: Option<&str>) {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(nav_root) = nav_root(&document) else {
        return;
    };

    let target = resolve_target(target_path, &location_pathname());

    clear_markers(&nav_root);

    if !mark_nested(&nav_root, &target) {
        mark_top_level(&nav_root, &target);
    }

    apply_highlight();
}

/// Geometry for the currently active visible entry, or `None` when no
/// entry resolves (the highlight should then be hidden).
pub fn compute_highlight_geometry() -> Option<HighlightGeometry> {
    let document = dom::document()?;
    let nav_root = nav_root(&document)?;
    let anchor = active_anchor(&nav_root)?;

    let nav_rect = nav_root.get_bounding_client_rect();
    let item_rect = anchor.get_bounding_client_rect();

    Some(HighlightGeometry {
        top: item_rect.top() - nav_rect.top(),
        height: item_rect.height(),
    })
}

/// Write the computed geometry into the highlight element's inline
/// styles, hiding it when nothing is active.
pub fn apply_highlight() {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(highlight) = document
        .query_selector(markup::HIGHLIGHT_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };

    let style = highlight.style();
    match compute_highlight_geometry() {
        Some(geometry) => {
            let _ = style.set_property("top", &format!("{}px", geometry.top));
            let _ = style.set_property("height", &format!("{}px", geometry.height));
            let _ = style.set_property("opacity", "1");
        }
        None => {
            let _ = style.set_property("opacity", "0");
        }
    }
}

/// The chat sidebar owns the primary nav when present; plain pages
/// fall back to the static sidebar list.
fn nav_root(document: &web_sys::Document) -> Option<web_sys::Element> {
    document
        .query_selector(markup::CHAT_NAV_SELECTOR)
        .ok()
        .flatten()
        .or_else(|| {
            document
                .query_selector(markup::STATIC_NAV_SELECTOR)
                .ok()
                .flatten()
        })
}

fn location_pathname() -> String {
    dom::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default()
}

/// Document name to match nav hrefs against: the explicit path's final
/// segment when given, otherwise the location's, defaulting to the
/// home document for empty and root paths.
pub(crate) fn resolve_target(explicit: Option<&str>, pathname: &str) -> String {
    let segment = match explicit {
        Some(path) => tessera_utils::leaf_segment(path),
        None => tessera_utils::leaf_segment(pathname),
    };
    segment.unwrap_or(markup::HOME_DOCUMENT).to_owned()
}

fn clear_markers(nav_root: &web_sys::Element) {
    let selector = format!(
        "{}, {}",
        markup::NAV_ITEM_SELECTOR,
        markup::SUB_NAV_ITEM_SELECTOR
    );
    let Ok(entries) = nav_root.query_selector_all(&selector) else {
        return;
    };
    for index in 0..entries.length() {
        let Some(entry) = dom::element_at(&entries, index) else {
            continue;
        };
        let class_list = entry.class_list();
        let _ = class_list.remove_1(markup::ACTIVE_CLASS);
        let _ = class_list.remove_1(markup::EXPANDED_CLASS);
        let _ = class_list.remove_1(markup::HAS_ACTIVE_CHILD_CLASS);
    }
}

/// Nested entries win over top-level ones.
fn mark_nested(nav_root: &web_sys::Element, target: &str) -> bool {
    let selector = format!("{} a", markup::SUB_NAV_ITEM_SELECTOR);
    let Ok(links) = nav_root.query_selector_all(&selector) else {
        return false;
    };
    for index in 0..links.length() {
        let Some(link) = dom::element_at(&links, index) else {
            continue;
        };
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        if !tessera_utils::matches_target(&href, target) {
            continue;
        }
        let Some(entry) = link.closest(markup::SUB_NAV_ITEM_SELECTOR).ok().flatten() else {
            continue;
        };
        let _ = entry.class_list().add_1(markup::ACTIVE_CLASS);
        if let Some(group) = entry.closest(markup::NAV_ITEM_SELECTOR).ok().flatten() {
            let _ = group.class_list().add_1(markup::EXPANDED_CLASS);
            let _ = group.class_list().add_1(markup::HAS_ACTIVE_CHILD_CLASS);
        }
        return true;
    }
    false
}

fn mark_top_level(nav_root: &web_sys::Element, target: &str) -> bool {
    let selector = format!("{} > a", markup::NAV_ITEM_SELECTOR);
    let Ok(links) = nav_root.query_selector_all(&selector) else {
        return false;
    };
    for index in 0..links.length() {
        let Some(link) = dom::element_at(&links, index) else {
            continue;
        };
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        if !tessera_utils::matches_target(&href, target) {
            continue;
        }
        let Some(entry) = link.parent_element() else {
            continue;
        };
        if entry.class_list().contains(markup::HAS_SUBMENU_CLASS) {
            // Group roots never take the active mark themselves: the
            // group expands and its first nested entry stands in.
            let _ = entry.class_list().add_1(markup::EXPANDED_CLASS);
            if let Some(first_child) = entry
                .query_selector(markup::SUB_NAV_ITEM_SELECTOR)
                .ok()
                .flatten()
            {
                let _ = first_child.class_list().add_1(markup::ACTIVE_CLASS);
                let _ = entry.class_list().add_1(markup::HAS_ACTIVE_CHILD_CLASS);
            }
        } else {
            let _ = entry.class_list().add_1(markup::ACTIVE_CLASS);
        }
        return true;
    }
    false
}

/// The element the highlight should cover: a visible nested active
/// entry, the collapsed parent's own link, or a top-level active
/// entry, in that order of preference.
fn active_anchor(nav_root: &web_sys::Element) -> Option<web_sys::Element> {
    let nested_selector = format!(
        "{}.{}",
        markup::SUB_NAV_ITEM_SELECTOR,
        markup::ACTIVE_CLASS
    );
    if let Some(nested) = nav_root.query_selector(&nested_selector).ok().flatten() {
        if let Some(group) = nested.closest(markup::NAV_ITEM_SELECTOR).ok().flatten() {
            if group.class_list().contains(markup::EXPANDED_CLASS) {
                return nested.query_selector("a").ok().flatten();
            }
            return group.query_selector(":scope > a").ok().flatten();
        }
        return nested.query_selector("a").ok().flatten();
    }

    let top_selector = format!(
        "{}.{} > a",
        markup::NAV_ITEM_SELECTOR,
        markup::ACTIVE_CLASS
    );
    nav_root.query_selector(&top_selector).ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_target_prefers_explicit_path() {
        assert_eq!(
            resolve_target(Some("/app/settings.html"), "/app/chat.html"),
            "settings.html"
        );
        assert_eq!(resolve_target(Some("notes.html"), "/x.html"), "notes.html");
    }

    #[test]
    fn resolve_target_falls_back_to_location() {
        assert_eq!(resolve_target(None, "/app/chat.html"), "chat.html");
    }

    #[test]
    fn resolve_target_defaults_to_home_document() {
        assert_eq!(resolve_target(None, "/"), markup::HOME_DOCUMENT);
        assert_eq!(resolve_target(None, ""), markup::HOME_DOCUMENT);
        assert_eq!(resolve_target(Some("/"), "/x.html"), markup::HOME_DOCUMENT);
    }
}
