#![allow(missing_docs)]
//! Shared DOM access helpers.

use wasm_bindgen::JsCast;

pub fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

pub fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Item of a `NodeList` downcast to an `Element`.
pub fn element_at(list: &web_sys::NodeList, index: u32) -> Option<web_sys::Element> {
    list.item(index)?.dyn_into::<web_sys::Element>().ok()
}
