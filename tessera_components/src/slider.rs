#![allow(missing_docs)]
//! Range slider controller: mirrors the native input's value into the
//! styled fill bar and thumb, plus an optional text display.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use tessera_nav::dom;

const CONTAINER_SELECTOR: &str = ".slider-container";
const INPUT_SELECTOR: &str = ".slider-input";
const FILL_SELECTOR: &str = ".slider-fill";
const THUMB_SELECTOR: &str = ".slider-thumb";
const ACTIVE_CLASS: &str = "slider-active";

/// Id of the element that mirrors the slider value as text.
const DISPLAY_ATTR: &str = "data-display";

/// Bind every slider container on the page.
pub fn bind_all() {
    let Some(document) = dom::document() else {
        return;
    };
    let Ok(containers) = document.query_selector_all(CONTAINER_SELECTOR) else {
        return;
    };
    for index in 0..containers.length() {
        let Some(container) = dom::element_at(&containers, index) else {
            continue;
        };
        bind(&container);
    }
}

/// Bind a single slider. Missing parts leave the native input as-is.
pub fn bind(container: &web_sys::Element) {
    let Some(input) = container
        .query_selector(INPUT_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        web_sys::console::warn_1(&"slider missing its input part".into());
        return;
    };
    if container.query_selector(FILL_SELECTOR).ok().flatten().is_none()
        || container.query_selector(THUMB_SELECTOR).ok().flatten().is_none()
    {
        web_sys::console::warn_1(&"slider missing fill or thumb part".into());
        return;
    }

    update_visuals(container, &input);

    {
        let container = container.clone();
        let input_el = input.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            update_visuals(&container, &input_el);
            let _ = container.class_list().add_1(ACTIVE_CLASS);
        }) as Box<dyn FnMut(_)>);
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // The active styling must drop however the interaction ends.
    for event_name in ["change", "blur", "mouseup", "touchend"] {
        let container = container.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let _ = container.class_list().remove_1(ACTIVE_CLASS);
        }) as Box<dyn FnMut(_)>);
        let _ =
            input.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn update_visuals(container: &web_sys::Element, input: &web_sys::HtmlInputElement) {
    let value = input.value_as_number();
    let min = input.min().parse().unwrap_or(0.0);
    let max = input.max().parse().unwrap_or(100.0);
    let percent = tessera_utils::percent_between(value, min, max);

    if let Some(fill) = container
        .query_selector(FILL_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = fill.style().set_property("width", &format!("{percent}%"));
    }
    if let Some(thumb) = container
        .query_selector(THUMB_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = thumb.style().set_property("left", &format!("{percent}%"));
        let _ = thumb
            .style()
            .set_property("transform", "translateY(-50%) translateX(-50%)");
    }
    if let Some(display_id) = container.get_attribute(DISPLAY_ATTR)
        && let Some(display) = dom::document().and_then(|doc| doc.get_element_by_id(&display_id))
    {
        display.set_text_content(Some(&input.value()));
    }
}
