#![cfg(target_arch = "wasm32")]
#![allow(missing_docs)]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use tessera_components::{dropdown, slider};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_body(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

fn click(selector: &str) {
    document()
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap()
        .click();
}

const DROPDOWN_FIXTURE: &str = r#"
<div class="dropdown-wrapper" id="group-a">
  <button class="dropdown-button">A</button>
  <div class="ui-dropdown-menu">
    <div class="dropdown-option" data-name="Alpha">Alpha</div>
  </div>
</div>
<div class="dropdown-wrapper" id="group-b">
  <button class="dropdown-button">B</button>
  <div class="ui-dropdown-menu">
    <div class="dropdown-option" data-name="Beta">Beta</div>
  </div>
</div>
<div id="elsewhere"></div>
"#;

fn menu_open(wrapper_id: &str) -> bool {
    document()
        .query_selector(&format!("#{wrapper_id} .ui-dropdown-menu"))
        .unwrap()
        .unwrap()
        .class_list()
        .contains("show")
}

#[wasm_bindgen_test]
fn opening_one_dropdown_closes_the_other() {
    set_body(DROPDOWN_FIXTURE);
    dropdown::bind_all();

    click("#group-a .dropdown-button");
    assert!(menu_open("group-a"));

    click("#group-b .dropdown-button");
    assert!(!menu_open("group-a"));
    assert!(menu_open("group-b"));
}

#[wasm_bindgen_test]
fn outside_click_closes_open_menus() {
    set_body(DROPDOWN_FIXTURE);
    dropdown::bind_all();

    click("#group-a .dropdown-button");
    assert!(menu_open("group-a"));

    click("#elsewhere");
    assert!(!menu_open("group-a"));
}

#[wasm_bindgen_test]
fn selecting_an_option_updates_the_current_slot_and_closes() {
    set_body(
        r#"
<div class="dropdown-wrapper" id="selector">
  <button class="dropdown-button"><span class="dropdown-current-name">-</span></button>
  <div class="ui-dropdown-menu">
    <div class="dropdown-option" data-name="Beta">Beta</div>
  </div>
</div>
"#,
    );
    dropdown::bind_all();

    click("#selector .dropdown-button");
    click("#selector .dropdown-option");

    let slot = document()
        .query_selector("#selector .dropdown-current-name")
        .unwrap()
        .unwrap();
    assert_eq!(slot.text_content().unwrap(), "Beta");
    assert!(!menu_open("selector"));
}

#[wasm_bindgen_test]
fn slider_input_updates_fill_and_display() {
    set_body(
        r#"
<div class="slider-container" data-display="value-out">
  <input class="slider-input" type="range" min="0" max="2" value="1">
  <div class="slider-fill"></div>
  <div class="slider-thumb"></div>
</div>
<span id="value-out"></span>
"#,
    );
    slider::bind_all();

    let doc = document();
    let fill = doc
        .query_selector(".slider-fill")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    assert_eq!(fill.style().get_property_value("width").unwrap(), "50%");

    let input = doc
        .query_selector(".slider-input")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlInputElement>()
        .unwrap();
    input.set_value("2");
    let event = web_sys::Event::new("input").unwrap();
    input.dispatch_event(&event).unwrap();

    assert_eq!(fill.style().get_property_value("width").unwrap(), "100%");
    assert_eq!(
        doc.get_element_by_id("value-out").unwrap().text_content().unwrap(),
        "2"
    );

    let container = doc.query_selector(".slider-container").unwrap().unwrap();
    assert!(container.class_list().contains("slider-active"));

    let change = web_sys::Event::new("change").unwrap();
    input.dispatch_event(&change).unwrap();
    assert!(!container.class_list().contains("slider-active"));
}
