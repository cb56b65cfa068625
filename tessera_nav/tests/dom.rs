#![cfg(target_arch = "wasm32")]
#![allow(missing_docs)]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use tessera_nav::{active, stylesheets};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_body(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

const NAV_FIXTURE: &str = r#"
<div class="dashboard-layout">
  <div id="chat-sidebar-container">
    <aside class="chat-sidebar">
      <nav class="chat-sidebar-nav">
        <div class="nav-highlight"></div>
        <div class="nav-item">
          <a href="chat.html">Chat</a>
        </div>
        <div class="nav-item has-submenu">
          <a href="models.html" class="nav-link-toggle">Models<span class="nav-arrow"></span></a>
          <div class="sub-nav-item"><a href="models.html">Overview</a></div>
          <div class="sub-nav-item"><a href="model-compare.html">Compare</a></div>
        </div>
        <div class="nav-item">
          <a href="playground.html">Playground</a>
        </div>
      </nav>
    </aside>
  </div>
  <main id="page-content"></main>
</div>
"#;

#[wasm_bindgen_test]
fn nested_entry_match_expands_its_group() {
    set_body(NAV_FIXTURE);
    active::set_active(Some("model-compare.html"));

    let doc = document();
    let entry = doc
        .query_selector(".sub-nav-item.active a")
        .unwrap()
        .unwrap();
    assert_eq!(entry.get_attribute("href").unwrap(), "model-compare.html");

    let group = doc.query_selector(".nav-item.has-submenu").unwrap().unwrap();
    assert!(group.class_list().contains("expanded"));
    assert!(group.class_list().contains("has-active-child"));
    assert!(!group.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn group_root_match_activates_first_child_instead() {
    set_body(NAV_FIXTURE);
    // "models.html" matches both the group root and its first nested
    // entry; the nested entry wins and the root is never active.
    active::set_active(Some("models.html"));

    let doc = document();
    let group = doc.query_selector(".nav-item.has-submenu").unwrap().unwrap();
    assert!(group.class_list().contains("expanded"));
    assert!(!group.class_list().contains("active"));

    let first_child = doc.query_selector(".sub-nav-item").unwrap().unwrap();
    assert!(first_child.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn unmatched_target_leaves_everything_unmarked_and_hides_highlight() {
    set_body(NAV_FIXTURE);
    active::set_active(Some("nowhere.html"));

    let doc = document();
    assert!(doc.query_selector(".active").unwrap().is_none());
    assert!(active::compute_highlight_geometry().is_none());

    let highlight = doc
        .query_selector(".nav-highlight")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    assert_eq!(highlight.style().get_property_value("opacity").unwrap(), "0");
}

#[wasm_bindgen_test]
fn top_level_match_produces_geometry() {
    set_body(NAV_FIXTURE);
    active::set_active(Some("playground.html"));

    let geometry = active::compute_highlight_geometry().unwrap();
    assert!(geometry.height > 0.0);
}

#[wasm_bindgen_test]
fn reconcile_is_idempotent_per_href() {
    set_body("<div></div>");

    let parser = web_sys::DomParser::new().unwrap();
    let incoming = parser
        .parse_from_string(
            r#"<html><head><link rel="stylesheet" href="styles/reconcile-test.css"></head><body></body></html>"#,
            web_sys::SupportedType::TextHtml,
        )
        .unwrap();

    stylesheets::reconcile(&incoming);
    stylesheets::reconcile(&incoming);

    let links = document()
        .query_selector_all(r#"link[href="styles/reconcile-test.css"]"#)
        .unwrap();
    assert_eq!(links.length(), 1);
}
