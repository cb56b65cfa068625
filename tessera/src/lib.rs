//! Dashboard shell behavior layer.
//!
//! Boots the shared page fragments, the partial navigator, and every
//! widget controller, and re-binds the widgets after each partial
//! navigation swap.

pub use js_sys;
pub use wasm_bindgen;
pub use web_sys;

pub use tessera_components as components;
pub use tessera_nav as nav;
pub use tessera_utils as utils;

pub mod prelude;

mod shell;

pub use shell::boot;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
fn start() {
    boot();
}
