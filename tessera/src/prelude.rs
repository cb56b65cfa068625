#![allow(missing_docs)]

pub use tessera_components::{SidebarState, Transition};
pub use tessera_nav::{NavError, active, fragment, lifecycle, markup, navigator};
pub use wasm_bindgen::JsCast;
