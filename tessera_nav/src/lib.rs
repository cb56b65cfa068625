//! Behavior core for the dashboard shell: fragment loading,
//! stylesheet reconciliation, partial navigation with a preserved
//! sticky region, and active-item tracking for the navigation lists.

pub mod active;
pub mod dom;
pub mod error;
pub mod fragment;
pub mod lifecycle;
pub mod markup;
pub mod navigator;
pub mod stylesheets;

mod fetch;

pub use error::NavError;
pub use navigator::{HistoryState, navigate, request_navigation};
