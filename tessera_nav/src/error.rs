use std::fmt;

use wasm_bindgen::JsValue;

/// Failure taxonomy for fragment loads and partial navigation.
///
/// Neither the fragment loader nor the navigator ever leaves the user
/// on a broken page: loader failures surface as rejected results
/// logged to the console, navigator failures fall back to a full
/// browser navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The server answered with a non-success status.
    Fetch { status: u16, url: String },
    /// The transport failed before any status was available.
    Network(String),
    /// The fetched or live document lacks the expected layout shape.
    StructureMismatch(&'static str),
    /// A container or widget part expected at bind time is missing.
    ElementNotFound(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::Fetch { status, url } => {
                write!(f, "HTTP {status}: failed to load {url}")
            }
            NavError::Network(message) => write!(f, "network error: {message}"),
            NavError::StructureMismatch(what) => {
                write!(f, "expected structure missing: {what}")
            }
            NavError::ElementNotFound(what) => write!(f, "element not found: {what}"),
        }
    }
}

impl std::error::Error for NavError {}

impl From<NavError> for JsValue {
    fn from(err: NavError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_diagnostic_format() {
        let err = NavError::Fetch {
            status: 404,
            url: "/settings.html".to_owned(),
        };
        assert_eq!(err.to_string(), "HTTP 404: failed to load /settings.html");

        let err = NavError::ElementNotFound("#header-container".to_owned());
        assert_eq!(err.to_string(), "element not found: #header-container");
    }
}
