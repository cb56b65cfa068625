//! Fragment loader: fetches a named HTML resource and injects it into
//! a placeholder container.

use crate::dom;
use crate::error::NavError;
use crate::fetch::fetch_text;

/// Replace the content of `#container_id` with the markup fetched from
/// `resource_path`.
///
/// Any initialization that depends on the injected markup belongs
/// after the `.await` on the caller's side; the loader itself only
/// populates the container.
pub async fn load(container_id: &str, resource_path: &str) -> Result<(), NavError> {
    let window = dom::window().ok_or(NavError::StructureMismatch("window"))?;
    let document = window
        .document()
        .ok_or(NavError::StructureMismatch("document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| NavError::ElementNotFound(format!("#{container_id}")))?;

    let html = fetch_text(&window, resource_path).await?;
    container.set_inner_html(&html);

    Ok(())
}
