#![allow(missing_docs)]
//! Plain-text editor toolbar: Markdown-style formatting actions over a
//! textarea, a byte-size counter, and keyboard shortcuts.
//!
//! The text operations are pure functions over `(text, selection)` so
//! the formatting behavior is testable without a DOM; the binder is a
//! thin layer that shuttles the textarea's value and selection through
//! them.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::prelude::Closure;

use tessera_nav::{dom, lifecycle};

const TEXTAREA_SELECTOR: &str = ".editor-textarea";
const TOOLBAR_BTN_SELECTOR: &str = ".toolbar-btn";
const CHAR_COUNT_SELECTOR: &str = ".char-count";
const ACTION_ATTR: &str = "data-action";

/// Stand-in inserted when a wrapping action runs on an empty selection.
pub const PLACEHOLDER: &str = "text";
const LINK_PLACEHOLDER: &str = "link text";

/// Result of a text operation: the new text and selection range, in
/// byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Surround the selection with `marker` (e.g. `**` for bold). An empty
/// selection gets a selected placeholder instead, ready to overtype.
pub fn wrap_selection(text: &str, start: usize, end: usize, marker: &str) -> Edit {
    let (start, end) = clamp_range(text, start, end);
    let selected = &text[start..end];
    if selected.is_empty() {
        Edit {
            text: format!(
                "{}{marker}{PLACEHOLDER}{marker}{}",
                &text[..start],
                &text[end..]
            ),
            start: start + marker.len(),
            end: start + marker.len() + PLACEHOLDER.len(),
        }
    } else {
        Edit {
            text: format!(
                "{}{marker}{selected}{marker}{}",
                &text[..start],
                &text[end..]
            ),
            start: start + marker.len(),
            end: end + marker.len(),
        }
    }
}

/// Replace the selection with `insert`, leaving the caret after it.
pub fn insert_at(text: &str, start: usize, end: usize, insert: &str) -> Edit {
    let (start, end) = clamp_range(text, start, end);
    let caret = start + insert.len();
    Edit {
        text: format!("{}{insert}{}", &text[..start], &text[end..]),
        start: caret,
        end: caret,
    }
}

/// Replace the selection with a Markdown link to `url`, using the
/// selected text as the label when there is one.
pub fn insert_link(text: &str, start: usize, end: usize, url: &str) -> Edit {
    let (start, end) = clamp_range(text, start, end);
    let label = if start == end {
        LINK_PLACEHOLDER
    } else {
        &text[start..end]
    };
    let replacement = format!("[{label}]({url})");
    let caret = start + replacement.len();
    Edit {
        text: format!("{}{replacement}{}", &text[..start], &text[end..]),
        start: caret,
        end: caret,
    }
}

/// Toggle a list prefix on the cursor's line: adds `• ` (or `1. ` when
/// `ordered`), or strips an existing bullet/ordered prefix of either
/// kind.
pub fn toggle_list(text: &str, cursor: usize, ordered: bool) -> Edit {
    let cursor = clamp_position(text, cursor);
    let (line_start, line_end) = line_bounds(text, cursor);
    let line = &text[line_start..line_end];

    let indent_len = line.len() - line.trim_start().len();
    let (indent, body) = line.split_at(indent_len);

    let new_line = match strip_list_prefix(body) {
        Some(rest) => format!("{indent}{rest}"),
        None => {
            let prefix = if ordered { "1. " } else { "\u{2022} " };
            format!("{indent}{prefix}{body}")
        }
    };
    replace_line(text, line_start, line_end, &new_line)
}

/// Toggle a `# ` heading prefix on the cursor's line.
pub fn toggle_heading(text: &str, cursor: usize) -> Edit {
    let cursor = clamp_position(text, cursor);
    let (line_start, line_end) = line_bounds(text, cursor);
    let line = &text[line_start..line_end];

    let new_line = match line.strip_prefix("# ") {
        Some(rest) => rest.to_owned(),
        None => format!("# {line}"),
    };
    replace_line(text, line_start, line_end, &new_line)
}

/// Human-readable size of the buffer: bytes below 1 KiB, otherwise
/// one-decimal kibibytes.
pub fn format_byte_count(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

fn line_bounds(text: &str, cursor: usize) -> (usize, usize) {
    let line_start = text[..cursor].rfind('\n').map_or(0, |index| index + 1);
    let line_end = text[cursor..]
        .find('\n')
        .map_or(text.len(), |index| cursor + index);
    (line_start, line_end)
}

fn replace_line(text: &str, line_start: usize, line_end: usize, new_line: &str) -> Edit {
    let caret = line_start + new_line.len();
    Edit {
        text: format!("{}{new_line}{}", &text[..line_start], &text[line_end..]),
        start: caret,
        end: caret,
    }
}

fn strip_list_prefix(body: &str) -> Option<&str> {
    if let Some(rest) = body.strip_prefix("\u{2022} ") {
        return Some(rest);
    }
    let digits = body.bytes().take_while(|byte| byte.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = body[digits..].strip_prefix(". ") {
            return Some(rest);
        }
    }
    None
}

// DOM selection offsets arrive as UTF-16 unit counts; clamping to the
// nearest char boundary keeps the slicing safe for any input.
fn clamp_position(text: &str, position: usize) -> usize {
    let mut position = position.min(text.len());
    while position > 0 && !text.is_char_boundary(position) {
        position -= 1;
    }
    position
}

fn clamp_range(text: &str, start: usize, end: usize) -> (usize, usize) {
    let start = clamp_position(text, start);
    let end = clamp_position(text, end).max(start);
    (start, end)
}

/// Bind the page's editor, if it has one: toolbar actions, the byte
/// counter, and keyboard shortcuts.
pub fn bind() {
    lifecycle::rebind(lifecycle::keys::EDITOR, || {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(textarea) = document
            .query_selector(TEXTAREA_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        else {
            return;
        };

        update_char_count(&document, &textarea);
        bind_toolbar(&document, &textarea);
        bind_input(&textarea);
        bind_shortcuts(&textarea);
    });
}

fn bind_toolbar(document: &web_sys::Document, textarea: &web_sys::HtmlTextAreaElement) {
    let Ok(buttons) = document.query_selector_all(TOOLBAR_BTN_SELECTOR) else {
        return;
    };
    for index in 0..buttons.length() {
        let Some(button) = dom::element_at(&buttons, index) else {
            continue;
        };
        let Some(action) = button.get_attribute(ACTION_ATTR) else {
            continue;
        };
        let textarea = textarea.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            event.prevent_default();
            run_action(&textarea, &action);
        }) as Box<dyn FnMut(_)>);
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn bind_input(textarea: &web_sys::HtmlTextAreaElement) {
    let textarea_el = textarea.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let Some(document) = dom::document() else {
            return;
        };
        update_char_count(&document, &textarea_el);
    }) as Box<dyn FnMut(_)>);
    let _ = textarea.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn bind_shortcuts(textarea: &web_sys::HtmlTextAreaElement) {
    let textarea_el = textarea.clone();
    let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        let modifier = event.ctrl_key() || event.meta_key();
        match event.key().as_str() {
            "b" if modifier => {
                event.prevent_default();
                apply(&textarea_el, |text, start, end| {
                    wrap_selection(text, start, end, "**")
                });
            }
            "i" if modifier => {
                event.prevent_default();
                apply(&textarea_el, |text, start, end| {
                    wrap_selection(text, start, end, "*")
                });
            }
            "Tab" => {
                event.prevent_default();
                apply(&textarea_el, |text, start, end| {
                    insert_at(text, start, end, "  ")
                });
            }
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    let _ = textarea.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn run_action(textarea: &web_sys::HtmlTextAreaElement, action: &str) {
    match action {
        "bold" => apply(textarea, |text, start, end| {
            wrap_selection(text, start, end, "**")
        }),
        "italic" => apply(textarea, |text, start, end| {
            wrap_selection(text, start, end, "*")
        }),
        "strike" => apply(textarea, |text, start, end| {
            wrap_selection(text, start, end, "~~")
        }),
        "list" => apply(textarea, |text, start, _end| toggle_list(text, start, false)),
        "ordered-list" => apply(textarea, |text, start, _end| toggle_list(text, start, true)),
        "heading" => apply(textarea, |text, start, _end| toggle_heading(text, start)),
        "link" => {
            let Some(url) = prompt("Enter a URL:") else {
                return;
            };
            apply(textarea, move |text, start, end| {
                insert_link(text, start, end, &url)
            });
        }
        "emoji" => {
            let Some(emoji) = prompt("Emoji to insert:") else {
                return;
            };
            apply(textarea, move |text, start, end| {
                insert_at(text, start, end, &emoji)
            });
        }
        _ => {}
    }
}

fn apply(
    textarea: &web_sys::HtmlTextAreaElement,
    op: impl FnOnce(&str, usize, usize) -> Edit,
) {
    let value = textarea.value();
    let start = selection_offset(textarea.selection_start(), value.len());
    let end = selection_offset(textarea.selection_end(), value.len());

    let edit = op(&value, start, end);

    textarea.set_value(&edit.text);
    let _ = textarea.set_selection_start(Some(edit.start as u32));
    let _ = textarea.set_selection_end(Some(edit.end as u32));
    let _ = textarea.focus();

    if let Some(document) = dom::document() {
        update_char_count(&document, textarea);
    }
}

fn selection_offset(selection: Result<Option<u32>, JsValue>, len: usize) -> usize {
    selection
        .ok()
        .flatten()
        .map_or(len, |offset| offset as usize)
}

fn update_char_count(document: &web_sys::Document, textarea: &web_sys::HtmlTextAreaElement) {
    let Some(counter) = document.query_selector(CHAR_COUNT_SELECTOR).ok().flatten() else {
        return;
    };
    counter.set_text_content(Some(&format_byte_count(textarea.value().len())));
}

fn prompt(message: &str) -> Option<String> {
    dom::window()?
        .prompt_with_message(message)
        .ok()
        .flatten()
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_selection_over_the_text() {
        let edit = wrap_selection("make this bold", 5, 9, "**");
        assert_eq!(edit.text, "make **this** bold");
        assert_eq!(&edit.text[edit.start..edit.end], "this");
    }

    #[test]
    fn wrap_empty_selection_inserts_placeholder() {
        let edit = wrap_selection("ab", 1, 1, "*");
        assert_eq!(edit.text, "a*text*b");
        assert_eq!(&edit.text[edit.start..edit.end], PLACEHOLDER);
    }

    #[test]
    fn insert_replaces_selection_and_moves_caret() {
        let edit = insert_at("hello world", 6, 11, "there");
        assert_eq!(edit.text, "hello there");
        assert_eq!(edit.start, edit.end);
        assert_eq!(edit.start, 11);

        let edit = insert_at("ab", 1, 1, "  ");
        assert_eq!(edit.text, "a  b");
        assert_eq!(edit.start, 3);
    }

    #[test]
    fn link_uses_selection_as_label() {
        let edit = insert_link("see docs here", 4, 8, "https://example.com");
        assert_eq!(edit.text, "see [docs](https://example.com) here");

        let edit = insert_link("", 0, 0, "https://example.com");
        assert_eq!(edit.text, "[link text](https://example.com)");
    }

    #[test]
    fn list_toggle_adds_and_removes_bullets() {
        let edit = toggle_list("first\nsecond", 8, false);
        assert_eq!(edit.text, "first\n\u{2022} second");

        let edit = toggle_list(&edit.text, 8, false);
        assert_eq!(edit.text, "first\nsecond");
    }

    #[test]
    fn list_toggle_ordered_and_cross_kind_removal() {
        let edit = toggle_list("item", 0, true);
        assert_eq!(edit.text, "1. item");

        // Toggling with the other flavor still strips the prefix.
        let edit = toggle_list("12. item", 0, false);
        assert_eq!(edit.text, "item");

        let edit = toggle_list("\u{2022} item", 0, true);
        assert_eq!(edit.text, "item");
    }

    #[test]
    fn list_toggle_preserves_indent() {
        let edit = toggle_list("  item", 3, false);
        assert_eq!(edit.text, "  \u{2022} item");

        let edit = toggle_list(&edit.text, 3, false);
        assert_eq!(edit.text, "  item");
    }

    #[test]
    fn heading_toggle_round_trips() {
        let edit = toggle_heading("title\nbody", 2);
        assert_eq!(edit.text, "# title\nbody");

        let edit = toggle_heading(&edit.text, 2);
        assert_eq!(edit.text, "title\nbody");
    }

    #[test]
    fn byte_count_formatting() {
        assert_eq!(format_byte_count(0), "0 B");
        assert_eq!(format_byte_count(1023), "1023 B");
        assert_eq!(format_byte_count(1024), "1.0 KB");
        assert_eq!(format_byte_count(1536), "1.5 KB");
    }

    #[test]
    fn offsets_are_clamped_to_char_boundaries() {
        // 'é' is two bytes; an offset landing inside it backs up.
        let edit = wrap_selection("café", 0, 4, "*");
        assert_eq!(edit.text, "*caf*é");

        // Offsets past the end clamp to the end.
        let edit = insert_at("ab", 10, 20, "!");
        assert_eq!(edit.text, "ab!");
    }
}
