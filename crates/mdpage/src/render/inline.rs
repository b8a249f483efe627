//! Inline span formatting: marker pairs, links, images, abbreviations.

use crate::node::Element;

/// Wrap trimmed content in a fixed marker pair. Empty content produces no
/// bare marker pair.
pub(crate) fn wrap(content: &str, marker: &str) -> String {
    if content.is_empty() {
        String::new()
    } else {
        format!("{marker}{content}{marker}")
    }
}

/// Link rule: anchors without a usable target degrade to their content.
pub(crate) fn link(element: &Element, content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let href = element.attr("href").unwrap_or("");
    if href.is_empty() || href == "#" {
        return content.to_string();
    }

    match element.attr("title").filter(|title| !title.is_empty()) {
        Some(title) => format!("[{content}]({href} \"{title}\")"),
        None => format!("[{content}]({href})"),
    }
}

/// Image rule: raw attribute values, empty alt permitted.
pub(crate) fn image(element: &Element) -> String {
    let alt = element.attr("alt").unwrap_or("");
    let src = element.attr("src").unwrap_or("");
    format!("![{alt}]({src})")
}

/// `abbr`: expand the title inline when both parts are present.
pub(crate) fn abbreviation(element: &Element, content: &str) -> String {
    match element.attr("title").filter(|title| !title.is_empty()) {
        Some(title) if !content.is_empty() => format!("{content} ({title})"),
        _ => content.to_string(),
    }
}

/// `time`: the machine-readable datetime only stands in for missing text.
pub(crate) fn time(element: &Element, content: &str) -> String {
    if content.is_empty() {
        match element.attr("datetime").filter(|value| !value.is_empty()) {
            Some(datetime) => datetime.to_string(),
            None => String::new(),
        }
    } else {
        content.to_string()
    }
}
