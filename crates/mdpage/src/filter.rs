//! Noise filter: decides which elements survive into the Markdown output.
//!
//! A rejected element takes its entire subtree with it, nested JSON-LD
//! scripts included. All tables are immutable after first use.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::node::Element;

/// Attribute authors can set to opt an element out of conversion.
pub const SKIP_MARKER_ATTR: &str = "data-md-skip";

/// Interactive, scripting, embedding and media tags that never carry
/// readable prose.
static SKIP_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "script", "style", "noscript", "template", "iframe", "object", "embed", "canvas", "svg",
        "audio", "video", "form", "input", "button", "select", "textarea", "dialog",
    ]
    .into_iter()
    .collect()
});

/// ARIA landmark and widget roles that mark page chrome rather than content.
static SKIP_ROLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "navigation",
        "banner",
        "complementary",
        "contentinfo",
        "search",
        "dialog",
        "alertdialog",
        "menu",
        "menubar",
        "toolbar",
        "tooltip",
        "presentation",
        "none",
    ]
    .into_iter()
    .collect()
});

/// Class-name fragments that flag widgets and overlays. Matched as
/// substrings of the lower-cased `class` attribute.
static SKIP_CLASS_FRAGMENTS: &[&str] = &[
    "cookie",
    "consent",
    "newsletter",
    "advert",
    "popup",
    "modal",
    "social-share",
    "share-button",
    "breadcrumb",
    "skip-link",
    "sr-only",
];

/// Decide whether an element (and its whole subtree) is noise.
///
/// Checks run in cheapest-first order; they are independent, so the first
/// match settles the answer. No side effects.
pub fn should_skip(element: &Element) -> bool {
    if element.has_attr(SKIP_MARKER_ATTR) {
        return true;
    }

    if SKIP_TAGS.contains(element.tag()) {
        return true;
    }

    if let Some(role) = element.attr("role") {
        if SKIP_ROLES.contains(role.to_ascii_lowercase().as_str()) {
            return true;
        }
    }

    if element.attr("aria-hidden") == Some("true") {
        return true;
    }

    if let Some(class) = element.attr("class") {
        let class = class.to_ascii_lowercase();
        if SKIP_CLASS_FRAGMENTS
            .iter()
            .any(|fragment| class.contains(fragment))
        {
            return true;
        }
    }

    if element.tag() == "img" && is_icon_image(element) {
        return true;
    }

    false
}

/// Icon heuristic for images: path markers, tiny declared dimensions, or
/// SVG sources. Reads the width/height *attributes* only, never a computed
/// size.
fn is_icon_image(element: &Element) -> bool {
    if let Some(src) = element.attr("src") {
        let src = src.to_ascii_lowercase();
        if src.contains("/icon") || src.contains("icon.") {
            return true;
        }
        let path = src.split('?').next().unwrap_or(&src);
        if path.ends_with(".svg") {
            return true;
        }
    }

    for dimension in ["width", "height"] {
        if let Some(value) = element.attr(dimension) {
            if let Ok(pixels) = value.trim().parse::<u32>() {
                if pixels > 0 && pixels < 50 {
                    return true;
                }
            }
        }
    }

    false
}
