//! HTML parsing support.
//!
//! Parses HTML strings into the [`Node`](crate::node::Node) tree via
//! `scraper`/html5ever. The parser is lenient; broken-but-parseable markup
//! never fails here.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Parse an HTML string into a [`Node`] tree.
///
/// Returns `None` when the parse produces no element at all, in which case
/// callers degrade to [`strip_tags`].
///
/// # Example
///
/// ```rust
/// use mdpage::{parse_html, MarkdownService};
///
/// let root = parse_html("<h1>Hello <em>World</em></h1>").unwrap();
/// let markdown = MarkdownService::new().convert(&root, None);
/// assert_eq!(markdown, "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Option<Node> {
    let document = Html::parse_document(html);
    let root = document
        .tree
        .root()
        .children()
        .find_map(ElementRef::wrap)?;
    Some(scraper_to_node(root, 0))
}

/// Plain-text fallback when no usable root is available: drop tags, then
/// collapse all whitespace.
pub fn strip_tags(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert a scraper ElementRef to our Node structure.
///
/// Recursion stops at the same bound the renderer enforces; past it the
/// subtree is flattened into a single text child (ego_tree's text iterator
/// walks the tree without recursing).
fn scraper_to_node(element: ElementRef, depth: usize) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), attrs);

    if depth >= crate::render::MAX_DEPTH {
        let flattened: String = element.text().collect();
        if !flattened.is_empty() {
            node.add_child(Node::text(&flattened));
        }
        return node;
    }

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element, depth + 1));
                }
            }
            _ => {}
        }
    }

    node
}
