//! MarkdownService - the entry points for document to Markdown conversion.

use mdpage_core::{extract_items, finalize, render_frontmatter};

use crate::filter::{should_skip, SKIP_MARKER_ATTR};
use crate::node::{Element, Node};
use crate::render::{self, Ctx};

/// Recognized MIME type of structured-data script blocks.
const LD_JSON_TYPE: &str = "application/ld+json";

/// The main service for converting document trees to Markdown.
///
/// The service holds no mutable state; every conversion is a pure function
/// of its input, so one instance may serve any number of concurrent calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownService;

impl MarkdownService {
    /// Create a new MarkdownService
    pub fn new() -> Self {
        Self
    }

    /// Convert an already-parsed subtree to Markdown.
    ///
    /// When the owning `document` is given, JSON-LD blocks found in it are
    /// rendered as a frontmatter preamble.
    pub fn convert(&self, root: &Node, document: Option<&Node>) -> String {
        tracing::trace!("converting node tree");

        let raw = match root {
            Node::Element(element) => render::handle_element(element, Ctx::default()),
            Node::Text(text) => render::collapse_spaces(text),
            Node::Comment(_) => String::new(),
        };
        let body = finalize(&raw);

        let frontmatter = match document {
            Some(document) => {
                let scripts = collect_ld_json(document);
                let items = extract_items(scripts.iter().map(String::as_str));
                render_frontmatter(&items)
            }
            None => String::new(),
        };

        assemble(frontmatter, body)
    }

    /// Convert an HTML string to Markdown.
    ///
    /// Parses the full document once, then converts with structured-data
    /// extraction over the same tree. If parsing yields no usable root, the
    /// result degrades to the tag-stripped plain text of the input.
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> String {
        match crate::html::parse_html(html) {
            Some(root) => self.convert(&root, Some(&root)),
            None => crate::html::strip_tags(html),
        }
    }
}

fn assemble(frontmatter: String, body: String) -> String {
    if frontmatter.is_empty() {
        body
    } else if body.is_empty() {
        frontmatter.trim_end().to_string()
    } else {
        format!("{frontmatter}{body}")
    }
}

/// Collect JSON-LD script payloads from the whole document, in encounter
/// order, pruning subtrees the noise filter rejects.
fn collect_ld_json(document: &Node) -> Vec<String> {
    let mut scripts = Vec::new();
    if let Node::Element(element) = document {
        scan_scripts(element, &mut scripts);
    }
    scripts
}

fn scan_scripts(root: &Element, scripts: &mut Vec<String>) {
    // Explicit stack, popped in document order; nesting depth is
    // input-controlled.
    let mut stack: Vec<&Element> = vec![root];

    while let Some(element) = stack.pop() {
        if element.tag() == "script" {
            // Scripts sit in the skip-tag set, so the general filter cannot
            // gate them here; only the explicit opt-out marker excludes one.
            if element.has_attr(SKIP_MARKER_ATTR) {
                continue;
            }
            let is_ld_json = element
                .attr("type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case(LD_JSON_TYPE));
            if is_ld_json {
                scripts.push(element.text_content());
            }
            continue;
        }

        if should_skip(element) {
            continue;
        }

        let children: Vec<&Element> = element.element_children().collect();
        stack.extend(children.into_iter().rev());
    }
}
