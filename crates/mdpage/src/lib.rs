//! # mdpage
//!
//! Convert hypertext document trees to Markdown, with JSON-LD structured
//! data extracted into a YAML-like frontmatter preamble.
//!
//! ## Design
//!
//! The converter is a deterministic, single-pass structural transform: it
//! walks element and text nodes, drops page chrome via noise-filtering
//! heuristics, dispatches each recognized tag to a markup rule, and scans
//! the owning document once for `application/ld+json` blocks. All traversal
//! state travels by value, so one service instance can run any number of
//! conversions concurrently.
//!
//! Conversion never fails: broken-but-parseable markup is absorbed by the
//! lenient parser, and undecodable structured-data blocks are dropped
//! individually.
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use mdpage::MarkdownService;
//!
//! let service = MarkdownService::new();
//! let markdown = service.convert_html("<h1>Hello</h1><p>World with <strong>bold</strong>.</p>");
//! assert_eq!(markdown, "# Hello\n\nWorld with **bold**.");
//! ```
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use mdpage::{MarkdownService, Node};
//!
//! let mut h1 = Node::element("h1");
//! h1.add_child(Node::text("Hello World"));
//!
//! let markdown = MarkdownService::new().convert(&h1, None);
//! assert_eq!(markdown, "# Hello World");
//! ```

pub mod filter;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod render;
mod service;

#[cfg(feature = "html")]
pub use html::{parse_html, strip_tags};
pub use node::{Element, Node};
pub use service::MarkdownService;

// Text-level building blocks, re-exported for callers that hold raw script
// payloads or want to post-process their own Markdown.
pub use mdpage_core::{extract_items, finalize, render_frontmatter, StructuredDataItem};
