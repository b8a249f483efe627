//! mdpage-core - structured-data frontmatter and Markdown post-processing
//!
//! This crate provides the text-level half of mdpage: decoding JSON-LD
//! script payloads into structured-data items, rendering those items as a
//! YAML-like frontmatter preamble, and final whitespace normalization of
//! the assembled Markdown body.
//!
//! It deliberately knows nothing about DOM trees; the `mdpage` crate walks
//! the document and hands raw script text down to [`extract_items`].
//!
//! # Example
//!
//! ```rust
//! use mdpage_core::{extract_items, render_frontmatter};
//!
//! let items = extract_items([r#"{"name":"X","price":1}"#]);
//! let front = render_frontmatter(&items);
//! assert!(front.starts_with("---\nname: X\nprice: 1\n---"));
//! ```

mod extract;
mod finalize;
mod frontmatter;

pub use extract::{extract_items, ExtractError, StructuredDataItem};
pub use finalize::finalize;
pub use frontmatter::render_frontmatter;
