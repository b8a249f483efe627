//! Tree walker and per-tag dispatch.
//!
//! The walker is a pure recursive function of (tree, context); all state is
//! carried in [`Ctx`] by value, so concurrent conversions never interact.
//! Dispatch goes through an immutable tag→handler map rather than a chain
//! of conditionals.

pub(crate) mod blocks;
pub(crate) mod inline;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::filter::should_skip;
use crate::node::{Element, Node};

/// Nesting deeper than this degrades to flat text content instead of
/// recursing further.
pub(crate) const MAX_DEPTH: usize = 128;

/// Traversal context, threaded by value through every recursive call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ctx {
    pre_depth: usize,
    depth: usize,
}

impl Ctx {
    /// Whitespace is preserved literally inside `pre` nesting.
    pub fn preformatted(self) -> bool {
        self.pre_depth > 0
    }

    pub(crate) fn enter_pre(self) -> Self {
        Ctx {
            pre_depth: self.pre_depth + 1,
            ..self
        }
    }

    pub(crate) fn descend(self) -> Self {
        Ctx {
            depth: self.depth + 1,
            ..self
        }
    }

    /// True once the recursion bound is reached; callers degrade to flat
    /// text instead of descending further.
    pub(crate) fn at_limit(self) -> bool {
        self.depth >= MAX_DEPTH
    }
}

/// How a recognized tag is turned into Markdown.
enum Handler {
    Heading(usize),
    Paragraph,
    /// Fixed marker pair wrapped around the trimmed content
    Marker(&'static str),
    /// Literal HTML passthrough pair (sub/sup have no Markdown form)
    HtmlTag(&'static str),
    Quoted,
    Abbr,
    Time,
    /// Content only, untrimmed (small/address/figure)
    Content,
    Link,
    Image,
    LineBreak,
    ThematicBreak,
    Blockquote,
    Pre,
    List,
    ListItem,
    Table,
    Figcaption,
    DefinitionList,
    Details,
}

static HANDLERS: Lazy<IndexMap<&'static str, Handler>> = Lazy::new(|| {
    use Handler::*;

    let mut map = IndexMap::new();
    map.insert("h1", Heading(1));
    map.insert("h2", Heading(2));
    map.insert("h3", Heading(3));
    map.insert("h4", Heading(4));
    map.insert("h5", Heading(5));
    map.insert("h6", Heading(6));
    map.insert("p", Paragraph);
    map.insert("strong", Marker("**"));
    map.insert("b", Marker("**"));
    map.insert("em", Marker("*"));
    map.insert("i", Marker("*"));
    map.insert("del", Marker("~~"));
    map.insert("s", Marker("~~"));
    map.insert("code", Marker("`"));
    map.insert("kbd", Marker("`"));
    map.insert("samp", Marker("`"));
    map.insert("mark", Marker("=="));
    map.insert("cite", Marker("*"));
    map.insert("var", Marker("*"));
    map.insert("dfn", Marker("*"));
    // Markdown has no underline; italics is the closest lossless-enough fit
    map.insert("u", Marker("*"));
    map.insert("ins", Marker("*"));
    map.insert("sub", HtmlTag("sub"));
    map.insert("sup", HtmlTag("sup"));
    map.insert("q", Quoted);
    map.insert("abbr", Abbr);
    map.insert("time", Time);
    map.insert("small", Content);
    map.insert("address", Content);
    map.insert("a", Link);
    map.insert("img", Image);
    map.insert("br", LineBreak);
    map.insert("hr", ThematicBreak);
    map.insert("blockquote", Blockquote);
    map.insert("pre", Pre);
    map.insert("ul", List);
    map.insert("ol", List);
    map.insert("li", ListItem);
    map.insert("table", Table);
    map.insert("figure", Content);
    map.insert("figcaption", Figcaption);
    map.insert("dl", DefinitionList);
    map.insert("details", Details);
    map
});

/// Walk the children of an element, concatenating each part with no
/// separator; block handlers bring their own spacing.
pub(crate) fn process_children(parent: &Element, ctx: Ctx) -> String {
    let mut out = String::new();

    for child in parent.children() {
        match child {
            Node::Text(text) => {
                if ctx.preformatted() {
                    out.push_str(text);
                } else {
                    out.push_str(&collapse_spaces(text));
                }
            }
            Node::Comment(_) => {}
            Node::Element(element) => {
                if should_skip(element) {
                    continue;
                }
                out.push_str(&handle_element(element, ctx));
            }
        }
    }

    out
}

/// Convert a single surviving element to Markdown.
pub(crate) fn handle_element(element: &Element, ctx: Ctx) -> String {
    if ctx.at_limit() {
        // Adversarially deep trees flatten instead of exhausting the stack.
        return collapse_spaces(&flat_text(element));
    }
    let ctx = ctx.descend();

    let handler = match HANDLERS.get(element.tag()) {
        Some(handler) => handler,
        // Unmatched tags are transparent: children only.
        None => return process_children(element, ctx),
    };

    match handler {
        Handler::Content => process_children(element, ctx),
        Handler::Heading(level) => {
            let content = trimmed_content(element, ctx);
            format!("\n\n{} {}\n\n", "#".repeat(*level), content)
        }
        Handler::Paragraph => {
            let content = trimmed_content(element, ctx);
            if content.is_empty() {
                String::new()
            } else {
                format!("\n\n{content}\n\n")
            }
        }
        Handler::Marker(marker) => inline::wrap(&trimmed_content(element, ctx), marker),
        Handler::HtmlTag(tag) => {
            let content = trimmed_content(element, ctx);
            if content.is_empty() {
                String::new()
            } else {
                format!("<{tag}>{content}</{tag}>")
            }
        }
        Handler::Quoted => {
            let content = trimmed_content(element, ctx);
            if content.is_empty() {
                String::new()
            } else {
                format!("\"{content}\"")
            }
        }
        Handler::Abbr => inline::abbreviation(element, &trimmed_content(element, ctx)),
        Handler::Time => inline::time(element, &trimmed_content(element, ctx)),
        Handler::Link => inline::link(element, &trimmed_content(element, ctx)),
        Handler::Image => inline::image(element),
        Handler::LineBreak => "  \n".to_string(),
        Handler::ThematicBreak => "\n\n---\n\n".to_string(),
        Handler::Blockquote => blocks::blockquote(&trimmed_content(element, ctx)),
        Handler::Pre => blocks::code_fence(element, ctx),
        Handler::List => blocks::list(element, ctx, 0),
        Handler::ListItem => {
            // Stray li outside any list handler
            format!("{}\n", trimmed_content(element, ctx))
        }
        Handler::Table => blocks::table(element, ctx),
        Handler::Figcaption => {
            let content = trimmed_content(element, ctx);
            if content.is_empty() {
                String::new()
            } else {
                format!("\n\n*{content}*\n\n")
            }
        }
        Handler::DefinitionList => blocks::definition_list(element, ctx),
        Handler::Details => blocks::details(element, ctx),
    }
}

fn trimmed_content(element: &Element, ctx: Ctx) -> String {
    process_children(element, ctx).trim().to_string()
}

/// Text content of a subtree with noise-filtered branches pruned, gathered
/// with an explicit stack so arbitrarily deep trees cannot exhaust the call
/// stack. This is the degraded rendering used past the recursion bound.
pub(crate) fn flat_text(element: &Element) -> String {
    let mut out = String::new();
    let mut stack = vec![element.children()];

    while !stack.is_empty() {
        let next = stack.last_mut().and_then(|children| children.next());
        match next {
            None => {
                stack.pop();
            }
            Some(Node::Text(text)) => out.push_str(text),
            Some(Node::Comment(_)) => {}
            Some(Node::Element(nested)) => {
                if !should_skip(nested) {
                    stack.push(nested.children());
                }
            }
        }
    }

    out
}

/// Collapse runs of spaces and tabs to a single space. Newlines pass
/// through untouched and terminate a run.
pub(crate) fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if c == ' ' || c == '\t' {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            in_run = false;
            out.push(c);
        }
    }

    out
}
