//! Document tree model for Markdown conversion.
//!
//! A closed tagged variant over the three node kinds the converter cares
//! about. Any HTML parser can build this structure; the converter only
//! reads it, never mutates it.

/// A node of the parsed document tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// An element with tag name, attributes and children
    Element(Element),
    /// A run of character data
    Text(String),
    /// A comment (always dropped by the converter)
    Comment(String),
}

/// An element node.
///
/// The tag name is stored lower-cased. Attribute names match
/// case-insensitively; attribute values are preserved verbatim.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element {
            tag: tag_name.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        Node::Element(Element {
            tag: tag_name.to_ascii_lowercase(),
            attrs: attrs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            children: Vec::new(),
        })
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Node::Comment(content.to_string())
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Borrow the element data, if this is an element
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get the tag name (lowercase) for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(Element::tag)
    }

    /// Add a child node. No-op for text and comment nodes.
    pub fn add_child(&mut self, child: Node) {
        if let Node::Element(element) = self {
            element.children.push(child);
        }
    }

    /// Set an attribute, replacing an existing one with the same
    /// (case-insensitive) name.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Node::Element(element) = self {
            for (existing, existing_value) in &mut element.attrs {
                if existing.eq_ignore_ascii_case(name) {
                    *existing_value = value.to_string();
                    return;
                }
            }
            element.attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(content) => content.clone(),
            Node::Comment(_) => String::new(),
            Node::Element(element) => element.text_content(),
        }
    }
}

impl Element {
    /// The lower-cased tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value by name (name matched case-insensitively)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr_name, _)| attr_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text content of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    // Explicit stack: document nesting depth is input-controlled, so the
    // call stack must not scale with it.
    let mut stack: Vec<&Node> = element.children.iter().rev().collect();

    while let Some(node) = stack.pop() {
        match node {
            Node::Text(content) => out.push_str(content),
            Node::Comment(_) => {}
            Node::Element(nested) => stack.extend(nested.children.iter().rev()),
        }
    }
}

impl Drop for Element {
    // The derived drop glue recurses once per nesting level; dismantle the
    // subtree iteratively instead so deep trees cannot blow the stack on
    // the way out.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);

        while let Some(mut node) = stack.pop() {
            if let Node::Element(ref mut element) = node {
                stack.append(&mut element.children);
            }
        }
    }
}
