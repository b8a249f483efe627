//! YAML-like frontmatter rendering.
//!
//! The output only needs to be YAML-*like*: a human- and agent-readable
//! preamble, not something a strict YAML parser is guaranteed to accept.
//! Keys are emitted in source order (`serde_json` is built with
//! `preserve_order`), reserved JSON-LD keys are dropped, and scalars are
//! quoted only when they contain characters that would be ambiguous.

use serde_json::Value;

use crate::extract::StructuredDataItem;

/// JSON-LD bookkeeping keys that never appear in rendered output.
const RESERVED_KEYS: &[&str] = &["@context", "@id", "@graph"];

/// Characters in a string scalar that force double-quoting.
const QUOTE_TRIGGERS: &[char] = &[
    ':', '#', '[', ']', '{', '}', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`', ',', '\n',
];

/// Render extracted items as a frontmatter block.
///
/// Empty input yields an empty string. Otherwise the block is fenced by
/// `---` lines, items are separated by one blank line, and the closing
/// fence is followed by a blank line so the Markdown body starts cleanly.
pub fn render_frontmatter(items: &[StructuredDataItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = vec!["---".to_string()];

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        render_value(item, 0, &mut lines);
    }

    lines.push("---".to_string());
    lines.join("\n") + "\n\n"
}

/// Render one structured value as a block of lines at the given indent
/// level (2 spaces per level).
fn render_value(value: &Value, indent: usize, lines: &mut Vec<String>) {
    if let Some(elements) = as_sequence(value) {
        render_sequence(&elements, indent, lines);
    } else if let Value::Object(map) = value {
        render_map(map, indent, lines);
    } else {
        lines.push(format!("{}{}", padding(indent), quote_scalar(value)));
    }
}

fn render_map(map: &serde_json::Map<String, Value>, indent: usize, lines: &mut Vec<String>) {
    let pad = padding(indent);

    for (key, value) in map {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        if is_scalar(value) {
            lines.push(format!("{pad}{key}: {}", quote_scalar(value)));
        } else {
            lines.push(format!("{pad}{key}:"));
            render_value(value, indent + 1, lines);
        }
    }
}

fn render_sequence(elements: &[&Value], indent: usize, lines: &mut Vec<String>) {
    let pad = padding(indent);

    for element in elements {
        if is_scalar(element) {
            lines.push(format!("{pad}- {}", quote_scalar(element)));
            continue;
        }

        // Structured element: render its block one level deeper, then fold
        // the first line onto the dash.
        let mut nested = Vec::new();
        render_value(element, indent + 1, &mut nested);

        match nested.first() {
            Some(first) => {
                let folded = format!("{pad}- {}", first.trim_start());
                lines.push(folded);
                lines.extend(nested.into_iter().skip(1));
            }
            None => lines.push(format!("{pad}-")),
        }
    }
}

/// Treat a value as a positional sequence: either a JSON array, or an
/// object whose keys are exactly "0".."n-1" in natural order (the source
/// data model does not distinguish lists from integer-keyed maps).
fn as_sequence(value: &Value) -> Option<Vec<&Value>> {
    match value {
        Value::Array(elements) => Some(elements.iter().collect()),
        Value::Object(map) if !map.is_empty() => {
            let positional = map
                .keys()
                .enumerate()
                .all(|(index, key)| key == &index.to_string());
            positional.then(|| map.values().collect())
        }
        _ => None,
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn padding(indent: usize) -> String {
    "  ".repeat(indent)
}

fn quote_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.is_empty() || s.contains(QUOTE_TRIGGERS) {
                let escaped = s
                    .replace('\\', "\\\\")
                    .replace('"', "\\\"")
                    .replace('\n', "\\n");
                format!("\"{escaped}\"")
            } else {
                s.clone()
            }
        }
        // Callers only pass scalars here; compact JSON is a safe fallback.
        other => other.to_string(),
    }
}
