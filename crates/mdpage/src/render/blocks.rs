//! Multi-line block composition: blockquotes, code fences, lists, tables,
//! definition lists and disclosure widgets.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{collapse_spaces, flat_text, handle_element, process_children, Ctx};
use crate::filter::should_skip;
use crate::node::{Element, Node};

/// Language tag inside a code element's class attribute,
/// e.g. `language-rust`, `lang-js`, `highlight-python`.
static LANGUAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(language|lang|highlight)-(\w+)").unwrap());

/// Prefix every line of the (already trimmed) content with `> `.
pub(crate) fn blockquote(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let quoted: Vec<String> = content.lines().map(|line| format!("> {line}")).collect();
    format!("\n\n{}\n\n", quoted.join("\n"))
}

/// Fenced code block from a `pre` element.
///
/// A direct `code` child supplies the body and (via its class) the language
/// tag; otherwise the `pre` element's own text is used with no language.
pub(crate) fn code_fence(element: &Element, ctx: Ctx) -> String {
    let ctx = ctx.enter_pre();

    let code_child = element
        .element_children()
        .find(|child| child.tag() == "code");

    let (body, language) = match code_child {
        Some(code) => {
            let language = code
                .attr("class")
                .and_then(|class| LANGUAGE_RE.captures(class))
                .map(|captures| captures[2].to_string())
                .unwrap_or_default();
            (preformatted_text(code, ctx), language)
        }
        None => (preformatted_text(element, ctx), String::new()),
    };

    format!("\n\n```{language}\n{}\n```\n\n", body.trim_end())
}

/// Literal text of a preformatted subtree. Equivalent to `text_content`,
/// but runs under the incremented preformatted depth so the walker contract
/// holds for nested content. Gathered with an explicit stack; `pre` depth
/// is attacker-controlled like everything else in the tree.
fn preformatted_text(element: &Element, ctx: Ctx) -> String {
    debug_assert!(ctx.preformatted());

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
            Some(Node::Element(nested)) => stack.push(nested.children()),
        }
    }

    out
}

/// Render a `ul`/`ol` at the given nesting depth (4 spaces per level).
///
/// Nested lists inside an item are emitted after the item's own line, never
/// inlined into it.
pub(crate) fn list(element: &Element, ctx: Ctx, depth: usize) -> String {
    let ordered = element.tag() == "ol";
    let mut counter = if ordered {
        element
            .attr("start")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(1)
    } else {
        1
    };

    let indent = "    ".repeat(depth);
    let mut out = String::new();

    for child in element.element_children() {
        if child.tag() != "li" || should_skip(child) {
            continue;
        }

        let mut inline = String::new();
        let mut nested = String::new();

        for part in child.children() {
            match part {
                Node::Text(text) => {
                    if ctx.preformatted() {
                        inline.push_str(text);
                    } else {
                        inline.push_str(&collapse_spaces(text));
                    }
                }
                Node::Comment(_) => {}
                Node::Element(sub) => {
                    if should_skip(sub) {
                        continue;
                    }
                    if matches!(sub.tag(), "ul" | "ol") {
                        // The nested-list path bypasses handle_element, so
                        // the recursion bound must be enforced here too.
                        if ctx.at_limit() {
                            inline.push_str(&collapse_spaces(&flat_text(sub)));
                        } else {
                            nested.push_str(&list(sub, ctx.descend(), depth + 1));
                        }
                    } else {
                        inline.push_str(&handle_element(sub, ctx));
                    }
                }
            }
        }

        let bullet = if ordered {
            let bullet = format!("{counter}. ");
            counter += 1;
            bullet
        } else {
            "- ".to_string()
        };

        out.push_str(&indent);
        out.push_str(&bullet);
        out.push_str(inline.trim());
        out.push('\n');
        out.push_str(&nested);
    }

    if depth == 0 {
        format!("\n\n{out}\n")
    } else {
        out
    }
}

/// Render a `table` as a pipe table.
///
/// Rows come from direct `tr` children and from `tr` one level inside
/// `thead`/`tbody`/`tfoot`; tables nested in cells are not flattened.
pub(crate) fn table(element: &Element, ctx: Ctx) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for child in element.element_children() {
        if should_skip(child) {
            continue;
        }
        match child.tag() {
            "tr" => collect_row(child, ctx, &mut rows),
            "thead" | "tbody" | "tfoot" => {
                for row in child.element_children() {
                    if row.tag() == "tr" && !should_skip(row) {
                        collect_row(row, ctx, &mut rows);
                    }
                }
            }
            _ => {}
        }
    }

    if rows.is_empty() {
        return String::new();
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(columns, String::new());
    }

    // Column width in code points, floored at 3 so the separator dashes
    // always form a valid delimiter row.
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
                .max(3)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&rows[0], &widths));
    lines.push(separator_row(&widths));
    for row in &rows[1..] {
        lines.push(format_row(row, &widths));
    }

    format!("\n\n{}\n\n", lines.join("\n"))
}

fn collect_row(row: &Element, ctx: Ctx, rows: &mut Vec<Vec<String>>) {
    let cells: Vec<String> = row
        .element_children()
        .filter(|cell| matches!(cell.tag(), "td" | "th") && !should_skip(cell))
        .map(|cell| process_children(cell, ctx).trim().to_string())
        .collect();

    if !cells.is_empty() {
        rows.push(cells);
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn separator_row(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    format!("| {} |", dashes.join(" | "))
}

/// Definition list: `dt` in bold, `dd` as `: ` continuation lines.
pub(crate) fn definition_list(element: &Element, ctx: Ctx) -> String {
    let mut out = String::from("\n\n");

    for child in element.element_children() {
        if should_skip(child) {
            continue;
        }
        let content = process_children(child, ctx).trim().to_string();
        match child.tag() {
            "dt" => out.push_str(&format!("**{content}**\n")),
            "dd" => out.push_str(&format!(": {content}\n\n")),
            _ => {}
        }
    }

    out
}

/// Disclosure widget: bold summary line, then the body.
pub(crate) fn details(element: &Element, ctx: Ctx) -> String {
    let mut summary = String::new();
    let mut seen_summary = false;
    let mut body = String::new();

    for child in element.children() {
        match child {
            Node::Text(text) => {
                if ctx.preformatted() {
                    body.push_str(text);
                } else {
                    body.push_str(&collapse_spaces(text));
                }
            }
            Node::Comment(_) => {}
            Node::Element(sub) => {
                if should_skip(sub) {
                    continue;
                }
                if !seen_summary && sub.tag() == "summary" {
                    summary = process_children(sub, ctx).trim().to_string();
                    seen_summary = true;
                } else {
                    body.push_str(&handle_element(sub, ctx));
                }
            }
        }
    }

    format!("\n\n**{summary}**\n\n{}\n\n", body.trim())
}
