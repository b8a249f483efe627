//! End-to-end conversion tests through the HTML entry point.

#![cfg(feature = "html")]

use mdpage::MarkdownService;

fn convert(html: &str) -> String {
    MarkdownService::new().convert_html(html)
}

#[test]
fn heading_levels_h1_through_h6() {
    for level in 1..=6 {
        let html = format!("<h{level}>Title</h{level}>");
        let expected = format!("{} Title", "#".repeat(level));
        assert_eq!(convert(&html), expected);
    }
}

#[test]
fn headings_get_blank_lines_on_both_sides() {
    let out = convert("<p>before</p><h2>Mid</h2><p>after</p>");
    assert_eq!(out, "before\n\n## Mid\n\nafter");
}

#[test]
fn readme_example() {
    let out = convert("<h1>Hello</h1><p>World with <strong>bold</strong>.</p>");
    assert_eq!(out, "# Hello\n\nWorld with **bold**.");
}

#[test]
fn empty_inline_markers_vanish() {
    assert_eq!(convert("<p>a<em>  </em>b</p>"), "ab");
    assert_eq!(convert("<p>a<strong></strong>b</p>"), "ab");
}

#[test]
fn underline_and_ins_map_to_italic() {
    assert_eq!(convert("<p><u>under</u> and <ins>added</ins></p>"), "*under* and *added*");
}

#[test]
fn nested_unordered_list() {
    let out = convert("<ul><li>A</li><li>B<ul><li>C</li></ul></li></ul>");
    assert_eq!(out, "- A\n- B\n    - C");
}

#[test]
fn ordered_list_with_start() {
    let out = convert(r#"<ol start="5"><li>x</li><li>y</li><li>z</li></ol>"#);
    assert_eq!(out, "5. x\n6. y\n7. z");
}

#[test]
fn nested_list_under_second_item_indents_deeper() {
    let out = convert("<ol><li>one</li><li>two<ol><li>sub</li></ol></li></ol>");
    assert_eq!(out, "1. one\n2. two\n    1. sub");
}

#[test]
fn table_normalizes_ragged_rows() {
    let out = convert(
        "<table>\
         <tr><td>a</td><td>b</td></tr>\
         <tr><td>c</td><td>d</td><td>e</td></tr>\
         <tr><td>f</td></tr>\
         </table>",
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    // All rows pad to three columns of the same width.
    assert_eq!(lines[0], "| a   | b   |     |");
    assert_eq!(lines[1], "| --- | --- | --- |");
    assert_eq!(lines[2], "| c   | d   | e   |");
    assert_eq!(lines[3], "| f   |     |     |");
}

#[test]
fn table_separator_matches_widest_multibyte_cell() {
    let out = convert("<table><thead><tr><th>naïveté</th><th>ok</th></tr></thead></table>");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "| naïveté | ok  |");
    assert_eq!(lines[1], "| ------- | --- |");
}

#[test]
fn blockquote_prefixes_lines() {
    // Every line of the recursively converted content gets a `> ` prefix,
    // including the blank run the two paragraphs leave between them.
    let out = convert("<blockquote><p>first</p><p>second</p></blockquote>");
    assert_eq!(out, "> first\n> \n> \n> \n> second");
}

#[test]
fn fenced_code_block_with_language() {
    let out = convert(r#"<pre><code class="language-rust">fn main() {}</code></pre>"#);
    assert_eq!(out, "```rust\nfn main() {}\n```");
}

#[test]
fn code_fence_preserves_inner_whitespace() {
    let out = convert("<pre><code>line one\n    indented</code></pre>");
    assert_eq!(out, "```\nline one\n    indented\n```");
}

#[test]
fn noise_filtered_subtrees_absent() {
    let html = r#"
        <div role="Navigation"><a href="/x">nav link</a></div>
        <div aria-hidden="true">hidden text</div>
        <div class="cookie-banner">accept cookies</div>
        <span data-md-skip>marked out</span>
        <p>kept</p>
    "#;
    let out = convert(html);
    assert_eq!(out, "kept");
}

#[test]
fn icon_images_dropped_content_images_kept() {
    let html = r#"
        <img src="/icons/x.png" alt="icon">
        <img src="/logo.svg?v=1" alt="logo">
        <img src="/spacer.png" width="16" alt="spacer">
        <img src="/photos/beach.jpg" alt="Beach">
    "#;
    let out = convert(html);
    assert_eq!(out, "![Beach](/photos/beach.jpg)");
}

#[test]
fn hard_break_and_rule() {
    assert_eq!(convert("<p>a<br>b</p>"), "a  \nb");
    assert_eq!(convert("<p>a</p><hr><p>b</p>"), "a\n\n---\n\nb");
}

#[test]
fn links_and_anchors() {
    assert_eq!(
        convert(r#"<p><a href="/doc" title="The doc">read</a></p>"#),
        "[read](/doc \"The doc\")"
    );
    assert_eq!(convert(r##"<p><a href="#">read</a></p>"##), "read");
    assert_eq!(convert(r#"<p><a href="/doc"></a>after</p>"#), "after");
}

#[test]
fn definition_list_and_details() {
    assert_eq!(
        convert("<dl><dt>Term</dt><dd>Meaning</dd></dl>"),
        "**Term**\n: Meaning"
    );
    assert_eq!(
        convert("<details><summary>More</summary><p>Body</p></details>"),
        "**More**\n\nBody"
    );
}

#[test]
fn figure_and_figcaption() {
    let out = convert(
        r#"<figure><img src="/photos/a.jpg" alt="A"><figcaption>A caption</figcaption></figure>"#,
    );
    assert_eq!(out, "![A](/photos/a.jpg)\n\n*A caption*");
}

#[test]
fn frontmatter_from_single_object() {
    let out = convert(
        r#"<script type="application/ld+json">{"name":"X","price":1}</script><p>Body</p>"#,
    );
    assert_eq!(out, "---\nname: X\nprice: 1\n---\n\nBody");
}

#[test]
fn frontmatter_from_graph_array() {
    let out = convert(
        r#"<script type="application/ld+json">
            {"@context":"https://schema.org","@graph":[{"name":"A"},{"name":"B"}]}
        </script><p>Body</p>"#,
    );
    assert_eq!(out, "---\nname: A\n\nname: B\n---\n\nBody");
    assert!(!out.contains("@context"));
    assert!(!out.contains("@graph"));
}

#[test]
fn broken_json_ld_block_ignored() {
    let out = convert(
        r#"<script type="application/ld+json">{broken</script>
           <script type="application/ld+json">{"ok":true}</script>
           <p>Body</p>"#,
    );
    assert_eq!(out, "---\nok: true\n---\n\nBody");
}

#[test]
fn whitespace_runs_collapse_outside_pre() {
    assert_eq!(convert("<p>a  \t  b</p>"), "a b");
}

#[test]
fn script_and_style_content_never_leak() {
    let out = convert("<style>p { color: red }</style><script>alert(1)</script><p>text</p>");
    assert_eq!(out, "text");
}

#[test]
fn conversion_is_deterministic() {
    let html = r#"<h1>T</h1><ul><li>a</li></ul><script type="application/ld+json">{"k":"v"}</script>"#;
    assert_eq!(convert(html), convert(html));
}
