//! Final whitespace normalization of the assembled Markdown body.

/// Normalize the raw output of the tree walk.
///
/// Whitespace-only lines are emptied, runs of three or more newlines
/// collapse to exactly two, and the whole result is trimmed.
pub fn finalize(raw: &str) -> String {
    let cleaned: Vec<&str> = raw
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line
            }
        })
        .collect();
    let joined = cleaned.join("\n");

    // Cap newline runs at two. Indentation inside lines is untouched, so
    // nested list items and code fences keep their shape.
    let mut output = String::with_capacity(joined.len());
    let mut newline_run = 0;

    for c in joined.chars() {
        if c == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                output.push(c);
            }
        } else {
            newline_run = 0;
            output.push(c);
        }
    }

    output.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_newline_runs() {
        assert_eq!(finalize("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_whitespace_only_lines_emptied() {
        assert_eq!(finalize("a\n   \t\nb"), "a\n\nb");
        // A line of spaces between blank lines still collapses to one gap.
        assert_eq!(finalize("a\n\n  \n\nb"), "a\n\nb");
    }

    #[test]
    fn test_trims_result() {
        assert_eq!(finalize("\n\n# Hello\n\n"), "# Hello");
        assert_eq!(finalize("  padded  "), "padded");
    }

    #[test]
    fn test_preserves_indentation_and_hard_breaks() {
        assert_eq!(finalize("- A\n    - B\n"), "- A\n    - B");
        assert_eq!(finalize("x  \ny"), "x  \ny");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(finalize(""), "");
        assert_eq!(finalize("   \n  \n"), "");
    }
}
