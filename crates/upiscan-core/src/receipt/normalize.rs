//! Whitespace normalization and line splitting for raw OCR text.

/// Collapse every whitespace run (newlines included) into a single space and
/// trim both ends.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split raw text into trimmed, non-empty lines, preserving order.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Re-join lines with `\n` for the extractors that scan the whole text.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}
