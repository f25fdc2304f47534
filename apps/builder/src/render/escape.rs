//! Text-to-markup helpers shared by the preview and the editor forms.

use std::sync::LazyLock;

use regex::Regex;

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Escapes `& < > " '` so user text can go into element bodies and quoted
/// attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Converts every literal newline to `<br>`. Expects already-escaped input.
pub fn nl2br(s: &str) -> String {
    s.replace('\n', "<br>")
}

/// Splits a summary into `<p>` paragraphs on blank lines.
///
/// Single newlines inside a paragraph collapse to a space so the paragraph can
/// be justified. Empty paragraphs are dropped.
pub fn format_summary(s: &str) -> String {
    PARAGRAPH_BREAK
        .split(s)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(&LINE_BREAKS.replace_all(p, " "))))
        .collect()
}
