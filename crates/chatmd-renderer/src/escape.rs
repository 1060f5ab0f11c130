//! HTML escaping helpers.

/// Escape text for use in HTML element content and attribute values.
///
/// Escapes `&`, `<`, `>`, `"` and `'`.
///
/// # Examples
///
/// ```
/// use chatmd_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Prepare diagram source for embedding inside a `<pre>` element.
///
/// Diagram syntax is kept as-is (arrows like `-->` and `<-->` stay literal)
/// except for a `<` that would open a tag, comment or processing
/// instruction, which becomes `&lt;`.
pub(crate) fn escape_diagram_source(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '<'
            && chars
                .peek()
                .is_some_and(|&next| next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?'))
        {
            out.push_str("&lt;");
        } else {
            out.push(c);
        }
    }
    out
}
