//! HTML output for restored fragments.
//!
//! Produces the markup that replaces each placeholder during restoration:
//! - `<code>` for inline code
//! - `<pre><code>` for fenced code blocks
//! - `<pre class="…">` for diagram sources consumed by the diagram collaborator

use std::fmt::Write;

use crate::escape::{escape_diagram_source, escape_html};
use crate::fragment::Fragment;

/// Render a fragment to its final HTML.
pub(crate) fn fragment_html(fragment: &Fragment, diagram_class: &str) -> String {
    let mut out = String::new();
    match fragment {
        Fragment::Table { html } => out.push_str(html),
        Fragment::CodeBlock { lang, code } => code_block(lang.as_deref(), code, &mut out),
        Fragment::Diagram { source } => diagram(diagram_class, source, &mut out),
        Fragment::InlineCode { code } => inline_code(code, &mut out),
    }
    out
}

fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    if let Some(lang) = lang {
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
    }
}

fn diagram(class: &str, source: &str, out: &mut String) {
    write!(
        out,
        r#"<pre class="{}">{}</pre>"#,
        escape_html(class),
        escape_diagram_source(source)
    )
    .unwrap();
}

fn inline_code(content: &str, out: &mut String) {
    write!(out, "<code>{}</code>", escape_html(content)).unwrap();
}
