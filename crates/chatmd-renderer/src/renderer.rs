//! Staged chat-message renderer.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::apply_block_rules;
use crate::breaks::{newlines_to_breaks, strip_block_breaks, strip_fragment_breaks};
use crate::escape::escape_html;
use crate::extract::{
    diagram_fence_pattern, extract_code_blocks, extract_diagrams, extract_inline_code,
};
use crate::fragment::{FragmentKind, FragmentStore, neutralize_placeholders};
use crate::html::fragment_html;
use crate::inline::apply_inline_rules;
use crate::options::RenderOptions;
use crate::table::extract_tables;

static DEFAULT_RENDERER: LazyLock<ChatRenderer> = LazyLock::new(ChatRenderer::default);

/// Render chat markdown to HTML with default options.
///
/// # Example
///
/// ```
/// let html = chatmd_renderer::render("**Stock** is <low>");
/// assert_eq!(html, "<strong>Stock</strong> is &lt;low&gt;");
/// ```
pub fn render(text: &str) -> String {
    DEFAULT_RENDERER.render(text)
}

/// Result of rendering one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Number of diagram blocks emitted.
    pub diagrams: usize,
    /// Number of fenced code blocks emitted.
    pub code_blocks: usize,
    /// Number of tables emitted.
    pub tables: usize,
    /// Number of inline code spans emitted.
    pub inline_code: usize,
}

/// Renderer for the markdown subset used in chat messages.
///
/// The renderer is immutable after construction and can be shared between
/// threads. Each call to [`render`](Self::render) runs the full pipeline:
///
/// 1. extract diagram fences, code fences, inline code and tables into a
///    [`FragmentStore`], leaving placeholders behind
/// 2. escape the residual text
/// 3. apply line rules (rules, headings, lists) and inline rules (bold,
///    italic, links)
/// 4. convert newlines to `<br>`
/// 5. restore fragments
///
/// Malformed constructs are left as escaped text; rendering never fails.
#[derive(Debug)]
pub struct ChatRenderer {
    options: RenderOptions,
    diagram_fence: Option<Regex>,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl ChatRenderer {
    /// Create a renderer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        let diagram_fence = diagram_fence_pattern(&options.diagram_languages);
        Self {
            options,
            diagram_fence,
        }
    }

    /// Options this renderer was built with.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `text` to an HTML fragment.
    pub fn render(&self, text: &str) -> String {
        self.render_result(text).html
    }

    /// Render `text` and report how many constructs were extracted.
    pub fn render_result(&self, text: &str) -> RenderResult {
        let mut store = FragmentStore::new();
        let text = neutralize_placeholders(&text.replace("\r\n", "\n"));

        let residual = self.extract(&text, &mut store);
        let html = self.format(&residual);
        let html = self.restore(&html, &store);

        let result = RenderResult {
            html,
            diagrams: store.count(FragmentKind::Diagram),
            code_blocks: store.count(FragmentKind::CodeBlock),
            tables: store.count(FragmentKind::Table),
            inline_code: store.count(FragmentKind::InlineCode),
        };
        tracing::debug!(
            input_len = text.len(),
            output_len = result.html.len(),
            diagrams = result.diagrams,
            code_blocks = result.code_blocks,
            tables = result.tables,
            inline_code = result.inline_code,
            "Rendered chat message"
        );
        result
    }

    /// Extraction passes, strictly in order.
    fn extract(&self, text: &str, store: &mut FragmentStore) -> String {
        let text = match &self.diagram_fence {
            Some(pattern) => extract_diagrams(text, pattern, store),
            None => text.to_owned(),
        };
        let text = extract_code_blocks(&text, store);
        let text = extract_inline_code(&text, store);
        let links_in_new_tab = self.options.links_in_new_tab;
        let text = extract_tables(&text, store, |cell| {
            apply_inline_rules(&escape_html(cell), links_in_new_tab)
        });
        tracing::trace!(residual_len = text.len(), "Extraction finished");
        text
    }

    /// Escaping, line rules, inline rules and line breaks on the residual text.
    fn format(&self, residual: &str) -> String {
        let html = escape_html(residual);
        let html = apply_block_rules(&html);
        let html = apply_inline_rules(&html, self.options.links_in_new_tab);
        strip_block_breaks(&newlines_to_breaks(&html))
    }

    /// Replace placeholders with rendered fragments.
    fn restore(&self, html: &str, store: &FragmentStore) -> String {
        let mut html = html.to_owned();
        for kind in FragmentKind::RESTORE_ORDER {
            html = store.restore(&html, kind, |fragment| {
                fragment_html(fragment, &self.options.diagram_class)
            });
        }
        strip_fragment_breaks(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text() {
        assert_eq!(render("hello\nworld"), "hello<br>world");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(render("a\r\nb"), "a<br>b");
    }

    #[test]
    fn test_render_result_counts() {
        let result = ChatRenderer::default().render_result(
            "```mermaid\nA-->B\n```\n```sh\nls\n```\n`x` `y`\n|A|\n|-|\n|1|",
        );
        assert_eq!(result.diagrams, 1);
        assert_eq!(result.code_blocks, 1);
        assert_eq!(result.inline_code, 2);
        assert_eq!(result.tables, 1);
    }

    #[test]
    fn test_forged_placeholder_is_neutralized() {
        let html = render("\u{E000}I0\u{E001} and `real`");
        assert_eq!(html, "\u{FFFD}I0\u{FFFD} and <code>real</code>");
    }

    #[test]
    fn test_custom_diagram_options() {
        let renderer = ChatRenderer::new(
            RenderOptions::default()
                .diagram_languages(["graphviz"])
                .diagram_class("mermaid"),
        );
        let html = renderer.render("```graphviz\na -> b\n```\n```mermaid\nA-->B\n```");
        assert_eq!(
            html,
            "<pre class=\"mermaid\">a -> b</pre><pre><code class=\"language-mermaid\">A--&gt;B</code></pre>"
        );
    }

    #[test]
    fn test_no_diagram_languages() {
        let renderer =
            ChatRenderer::new(RenderOptions::default().diagram_languages(Vec::<String>::new()));
        assert_eq!(
            renderer.render("```mermaid\nA\n```"),
            "<pre><code class=\"language-mermaid\">A</code></pre>"
        );
    }

    #[test]
    fn test_links_same_tab_option() {
        let renderer = ChatRenderer::new(RenderOptions::default().links_in_new_tab(false));
        assert_eq!(
            renderer.render("[a](https://a.test)"),
            r#"<a href="https://a.test">a</a>"#
        );
    }

    #[test]
    fn test_renderer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatRenderer>();
    }
}
