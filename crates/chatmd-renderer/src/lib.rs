//! Safe HTML renderer for chat-message markdown.
//!
//! This crate converts the small markdown dialect produced by chat assistants
//! into an HTML fragment that is safe to insert into a page.
//!
//! # Supported syntax
//!
//! - `#`, `##`, `###` headings (rendered as `<h2>`, `<h3>`, `<h4>`)
//! - `**bold**`, `*italic*`, `[label](url)`
//! - `-` / `•` bullet lists, `1.` numbered items, `---` rules
//! - `` `inline code` `` and fenced code blocks
//! - fenced diagram blocks (```` ```mermaid ````) emitted as `<pre class="diagram">`
//! - pipe tables with a `|---|` separator row
//!
//! # Architecture
//!
//! Verbatim constructs are pulled out of the text first and parked in a
//! [`FragmentStore`] behind placeholder tokens. The remaining text is escaped
//! and rewritten line by line, then the fragments are spliced back in. Code
//! and diagram content therefore never sees the escaping or formatting rules.
//!
//! # Example
//!
//! ```
//! use chatmd_renderer::{ChatRenderer, RenderOptions};
//!
//! let renderer = ChatRenderer::new(RenderOptions::default());
//! let html = renderer.render("# Stock\n\n- **Widgets**: 3 left");
//!
//! assert_eq!(
//!     html,
//!     "<h2>Stock</h2><ul><li><strong>Widgets</strong>: 3 left</li></ul>"
//! );
//! ```

mod block;
mod breaks;
mod escape;
mod extract;
mod fragment;
mod html;
mod inline;
mod options;
mod renderer;
mod table;

pub use escape::escape_html;
pub use fragment::{Fragment, FragmentKind, FragmentStore};
pub use options::{DEFAULT_DIAGRAM_CLASS, DEFAULT_DIAGRAM_LANGUAGE, RenderOptions};
pub use renderer::{ChatRenderer, RenderResult, render};
