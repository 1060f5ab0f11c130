//! Extraction passes for verbatim constructs.
//!
//! Each pass moves matched spans into the [`FragmentStore`] and returns the
//! residual text with placeholder tokens in their place. Passes must run in
//! this order: diagram fences, generic code fences, inline code.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::fragment::{Fragment, FragmentStore};

static CODE_FENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[ \t]*([A-Za-z0-9_+#.\-]*)[ \t]*\n(.*?)```")
        .expect("invalid code fence regex")
});

static INLINE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("invalid inline code regex"));

/// Build the fence pattern matching any of the given diagram languages.
///
/// Language tags match case-insensitively. Returns `None` when no language is
/// configured.
pub(crate) fn diagram_fence_pattern(languages: &[String]) -> Option<Regex> {
    let alternation = languages
        .iter()
        .map(|lang| lang.trim())
        .filter(|lang| !lang.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    if alternation.is_empty() {
        return None;
    }

    match Regex::new(&format!(r"(?s)```[ \t]*(?i:{alternation})[ \t]*\n(.*?)```")) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!("diagram fences disabled, invalid language list: {e}");
            None
        }
    }
}

/// Extract diagram fences matched by `pattern`.
pub(crate) fn extract_diagrams(text: &str, pattern: &Regex, store: &mut FragmentStore) -> String {
    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            store.push(Fragment::Diagram {
                source: caps[1].trim().to_owned(),
            })
        })
        .into_owned()
}

/// Extract fenced code blocks with their optional language tag.
pub(crate) fn extract_code_blocks(text: &str, store: &mut FragmentStore) -> String {
    CODE_FENCE_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            let lang = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|lang| !lang.is_empty())
                .map(str::to_owned);
            store.push(Fragment::CodeBlock {
                lang,
                code: trim_block(&caps[2]).to_owned(),
            })
        })
        .into_owned()
}

/// Extract single-backtick inline code spans.
pub(crate) fn extract_inline_code(text: &str, store: &mut FragmentStore) -> String {
    INLINE_CODE_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            store.push(Fragment::InlineCode {
                code: caps[1].to_owned(),
            })
        })
        .into_owned()
}

/// Trim surrounding blank lines and trailing whitespace from a code block.
///
/// Indentation of the first non-blank line is kept.
fn trim_block(code: &str) -> &str {
    let code = code.trim_end();
    let mut start = 0;
    for line in code.split_inclusive('\n') {
        if !line.trim().is_empty() || !line.ends_with('\n') {
            break;
        }
        start += line.len();
    }
    &code[start..]
}
