//! Inline formatting rules: bold, italic and links.
//!
//! Rules run over already-escaped text, one independent pass each, in this
//! order: bold, italic, link. Bold runs first so `**x**` is never half
//! consumed by the italic rule.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static BOLD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").expect("invalid bold regex"));

static ITALIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^\s*](?:[^*\n]*[^\s*])?)\*").expect("invalid italic regex")
});

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]\n]+)\]\(([^)\s<]+)\)").expect("invalid link regex")
});

/// Apply bold, italic and link rules to escaped text.
pub(crate) fn apply_inline_rules(text: &str, links_in_new_tab: bool) -> String {
    let text = BOLD_PATTERN.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC_PATTERN.replace_all(&text, |caps: &Captures<'_>| {
        if nests_strong(&caps[1]) {
            format!("<em>{}</em>", &caps[1])
        } else {
            caps[0].to_owned()
        }
    });
    let text = LINK_PATTERN.replace_all(&text, |caps: &Captures<'_>| {
        let (label, url) = (&caps[1], &caps[2]);
        if !is_safe_url(url) {
            return caps[0].to_owned();
        }
        if links_in_new_tab {
            format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{label}</a>"#)
        } else {
            format!(r#"<a href="{url}">{label}</a>"#)
        }
    });
    text.into_owned()
}

/// Whether every `<strong>` in `text` is closed inside it, so wrapping it in
/// `<em>` keeps the tags nested.
fn nests_strong(text: &str) -> bool {
    let mut depth = 0usize;
    let mut rest = text;
    while let Some(pos) = rest.find('<') {
        rest = &rest[pos..];
        if let Some(after) = rest.strip_prefix("<strong>") {
            depth += 1;
            rest = after;
        } else if let Some(after) = rest.strip_prefix("</strong>") {
            let Some(outer) = depth.checked_sub(1) else {
                return false;
            };
            depth = outer;
            rest = after;
        } else {
            rest = &rest[1..];
        }
    }
    depth == 0
}

/// Whether a link target may become an `href`.
///
/// Web, mail, absolute-path and fragment links pass; other schemes
/// (`javascript:`, `data:`, …) stay as literal text.
fn is_safe_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with('/')
        || lower.starts_with('#')
}
