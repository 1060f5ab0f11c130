//! Newline-to-`<br>` conversion and cleanup around block elements.

use std::sync::LazyLock;

use regex::Regex;

static BREAK_BEFORE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<br>(<(?:h[2-4]|hr|ul|li)>)").expect("invalid block break regex")
});

static BREAK_AFTER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(</(?:h[2-4]|ul|li)>|<hr>)<br>").expect("invalid block break regex")
});

static BREAK_BEFORE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<br>(<(?:table|pre)[ >])").expect("invalid fragment break regex")
});

static BREAK_AFTER_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(</(?:table|pre)>)<br>").expect("invalid fragment break regex")
});

/// Convert every newline to `<br>`.
pub(crate) fn newlines_to_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Drop one `<br>` on each side of headings, rules and list tags.
///
/// Only a single break is removed, so a blank line after a heading still
/// leaves one break.
pub(crate) fn strip_block_breaks(html: &str) -> String {
    let html = BREAK_BEFORE_BLOCK.replace_all(html, "$1");
    BREAK_AFTER_BLOCK.replace_all(&html, "$1").into_owned()
}

/// Drop one `<br>` on each side of restored tables and preformatted blocks.
pub(crate) fn strip_fragment_breaks(html: &str) -> String {
    let html = BREAK_BEFORE_FRAGMENT.replace_all(html, "$1");
    BREAK_AFTER_FRAGMENT.replace_all(&html, "$1").into_owned()
}
