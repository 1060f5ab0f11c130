//! Line-level block rules.
//!
//! Applied to escaped text, one line at a time:
//! - `---`, `***`, `___` → `<hr>`
//! - `#`, `##`, `###` headings → `<h2>`, `<h3>`, `<h4>`
//! - `-` / `•` bullets → `<li>`, consecutive runs wrapped in one `<ul>`
//! - `1.` / `1)` numbered items → `<li>` without an enclosing list element

/// Classified line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Rule,
    Heading { level: u8, text: &'a str },
    Bullet(&'a str),
    Numbered(&'a str),
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if is_rule(line) {
            return Self::Rule;
        }
        if let Some((level, text)) = heading(line) {
            return Self::Heading { level, text };
        }
        if let Some(item) = bullet(line) {
            return Self::Bullet(item);
        }
        if let Some(item) = numbered(line) {
            return Self::Numbered(item);
        }
        Self::Text(line)
    }
}

/// Apply the block rules to every line of `text`.
pub(crate) fn apply_block_rules(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut bullets: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let rendered = match Line::classify(line) {
            Line::Bullet(item) => {
                bullets.push(item);
                continue;
            }
            Line::Rule => "<hr>".to_owned(),
            Line::Heading { level, text } => format!("<h{level}>{text}</h{level}>"),
            Line::Numbered(item) => format!("<li>{item}</li>"),
            Line::Text(text) => text.to_owned(),
        };
        flush_bullets(&mut bullets, &mut out);
        out.push(rendered);
    }
    flush_bullets(&mut bullets, &mut out);

    out.join("\n")
}

/// Emit a pending bullet run as a single `<ul>` line.
fn flush_bullets(bullets: &mut Vec<&str>, out: &mut Vec<String>) {
    if bullets.is_empty() {
        return;
    }
    let mut list = String::from("<ul>");
    for item in bullets.drain(..) {
        list.push_str("<li>");
        list.push_str(item);
        list.push_str("</li>");
    }
    list.push_str("</ul>");
    out.push(list);
}

/// Three or more `-`, `*` or `_` and nothing else.
fn is_rule(line: &str) -> bool {
    let trimmed = line.trim();
    let Some(first) = trimmed.chars().next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && trimmed.len() >= 3 && trimmed.chars().all(|c| c == first)
}

/// Heading level (2-4) and text for lines starting with 1-3 `#` and a space.
///
/// Four or more `#` are not a heading.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    u8::try_from(hashes + 1).ok().map(|level| (level, text))
}

/// Item text of a `- item` or `• item` line.
fn bullet(line: &str) -> Option<&str> {
    let rest = line
        .trim_start()
        .strip_prefix('-')
        .or_else(|| line.trim_start().strip_prefix('•'))?;
    item_text(rest)
}

/// Item text of a `1. item` or `1) item` line.
///
/// Markers have at most three digits, so `2024. A year` stays prose.
fn numbered(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 3 {
        return None;
    }
    let rest = trimmed[digits..]
        .strip_prefix('.')
        .or_else(|| trimmed[digits..].strip_prefix(')'))?;
    item_text(rest)
}

/// Marker must be followed by whitespace and non-empty text.
fn item_text(rest: &str) -> Option<&str> {
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}
