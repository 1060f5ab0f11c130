//! Captured fragments and their placeholder tokens.
//!
//! Extraction passes move constructs that must not be touched by escaping or
//! line/inline rules into a [`FragmentStore`]. Each captured fragment leaves a
//! placeholder token in the residual text. A token carries the fragment kind
//! and its occurrence index within that kind, so restoration always pairs the
//! Nth placeholder of a kind with the Nth fragment of that kind.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Opening delimiter of a placeholder token (Unicode private use area).
pub(crate) const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Closing delimiter of a placeholder token.
pub(crate) const PLACEHOLDER_CLOSE: char = '\u{E001}';

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{E000}([TCDI])([0-9]+)\u{E001}").expect("invalid placeholder regex")
});

/// Kind of an extracted construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Pipe-delimited table.
    Table,
    /// Fenced code block.
    CodeBlock,
    /// Fenced diagram block.
    Diagram,
    /// Backtick-delimited inline code span.
    InlineCode,
}

impl FragmentKind {
    /// Order in which placeholders are restored.
    ///
    /// Tables come first: their pre-built HTML may still contain inline-code
    /// placeholders from the cells.
    pub const RESTORE_ORDER: [Self; 4] = [
        Self::Table,
        Self::InlineCode,
        Self::CodeBlock,
        Self::Diagram,
    ];

    fn slot(self) -> usize {
        match self {
            Self::Table => 0,
            Self::CodeBlock => 1,
            Self::Diagram => 2,
            Self::InlineCode => 3,
        }
    }

    fn tag(self) -> char {
        match self {
            Self::Table => 'T',
            Self::CodeBlock => 'C',
            Self::Diagram => 'D',
            Self::InlineCode => 'I',
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "T" => Some(Self::Table),
            "C" => Some(Self::CodeBlock),
            "D" => Some(Self::Diagram),
            "I" => Some(Self::InlineCode),
            _ => None,
        }
    }
}

/// Captured content of one extracted construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Table, already rendered to HTML at extraction time.
    Table { html: String },
    /// Fenced code block with its optional language tag.
    CodeBlock { lang: Option<String>, code: String },
    /// Diagram source (trimmed).
    Diagram { source: String },
    /// Raw inline code text.
    InlineCode { code: String },
}

impl Fragment {
    /// Kind of this fragment.
    #[must_use]
    pub fn kind(&self) -> FragmentKind {
        match self {
            Self::Table { .. } => FragmentKind::Table,
            Self::CodeBlock { .. } => FragmentKind::CodeBlock,
            Self::Diagram { .. } => FragmentKind::Diagram,
            Self::InlineCode { .. } => FragmentKind::InlineCode,
        }
    }
}

/// Ordered per-kind storage of captured fragments.
#[derive(Debug, Default)]
pub struct FragmentStore {
    slots: [Vec<Fragment>; 4],
}

impl FragmentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fragment and return the placeholder token that stands for it.
    pub fn push(&mut self, fragment: Fragment) -> String {
        let kind = fragment.kind();
        let slot = &mut self.slots[kind.slot()];
        let index = slot.len();
        slot.push(fragment);
        placeholder(kind, index)
    }

    /// Fragment of `kind` at occurrence `index`.
    #[must_use]
    pub fn get(&self, kind: FragmentKind, index: usize) -> Option<&Fragment> {
        self.slots[kind.slot()].get(index)
    }

    /// Number of fragments captured for `kind`.
    #[must_use]
    pub fn count(&self, kind: FragmentKind) -> usize {
        self.slots[kind.slot()].len()
    }

    /// Whether no fragment has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Replace every placeholder of `kind` in `text` with `render(fragment)`.
    ///
    /// Placeholders of other kinds are left in place. A placeholder without a
    /// matching fragment is left untouched.
    pub fn restore(
        &self,
        text: &str,
        kind: FragmentKind,
        mut render: impl FnMut(&Fragment) -> String,
    ) -> String {
        if self.count(kind) == 0 {
            return text.to_owned();
        }
        PLACEHOLDER_PATTERN
            .replace_all(text, |caps: &Captures<'_>| {
                let found = FragmentKind::from_tag(&caps[1])
                    .filter(|&k| k == kind)
                    .and_then(|k| caps[2].parse::<usize>().ok().map(|i| (k, i)))
                    .and_then(|(k, i)| self.get(k, i));
                match found {
                    Some(fragment) => render(fragment),
                    None => caps[0].to_owned(),
                }
            })
            .into_owned()
    }
}

/// Build the placeholder token for the `index`-th fragment of `kind`.
pub(crate) fn placeholder(kind: FragmentKind, index: usize) -> String {
    format!("{PLACEHOLDER_OPEN}{}{index}{PLACEHOLDER_CLOSE}", kind.tag())
}

/// Replace placeholder delimiter characters so input can never forge a token.
pub(crate) fn neutralize_placeholders(text: &str) -> String {
    text.replace([PLACEHOLDER_OPEN, PLACEHOLDER_CLOSE], "\u{FFFD}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(code: &str) -> Fragment {
        Fragment::InlineCode {
            code: code.to_owned(),
        }
    }

    #[test]
    fn test_push_returns_indexed_tokens_per_kind() {
        let mut store = FragmentStore::new();
        let a = store.push(inline("a"));
        let b = store.push(inline("b"));
        let d = store.push(Fragment::Diagram {
            source: "graph TD".to_owned(),
        });

        assert_eq!(a, placeholder(FragmentKind::InlineCode, 0));
        assert_eq!(b, placeholder(FragmentKind::InlineCode, 1));
        assert_eq!(d, placeholder(FragmentKind::Diagram, 0));
        assert_ne!(a, b);
        assert_eq!(store.count(FragmentKind::InlineCode), 2);
        assert_eq!(store.count(FragmentKind::Diagram), 1);
        assert_eq!(store.count(FragmentKind::Table), 0);
    }

    #[test]
    fn test_restore_pairs_nth_token_with_nth_fragment() {
        let mut store = FragmentStore::new();
        let first = store.push(inline("first"));
        let second = store.push(inline("second"));
        // Tokens appear out of order in the text.
        let text = format!("{second} then {first}");

        let restored = store.restore(&text, FragmentKind::InlineCode, |f| match f {
            Fragment::InlineCode { code } => format!("[{code}]"),
            _ => String::new(),
        });

        assert_eq!(restored, "[second] then [first]");
    }

    #[test]
    fn test_restore_leaves_other_kinds() {
        let mut store = FragmentStore::new();
        let code = store.push(inline("x"));
        let table = store.push(Fragment::Table {
            html: "<table></table>".to_owned(),
        });
        let text = format!("{table}{code}");

        let restored = store.restore(&text, FragmentKind::Table, |f| match f {
            Fragment::Table { html } => html.clone(),
            _ => String::new(),
        });

        assert_eq!(restored, format!("<table></table>{code}"));
    }

    #[test]
    fn test_restore_unknown_index_untouched() {
        let mut store = FragmentStore::new();
        store.push(inline("only"));
        let stray = placeholder(FragmentKind::InlineCode, 7);

        let restored = store.restore(&stray, FragmentKind::InlineCode, |_| "X".to_owned());

        assert_eq!(restored, stray);
    }

    #[test]
    fn test_neutralize_placeholders() {
        let forged = format!("{PLACEHOLDER_OPEN}I0{PLACEHOLDER_CLOSE}");
        let clean = neutralize_placeholders(&forged);
        assert_eq!(clean, "\u{FFFD}I0\u{FFFD}");
        assert!(!PLACEHOLDER_PATTERN.is_match(&clean));
    }

    #[test]
    fn test_fragment_kind() {
        assert_eq!(inline("x").kind(), FragmentKind::InlineCode);
        assert_eq!(
            Fragment::CodeBlock {
                lang: None,
                code: String::new()
            }
            .kind(),
            FragmentKind::CodeBlock
        );
        assert!(FragmentStore::new().is_empty());
    }
}
