//! Cleanup of model-suggested follow-up questions.

use std::sync::LazyLock;

use regex::Regex;

/// Leading bullets and `1.` / `1)` numbering, possibly repeated.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:[-•*]|\d{1,3}[.)])\s*)+").expect("invalid list marker regex")
});

/// Leading pictographs, dingbats and their joiners.
static LEADING_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}\x{2B50}\x{FE0F}\x{200D}\s]+")
        .expect("invalid emoji regex")
});

/// Split a block of suggested questions into clean question strings.
///
/// Blank lines are skipped. List markers and leading emoji are removed, and
/// lines left empty are dropped.
///
/// # Example
///
/// ```
/// let text = "1. 📦 Which items are low?\n\n- 💰 Total value?";
/// let questions = chatmd_protocol::parse_suggestions(text);
/// assert_eq!(questions, ["Which items are low?", "Total value?"]);
/// ```
#[must_use]
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines().filter_map(clean_suggestion).collect()
}

fn clean_suggestion(line: &str) -> Option<String> {
    let line = line.trim();
    let line = LIST_MARKER.replace(line, "");
    let line = LEADING_EMOJI.replace(&line, "");
    let line = line.trim();
    (!line.is_empty()).then(|| line.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_markers_and_emoji() {
        let input = "- 📊 What sold best this month?\n\
                     • ⚠️ Which products are running low?\n\
                     3) 🏷️ Any pending orders?";
        assert_eq!(
            parse_suggestions(input),
            vec![
                "What sold best this month?",
                "Which products are running low?",
                "Any pending orders?",
            ]
        );
    }

    #[test]
    fn test_skips_blank_and_marker_only_lines() {
        assert_eq!(
            parse_suggestions("\n  \n- \n1.\n📦\nReal question?\n"),
            vec!["Real question?"]
        );
    }

    #[test]
    fn test_keeps_leading_numbers_that_are_not_markers() {
        assert_eq!(
            parse_suggestions("3 products are low, which ones?"),
            vec!["3 products are low, which ones?"]
        );
    }

    #[test]
    fn test_marker_set() {
        assert_eq!(
            parse_suggestions("* Starred?\n12) Twelfth?\n1000. Too long?"),
            vec!["Starred?", "Twelfth?", "1000. Too long?"]
        );
    }

    #[test]
    fn test_nested_markers() {
        assert_eq!(parse_suggestions("1. - Question?"), vec!["Question?"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_suggestions("").is_empty());
    }
}
