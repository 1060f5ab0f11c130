//! Pipe table detection and rendering.
//!
//! A table is a header row, a separator row (`|---|:---:|`) and any number of
//! body rows. Rows are wrapped in pipes (`| a | b |`); the bare `a|b` form is
//! accepted only when header, separator and body are all bare and no cell is
//! padded. Rows that do not form a table are left untouched and fall through
//! to the line rules.

use std::fmt::Write;

use crate::fragment::{Fragment, FragmentStore};

/// Column alignment taken from the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    fn parse(cell: &str) -> Option<Self> {
        match (cell.starts_with(':'), cell.ends_with(':') && cell.len() > 1) {
            (true, true) => Some(Self::Center),
            (false, true) => Some(Self::Right),
            (true, false) => Some(Self::Left),
            (false, false) => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Replace every table in `text` with a table placeholder.
///
/// `render_cell` turns raw cell text into HTML; it is responsible for escaping.
pub(crate) fn extract_tables(
    text: &str,
    store: &mut FragmentStore,
    render_cell: impl Fn(&str) -> String,
) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let Some(form) = table_start(lines[i], lines.get(i + 1).copied()) else {
            out.push(lines[i].to_owned());
            i += 1;
            continue;
        };

        let columns = split_cells(lines[i]).len();
        let end = (i + 2..lines.len())
            .find(|&j| !form.is_body_row(lines[j], columns))
            .unwrap_or(lines.len());
        let html = render_table(&lines[i..end], &render_cell);
        out.push(store.push(Fragment::Table { html }));
        i = end;
    }

    out.join("\n")
}

/// How the rows of one table are delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowForm {
    /// `| a | b |`
    Wrapped,
    /// `a|b`
    Bare,
}

impl RowForm {
    fn of(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|') {
            return Some(Self::Wrapped);
        }
        let bare = trimmed.contains('|')
            && trimmed
                .split('|')
                .all(|cell| !cell.is_empty() && cell.trim() == cell);
        bare.then_some(Self::Bare)
    }

    /// Bare body rows must also keep the header's column count, so a later
    /// `x|y` sentence with a different shape ends the table.
    fn is_body_row(self, line: &str, columns: usize) -> bool {
        match (self, Self::of(line)) {
            (Self::Wrapped, Some(Self::Wrapped)) => true,
            (Self::Bare, Some(Self::Bare)) => split_cells(line).len() == columns,
            _ => false,
        }
    }
}

/// Row form of the table starting at `header`, if `separator` completes it.
fn table_start(header: &str, separator: Option<&str>) -> Option<RowForm> {
    let separator = separator?;
    let form = RowForm::of(header)?;
    if RowForm::of(separator)? != form || !is_separator_row(separator) {
        return None;
    }

    let header_cells = split_cells(header);
    let has_content = header_cells.iter().any(|cell| !cell.is_empty());
    (has_content && header_cells.len() == split_cells(separator).len()).then_some(form)
}

/// Whether every cell of a row is a dash run with optional alignment colons.
fn is_separator_row(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let dashes = cell.strip_prefix(':').unwrap_or(cell);
            let dashes = dashes.strip_suffix(':').unwrap_or(dashes);
            !dashes.is_empty() && dashes.chars().all(|c| c == '-')
        })
}

/// Split a row into trimmed cells, dropping empty edge cells.
fn split_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.trim().split('|').map(str::trim).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Render header, separator and body rows as an HTML table.
fn render_table(rows: &[&str], render_cell: &impl Fn(&str) -> String) -> String {
    let alignments: Vec<Option<Alignment>> = split_cells(rows[1])
        .into_iter()
        .map(Alignment::parse)
        .collect();

    let mut out = String::from("<table><thead><tr>");
    for (col, cell) in split_cells(rows[0]).into_iter().enumerate() {
        write_cell(&mut out, "th", alignments.get(col).copied().flatten(), &render_cell(cell));
    }
    out.push_str("</tr></thead><tbody>");

    for row in &rows[2..] {
        out.push_str("<tr>");
        for (col, cell) in split_cells(row).into_iter().enumerate() {
            write_cell(&mut out, "td", alignments.get(col).copied().flatten(), &render_cell(cell));
        }
        out.push_str("</tr>");
    }

    out.push_str("</tbody></table>");
    out
}

fn write_cell(out: &mut String, tag: &str, alignment: Option<Alignment>, content: &str) {
    match alignment {
        Some(align) => write!(
            out,
            r#"<{tag} style="text-align: {}">{content}</{tag}>"#,
            align.as_str()
        )
        .unwrap(),
        None => write!(out, "<{tag}>{content}</{tag}>").unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::escape_html;
    use crate::fragment::{FragmentKind, placeholder};
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> (String, FragmentStore) {
        let mut store = FragmentStore::new();
        let out = extract_tables(text, &mut store, escape_html);
        (out, store)
    }

    fn table_html(store: &FragmentStore, index: usize) -> &str {
        match store.get(FragmentKind::Table, index) {
            Some(Fragment::Table { html }) => html,
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_table() {
        let (out, store) = extract("|A|B|\n|---|---|\n|1|2|");

        assert_eq!(out, placeholder(FragmentKind::Table, 0));
        assert_eq!(
            table_html(&store, 0),
            "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_table_without_outer_pipes() {
        let (_, store) = extract("A|B\n---|---\n1|2");
        assert_eq!(
            table_html(&store, 0),
            "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_table_keeps_surrounding_lines() {
        let (out, store) = extract("Intro\n| A | B |\n| --- | --- |\n| 1 | 2 |\nOutro");
        assert_eq!(
            out,
            format!("Intro\n{}\nOutro", placeholder(FragmentKind::Table, 0))
        );
        assert_eq!(store.count(FragmentKind::Table), 1);
    }

    #[test]
    fn test_missing_separator_falls_through() {
        let input = "|a|b|\n|x|y|\n|z|w|";
        let (out, store) = extract(input);
        assert_eq!(out, input);
        assert!(store.is_empty());
    }

    #[test]
    fn test_separator_without_dashes_falls_through() {
        let input = "|a|b|\n|:::|:::|\n|1|2|";
        let (out, store) = extract(input);
        assert_eq!(out, input);
        assert!(store.is_empty());
    }

    #[test]
    fn test_single_row_is_not_table() {
        let input = "| just | one |";
        assert_eq!(extract(input).0, input);
    }

    #[test]
    fn test_prose_with_pipe_before_table() {
        let (out, store) = extract("pick a | b\n|A|\n|---|\n|1|");
        assert_eq!(
            out,
            format!("pick a | b\n{}", placeholder(FragmentKind::Table, 0))
        );
        assert_eq!(store.count(FragmentKind::Table), 1);
    }

    #[test]
    fn test_header_only_table() {
        let (_, store) = extract("|A|B|\n|-|-|");
        assert_eq!(
            table_html(&store, 0),
            "<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody></tbody></table>"
        );
    }

    #[test]
    fn test_alignment() {
        let (_, store) = extract("|L|C|R|N|\n|:--|:-:|--:|---|\n|1|2|3|4|");
        let html = table_html(&store, 0);
        assert!(html.contains(r#"<th style="text-align: left">L</th>"#));
        assert!(html.contains(r#"<th style="text-align: center">C</th>"#));
        assert!(html.contains(r#"<td style="text-align: right">3</td>"#));
        assert!(html.contains("<td>4</td>"));
    }

    #[test]
    fn test_cells_are_escaped() {
        let (_, store) = extract("|<b>|\n|---|\n|a & b|");
        let html = table_html(&store, 0);
        assert!(html.contains("<th>&lt;b&gt;</th>"));
        assert!(html.contains("<td>a &amp; b</td>"));
    }

    #[test]
    fn test_two_tables_in_order() {
        let (out, store) = extract("|A|\n|-|\n|1|\n\n|B|\n|-|\n|2|");
        assert_eq!(
            out,
            format!(
                "{}\n\n{}",
                placeholder(FragmentKind::Table, 0),
                placeholder(FragmentKind::Table, 1)
            )
        );
        assert!(table_html(&store, 0).contains("<th>A</th>"));
        assert!(table_html(&store, 1).contains("<th>B</th>"));
    }

    #[test]
    fn test_prose_after_table_ends_body() {
        let (out, store) = extract("|A|B|\n|---|---|\n|1|2|\nUse a | b to pipe.");

        assert_eq!(
            out,
            format!("{}\nUse a | b to pipe.", placeholder(FragmentKind::Table, 0))
        );
        assert_eq!(
            table_html(&store, 0),
            "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_padded_prose_above_dashes_is_not_table() {
        let input = "Choose x | y\n--- | ---\nthen go";
        let (out, store) = extract(input);
        assert_eq!(out, input);
        assert!(store.is_empty());
    }

    #[test]
    fn test_lone_pipe_is_not_header() {
        let input = "|\n|-|";
        let (out, store) = extract(input);
        assert_eq!(out, input);
        assert!(store.is_empty());
    }

    #[test]
    fn test_mixed_row_forms_are_not_table() {
        for input in ["A|B\n|---|---|", "|A|B|\n---|---"] {
            let (out, store) = extract(input);
            assert_eq!(out, input);
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_column_count_mismatch_is_not_table() {
        let input = "|A|B|\n|---|";
        assert_eq!(extract(input).0, input);
    }

    #[test]
    fn test_bare_body_stops_at_other_shapes() {
        let (out, store) = extract("A|B\n---|---\n1|2\n3|4|5\nx | y");
        assert_eq!(
            out,
            format!("{}\n3|4|5\nx | y", placeholder(FragmentKind::Table, 0))
        );
        assert!(table_html(&store, 0).ends_with("<tr><td>1</td><td>2</td></tr></tbody></table>"));
    }

    #[test]
    fn test_wrapped_body_keeps_ragged_rows() {
        let (_, store) = extract("| A | B |\n| --- | --- |\n| 1 |\n| 2 | 3 | 4 |");
        assert!(table_html(&store, 0).contains(
            "<tbody><tr><td>1</td></tr><tr><td>2</td><td>3</td><td>4</td></tr></tbody>"
        ));
    }

    #[test]
    fn test_is_separator_row() {
        assert!(is_separator_row("| --- | :-: |"));
        assert!(is_separator_row("---|---:"));
        assert!(!is_separator_row("| - - |"));
        assert!(!is_separator_row("|:|"));
        assert!(!is_separator_row("|"));
    }

    #[test]
    fn test_split_cells_keeps_inner_empty() {
        assert_eq!(split_cells("| a | | c |"), vec!["a", "", "c"]);
        assert_eq!(split_cells("a|b"), vec!["a", "b"]);
        assert!(split_cells("|").is_empty());
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!(Alignment::parse(":---"), Some(Alignment::Left));
        assert_eq!(Alignment::parse(":---:"), Some(Alignment::Center));
        assert_eq!(Alignment::parse("---:"), Some(Alignment::Right));
        assert_eq!(Alignment::parse("---"), None);
        assert_eq!(Alignment::parse(":"), Some(Alignment::Left));
    }
}
