//! Text table display for sorted patent sheets.
//!
//! Columns fit their content up to [`MAX_COLUMN_WIDTH`] display cells,
//! measured with `unicode-width` so CJK and emoji count as two cells. A heavy
//! rule is drawn above every row that starts a new holder group, except the
//! first.

use patentsort_core::{GroupedRecords, SortRules};
use patentsort_export::sheet::{HEADERS, row_cells};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const MAX_COLUMN_WIDTH: usize = 50;
const COLUMN_GAP: &str = "  ";

/// Render the sorted sheet as a text table.
pub fn render_table(sorted: &GroupedRecords<'_>, rules: &SortRules) -> String {
    let rows: Vec<[String; 6]> = sorted.rows().iter().map(|r| row_cells(r, rules)).collect();

    let mut widths: [usize; 6] = HEADERS.map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }
    for w in &mut widths {
        *w = (*w).min(MAX_COLUMN_WIDTH);
    }
    let total: usize = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);

    let mut out = String::new();
    push_line(&mut out, &HEADERS[..], &widths);
    out.push_str(&"─".repeat(total));
    out.push('\n');

    for (i, (row, starts_group)) in rows.iter().zip(sorted.group_starts()).enumerate() {
        if *starts_group && i > 0 {
            out.push_str(&"━".repeat(total));
            out.push('\n');
        }
        push_line(&mut out, &row[..], &widths);
    }

    let holders = sorted.groups().count();
    out.push_str(&format!("\n{} records, {} holder groups\n", rows.len(), holders));
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| pad(&truncate(cell.as_ref(), w), w))
        .collect();
    out.push_str(line.join(COLUMN_GAP).trim_end());
    out.push('\n');
}

/// Cut `s` to at most `width` display cells, marking the cut with `...`.
fn truncate(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    let budget = width.saturating_sub(3);
    let mut used = 0;
    let mut cut = String::new();
    for c in s.chars() {
        let cw = char_width(c);
        if used + cw > budget {
            break;
        }
        used += cw;
        cut.push(c);
    }
    cut.push_str("...");
    cut
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(fill))
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}
