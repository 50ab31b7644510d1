//! Table rendering utilities for CLI outputs.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*m").expect("static ANSI regex"));

/// Terminal width of `s`, colour codes excluded.
fn visible_width(s: &str) -> usize {
    ANSI_RE.replace_all(s, "").width()
}

pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: Vec<S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Display width of every column, header included. Multi-line cells
    /// count their widest line.
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| visible_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                let w = cell.lines().map(visible_width).max().unwrap_or(0);
                widths[i] = widths[i].max(w);
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);

        for row in &self.rows {
            // a row spans as many lines as its tallest cell
            let height = row.iter().map(|c| c.lines().count()).max().unwrap_or(1).max(1);
            for line in 0..height {
                let cells: Vec<String> = (0..widths.len())
                    .map(|i| {
                        row.get(i)
                            .and_then(|c| c.lines().nth(line))
                            .unwrap_or("")
                            .to_string()
                    })
                    .collect();
                push_line(&mut out, &cells, &widths);
            }
        }

        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (cell, w) in cells.iter().zip(widths) {
        line.push_str(cell);
        line.push_str(&" ".repeat(w.saturating_sub(visible_width(cell)) + 2));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
