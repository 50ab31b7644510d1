use crate::store::log::LogLine;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const OP_WIDTH: usize = 60;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI regex"));

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI colour per audited operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "archive" => Colour::Red,
        "undo" => Colour::Yellow,
        "recover" => Colour::Purple,
        "settings" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn render(lines: &[LogLine]) -> String {
        if lines.is_empty() {
            return "📜 Internal log is empty.\n".to_string();
        }

        let entries: Vec<(String, String, &LogLine)> = lines
            .iter()
            .map(|l| {
                let date = chrono::DateTime::parse_from_rfc3339(&l.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| l.date.clone());
                let op_target = if l.target.is_empty() {
                    l.operation.clone()
                } else {
                    format!("{} ({})", l.operation, l.target)
                };
                (date, op_target, l)
            })
            .collect();

        let op_w = entries
            .iter()
            .map(|(_, op, _)| op.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|(_, _, l)| l.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|(d, _, _)| d.len()).max().unwrap_or(0);

        let mut out = String::from("📜 Internal log:\n\n");

        for (date, op_target, line) in entries {
            let color = color_for_operation(&line.operation);

            // truncate on visible characters, then colour only the operation word
            let visible: String = if op_target.chars().count() > OP_WIDTH {
                let mut s: String = op_target.chars().take(OP_WIDTH - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            out.push_str(&format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}\n",
                line.id, date, colored, padding, line.message,
            ));
        }

        out
    }
}
