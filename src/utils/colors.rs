/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

const PALETTE: [&str; 6] = [RED, BLUE, GREEN, MAGENTA, YELLOW, CYAN];

/// Stable color for an area, by its position in the configured list.
pub fn color_for_area(areas: &[String], area: &str) -> &'static str {
    areas
        .iter()
        .position(|a| a == area)
        .map(|i| PALETTE[i % PALETTE.len()])
        .unwrap_or(GREY)
}

/// Days-left color: red in the final week, yellow in the final month.
pub fn color_for_countdown(days: i64) -> &'static str {
    if days <= 7 {
        RED
    } else if days <= 30 {
        YELLOW
    } else {
        GREEN
    }
}
