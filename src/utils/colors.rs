/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Color for an HTTP-like status: green for 2xx/3xx, yellow for 4xx, red otherwise.
pub fn color_for_status(status: u16) -> &'static str {
    match status {
        200..=399 => GREEN,
        400..=499 => YELLOW,
        _ => RED,
    }
}

