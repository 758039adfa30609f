//! Category tints and budget progress colours.

use crate::constants::{PROGRESS_GREEN, PROGRESS_RED, TINT_ALPHA};

/// Converts a hex colour into a translucent `rgba(r,g,b,0.25)` string.
///
/// Accepts `#RGB` and `#RRGGBB` (the `#` is optional). Any other input is
/// returned unchanged so that named CSS colours keep working.
pub fn hex_to_rgba(color: &str) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => rgba(r, g, b),
        None => color.to_string(),
    }
}

/// Parses `#RGB` / `#RRGGBB` into channel values.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Background colour for a budget consumption percentage.
///
/// Linear interpolation from green at 0% to red at 100%.
pub fn progress_color(percent: f64) -> String {
    let t = if percent.is_finite() {
        percent.clamp(0.0, 100.0) / 100.0
    } else {
        1.0
    };
    let lerp = |from: u8, to: u8| -> u8 {
        (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
    };
    rgba(
        lerp(PROGRESS_GREEN.0, PROGRESS_RED.0),
        lerp(PROGRESS_GREEN.1, PROGRESS_RED.1),
        lerp(PROGRESS_GREEN.2, PROGRESS_RED.2),
    )
}

fn rgba(r: u8, g: u8, b: u8) -> String {
    format!("rgba({},{},{},{})", r, g, b, TINT_ALPHA)
}
