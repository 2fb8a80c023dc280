//! GitHub-palette terminal theme.
//!
//! Plain functions over `colored` so callers can pass a style around as a
//! `fn` pointer. `--no-color` and the `NO_COLOR` convention are honored
//! globally through `colored::control`.

use colored::{ColoredString, Colorize};

/// Style function, selectable by value
pub type Style = fn(&str) -> ColoredString;

pub fn primary(s: &str) -> ColoredString {
    s.truecolor(0x58, 0xa6, 0xff)
}

pub fn accent(s: &str) -> ColoredString {
    s.truecolor(0xd2, 0xa8, 0xff)
}

pub fn success(s: &str) -> ColoredString {
    s.truecolor(0x3f, 0xb9, 0x50)
}

pub fn warning(s: &str) -> ColoredString {
    s.truecolor(0xd2, 0x99, 0x22)
}

pub fn error(s: &str) -> ColoredString {
    s.truecolor(0xf8, 0x51, 0x49)
}

pub fn heading(s: &str) -> ColoredString {
    s.bold().white()
}

pub fn label(s: &str) -> ColoredString {
    s.truecolor(0xc9, 0xd1, 0xd9)
}

pub fn value(s: &str) -> ColoredString {
    s.bold().white()
}

pub fn muted(s: &str) -> ColoredString {
    s.truecolor(0x48, 0x4f, 0x58)
}

pub fn dim(s: &str) -> ColoredString {
    s.dimmed()
}

// Model cost bands
pub fn included(s: &str) -> ColoredString {
    s.truecolor(0x3f, 0xb9, 0x50)
}

pub fn low(s: &str) -> ColoredString {
    s.truecolor(0x58, 0xa6, 0xff)
}

pub fn standard(s: &str) -> ColoredString {
    s.truecolor(0xd2, 0x99, 0x22)
}

pub fn high(s: &str) -> ColoredString {
    s.truecolor(0xf0, 0x88, 0x3e)
}

pub fn ultra(s: &str) -> ColoredString {
    s.truecolor(0xf8, 0x51, 0x49)
}

/// Style for a utilization percentage: green under 50, yellow under 80,
/// red beyond
pub fn usage_color(percentage: f64) -> Style {
    if percentage < 50.0 {
        success
    } else if percentage < 80.0 {
        warning
    } else {
        error
    }
}

/// Style for a premium-request multiplier, by cost band
pub fn multiplier_color(multiplier: f64) -> Style {
    if multiplier == 0.0 {
        included
    } else if multiplier < 1.0 {
        low
    } else if multiplier == 1.0 {
        standard
    } else if multiplier <= 3.0 {
        high
    } else {
        ultra
    }
}
