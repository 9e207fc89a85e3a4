//! Color syntax helpers
//!
//! Branding and styling accept colors as 6-digit hex (`#1a2b3c`),
//! `rgb(r, g, b)` or `rgba(r, g, b, a)`. Named CSS colors are rejected so
//! that generated stylesheets stay predictable across renderers.

use regex_lite::Regex;
use std::sync::OnceLock;

fn hex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap())
}

fn rgb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\)$").unwrap()
    })
}

fn rgba_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgba\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*(0|1|0?\.\d+)\s*\)$")
            .unwrap()
    })
}

/// Check whether a string is an accepted color value.
pub fn is_valid_color(value: &str) -> bool {
    let value = value.trim();
    hex_re().is_match(value) || rgb_re().is_match(value) || rgba_re().is_match(value)
}
