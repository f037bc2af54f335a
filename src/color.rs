//! Color helpers - hex normalization and readable text color
//!
//! Colors travel through the catalog as normalized hex strings
//! (`#RGB` or `#RRGGBB`). Anything else collapses to a neutral gray.

use serde::Serialize;
use std::fmt;

/// Neutral gray used for missing or malformed colors
pub const DEFAULT_COLOR: &str = "#E5E7EB";

/// Text color for light backgrounds
pub const DARK_TEXT: &str = "#111827";

/// Text color for dark backgrounds
pub const LIGHT_TEXT: &str = "#FFFFFF";

/// Luminance above which a background counts as light
const LIGHT_THRESHOLD: f64 = 0.62;

/// A normalized hex color
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Foreground color that stays readable on this background
    pub fn text_color(&self) -> &'static str {
        text_color_for(&self.0)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a raw color cell.
///
/// Missing or blank input gives the default gray. A missing leading `#` is
/// added. The result is accepted only when it is 4 or 7 characters long.
/// Never fails.
pub fn normalize(raw: Option<&str>) -> HexColor {
    let s = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return HexColor::default(),
    };

    let candidate = if s.starts_with('#') {
        s.to_string()
    } else {
        format!("#{}", s)
    };

    // Length is counted in characters, not bytes
    match candidate.chars().count() {
        4 | 7 => HexColor(candidate),
        _ => HexColor::default(),
    }
}

/// Parse a hex color into RGB bytes.
///
/// Short `#RGB` forms are expanded by doubling each digit. Returns `None`
/// when the digits do not parse.
pub fn parse_rgb(hex: &str) -> Option<[u8; 3]> {
    let h = hex.trim_start_matches('#');

    let expanded: String = if h.chars().count() == 3 {
        h.chars().flat_map(|c| [c, c]).collect()
    } else {
        h.to_string()
    };

    let channel = |range: std::ops::Range<usize>| -> Option<u8> {
        let digits = expanded.get(range)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u8::from_str_radix(digits, 16).ok()
    };

    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Pick dark or white text for a background color.
///
/// Uses `L = (0.299R + 0.587G + 0.114B) / 255` and returns dark text when
/// `L > 0.62`. Unparseable input gets dark text.
pub fn text_color_for(bg: &str) -> &'static str {
    let Some([r, g, b]) = parse_rgb(bg) else {
        return DARK_TEXT;
    };

    let lum = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
    if lum > LIGHT_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}
