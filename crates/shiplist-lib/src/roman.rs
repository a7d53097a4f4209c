//! Tier label formatting.
//!
//! Report rows are labeled with the ship's tier rendered as a Roman
//! numeral. Tier 11 is the game's super-ship tier and is labeled with a
//! star glyph instead of a numeral.

use crate::error::{Error, Result};

/// Ordered value table for the subtractive Roman numeral encoding.
const ROMAN_TABLE: [(u16, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Marker used for the super-ship tier.
const SUPER_SHIP_MARKER: &str = "★";

/// Render a ship tier as its display label.
///
/// Tiers 1 through 10 map to the standard Roman numeral; tier 11 maps to
/// the star marker. Anything else is rejected rather than silently
/// rendered blank.
pub fn tier_label(tier: u8) -> Result<String> {
    match tier {
        11 => Ok(SUPER_SHIP_MARKER.to_string()),
        1..=10 => Ok(roman(u16::from(tier))),
        _ => Err(Error::UnsupportedTier { tier }),
    }
}

/// Greedy reduction against the ordered value table.
fn roman(mut value: u16) -> String {
    let mut encoded = String::new();
    for (step, glyphs) in ROMAN_TABLE {
        while value >= step {
            encoded.push_str(glyphs);
            value -= step;
        }
    }
    encoded
}
