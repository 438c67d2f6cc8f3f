//! Postcode Normalizer
//!
//! This module parses raw UK postcode strings into the fixed decomposition
//! the database indexes on.
//!
//! ## Anatomy of a UK Postcode
//!
//! ```text
//!   SW1A 1AA
//!   └┬─┘ │└┬┘
//!    │   │ └── unit: two letters A-Z (676 combinations)
//!    │   └──── sector: one decimal digit
//!    └──────── outward: 2-4 alphanumeric characters
//! ```
//!
//! The inward code is always the last three characters (digit + two letters);
//! everything before it is the outward. This holds regardless of spacing, so
//! `"M1 1AA"`, `"M11AA"` and `" m1  1aa "` all decompose identically.
//!
//! ## Unit Index
//!
//! The two unit letters are packed into a single integer:
//! `unit_index = 26 * (c1 - 'A') + (c2 - 'A')`, giving a value in `0..676`.
//! This is the bit position in a sector's presence bitmap and the sort key
//! for its unit list.
//!
//! ## Failure Semantics
//!
//! Parsing is a total function: any malformed input returns `None`, never an
//! error or panic. Callers translate `None` into a null lookup result or a
//! silently dropped build row.
//!
//! ## Example
//! ```
//! use pcdb_core::postcode::parse_postcode;
//!
//! let parsed = parse_postcode("sw1a 1aa").unwrap();
//! assert_eq!(parsed.outward, "SW1A");
//! assert_eq!(parsed.sector, 1);
//! assert_eq!(parsed.unit_index, 0); // "AA"
//! ```

/// Number of possible two-letter units within a sector (26 * 26).
pub const UNIT_COUNT: u16 = 676;

/// A postcode decomposed into the parts the database indexes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPostcode {
    /// Outward code, uppercased, 1-4 ASCII alphanumeric characters
    pub outward: String,

    /// Sector digit, 0-9
    pub sector: u8,

    /// Packed unit letters, 0-675
    pub unit_index: u16,
}

impl ParsedPostcode {
    /// Render the canonical `"OUTWARD SECTORUNIT"` form of this postcode.
    pub fn format(&self) -> String {
        let [c1, c2] = unit_suffix(self.unit_index);
        format!("{} {}{}{}", self.outward, self.sector, c1, c2)
    }
}

/// Parse a raw postcode string into its `(outward, sector, unit)` parts.
///
/// Strips all whitespace, uppercases, and splits off the trailing three
/// characters as the inward code. Returns `None` if the input is shorter
/// than four characters, the inward is not digit + letter + letter, or the
/// outward is empty, longer than four characters, or not alphanumeric.
pub fn parse_postcode(input: &str) -> Option<ParsedPostcode> {
    let cleaned: Vec<char> = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if cleaned.len() < 4 {
        return None;
    }

    let (prefix, inward) = cleaned.split_at(cleaned.len() - 3);

    let sector = inward[0].to_digit(10)? as u8;
    let c1 = inward[1];
    let c2 = inward[2];
    if !c1.is_ascii_uppercase() || !c2.is_ascii_uppercase() {
        return None;
    }
    let unit_index = 26 * (c1 as u16 - 'A' as u16) + (c2 as u16 - 'A' as u16);

    // The on-disk outward field is 4 NUL-padded ASCII bytes.
    if prefix.is_empty() || prefix.len() > 4 {
        return None;
    }
    if !prefix.iter().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(ParsedPostcode {
        outward: prefix.iter().collect(),
        sector,
        unit_index,
    })
}

/// Translate a unit index back to its two-letter suffix.
///
/// Inverse of the packing in [`parse_postcode`]. The index must be in
/// `0..676`; anything else is an internal invariant violation.
pub fn unit_suffix(unit_index: u16) -> [char; 2] {
    assert!(
        unit_index < UNIT_COUNT,
        "unit index {} out of range",
        unit_index
    );
    let c1 = (b'A' + (unit_index / 26) as u8) as char;
    let c2 = (b'A' + (unit_index % 26) as u8) as char;
    [c1, c2]
}
