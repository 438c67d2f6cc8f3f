//! CSV Input Parsing
//!
//! The build path consumes a 3-column `postcode,latitude,longitude` CSV
//! produced by an upstream dataset cleaner. The contract is deliberately
//! small:
//!
//! - UTF-8 lines, comma-separated, exactly three fields per non-empty line
//! - Fields may be surrounded by double quotes, which are stripped
//! - Whitespace around fields is trimmed
//! - Anything else - wrong field count, non-numeric coordinates - is a
//!   parse failure and the row is dropped
//!
//! A header line needs no special handling: `"latitude"` is not a number,
//! so it drops like any other malformed row.

use pcdb_core::PostcodeRecord;

/// Parse one CSV line into a record.
///
/// Returns `None` when the line does not have exactly three fields or the
/// coordinates are not numeric. The postcode field is passed through
/// verbatim; its validity is the normalizer's concern, not the CSV layer's.
pub fn parse_csv_line(line: &str) -> Option<PostcodeRecord> {
    let mut fields = line.split(',');

    let postcode = clean_field(fields.next()?);
    let lat: f64 = clean_field(fields.next()?).parse().ok()?;
    let lon: f64 = clean_field(fields.next()?).parse().ok()?;

    if fields.next().is_some() {
        return None;
    }

    Some(PostcodeRecord::new(postcode, lat, lon))
}

/// Trim surrounding whitespace and one layer of double quotes.
fn clean_field(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim()
}
