//! PCDB v3 Database Format
//!
//! This module implements the binary file format for the postcode database.
//!
//! ## Database File Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Header (32 bytes)                                           │
//! │ - Magic bytes: "PCDB" (4 bytes)                             │
//! │ - Version: 3 (1 byte)                                       │
//! │ - Flags: 0 (1 byte)                                         │
//! │ - Outward count (2 bytes)                                   │
//! │ - Total unit count (4 bytes)                                │
//! │ - Global latitude offset (4 bytes, signed)                  │
//! │ - Global longitude offset (4 bytes, signed)                 │
//! │ - Reserved (12 bytes, zero)                                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Outward index (9 bytes x outward count, sorted by code)     │
//! │ - Outward code, NUL-padded ASCII (4 bytes)                  │
//! │ - Sector count (1 byte)                                     │
//! │ - Absolute offset of the outward block (4 bytes)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Outward block for "AB1"                                     │
//! │ - Sector table (14 bytes x sector count, ascending)         │
//! │ - Unit-data blobs, one per sector, concatenated             │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Outward block for "AB2"                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │ ...                                                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All multi-byte integers are little-endian.
//!
//! ## Sector Table Entry (14 bytes)
//!
//! ```text
//! sector_number   u8   - the sector digit 0-9
//! unit_count      u16  - units present in this sector
//! units_rel_off   u24  - blob offset relative to the outward block start
//! base_lat_stored i24  - sector's min quantized lat minus the global offset
//! base_lon_stored i24  - sector's min quantized lon minus the global offset
//! flags_and_bits  u16  - bit 0: coordinates bit-packed (always 1 in v3)
//!                        bit 1: list mode (else bitmap mode)
//!                        bits 2-6:  lat delta width in bits
//!                        bits 7-11: lon delta width in bits
//!                        bits 12-15: reserved, zero
//! ```
//!
//! ## Unit-Data Blob
//!
//! Each sector's blob is a unit-presence payload immediately followed by the
//! coordinate stream:
//!
//! - **Bitmap mode**: exactly 85 bytes (680 bits) where bit `unit_index` is
//!   set for every present unit. Only bits 0-675 are meaningful; the 4
//!   slack bits are written zero and ignored. The bitmap doubles as a rank
//!   oracle: the number of set bits strictly before `unit_index` is the
//!   unit's ordinal in the coordinate stream.
//! - **List mode**: the sorted unit indexes as a varint delta sequence
//!   (first absolute, then gaps), chosen only when its total length is
//!   strictly under 85 bytes.
//!
//! The coordinate stream packs, for each unit in ascending index order, an
//! unsigned lat delta of `bits_lat` bits then a lon delta of `bits_lon`
//! bits, LSB-first with no per-value padding, zero-padded to a byte
//! boundary at the end of the blob.
//!
//! ## Why This Design?
//!
//! ### Adaptive presence encoding
//! A dense sector (hundreds of units) wants the flat 85-byte bitmap with
//! O(1) membership and cheap popcount rank. A thin sector (a handful of
//! units) wants the delta list. The encoder compares exact byte counts per
//! sector and keeps whichever is smaller, so the choice is provably minimal
//! for the two candidate encodings.
//!
//! ### Two-level coordinate offsets
//! The header's global offsets shift every sector base into a 24-bit range;
//! each unit then stores only its delta from the sector minimum at the
//! sector's own bit width. A record costs a few bits instead of 8 bytes.
//!
//! ### Fixed-width tables
//! The outward index and sector tables are fixed-size records, so lookup
//! is a binary search plus direct offset arithmetic - no scanning.
//!
//! ## Usage
//!
//! ### Building a Database
//! ```ignore
//! let mut writer = DatabaseWriter::new();
//! for record in records {
//!     writer.add_record(&record);
//! }
//! let db_bytes = writer.finish();
//! ```
//!
//! ### Reading a Database
//! ```ignore
//! let reader = DatabaseReader::open("postcodes.pcod")?;
//! if let Some(hit) = reader.lookup("SW1A 1AA") {
//!     println!("{}: {}, {}", hit.postcode, hit.lat, hit.lon);
//! }
//! ```

mod reader;
mod writer;

pub use reader::DatabaseReader;
pub use writer::{build_database, BuildSummary, DatabaseWriter};

use serde::{Deserialize, Serialize};

/// Magic bytes for database files: "PCDB"
pub const DB_MAGIC: [u8; 4] = *b"PCDB";

/// The only supported format version
pub const DB_VERSION: u8 = 3;

/// Header size (32 bytes)
pub const HEADER_SIZE: usize = 32;

/// Outward index entry size (9 bytes)
pub const OUTWARD_ENTRY_SIZE: usize = 9;

/// Sector table entry size (14 bytes)
pub const SECTOR_ENTRY_SIZE: usize = 14;

/// Unit presence bitmap size: 680 bits for 676 possible units
pub const UNIT_BITMAP_SIZE: usize = 85;

/// flags_and_bits bit 0: coordinate stream is bit-packed
pub const FLAG_BIT_PACKED: u16 = 1 << 0;

/// flags_and_bits bit 1: unit presence is a delta list, not a bitmap
pub const FLAG_LIST_MODE: u16 = 1 << 1;

/// flags_and_bits bits 2-6: lat delta width
pub const BITS_LAT_SHIFT: u16 = 2;

/// flags_and_bits bits 7-11: lon delta width
pub const BITS_LON_SHIFT: u16 = 7;

/// Width of each delta-width field (5 bits, values 0-31)
pub const BITS_WIDTH_MASK: u16 = 0x1F;

/// A successful lookup or enumeration hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Canonical postcode rendering ("M1 1AA")
    pub postcode: String,

    /// Outward code ("M1")
    pub outward: String,

    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,
}

/// Whole-database statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    /// Number of distinct outward codes
    pub total_outwards: u16,

    /// Number of postcodes stored
    pub total_postcodes: u32,

    /// Size of the database file in bytes
    pub file_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Format constants
    // ---------------------------------------------------------------

    #[test]
    fn test_magic_bytes() {
        assert_eq!(&DB_MAGIC, b"PCDB");
    }

    #[test]
    fn test_bitmap_covers_unit_range() {
        // 85 bytes = 680 bits, enough for 676 units with 4 slack bits
        assert!(UNIT_BITMAP_SIZE * 8 >= 676);
        assert!(UNIT_BITMAP_SIZE * 8 - 676 < 8);
    }

    #[test]
    fn test_flag_bits_disjoint() {
        assert_eq!(FLAG_BIT_PACKED & FLAG_LIST_MODE, 0);
        // Width fields sit above the flag bits
        assert!(BITS_LAT_SHIFT >= 2);
        assert_eq!(BITS_LON_SHIFT, BITS_LAT_SHIFT + 5);
    }

    // ---------------------------------------------------------------
    // Serde on public result types
    // ---------------------------------------------------------------

    #[test]
    fn test_lookup_result_serde_roundtrip() {
        let hit = LookupResult {
            postcode: "M1 1AA".to_string(),
            outward: "M1".to_string(),
            lat: 53.4808,
            lon: -2.2426,
        };
        let json = serde_json::to_string(&hit).expect("serialize");
        let deserialized: LookupResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(hit, deserialized);
    }

    #[test]
    fn test_stats_serde_json_fields() {
        let stats = DatabaseStats {
            total_outwards: 2,
            total_postcodes: 5,
            file_size: 123,
        };
        let val: serde_json::Value = serde_json::to_value(stats).expect("to_value");
        assert_eq!(val["total_outwards"], 2);
        assert_eq!(val["total_postcodes"], 5);
        assert_eq!(val["file_size"], 123);
    }
}
