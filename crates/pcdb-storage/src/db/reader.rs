//! Database Reader - Looking Up and Enumerating Postcodes
//!
//! This module implements `DatabaseReader`, which serves queries against a
//! PCDB v3 buffer.
//!
//! ## What Does DatabaseReader Do?
//!
//! 1. **Validates the database** at construction (magic bytes, version,
//!    outward count, index bounds)
//! 2. **Parses the outward index eagerly** - 9 bytes per outward - so every
//!    query starts with an in-memory binary search
//! 3. **Derives everything else on demand**: sector tables, presence
//!    payloads, and coordinates are decoded per query straight off the
//!    underlying buffer
//! 4. **Never fails a query**: unknown postcodes, outwards, sectors, and
//!    units are `None`/empty results, not errors
//!
//! ## Lookup Path
//!
//! ```text
//! "sw1a 1aa"
//!    │ normalize
//!    ▼
//! (outward "SW1A", sector 1, unit 0)
//!    │ binary search over the outward index
//!    ▼
//! outward block ── linear scan of ≤10 sector entries
//!    │
//!    ▼
//! membership + rank ── bitmap popcount, or delta-list binary search
//!    │
//!    ▼
//! coordinate stream ── one bit-packed read at rank × (bits_lat + bits_lon)
//! ```
//!
//! ## Construction Sources
//!
//! - [`DatabaseReader::from_bytes`] serves an in-memory buffer
//! - [`DatabaseReader::open`] memory-maps a database file; queries read
//!   through the mapping without further I/O
//!
//! ## Thread Safety
//!
//! The reader holds no mutable state after construction; all queries take
//! `&self`, so any number may run concurrently over the shared buffer.
//!
//! ## Error Handling
//!
//! Construction returns errors for structural problems only:
//! - `BufferTooSmall`: shorter than the header or the declared index
//! - `InvalidMagic`: the file doesn't start with "PCDB"
//! - `UnsupportedVersion`: any version other than 3
//! - `InvalidOutwardCount`: a header declaring zero outwards
//! - `InvalidDatabase`: an index entry or sector table out of bounds

use std::fs::File;
use std::path::Path;

use bytes::{Buf, Bytes};
use memmap2::Mmap;
use pcdb_core::bitstream::BitReader;
use pcdb_core::postcode::{parse_postcode, unit_suffix, UNIT_COUNT};
use pcdb_core::record::dequantize;
use pcdb_core::varint::decode_delta_sequence;
use pcdb_core::{Error, Result};
use tracing::debug;

use super::{
    DatabaseStats, LookupResult, BITS_LAT_SHIFT, BITS_LON_SHIFT, BITS_WIDTH_MASK, DB_MAGIC,
    DB_VERSION, FLAG_BIT_PACKED, FLAG_LIST_MODE, HEADER_SIZE, OUTWARD_ENTRY_SIZE,
    SECTOR_ENTRY_SIZE, UNIT_BITMAP_SIZE,
};

/// Serves lookup and enumeration queries over a PCDB v3 buffer.
pub struct DatabaseReader {
    /// The complete database image
    data: Buffer,

    /// Parsed header fields
    header: Header,

    /// Outward index, sorted by code, parsed eagerly at construction
    outwards: Vec<OutwardEntry>,
}

/// The underlying byte source: a shared buffer or a file mapping.
enum Buffer {
    Shared(Bytes),
    Mapped(Mmap),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Shared(bytes) => bytes,
            Buffer::Mapped(mmap) => mmap,
        }
    }
}

#[derive(Debug, Clone)]
struct Header {
    outward_count: u16,
    total_unit_count: u32,
    lat_offset: i32,
    lon_offset: i32,
}

#[derive(Debug, Clone)]
struct OutwardEntry {
    /// Outward code with the NUL padding stripped
    code: String,
    sector_count: u8,
    /// Absolute offset of the outward block
    offset: u32,
}

/// One parsed 14-byte sector table entry.
struct SectorEntry {
    number: u8,
    unit_count: u16,
    units_rel_off: u32,
    base_lat: i32,
    base_lon: i32,
    list_mode: bool,
    bits_lat: u32,
    bits_lon: u32,
}

impl DatabaseReader {
    /// Open a database from an in-memory buffer.
    pub fn from_bytes(data: Bytes) -> Result<Self> {
        let (header, outwards) = Self::parse_layout(&data)?;
        Ok(Self {
            data: Buffer::Shared(data),
            header,
            outwards,
        })
    }

    /// Open a database file by memory-mapping it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let (header, outwards) = Self::parse_layout(&mmap)?;
        Ok(Self {
            data: Buffer::Mapped(mmap),
            header,
            outwards,
        })
    }

    /// Validate the header and parse the outward index.
    fn parse_layout(data: &[u8]) -> Result<(Header, Vec<OutwardEntry>)> {
        if data.len() < HEADER_SIZE {
            return Err(Error::BufferTooSmall { len: data.len() });
        }

        let mut cursor = &data[..HEADER_SIZE];

        let mut magic = [0u8; 4];
        cursor.copy_to_slice(&mut magic);
        if magic != DB_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let version = cursor.get_u8();
        if version != DB_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let _flags = cursor.get_u8();
        let outward_count = cursor.get_u16_le();
        if outward_count == 0 {
            return Err(Error::InvalidOutwardCount(outward_count));
        }

        let total_unit_count = cursor.get_u32_le();
        let lat_offset = cursor.get_i32_le();
        let lon_offset = cursor.get_i32_le();

        let index_end = HEADER_SIZE + OUTWARD_ENTRY_SIZE * outward_count as usize;
        if data.len() < index_end {
            return Err(Error::BufferTooSmall { len: data.len() });
        }

        let mut outwards = Vec::with_capacity(outward_count as usize);
        let mut cursor = &data[HEADER_SIZE..index_end];
        for _ in 0..outward_count {
            let mut code_bytes = [0u8; 4];
            cursor.copy_to_slice(&mut code_bytes);
            let code_len = code_bytes.iter().position(|&b| b == 0).unwrap_or(4);
            let code = std::str::from_utf8(&code_bytes[..code_len])
                .map_err(|_| Error::InvalidDatabase("non-ASCII outward code".to_string()))?
                .to_string();

            let sector_count = cursor.get_u8();
            let offset = cursor.get_u32_le();

            let table_end = offset as usize + SECTOR_ENTRY_SIZE * sector_count as usize;
            if table_end > data.len() {
                return Err(Error::InvalidDatabase(format!(
                    "outward block for {} extends past end of buffer",
                    code
                )));
            }

            outwards.push(OutwardEntry {
                code,
                sector_count,
                offset,
            });
        }

        let header = Header {
            outward_count,
            total_unit_count,
            lat_offset,
            lon_offset,
        };

        debug!(
            outwards = header.outward_count,
            units = header.total_unit_count,
            size = data.len(),
            "database opened"
        );

        Ok((header, outwards))
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Look up a single postcode.
    ///
    /// Returns `None` for malformed input and for well-formed postcodes
    /// that are not in the database; never errors.
    pub fn lookup(&self, postcode: &str) -> Option<LookupResult> {
        let parsed = parse_postcode(postcode)?;
        let entry = self.find_outward(&parsed.outward)?;
        let sector = self.find_sector(entry, parsed.sector)?;

        let data = self.data.as_slice();
        let blob = entry.offset as usize + sector.units_rel_off as usize;

        let (rank, coord_start) = if sector.list_mode {
            let mut cursor = &data[blob..];
            let before = cursor.remaining();
            let indexes = decode_delta_sequence(&mut cursor, sector.unit_count as usize);
            let consumed = before - cursor.remaining();
            let rank = indexes.binary_search(&parsed.unit_index).ok()?;
            (rank, blob + consumed)
        } else {
            let bitmap = &data[blob..blob + UNIT_BITMAP_SIZE];
            let byte = (parsed.unit_index >> 3) as usize;
            let bit = (parsed.unit_index & 7) as u32;
            if bitmap[byte] & (1 << bit) == 0 {
                return None;
            }
            // Rank = set bits strictly before unit_index
            let rank = bitmap[..byte].iter().map(|b| b.count_ones()).sum::<u32>()
                + (bitmap[byte] & ((1u16 << bit) - 1) as u8).count_ones();
            (rank as usize, blob + UNIT_BITMAP_SIZE)
        };

        let (lat, lon) = self.read_coords(&sector, coord_start, rank);
        let postcode = parsed.format();
        Some(LookupResult {
            postcode,
            outward: parsed.outward,
            lat,
            lon,
        })
    }

    /// Whether a postcode string parses and is present in the database.
    pub fn is_valid_postcode(&self, postcode: &str) -> bool {
        self.lookup(postcode).is_some()
    }

    /// Enumerate every postcode under an outward code, ordered by
    /// ascending sector then ascending unit index.
    ///
    /// An unknown outward yields an empty list.
    pub fn enumerate_outward(&self, outward: &str) -> Vec<LookupResult> {
        let code = normalize_outward(outward);
        let Some(entry) = self.find_outward(&code) else {
            return Vec::new();
        };

        let data = self.data.as_slice();
        let mut results = Vec::new();

        for i in 0..entry.sector_count as usize {
            let sector = self.sector_at(entry, i);
            let blob = entry.offset as usize + sector.units_rel_off as usize;

            let (indexes, coord_start) = if sector.list_mode {
                let mut cursor = &data[blob..];
                let before = cursor.remaining();
                let indexes = decode_delta_sequence(&mut cursor, sector.unit_count as usize);
                let consumed = before - cursor.remaining();
                (indexes, blob + consumed)
            } else {
                let bitmap = &data[blob..blob + UNIT_BITMAP_SIZE];
                let mut indexes = Vec::with_capacity(sector.unit_count as usize);
                for index in 0..UNIT_COUNT {
                    if bitmap[(index >> 3) as usize] & (1 << (index & 7)) != 0 {
                        indexes.push(index);
                    }
                }
                (indexes, blob + UNIT_BITMAP_SIZE)
            };

            // Units are stored in ascending index order, so one sequential
            // pass over the stream visits them in rank order.
            let mut reader = BitReader::new(&data[coord_start..]);
            for index in indexes {
                let lat_delta = reader.read_bits(sector.bits_lat);
                let lon_delta = reader.read_bits(sector.bits_lon);
                let [c1, c2] = unit_suffix(index);
                results.push(LookupResult {
                    postcode: format!("{} {}{}{}", code, sector.number, c1, c2),
                    outward: code.clone(),
                    lat: dequantize(self.header.lat_offset + sector.base_lat + lat_delta as i32),
                    lon: dequantize(self.header.lon_offset + sector.base_lon + lon_delta as i32),
                });
            }
        }

        results
    }

    /// All outward codes, sorted lexicographically.
    pub fn outward_list(&self) -> Vec<String> {
        self.outwards.iter().map(|e| e.code.clone()).collect()
    }

    /// Outward codes starting with the given prefix (uppercased,
    /// whitespace-stripped before matching).
    pub fn find_nearby_outwards(&self, prefix: &str) -> Vec<String> {
        let prefix = normalize_outward(prefix);
        let start = self
            .outwards
            .partition_point(|e| e.code.as_str() < prefix.as_str());
        self.outwards[start..]
            .iter()
            .take_while(|e| e.code.starts_with(&prefix))
            .map(|e| e.code.clone())
            .collect()
    }

    /// Whole-database statistics.
    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            total_outwards: self.header.outward_count,
            total_postcodes: self.header.total_unit_count,
            file_size: self.data.as_slice().len() as u64,
        }
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    fn find_outward(&self, code: &str) -> Option<&OutwardEntry> {
        self.outwards
            .binary_search_by(|e| e.code.as_str().cmp(code))
            .ok()
            .map(|i| &self.outwards[i])
    }

    /// Linear scan of the outward's sector table for a sector number.
    fn find_sector(&self, entry: &OutwardEntry, number: u8) -> Option<SectorEntry> {
        (0..entry.sector_count as usize)
            .map(|i| self.sector_at(entry, i))
            .find(|s| s.number == number)
    }

    fn sector_at(&self, entry: &OutwardEntry, index: usize) -> SectorEntry {
        let data = self.data.as_slice();
        let start = entry.offset as usize + index * SECTOR_ENTRY_SIZE;
        parse_sector_entry(&data[start..start + SECTOR_ENTRY_SIZE])
    }

    /// Decode the coordinate pair at `rank` in a sector's bit-packed
    /// stream and reconstruct absolute degrees.
    fn read_coords(&self, sector: &SectorEntry, coord_start: usize, rank: usize) -> (f64, f64) {
        let data = self.data.as_slice();
        let bits_per_unit = (sector.bits_lat + sector.bits_lon) as usize;

        let mut reader = BitReader::new(&data[coord_start..]);
        reader.seek(rank * bits_per_unit);
        let lat_delta = reader.read_bits(sector.bits_lat);
        let lon_delta = reader.read_bits(sector.bits_lon);

        (
            dequantize(self.header.lat_offset + sector.base_lat + lat_delta as i32),
            dequantize(self.header.lon_offset + sector.base_lon + lon_delta as i32),
        )
    }
}

fn parse_sector_entry(bytes: &[u8]) -> SectorEntry {
    let number = bytes[0];
    let unit_count = u16::from_le_bytes([bytes[1], bytes[2]]);
    let units_rel_off = u32::from_le_bytes([bytes[3], bytes[4], bytes[5], 0]);
    let base_lat = i24_from_le([bytes[6], bytes[7], bytes[8]]);
    let base_lon = i24_from_le([bytes[9], bytes[10], bytes[11]]);
    let flags = u16::from_le_bytes([bytes[12], bytes[13]]);

    // v3 always bit-packs coordinates; anything else is corruption
    assert!(
        flags & FLAG_BIT_PACKED != 0,
        "sector without bit-packed coordinate stream"
    );

    SectorEntry {
        number,
        unit_count,
        units_rel_off,
        base_lat,
        base_lon,
        list_mode: flags & FLAG_LIST_MODE != 0,
        bits_lat: ((flags >> BITS_LAT_SHIFT) & BITS_WIDTH_MASK) as u32,
        bits_lon: ((flags >> BITS_LON_SHIFT) & BITS_WIDTH_MASK) as u32,
    }
}

/// Sign-extend a little-endian 24-bit field.
fn i24_from_le(bytes: [u8; 3]) -> i32 {
    let raw = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]);
    ((raw << 8) as i32) >> 8
}

/// Uppercase and strip whitespace, mirroring the normalizer's treatment
/// of the outward part.
fn normalize_outward(outward: &str) -> String {
    outward
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::writer::DatabaseWriter;
    use pcdb_core::PostcodeRecord;

    fn build(records: &[(&str, f64, f64)]) -> DatabaseReader {
        let mut writer = DatabaseWriter::new();
        for &(postcode, lat, lon) in records {
            writer.add_record(&PostcodeRecord::new(postcode, lat, lon));
        }
        DatabaseReader::from_bytes(Bytes::from(writer.finish())).unwrap()
    }

    fn sample() -> DatabaseReader {
        build(&[
            ("M1 1AA", 53.4808, -2.2426),
            ("M1 1AB", 53.4809, -2.2427),
            ("M1 2AA", 53.4810, -2.2430),
            ("SW1A 1AA", 51.5014, -0.1419),
            ("SW1A 1AB", 51.5015, -0.1420),
        ])
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-5,
            "{} not within a quantum of {}",
            actual,
            expected
        );
    }

    // ---------------------------------------------------------------
    // Lookup hits
    // ---------------------------------------------------------------

    #[test]
    fn test_lookup_hit() {
        let reader = sample();
        let hit = reader.lookup("M1 1AA").unwrap();
        assert_eq!(hit.postcode, "M1 1AA");
        assert_eq!(hit.outward, "M1");
        assert_close(hit.lat, 53.4808);
        assert_close(hit.lon, -2.2426);
    }

    #[test]
    fn test_lookup_every_record() {
        let records = [
            ("M1 1AA", 53.4808, -2.2426),
            ("M1 1AB", 53.4809, -2.2427),
            ("M1 2AA", 53.4810, -2.2430),
            ("SW1A 1AA", 51.5014, -0.1419),
            ("SW1A 1AB", 51.5015, -0.1420),
        ];
        let reader = build(&records);
        for (postcode, lat, lon) in records {
            let hit = reader.lookup(postcode).unwrap();
            assert_close(hit.lat, lat);
            assert_close(hit.lon, lon);
        }
    }

    #[test]
    fn test_lookup_case_and_whitespace_insensitive() {
        let reader = sample();
        let expected = reader.lookup("M1 1AA").unwrap();
        for variant in ["m1 1aa", " M1  1AA ", "M11AA", "m11aa"] {
            assert_eq!(reader.lookup(variant), Some(expected.clone()), "{}", variant);
        }
    }

    #[test]
    fn test_lookup_bitmap_mode_sector() {
        // A dense sector forces bitmap mode; rank must still land on the
        // right coordinate pair
        let records: Vec<(String, f64, f64)> = (0..676u16)
            .map(|i| {
                let c1 = (b'A' + (i / 26) as u8) as char;
                let c2 = (b'A' + (i % 26) as u8) as char;
                (
                    format!("M1 1{}{}", c1, c2),
                    53.0 + i as f64 * 1e-5,
                    -2.0 - i as f64 * 1e-5,
                )
            })
            .collect();

        let mut writer = DatabaseWriter::new();
        for (postcode, lat, lon) in &records {
            writer.add_record(&PostcodeRecord::new(postcode.clone(), *lat, *lon));
        }
        let reader = DatabaseReader::from_bytes(Bytes::from(writer.finish())).unwrap();

        for (postcode, lat, lon) in &records {
            let hit = reader.lookup(postcode).unwrap();
            assert_close(hit.lat, *lat);
            assert_close(hit.lon, *lon);
        }
    }

    // ---------------------------------------------------------------
    // Lookup misses
    // ---------------------------------------------------------------

    #[test]
    fn test_lookup_unknown_outward() {
        assert_eq!(sample().lookup("XX1 1XX"), None);
    }

    #[test]
    fn test_lookup_unknown_sector() {
        assert_eq!(sample().lookup("M1 9AA"), None);
    }

    #[test]
    fn test_lookup_unknown_unit() {
        assert_eq!(sample().lookup("M1 1ZZ"), None);
    }

    #[test]
    fn test_lookup_malformed_input() {
        let reader = sample();
        assert_eq!(reader.lookup(""), None);
        assert_eq!(reader.lookup("   "), None);
        assert_eq!(reader.lookup("M1"), None);
        assert_eq!(reader.lookup("M1 111"), None);
    }

    #[test]
    fn test_is_valid_postcode() {
        let reader = sample();
        assert!(reader.is_valid_postcode("m1 1aa"));
        assert!(!reader.is_valid_postcode("XX1 1XX"));
        assert!(!reader.is_valid_postcode("garbage"));
    }

    // ---------------------------------------------------------------
    // Enumeration
    // ---------------------------------------------------------------

    #[test]
    fn test_enumerate_outward() {
        let reader = sample();
        let results = reader.enumerate_outward("M1");
        let postcodes: Vec<&str> = results.iter().map(|r| r.postcode.as_str()).collect();
        assert_eq!(postcodes, ["M1 1AA", "M1 1AB", "M1 2AA"]);
    }

    #[test]
    fn test_enumerate_matches_lookup() {
        let reader = sample();
        for hit in reader.enumerate_outward("M1") {
            assert_eq!(reader.lookup(&hit.postcode), Some(hit.clone()));
        }
    }

    #[test]
    fn test_enumerate_unknown_outward_is_empty() {
        assert!(sample().enumerate_outward("XX1").is_empty());
    }

    #[test]
    fn test_enumerate_lowercase_outward() {
        let reader = sample();
        assert_eq!(reader.enumerate_outward("m1"), reader.enumerate_outward("M1"));
    }

    // ---------------------------------------------------------------
    // Outward listing and prefix search
    // ---------------------------------------------------------------

    #[test]
    fn test_outward_list_sorted() {
        let reader = sample();
        assert_eq!(reader.outward_list(), ["M1", "SW1A"]);
    }

    #[test]
    fn test_find_nearby_outwards() {
        let reader = sample();
        assert_eq!(reader.find_nearby_outwards("SW"), ["SW1A"]);
        assert_eq!(reader.find_nearby_outwards("sw"), ["SW1A"]);
        assert_eq!(reader.find_nearby_outwards("M"), ["M1"]);
        assert!(reader.find_nearby_outwards("Z").is_empty());
    }

    #[test]
    fn test_find_nearby_outwards_empty_prefix_returns_all() {
        let reader = sample();
        assert_eq!(reader.find_nearby_outwards(""), reader.outward_list());
    }

    // ---------------------------------------------------------------
    // Stats
    // ---------------------------------------------------------------

    #[test]
    fn test_stats() {
        let reader = sample();
        let stats = reader.stats();
        assert_eq!(stats.total_outwards, 2);
        assert_eq!(stats.total_postcodes, 5);
        assert!(stats.file_size > HEADER_SIZE as u64);
    }

    // ---------------------------------------------------------------
    // Construction failures
    // ---------------------------------------------------------------

    #[test]
    fn test_reject_buffer_too_small() {
        let result = DatabaseReader::from_bytes(Bytes::from(vec![0u8; 10]));
        assert!(matches!(result, Err(Error::BufferTooSmall { len: 10 })));
    }

    #[test]
    fn test_reject_bad_magic() {
        let mut writer = DatabaseWriter::new();
        writer.add_record(&PostcodeRecord::new("M1 1AA", 53.4808, -2.2426));
        let mut bytes = writer.finish();
        bytes[0..4].copy_from_slice(b"XCDB");

        let result = DatabaseReader::from_bytes(Bytes::from(bytes));
        assert!(matches!(result, Err(Error::InvalidMagic)));
    }

    #[test]
    fn test_reject_wrong_version() {
        let mut writer = DatabaseWriter::new();
        writer.add_record(&PostcodeRecord::new("M1 1AA", 53.4808, -2.2426));
        let mut bytes = writer.finish();
        bytes[4] = 2;

        let result = DatabaseReader::from_bytes(Bytes::from(bytes));
        assert!(matches!(result, Err(Error::UnsupportedVersion(2))));
    }

    #[test]
    fn test_reject_zero_outwards() {
        // An empty build is a valid header but not a readable database
        let bytes = DatabaseWriter::new().finish();
        let result = DatabaseReader::from_bytes(Bytes::from(bytes));
        assert!(matches!(result, Err(Error::InvalidOutwardCount(0))));
    }

    #[test]
    fn test_reject_truncated_index() {
        let mut writer = DatabaseWriter::new();
        writer.add_record(&PostcodeRecord::new("M1 1AA", 53.4808, -2.2426));
        let mut bytes = writer.finish();
        bytes.truncate(HEADER_SIZE + 4);

        let result = DatabaseReader::from_bytes(Bytes::from(bytes));
        assert!(matches!(result, Err(Error::BufferTooSmall { .. })));
    }

    #[test]
    fn test_reject_block_past_end() {
        let mut writer = DatabaseWriter::new();
        writer.add_record(&PostcodeRecord::new("M1 1AA", 53.4808, -2.2426));
        let mut bytes = writer.finish();
        // Point the outward block way past the end of the buffer
        let offset_pos = HEADER_SIZE + 5;
        bytes[offset_pos..offset_pos + 4].copy_from_slice(&u32::MAX.to_le_bytes());

        let result = DatabaseReader::from_bytes(Bytes::from(bytes));
        assert!(matches!(result, Err(Error::InvalidDatabase(_))));
    }

    // ---------------------------------------------------------------
    // 24-bit field decoding
    // ---------------------------------------------------------------

    #[test]
    fn test_i24_sign_extension() {
        assert_eq!(i24_from_le([0x00, 0x00, 0x00]), 0);
        assert_eq!(i24_from_le([0x01, 0x00, 0x00]), 1);
        assert_eq!(i24_from_le([0xFF, 0xFF, 0x7F]), (1 << 23) - 1);
        assert_eq!(i24_from_le([0xFF, 0xFF, 0xFF]), -1);
        assert_eq!(i24_from_le([0x00, 0x00, 0x80]), -(1 << 23));
    }
}
