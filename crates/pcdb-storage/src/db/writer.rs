//! Database Writer - Building the Binary Postcode Database
//!
//! This module implements `DatabaseWriter`, which accumulates postcode
//! records in memory and serializes them into a PCDB v3 file image.
//!
//! ## What Does DatabaseWriter Do?
//!
//! 1. **Accumulates records** into an outward -> sector -> unit tree,
//!    quantizing coordinates to fixed-point on the way in
//! 2. **Drops duplicates** - the first record for a unit wins
//! 3. **Computes global offsets** so sector bases fit in 24 bits
//! 4. **Chooses a storage mode per sector** - fixed 85-byte bitmap or
//!    varint delta list, whichever is smaller
//! 5. **Computes minimal bit widths** for each sector's coordinate deltas
//! 6. **Lays out and serializes** the header, outward index, and outward
//!    blocks in one sequential pass
//!
//! ## Determinism
//!
//! The grouping tree is ordered (BTreeMap), the layout is a pure function
//! of its contents, and serialization appends in layout order, so identical
//! input records produce byte-identical output across runs and platforms.
//!
//! ## Error Handling
//!
//! `add_record` cannot fail: rows whose postcode does not parse, and
//! duplicate units, are dropped and reported through the return value.
//! `finish` is infallible for any tree that satisfies the format's
//! invariants; a sector whose deltas exceed the 5-bit width fields or a
//! block that outgrows the u24 offset space indicates out-of-domain input
//! and trips an assertion. The end-to-end [`build_database`] path
//! propagates I/O errors only.
//!
//! ## Example Usage
//!
//! ```ignore
//! let mut writer = DatabaseWriter::new();
//! for record in records {
//!     writer.add_record(&record);
//! }
//! let db_bytes = writer.finish();
//! std::fs::write("postcodes.pcod", &db_bytes)?;
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bytes::{BufMut, BytesMut};
use pcdb_core::bitstream::BitWriter;
use pcdb_core::postcode::parse_postcode;
use pcdb_core::record::{quantize, PostcodeRecord};
use pcdb_core::varint::{delta_sequence_len, encode_delta_sequence};
use pcdb_core::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    DB_MAGIC, DB_VERSION, BITS_LAT_SHIFT, BITS_LON_SHIFT, FLAG_BIT_PACKED, FLAG_LIST_MODE,
    HEADER_SIZE, OUTWARD_ENTRY_SIZE, SECTOR_ENTRY_SIZE, UNIT_BITMAP_SIZE,
};
use crate::csv::parse_csv_line;

/// Builds a database file image from postcode records.
pub struct DatabaseWriter {
    /// Outward code -> sectors, kept sorted for deterministic layout
    outwards: BTreeMap<String, OutwardGroup>,

    /// Total units stored (duplicates excluded)
    unit_count: u32,
}

#[derive(Default)]
struct OutwardGroup {
    /// Sector digit -> units, kept in ascending sector order
    sectors: BTreeMap<u8, SectorGroup>,
}

struct SectorGroup {
    /// Unit index -> quantized (lat, lon); first record wins
    units: BTreeMap<u16, (i32, i32)>,
    lat_min: i32,
    lat_max: i32,
    lon_min: i32,
    lon_max: i32,
}

impl SectorGroup {
    fn new() -> Self {
        Self {
            units: BTreeMap::new(),
            lat_min: i32::MAX,
            lat_max: i32::MIN,
            lon_min: i32::MAX,
            lon_max: i32::MIN,
        }
    }
}

/// Per-sector layout computed ahead of serialization.
struct SectorPlan {
    number: u8,
    indexes: Vec<u16>,
    rel_off: u32,
    base_lat: i32,
    base_lon: i32,
    bits_lat: u32,
    bits_lon: u32,
    list_mode: bool,
    presence_len: usize,
    coord_len: usize,
}

/// Per-outward layout: absolute block offset plus its sector plans.
struct OutwardPlan {
    offset: u32,
    sectors: Vec<SectorPlan>,
}

impl DatabaseWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self {
            outwards: BTreeMap::new(),
            unit_count: 0,
        }
    }

    /// Add one record to the database.
    ///
    /// Returns `true` if the record was stored, `false` if it was dropped
    /// (unparseable postcode, or a duplicate of an already-stored unit).
    pub fn add_record(&mut self, record: &PostcodeRecord) -> bool {
        let Some(parsed) = parse_postcode(&record.postcode) else {
            return false;
        };

        let lat = quantize(record.lat);
        let lon = quantize(record.lon);

        let sector = self
            .outwards
            .entry(parsed.outward)
            .or_default()
            .sectors
            .entry(parsed.sector)
            .or_insert_with(SectorGroup::new);

        match sector.units.entry(parsed.unit_index) {
            // First record wins; later coordinates for the same unit are dropped
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert((lat, lon));
                sector.lat_min = sector.lat_min.min(lat);
                sector.lat_max = sector.lat_max.max(lat);
                sector.lon_min = sector.lon_min.min(lon);
                sector.lon_max = sector.lon_max.max(lon);
                self.unit_count += 1;
                true
            }
        }
    }

    /// Encode a record slice straight to a database image.
    ///
    /// Convenience for tests and in-process pipelines; equivalent to
    /// feeding every record through [`DatabaseWriter::add_record`] and
    /// calling [`DatabaseWriter::finish`].
    pub fn encode_from_records(records: &[PostcodeRecord]) -> Vec<u8> {
        let mut writer = Self::new();
        for record in records {
            writer.add_record(record);
        }
        writer.finish()
    }

    /// Number of records stored so far (duplicates excluded).
    pub fn record_count(&self) -> u32 {
        self.unit_count
    }

    /// Number of distinct outward codes seen so far.
    pub fn outward_count(&self) -> usize {
        self.outwards.len()
    }

    /// Serialize the accumulated records into a complete database image.
    pub fn finish(self) -> Vec<u8> {
        // Global offsets: minima over all quantized coordinates
        let lat_offset = self
            .outwards
            .values()
            .flat_map(|o| o.sectors.values())
            .map(|s| s.lat_min)
            .min()
            .unwrap_or(0);
        let lon_offset = self
            .outwards
            .values()
            .flat_map(|o| o.sectors.values())
            .map(|s| s.lon_min)
            .min()
            .unwrap_or(0);

        // Layout pass: every size and offset is known before any byte is
        // written, so serialization can be a single sequential append.
        let mut plans = Vec::with_capacity(self.outwards.len());
        let mut offset = HEADER_SIZE + OUTWARD_ENTRY_SIZE * self.outwards.len();

        for group in self.outwards.values() {
            let block_offset = u32::try_from(offset).expect("database exceeds u32 offsets");
            let mut rel_off = SECTOR_ENTRY_SIZE * group.sectors.len();
            let mut sectors = Vec::with_capacity(group.sectors.len());

            for (&number, sector) in &group.sectors {
                let indexes: Vec<u16> = sector.units.keys().copied().collect();
                let bits_lat = width_for_delta((sector.lat_max - sector.lat_min) as u32);
                let bits_lon = width_for_delta((sector.lon_max - sector.lon_min) as u32);
                assert!(
                    bits_lat <= 31 && bits_lon <= 31,
                    "coordinate delta width exceeds the 5-bit field"
                );

                let base_lat = sector.lat_min - lat_offset;
                let base_lon = sector.lon_min - lon_offset;
                assert!(
                    (0..1 << 23).contains(&base_lat) && (0..1 << 23).contains(&base_lon),
                    "sector base exceeds the 24-bit field"
                );

                // List mode only when strictly smaller than the bitmap
                let list_len = delta_sequence_len(&indexes);
                let list_mode = list_len < UNIT_BITMAP_SIZE;
                let presence_len = if list_mode { list_len } else { UNIT_BITMAP_SIZE };
                let coord_len =
                    (indexes.len() * (bits_lat + bits_lon) as usize).div_ceil(8);

                assert!(rel_off < 1 << 24, "unit data offset exceeds the u24 field");
                sectors.push(SectorPlan {
                    number,
                    indexes,
                    rel_off: rel_off as u32,
                    base_lat,
                    base_lon,
                    bits_lat,
                    bits_lon,
                    list_mode,
                    presence_len,
                    coord_len,
                });

                rel_off += presence_len + coord_len;
            }

            offset += rel_off;
            plans.push(OutwardPlan {
                offset: block_offset,
                sectors,
            });
        }

        debug!(
            outwards = self.outwards.len(),
            units = self.unit_count,
            size = offset,
            "database layout computed"
        );

        // Serialization pass
        let mut buf = BytesMut::with_capacity(offset);

        // Header
        buf.put_slice(&DB_MAGIC);
        buf.put_u8(DB_VERSION);
        buf.put_u8(0); // flags
        buf.put_u16_le(self.outwards.len() as u16);
        buf.put_u32_le(self.unit_count);
        buf.put_i32_le(lat_offset);
        buf.put_i32_le(lon_offset);
        buf.put_bytes(0, 12); // reserved

        // Outward index, sorted by code
        for (code, plan) in self.outwards.keys().zip(&plans) {
            let mut padded = [0u8; 4];
            padded[..code.len()].copy_from_slice(code.as_bytes());
            buf.put_slice(&padded);
            buf.put_u8(plan.sectors.len() as u8);
            buf.put_u32_le(plan.offset);
        }

        // Outward blocks
        for (group, plan) in self.outwards.values().zip(&plans) {
            debug_assert_eq!(buf.len(), plan.offset as usize);

            // Sector table
            for sp in &plan.sectors {
                buf.put_u8(sp.number);
                buf.put_u16_le(sp.indexes.len() as u16);
                put_u24_le(&mut buf, sp.rel_off);
                put_i24_le(&mut buf, sp.base_lat);
                put_i24_le(&mut buf, sp.base_lon);

                let mut flags = FLAG_BIT_PACKED;
                if sp.list_mode {
                    flags |= FLAG_LIST_MODE;
                }
                flags |= (sp.bits_lat as u16) << BITS_LAT_SHIFT;
                flags |= (sp.bits_lon as u16) << BITS_LON_SHIFT;
                buf.put_u16_le(flags);
            }

            // Unit-data blobs, in sector-table order
            for sp in &plan.sectors {
                debug_assert_eq!(buf.len(), (plan.offset + sp.rel_off) as usize);
                let sector = &group.sectors[&sp.number];

                if sp.list_mode {
                    encode_delta_sequence(&mut buf, &sp.indexes);
                } else {
                    let mut bitmap = [0u8; UNIT_BITMAP_SIZE];
                    for &index in &sp.indexes {
                        bitmap[(index >> 3) as usize] |= 1 << (index & 7);
                    }
                    buf.put_slice(&bitmap);
                }

                let mut coords =
                    BitWriter::with_capacity(sp.indexes.len() * (sp.bits_lat + sp.bits_lon) as usize);
                for &index in &sp.indexes {
                    let (lat, lon) = sector.units[&index];
                    coords.write_bits((lat - sector.lat_min) as u32, sp.bits_lat);
                    coords.write_bits((lon - sector.lon_min) as u32, sp.bits_lon);
                }
                let coord_bytes = coords.finish();
                debug_assert_eq!(coord_bytes.len(), sp.coord_len);
                buf.put_slice(&coord_bytes);
            }
        }

        debug_assert_eq!(buf.len(), offset);
        buf.to_vec()
    }
}

impl Default for DatabaseWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal bit width for an unsigned delta: `ceil(log2(max + 1))`, 0 when
/// every delta is 0.
fn width_for_delta(max: u32) -> u32 {
    if max == 0 {
        0
    } else {
        32 - max.leading_zeros()
    }
}

fn put_u24_le(buf: &mut BytesMut, value: u32) {
    debug_assert!(value < 1 << 24);
    buf.put_slice(&value.to_le_bytes()[..3]);
}

fn put_i24_le(buf: &mut BytesMut, value: i32) {
    debug_assert!((-(1 << 23)..1 << 23).contains(&value));
    buf.put_slice(&value.to_le_bytes()[..3]);
}

/// Summary of an end-to-end database build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    /// Non-empty input lines seen
    pub records_read: u64,

    /// Lines dropped: bad field count, non-numeric coordinates,
    /// unparseable postcode, or duplicate unit
    pub records_dropped: u64,

    /// Distinct outward codes stored
    pub total_outwards: u16,

    /// Postcodes stored
    pub total_postcodes: u32,

    /// Output file size in bytes
    pub file_size: u64,
}

/// Build a database file from a 3-column `postcode,lat,lon` CSV.
///
/// Malformed rows and unparseable postcodes are dropped silently (they are
/// counted in the returned summary); only I/O errors propagate.
pub fn build_database(csv_path: &Path, out_path: &Path) -> Result<BuildSummary> {
    let file = File::open(csv_path)?;
    let mut writer = DatabaseWriter::new();
    let mut records_read = 0u64;
    let mut records_dropped = 0u64;

    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records_read += 1;

        match parse_csv_line(&line) {
            Some(record) if writer.add_record(&record) => {}
            _ => records_dropped += 1,
        }
    }

    let total_outwards = writer.outward_count() as u16;
    let total_postcodes = writer.record_count();
    let bytes = writer.finish();
    std::fs::write(out_path, &bytes)?;

    if records_dropped > 0 {
        warn!(dropped = records_dropped, "dropped input rows during build");
    }
    info!(
        records = records_read,
        stored = total_postcodes,
        outwards = total_outwards,
        size = bytes.len(),
        "database build complete"
    );

    Ok(BuildSummary {
        records_read,
        records_dropped,
        total_outwards,
        total_postcodes,
        file_size: bytes.len() as u64,
    })
}
