//! Input Record and Coordinate Quantization
//!
//! This module defines `PostcodeRecord` - one row of the input dataset -
//! and the fixed-point quantization applied to its coordinates.
//!
//! ## Quantization
//!
//! Coordinates are stored as integers scaled by 10^5, giving ~1.1 m of
//! latitudinal resolution. That quantum is the entire lossiness of the
//! database: a looked-up coordinate differs from its input by at most
//! half a quantum per axis after rounding.
//!
//! ## Example
//! ```
//! use pcdb_core::record::{quantize, PostcodeRecord};
//!
//! let record = PostcodeRecord::new("M1 1AA", 53.4808, -2.2426);
//! assert_eq!(quantize(record.lat), 5_348_080);
//! assert_eq!(quantize(record.lon), -224_260);
//! ```

use serde::{Deserialize, Serialize};

/// Fixed-point scale for quantized coordinates (10^5 per degree).
pub const COORD_SCALE: f64 = 100_000.0;

/// One row of the input dataset: a postcode and its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostcodeRecord {
    /// Raw postcode string as it appeared in the input
    pub postcode: String,

    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,
}

impl PostcodeRecord {
    pub fn new(postcode: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            postcode: postcode.into(),
            lat,
            lon,
        }
    }
}

/// Quantize a coordinate to fixed-point: `round(value * 10^5)`.
pub fn quantize(value: f64) -> i32 {
    (value * COORD_SCALE).round() as i32
}

/// Restore a quantized coordinate to degrees.
pub fn dequantize(value: i32) -> f64 {
    value as f64 / COORD_SCALE
}
