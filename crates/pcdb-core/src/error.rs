//! Error Types for PCDB
//!
//! This module defines all error types that can occur in PCDB operations.
//!
//! ## Error Categories
//!
//! ### I/O Errors
//! - Reading the input CSV during a build
//! - Writing the output database file
//! - Opening and memory-mapping a database file
//!
//! ### Structural Errors (reader construction)
//! - `BufferTooSmall`: The buffer cannot hold a 32-byte header, or is shorter
//!   than the outward index it declares
//! - `InvalidMagic`: The file doesn't start with the magic bytes ("PCDB")
//! - `UnsupportedVersion`: The file was written by a format version we don't
//!   read (only version 3 is supported)
//! - `InvalidOutwardCount`: The header declares zero outwards
//! - `InvalidDatabase`: Any other malformed structure (an outward block that
//!   points past the end of the buffer, a truncated sector table)
//!
//! ## What is NOT an error
//!
//! Query misses are not errors: an unknown postcode, outward, sector, or unit
//! yields `None` from a lookup and an empty list from an enumeration.
//! Unparseable postcode strings are also not errors; the normalizer returns
//! `None` and build-time callers silently drop the row.
//!
//! ## Usage
//! All fallible functions return `Result<T>` which is aliased to
//! `Result<T, Error>`, so `?` propagation works throughout.
//!
//! ## Example
//! ```ignore
//! use pcdb_core::{Error, Result};
//!
//! fn check_magic(data: &[u8]) -> Result<()> {
//!     if &data[0..4] != b"PCDB" {
//!         return Err(Error::InvalidMagic);
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer too small: {len} bytes")]
    BufferTooSmall { len: usize },

    #[error("Invalid magic bytes")]
    InvalidMagic,

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("Invalid outward count: {0}")]
    InvalidOutwardCount(u16),

    #[error("Invalid database: {0}")]
    InvalidDatabase(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Display messages
    // ---------------------------------------------------------------

    #[test]
    fn test_buffer_too_small_display() {
        let err = Error::BufferTooSmall { len: 12 };
        assert_eq!(format!("{}", err), "Buffer too small: 12 bytes");
    }

    #[test]
    fn test_invalid_magic_display() {
        let err = Error::InvalidMagic;
        assert_eq!(format!("{}", err), "Invalid magic bytes");
    }

    #[test]
    fn test_unsupported_version_display() {
        let err = Error::UnsupportedVersion(7);
        assert!(format!("{}", err).contains('7'));
    }

    #[test]
    fn test_invalid_outward_count_display() {
        let err = Error::InvalidOutwardCount(0);
        assert!(format!("{}", err).contains('0'));
    }

    #[test]
    fn test_invalid_database_display() {
        let err = Error::InvalidDatabase("sector table truncated".to_string());
        assert!(format!("{}", err).contains("sector table truncated"));
    }

    // ---------------------------------------------------------------
    // From<io::Error>
    // ---------------------------------------------------------------

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("missing"));
    }
}
