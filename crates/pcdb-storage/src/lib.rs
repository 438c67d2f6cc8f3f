//! PCDB Storage Layer
//!
//! This crate implements the PCDB v3 binary postcode database - the encoder
//! that compresses a national postcode CSV into a compact, immutable file,
//! and the reader that serves O(1) lookups and outward enumerations from it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────┐
//! │ postcode CSV     │
//! └────────┬─────────┘
//!          │ rows
//!          ▼
//! ┌──────────────────┐
//! │ DatabaseWriter   │
//! │ - Normalizes     │
//! │ - Groups         │
//! │ - Quantizes      │
//! │ - Bit-packs      │
//! └────────┬─────────┘
//!          │ database bytes (.pcod)
//!          ▼
//! ┌──────────────────┐
//! │ DatabaseReader   │
//! │ - Validates      │
//! │ - Binary search  │
//! │ - Rank + decode  │
//! └────────┬─────────┘
//!          │ (lat, lon)
//!          ▼
//!     applications
//! ```
//!
//! The file is written once and never mutated; the reader works over a
//! shared in-memory buffer or a memory-mapped file and serves concurrent
//! queries without locks.

pub mod csv;
pub mod db;

pub use db::{
    build_database, BuildSummary, DatabaseReader, DatabaseStats, DatabaseWriter, LookupResult,
};
