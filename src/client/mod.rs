//! Client-facing entry points
//!
//! This module handles:
//! * Connection address recognition and parsing
//! * Well-known option-key constants

pub mod address;

pub use address::{accepts_scheme, parse, parse_with, SCHEME_TAOS, SCHEME_TSDB};
