//! Bit-level buffer primitives.
//!
//! cEMI frames and datapoint values are not byte-aligned: fields are 1-64
//! bits wide and cross byte boundaries freely. This module provides the two
//! cursor-based buffers everything else is built on:
//!
//! - [`BitReader`] - borrows a byte slice and reads arbitrary-width fields
//! - [`BitWriter`] - owns a bounded byte vector and writes arbitrary-width
//!   fields, growing up to its capacity
//!
//! Bits are addressed MSB-first: bit 0 of the stream is the most significant
//! bit of byte 0. Every operation either advances the cursor by exactly the
//! requested width or fails without mutating the buffer.

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

/// Character encoding for fixed-width string fields.
///
/// KNX character datapoints carry either plain ASCII or ISO 8859-1 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextEncoding {
    /// 7-bit ASCII; bytes above 0x7F are rejected
    Ascii,
    /// ISO 8859-1 (Latin-1); bytes map 1:1 to U+0000..U+00FF
    Latin1,
}

/// Largest width, in bits, a single integer field can carry.
pub const MAX_FIELD_WIDTH: usize = 64;
