#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # knx-cemi
//!
//! Bit-exact codec for KNX cEMI link-layer frames and datapoint values.
//!
//! This crate is a pure, stateless transform between byte buffers and
//! structured values: no transport, no connection management, no I/O.
//! It is `no_std` by default and allocation-free, designed to sit under
//! an embedded or host-side KNX stack.
//!
//! ## Layers
//!
//! - [`bits`] - cursor-based bit reader/writer, no protocol knowledge
//! - [`format`] - compiles datapoint format strings into field descriptors
//! - [`value`] - the generic tagged value the datapoint codec produces
//! - [`dpt`] - the format-driven datapoint codec and the type registry
//! - [`frame`] - the cEMI frame variant model
//! - [`addressing`] - 16-bit individual and group addresses
//!
//! ## Example
//!
//! ```
//! use knx_cemi::{parse_frame, serialize_frame, decode_datapoint};
//!
//! let bytes = [
//!     0x94, 0x11, 0x01, 0x0A, 0x03, 0xE2, 0x00, 0x81, 0x42, 0xAA,
//! ];
//! let frame = parse_frame(&bytes).unwrap();
//! assert_eq!(&serialize_frame(&frame).unwrap()[..], &bytes);
//!
//! let value = decode_datapoint("B1", &[0x01]).unwrap();
//! assert_eq!(value.as_scalar().and_then(|v| v.as_bool()), Some(true));
//! ```

pub mod addressing;
pub mod bits;
pub mod dpt;
pub mod error;
pub mod format;
pub mod frame;
pub mod value;

#[macro_use]
pub mod logging;

// Re-export commonly used types
#[doc(inline)]
pub use addressing::{GroupAddress, IndividualAddress};
#[doc(inline)]
pub use dpt::{decode_datapoint, encode_datapoint, DatapointType};
#[doc(inline)]
pub use error::{CemiError, Result};
#[doc(inline)]
pub use format::FormatSpec;
#[doc(inline)]
pub use frame::{Frame, FrameBody, FrameHeader, MAX_FRAME_SIZE};
#[doc(inline)]
pub use value::{ScalarValue, Value};

/// Parse a cEMI frame from raw bytes.
///
/// Alias for [`Frame::parse`], kept at the crate root as the codec's
/// primary entry point.
pub fn parse_frame(bytes: &[u8]) -> Result<Frame> {
    Frame::parse(bytes)
}

/// Serialize a cEMI frame to raw bytes.
///
/// Alias for [`Frame::to_bytes`], kept at the crate root as the codec's
/// primary entry point.
pub fn serialize_frame(frame: &Frame) -> Result<heapless::Vec<u8, MAX_FRAME_SIZE>> {
    frame.to_bytes()
}
