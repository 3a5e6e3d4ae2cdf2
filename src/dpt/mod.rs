//! KNX datapoint decoding and encoding.
//!
//! Datapoint types (DPTs) define how the payload of a group telegram is
//! interpreted. Instead of one hand-written codec per type, this module
//! drives a single generic walker ([`codec`]) with compiled format strings
//! ([`crate::format`]): the registry supplies the string, the codec applies
//! it, and every one of the ~150 wire layouts in the full KNX table decodes
//! and encodes through the same two functions.
//!
//! ## Usage
//!
//! ```
//! use knx_cemi::dpt::{decode_datapoint, encode_datapoint, DatapointType};
//!
//! // Through the registry
//! let dpt = DatapointType::ValueTemp;
//! let value = dpt.decode(&[0x0C, 0x38]).unwrap();
//! let temp = value.as_scalar().and_then(|v| v.as_f32()).unwrap();
//! assert!((temp - 21.6).abs() < 0.01);
//!
//! // Or with a raw format string
//! let value = decode_datapoint("U4busyU4nak", &[0x53]).unwrap();
//! assert_eq!(value.field("busy").and_then(|v| v.as_uint()), Some(5));
//! let bytes = encode_datapoint("U4busyU4nak", &value).unwrap();
//! assert_eq!(&bytes[..], &[0x53]);
//! ```

pub mod codec;
pub mod registry;

#[doc(inline)]
pub use codec::{decode_datapoint, encode_datapoint};
#[doc(inline)]
pub use registry::DatapointType;
