//! cEMI link-layer frame model.
//!
//! Every frame starts with an 8-bit header whose three discriminator bits
//! select exactly one body variant:
//!
//! ```text
//! Bit 7: standardFrame (discriminator)
//! Bit 6: polling       (discriminator)
//! Bit 5: repeated
//! Bit 4: notAckFrame   (discriminator)
//! Bit 3-2: priority (00=system, 01=normal, 10=urgent, 11=low)
//! Bit 1: acknowledgeRequested
//! Bit 0: errorFlag
//! ```
//!
//! | notAck | standard | polling | body |
//! |--------|----------|---------|------|
//! | 0      | -        | -       | [`FrameBody::Ack`] |
//! | 1      | 1        | 0       | [`FrameBody::StandardData`] |
//! | 1      | 0        | 0       | [`FrameBody::ExtendedData`] |
//! | 1      | 1        | 1       | [`FrameBody::PollingData`] |
//! | 1      | 0        | 1       | `UnsupportedDiscriminator` |
//!
//! The variant is chosen once at parse time and cannot change; a parsed
//! frame is always a complete `(header, body)` pair, never a partially
//! chosen state. Serialization derives the discriminator bits back from
//! the variant, so a frame cannot be written under the wrong shape.
//!
//! ## Example
//!
//! ```
//! use knx_cemi::frame::{Frame, FrameBody};
//!
//! let bytes = [
//!     0x94, // standard data frame, normal priority
//!     0x11, 0x01, // source 1.1.1
//!     0x0A, 0x03, // destination 1/2/3
//!     0xE2, // group address, hop count 6, data length 2
//!     0x00, 0x81, // unnumbered data, group value write, first byte 1
//!     0x42, // payload
//!     0xAA, // checksum
//! ];
//! let frame = Frame::parse(&bytes).unwrap();
//! assert!(matches!(frame.body, FrameBody::StandardData(_)));
//! assert_eq!(frame.length_in_bits(), bytes.len() * 8);
//! assert_eq!(&frame.to_bytes().unwrap()[..], &bytes);
//! ```

pub mod codes;
mod data;

pub use codes::{ApplicationControl, ExtendedApplicationControl, Priority, TransportControl};
pub use data::{DataExtFrame, DataFrame, PollFrame};

use crate::bits::{BitReader, BitWriter};
use crate::error::{CemiError, Result};

/// Largest serialized frame: an extended data frame with a full payload.
pub const MAX_FRAME_SIZE: usize = 264;

/// Payload capacity of a standard data frame (4-bit `dataLength`).
pub const MAX_STANDARD_DATA: usize = 14;

/// Payload capacity of an extended data frame (8-bit `dataLength`).
pub const MAX_EXTENDED_DATA: usize = 254;

/// The fields every frame variant shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameHeader {
    /// Repeat flag, carried raw from the wire
    pub repeated: bool,
    /// Frame priority class
    pub priority: Priority,
    /// Link-layer acknowledge requested
    pub acknowledge_requested: bool,
    /// Error flag of the confirmation
    pub error_flag: bool,
}

/// The closed set of frame body variants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameBody {
    /// Acknowledge frame; header only
    Ack,
    /// Polling data frame
    PollingData(PollFrame),
    /// Standard data frame
    StandardData(DataFrame),
    /// Extended data frame
    ExtendedData(DataExtFrame),
}

impl FrameBody {
    /// The `standardFrame` discriminator bit this variant serializes with.
    const fn standard_frame(&self) -> bool {
        matches!(self, Self::StandardData(_) | Self::PollingData(_))
    }

    /// The `polling` discriminator bit this variant serializes with.
    const fn polling(&self) -> bool {
        matches!(self, Self::PollingData(_))
    }

    /// The `notAckFrame` discriminator bit this variant serializes with.
    const fn not_ack_frame(&self) -> bool {
        !matches!(self, Self::Ack)
    }

    /// Body width in bits, recomputed from current field values.
    pub fn length_in_bits(&self) -> usize {
        match self {
            Self::Ack => 0,
            Self::PollingData(frame) => frame.length_in_bits(),
            Self::StandardData(frame) => frame.length_in_bits(),
            Self::ExtendedData(frame) => frame.length_in_bits(),
        }
    }
}

/// A complete cEMI frame: the shared header paired with exactly one body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Shared header fields
    pub header: FrameHeader,
    /// The selected body variant
    pub body: FrameBody,
}

impl Frame {
    /// Parse a frame from raw bytes.
    ///
    /// # Errors
    ///
    /// Fails with `BufferUnderflow` on truncated input and
    /// `UnsupportedDiscriminator` when the header bits select no known
    /// variant or an enum code is outside its closed set. A failed parse
    /// returns no partial frame.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = BitReader::new(bytes);
        let standard_frame = reader.read_bit()?;
        let polling = reader.read_bit()?;
        let repeated = reader.read_bit()?;
        let not_ack_frame = reader.read_bit()?;
        let priority = Priority::from_bits(reader.read_uint(2)? as u8);
        let acknowledge_requested = reader.read_bit()?;
        let error_flag = reader.read_bit()?;

        let body = match (not_ack_frame, standard_frame, polling) {
            (false, _, _) => FrameBody::Ack,
            (true, true, false) => FrameBody::StandardData(DataFrame::parse(&mut reader)?),
            (true, false, false) => FrameBody::ExtendedData(DataExtFrame::parse(&mut reader)?),
            (true, true, true) => FrameBody::PollingData(PollFrame::parse(&mut reader)?),
            (true, false, true) => return Err(CemiError::unsupported_discriminator()),
        };

        Ok(Self {
            header: FrameHeader {
                repeated,
                priority,
                acknowledge_requested,
                error_flag,
            },
            body,
        })
    }

    /// Total frame width in bits, recomputed from current field values.
    pub fn length_in_bits(&self) -> usize {
        8 + self.body.length_in_bits()
    }

    /// Serialize the frame into `writer`: header first, then the body,
    /// re-evaluating the guarded-optional fields.
    ///
    /// Guard consistency is checked before the first bit is written, so a
    /// rejected frame leaves the writer untouched.
    pub fn serialize<const N: usize>(&self, writer: &mut BitWriter<N>) -> Result<()> {
        match &self.body {
            FrameBody::StandardData(frame) => frame.check_guard()?,
            FrameBody::ExtendedData(frame) => frame.check_guard()?,
            FrameBody::Ack | FrameBody::PollingData(_) => {}
        }

        writer.write_bit(self.body.standard_frame())?;
        writer.write_bit(self.body.polling())?;
        writer.write_bit(self.header.repeated)?;
        writer.write_bit(self.body.not_ack_frame())?;
        writer.write_uint(2, u64::from(self.header.priority.to_bits()))?;
        writer.write_bit(self.header.acknowledge_requested)?;
        writer.write_bit(self.header.error_flag)?;

        match &self.body {
            FrameBody::Ack => Ok(()),
            FrameBody::PollingData(frame) => frame.serialize(writer),
            FrameBody::StandardData(frame) => frame.serialize(writer),
            FrameBody::ExtendedData(frame) => frame.serialize(writer),
        }
    }

    /// Serialize the frame to a fresh byte vector.
    pub fn to_bytes(&self) -> Result<heapless::Vec<u8, MAX_FRAME_SIZE>> {
        let mut writer = BitWriter::new();
        self.serialize(&mut writer)?;
        Ok(writer.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_FRAME: &[u8] = &[
        0x94, 0x11, 0x01, 0x0A, 0x03, 0xE2, 0x00, 0x81, 0x42, 0xAA,
    ];

    const EXTENDED_FRAME: &[u8] = &[
        0x14, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x03, 0x03, 0xD5, 0xDE, 0xAD, 0x55,
    ];

    #[test]
    fn test_parse_standard_frame() {
        let frame = Frame::parse(STANDARD_FRAME).unwrap();
        assert!(!frame.header.repeated);
        assert_eq!(frame.header.priority, Priority::Normal);
        assert!(!frame.header.acknowledge_requested);
        assert!(!frame.header.error_flag);

        let FrameBody::StandardData(ref data) = frame.body else {
            panic!("expected standard data body");
        };
        assert_eq!(data.apci, ApplicationControl::GroupValueWrite);
        assert_eq!(frame.length_in_bits(), STANDARD_FRAME.len() * 8);
    }

    #[test]
    fn test_standard_frame_round_trip() {
        let frame = Frame::parse(STANDARD_FRAME).unwrap();
        assert_eq!(&frame.to_bytes().unwrap()[..], STANDARD_FRAME);
    }

    #[test]
    fn test_parse_extended_frame() {
        let frame = Frame::parse(EXTENDED_FRAME).unwrap();
        let FrameBody::ExtendedData(ref data) = frame.body else {
            panic!("expected extended data body");
        };
        assert_eq!(data.apci, ApplicationControl::Other);
        assert_eq!(
            data.extended_apci,
            Some(ExtendedApplicationControl::PropertyValueRead)
        );
        assert_eq!(frame.length_in_bits(), EXTENDED_FRAME.len() * 8);
    }

    #[test]
    fn test_extended_frame_round_trip() {
        let frame = Frame::parse(EXTENDED_FRAME).unwrap();
        assert_eq!(&frame.to_bytes().unwrap()[..], EXTENDED_FRAME);
    }

    #[test]
    fn test_ack_frame_round_trip() {
        // notAck = 0, repeated, low priority
        let frame = Frame::parse(&[0x2C]).unwrap();
        assert_eq!(frame.body, FrameBody::Ack);
        assert!(frame.header.repeated);
        assert_eq!(frame.header.priority, Priority::Low);
        assert_eq!(frame.length_in_bits(), 8);
        assert_eq!(&frame.to_bytes().unwrap()[..], &[0x2C]);
    }

    #[test]
    fn test_polling_frame_round_trip() {
        let bytes = [0xD4, 0x11, 0x01, 0x0A, 0x03, 0x05];
        let frame = Frame::parse(&bytes).unwrap();
        let FrameBody::PollingData(ref poll) = frame.body else {
            panic!("expected polling body");
        };
        assert_eq!(poll.slot_count, 5);
        assert_eq!(frame.length_in_bits(), bytes.len() * 8);
        assert_eq!(&frame.to_bytes().unwrap()[..], &bytes);
    }

    #[test]
    fn test_unsupported_discriminator_combination() {
        // notAck = 1, standardFrame = 0, polling = 1
        let err = Frame::parse(&[0x54]).unwrap_err();
        assert!(matches!(err, CemiError::Frame(ref e) if e.is_unsupported_discriminator()));
    }

    #[test]
    fn test_empty_input_underflows() {
        let err = Frame::parse(&[]).unwrap_err();
        assert!(matches!(err, CemiError::Bit(ref e) if e.is_underflow()));
    }

    #[test]
    fn test_length_tracks_mutation_through_frame() {
        let mut frame = Frame::parse(STANDARD_FRAME).unwrap();
        let before = frame.length_in_bits();
        if let FrameBody::StandardData(ref mut data) = frame.body {
            data.data.push(0x01).unwrap();
        }
        assert_eq!(frame.length_in_bits(), before + 8);
        let bytes = frame.to_bytes().unwrap();
        assert_eq!(bytes.len() * 8, frame.length_in_bits());
        // The re-derived dataLength reflects the longer payload
        assert_eq!(bytes[5], 0xE3);
    }

    #[test]
    fn test_ack_normalizes_unused_discriminators() {
        // notAck = 0 with standard/polling bits set still parses as Ack
        let frame = Frame::parse(&[0xC0]).unwrap();
        assert_eq!(frame.body, FrameBody::Ack);
        // Serialization writes the canonical bit pattern for Ack
        assert_eq!(&frame.to_bytes().unwrap()[..], &[0x00]);
    }
}
