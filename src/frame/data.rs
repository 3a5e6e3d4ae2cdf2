//! Data-carrying and polling frame variants.
//!
//! Standard and extended data frames share the same tail: a transport
//! control code, a counter, an application control code, the guarded
//! optional pair described below, the payload and an opaque checksum. They
//! differ in where the control byte sits and in the width of the
//! `dataLength` field (4 bits standard, 8 bits extended).
//!
//! ## The guarded pair
//!
//! Exactly one of `extended_apci` and `first_data_byte` is present, decided
//! by the already-decoded `apci` field: the `Other` escape code is followed
//! by a 6-bit extended operation code, every other code by a 6-bit signed
//! first data byte. The absent field contributes zero bits on the wire and
//! is `None` in the parsed structure; serialization re-evaluates the same
//! guard and rejects a frame whose options disagree with its `apci` before
//! writing anything.
//!
//! ## Lengths
//!
//! `dataLength` counts the payload plus one for the control byte carrying
//! TPCI/APCI, so a frame with `dataLength = 3` carries 2 payload bytes. The
//! field is not stored: it is derived from the payload on serialize, which
//! keeps `length_in_bits()` consistent when the payload is mutated.

use crate::addressing::{GroupAddress, IndividualAddress};
use crate::bits::{BitReader, BitWriter};
use crate::error::{CemiError, Result};
use crate::frame::codes::{ApplicationControl, ExtendedApplicationControl, TransportControl};
use crate::frame::{MAX_EXTENDED_DATA, MAX_STANDARD_DATA};

/// Standard data frame body.
///
/// Wire order: source address (16), destination address (2 x 8), group
/// address flag (1), hop count (3), data length (4), TPCI (2), counter (4),
/// APCI (4), guarded pair (6), payload, checksum (8).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataFrame {
    /// Sending device
    pub source_address: IndividualAddress,
    /// Raw destination bytes; interpreted via `group_address`
    pub destination_address: [u8; 2],
    /// Destination is a group address (true) or individual (false)
    pub group_address: bool,
    /// Routing hop count (0-7)
    pub hop_count: u8,
    /// Transport control code
    pub tpci: TransportControl,
    /// Sequence counter for numbered transport packets (0-15)
    pub counter: u8,
    /// Application control code
    pub apci: ApplicationControl,
    /// Extended operation code; present exactly when `apci` is `Other`
    pub extended_apci: Option<ExtendedApplicationControl>,
    /// First data byte (6-bit signed); present exactly when `apci` is not `Other`
    pub first_data_byte: Option<i8>,
    /// Payload after the first data byte
    pub data: heapless::Vec<u8, MAX_STANDARD_DATA>,
    /// Checksum byte, carried opaque; neither validated nor recomputed
    pub crc: u8,
}

impl DataFrame {
    /// The wire `dataLength`: payload length plus one for the control byte.
    pub fn data_length(&self) -> u8 {
        self.data.len() as u8 + 1
    }

    /// Total body width in bits, recomputed from current field values.
    pub fn length_in_bits(&self) -> usize {
        // source + destination + flags/hopCount/dataLength + tpci/counter/apci
        // + guarded pair + payload + crc
        16 + 16 + 8 + 10 + 6 + 8 * self.data.len() + 8
    }

    /// Destination as a group address, if the flag says so.
    pub fn destination_group(&self) -> Option<GroupAddress> {
        self.group_address
            .then(|| GroupAddress::from_be_bytes(self.destination_address))
    }

    /// Destination as an individual address, if the flag says so.
    pub fn destination_individual(&self) -> Option<IndividualAddress> {
        (!self.group_address)
            .then(|| IndividualAddress::from_be_bytes(self.destination_address))
    }

    pub(crate) fn parse(reader: &mut BitReader<'_>) -> Result<Self> {
        let source_address = IndividualAddress::from_raw(reader.read_uint(16)? as u16);
        let destination_address = [reader.read_uint(8)? as u8, reader.read_uint(8)? as u8];
        let group_address = reader.read_bit()?;
        let hop_count = reader.read_uint(3)? as u8;
        let data_length = reader.read_uint(4)? as u8;
        let tpci = TransportControl::from_bits(reader.read_uint(2)? as u8);
        let counter = reader.read_uint(4)? as u8;
        let apci = ApplicationControl::from_bits(reader.read_uint(4)? as u8);
        let (extended_apci, first_data_byte) = parse_guarded_pair(apci, reader)?;
        let data = parse_payload(data_length, reader)?;
        let crc = reader.read_uint(8)? as u8;

        Ok(Self {
            source_address,
            destination_address,
            group_address,
            hop_count,
            tpci,
            counter,
            apci,
            extended_apci,
            first_data_byte,
            data,
            crc,
        })
    }

    /// Check the guarded pair against `apci` without writing anything.
    pub(crate) fn check_guard(&self) -> Result<()> {
        check_guard(self.apci, self.extended_apci, self.first_data_byte)
    }

    pub(crate) fn serialize<const N: usize>(&self, writer: &mut BitWriter<N>) -> Result<()> {
        self.check_guard()?;
        writer.write_uint(16, u64::from(self.source_address.raw()))?;
        writer.write_uint(8, u64::from(self.destination_address[0]))?;
        writer.write_uint(8, u64::from(self.destination_address[1]))?;
        writer.write_bit(self.group_address)?;
        writer.write_uint(3, u64::from(self.hop_count))?;
        writer.write_uint(4, u64::from(self.data_length()))?;
        write_tail(
            writer,
            self.tpci,
            self.counter,
            self.apci,
            self.extended_apci,
            self.first_data_byte,
            &self.data,
            self.crc,
        )
    }
}

/// Extended data frame body.
///
/// Wire order: group address flag (1), hop count (3), extended frame
/// format (4), source address (16), destination address (2 x 8), data
/// length (8), TPCI (2), counter (4), APCI (4), guarded pair (6), payload,
/// checksum (8).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataExtFrame {
    /// Destination is a group address (true) or individual (false)
    pub group_address: bool,
    /// Routing hop count (0-7)
    pub hop_count: u8,
    /// Extended frame format code (0 = standard layout)
    pub extended_frame_format: u8,
    /// Sending device
    pub source_address: IndividualAddress,
    /// Raw destination bytes; interpreted via `group_address`
    pub destination_address: [u8; 2],
    /// Transport control code
    pub tpci: TransportControl,
    /// Sequence counter for numbered transport packets (0-15)
    pub counter: u8,
    /// Application control code
    pub apci: ApplicationControl,
    /// Extended operation code; present exactly when `apci` is `Other`
    pub extended_apci: Option<ExtendedApplicationControl>,
    /// First data byte (6-bit signed); present exactly when `apci` is not `Other`
    pub first_data_byte: Option<i8>,
    /// Payload after the first data byte
    pub data: heapless::Vec<u8, MAX_EXTENDED_DATA>,
    /// Checksum byte, carried opaque; neither validated nor recomputed
    pub crc: u8,
}

impl DataExtFrame {
    /// The wire `dataLength`: payload length plus one for the control byte.
    pub fn data_length(&self) -> u8 {
        self.data.len() as u8 + 1
    }

    /// Total body width in bits, recomputed from current field values.
    pub fn length_in_bits(&self) -> usize {
        8 + 16 + 16 + 8 + 10 + 6 + 8 * self.data.len() + 8
    }

    /// Destination as a group address, if the flag says so.
    pub fn destination_group(&self) -> Option<GroupAddress> {
        self.group_address
            .then(|| GroupAddress::from_be_bytes(self.destination_address))
    }

    /// Destination as an individual address, if the flag says so.
    pub fn destination_individual(&self) -> Option<IndividualAddress> {
        (!self.group_address)
            .then(|| IndividualAddress::from_be_bytes(self.destination_address))
    }

    pub(crate) fn parse(reader: &mut BitReader<'_>) -> Result<Self> {
        let group_address = reader.read_bit()?;
        let hop_count = reader.read_uint(3)? as u8;
        let extended_frame_format = reader.read_uint(4)? as u8;
        let source_address = IndividualAddress::from_raw(reader.read_uint(16)? as u16);
        let destination_address = [reader.read_uint(8)? as u8, reader.read_uint(8)? as u8];
        let data_length = reader.read_uint(8)? as u8;
        let tpci = TransportControl::from_bits(reader.read_uint(2)? as u8);
        let counter = reader.read_uint(4)? as u8;
        let apci = ApplicationControl::from_bits(reader.read_uint(4)? as u8);
        let (extended_apci, first_data_byte) = parse_guarded_pair(apci, reader)?;
        let data = parse_payload(data_length, reader)?;
        let crc = reader.read_uint(8)? as u8;

        Ok(Self {
            group_address,
            hop_count,
            extended_frame_format,
            source_address,
            destination_address,
            tpci,
            counter,
            apci,
            extended_apci,
            first_data_byte,
            data,
            crc,
        })
    }

    /// Check the guarded pair against `apci` without writing anything.
    pub(crate) fn check_guard(&self) -> Result<()> {
        check_guard(self.apci, self.extended_apci, self.first_data_byte)
    }

    pub(crate) fn serialize<const N: usize>(&self, writer: &mut BitWriter<N>) -> Result<()> {
        self.check_guard()?;
        writer.write_bit(self.group_address)?;
        writer.write_uint(3, u64::from(self.hop_count))?;
        writer.write_uint(4, u64::from(self.extended_frame_format))?;
        writer.write_uint(16, u64::from(self.source_address.raw()))?;
        writer.write_uint(8, u64::from(self.destination_address[0]))?;
        writer.write_uint(8, u64::from(self.destination_address[1]))?;
        writer.write_uint(8, u64::from(self.data_length()))?;
        write_tail(
            writer,
            self.tpci,
            self.counter,
            self.apci,
            self.extended_apci,
            self.first_data_byte,
            &self.data,
            self.crc,
        )
    }
}

/// Polling frame body.
///
/// Wire order: source address (16), target address (2 x 8), reserved (4,
/// zero on the wire), slot count (4).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollFrame {
    /// Polling master
    pub source_address: IndividualAddress,
    /// Polled group, raw bytes
    pub target_address: [u8; 2],
    /// Number of polling slots (0-15)
    pub slot_count: u8,
}

impl PollFrame {
    /// Total body width in bits.
    pub const fn length_in_bits(&self) -> usize {
        16 + 16 + 4 + 4
    }

    pub(crate) fn parse(reader: &mut BitReader<'_>) -> Result<Self> {
        let source_address = IndividualAddress::from_raw(reader.read_uint(16)? as u16);
        let target_address = [reader.read_uint(8)? as u8, reader.read_uint(8)? as u8];
        reader.read_bits(4)?;
        let slot_count = reader.read_uint(4)? as u8;

        Ok(Self {
            source_address,
            target_address,
            slot_count,
        })
    }

    pub(crate) fn serialize<const N: usize>(&self, writer: &mut BitWriter<N>) -> Result<()> {
        writer.write_uint(16, u64::from(self.source_address.raw()))?;
        writer.write_uint(8, u64::from(self.target_address[0]))?;
        writer.write_uint(8, u64::from(self.target_address[1]))?;
        writer.write_reserved(4)?;
        writer.write_uint(4, u64::from(self.slot_count))
    }
}

/// Parse the guarded pair following the APCI field.
fn parse_guarded_pair(
    apci: ApplicationControl,
    reader: &mut BitReader<'_>,
) -> Result<(Option<ExtendedApplicationControl>, Option<i8>)> {
    if apci.is_other() {
        let code = reader.read_uint(6)? as u8;
        let extended = ExtendedApplicationControl::from_bits(code)
            .ok_or_else(CemiError::unsupported_discriminator)?;
        Ok((Some(extended), None))
    } else {
        Ok((None, Some(reader.read_int(6)? as i8)))
    }
}

/// Read `dataLength - 1` payload bytes.
fn parse_payload<const N: usize>(
    data_length: u8,
    reader: &mut BitReader<'_>,
) -> Result<heapless::Vec<u8, N>> {
    let count = data_length
        .checked_sub(1)
        .ok_or_else(CemiError::invalid_data_length)?;
    let mut data = heapless::Vec::new();
    for _ in 0..count {
        data.push(reader.read_uint(8)? as u8)
            .map_err(|_| CemiError::payload_too_large())?;
    }
    Ok(data)
}

/// Re-evaluate the guard for serialization: the optional pair must agree
/// with `apci`, and exactly one side must be present.
fn check_guard(
    apci: ApplicationControl,
    extended_apci: Option<ExtendedApplicationControl>,
    first_data_byte: Option<i8>,
) -> Result<()> {
    let consistent = if apci.is_other() {
        extended_apci.is_some() && first_data_byte.is_none()
    } else {
        extended_apci.is_none() && first_data_byte.is_some()
    };
    if consistent {
        Ok(())
    } else {
        Err(CemiError::inconsistent_guard())
    }
}

/// Shared tail of both data variants: TPCI through CRC.
#[allow(clippy::too_many_arguments, reason = "mirrors the wire field order")]
fn write_tail<const N: usize>(
    writer: &mut BitWriter<N>,
    tpci: TransportControl,
    counter: u8,
    apci: ApplicationControl,
    extended_apci: Option<ExtendedApplicationControl>,
    first_data_byte: Option<i8>,
    data: &[u8],
    crc: u8,
) -> Result<()> {
    writer.write_uint(2, u64::from(tpci.to_bits()))?;
    writer.write_uint(4, u64::from(counter))?;
    writer.write_uint(4, u64::from(apci.to_bits()))?;
    match (extended_apci, first_data_byte) {
        (Some(extended), None) => writer.write_uint(6, u64::from(extended.to_bits()))?,
        (None, Some(byte)) => writer.write_int(6, i64::from(byte))?,
        // check_guard ran before any write
        _ => return Err(CemiError::inconsistent_guard()),
    }
    for &byte in data {
        writer.write_uint(8, u64::from(byte))?;
    }
    writer.write_uint(8, u64::from(crc))
}
