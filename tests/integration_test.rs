//! Integration tests for the knx-cemi codec.
//!
//! These tests drive the crate exclusively through its public entry points
//! (`parse_frame` / `serialize_frame` / `decode_datapoint` /
//! `encode_datapoint` and the datapoint registry), the way a surrounding
//! driver would: bytes in, structured values out, and back again.

use knx_cemi::frame::{ApplicationControl, ExtendedApplicationControl, Priority};
use knx_cemi::value::{ScalarValue, Value};
use knx_cemi::{
    decode_datapoint, encode_datapoint, ga, parse_frame, serialize_frame, CemiError,
    DatapointType, Frame, FrameBody, GroupAddress, IndividualAddress,
};

/// A group-value-write telegram: 1.1.1 -> 1/2/3, normal priority,
/// hop count 6, one payload byte.
const GROUP_WRITE: &[u8] = &[
    0x94, 0x11, 0x01, 0x0A, 0x03, 0xE2, 0x00, 0x81, 0x42, 0xAA,
];

/// An extended frame escaping into the extended APCI space
/// (`PropertyValueRead`) with two payload bytes.
const PROPERTY_READ_EXT: &[u8] = &[
    0x14, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x03, 0x03, 0xD5, 0xDE, 0xAD, 0x55,
];

#[test]
fn test_parse_group_write_telegram() {
    let frame = parse_frame(GROUP_WRITE).unwrap();
    assert_eq!(frame.header.priority, Priority::Normal);
    assert!(!frame.header.repeated);

    let FrameBody::StandardData(ref data) = frame.body else {
        panic!("expected a standard data frame");
    };
    assert_eq!(data.source_address, IndividualAddress::new(1, 1, 1).unwrap());
    assert_eq!(data.destination_group(), Some(ga!(1 / 2 / 3)));
    assert_eq!(data.destination_individual(), None);
    assert_eq!(data.apci, ApplicationControl::GroupValueWrite);
    assert_eq!(data.first_data_byte, Some(1));
    assert_eq!(&data.data[..], &[0x42]);
}

#[test]
fn test_frame_round_trips_are_byte_exact() {
    for bytes in [GROUP_WRITE, PROPERTY_READ_EXT] {
        let frame = parse_frame(bytes).unwrap();
        let out = serialize_frame(&frame).unwrap();
        assert_eq!(&out[..], bytes);
        assert_eq!(frame.length_in_bits(), bytes.len() * 8);
    }
}

#[test]
fn test_extended_frame_guard_selects_extended_apci() {
    let frame = parse_frame(PROPERTY_READ_EXT).unwrap();
    let FrameBody::ExtendedData(ref data) = frame.body else {
        panic!("expected an extended data frame");
    };
    assert_eq!(data.apci, ApplicationControl::Other);
    assert_eq!(
        data.extended_apci,
        Some(ExtendedApplicationControl::PropertyValueRead)
    );
    assert_eq!(data.first_data_byte, None);
    // dataLength 3 means exactly 2 payload bytes
    assert_eq!(data.data_length(), 3);
    assert_eq!(&data.data[..], &[0xDE, 0xAD]);
}

#[test]
fn test_mutated_frame_reserializes_consistently() {
    let mut frame = parse_frame(GROUP_WRITE).unwrap();
    if let FrameBody::StandardData(ref mut data) = frame.body {
        data.data.push(0xBE).unwrap();
        data.data.push(0xEF).unwrap();
    }

    let bytes = serialize_frame(&frame).unwrap();
    assert_eq!(bytes.len() * 8, frame.length_in_bits());

    // The re-derived dataLength covers the longer payload
    let reparsed = parse_frame(&bytes).unwrap();
    let FrameBody::StandardData(ref data) = reparsed.body else {
        panic!("expected a standard data frame");
    };
    assert_eq!(data.data_length(), 4);
    assert_eq!(&data.data[..], &[0x42, 0xBE, 0xEF]);
}

#[test]
fn test_truncated_telegram_fails_without_partial_frame() {
    for cut in 1..GROUP_WRITE.len() {
        let err = parse_frame(&GROUP_WRITE[..cut]).unwrap_err();
        assert!(
            matches!(err, CemiError::Bit(ref e) if e.is_underflow()),
            "cut at {cut} should underflow"
        );
    }
}

#[test]
fn test_unknown_discriminators_are_fatal() {
    // notAck with polling set but standardFrame clear matches no variant
    let err = parse_frame(&[0x54]).unwrap_err();
    assert!(matches!(err, CemiError::Frame(ref e) if e.is_unsupported_discriminator()));

    // apci Other followed by an unassigned 6-bit code
    let mut bytes = PROPERTY_READ_EXT.to_vec();
    bytes[8] = 0xFF; // extended code 0b111111
    let err = parse_frame(&bytes).unwrap_err();
    assert!(matches!(err, CemiError::Frame(ref e) if e.is_unsupported_discriminator()));
}

#[test]
fn test_datapoint_scenarios_from_the_wire() {
    // Single bit: reserved padding discarded, value bit surfaced
    let value = decode_datapoint("B1", &[0x01]).unwrap();
    assert_eq!(value, Value::Scalar(ScalarValue::Bool(true)));

    // Two named nibbles out of one byte
    let value = decode_datapoint("U4busyU4nak", &[0x53]).unwrap();
    assert_eq!(value.field("busy").and_then(ScalarValue::as_uint), Some(5));
    assert_eq!(value.field("nak").and_then(ScalarValue::as_uint), Some(3));
}

#[test]
fn test_datapoint_round_trip_through_registry() {
    // Temperature 21.6 C in the compact float encoding
    let value = DatapointType::ValueTemp.decode(&[0x0C, 0x38]).unwrap();
    let celsius = value.as_scalar().and_then(ScalarValue::as_f32).unwrap();
    assert!((celsius - 21.6).abs() < 0.01);

    let bytes = DatapointType::ValueTemp.encode(&value).unwrap();
    assert_eq!(&bytes[..], &[0x0C, 0x38]);
}

#[test]
fn test_every_registry_format_round_trips_zeroed_input() {
    for &dpt in DatapointType::ALL {
        let spec = knx_cemi::FormatSpec::compile(dpt.format_string()).unwrap();
        let zeros = [0u8; 16];
        let decoded = dpt.decode(&zeros[..usize::from(spec.width_bits()) / 8]).unwrap();
        let encoded = dpt.encode(&decoded).unwrap();
        let again = dpt.decode(&encoded).unwrap();
        assert_eq!(decoded, again, "{} diverged on round trip", dpt.name());
    }
}

#[test]
fn test_reserved_regions_normalize_to_zero() {
    // Every reserved bit in DPT_Date's layout is set on the way in
    let dirty = [0xFF, 0xFF, 0xFF];
    let decoded = DatapointType::Date.decode(&dirty).unwrap();
    let encoded = DatapointType::Date.encode(&decoded).unwrap();
    // r3, r4 and r1 runs come back zeroed; value fields survive
    assert_eq!(&encoded[..], &[0x1F, 0x0F, 0x7F]);
}

#[test]
fn test_encode_rejects_mismatched_value_shape() {
    let scalar = Value::Scalar(ScalarValue::Bool(true));
    let err = encode_datapoint("U4busyU4nak", &scalar).unwrap_err();
    assert!(matches!(err, CemiError::Value(ref e) if e.is_missing_field()));

    let err = encode_datapoint("U8", &Value::Scalar(ScalarValue::Bool(true))).unwrap_err();
    assert!(matches!(err, CemiError::Value(ref e) if e.is_type_mismatch()));
}

#[test]
fn test_registry_lookup_by_symbolic_name() {
    let dpt = DatapointType::lookup("DPT_Value_Temp").unwrap();
    assert_eq!(dpt, DatapointType::ValueTemp);
    assert_eq!(dpt.main_number(), 9);
    assert_eq!(dpt.sub_number(), 1);
    assert_eq!(dpt.format_string(), "F16");

    let err = DatapointType::lookup("DPT_Made_Up").unwrap_err();
    assert!(matches!(err, CemiError::Dpt(ref e) if e.is_unknown_type()));
}

#[test]
fn test_addresses_pack_and_display() {
    let source = IndividualAddress::from_be_bytes([0x11, 0xFA]);
    assert_eq!(source, IndividualAddress::new(1, 1, 250).unwrap());
    assert_eq!(source.to_string(), "1.1.250");

    let group = ga!(1 / 2 / 3);
    assert_eq!(group, GroupAddress::new(1, 2, 3).unwrap());
    assert_eq!(group.to_string(), "1/2/3");
}

#[test]
fn test_build_and_send_telegram_from_scratch() {
    // A driver building a frame field by field, the way an outbound
    // group-value write is assembled
    let original = parse_frame(GROUP_WRITE).unwrap();
    let FrameBody::StandardData(data) = original.body else {
        panic!("expected a standard data frame");
    };

    let mut rebuilt = data.clone();
    rebuilt.source_address = IndividualAddress::new(1, 1, 250).unwrap();
    rebuilt.destination_address = ga!(2 / 3 / 4).to_be_bytes();

    let frame = Frame {
        header: original.header,
        body: FrameBody::StandardData(rebuilt),
    };
    let bytes = serialize_frame(&frame).unwrap();

    let reparsed = parse_frame(&bytes).unwrap();
    let FrameBody::StandardData(ref data) = reparsed.body else {
        panic!("expected a standard data frame");
    };
    assert_eq!(data.source_address.to_string(), "1.1.250");
    assert_eq!(data.destination_group(), Some(ga!(2 / 3 / 4)));
}
