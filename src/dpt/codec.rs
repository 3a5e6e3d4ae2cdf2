//! Generic datapoint decode/encode driven by compiled format specs.
//!
//! The codec walks a [`FormatSpec`] field by field, mapping every descriptor
//! to the matching bit-buffer operation. It never special-cases a format
//! string: correctness for all ~150 wire layouts in the full KNX table is a
//! property of the compiler and this walker applied uniformly.
//!
//! Decode and encode are exact mirrors. Reserved fields are consumed and
//! discarded on decode and always written as zero bits on encode, so a
//! round trip normalizes reserved regions while reproducing every value
//! field bit-for-bit.

use core::fmt::Write;

use crate::bits::{BitReader, BitWriter};
use crate::error::{CemiError, Result};
use crate::format::{FieldDescriptor, FieldKind, FormatSpec};
use crate::frame::MAX_FRAME_SIZE;
use crate::value::{FieldName, ScalarValue, Value, MAX_STRUCT_FIELDS, MAX_VALUE_STRING};

/// Decode one datapoint value from `reader` according to `spec`.
///
/// A single-field format yields a bare scalar; two or more value fields
/// yield a struct keyed by field name in wire order. Fields the format does
/// not name get the positional default `value{i}`.
pub fn decode(spec: &FormatSpec, reader: &mut BitReader<'_>) -> Result<Value> {
    let mut fields: heapless::Vec<(FieldName, ScalarValue), MAX_STRUCT_FIELDS> =
        heapless::Vec::new();
    let mut index = 0;

    for descriptor in spec.fields() {
        if descriptor.kind == FieldKind::Reserved {
            reader.read_bits(usize::from(descriptor.width_bits))?;
            continue;
        }
        let scalar = read_scalar(descriptor, reader)?;
        fields
            .push((field_name(descriptor, index)?, scalar))
            .map_err(|_| CemiError::too_many_fields())?;
        index += 1;
    }

    if fields.len() == 1 {
        let (_, scalar) = fields.swap_remove(0);
        Ok(Value::Scalar(scalar))
    } else {
        Ok(Value::Struct(fields))
    }
}

/// Encode `value` into `writer` according to `spec`.
///
/// # Errors
///
/// Fails with `MissingField` when the value shape does not match the spec
/// (a named field absent, or a scalar supplied where a struct is required
/// and vice versa) and `FieldTypeMismatch` when a field's tag does not
/// match the descriptor kind. Nothing observable is written on failure
/// paths taken before the first field; callers discard the writer on error.
pub fn encode<const N: usize>(
    spec: &FormatSpec,
    writer: &mut BitWriter<N>,
    value: &Value,
) -> Result<()> {
    let single = spec.value_field_count() == 1;
    let mut index = 0;

    for descriptor in spec.fields() {
        if descriptor.kind == FieldKind::Reserved {
            writer.write_reserved(usize::from(descriptor.width_bits))?;
            continue;
        }
        let scalar = if single {
            value.as_scalar().ok_or_else(CemiError::missing_field)?
        } else {
            let name = field_name(descriptor, index)?;
            value
                .field(&name)
                .ok_or_else(CemiError::missing_field)?
        };
        write_scalar(descriptor, writer, scalar)?;
        index += 1;
    }
    Ok(())
}

/// Decode a datapoint from raw bytes, compiling `format` on the fly.
pub fn decode_datapoint(format: &str, bytes: &[u8]) -> Result<Value> {
    let spec = FormatSpec::compile(format)?;
    let mut reader = BitReader::new(bytes);
    decode(&spec, &mut reader)
}

/// Encode a datapoint to raw bytes, compiling `format` on the fly.
pub fn encode_datapoint(
    format: &str,
    value: &Value,
) -> Result<heapless::Vec<u8, MAX_FRAME_SIZE>> {
    let spec = FormatSpec::compile(format)?;
    let mut writer = BitWriter::new();
    encode(&spec, &mut writer, value)?;
    Ok(writer.into_vec())
}

/// Resolve a field's name: the declared one, or the positional default.
fn field_name(descriptor: &FieldDescriptor, index: usize) -> Result<FieldName> {
    if let Some(name) = &descriptor.name {
        return Ok(name.clone());
    }
    let mut name = FieldName::new();
    write!(name, "value{index}").map_err(|_| CemiError::field_name_too_long())?;
    Ok(name)
}

fn read_scalar(descriptor: &FieldDescriptor, reader: &mut BitReader<'_>) -> Result<ScalarValue> {
    let width = usize::from(descriptor.width_bits);
    Ok(match descriptor.kind {
        FieldKind::UnsignedInt => ScalarValue::UInt {
            width: descriptor.width_bits,
            value: reader.read_uint(width)?,
        },
        FieldKind::SignedInt => ScalarValue::Int {
            width: descriptor.width_bits,
            value: reader.read_int(width)?,
        },
        FieldKind::Float => {
            let value = if width == 16 {
                reader.read_float16()?
            } else {
                reader.read_float32()?
            };
            ScalarValue::Float32(value)
        }
        FieldKind::CharString(encoding) => {
            ScalarValue::Str(reader.read_string::<MAX_VALUE_STRING>(width, encoding)?)
        }
        FieldKind::Bits if width == 1 => ScalarValue::Bool(reader.read_bit()?),
        FieldKind::Bits => ScalarValue::Bits {
            width: descriptor.width_bits,
            raw: reader.read_bits(width)?,
        },
        // Reserved fields are filtered out by the walkers
        FieldKind::Reserved => return Err(CemiError::field_type_mismatch()),
    })
}

fn write_scalar<const N: usize>(
    descriptor: &FieldDescriptor,
    writer: &mut BitWriter<N>,
    scalar: &ScalarValue,
) -> Result<()> {
    let width = usize::from(descriptor.width_bits);
    match (descriptor.kind, scalar) {
        (FieldKind::UnsignedInt, ScalarValue::UInt { value, .. }) => {
            writer.write_uint(width, *value)
        }
        (FieldKind::SignedInt, ScalarValue::Int { value, .. }) => writer.write_int(width, *value),
        (FieldKind::Float, ScalarValue::Float32(value)) => {
            if width == 16 {
                writer.write_float16(*value)
            } else {
                writer.write_float32(*value)
            }
        }
        (FieldKind::CharString(encoding), ScalarValue::Str(s)) => {
            writer.write_string(width, encoding, s)
        }
        (FieldKind::Bits, ScalarValue::Bool(value)) if width == 1 => writer.write_bit(*value),
        (FieldKind::Bits, ScalarValue::Bits { raw, .. }) => writer.write_bits(width, *raw),
        _ => Err(CemiError::field_type_mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(format: &str, bytes: &[u8]) -> Value {
        let decoded = decode_datapoint(format, bytes).unwrap();
        let encoded = encode_datapoint(format, &decoded).unwrap();
        let again = decode_datapoint(format, &encoded).unwrap();
        assert_eq!(decoded, again, "{format} round trip diverged");
        decoded
    }

    #[test]
    fn test_decode_single_bit() {
        // 0x01: seven reserved bits discarded, value bit set
        let value = decode_datapoint("B1", &[0x01]).unwrap();
        assert_eq!(value, Value::Scalar(ScalarValue::Bool(true)));

        let value = decode_datapoint("B1", &[0x00]).unwrap();
        assert_eq!(value, Value::Scalar(ScalarValue::Bool(false)));
    }

    #[test]
    fn test_decode_named_nibble_pair() {
        let value = decode_datapoint("U4busyU4nak", &[0x53]).unwrap();
        assert_eq!(value.field("busy").and_then(ScalarValue::as_uint), Some(5));
        assert_eq!(value.field("nak").and_then(ScalarValue::as_uint), Some(3));
    }

    #[test]
    fn test_decode_unnamed_fields_get_positional_names() {
        let value = decode_datapoint("U4U4", &[0x53]).unwrap();
        assert_eq!(
            value.field("value0").and_then(ScalarValue::as_uint),
            Some(5)
        );
        assert_eq!(
            value.field("value1").and_then(ScalarValue::as_uint),
            Some(3)
        );
    }

    #[test]
    fn test_decode_signed_field() {
        let value = decode_datapoint("V8", &[0xFB]).unwrap();
        assert_eq!(
            value.as_scalar().and_then(ScalarValue::as_int),
            Some(-5)
        );
    }

    #[test]
    fn test_decode_compact_float() {
        let value = decode_datapoint("F16", &[0x0C, 0x38]).unwrap();
        let f = value.as_scalar().and_then(ScalarValue::as_f32).unwrap();
        assert!((f - 21.6).abs() < 0.01);
    }

    #[test]
    fn test_encode_reserved_regions_are_zeroed() {
        let encoded =
            encode_datapoint("B1", &Value::Scalar(ScalarValue::Bool(true))).unwrap();
        assert_eq!(&encoded[..], &[0x01]);

        // r2U6: the two reserved bits stay zero whatever the payload
        let value = Value::Scalar(ScalarValue::UInt {
            width: 6,
            value: 0x3F,
        });
        let encoded = encode_datapoint("r2U6", &value).unwrap();
        assert_eq!(&encoded[..], &[0x3F]);
    }

    #[test]
    fn test_round_trip_scalar_formats() {
        round_trip("B1", &[0x01]);
        round_trip("U8", &[0x7F]);
        round_trip("V8", &[0x85]);
        round_trip("U16", &[0x12, 0x34]);
        round_trip("V32", &[0xFF, 0xFF, 0xFE, 0x0C]);
        round_trip("F32", &21.5f32.to_be_bytes());
        round_trip("r2U6", &[0x2A]);
    }

    #[test]
    fn test_round_trip_struct_formats() {
        round_trip("U4busyU4nak", &[0x53]);
        round_trip("B1U3", &[0x0D]);
        round_trip("U4U4U4U4U4U4B4N4", &[0x12, 0x34, 0x56, 0x78]);
        // DPT_DateTime, the widest supported layout
        round_trip(
            "U8r4U4r3U5U3U5r2U6r2U6B16",
            &[0x78, 0x06, 0x11, 0x2E, 0x1E, 0x00, 0x00, 0x80],
        );
    }

    #[test]
    fn test_round_trip_normalizes_reserved_bits() {
        // Dirty reserved bits decode away and re-encode as zero
        let decoded = decode_datapoint("B1", &[0xFF]).unwrap();
        assert_eq!(decoded, Value::Scalar(ScalarValue::Bool(true)));
        let encoded = encode_datapoint("B1", &decoded).unwrap();
        assert_eq!(&encoded[..], &[0x01]);
    }

    #[test]
    fn test_round_trip_string() {
        let value = decode_datapoint("A112_ASCII", b"KNX is a bus\0\0").unwrap();
        assert_eq!(
            value.as_scalar().and_then(ScalarValue::as_str),
            Some("KNX is a bus")
        );
        let encoded = encode_datapoint("A112_ASCII", &value).unwrap();
        assert_eq!(&encoded[..], b"KNX is a bus\0\0");
    }

    #[test]
    fn test_encode_missing_field() {
        let mut fields = heapless::Vec::new();
        let mut name = FieldName::new();
        name.push_str("busy").unwrap();
        fields
            .push((name, ScalarValue::UInt { width: 4, value: 5 }))
            .unwrap();
        let err = encode_datapoint("U4busyU4nak", &Value::Struct(fields)).unwrap_err();
        assert!(matches!(err, CemiError::Value(ref e) if e.is_missing_field()));
    }

    #[test]
    fn test_encode_scalar_where_struct_required() {
        let value = Value::Scalar(ScalarValue::UInt { width: 4, value: 5 });
        let err = encode_datapoint("U4U4", &value).unwrap_err();
        assert!(matches!(err, CemiError::Value(ref e) if e.is_missing_field()));
    }

    #[test]
    fn test_encode_type_mismatch() {
        let mut s = heapless::String::new();
        s.push_str("5").unwrap();
        let err =
            encode_datapoint("U8", &Value::Scalar(ScalarValue::Str(s))).unwrap_err();
        assert!(matches!(err, CemiError::Value(ref e) if e.is_type_mismatch()));
    }

    #[test]
    fn test_decode_underflow() {
        let err = decode_datapoint("U16", &[0x01]).unwrap_err();
        assert!(matches!(err, CemiError::Bit(ref e) if e.is_underflow()));
    }

    #[test]
    fn test_encode_value_wider_than_field() {
        let value = Value::Scalar(ScalarValue::UInt {
            width: 6,
            value: 64,
        });
        let err = encode_datapoint("r2U6", &value).unwrap_err();
        assert!(matches!(err, CemiError::Bit(ref e) if e.is_invalid_width()));
    }
}
