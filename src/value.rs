//! Generic tagged values produced and consumed by the datapoint codec.
//!
//! A decoded datapoint is either a single scalar or an ordered struct of
//! named scalars, mirroring the compiled format: one value field yields a
//! bare [`ScalarValue`], two or more yield a [`Value::Struct`] keyed by
//! field name in wire order. Reserved fields never appear.
//!
//! The split into [`ScalarValue`] and [`Value`] keeps the type
//! allocation-free: a self-recursive enum cannot be sized without
//! indirection, and no supported format nests structs.

use core::fmt;

/// Capacity of a field name, in bytes.
pub const MAX_FIELD_NAME: usize = 32;

/// Most value fields any supported struct format carries.
pub const MAX_STRUCT_FIELDS: usize = 12;

/// Capacity of a decoded character field, in characters.
pub const MAX_VALUE_STRING: usize = 16;

/// A bounded field name.
pub type FieldName = heapless::String<MAX_FIELD_NAME>;

/// A single decoded bit-field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarValue {
    /// A single-bit flag
    Bool(bool),
    /// An unsigned integer of the given wire width
    UInt {
        /// Field width in bits
        width: u16,
        /// The value, never sign-extended
        value: u64,
    },
    /// A signed integer of the given wire width
    Int {
        /// Field width in bits
        width: u16,
        /// The value, sign-extended from `width` bits
        value: i64,
    },
    /// A float, from either the KNX compact or the IEEE-754 encoding
    Float32(f32),
    /// Fixed-width character data
    Str(heapless::String<MAX_VALUE_STRING>),
    /// An uninterpreted bit pattern wider than one bit
    Bits {
        /// Field width in bits
        width: u16,
        /// The pattern, MSB-first in the low bits
        raw: u64,
    },
}

impl ScalarValue {
    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The unsigned payload, if this is a `UInt`.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The signed payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float32`.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float32(v) => Some(*v),
            _ => None,
        }
    }

    /// The string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::UInt { value, .. } => write!(f, "{value}"),
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bits { width, raw } => write!(f, "0b{raw:0width$b}", width = *width as usize),
        }
    }
}

/// A decoded datapoint: a bare scalar or an ordered struct of named scalars.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A single-field format's value
    Scalar(ScalarValue),
    /// A multi-field format's values, keyed by field name in wire order
    Struct(heapless::Vec<(FieldName, ScalarValue), MAX_STRUCT_FIELDS>),
}

impl Value {
    /// The scalar payload, if this is not a struct.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Struct(_) => None,
        }
    }

    /// The ordered field list, if this is a struct.
    pub fn as_struct(&self) -> Option<&[(FieldName, ScalarValue)]> {
        match self {
            Self::Scalar(_) => None,
            Self::Struct(fields) => Some(fields),
        }
    }

    /// Look up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&ScalarValue> {
        self.as_struct()?
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }
}

impl From<ScalarValue> for Value {
    fn from(value: ScalarValue) -> Self {
        Self::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FieldName {
        let mut n = FieldName::new();
        n.push_str(s).unwrap();
        n
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(ScalarValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ScalarValue::Bool(true).as_uint(), None);
        assert_eq!(
            ScalarValue::UInt { width: 4, value: 5 }.as_uint(),
            Some(5)
        );
        assert_eq!(
            ScalarValue::Int {
                width: 6,
                value: -32
            }
            .as_int(),
            Some(-32)
        );
        assert_eq!(ScalarValue::Float32(21.5).as_f32(), Some(21.5));
    }

    #[test]
    fn test_struct_field_lookup() {
        let mut fields = heapless::Vec::new();
        fields
            .push((name("busy"), ScalarValue::UInt { width: 4, value: 5 }))
            .unwrap();
        fields
            .push((name("nak"), ScalarValue::UInt { width: 4, value: 3 }))
            .unwrap();
        let value = Value::Struct(fields);

        assert_eq!(value.field("busy").and_then(ScalarValue::as_uint), Some(5));
        assert_eq!(value.field("nak").and_then(ScalarValue::as_uint), Some(3));
        assert_eq!(value.field("missing"), None);
        assert!(value.as_scalar().is_none());
    }

    #[test]
    fn test_struct_preserves_order() {
        let mut fields = heapless::Vec::new();
        fields
            .push((name("a"), ScalarValue::Bool(true)))
            .unwrap();
        fields
            .push((name("b"), ScalarValue::Bool(false)))
            .unwrap();
        let value = Value::Struct(fields);
        let names: heapless::Vec<&str, 4> = value
            .as_struct()
            .unwrap()
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(&names[..], &["a", "b"]);
    }

    #[test]
    fn test_display() {
        let mut buf = heapless::String::<32>::new();
        use core::fmt::Write;
        write!(buf, "{}", ScalarValue::Bits { width: 4, raw: 0b1010 }).unwrap();
        assert_eq!(buf.as_str(), "0b1010");
    }
}
