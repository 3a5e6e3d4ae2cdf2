//! Datapoint format-string compiler.
//!
//! Every KNX datapoint type is described by a compact textual schema such as
//! `"B1"`, `"U4U4"` or `"U8r4U4r3U5U3U5r2U6r2U6B16"`. This module compiles
//! such a string once into an ordered [`FieldDescriptor`] list that the
//! datapoint codec then applies symmetrically for decode and encode.
//!
//! ## Token grammar
//!
//! A field token is a kind letter immediately followed by a decimal bit
//! width:
//!
//! | Letter | Meaning |
//! |--------|---------|
//! | `U`    | unsigned integer |
//! | `V`    | signed integer (two's complement) |
//! | `N`    | enumerated unsigned integer (wire-compatible with `U`) |
//! | `Z`    | scaled/status unsigned integer (wire-compatible with `U`) |
//! | `F`    | float: width 16 = KNX compact float, width 32 = IEEE-754 |
//! | `B`    | raw bit set (width 1 decodes as a boolean flag) |
//! | `b`    | single-bit flag |
//! | `A`    | character data, width a multiple of 8 |
//! | `r`    | reserved padding, zero on the wire |
//!
//! Any run of characters that does not start a field token attaches to the
//! preceding field as its name (`U16Z8TimePeriod` names the second field
//! `TimePeriod`). On `A` fields a fragment starting with `_` selects the
//! encoding instead: `_ASCII` (default) or `_8859_1`.
//!
//! If the summed token width is not a whole number of bytes, a reserved
//! field pads the format at the front, so `"B1"` compiles to 7 reserved
//! bits followed by the value bit.
//!
//! Compilation is pure: the same string always yields the same descriptor
//! list, so callers may cache a [`FormatSpec`] keyed by the string. No
//! global cache is kept here; compilation is cheap and the crate stays
//! allocation-free.

use crate::bits::TextEncoding;
use crate::error::{CemiError, Result};
use crate::value::FieldName;

/// Most fields any supported format string compiles to, including padding.
pub const MAX_FORMAT_FIELDS: usize = 16;

/// The kind of a single compiled bit-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// Zero-filled padding, never surfaced as a value
    Reserved,
    /// Unsigned integer, including enumerated (`N`) and scaled (`Z`) fields
    UnsignedInt,
    /// Two's-complement signed integer
    SignedInt,
    /// KNX compact float (16 bits) or IEEE-754 (32 bits)
    Float,
    /// Fixed-width character data in the given encoding
    CharString(TextEncoding),
    /// Raw bit pattern; width 1 is a boolean flag
    Bits,
}

/// One typed, named or reserved bit-field of a compiled format.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldDescriptor {
    /// Field kind
    pub kind: FieldKind,
    /// Field width in bits
    pub width_bits: u16,
    /// Field name, if the format string carries one
    pub name: Option<FieldName>,
}

/// A compiled format string: the ordered field list plus the total width.
///
/// The total width is always a whole number of bytes thanks to the implicit
/// leading padding rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatSpec {
    fields: heapless::Vec<FieldDescriptor, MAX_FORMAT_FIELDS>,
    width_bits: u16,
}

/// Kind letters that can start a field token.
const KIND_LETTERS: &[u8] = b"UVNZFBbAr";

impl FormatSpec {
    /// Compile a format string into an ordered descriptor list.
    ///
    /// # Errors
    ///
    /// Fails with `UnsupportedToken` for characters outside the grammar and
    /// `UnsupportedWidth` for widths the field kind cannot carry.
    ///
    /// # Examples
    ///
    /// ```
    /// use knx_cemi::format::{FieldKind, FormatSpec};
    ///
    /// let spec = FormatSpec::compile("U4U4").unwrap();
    /// assert_eq!(spec.width_bits(), 8);
    /// assert_eq!(spec.fields().len(), 2);
    ///
    /// // Sub-byte formats gain leading reserved padding
    /// let spec = FormatSpec::compile("B1").unwrap();
    /// assert_eq!(spec.fields()[0].kind, FieldKind::Reserved);
    /// assert_eq!(spec.fields()[0].width_bits, 7);
    /// ```
    pub fn compile(format: &str) -> Result<Self> {
        if !format.is_ascii() {
            return Err(CemiError::unsupported_format_token());
        }
        let bytes = format.as_bytes();
        let mut fields: heapless::Vec<FieldDescriptor, MAX_FORMAT_FIELDS> = heapless::Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            if token_starts_at(bytes, i) {
                let letter = bytes[i];
                i += 1;
                let mut width = 0u32;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    width = width * 10 + u32::from(bytes[i] - b'0');
                    if width > u32::from(u16::MAX) {
                        return Err(CemiError::unsupported_format_width());
                    }
                    i += 1;
                }
                let field = descriptor_for(letter, width)?;
                fields
                    .push(field)
                    .map_err(|_| CemiError::too_many_fields())?;
            } else {
                let start = i;
                while i < bytes.len() && !token_starts_at(bytes, i) {
                    i += 1;
                }
                let fragment = &format[start..i];
                let last = fields
                    .last_mut()
                    .ok_or_else(CemiError::unsupported_format_token)?;
                if let Some(selector) = fragment.strip_prefix('_') {
                    apply_encoding_selector(last, selector)?;
                } else {
                    let mut name = FieldName::new();
                    name.push_str(fragment)
                        .map_err(|_| CemiError::field_name_too_long())?;
                    last.name = Some(name);
                }
            }
        }

        let total: u32 = fields.iter().map(|f| u32::from(f.width_bits)).sum();
        let padding = (8 - total % 8) % 8;
        if padding != 0 {
            fields
                .insert(
                    0,
                    FieldDescriptor {
                        kind: FieldKind::Reserved,
                        width_bits: padding as u16,
                        name: None,
                    },
                )
                .map_err(|_| CemiError::too_many_fields())?;
        }

        Ok(Self {
            fields,
            width_bits: (total + padding) as u16,
        })
    }

    /// The compiled fields, in wire order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Total width of the format in bits; always a multiple of 8.
    #[inline(always)]
    pub const fn width_bits(&self) -> u16 {
        self.width_bits
    }

    /// Number of fields that surface as values (everything but padding).
    pub fn value_field_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.kind != FieldKind::Reserved)
            .count()
    }
}

/// A token starts wherever a kind letter is immediately followed by a digit.
#[inline]
fn token_starts_at(bytes: &[u8], i: usize) -> bool {
    KIND_LETTERS.contains(&bytes[i])
        && i + 1 < bytes.len()
        && bytes[i + 1].is_ascii_digit()
}

fn descriptor_for(letter: u8, width: u32) -> Result<FieldDescriptor> {
    let kind = match letter {
        b'U' | b'N' | b'Z' => FieldKind::UnsignedInt,
        b'V' => FieldKind::SignedInt,
        b'F' => FieldKind::Float,
        b'B' | b'b' => FieldKind::Bits,
        b'A' => FieldKind::CharString(TextEncoding::Ascii),
        b'r' => FieldKind::Reserved,
        _ => return Err(CemiError::unsupported_format_token()),
    };
    let valid = match kind {
        FieldKind::Float => width == 16 || width == 32,
        FieldKind::CharString(_) => {
            width >= 8
                && width % 8 == 0
                && width / 8 <= crate::value::MAX_VALUE_STRING as u32
        }
        FieldKind::Bits if letter == b'b' => width == 1,
        _ => (1..=64).contains(&width),
    };
    if !valid {
        return Err(CemiError::unsupported_format_width());
    }
    Ok(FieldDescriptor {
        kind,
        width_bits: width as u16,
        name: None,
    })
}

fn apply_encoding_selector(field: &mut FieldDescriptor, selector: &str) -> Result<()> {
    let FieldKind::CharString(ref mut encoding) = field.kind else {
        return Err(CemiError::unsupported_format_token());
    };
    *encoding = match selector {
        "ASCII" => TextEncoding::Ascii,
        "8859_1" => TextEncoding::Latin1,
        _ => return Err(CemiError::unsupported_format_token()),
    };
    Ok(())
}
