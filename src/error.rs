//! Error types for the cEMI codec.
//!
//! This module provides structured error types with backtraces (when std is
//! enabled) and helper methods for error information. Every error is local to
//! a single parse or encode call and deterministic for a given input.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, CemiError>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Bit buffer error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum BitErrorKind {
    /// Not enough bits left to satisfy a read
    Underflow,
    /// Write target has no capacity left
    Overflow,
    /// Requested width is zero, above 64 bits, or the value does not fit it
    InvalidWidth,
    /// Character data is not valid in the requested encoding
    InvalidCharacter,
}

/// Format string compilation error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum FormatErrorKind {
    /// A token outside the known grammar
    UnsupportedToken,
    /// A width the field kind cannot carry
    UnsupportedWidth,
    /// More fields than a compiled spec can hold
    TooManyFields,
    /// A field name fragment longer than the name capacity
    NameTooLong,
}

/// Value mapping error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ValueErrorKind {
    /// Supplied value tag does not match the field descriptor kind
    TypeMismatch,
    /// A named field the format requires is absent from the value
    MissingField,
    /// Decoded string exceeds the bounded string capacity
    StringTooLong,
    /// Value cannot be represented in the field's encoding
    OutOfRange,
}

/// Frame model error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum FrameErrorKind {
    /// Discriminator bits or an enum code outside the known set
    UnsupportedDiscriminator,
    /// Optional fields disagree with the guard expression over `apci`
    InconsistentGuard,
    /// Payload longer than the variant's length field can express
    PayloadTooLarge,
    /// A wire `dataLength` below the one-byte minimum the layout implies
    InvalidDataLength,
}

/// Addressing error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum AddressingErrorKind {
    /// An address component wider than its packed bit-field
    OutOfRange,
}

/// Datapoint registry error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum DptErrorKind {
    /// Symbolic datapoint-type name not present in the registry
    UnknownType,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// cEMI codec error type.
///
/// This is the main error type returned by all codec operations. It contains
/// a backtrace (when the std feature is enabled) and detailed error
/// information through helper methods.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CemiError {
    /// Bit buffer errors (underflow, overflow, width)
    Bit(BitError),
    /// Format string compilation errors
    Format(FormatError),
    /// Value mapping errors (encode-side type/field checks)
    Value(ValueError),
    /// Frame model errors (discriminators, guards, lengths)
    Frame(FrameError),
    /// Addressing errors (invalid address format, range)
    Addressing(AddressingError),
    /// Datapoint registry errors
    Dpt(DptError),
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Bit buffer error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitError {
    kind: BitErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl BitError {
    pub(crate) fn new(kind: BitErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if this is a buffer underflow
    pub fn is_underflow(&self) -> bool {
        matches!(self.kind, BitErrorKind::Underflow)
    }

    /// Check if this is a buffer overflow
    pub fn is_overflow(&self) -> bool {
        matches!(self.kind, BitErrorKind::Overflow)
    }

    /// Check if this is an invalid bit-width request
    pub fn is_invalid_width(&self) -> bool {
        matches!(self.kind, BitErrorKind::InvalidWidth)
    }
}

/// Format compilation error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatError {
    kind: FormatErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl FormatError {
    pub(crate) fn new(kind: FormatErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if this is an unsupported token error
    pub fn is_unsupported_token(&self) -> bool {
        matches!(self.kind, FormatErrorKind::UnsupportedToken)
    }

    /// Check if this is an unsupported width error
    pub fn is_unsupported_width(&self) -> bool {
        matches!(self.kind, FormatErrorKind::UnsupportedWidth)
    }
}

/// Value mapping error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueError {
    kind: ValueErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl ValueError {
    pub(crate) fn new(kind: ValueErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the supplied value tag mismatched the field kind
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ValueErrorKind::TypeMismatch)
    }

    /// Check if a required named field was absent
    pub fn is_missing_field(&self) -> bool {
        matches!(self.kind, ValueErrorKind::MissingField)
    }
}

/// Frame model error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameError {
    kind: FrameErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl FrameError {
    pub(crate) fn new(kind: FrameErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if a discriminator or enum code was outside the known set
    pub fn is_unsupported_discriminator(&self) -> bool {
        matches!(self.kind, FrameErrorKind::UnsupportedDiscriminator)
    }

    /// Check if optional fields disagreed with their guard
    pub fn is_inconsistent_guard(&self) -> bool {
        matches!(self.kind, FrameErrorKind::InconsistentGuard)
    }
}

/// Addressing error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressingError {
    kind: AddressingErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl AddressingError {
    pub(crate) fn new(kind: AddressingErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if an address component was out of range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::OutOfRange)
    }
}

/// Datapoint registry error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DptError {
    kind: DptErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl DptError {
    pub(crate) fn new(kind: DptErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if a symbolic type name was unknown
    pub fn is_unknown_type(&self) -> bool {
        matches!(self.kind, DptErrorKind::UnknownType)
    }
}

// =============================================================================
// Convenience Constructors for CemiError
// =============================================================================

impl CemiError {
    // Bit buffer errors
    pub(crate) fn buffer_underflow() -> Self {
        Self::Bit(BitError::new(BitErrorKind::Underflow))
    }

    pub(crate) fn buffer_overflow() -> Self {
        Self::Bit(BitError::new(BitErrorKind::Overflow))
    }

    pub(crate) fn invalid_width() -> Self {
        Self::Bit(BitError::new(BitErrorKind::InvalidWidth))
    }

    pub(crate) fn invalid_character() -> Self {
        Self::Bit(BitError::new(BitErrorKind::InvalidCharacter))
    }

    // Format compilation errors
    pub(crate) fn unsupported_format_token() -> Self {
        Self::Format(FormatError::new(FormatErrorKind::UnsupportedToken))
    }

    pub(crate) fn unsupported_format_width() -> Self {
        Self::Format(FormatError::new(FormatErrorKind::UnsupportedWidth))
    }

    pub(crate) fn too_many_fields() -> Self {
        Self::Format(FormatError::new(FormatErrorKind::TooManyFields))
    }

    pub(crate) fn field_name_too_long() -> Self {
        Self::Format(FormatError::new(FormatErrorKind::NameTooLong))
    }

    // Value mapping errors
    pub(crate) fn field_type_mismatch() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::TypeMismatch))
    }

    pub(crate) fn missing_field() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::MissingField))
    }

    pub(crate) fn string_too_long() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::StringTooLong))
    }

    pub(crate) fn value_out_of_range() -> Self {
        Self::Value(ValueError::new(ValueErrorKind::OutOfRange))
    }

    // Frame model errors
    pub(crate) fn unsupported_discriminator() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::UnsupportedDiscriminator))
    }

    pub(crate) fn inconsistent_guard() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::InconsistentGuard))
    }

    pub(crate) fn payload_too_large() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::PayloadTooLarge))
    }

    pub(crate) fn invalid_data_length() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::InvalidDataLength))
    }

    // Addressing errors
    pub(crate) fn address_out_of_range() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::OutOfRange))
    }

    // Datapoint registry errors
    pub(crate) fn unknown_datapoint_type() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::UnknownType))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for CemiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CemiError::Bit(e) => write!(f, "Bit buffer error: {:?}", e.kind),
            CemiError::Format(e) => write!(f, "Format error: {:?}", e.kind),
            CemiError::Value(e) => write!(f, "Value error: {:?}", e.kind),
            CemiError::Frame(e) => write!(f, "Frame error: {:?}", e.kind),
            CemiError::Addressing(e) => write!(f, "Addressing error: {:?}", e.kind),
            CemiError::Dpt(e) => write!(f, "Datapoint error: {:?}", e.kind),
        }
    }
}

// Implement std::error::Error for std-based applications
#[cfg(feature = "std")]
impl std::error::Error for CemiError {}
