//! Link-layer control code enums.
//!
//! All value sets here are closed and known at compile time, so each enum
//! carries plain bidirectional bit mappings. `Priority`,
//! `TransportControl` and `ApplicationControl` cover their full bit space
//! and convert infallibly; `ExtendedApplicationControl` is sparse, and an
//! unknown wire code is an `UnsupportedDiscriminator` at the parse site.

/// Frame priority class (2 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Priority {
    /// System management traffic
    System = 0x0,
    /// Normal priority
    Normal = 0x1,
    /// Urgent priority
    Urgent = 0x2,
    /// Low priority
    Low = 0x3,
}

impl Priority {
    /// Convert from the 2-bit wire code.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0x0 => Self::System,
            0x1 => Self::Normal,
            0x2 => Self::Urgent,
            _ => Self::Low,
        }
    }

    /// Convert to the 2-bit wire code.
    pub const fn to_bits(self) -> u8 {
        self as u8
    }
}

/// Transport-layer control code (2 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TransportControl {
    /// Unnumbered data packet
    UnnumberedData = 0x0,
    /// Unnumbered control packet
    UnnumberedControl = 0x1,
    /// Numbered data packet
    NumberedData = 0x2,
    /// Numbered control packet
    NumberedControl = 0x3,
}

impl TransportControl {
    /// Convert from the 2-bit wire code.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0x0 => Self::UnnumberedData,
            0x1 => Self::UnnumberedControl,
            0x2 => Self::NumberedData,
            _ => Self::NumberedControl,
        }
    }

    /// Convert to the 2-bit wire code.
    pub const fn to_bits(self) -> u8 {
        self as u8
    }

    /// Check if this is a data packet (numbered or unnumbered).
    pub const fn is_data(self) -> bool {
        matches!(self, Self::UnnumberedData | Self::NumberedData)
    }
}

/// Application-layer control code (4 bits).
///
/// The value 0xF is the `Other` escape: the operation is identified by a
/// trailing 6-bit [`ExtendedApplicationControl`] code instead of a data
/// byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ApplicationControl {
    /// Group value read
    GroupValueRead = 0x0,
    /// Group value response
    GroupValueResponse = 0x1,
    /// Group value write
    GroupValueWrite = 0x2,
    /// Individual address write
    IndividualAddressWrite = 0x3,
    /// Individual address read
    IndividualAddressRead = 0x4,
    /// Individual address response
    IndividualAddressResponse = 0x5,
    /// ADC read
    AdcRead = 0x6,
    /// ADC response
    AdcResponse = 0x7,
    /// Memory read
    MemoryRead = 0x8,
    /// Memory response
    MemoryResponse = 0x9,
    /// Memory write
    MemoryWrite = 0xA,
    /// User message
    UserMessage = 0xB,
    /// Device descriptor read
    DeviceDescriptorRead = 0xC,
    /// Device descriptor response
    DeviceDescriptorResponse = 0xD,
    /// Restart
    Restart = 0xE,
    /// Escape to the extended code space
    Other = 0xF,
}

impl ApplicationControl {
    /// Convert from the 4-bit wire code.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0x0 => Self::GroupValueRead,
            0x1 => Self::GroupValueResponse,
            0x2 => Self::GroupValueWrite,
            0x3 => Self::IndividualAddressWrite,
            0x4 => Self::IndividualAddressRead,
            0x5 => Self::IndividualAddressResponse,
            0x6 => Self::AdcRead,
            0x7 => Self::AdcResponse,
            0x8 => Self::MemoryRead,
            0x9 => Self::MemoryResponse,
            0xA => Self::MemoryWrite,
            0xB => Self::UserMessage,
            0xC => Self::DeviceDescriptorRead,
            0xD => Self::DeviceDescriptorResponse,
            0xE => Self::Restart,
            _ => Self::Other,
        }
    }

    /// Convert to the 4-bit wire code.
    pub const fn to_bits(self) -> u8 {
        self as u8
    }

    /// Check if this is the escape into the extended code space.
    pub const fn is_other(self) -> bool {
        matches!(self, Self::Other)
    }
}

/// Extended application-layer control code (6 bits, follows
/// [`ApplicationControl::Other`]).
///
/// The known code set is closed; wire values outside it are surfaced as
/// errors, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ExtendedApplicationControl {
    /// Open routing table request
    OpenRoutingTableRequest = 0x00,
    /// Read routing table request
    ReadRoutingTableRequest = 0x01,
    /// Read routing table response
    ReadRoutingTableResponse = 0x02,
    /// Write routing table request
    WriteRoutingTableRequest = 0x03,
    /// Read router memory request
    ReadRouterMemoryRequest = 0x08,
    /// Read router memory response
    ReadRouterMemoryResponse = 0x09,
    /// Write router memory request
    WriteRouterMemoryRequest = 0x0A,
    /// Read router status request
    ReadRouterStatusRequest = 0x0D,
    /// Read router status response
    ReadRouterStatusResponse = 0x0E,
    /// Write router status request
    WriteRouterStatusRequest = 0x0F,
    /// Memory bit write
    MemoryBitWrite = 0x10,
    /// Authorize request
    AuthorizeRequest = 0x11,
    /// Authorize response
    AuthorizeResponse = 0x12,
    /// Key write
    KeyWrite = 0x13,
    /// Key response
    KeyResponse = 0x14,
    /// Property value read
    PropertyValueRead = 0x15,
    /// Property value response
    PropertyValueResponse = 0x16,
    /// Property value write
    PropertyValueWrite = 0x17,
    /// Property description read
    PropertyDescriptionRead = 0x18,
    /// Property description response
    PropertyDescriptionResponse = 0x19,
    /// Network parameter read
    NetworkParameterRead = 0x1A,
    /// Network parameter response
    NetworkParameterResponse = 0x1B,
    /// Individual address serial number read
    IndividualAddressSerialNumberRead = 0x1C,
    /// Individual address serial number response
    IndividualAddressSerialNumberResponse = 0x1D,
    /// Individual address serial number write
    IndividualAddressSerialNumberWrite = 0x1E,
    /// Domain address write
    DomainAddressWrite = 0x20,
    /// Domain address read
    DomainAddressRead = 0x21,
    /// Domain address response
    DomainAddressResponse = 0x22,
    /// Domain address selective read
    DomainAddressSelectiveRead = 0x23,
    /// Network parameter write
    NetworkParameterWrite = 0x24,
    /// Link read
    LinkRead = 0x25,
    /// Link response
    LinkResponse = 0x26,
    /// Link write
    LinkWrite = 0x27,
    /// Group property value read
    GroupPropertyValueRead = 0x28,
    /// Group property value response
    GroupPropertyValueResponse = 0x29,
    /// Group property value write
    GroupPropertyValueWrite = 0x2A,
    /// Group property value info report
    GroupPropertyValueInfoReport = 0x2B,
    /// Domain address serial number read
    DomainAddressSerialNumberRead = 0x2C,
    /// Domain address serial number response
    DomainAddressSerialNumberResponse = 0x2D,
    /// Domain address serial number write
    DomainAddressSerialNumberWrite = 0x2E,
    /// File stream info report
    FileStreamInfoReport = 0x30,
}

impl ExtendedApplicationControl {
    /// Convert from the 6-bit wire code; `None` for codes outside the
    /// known set.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0x00 => Self::OpenRoutingTableRequest,
            0x01 => Self::ReadRoutingTableRequest,
            0x02 => Self::ReadRoutingTableResponse,
            0x03 => Self::WriteRoutingTableRequest,
            0x08 => Self::ReadRouterMemoryRequest,
            0x09 => Self::ReadRouterMemoryResponse,
            0x0A => Self::WriteRouterMemoryRequest,
            0x0D => Self::ReadRouterStatusRequest,
            0x0E => Self::ReadRouterStatusResponse,
            0x0F => Self::WriteRouterStatusRequest,
            0x10 => Self::MemoryBitWrite,
            0x11 => Self::AuthorizeRequest,
            0x12 => Self::AuthorizeResponse,
            0x13 => Self::KeyWrite,
            0x14 => Self::KeyResponse,
            0x15 => Self::PropertyValueRead,
            0x16 => Self::PropertyValueResponse,
            0x17 => Self::PropertyValueWrite,
            0x18 => Self::PropertyDescriptionRead,
            0x19 => Self::PropertyDescriptionResponse,
            0x1A => Self::NetworkParameterRead,
            0x1B => Self::NetworkParameterResponse,
            0x1C => Self::IndividualAddressSerialNumberRead,
            0x1D => Self::IndividualAddressSerialNumberResponse,
            0x1E => Self::IndividualAddressSerialNumberWrite,
            0x20 => Self::DomainAddressWrite,
            0x21 => Self::DomainAddressRead,
            0x22 => Self::DomainAddressResponse,
            0x23 => Self::DomainAddressSelectiveRead,
            0x24 => Self::NetworkParameterWrite,
            0x25 => Self::LinkRead,
            0x26 => Self::LinkResponse,
            0x27 => Self::LinkWrite,
            0x28 => Self::GroupPropertyValueRead,
            0x29 => Self::GroupPropertyValueResponse,
            0x2A => Self::GroupPropertyValueWrite,
            0x2B => Self::GroupPropertyValueInfoReport,
            0x2C => Self::DomainAddressSerialNumberRead,
            0x2D => Self::DomainAddressSerialNumberResponse,
            0x2E => Self::DomainAddressSerialNumberWrite,
            0x30 => Self::FileStreamInfoReport,
            _ => return None,
        })
    }

    /// Convert to the 6-bit wire code.
    pub const fn to_bits(self) -> u8 {
        self as u8
    }
}
