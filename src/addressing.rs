//! 16-bit KNX bus addresses.
//!
//! Every data frame names its sender by a physical individual address
//! (`area.line.device`) and its destination by either a second device or
//! a logical group (`main/middle/sub`), distinguished by a flag bit next
//! to the raw destination bytes. Both kinds occupy one 16-bit word on the
//! wire. These newtypes wrap that word and expose the packed components;
//! the frame model itself only moves raw words and byte pairs around,
//! handing out the typed view through accessors like
//! [`destination_group`](crate::frame::DataFrame::destination_group).

use core::fmt;

use crate::error::{CemiError, Result};

/// Physical device address, `area.line.device`.
///
/// Packed 4 + 4 + 8: the high wire octet carries area and line, the low
/// octet the device. Every data frame's source field is one of these.
///
/// # Examples
///
/// ```
/// use knx_cemi::IndividualAddress;
///
/// let addr = IndividualAddress::new(1, 1, 250).unwrap();
/// assert_eq!(addr.raw(), 0x11FA);
/// assert_eq!(addr.to_string(), "1.1.250");
///
/// let same = IndividualAddress::from_be_bytes([0x11, 0xFA]);
/// assert_eq!(addr, same);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndividualAddress(u16);

impl IndividualAddress {
    /// Pack an address from its components: area 0-15, line 0-15,
    /// device 0-255.
    pub fn new(area: u8, line: u8, device: u8) -> Result<Self> {
        if area > 0x0F || line > 0x0F {
            return Err(CemiError::address_out_of_range());
        }
        Ok(Self(u16::from_be_bytes([(area << 4) | line, device])))
    }

    /// Wrap a raw 16-bit word read off the wire. Every word is a valid
    /// address.
    #[inline(always)]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw word as carried on the wire.
    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The two wire octets, high byte first.
    #[inline]
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Reassemble from the two wire octets.
    #[inline]
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// Backbone area, 0-15.
    pub const fn area(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Line within the area, 0-15.
    pub const fn line(self) -> u8 {
        (self.0 >> 8) as u8 & 0x0F
    }

    /// Device on the line, 0-255.
    pub const fn device(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for IndividualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.area(), self.line(), self.device())
    }
}

/// Logical group address, `main/middle/sub`.
///
/// Packed 5 + 3 + 8. Group addresses are how datapoints are published on
/// the bus: a data frame whose destination flag marks a group carries one
/// of these in its destination bytes.
///
/// # Examples
///
/// ```
/// use knx_cemi::{ga, GroupAddress};
///
/// let addr = GroupAddress::new(1, 2, 3).unwrap();
/// assert_eq!(addr.to_be_bytes(), [0x0A, 0x03]);
/// assert_eq!(addr, ga!(1/2/3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupAddress(u16);

impl GroupAddress {
    /// Pack an address from its components: main 0-31, middle 0-7,
    /// sub 0-255.
    pub fn new(main: u8, middle: u8, sub: u8) -> Result<Self> {
        if main > 0x1F || middle > 0x07 {
            return Err(CemiError::address_out_of_range());
        }
        Ok(Self(u16::from_be_bytes([(main << 3) | middle, sub])))
    }

    /// Wrap a raw 16-bit word read off the wire. Every word is a valid
    /// address.
    #[inline(always)]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw word as carried on the wire.
    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The two wire octets, high byte first.
    #[inline]
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Reassemble from the two wire octets.
    #[inline]
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// Main group, 0-31.
    pub const fn main(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Middle group, 0-7.
    pub const fn middle(self) -> u8 {
        (self.0 >> 8) as u8 & 0x07
    }

    /// Sub group, 0-255.
    pub const fn sub(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.main(), self.middle(), self.sub())
    }
}

/// Builds a [`GroupAddress`] from `main/middle/sub` literals, range-checked
/// at compile time.
///
/// # Examples
///
/// ```
/// use knx_cemi::ga;
///
/// let lights = ga!(2/1/5);
/// assert_eq!(lights.to_string(), "2/1/5");
/// ```
///
/// Out-of-range components fail to compile:
///
/// ```compile_fail
/// let bad = knx_cemi::ga!(32/0/0);
/// ```
#[macro_export]
macro_rules! ga {
    ($main:literal / $middle:literal / $sub:literal) => {{
        const _: () = assert!(
            $main <= 31 && $middle <= 7 && $sub <= 255,
            "group address component out of range"
        );
        $crate::addressing::GroupAddress::from_raw(
            (($main as u16) << 11) | (($middle as u16) << 8) | $sub as u16,
        )
    }};
}
