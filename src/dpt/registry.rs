//! Datapoint type registry.
//!
//! Maps symbolic KNX datapoint-type names to their protocol metadata: the
//! main/sub type numbers used for addressing and the format string that
//! drives the codec. The table is pure data; the codec consumes nothing
//! but [`format_string`](DatapointType::format_string), so growing the
//! table never requires codec changes.
//!
//! This registry carries a representative subset of the full ~500-entry
//! KNX table, spanning every format-token kind the codec supports.

use crate::dpt::codec;
use crate::error::{CemiError, Result};
use crate::frame::MAX_FRAME_SIZE;
use crate::knx_log;
use crate::value::Value;

/// Symbolic KNX datapoint types.
///
/// # Examples
///
/// ```
/// use knx_cemi::dpt::DatapointType;
///
/// let dpt = DatapointType::from_name("DPT_Switch").unwrap();
/// assert_eq!(dpt.main_number(), 1);
/// assert_eq!(dpt.format_string(), "B1");
///
/// let value = dpt.decode(&[0x01]).unwrap();
/// assert_eq!(value.as_scalar().and_then(|v| v.as_bool()), Some(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DatapointType {
    /// DPT 1.001 - On/Off switch
    Switch,
    /// DPT 1.002 - Boolean
    Bool,
    /// DPT 1.003 - Enable/Disable
    Enable,
    /// DPT 1.008 - Up/Down
    UpDown,
    /// DPT 1.009 - Open/Close
    OpenClose,
    /// DPT 1.010 - Start/Stop
    Start,
    /// DPT 2.001 - Switch with priority control
    SwitchControl,
    /// DPT 3.007 - Dimming control
    ControlDimming,
    /// DPT 3.008 - Blinds control
    ControlBlinds,
    /// DPT 4.001 - ASCII character
    CharAscii,
    /// DPT 4.002 - ISO 8859-1 character
    CharLatin1,
    /// DPT 5.001 - Scaling (0-100%)
    Scaling,
    /// DPT 5.003 - Angle (0-360 deg)
    Angle,
    /// DPT 5.004 - Percent (0-255%)
    PercentU8,
    /// DPT 5.005 - Decimal factor
    DecimalFactor,
    /// DPT 5.006 - Tariff
    Tariff,
    /// DPT 6.001 - Percent (-128..127%)
    PercentV8,
    /// DPT 6.010 - Signed counter pulses
    Value1Count,
    /// DPT 7.002 - Time period in milliseconds
    TimePeriodMsec,
    /// DPT 8.001 - Signed counter pulses (16 bit)
    Value2Count,
    /// DPT 9.001 - Temperature (degrees C)
    ValueTemp,
    /// DPT 9.004 - Illuminance (lux)
    ValueLux,
    /// DPT 9.007 - Humidity (%)
    ValueHumidity,
    /// DPT 9.023 - Kelvin per percent
    KelvinPerPercent,
    /// DPT 10.001 - Time of day
    TimeOfDay,
    /// DPT 11.001 - Date
    Date,
    /// DPT 12.001 - Unsigned counter pulses (32 bit)
    Value4Ucount,
    /// DPT 13.001 - Signed counter pulses (32 bit)
    Value4Count,
    /// DPT 13.100 - Time lag in seconds
    LongDeltaTimeSec,
    /// DPT 14.019 - Electric current (A)
    ValueElectricCurrent,
    /// DPT 14.056 - Power (W)
    ValuePower,
    /// DPT 14.074 - Time (s)
    ValueTime,
    /// DPT 15.000 - Access control data
    AccessData,
    /// DPT 16.000 - ASCII string (14 characters)
    StringAscii,
    /// DPT 16.001 - ISO 8859-1 string (14 characters)
    StringLatin1,
    /// DPT 17.001 - Scene number
    SceneNumber,
    /// DPT 19.001 - Date and time
    DateTime,
    /// DPT 20.102 - HVAC mode
    HvacMode,
    /// DPT 21.001 - General status bits
    StatusGen,
    /// DPT 203.002 - Time period with status
    TimePeriodMsecZ,
}

impl DatapointType {
    /// Every registry entry, for iteration and name lookup.
    pub const ALL: &'static [DatapointType] = &[
        Self::Switch,
        Self::Bool,
        Self::Enable,
        Self::UpDown,
        Self::OpenClose,
        Self::Start,
        Self::SwitchControl,
        Self::ControlDimming,
        Self::ControlBlinds,
        Self::CharAscii,
        Self::CharLatin1,
        Self::Scaling,
        Self::Angle,
        Self::PercentU8,
        Self::DecimalFactor,
        Self::Tariff,
        Self::PercentV8,
        Self::Value1Count,
        Self::TimePeriodMsec,
        Self::Value2Count,
        Self::ValueTemp,
        Self::ValueLux,
        Self::ValueHumidity,
        Self::KelvinPerPercent,
        Self::TimeOfDay,
        Self::Date,
        Self::Value4Ucount,
        Self::Value4Count,
        Self::LongDeltaTimeSec,
        Self::ValueElectricCurrent,
        Self::ValuePower,
        Self::ValueTime,
        Self::AccessData,
        Self::StringAscii,
        Self::StringLatin1,
        Self::SceneNumber,
        Self::DateTime,
        Self::HvacMode,
        Self::StatusGen,
        Self::TimePeriodMsecZ,
    ];

    /// The symbolic name of this type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Switch => "DPT_Switch",
            Self::Bool => "DPT_Bool",
            Self::Enable => "DPT_Enable",
            Self::UpDown => "DPT_UpDown",
            Self::OpenClose => "DPT_OpenClose",
            Self::Start => "DPT_Start",
            Self::SwitchControl => "DPT_Switch_Control",
            Self::ControlDimming => "DPT_Control_Dimming",
            Self::ControlBlinds => "DPT_Control_Blinds",
            Self::CharAscii => "DPT_Char_ASCII",
            Self::CharLatin1 => "DPT_Char_8859_1",
            Self::Scaling => "DPT_Scaling",
            Self::Angle => "DPT_Angle",
            Self::PercentU8 => "DPT_Percent_U8",
            Self::DecimalFactor => "DPT_DecimalFactor",
            Self::Tariff => "DPT_Tariff",
            Self::PercentV8 => "DPT_Percent_V8",
            Self::Value1Count => "DPT_Value_1_Count",
            Self::TimePeriodMsec => "DPT_TimePeriodMsec",
            Self::Value2Count => "DPT_Value_2_Count",
            Self::ValueTemp => "DPT_Value_Temp",
            Self::ValueLux => "DPT_Value_Lux",
            Self::ValueHumidity => "DPT_Value_Humidity",
            Self::KelvinPerPercent => "DPT_KelvinPerPercent",
            Self::TimeOfDay => "DPT_TimeOfDay",
            Self::Date => "DPT_Date",
            Self::Value4Ucount => "DPT_Value_4_Ucount",
            Self::Value4Count => "DPT_Value_4_Count",
            Self::LongDeltaTimeSec => "DPT_LongDeltaTimeSec",
            Self::ValueElectricCurrent => "DPT_Value_Electric_Current",
            Self::ValuePower => "DPT_Value_Power",
            Self::ValueTime => "DPT_Value_Time",
            Self::AccessData => "DPT_Access_Data",
            Self::StringAscii => "DPT_String_ASCII",
            Self::StringLatin1 => "DPT_String_8859_1",
            Self::SceneNumber => "DPT_SceneNumber",
            Self::DateTime => "DPT_DateTime",
            Self::HvacMode => "DPT_HVACMode",
            Self::StatusGen => "DPT_StatusGen",
            Self::TimePeriodMsecZ => "DPT_TimePeriodMsec_Z",
        }
    }

    /// The main type number; addressing metadata, not used for decoding.
    pub const fn main_number(self) -> u16 {
        match self {
            Self::Switch | Self::Bool | Self::Enable | Self::UpDown | Self::OpenClose
            | Self::Start => 1,
            Self::SwitchControl => 2,
            Self::ControlDimming | Self::ControlBlinds => 3,
            Self::CharAscii | Self::CharLatin1 => 4,
            Self::Scaling | Self::Angle | Self::PercentU8 | Self::DecimalFactor
            | Self::Tariff => 5,
            Self::PercentV8 | Self::Value1Count => 6,
            Self::TimePeriodMsec => 7,
            Self::Value2Count => 8,
            Self::ValueTemp | Self::ValueLux | Self::ValueHumidity | Self::KelvinPerPercent => 9,
            Self::TimeOfDay => 10,
            Self::Date => 11,
            Self::Value4Ucount => 12,
            Self::Value4Count | Self::LongDeltaTimeSec => 13,
            Self::ValueElectricCurrent | Self::ValuePower | Self::ValueTime => 14,
            Self::AccessData => 15,
            Self::StringAscii | Self::StringLatin1 => 16,
            Self::SceneNumber => 17,
            Self::DateTime => 19,
            Self::HvacMode => 20,
            Self::StatusGen => 21,
            Self::TimePeriodMsecZ => 203,
        }
    }

    /// The sub type number; addressing metadata, not used for decoding.
    pub const fn sub_number(self) -> u16 {
        match self {
            Self::Switch | Self::SwitchControl | Self::PercentV8 | Self::Scaling
            | Self::CharAscii | Self::TimeOfDay | Self::Date | Self::Value4Ucount
            | Self::Value4Count | Self::Value2Count | Self::ValueTemp | Self::SceneNumber
            | Self::DateTime | Self::StatusGen | Self::StringLatin1 => 1,
            Self::Bool | Self::CharLatin1 | Self::TimePeriodMsec | Self::TimePeriodMsecZ => 2,
            Self::Enable | Self::Angle => 3,
            Self::PercentU8 | Self::ValueLux => 4,
            Self::DecimalFactor => 5,
            Self::Tariff => 6,
            Self::ControlDimming | Self::ValueHumidity => 7,
            Self::UpDown | Self::ControlBlinds => 8,
            Self::OpenClose => 9,
            Self::Start | Self::Value1Count => 10,
            Self::ValueElectricCurrent => 19,
            Self::KelvinPerPercent => 23,
            Self::ValuePower => 56,
            Self::ValueTime => 74,
            Self::LongDeltaTimeSec => 100,
            Self::AccessData | Self::StringAscii => 0,
            Self::HvacMode => 102,
        }
    }

    /// The format string describing this type's wire layout.
    pub const fn format_string(self) -> &'static str {
        match self {
            Self::Switch | Self::Bool | Self::Enable | Self::UpDown | Self::OpenClose
            | Self::Start => "B1",
            Self::SwitchControl => "B2",
            Self::ControlDimming | Self::ControlBlinds => "B1U3",
            Self::CharAscii => "A8_ASCII",
            Self::CharLatin1 => "A8_8859_1",
            Self::Scaling | Self::Angle | Self::PercentU8 | Self::DecimalFactor
            | Self::Tariff => "U8",
            Self::PercentV8 | Self::Value1Count => "V8",
            Self::TimePeriodMsec => "U16",
            Self::Value2Count => "V16",
            Self::ValueTemp | Self::ValueLux | Self::ValueHumidity | Self::KelvinPerPercent => {
                "F16"
            }
            Self::TimeOfDay => "N3N5r2N6r2N6",
            Self::Date => "r3N5r4N4r1U7",
            Self::Value4Ucount => "U32",
            Self::Value4Count | Self::LongDeltaTimeSec => "V32",
            Self::ValueElectricCurrent | Self::ValuePower | Self::ValueTime => "F32",
            Self::AccessData => "U4U4U4U4U4U4B4N4",
            Self::StringAscii => "A112_ASCII",
            Self::StringLatin1 => "A112_8859_1",
            Self::SceneNumber => "r2U6",
            Self::DateTime => "U8r4U4r3U5U3U5r2U6r2U6B16",
            Self::HvacMode => "N8",
            Self::StatusGen => "B8",
            Self::TimePeriodMsecZ => "U16Z8TimePeriod",
        }
    }

    /// Find a registry entry by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|dpt| dpt.name() == name)
    }

    /// Find a registry entry by name, failing on unknown names.
    pub fn lookup(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| {
            knx_log!(warn, "unknown datapoint type {}", name);
            CemiError::unknown_datapoint_type()
        })
    }

    /// Decode a value of this type from raw bytes.
    pub fn decode(self, bytes: &[u8]) -> Result<Value> {
        codec::decode_datapoint(self.format_string(), bytes)
    }

    /// Encode a value of this type to raw bytes.
    pub fn encode(self, value: &Value) -> Result<heapless::Vec<u8, MAX_FRAME_SIZE>> {
        codec::encode_datapoint(self.format_string(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarValue;

    #[test]
    fn test_name_round_trip() {
        for &dpt in DatapointType::ALL {
            assert_eq!(DatapointType::from_name(dpt.name()), Some(dpt));
        }
    }

    #[test]
    fn test_every_format_string_compiles() {
        use crate::format::FormatSpec;

        for &dpt in DatapointType::ALL {
            let spec = FormatSpec::compile(dpt.format_string());
            assert!(spec.is_ok(), "{} failed to compile", dpt.name());
        }
    }

    #[test]
    fn test_numbers() {
        assert_eq!(DatapointType::Switch.main_number(), 1);
        assert_eq!(DatapointType::Switch.sub_number(), 1);
        assert_eq!(DatapointType::ValueTemp.main_number(), 9);
        assert_eq!(DatapointType::ValueTemp.sub_number(), 1);
        assert_eq!(DatapointType::TimePeriodMsecZ.main_number(), 203);
        assert_eq!(DatapointType::LongDeltaTimeSec.sub_number(), 100);
    }

    #[test]
    fn test_lookup_unknown_name() {
        let err = DatapointType::lookup("DPT_NoSuchThing").unwrap_err();
        assert!(matches!(err, CemiError::Dpt(ref e) if e.is_unknown_type()));
    }

    #[test]
    fn test_decode_through_registry() {
        let value = DatapointType::Switch.decode(&[0x01]).unwrap();
        assert_eq!(
            value.as_scalar().and_then(ScalarValue::as_bool),
            Some(true)
        );

        let value = DatapointType::ValueTemp.decode(&[0x0C, 0x38]).unwrap();
        let temp = value.as_scalar().and_then(ScalarValue::as_f32).unwrap();
        assert!((temp - 21.6).abs() < 0.01);
    }

    #[test]
    fn test_encode_through_registry() {
        let value = Value::Scalar(ScalarValue::UInt {
            width: 8,
            value: 75,
        });
        let bytes = DatapointType::Scaling.encode(&value).unwrap();
        assert_eq!(&bytes[..], &[75]);
    }
}
