// src/types.rs
use byteorder::{ByteOrder, LittleEndian, BigEndian};
use chrono::{DateTime, Utc};

/// TDMS data type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DataType {
    Void = 0,
    I8 = 1,
    I16 = 2,
    I32 = 3,
    I64 = 4,
    U8 = 5,
    U16 = 6,
    U32 = 7,
    U64 = 8,
    SingleFloat = 9,
    DoubleFloat = 10,
    String = 0x20,
    Boolean = 0x21,
    TimeStamp = 0x44,
    ComplexSingleFloat = 0x08000c,
    ComplexDoubleFloat = 0x10000d,
    DAQmxRawData = 0xFFFFFFFF,
}

impl DataType {
    pub const F32: DataType = DataType::SingleFloat;
    pub const F64: DataType = DataType::DoubleFloat;

    /// Get the fixed size of this data type in bytes, or None if variable-sized
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            DataType::Void => Some(0),
            DataType::I8 | DataType::U8 | DataType::Boolean => Some(1),
            DataType::I16 | DataType::U16 => Some(2),
            DataType::I32 | DataType::U32 | DataType::SingleFloat => Some(4),
            DataType::I64 | DataType::U64 | DataType::DoubleFloat => Some(8),
            DataType::ComplexSingleFloat => Some(8),
            DataType::TimeStamp | DataType::ComplexDoubleFloat => Some(16),
            DataType::String | DataType::DAQmxRawData => None,
        }
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(DataType::Void),
            1 => Some(DataType::I8),
            2 => Some(DataType::I16),
            3 => Some(DataType::I32),
            4 => Some(DataType::I64),
            5 => Some(DataType::U8),
            6 => Some(DataType::U16),
            7 => Some(DataType::U32),
            8 => Some(DataType::U64),
            9 => Some(DataType::SingleFloat),
            10 => Some(DataType::DoubleFloat),
            0x20 => Some(DataType::String),
            0x21 => Some(DataType::Boolean),
            0x44 => Some(DataType::TimeStamp),
            0x08000c => Some(DataType::ComplexSingleFloat),
            0x10000d => Some(DataType::ComplexDoubleFloat),
            0xFFFFFFFF => Some(DataType::DAQmxRawData),
            _ => None,
        }
    }

    /// Check if this is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(self,
            DataType::I8 | DataType::I16 | DataType::I32 | DataType::I64 |
            DataType::U8 | DataType::U16 | DataType::U32 | DataType::U64
        )
    }

    /// Check if this is a floating point type
    pub fn is_float(&self) -> bool {
        matches!(self, DataType::SingleFloat | DataType::DoubleFloat)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Void => "void",
            DataType::I8 => "i8",
            DataType::I16 => "i16",
            DataType::I32 => "i32",
            DataType::I64 => "i64",
            DataType::U8 => "u8",
            DataType::U16 => "u16",
            DataType::U32 => "u32",
            DataType::U64 => "u64",
            DataType::SingleFloat => "f32",
            DataType::DoubleFloat => "f64",
            DataType::String => "string",
            DataType::Boolean => "bool",
            DataType::TimeStamp => "timestamp",
            DataType::ComplexSingleFloat => "complex_f32",
            DataType::ComplexDoubleFloat => "complex_f64",
            DataType::DAQmxRawData => "daqmx_raw",
        }
    }
}

/// Table of Contents flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocFlags(u32);

impl TocFlags {
    pub const METADATA: u32 = 1 << 1;
    pub const NEW_OBJ_LIST: u32 = 1 << 2;
    pub const RAW_DATA: u32 = 1 << 3;
    pub const INTERLEAVED: u32 = 1 << 5;
    pub const BIG_ENDIAN: u32 = 1 << 6;
    pub const DAQMX_RAW_DATA: u32 = 1 << 7;

    pub fn new(flags: u32) -> Self {
        TocFlags(flags)
    }

    pub fn empty() -> Self {
        TocFlags(0)
    }

    pub fn has_metadata(&self) -> bool {
        self.0 & Self::METADATA != 0
    }

    pub fn has_new_obj_list(&self) -> bool {
        self.0 & Self::NEW_OBJ_LIST != 0
    }

    pub fn has_raw_data(&self) -> bool {
        self.0 & Self::RAW_DATA != 0
    }

    pub fn is_interleaved(&self) -> bool {
        self.0 & Self::INTERLEAVED != 0
    }

    pub fn is_big_endian(&self) -> bool {
        self.0 & Self::BIG_ENDIAN != 0
    }

    pub fn has_daqmx_data(&self) -> bool {
        self.0 & Self::DAQMX_RAW_DATA != 0
    }

    pub fn set_metadata(&mut self, value: bool) {
        self.set(Self::METADATA, value);
    }

    pub fn set_new_obj_list(&mut self, value: bool) {
        self.set(Self::NEW_OBJ_LIST, value);
    }

    pub fn set_raw_data(&mut self, value: bool) {
        self.set(Self::RAW_DATA, value);
    }

    fn set(&mut self, flag: u32, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    pub fn raw_value(&self) -> u32 {
        self.0
    }
}

/// TDMS timestamp (seconds since 1904-01-01 00:00:00 UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    /// Fractions of a second (units of 2^-64)
    pub fractions: u64,
    /// Seconds since epoch (1904-01-01)
    pub seconds: i64,
}

impl Timestamp {
    const EPOCH_OFFSET_SECONDS: i64 = 2082844800; // 1904 to 1970

    pub fn now() -> Self {
        Self::from_datetime(&Utc::now())
    }

    pub fn from_datetime(time: &DateTime<Utc>) -> Self {
        let seconds = time.timestamp() + Self::EPOCH_OFFSET_SECONDS;
        let nanos = time.timestamp_subsec_nanos() as u128;
        let fractions = ((nanos << 64) / 1_000_000_000) as u64;

        Timestamp { seconds, fractions }
    }

    /// Convert to a UTC date-time; `None` when outside chrono's range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = ((self.fractions as u128 * 1_000_000_000) >> 64) as u32;
        DateTime::from_timestamp(self.seconds - Self::EPOCH_OFFSET_SECONDS, nanos)
    }

    pub fn to_bytes_le(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        LittleEndian::write_u64(&mut bytes[0..8], self.fractions);
        LittleEndian::write_i64(&mut bytes[8..16], self.seconds);
        bytes
    }

    pub fn from_bytes_le(bytes: &[u8; 16]) -> Self {
        let fractions = LittleEndian::read_u64(&bytes[0..8]);
        let seconds = LittleEndian::read_i64(&bytes[8..16]);
        Timestamp { seconds, fractions }
    }

    pub fn from_bytes_be(bytes: &[u8; 16]) -> Self {
        let seconds = BigEndian::read_i64(&bytes[0..8]);
        let fractions = BigEndian::read_u64(&bytes[8..16]);
        Timestamp { seconds, fractions }
    }
}

/// Property value that can be attached to objects
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Float(f32),
    Double(f64),
    String(String),
    Boolean(bool),
    Timestamp(Timestamp),
}

impl PropertyValue {
    pub fn data_type(&self) -> DataType {
        match self {
            PropertyValue::I8(_) => DataType::I8,
            PropertyValue::I16(_) => DataType::I16,
            PropertyValue::I32(_) => DataType::I32,
            PropertyValue::I64(_) => DataType::I64,
            PropertyValue::U8(_) => DataType::U8,
            PropertyValue::U16(_) => DataType::U16,
            PropertyValue::U32(_) => DataType::U32,
            PropertyValue::U64(_) => DataType::U64,
            PropertyValue::Float(_) => DataType::SingleFloat,
            PropertyValue::Double(_) => DataType::DoubleFloat,
            PropertyValue::String(_) => DataType::String,
            PropertyValue::Boolean(_) => DataType::Boolean,
            PropertyValue::Timestamp(_) => DataType::TimeStamp,
        }
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            PropertyValue::I8(v) => Some(v as f64),
            PropertyValue::I16(v) => Some(v as f64),
            PropertyValue::I32(v) => Some(v as f64),
            PropertyValue::I64(v) => Some(v as f64),
            PropertyValue::U8(v) => Some(v as f64),
            PropertyValue::U16(v) => Some(v as f64),
            PropertyValue::U32(v) => Some(v as f64),
            PropertyValue::U64(v) => Some(v as f64),
            PropertyValue::Float(v) => Some(v as f64),
            PropertyValue::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            PropertyValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        use byteorder::WriteBytesExt;

        match self {
            PropertyValue::I8(v) => writer.write_i8(*v),
            PropertyValue::I16(v) => writer.write_i16::<LittleEndian>(*v),
            PropertyValue::I32(v) => writer.write_i32::<LittleEndian>(*v),
            PropertyValue::I64(v) => writer.write_i64::<LittleEndian>(*v),
            PropertyValue::U8(v) => writer.write_u8(*v),
            PropertyValue::U16(v) => writer.write_u16::<LittleEndian>(*v),
            PropertyValue::U32(v) => writer.write_u32::<LittleEndian>(*v),
            PropertyValue::U64(v) => writer.write_u64::<LittleEndian>(*v),
            PropertyValue::Float(v) => writer.write_f32::<LittleEndian>(*v),
            PropertyValue::Double(v) => writer.write_f64::<LittleEndian>(*v),
            PropertyValue::Boolean(v) => writer.write_u8(if *v { 1 } else { 0 }),
            PropertyValue::Timestamp(ts) => writer.write_all(&ts.to_bytes_le()),
            PropertyValue::String(s) => {
                let bytes = s.as_bytes();
                writer.write_u32::<LittleEndian>(bytes.len() as u32)?;
                writer.write_all(bytes)
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

/// Represents a property with name and value
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
        }
    }
}
