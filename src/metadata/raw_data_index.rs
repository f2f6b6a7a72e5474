// src/metadata/raw_data_index.rs
use crate::error::{TdmsError, Result};
use crate::types::DataType;

/// Raw data index information for a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDataIndex {
    pub data_type: DataType,
    pub array_dimension: u32,
    pub number_of_values: u64,
    pub total_size_bytes: u64,
}

impl RawDataIndex {
    pub const NO_RAW_DATA: u32 = 0xFFFFFFFF;
    pub const MATCHES_PREVIOUS: u32 = 0x00000000;
    /// Index length header for fixed-size types, counting the header itself
    pub const FIXED_INDEX_LENGTH: u32 = 20;
    pub const STRING_INDEX_LENGTH: u32 = 28;

    /// Index for `number_of_values` values; the byte size saturates for
    /// counts no file could hold. Use [`RawDataIndex::try_new`] for counts
    /// read from disk.
    pub fn new(data_type: DataType, number_of_values: u64) -> Self {
        let total_size_bytes = data_type.fixed_size()
            .map_or(0, |size| number_of_values.saturating_mul(size as u64));

        RawDataIndex {
            data_type,
            array_dimension: 1,
            number_of_values,
            total_size_bytes,
        }
    }

    /// Like [`RawDataIndex::new`], but fails when the byte size overflows
    pub fn try_new(data_type: DataType, number_of_values: u64) -> Result<Self> {
        let total_size_bytes = match data_type.fixed_size() {
            Some(size) => number_of_values.checked_mul(size as u64).ok_or_else(|| {
                TdmsError::InvalidRawDataIndex(format!(
                    "{} values of {} overflow the byte size",
                    number_of_values, data_type.name()
                ))
            })?,
            None => 0,
        };

        Ok(RawDataIndex {
            data_type,
            array_dimension: 1,
            number_of_values,
            total_size_bytes,
        })
    }

    pub fn with_size(data_type: DataType, number_of_values: u64, total_size_bytes: u64) -> Self {
        RawDataIndex {
            data_type,
            array_dimension: 1,
            number_of_values,
            total_size_bytes,
        }
    }

    pub fn index_length(&self) -> u32 {
        if self.data_type == DataType::String {
            Self::STRING_INDEX_LENGTH
        } else {
            Self::FIXED_INDEX_LENGTH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_data_index_creation() {
        let index = RawDataIndex::new(DataType::SingleFloat, 1000);
        assert_eq!(index.array_dimension, 1);
        assert_eq!(index.total_size_bytes, 4000);
        assert_eq!(index.index_length(), 20);

        let string_index = RawDataIndex::with_size(DataType::String, 3, 23);
        assert_eq!(string_index.total_size_bytes, 23);
        assert_eq!(string_index.index_length(), 28);
    }

    #[test]
    fn test_overflowing_value_count() {
        let err = RawDataIndex::try_new(DataType::SingleFloat, u64::MAX / 2).unwrap_err();
        assert!(err.is_corruption());

        assert_eq!(RawDataIndex::new(DataType::SingleFloat, u64::MAX / 2).total_size_bytes, u64::MAX);
        assert_eq!(RawDataIndex::try_new(DataType::I16, 8).unwrap().total_size_bytes, 16);
        assert_eq!(RawDataIndex::try_new(DataType::String, u64::MAX).unwrap().total_size_bytes, 0);
    }
}
