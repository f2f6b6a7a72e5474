// src/raw_data/buffer.rs
use bytes::{BytesMut, BufMut};
use bytemuck::Pod;
use crate::types::DataType;
use crate::error::{TdmsError, Result};
use std::mem;

/// Buffer accumulating raw channel data in TDMS little-endian layout
///
/// Tracks the number of values written so the segment metadata can describe
/// the data without re-inspecting the bytes.
///
/// # Example
///
/// ```
/// use sep005_tdms::raw_data::RawDataBuffer;
/// use sep005_tdms::types::DataType;
///
/// let mut buffer = RawDataBuffer::new(DataType::SingleFloat);
/// buffer.write_f32(0.5).unwrap();
/// buffer.write_slice(&[1.0f32, 2.0]).unwrap();
///
/// assert_eq!(buffer.value_count(), 3);
/// assert_eq!(buffer.byte_len(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct RawDataBuffer {
    buffer: BytesMut,
    data_type: DataType,
    value_count: u64,
}

impl RawDataBuffer {
    /// Create a new buffer with default capacity (8192 bytes)
    pub fn new(data_type: DataType) -> Self {
        Self::with_capacity(data_type, 8192)
    }

    pub fn with_capacity(data_type: DataType, capacity: usize) -> Self {
        RawDataBuffer {
            buffer: BytesMut::with_capacity(capacity),
            data_type,
            value_count: 0,
        }
    }

    /// Buffer pre-filled with single precision samples
    pub fn from_f32(values: &[f32]) -> Self {
        let mut buffer = Self::with_capacity(DataType::SingleFloat, values.len() * 4);
        for &value in values {
            buffer.buffer.put_f32_le(value);
        }
        buffer.value_count = values.len() as u64;
        buffer
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.check_type(DataType::SingleFloat)?;
        self.buffer.put_f32_le(value);
        self.value_count += 1;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.check_type(DataType::DoubleFloat)?;
        self.buffer.put_f64_le(value);
        self.value_count += 1;
        Ok(())
    }

    /// Write a slice of plain values whose size matches the buffer's data type
    ///
    /// Values are copied as native bytes, which is the TDMS layout on
    /// little-endian targets.
    pub fn write_slice<T: Pod>(&mut self, values: &[T]) -> Result<()> {
        let type_size = mem::size_of::<T>();

        let expected_size = self.data_type.fixed_size().ok_or_else(|| {
            TdmsError::TypeMismatch {
                expected: format!("{:?}", self.data_type),
                found: "Variable-size type".to_string(),
            }
        })?;

        if type_size != expected_size {
            return Err(TdmsError::TypeMismatch {
                expected: format!("{:?} (size {})", self.data_type, expected_size),
                found: format!("Type with size {}", type_size),
            });
        }

        if cfg!(target_endian = "big") && type_size > 1 {
            for value in values {
                let mut bytes = bytemuck::bytes_of(value).to_vec();
                bytes.reverse();
                self.buffer.extend_from_slice(&bytes);
            }
        } else {
            self.buffer.extend_from_slice(bytemuck::cast_slice(values));
        }
        self.value_count += values.len() as u64;
        Ok(())
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn value_count(&self) -> u64 {
        self.value_count
    }

    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer, resetting value count and removing all data
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.value_count = 0;
    }

    fn check_type(&self, expected: DataType) -> Result<()> {
        if self.data_type != expected {
            return Err(TdmsError::TypeMismatch {
                expected: format!("{:?}", self.data_type),
                found: format!("{:?}", expected),
            });
        }
        Ok(())
    }
}
