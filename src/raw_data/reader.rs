// src/raw_data/reader.rs
use crate::error::{TdmsError, Result};
use crate::types::Timestamp;
use bytemuck::Pod;
use std::io::Read;
use byteorder::{ReadBytesExt, LittleEndian, BigEndian};

/// Helper functions for reading raw data from TDMS files with proper endianness
pub struct RawDataReader;

impl RawDataReader {
    /// Read an array of values from a stream
    ///
    /// # Example
    ///
    /// ```
    /// use sep005_tdms::raw_data::RawDataReader;
    /// use std::io::Cursor;
    ///
    /// let data = vec![1u8, 0, 0, 0, 2, 0, 0, 0];
    /// let mut cursor = Cursor::new(data);
    ///
    /// let values: Vec<i32> = RawDataReader::read_values(&mut cursor, 2, false).unwrap();
    /// assert_eq!(values, vec![1, 2]);
    /// ```
    pub fn read_values<T: Pod, R: Read>(
        reader: &mut R,
        count: usize,
        is_big_endian: bool,
    ) -> Result<Vec<T>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut result = vec![T::zeroed(); count];
        let size = std::mem::size_of::<T>();
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(result.as_mut_slice());
        reader.read_exact(bytes)?;

        // Stored order differs from native order
        if is_big_endian != cfg!(target_endian = "big") && size > 1 {
            for chunk in bytes.chunks_exact_mut(size) {
                chunk.reverse();
            }
        }

        Ok(result)
    }

    pub fn read_i8<R: Read>(reader: &mut R) -> Result<i8> {
        Ok(reader.read_i8()?)
    }

    pub fn read_i16<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<i16> {
        if is_big_endian {
            Ok(reader.read_i16::<BigEndian>()?)
        } else {
            Ok(reader.read_i16::<LittleEndian>()?)
        }
    }

    pub fn read_i32<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<i32> {
        if is_big_endian {
            Ok(reader.read_i32::<BigEndian>()?)
        } else {
            Ok(reader.read_i32::<LittleEndian>()?)
        }
    }

    pub fn read_i64<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<i64> {
        if is_big_endian {
            Ok(reader.read_i64::<BigEndian>()?)
        } else {
            Ok(reader.read_i64::<LittleEndian>()?)
        }
    }

    pub fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
        Ok(reader.read_u8()?)
    }

    pub fn read_u16<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<u16> {
        if is_big_endian {
            Ok(reader.read_u16::<BigEndian>()?)
        } else {
            Ok(reader.read_u16::<LittleEndian>()?)
        }
    }

    pub fn read_u32<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<u32> {
        if is_big_endian {
            Ok(reader.read_u32::<BigEndian>()?)
        } else {
            Ok(reader.read_u32::<LittleEndian>()?)
        }
    }

    pub fn read_u64<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<u64> {
        if is_big_endian {
            Ok(reader.read_u64::<BigEndian>()?)
        } else {
            Ok(reader.read_u64::<LittleEndian>()?)
        }
    }

    pub fn read_f32<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<f32> {
        if is_big_endian {
            Ok(reader.read_f32::<BigEndian>()?)
        } else {
            Ok(reader.read_f32::<LittleEndian>()?)
        }
    }

    pub fn read_f64<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<f64> {
        if is_big_endian {
            Ok(reader.read_f64::<BigEndian>()?)
        } else {
            Ok(reader.read_f64::<LittleEndian>()?)
        }
    }

    pub fn read_bool<R: Read>(reader: &mut R) -> Result<bool> {
        Ok(reader.read_u8()? != 0)
    }

    pub fn read_timestamp<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<Timestamp> {
        let mut bytes = [0u8; 16];
        reader.read_exact(&mut bytes)?;
        if is_big_endian {
            Ok(Timestamp::from_bytes_be(&bytes))
        } else {
            Ok(Timestamp::from_bytes_le(&bytes))
        }
    }

    /// Read a u32 length-prefixed UTF-8 string
    pub fn read_string<R: Read>(reader: &mut R, is_big_endian: bool) -> Result<String> {
        let length = Self::read_u32(reader, is_big_endian)? as usize;
        if length == 0 {
            return Ok(String::new());
        }

        let mut bytes = Vec::new();
        reader.by_ref().take(length as u64).read_to_end(&mut bytes)?;
        if bytes.len() < length {
            return Err(TdmsError::Io(std::io::ErrorKind::UnexpectedEof.into()));
        }

        String::from_utf8(bytes).map_err(|_| TdmsError::InvalidUtf8)
    }
}
