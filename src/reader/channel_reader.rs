// src/reader/channel_reader.rs
use crate::error::{TdmsError, Result};
use crate::types::{DataType, Property};
use crate::metadata::ObjectPath;
use crate::segment::SegmentInfo;
use crate::raw_data::RawDataReader;
use bytemuck::Pod;
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

/// Data for a channel within a specific segment chunk
#[derive(Debug, Clone)]
pub struct SegmentData {
    pub segment_index: usize,
    pub value_count: u64,
    pub byte_size: u64,
    /// Offset within the segment's raw data section
    pub byte_offset: u64,
}

/// Information about a channel read from a TDMS file
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub data_type: DataType,
    pub properties: HashMap<String, Property>,
    pub segments: Vec<SegmentData>,
    pub total_values: u64,
    /// (value count, byte size) of the raw data index in effect for the
    /// segment being parsed; `None` when the channel has no data there
    pub(crate) current_index: Option<(u64, u64)>,
    pub(crate) last_index: Option<(u64, u64)>,
}

impl ChannelInfo {
    pub fn new(data_type: DataType) -> Self {
        ChannelInfo {
            data_type,
            properties: HashMap::new(),
            segments: Vec::new(),
            total_values: 0,
            current_index: None,
            last_index: None,
        }
    }

    pub fn add_segment(&mut self, segment_data: SegmentData) {
        self.total_values = self.total_values.saturating_add(segment_data.value_count);
        self.segments.push(segment_data);
    }
}

/// Whole-channel sample array
///
/// Single and double precision channels are returned as stored; integer
/// channels are widened to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelData {
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl ChannelData {
    pub fn len(&self) -> usize {
        match self {
            ChannelData::F32(values) => values.len(),
            ChannelData::F64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the values of one channel out of the segments that hold it
pub struct ChannelReader<'a> {
    path: &'a ObjectPath,
    info: &'a ChannelInfo,
}

impl<'a> ChannelReader<'a> {
    pub(crate) fn new(path: &'a ObjectPath, info: &'a ChannelInfo) -> Self {
        ChannelReader { path, info }
    }

    pub fn data_type(&self) -> DataType {
        self.info.data_type
    }

    /// Total number of values across all segments
    pub fn total_values(&self) -> u64 {
        self.info.total_values
    }

    pub fn segment_count(&self) -> usize {
        self.info.segments.len()
    }

    /// Read all values as `T`, which must have the channel's storage size
    pub fn read_all_data<T: Pod, R: Read + Seek>(
        &self,
        reader: &mut R,
        segments: &[SegmentInfo],
    ) -> Result<Vec<T>> {
        let size = self.info.data_type.fixed_size();
        if size != Some(std::mem::size_of::<T>()) {
            return Err(TdmsError::TypeMismatch {
                expected: self.info.data_type.name().to_string(),
                found: std::any::type_name::<T>().to_string(),
            });
        }

        if self.info.total_values > usize::MAX as u64 {
            return Err(TdmsError::Unsupported(
                "Channel has more values than can fit in memory".to_string(),
            ));
        }

        for segment_data in &self.info.segments {
            self.check_bounds(segment_data, &segments[segment_data.segment_index], size)?;
        }

        let mut result = Vec::with_capacity(self.info.total_values as usize);

        for segment_data in &self.info.segments {
            let segment_info = &segments[segment_data.segment_index];
            let data_offset = segment_info.raw_data_start() + segment_data.byte_offset;

            reader.seek(SeekFrom::Start(data_offset))?;

            let values = RawDataReader::read_values::<T, _>(
                reader,
                segment_data.value_count as usize,
                segment_info.is_big_endian,
            )?;

            result.extend_from_slice(&values);
        }

        Ok(result)
    }

    /// Read the whole channel as floating point samples
    pub fn read_samples<R: Read + Seek>(
        &self,
        reader: &mut R,
        segments: &[SegmentInfo],
    ) -> Result<ChannelData> {
        match self.info.data_type {
            DataType::SingleFloat => Ok(ChannelData::F32(self.read_all_data(reader, segments)?)),
            DataType::DoubleFloat => Ok(ChannelData::F64(self.read_all_data(reader, segments)?)),
            DataType::I8 => self.widen::<i8, _>(reader, segments, |v| v as f64),
            DataType::I16 => self.widen::<i16, _>(reader, segments, |v| v as f64),
            DataType::I32 => self.widen::<i32, _>(reader, segments, |v| v as f64),
            DataType::I64 => self.widen::<i64, _>(reader, segments, |v| v as f64),
            DataType::U8 => self.widen::<u8, _>(reader, segments, |v| v as f64),
            DataType::U16 => self.widen::<u16, _>(reader, segments, |v| v as f64),
            DataType::U32 => self.widen::<u32, _>(reader, segments, |v| v as f64),
            DataType::U64 => self.widen::<u64, _>(reader, segments, |v| v as f64),
            // A channel object that never carried data
            DataType::Void => Ok(ChannelData::F64(Vec::new())),
            other => Err(TdmsError::TypeMismatch {
                expected: "numeric channel".to_string(),
                found: format!("{} channel {}", other.name(), self.path),
            }),
        }
    }

    /// The chunk must lie inside the segment's raw data and hold exactly
    /// `value_count` values of `value_size` bytes
    fn check_bounds(
        &self,
        segment_data: &SegmentData,
        segment: &SegmentInfo,
        value_size: Option<usize>,
    ) -> Result<()> {
        let expected = value_size.and_then(|size| segment_data.value_count.checked_mul(size as u64));
        let end = segment_data.byte_offset.checked_add(segment_data.byte_size);

        match (expected, end) {
            (Some(expected), Some(end))
                if expected == segment_data.byte_size && end <= segment.total_raw_data_size => Ok(()),
            _ => Err(TdmsError::InvalidRawDataIndex(format!(
                "{} values of {} at byte {} exceed the raw data of segment at offset {}",
                segment_data.value_count, self.path, segment_data.byte_offset, segment.offset
            ))),
        }
    }

    fn widen<T: Pod, R: Read + Seek>(
        &self,
        reader: &mut R,
        segments: &[SegmentInfo],
        convert: fn(T) -> f64,
    ) -> Result<ChannelData> {
        let values: Vec<T> = self.read_all_data(reader, segments)?;
        Ok(ChannelData::F64(values.into_iter().map(convert).collect()))
    }
}
