// src/reader/sync_reader.rs
use crate::error::{TdmsError, Result};
use crate::types::{DataType, Property, PropertyValue};
use crate::segment::{SegmentHeader, SegmentInfo};
use crate::reader::channel_reader::{ChannelData, ChannelInfo, ChannelReader, SegmentData};
use crate::metadata::{ObjectPath, RawDataIndex};
use crate::raw_data::RawDataReader;
use bytemuck::Pod;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Raw data index headers announcing DAQmx formatted data
const DAQMX_FORMAT_CHANGING_SCALER: u32 = 0x00001269;
const DAQMX_DIGITAL_LINE_SCALER: u32 = 0x0000126A;

/// Trait alias for Read + Seek
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Synchronous TDMS file reader
///
/// Opening a file parses every segment's metadata up front; channel values
/// are read on demand. Groups and channels keep the order in which they first
/// appear in the file.
pub struct TdmsReader<R: ReadSeek> {
    file: R,
    segments: Vec<SegmentInfo>,
    channels: HashMap<ObjectPath, ChannelInfo>,
    channel_order: Vec<ObjectPath>,
    group_order: Vec<String>,
    file_properties: HashMap<String, Property>,
    groups: HashMap<String, HashMap<String, Property>>,
}

impl TdmsReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::with_capacity(65536, file))
    }
}

impl<R: ReadSeek> TdmsReader<R> {
    pub fn from_reader(file: R) -> Result<Self> {
        let mut reader = TdmsReader {
            file,
            segments: Vec::new(),
            channels: HashMap::new(),
            channel_order: Vec::new(),
            group_order: Vec::new(),
            file_properties: HashMap::new(),
            groups: HashMap::new(),
        };

        reader.discover_segments()?;
        reader.parse_metadata()?;
        Ok(reader)
    }

    fn discover_segments(&mut self) -> Result<()> {
        let file_size = self.file.seek(SeekFrom::End(0))?;
        self.file.seek(SeekFrom::Start(0))?;
        let lead_in_size = SegmentHeader::LEAD_IN_SIZE as u64;

        let mut segment_offset = 0u64;
        while segment_offset < file_size {
            if file_size - segment_offset < lead_in_size {
                return Err(TdmsError::IncompleteSegment(segment_offset));
            }

            let header = SegmentHeader::read_from(&mut self.file)?;
            let data_start = segment_offset + lead_in_size;

            if header.toc.has_daqmx_data() {
                return Err(TdmsError::Unsupported("DAQmx raw data".to_string()));
            }

            let available = file_size - data_start;
            let truncated = header.is_incomplete() || header.next_segment_offset > available;
            let segment_size = if truncated {
                log::debug!(
                    "segment at offset {} runs to end of file ({} bytes available)",
                    segment_offset, available
                );
                available
            } else {
                header.next_segment_offset
            };

            if header.raw_data_offset > segment_size {
                return Err(TdmsError::IncompleteSegment(segment_offset));
            }

            self.segments.push(SegmentInfo {
                offset: segment_offset,
                toc: header.toc,
                is_big_endian: header.toc.is_big_endian(),
                metadata_size: header.raw_data_offset,
                total_raw_data_size: segment_size - header.raw_data_offset,
            });

            if truncated {
                break;
            }

            segment_offset = data_start + segment_size;
            self.file.seek(SeekFrom::Start(segment_offset))?;
        }

        log::debug!("discovered {} segments in {} bytes", self.segments.len(), file_size);
        Ok(())
    }

    fn parse_metadata(&mut self) -> Result<()> {
        let mut active_channels: Vec<ObjectPath> = Vec::new();

        let segments = std::mem::take(&mut self.segments);
        for (segment_idx, segment) in segments.iter().enumerate() {
            if segment.toc.has_new_obj_list() {
                active_channels.clear();
            }

            if segment.toc.has_metadata() {
                self.file.seek(SeekFrom::Start(segment.offset + SegmentHeader::LEAD_IN_SIZE as u64))?;
                self.parse_segment_metadata(segment, &mut active_channels)?;
            }

            if segment.toc.has_raw_data() && !active_channels.is_empty() {
                if segment.toc.is_interleaved() {
                    return Err(TdmsError::Unsupported("interleaved raw data".to_string()));
                }
                self.calculate_segment_offsets(segment, segment_idx, &active_channels)?;
            }
        }
        self.segments = segments;

        Ok(())
    }

    fn parse_segment_metadata(
        &mut self,
        segment: &SegmentInfo,
        active_channels: &mut Vec<ObjectPath>,
    ) -> Result<()> {
        let is_big_endian = segment.is_big_endian;
        let object_count = RawDataReader::read_u32(&mut self.file, is_big_endian)?;

        for _ in 0..object_count {
            let path_string = RawDataReader::read_string(&mut self.file, is_big_endian)?;
            let path = ObjectPath::from_string(&path_string)?;

            let raw_index_header = RawDataReader::read_u32(&mut self.file, is_big_endian)?;
            let index = match raw_index_header {
                RawDataIndex::NO_RAW_DATA => IndexUpdate::NoData,
                RawDataIndex::MATCHES_PREVIOUS => IndexUpdate::MatchesPrevious,
                DAQMX_FORMAT_CHANGING_SCALER | DAQMX_DIGITAL_LINE_SCALER => {
                    return Err(TdmsError::Unsupported("DAQmx raw data index".to_string()));
                }
                _ => IndexUpdate::New(self.read_raw_data_index(is_big_endian)?),
            };

            let property_count = RawDataReader::read_u32(&mut self.file, is_big_endian)?;
            let mut local_properties = HashMap::new();
            for _ in 0..property_count {
                let prop = self.read_property(is_big_endian)?;
                local_properties.insert(prop.name.clone(), prop);
            }

            self.register_object(&path);

            match &path {
                ObjectPath::Root => self.file_properties.extend(local_properties),
                ObjectPath::Group(name) => {
                    self.groups.entry(name.clone()).or_default().extend(local_properties)
                }
                ObjectPath::Channel { .. } => {
                    let channel_info = self.channels.entry(path.clone())
                        .or_insert_with(|| ChannelInfo::new(DataType::Void));
                    channel_info.properties.extend(local_properties);

                    match index {
                        IndexUpdate::New(index) => {
                            channel_info.data_type = index.data_type;
                            let sizes = (index.number_of_values, index.total_size_bytes);
                            channel_info.current_index = Some(sizes);
                            channel_info.last_index = Some(sizes);
                        }
                        IndexUpdate::MatchesPrevious => {
                            channel_info.current_index = channel_info.last_index;
                        }
                        IndexUpdate::NoData => channel_info.current_index = None,
                    }

                    if !active_channels.contains(&path) {
                        active_channels.push(path.clone());
                    }
                }
            }
        }
        Ok(())
    }

    fn read_raw_data_index(&mut self, is_big_endian: bool) -> Result<RawDataIndex> {
        let data_type_raw = RawDataReader::read_u32(&mut self.file, is_big_endian)?;
        let data_type = DataType::from_u32(data_type_raw)
            .ok_or(TdmsError::InvalidDataType(data_type_raw))?;

        let dimension = RawDataReader::read_u32(&mut self.file, is_big_endian)?;
        if dimension != 1 {
            return Err(TdmsError::InvalidDimension(dimension));
        }

        let number_of_values = RawDataReader::read_u64(&mut self.file, is_big_endian)?;
        if data_type == DataType::String {
            let total_size = RawDataReader::read_u64(&mut self.file, is_big_endian)?;
            Ok(RawDataIndex::with_size(data_type, number_of_values, total_size))
        } else {
            RawDataIndex::try_new(data_type, number_of_values)
        }
    }

    /// Record first appearance order of groups and channels
    fn register_object(&mut self, path: &ObjectPath) {
        if let Some(group) = path.group() {
            if !self.group_order.iter().any(|g| g == group) {
                self.group_order.push(group.to_string());
            }
        }
        if path.is_channel() && !self.channels.contains_key(path) {
            self.channel_order.push(path.clone());
        }
    }

    fn calculate_segment_offsets(
        &mut self,
        segment: &SegmentInfo,
        segment_idx: usize,
        channel_keys: &[ObjectPath],
    ) -> Result<()> {
        let mut chunk_size = 0u64;
        let mut has_variable_length_type = false;

        for channel_key in channel_keys {
            if let Some(info) = self.channels.get(channel_key) {
                if let Some((_, byte_size)) = info.current_index {
                    chunk_size = chunk_size.checked_add(byte_size)
                        .ok_or_else(|| chunk_overflow(segment))?;
                    has_variable_length_type |= info.data_type == DataType::String;
                }
            }
        }

        if chunk_size == 0 {
            return Ok(());
        }

        if has_variable_length_type && chunk_size > segment.total_raw_data_size {
            return Err(TdmsError::RawDataSizeMismatch {
                offset: segment.offset,
                raw_size: segment.total_raw_data_size,
                chunk_size,
            });
        }

        let mut num_chunks = 1u64;
        if !has_variable_length_type {
            if segment.total_raw_data_size % chunk_size != 0 {
                return Err(TdmsError::RawDataSizeMismatch {
                    offset: segment.offset,
                    raw_size: segment.total_raw_data_size,
                    chunk_size,
                });
            }
            num_chunks = segment.total_raw_data_size / chunk_size;
        }

        for chunk_idx in 0..num_chunks {
            let mut current_offset = chunk_idx * chunk_size;

            for channel_key in channel_keys {
                let Some(channel_info) = self.channels.get_mut(channel_key) else { continue };
                let Some((value_count, byte_size)) = channel_info.current_index else { continue };

                if value_count == 0 && byte_size == 0 {
                    continue;
                }

                channel_info.add_segment(SegmentData {
                    segment_index: segment_idx,
                    value_count,
                    byte_size,
                    byte_offset: current_offset,
                });

                current_offset = current_offset.checked_add(byte_size)
                    .ok_or_else(|| chunk_overflow(segment))?;
            }
        }

        Ok(())
    }

    fn read_property(&mut self, is_big_endian: bool) -> Result<Property> {
        let name = RawDataReader::read_string(&mut self.file, is_big_endian)?;
        let data_type_raw = RawDataReader::read_u32(&mut self.file, is_big_endian)?;
        let data_type = DataType::from_u32(data_type_raw)
            .ok_or(TdmsError::InvalidDataType(data_type_raw))?;
        let value = self.read_property_value(data_type, is_big_endian)?;
        Ok(Property { name, value })
    }

    fn read_property_value(&mut self, data_type: DataType, is_big_endian: bool) -> Result<PropertyValue> {
        let file = &mut self.file;
        match data_type {
            DataType::I8 => Ok(PropertyValue::I8(RawDataReader::read_i8(file)?)),
            DataType::I16 => Ok(PropertyValue::I16(RawDataReader::read_i16(file, is_big_endian)?)),
            DataType::I32 => Ok(PropertyValue::I32(RawDataReader::read_i32(file, is_big_endian)?)),
            DataType::I64 => Ok(PropertyValue::I64(RawDataReader::read_i64(file, is_big_endian)?)),
            DataType::U8 => Ok(PropertyValue::U8(RawDataReader::read_u8(file)?)),
            DataType::U16 => Ok(PropertyValue::U16(RawDataReader::read_u16(file, is_big_endian)?)),
            DataType::U32 => Ok(PropertyValue::U32(RawDataReader::read_u32(file, is_big_endian)?)),
            DataType::U64 => Ok(PropertyValue::U64(RawDataReader::read_u64(file, is_big_endian)?)),
            DataType::SingleFloat => Ok(PropertyValue::Float(RawDataReader::read_f32(file, is_big_endian)?)),
            DataType::DoubleFloat => Ok(PropertyValue::Double(RawDataReader::read_f64(file, is_big_endian)?)),
            DataType::Boolean => Ok(PropertyValue::Boolean(RawDataReader::read_bool(file)?)),
            DataType::TimeStamp => Ok(PropertyValue::Timestamp(RawDataReader::read_timestamp(file, is_big_endian)?)),
            DataType::String => Ok(PropertyValue::String(RawDataReader::read_string(file, is_big_endian)?)),
            _ => Err(TdmsError::Unsupported(format!("Property data type {:?}", data_type))),
        }
    }

    /// Group names in file order
    pub fn groups(&self) -> &[String] {
        &self.group_order
    }

    /// Channel paths of one group, in file order
    pub fn group_channels<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a ObjectPath> + 'a {
        self.channel_order.iter().filter(move |path| path.group() == Some(group))
    }

    /// All channel paths in file order
    pub fn channel_paths(&self) -> &[ObjectPath] {
        &self.channel_order
    }

    pub fn file_properties(&self) -> &HashMap<String, Property> {
        &self.file_properties
    }

    pub fn group_properties(&self, group: &str) -> Option<&HashMap<String, Property>> {
        self.groups.get(group)
    }

    pub fn channel_properties(&self, path: &ObjectPath) -> Option<&HashMap<String, Property>> {
        self.channels.get(path).map(|info| &info.properties)
    }

    pub fn channel_property(&self, path: &ObjectPath, name: &str) -> Option<&PropertyValue> {
        self.channel_properties(path)
            .and_then(|properties| properties.get(name))
            .map(|p| &p.value)
    }

    pub fn channel(&self, path: &ObjectPath) -> Result<ChannelReader<'_>> {
        self.channels.get_key_value(path)
            .map(|(key, info)| ChannelReader::new(key, info))
            .ok_or_else(|| TdmsError::ChannelNotFound(path.to_string()))
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channel_order.len()
    }

    /// Read the whole channel as floating point samples
    pub fn read_channel_data(&mut self, path: &ObjectPath) -> Result<ChannelData> {
        let info = self.channels.get(path)
            .ok_or_else(|| TdmsError::ChannelNotFound(path.to_string()))?;
        ChannelReader::new(path, info).read_samples(&mut self.file, &self.segments)
    }

    /// Read the whole channel as `T`, which must match the stored type size
    pub fn read_channel_values<T: Pod>(&mut self, path: &ObjectPath) -> Result<Vec<T>> {
        let info = self.channels.get(path)
            .ok_or_else(|| TdmsError::ChannelNotFound(path.to_string()))?;
        ChannelReader::new(path, info).read_all_data(&mut self.file, &self.segments)
    }
}

fn chunk_overflow(segment: &SegmentInfo) -> TdmsError {
    TdmsError::InvalidRawDataIndex(format!(
        "channel sizes of segment at offset {} overflow",
        segment.offset
    ))
}

enum IndexUpdate {
    New(RawDataIndex),
    MatchesPrevious,
    NoData,
}
