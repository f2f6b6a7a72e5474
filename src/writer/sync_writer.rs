// src/writer/sync_writer.rs
use crate::error::Result;
use crate::types::{TocFlags, Property};
use crate::metadata::{RawDataIndex, TdmsObject};
use crate::segment::SegmentHeader;
use std::fs::File;
use std::io::{Write, BufWriter};
use std::path::Path;
use byteorder::{WriteBytesExt, LittleEndian};

/// Synchronous, segment-oriented TDMS writer
///
/// Every call to [`TdmsWriter::write_segment`] appends exactly one segment
/// holding the given objects, in the given order, with a fresh object list.
/// Nothing is carried over between segments, so the on-disk segment
/// boundaries are fully decided by the caller.
pub struct TdmsWriter {
    data_file: BufWriter<File>,
    index_file: Option<BufWriter<File>>,
    segments_written: usize,
}

impl TdmsWriter {
    /// Create (or truncate) a TDMS file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let data_file = File::create(path.as_ref())?;

        Ok(TdmsWriter {
            data_file: BufWriter::new(data_file),
            index_file: None,
            segments_written: 0,
        })
    }

    /// Create a TDMS file together with its `.tdms_index` companion
    pub fn create_with_index(path: impl AsRef<Path>) -> Result<Self> {
        let data_path = path.as_ref();
        let index_path = data_path.with_extension("tdms_index");

        let mut writer = Self::create(data_path)?;
        writer.index_file = Some(BufWriter::new(File::create(index_path)?));
        Ok(writer)
    }

    /// Append one segment made of `objects`
    pub fn write_segment(&mut self, objects: &[TdmsObject]) -> Result<()> {
        let raw_data_size: u64 = objects.iter()
            .filter_map(TdmsObject::raw_data)
            .map(|buffer| buffer.byte_len() as u64)
            .sum();

        let mut toc = TocFlags::empty();
        toc.set_metadata(true);
        toc.set_new_obj_list(true);
        toc.set_raw_data(raw_data_size > 0);

        let mut metadata = Vec::new();
        write_metadata(&mut metadata, objects)?;
        let metadata_size = metadata.len() as u64;

        SegmentHeader::new(SegmentHeader::TDMS_TAG, toc, metadata_size, raw_data_size)
            .write_to(&mut self.data_file)?;
        self.data_file.write_all(&metadata)?;
        for buffer in objects.iter().filter_map(TdmsObject::raw_data) {
            self.data_file.write_all(buffer.as_bytes())?;
        }

        if let Some(index_file) = self.index_file.as_mut() {
            SegmentHeader::new(SegmentHeader::INDEX_TAG, toc, metadata_size, raw_data_size)
                .write_to(index_file)?;
            index_file.write_all(&metadata)?;
        }

        self.segments_written += 1;
        log::debug!(
            "wrote segment {} with {} objects ({} metadata bytes, {} raw bytes)",
            self.segments_written, objects.len(), metadata_size, raw_data_size
        );
        Ok(())
    }

    pub fn segment_count(&self) -> usize {
        self.segments_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.data_file.flush()?;
        if let Some(index_file) = self.index_file.as_mut() {
            index_file.flush()?;
        }
        Ok(())
    }

    /// Flush everything and release the file handles
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }
}

impl Drop for TdmsWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

fn write_metadata<W: Write>(writer: &mut W, objects: &[TdmsObject]) -> Result<()> {
    writer.write_u32::<LittleEndian>(objects.len() as u32)?;

    for object in objects {
        write_string(writer, &object.path.to_string())?;

        match object.raw_data() {
            Some(buffer) => {
                let index = RawDataIndex::with_size(
                    buffer.data_type(),
                    buffer.value_count(),
                    buffer.byte_len() as u64,
                );
                write_raw_data_index(writer, &index)?;
            }
            None => writer.write_u32::<LittleEndian>(RawDataIndex::NO_RAW_DATA)?,
        }

        write_properties(writer, &object.properties)?;
    }

    Ok(())
}

fn write_raw_data_index<W: Write>(writer: &mut W, index: &RawDataIndex) -> Result<()> {
    writer.write_u32::<LittleEndian>(index.index_length())?;
    writer.write_u32::<LittleEndian>(index.data_type as u32)?;
    writer.write_u32::<LittleEndian>(index.array_dimension)?;
    writer.write_u64::<LittleEndian>(index.number_of_values)?;

    if index.index_length() == RawDataIndex::STRING_INDEX_LENGTH {
        writer.write_u64::<LittleEndian>(index.total_size_bytes)?;
    }

    Ok(())
}

fn write_properties<W: Write>(writer: &mut W, properties: &[Property]) -> Result<()> {
    writer.write_u32::<LittleEndian>(properties.len() as u32)?;

    for prop in properties {
        write_string(writer, &prop.name)?;
        writer.write_u32::<LittleEndian>(prop.value.data_type() as u32)?;
        prop.value.write_to(writer)?;
    }

    Ok(())
}

fn write_string<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    let bytes = s.as_bytes();
    writer.write_u32::<LittleEndian>(bytes.len() as u32)?;
    writer.write_all(bytes)?;
    Ok(())
}
