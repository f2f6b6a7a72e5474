// src/segment/header.rs
use crate::error::{TdmsError, Result};
use crate::types::TocFlags;
use byteorder::{ReadBytesExt, WriteBytesExt, LittleEndian};
use std::io::{Read, Write};

/// TDMS segment lead-in
///
/// The lead-in is always little-endian, whatever the ToC says about the rest
/// of the segment.
#[derive(Debug, Clone)]
pub struct SegmentHeader {
    pub tag: [u8; 4],
    pub toc: TocFlags,
    pub version: u32,
    /// Bytes from the end of the lead-in to the next segment
    pub next_segment_offset: u64,
    /// Bytes from the end of the lead-in to the raw data (the metadata size)
    pub raw_data_offset: u64,
}

impl SegmentHeader {
    pub const LEAD_IN_SIZE: usize = 28;
    pub const TDMS_TAG: &'static [u8; 4] = b"TDSm";
    pub const INDEX_TAG: &'static [u8; 4] = b"TDSh";
    pub const VERSION: u32 = 4713;
    pub const INCOMPLETE_MARKER: u64 = 0xFFFFFFFFFFFFFFFF;

    pub fn new(tag: &[u8; 4], toc: TocFlags, metadata_size: u64, raw_data_size: u64) -> Self {
        SegmentHeader {
            tag: *tag,
            toc,
            version: Self::VERSION,
            next_segment_offset: metadata_size + raw_data_size,
            raw_data_offset: metadata_size,
        }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut tag = [0u8; 4];
        reader.read_exact(&mut tag)?;

        if &tag != Self::TDMS_TAG && &tag != Self::INDEX_TAG {
            return Err(TdmsError::InvalidTag {
                expected: "TDSm or TDSh".to_string(),
                found: String::from_utf8_lossy(&tag).to_string(),
            });
        }

        Ok(SegmentHeader {
            tag,
            toc: TocFlags::new(reader.read_u32::<LittleEndian>()?),
            version: reader.read_u32::<LittleEndian>()?,
            next_segment_offset: reader.read_u64::<LittleEndian>()?,
            raw_data_offset: reader.read_u64::<LittleEndian>()?,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.tag)?;
        writer.write_u32::<LittleEndian>(self.toc.raw_value())?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u64::<LittleEndian>(self.next_segment_offset)?;
        writer.write_u64::<LittleEndian>(self.raw_data_offset)?;
        Ok(())
    }

    pub fn is_incomplete(&self) -> bool {
        self.next_segment_offset == Self::INCOMPLETE_MARKER
    }
}
