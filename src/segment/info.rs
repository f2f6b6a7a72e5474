// src/segment/info.rs
use crate::types::TocFlags;
use crate::segment::SegmentHeader;

/// Segment information for reading
#[derive(Debug, Clone)]
pub struct SegmentInfo {
    pub offset: u64,
    pub toc: TocFlags,
    pub is_big_endian: bool,
    pub metadata_size: u64,
    /// True size of the raw data block (next segment offset minus metadata size)
    pub total_raw_data_size: u64,
}

impl SegmentInfo {
    /// Absolute file position of the first raw data byte
    pub fn raw_data_start(&self) -> u64 {
        self.offset + SegmentHeader::LEAD_IN_SIZE as u64 + self.metadata_size
    }
}
