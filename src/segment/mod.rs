// src/segment/mod.rs
mod header;
mod info;

pub use header::SegmentHeader;
pub use info::SegmentInfo;
