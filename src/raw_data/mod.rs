// src/raw_data/mod.rs
//! Raw data handling for TDMS files
//!
//! - [`RawDataBuffer`] accumulates channel values for a segment being written
//! - [`RawDataReader`] reads typed values back with endianness handling

mod buffer;
mod reader;

pub use buffer::RawDataBuffer;
pub use reader::RawDataReader;
