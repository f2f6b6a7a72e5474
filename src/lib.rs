// src/lib.rs
//! # sep005-tdms
//!
//! Read and write TDMS (Technical Data Management Streaming) files as lists
//! of SEP005 signal records.
//!
//! TDMS is the binary format of National Instruments acquisition software.
//! A file holds groups of channels; each channel becomes one [`Signal`] with
//! its samples, sample rate, unit and optional start time.
//!
//! ## Quick Start
//!
//! ### Writing signals
//!
//! ```rust,no_run
//! use sep005_tdms::*;
//!
//! fn main() -> Result<()> {
//!     let data: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.1).sin()).collect();
//!     let signal = Signal::new("test_01", data, 2.5)
//!         .with_group("acceleration")
//!         .with_unit("m/s²");
//!
//!     write_tdms(&signal, "output.tdms")?;
//!     Ok(())
//! }
//! ```
//!
//! ### Reading signals
//!
//! ```rust,no_run
//! use sep005_tdms::*;
//!
//! fn main() -> Result<()> {
//!     for signal in read_tdms("input.tdms")? {
//!         println!("{}: {} samples at {} Hz", signal.name, signal.data.len(), signal.fs);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A missing or corrupted file reads as an empty list and logs a warning
//! through the `log` facade; [`read_tdms_outcome`] tells the cases apart.
//!
//! ### Lower level access
//!
//! [`TdmsReader`] and [`TdmsWriter`] work directly on channels, properties
//! and segments.
//!
//! ```rust,no_run
//! use sep005_tdms::*;
//!
//! fn main() -> Result<()> {
//!     let mut reader = TdmsReader::open("input.tdms")?;
//!     for path in reader.channel_paths().to_vec() {
//!         let data = reader.read_channel_data(&path)?;
//!         println!("{}: {} values", path, data.len());
//!     }
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod metadata;
pub mod segment;
pub mod raw_data;
pub mod writer;
pub mod reader;
pub mod sep005;

// Re-export commonly used types at the crate root for convenience
pub use error::{TdmsError, Result};

// Type exports
pub use types::{
    DataType,
    TocFlags,
    Timestamp,
    Property,
    PropertyValue,
};

// Metadata exports
pub use metadata::{
    ObjectPath,
    RawDataIndex,
    TdmsObject,
};

// Segment exports
pub use segment::{
    SegmentHeader,
    SegmentInfo,
};

// Raw data exports
pub use raw_data::{
    RawDataBuffer,
    RawDataReader,
};

// Writer exports
pub use writer::TdmsWriter;

// Reader exports
pub use reader::{
    TdmsReader,
    ChannelData,
    ChannelReader,
};

// Signal exports
pub use sep005::{
    assert_sep005,
    read_tdms,
    read_tdms_outcome,
    write_tdms,
    write_tdms_with,
    EmptyReason,
    ReadOutcome,
    Signal,
    SignalData,
    StartTimestamp,
    WriteOptions,
};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use sep005_tdms::prelude::*;
    //! ```

    pub use crate::error::{TdmsError, Result};
    pub use crate::sep005::{read_tdms, write_tdms, Signal, SignalData, StartTimestamp, WriteOptions};
    pub use crate::reader::TdmsReader;
    pub use crate::writer::TdmsWriter;
}

// Version information
/// The version of the TDMS format this library reads and writes
pub const TDMS_VERSION: u32 = 4713;

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
