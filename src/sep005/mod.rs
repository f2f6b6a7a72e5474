//! SEP005 signal records and their TDMS mapping
//!
//! A TDMS file maps onto a flat list of [`Signal`]s: every channel becomes
//! one record, named after the channel and tagged with its group. The sample
//! rate is the inverse of the channel's `wf_increment` property and the unit
//! comes from `unit_string`.

mod read;
mod signal;
mod validate;
mod write;

pub use read::{read_signals, read_tdms, read_tdms_outcome, EmptyReason, ReadOutcome};
pub use signal::{Signal, SignalBatch, SignalData, StartTimestamp, START_TIMESTAMP_FORMAT};
pub use validate::assert_sep005;
pub use write::{
    resolve_timestamp, write_tdms, write_tdms_with, ResolvedTimestamp, TimestampSource,
    WriteOptions, DATESTRING_FORMAT, DEFAULT_AUTHOR,
};
