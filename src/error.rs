// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TdmsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid TDMS tag: expected {expected}, found {found}")]
    InvalidTag { expected: String, found: String },

    #[error("Invalid data type: {0}")]
    InvalidDataType(u32),

    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Incomplete segment at offset {0}")]
    IncompleteSegment(u64),

    #[error("Raw data size {raw_size} of segment at offset {offset} is not a multiple of chunk size {chunk_size}")]
    RawDataSizeMismatch { offset: u64, raw_size: u64, chunk_size: u64 },

    #[error("Invalid raw data dimension {0}, expected 1")]
    InvalidDimension(u32),

    #[error("Invalid raw data index: {0}")]
    InvalidRawDataIndex(String),

    #[error("Invalid UTF-8 in string data")]
    InvalidUtf8,

    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    #[error("Channel {channel} has no '{property}' property")]
    MissingProperty { channel: String, property: String },

    #[error("Channel {channel} has an invalid '{property}' property: {reason}")]
    InvalidProperty { channel: String, property: String, reason: String },

    #[error("signal '{name}' has no group, which is required for a TDMS file")]
    MissingGroup { name: String },

    #[error("signal {index} is not SEP005 compliant: '{field}' {reason}")]
    NonCompliant { index: usize, field: &'static str, reason: String },
}

impl TdmsError {
    /// True when the error means there is no file at the requested path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TdmsError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }

    /// True when the file exists but its binary content is malformed.
    pub fn is_corruption(&self) -> bool {
        match self {
            TdmsError::Io(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            TdmsError::InvalidTag { .. }
            | TdmsError::InvalidDataType(_)
            | TdmsError::InvalidPath(_)
            | TdmsError::IncompleteSegment(_)
            | TdmsError::RawDataSizeMismatch { .. }
            | TdmsError::InvalidDimension(_)
            | TdmsError::InvalidRawDataIndex(_)
            | TdmsError::InvalidUtf8 => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TdmsError>;
