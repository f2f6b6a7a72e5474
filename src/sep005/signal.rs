// src/sep005/signal.rs
use crate::reader::ChannelData;
use chrono::{DateTime, Utc};
use std::fmt;

/// Rendering of acquisition start times: ISO-8601, second precision
pub const START_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Sample array of a signal
#[derive(Debug, Clone, PartialEq)]
pub enum SignalData {
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl SignalData {
    pub fn len(&self) -> usize {
        match self {
            SignalData::F32(values) => values.len(),
            SignalData::F64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter_f64(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            SignalData::F32(values) => Box::new(values.iter().map(|&v| v as f64)),
            SignalData::F64(values) => Box::new(values.iter().copied()),
        }
    }

    /// Sum of all samples, accumulated in double precision
    pub fn sum(&self) -> f64 {
        self.iter_f64().sum()
    }

    /// Samples narrowed to single precision, as stored in a TDMS file
    pub fn to_f32_vec(&self) -> Vec<f32> {
        match self {
            SignalData::F32(values) => values.clone(),
            SignalData::F64(values) => values.iter().map(|&v| v as f32).collect(),
        }
    }
}

impl From<Vec<f32>> for SignalData {
    fn from(values: Vec<f32>) -> Self {
        SignalData::F32(values)
    }
}

impl From<Vec<f64>> for SignalData {
    fn from(values: Vec<f64>) -> Self {
        SignalData::F64(values)
    }
}

impl From<ChannelData> for SignalData {
    fn from(data: ChannelData) -> Self {
        match data {
            ChannelData::F32(values) => SignalData::F32(values),
            ChannelData::F64(values) => SignalData::F64(values),
        }
    }
}

/// Acquisition start time, either structured or already rendered
#[derive(Debug, Clone, PartialEq)]
pub enum StartTimestamp {
    DateTime(DateTime<Utc>),
    Text(String),
}

impl StartTimestamp {
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            StartTimestamp::DateTime(dt) => Some(dt),
            StartTimestamp::Text(_) => None,
        }
    }

    /// The rendered form; structured values use [`START_TIMESTAMP_FORMAT`]
    pub fn to_text(&self) -> String {
        match self {
            StartTimestamp::DateTime(dt) => dt.format(START_TIMESTAMP_FORMAT).to_string(),
            StartTimestamp::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for StartTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<DateTime<Utc>> for StartTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        StartTimestamp::DateTime(dt)
    }
}

impl From<String> for StartTimestamp {
    fn from(text: String) -> Self {
        StartTimestamp::Text(text)
    }
}

impl From<&str> for StartTimestamp {
    fn from(text: &str) -> Self {
        StartTimestamp::Text(text.to_string())
    }
}

/// One SEP005 signal record
///
/// `group` is optional in the schema but required by the TDMS hierarchy, so
/// writing a signal without one fails. `unit_str` is empty when no unit is
/// known.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: String,
    pub group: Option<String>,
    pub data: SignalData,
    /// Sample rate in Hz
    ///
    /// Stored on disk as its inverse, `wf_increment`, so a rate read back can
    /// differ from the written one in the last bits (49 Hz reads back as
    /// 49.00000000000001).
    pub fs: f64,
    pub unit_str: String,
    pub start_timestamp: Option<StartTimestamp>,
}

impl Signal {
    pub fn new(name: impl Into<String>, data: impl Into<SignalData>, fs: f64) -> Self {
        Signal {
            name: name.into(),
            group: None,
            data: data.into(),
            fs,
            unit_str: String::new(),
            start_timestamp: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit_str = unit.into();
        self
    }

    pub fn with_start_timestamp(mut self, start: impl Into<StartTimestamp>) -> Self {
        self.start_timestamp = Some(start.into());
        self
    }

    /// Seconds between samples, the TDMS `wf_increment`
    pub fn increment(&self) -> f64 {
        1.0 / self.fs
    }
}

/// Borrowed view of the signals handed to the writer
///
/// Lets a single record be written without wrapping it in a collection.
#[derive(Debug, Clone, Copy)]
pub struct SignalBatch<'a>(&'a [Signal]);

impl<'a> SignalBatch<'a> {
    pub fn as_slice(&self) -> &'a [Signal] {
        self.0
    }
}

impl<'a> From<&'a Signal> for SignalBatch<'a> {
    fn from(signal: &'a Signal) -> Self {
        SignalBatch(std::slice::from_ref(signal))
    }
}

impl<'a> From<&'a [Signal]> for SignalBatch<'a> {
    fn from(signals: &'a [Signal]) -> Self {
        SignalBatch(signals)
    }
}

impl<'a> From<&'a Vec<Signal>> for SignalBatch<'a> {
    fn from(signals: &'a Vec<Signal>) -> Self {
        SignalBatch(signals.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [Signal; N]> for SignalBatch<'a> {
    fn from(signals: &'a [Signal; N]) -> Self {
        SignalBatch(signals.as_slice())
    }
}
