// src/sep005/write.rs
use crate::error::{TdmsError, Result};
use crate::metadata::TdmsObject;
use crate::raw_data::RawDataBuffer;
use crate::sep005::{assert_sep005, Signal, SignalBatch, StartTimestamp};
use crate::writer::TdmsWriter;
use chrono::{DateTime, Utc};
use smallvec::{smallvec, SmallVec};
use std::path::Path;

/// Author recorded in the file properties unless overridden
pub const DEFAULT_AUTHOR: &str = "sdypy_io_tdms";

/// Layout of the file-level `datestring` property.
///
/// The hour field is a literal `H`, which existing files and readers expect.
pub const DATESTRING_FORMAT: &str = "%Y/%m/%d H:%M:%S";

/// Options for [`write_tdms_with`]
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Value of the file-level `author` property
    pub author: String,
    /// File timestamp; when `None` it is taken from the signals or the clock
    pub timestamp: Option<DateTime<Utc>>,
    /// Also write a `.tdms_index` companion file
    pub write_index: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            author: DEFAULT_AUTHOR.to_string(),
            timestamp: None,
            write_index: false,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn write_index(mut self, write_index: bool) -> Self {
        self.write_index = write_index;
        self
    }
}

/// Where the file timestamp came from
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampSource {
    Explicit,
    /// The first signal carrying a structured start time. `normalized` is
    /// that signal with its start time rendered as text.
    Signal { index: usize, normalized: Box<Signal> },
    Now,
}

/// File timestamp chosen for a write
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTimestamp {
    pub timestamp: DateTime<Utc>,
    pub source: TimestampSource,
}

impl ResolvedTimestamp {
    /// The signals as they are validated and written: the input, with the
    /// signal that supplied the timestamp swapped for its normalized copy.
    pub fn records<'a>(&'a self, signals: &'a [Signal]) -> impl Iterator<Item = &'a Signal> + 'a {
        signals.iter().enumerate().map(move |(i, signal)| match &self.source {
            TimestampSource::Signal { index, normalized } if *index == i => normalized.as_ref(),
            _ => signal,
        })
    }

    pub fn datestring(&self) -> String {
        self.timestamp.format(DATESTRING_FORMAT).to_string()
    }
}

/// Pick the file timestamp: `explicit` if given, else the first structured
/// start time among `signals`, else the current time.
///
/// The caller's signals are never modified.
pub fn resolve_timestamp(signals: &[Signal], explicit: Option<DateTime<Utc>>) -> ResolvedTimestamp {
    if let Some(timestamp) = explicit {
        return ResolvedTimestamp { timestamp, source: TimestampSource::Explicit };
    }

    let first = signals.iter().enumerate().find_map(|(index, signal)| {
        match &signal.start_timestamp {
            Some(StartTimestamp::DateTime(dt)) => Some((index, *dt)),
            _ => None,
        }
    });

    match first {
        Some((index, timestamp)) => {
            let mut normalized = signals[index].clone();
            normalized.start_timestamp = Some(StartTimestamp::Text(
                StartTimestamp::DateTime(timestamp).to_text(),
            ));
            ResolvedTimestamp {
                timestamp,
                source: TimestampSource::Signal { index, normalized: Box::new(normalized) },
            }
        }
        None => ResolvedTimestamp { timestamp: Utc::now(), source: TimestampSource::Now },
    }
}

/// Write signals to a TDMS file with default options
///
/// Accepts a single [`Signal`] as well as any slice of them.
pub fn write_tdms<'a>(signals: impl Into<SignalBatch<'a>>, path: impl AsRef<Path>) -> Result<()> {
    write_tdms_with(signals, path, &WriteOptions::default())
}

/// Write signals to a TDMS file
///
/// The file gets one segment with the file properties, then one segment per
/// signal holding its group and channel, in input order. Samples are stored
/// as single precision; `fs` becomes `wf_increment`.
pub fn write_tdms_with<'a>(
    signals: impl Into<SignalBatch<'a>>,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<()> {
    let signals = signals.into().as_slice();
    let path = path.as_ref();

    let resolved = resolve_timestamp(signals, options.timestamp);
    assert_sep005(resolved.records(signals))?;

    let mut writer = if options.write_index {
        TdmsWriter::create_with_index(path)?
    } else {
        TdmsWriter::create(path)?
    };

    writer.write_segment(&[TdmsObject::root(Vec::new())
        .with_property("author", options.author.as_str())
        .with_property("datestring", resolved.datestring())])?;

    for signal in resolved.records(signals) {
        let group = signal.group.as_deref().ok_or_else(|| TdmsError::MissingGroup {
            name: signal.name.clone(),
        })?;
        writer.write_segment(&signal_objects(group, signal))?;
    }

    log::debug!("wrote {} signals to {}", signals.len(), path.display());
    writer.close()
}

fn signal_objects(group: &str, signal: &Signal) -> SmallVec<[TdmsObject; 2]> {
    let data = RawDataBuffer::from_f32(&signal.data.to_f32_vec());
    let channel = TdmsObject::channel(group, signal.name.as_str(), data, Vec::new())
        .with_property("unit_string", signal.unit_str.as_str())
        .with_property("wf_increment", signal.increment());

    smallvec![TdmsObject::group(group), channel]
}
