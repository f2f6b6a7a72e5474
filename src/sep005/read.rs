// src/sep005/read.rs
use crate::error::{TdmsError, Result};
use crate::metadata::ObjectPath;
use crate::reader::{ReadSeek, TdmsReader};
use crate::sep005::{Signal, SignalData, StartTimestamp, START_TIMESTAMP_FORMAT};
use crate::types::PropertyValue;
use std::fmt;
use std::path::{Path, PathBuf};

const WF_INCREMENT: &str = "wf_increment";
const WF_START_TIME: &str = "wf_start_time";
const UNIT_STRING: &str = "unit_string";

/// Why a read produced no signals
#[derive(Debug, Clone, PartialEq)]
pub enum EmptyReason {
    NotFound { path: PathBuf },
    Corrupted { path: PathBuf, detail: String },
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NotFound { path } => {
                write!(f, "FAILED IMPORT: No TDMS file at: {}", path.display())
            }
            EmptyReason::Corrupted { path, .. } => write!(
                f,
                "FAILED IMPORT: TDMS file at: {} seems corrupted. Failed to import.",
                path.display()
            ),
        }
    }
}

/// Result of reading a TDMS file into signals
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Signals(Vec<Signal>),
    Empty(EmptyReason),
}

impl ReadOutcome {
    pub fn is_empty(&self) -> bool {
        match self {
            ReadOutcome::Signals(signals) => signals.is_empty(),
            ReadOutcome::Empty(_) => true,
        }
    }

    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            ReadOutcome::Empty(reason) => Some(reason),
            ReadOutcome::Signals(_) => None,
        }
    }

    pub fn into_signals(self) -> Vec<Signal> {
        match self {
            ReadOutcome::Signals(signals) => signals,
            ReadOutcome::Empty(_) => Vec::new(),
        }
    }
}

/// Read every channel of a TDMS file as a SEP005 signal
///
/// A missing or corrupted file is not an error: a warning is logged and an
/// empty list comes back. Use [`read_tdms_outcome`] to tell those cases apart
/// from a file that simply holds no channels.
pub fn read_tdms(path: impl AsRef<Path>) -> Result<Vec<Signal>> {
    read_tdms_outcome(path).map(ReadOutcome::into_signals)
}

/// Like [`read_tdms`], but reports why the result is empty
pub fn read_tdms_outcome(path: impl AsRef<Path>) -> Result<ReadOutcome> {
    let path = path.as_ref();

    if !path.is_file() {
        return Ok(empty(EmptyReason::NotFound { path: path.to_path_buf() }));
    }

    let parsed = TdmsReader::open(path).and_then(|mut reader| read_signals(&mut reader));
    match parsed {
        Ok(signals) => {
            log::debug!("imported {} signals from {}", signals.len(), path.display());
            Ok(ReadOutcome::Signals(signals))
        }
        Err(e) if e.is_not_found() => {
            Ok(empty(EmptyReason::NotFound { path: path.to_path_buf() }))
        }
        Err(e) if e.is_corruption() => Ok(empty(EmptyReason::Corrupted {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })),
        Err(e) => Err(e),
    }
}

fn empty(reason: EmptyReason) -> ReadOutcome {
    log::warn!("{}", reason);
    if let EmptyReason::Corrupted { detail, .. } = &reason {
        log::debug!("corruption detail: {}", detail);
    }
    ReadOutcome::Empty(reason)
}

/// Convert every channel of an open file, groups and channels in file order
pub fn read_signals<R: ReadSeek>(reader: &mut TdmsReader<R>) -> Result<Vec<Signal>> {
    let file: &TdmsReader<R> = reader;
    let paths: Vec<ObjectPath> = file.groups()
        .iter()
        .flat_map(|group| file.group_channels(group).cloned())
        .collect();

    let mut signals = Vec::with_capacity(paths.len());
    for path in &paths {
        signals.push(read_signal(reader, path)?);
    }
    Ok(signals)
}

fn read_signal<R: ReadSeek>(reader: &mut TdmsReader<R>, path: &ObjectPath) -> Result<Signal> {
    let (group, name) = match path {
        ObjectPath::Channel { group, channel } => (group.clone(), channel.clone()),
        other => return Err(TdmsError::ChannelNotFound(other.to_string())),
    };

    let fs = sample_rate(path, reader.channel_property(path, WF_INCREMENT))?;
    let unit_str = match reader.channel_property(path, UNIT_STRING) {
        None => String::new(),
        Some(value) => value.as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid(path, UNIT_STRING, "not a string"))?,
    };
    let start_timestamp = match reader.channel_property(path, WF_START_TIME) {
        None => None,
        Some(value) => Some(start_time(path, value)?),
    };

    let data = SignalData::from(reader.read_channel_data(path)?);

    Ok(Signal {
        name,
        group: Some(group),
        data,
        fs,
        unit_str,
        start_timestamp,
    })
}

fn sample_rate(path: &ObjectPath, increment: Option<&PropertyValue>) -> Result<f64> {
    let increment = increment.ok_or_else(|| TdmsError::MissingProperty {
        channel: path.to_string(),
        property: WF_INCREMENT.to_string(),
    })?;
    let increment = increment.as_f64()
        .ok_or_else(|| invalid(path, WF_INCREMENT, "not a number"))?;

    let fs = 1.0 / increment;
    if !(fs.is_finite() && fs > 0.0) {
        return Err(invalid(path, WF_INCREMENT, &format!("{} gives no usable sample rate", increment)));
    }
    Ok(fs)
}

fn start_time(path: &ObjectPath, value: &PropertyValue) -> Result<StartTimestamp> {
    let time = value.as_timestamp()
        .ok_or_else(|| invalid(path, WF_START_TIME, "not a timestamp"))?
        .to_datetime()
        .ok_or_else(|| invalid(path, WF_START_TIME, "out of the representable range"))?;
    Ok(StartTimestamp::Text(time.format(START_TIMESTAMP_FORMAT).to_string()))
}

fn invalid(path: &ObjectPath, property: &str, reason: &str) -> TdmsError {
    TdmsError::InvalidProperty {
        channel: path.to_string(),
        property: property.to_string(),
        reason: reason.to_string(),
    }
}
