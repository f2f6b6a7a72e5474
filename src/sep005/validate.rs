// src/sep005/validate.rs
use crate::error::{TdmsError, Result};
use crate::sep005::{Signal, StartTimestamp};
use chrono::{DateTime, NaiveDateTime};

/// Check that every record satisfies the SEP005 schema
///
/// Fails on the first offending record with [`TdmsError::NonCompliant`],
/// naming its position in the input and the field at fault. A missing group
/// is allowed here; it is the TDMS writer that needs one.
pub fn assert_sep005<'a>(signals: impl IntoIterator<Item = &'a Signal>) -> Result<()> {
    for (index, signal) in signals.into_iter().enumerate() {
        check_signal(signal).map_err(|(field, reason)| TdmsError::NonCompliant {
            index,
            field,
            reason: reason.to_string(),
        })?;
    }
    Ok(())
}

fn check_signal(signal: &Signal) -> std::result::Result<(), (&'static str, &'static str)> {
    if signal.name.is_empty() {
        return Err(("name", "must not be empty"));
    }
    if signal.data.is_empty() {
        return Err(("data", "must hold at least one sample"));
    }
    if !(signal.fs.is_finite() && signal.fs > 0.0) {
        return Err(("fs", "must be a finite, strictly positive sample rate"));
    }
    if signal.group.as_deref() == Some("") {
        return Err(("group", "must not be empty when present"));
    }
    if let Some(StartTimestamp::Text(text)) = &signal.start_timestamp {
        if !is_iso_datetime(text) {
            return Err(("start_timestamp", "is not an ISO-8601 date and time"));
        }
    }
    Ok(())
}

fn is_iso_datetime(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok()
        || DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").is_ok()
}
