// tests/read_warnings_tests.rs
//
// Installs its own logger, so it lives in a separate test binary.

use log::{Level, Log, Metadata, Record};
use sep005_tdms::*;
use std::path::Path;
use std::sync::{Mutex, Once};

static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            WARNINGS.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn install_logger() {
    INIT.call_once(|| {
        log::set_logger(&CapturingLogger).unwrap();
        log::set_max_level(log::LevelFilter::Warn);
    });
}

/// Warnings mentioning `path`; tests run in parallel, so filter by path
fn warnings_for(path: &Path) -> Vec<String> {
    let needle = path.display().to_string();
    WARNINGS.lock().unwrap().iter().filter(|w| w.contains(&needle)).cloned().collect()
}

fn write_valid_file(path: &Path) {
    let signal = Signal::new("test_01", vec![1.0f64; 64], 10.0).with_group("g");
    write_tdms(&signal, path).unwrap();
}

#[test]
fn test_empty_on_missing() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nonexistent").join("path.tdms");

    let signals = read_tdms(&path).unwrap();
    assert!(signals.is_empty());

    let warnings = warnings_for(&path);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("FAILED IMPORT: No TDMS file at:"));
}

#[test]
fn test_directory_is_not_a_file() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();

    let outcome = read_tdms_outcome(dir.path()).unwrap();
    assert_eq!(
        outcome.empty_reason(),
        Some(&EmptyReason::NotFound { path: dir.path().to_path_buf() })
    );
    assert_eq!(warnings_for(dir.path()).len(), 1);
}

#[test]
fn test_empty_on_garbage() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.tdms");
    std::fs::write(&path, b"this is a text file and certainly not a TDMS segment").unwrap();

    assert!(read_tdms(&path).unwrap().is_empty());

    let warnings = warnings_for(&path);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("seems corrupted"));
}

#[test]
fn test_empty_on_truncated_metadata() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.tdms");
    write_valid_file(&path);

    // Cut the second segment inside its metadata
    let bytes = std::fs::read(&path).unwrap();
    let first_segment = SegmentHeader::LEAD_IN_SIZE
        + u64::from_le_bytes(bytes[12..20].try_into().unwrap()) as usize;
    std::fs::write(&path, &bytes[..first_segment + SegmentHeader::LEAD_IN_SIZE + 10]).unwrap();

    let outcome = read_tdms_outcome(&path).unwrap();
    assert!(matches!(outcome.empty_reason(), Some(EmptyReason::Corrupted { .. })));
    assert_eq!(warnings_for(&path).len(), 1);
}

#[test]
fn test_empty_on_bad_data_type() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_type.tdms");
    write_valid_file(&path);

    // Data type code of the channel's raw data index, right after its
    // index length of 20
    let mut bytes = std::fs::read(&path).unwrap();
    let pos = bytes.windows(8)
        .position(|w| w[..4] == 20u32.to_le_bytes() && w[4..] == 9u32.to_le_bytes())
        .unwrap();
    bytes[pos + 4..pos + 8].copy_from_slice(&0x99u32.to_le_bytes());
    std::fs::write(&path, &bytes).unwrap();

    match read_tdms_outcome(&path).unwrap() {
        ReadOutcome::Empty(EmptyReason::Corrupted { detail, .. }) => {
            assert!(detail.contains("153"));
        }
        other => panic!("expected corrupted outcome, got {:?}", other),
    }
}

/// Write a valid file, rewrite part of it, and check it reads as corrupted
/// with a single warning
fn assert_corrupted_after(name: &str, patch: impl FnOnce(&mut Vec<u8>)) {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    write_valid_file(&path);

    let mut bytes = std::fs::read(&path).unwrap();
    patch(&mut bytes);
    std::fs::write(&path, &bytes).unwrap();

    let outcome = read_tdms_outcome(&path).unwrap();
    assert!(
        matches!(outcome.empty_reason(), Some(EmptyReason::Corrupted { .. })),
        "{}: {:?}",
        name, outcome
    );
    assert_eq!(warnings_for(&path).len(), 1);
}

/// Offset of the channel's raw data index: length 20, f32, dimension 1
fn channel_index_position(bytes: &[u8]) -> usize {
    let mut index = Vec::new();
    index.extend(20u32.to_le_bytes());
    index.extend(9u32.to_le_bytes());
    index.extend(1u32.to_le_bytes());
    bytes.windows(index.len()).position(|w| w == index.as_slice()).unwrap()
}

#[test]
fn test_empty_on_overflowing_value_count() {
    assert_corrupted_after("overflow_count.tdms", |bytes| {
        let count = channel_index_position(bytes) + 12;
        bytes[count..count + 8].copy_from_slice(&(u64::MAX / 2).to_le_bytes());
    });
}

#[test]
fn test_empty_on_oversized_value_count() {
    assert_corrupted_after("oversized_count.tdms", |bytes| {
        let count = channel_index_position(bytes) + 12;
        bytes[count..count + 8].copy_from_slice(&(1u64 << 40).to_le_bytes());
    });
}

#[test]
fn test_empty_on_huge_property_count() {
    assert_corrupted_after("property_count.tdms", |bytes| {
        // Root segment: one object "/", no raw data, then its property count
        let count = SegmentHeader::LEAD_IN_SIZE + 4 + 4 + 1 + 4;
        assert_eq!(&bytes[count - 5..count], b"/\xff\xff\xff\xff");
        assert_eq!(bytes[count..count + 4], 2u32.to_le_bytes());
        bytes[count..count + 4].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
    });
}

#[test]
fn test_empty_on_huge_string_length() {
    assert_corrupted_after("string_length.tdms", |bytes| {
        let channel_path = b"/'g'/'test_01'";
        let start = bytes.windows(channel_path.len())
            .position(|w| w == channel_path)
            .unwrap();
        bytes[start - 4..start].copy_from_slice(&u32::MAX.to_le_bytes());
    });
}

#[test]
fn test_valid_file_logs_no_warning() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("valid.tdms");
    write_valid_file(&path);

    assert_eq!(read_tdms(&path).unwrap().len(), 1);
    assert!(warnings_for(&path).is_empty());
}
