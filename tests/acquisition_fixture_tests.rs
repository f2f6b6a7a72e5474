// tests/acquisition_fixture_tests.rs
mod common;

use common::{assert_close, init_logging, write_acquisition_fixture, FIXTURE_SAMPLE_SUM};
use sep005_tdms::*;
use std::path::PathBuf;

fn setup_fixture(dir: &tempfile::TempDir) -> PathBuf {
    init_logging();
    let path = dir.path().join("acquisition.tdms");
    write_acquisition_fixture(&path).unwrap();
    path
}

#[test]
fn test_group_and_channel_order() {
    let dir = tempfile::tempdir().unwrap();
    let signals = read_tdms(setup_fixture(&dir)).unwrap();

    // (group, name, unit, fs, samples)
    let expected = [
        ("acceleration", "acc_x", "m/s²", 100.0, 250),
        ("acceleration", "acc_y", "m/s²", 100.0, 250),
        ("strain", "sg_01", "µε", 50.0, 100),
        ("ambient", "temperature", "°C", 1.0 / 60.0, 30),
        ("ambient", "humidity", "", 1.0 / 60.0, 30),
    ];

    assert_eq!(signals.len(), expected.len());
    for (signal, (group, name, unit, fs, len)) in signals.iter().zip(expected) {
        assert_eq!(signal.group.as_deref(), Some(group));
        assert_eq!(signal.name, name);
        assert_eq!(signal.unit_str, unit);
        assert_close(signal.fs, fs, name);
        assert_eq!(signal.data.len(), len, "{}", name);
    }
}

#[test]
fn test_sample_sum() {
    let dir = tempfile::tempdir().unwrap();
    let signals = read_tdms(setup_fixture(&dir)).unwrap();

    let total: f64 = signals.iter().map(|s| s.data.sum()).sum();
    assert_close(total, FIXTURE_SAMPLE_SUM, "sum of all samples");
}

#[test]
fn test_values_as_stored() {
    let dir = tempfile::tempdir().unwrap();
    let signals = read_tdms(setup_fixture(&dir)).unwrap();

    assert!(matches!(signals[0].data, SignalData::F64(_)));
    assert!(matches!(signals[1].data, SignalData::F32(_)));

    // Integer channels come back widened
    let temperature: Vec<f64> = signals[3].data.iter_f64().take(6).collect();
    assert_eq!(temperature, vec![20.0, 21.0, 22.0, 23.0, 24.0, 20.0]);

    // Split channel is concatenated in segment order
    let strain: Vec<f64> = signals[2].data.iter_f64().collect();
    assert!(strain[..50].iter().all(|&v| v == -1.0));
    assert!(strain[50..].iter().all(|&v| v == 2.0));
}

#[test]
fn test_start_timestamp_only_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let signals = read_tdms(setup_fixture(&dir)).unwrap();

    assert_eq!(
        signals[2].start_timestamp,
        Some(StartTimestamp::Text("2023-11-15T12:00:00".to_string()))
    );
    assert!(signals.iter().filter(|s| s.name != "sg_01").all(|s| s.start_timestamp.is_none()));
    assert!(assert_sep005(&signals).is_ok());
}

#[test]
fn test_fixture_survives_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let signals = read_tdms(setup_fixture(&dir)).unwrap();

    let copy = dir.path().join("copy.tdms");
    write_tdms(&signals, &copy).unwrap();
    let reread = read_tdms(&copy).unwrap();

    assert_eq!(reread.len(), signals.len());
    for (a, b) in reread.iter().zip(&signals) {
        assert_eq!((&a.group, &a.name, &a.unit_str), (&b.group, &b.name, &b.unit_str));
        assert_close(a.fs, b.fs, &a.name);
        assert_close(a.data.sum(), b.data.sum(), &a.name);
    }
}

#[test]
fn test_missing_increment_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_increment.tdms");

    let mut writer = TdmsWriter::create(&path).unwrap();
    writer.write_segment(&[
        TdmsObject::group("g"),
        TdmsObject::channel("g", "c", RawDataBuffer::from_f32(&[1.0, 2.0]), Vec::new())
            .with_property("unit_string", "V"),
    ]).unwrap();
    writer.close().unwrap();

    let err = read_tdms(&path).unwrap_err();
    match err {
        TdmsError::MissingProperty { channel, property } => {
            assert_eq!(channel, "/'g'/'c'");
            assert_eq!(property, "wf_increment");
        }
        other => panic!("expected MissingProperty, got {:?}", other),
    }
    assert!(read_tdms_outcome(&path).is_err());
}

#[test]
fn test_file_without_channels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty_groups.tdms");

    let mut writer = TdmsWriter::create(&path).unwrap();
    writer.write_segment(&[TdmsObject::root(Vec::new()), TdmsObject::group("unused")]).unwrap();
    writer.close().unwrap();

    let outcome = read_tdms_outcome(&path).unwrap();
    assert_eq!(outcome, ReadOutcome::Signals(Vec::new()));
    assert!(outcome.empty_reason().is_none());
}
