// tests/common/mod.rs
#![allow(dead_code)]

use sep005_tdms::*;
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Relative comparison suited to values that went through single precision
pub fn assert_close(actual: f64, expected: f64, context: &str) {
    let tolerance = 1e-6 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: {} differs from {}",
        context, actual, expected
    );
}

/// Lead-ins of every segment in a file, in order
pub fn read_segment_headers(path: &Path) -> Vec<SegmentHeader> {
    let mut file = File::open(path).unwrap();
    let file_size = file.seek(SeekFrom::End(0)).unwrap();
    let mut headers = Vec::new();

    let mut offset = 0u64;
    while offset < file_size {
        file.seek(SeekFrom::Start(offset)).unwrap();
        let header = SegmentHeader::read_from(&mut file).unwrap();
        offset += SegmentHeader::LEAD_IN_SIZE as u64 + header.next_segment_offset;
        headers.push(header);
    }

    headers
}

/// Acquisition-style file with three groups written over five segments
///
/// `strain/sg_01` is split across two segments, the second one written after
/// the `ambient` group first appears.
pub fn write_acquisition_fixture(path: &Path) -> Result<()> {
    let mut writer = TdmsWriter::create(path)?;

    writer.write_segment(&[TdmsObject::root(Vec::new())
        .with_property("author", "field campaign")
        .with_property("datestring", "2023/11/15 H:00:00")])?;

    let mut acc_x = RawDataBuffer::new(DataType::DoubleFloat);
    acc_x.write_slice(&(0..250).map(|i| i as f64 * 0.5).collect::<Vec<f64>>())?;
    let acc_y = RawDataBuffer::from_f32(&[1.0; 250]);
    writer.write_segment(&[
        TdmsObject::group("acceleration"),
        TdmsObject::channel("acceleration", "acc_x", acc_x, Vec::new())
            .with_property("unit_string", "m/s²")
            .with_property("wf_increment", 0.01),
        TdmsObject::channel("acceleration", "acc_y", acc_y, Vec::new())
            .with_property("unit_string", "m/s²")
            .with_property("wf_increment", 0.01),
    ])?;

    let start = chrono::DateTime::<chrono::Utc>::from_timestamp(1_700_049_600, 250_000_000)
        .expect("valid fixture time");
    let strain_first = RawDataBuffer::from_f32(&[-1.0; 50]);
    writer.write_segment(&[
        TdmsObject::group("strain"),
        TdmsObject::channel("strain", "sg_01", strain_first, Vec::new())
            .with_property("unit_string", "µε")
            .with_property("wf_increment", 0.02)
            .with_property("wf_start_time", PropertyValue::Timestamp(Timestamp::from_datetime(&start))),
    ])?;

    let mut temperature = RawDataBuffer::new(DataType::I16);
    temperature.write_slice(&(0..30).map(|i| 20 + (i % 5) as i16).collect::<Vec<i16>>())?;
    let mut humidity = RawDataBuffer::new(DataType::DoubleFloat);
    humidity.write_slice(&[40.0f64; 30])?;
    writer.write_segment(&[
        TdmsObject::group("ambient"),
        TdmsObject::channel("ambient", "temperature", temperature, Vec::new())
            .with_property("unit_string", "°C")
            .with_property("wf_increment", 60.0),
        TdmsObject::channel("ambient", "humidity", humidity, Vec::new())
            .with_property("wf_increment", 60.0),
    ])?;

    let strain_second = RawDataBuffer::from_f32(&[2.0; 50]);
    writer.write_segment(&[
        TdmsObject::channel("strain", "sg_01", strain_second, Vec::new()),
    ])?;

    writer.close()
}

/// Sum of every sample in [`write_acquisition_fixture`]
pub const FIXTURE_SAMPLE_SUM: f64 = 15562.5 + 250.0 + 660.0 + 1200.0 + 50.0;
