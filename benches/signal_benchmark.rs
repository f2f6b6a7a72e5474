// benches/signal_benchmark.rs
use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId, Throughput};
use sep005_tdms::*;

fn make_signals(channels: usize, samples: usize) -> Vec<Signal> {
    (0..channels)
        .map(|c| {
            let data: Vec<f64> = (0..samples).map(|i| ((i + c) as f64 * 0.01).sin()).collect();
            Signal::new(format!("channel_{}", c), data, 1000.0)
                .with_group("bench")
                .with_unit("m/s²")
        })
        .collect()
}

fn benchmark_write_signals(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_signals");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench_write.tdms");

    for samples in [1000, 10000, 100000].iter() {
        let signals = make_signals(8, *samples);
        group.throughput(Throughput::Bytes((8 * *samples * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &signals, |b, signals| {
            b.iter(|| write_tdms(signals, &path).unwrap());
        });
    }

    group.finish();
}

fn benchmark_read_signals(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_signals");
    let dir = tempfile::tempdir().unwrap();

    for samples in [1000, 10000, 100000].iter() {
        let path = dir.path().join(format!("bench_read_{}.tdms", samples));
        write_tdms(&make_signals(8, *samples), &path).unwrap();

        group.throughput(Throughput::Bytes((8 * *samples * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &path, |b, path| {
            b.iter(|| read_tdms(path).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_write_signals, benchmark_read_signals);
criterion_main!(benches);
