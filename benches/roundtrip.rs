#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use textset::{Textset, TextsetObject};

#[derive(Debug, Default, Clone, PartialEq, TextsetObject)]
struct BenchSettings {
    #[textset(name = "Host", priority = 2)]
    host: String,
    #[textset(name = "Port", priority = 2)]
    port: u16,
    #[textset(name = "Workers")]
    workers: u32,
    #[textset(name = "Ratio")]
    ratio: f64,
    #[textset(name = "Verbose", optional)]
    verbose: bool,
    #[textset(name = "Motd", optional)]
    motd: Option<String>,
}

fn sample() -> BenchSettings {
    BenchSettings {
        host: "settings.internal.example".to_owned(),
        port: 8080,
        workers: 16,
        ratio: 0.75,
        verbose: true,
        motd: Some("greetings traveler".to_owned()),
    }
}

fn bench_serialize(c: &mut Criterion) {
    let settings = sample();
    let mut encoded = Vec::new();
    Textset::write(&mut encoded, &settings).expect("serialize");

    let mut group = c.benchmark_group("Settings Roundtrip");
    group.throughput(Throughput::Bytes(encoded.len() as u64));

    group.bench_function("serialize", |b| {
        let mut buf = Vec::with_capacity(encoded.len());
        b.iter(|| {
            buf.clear();
            Textset::write(&mut buf, black_box(&settings)).expect("serialize");
        });
    });

    group.bench_function("deserialize", |b| {
        b.iter(|| {
            let loaded: BenchSettings =
                Textset::read(black_box(encoded.as_slice())).expect("deserialize");
            black_box(loaded)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_serialize);
criterion_main!(benches);
