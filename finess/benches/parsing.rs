//! Benchmarks pour le parsing FINESS

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use finess::{GeoIndex, SourceEncoding};

/// Génère un fichier synthétique de `count` établissements, un sur deux géolocalisé
fn synthetic_registry(count: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(count * 400);
    data.extend_from_slice(b"finess;etalab;100;2024-01-12\n");

    for i in 0..count {
        let nofinesset = format!("{:09}", 10_000_000 + i);
        data.extend_from_slice(
            format!(
                "structureet;{nofinesset};{:09};CENTRE HOSPITALIER {i};;;;{};R;DES ECOLES;;;053;01;AIN;01000 BOURG EN BRESSE;0474454647;;355;Centre Hospitalier (C.H.);1102;Centres Hospitaliers;;8610Z;03;;1;;1979-02-13;1979-02-13;2020-02-04;\n",
                20_000_000 + i,
                i % 200,
            )
            .as_bytes(),
        );
        if i % 2 == 0 {
            data.extend_from_slice(
                format!(
                    "geolocalisation;{nofinesset};{}.5;{}.5;LAMBERT_93;2023-01-12\n",
                    600_000 + i % 300_000,
                    6_200_000 + i % 800_000,
                )
                .as_bytes(),
            );
        }
    }
    data
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for count in [1_000usize, 10_000] {
        let data = synthetic_registry(count);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| {
                let registry = finess::parse_bytes(black_box(data), SourceEncoding::default());
                black_box(registry)
            })
        });
    }

    group.finish();
}

fn bench_geo_index(c: &mut Criterion) {
    let registry = finess::parse_bytes(&synthetic_registry(10_000), SourceEncoding::default());

    c.bench_function("geo_index_build", |b| {
        b.iter(|| black_box(GeoIndex::build(black_box(&registry.geolocations))))
    });
}

criterion_group!(benches, bench_parse, bench_geo_index);
criterion_main!(benches);
