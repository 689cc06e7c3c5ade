//! Benchmarks for classification and grouping.
//!
//! Run with: cargo bench --bench grouping

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};

use dmi_processor::{EntityCollection, EntityRef, ObservationClassifier};

const STATIONS: &[&str] = &["06180", "06030", "06060", "06072", "06120", "06170"];
const PARAMETERS: &[&str] = &[
    "temp_dry",
    "humidity",
    "pressure",
    "wind_speed",
    "precip_past1h",
    "visibility",
    "unknown_parameter",
];

/// A metObs feature collection with `count` observations
fn payload(count: usize) -> Value {
    let features: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "type": "Feature",
                "id": format!("obs-{}", i),
                "geometry": {"type": "Point", "coordinates": [12.6417, 55.614]},
                "properties": {
                    "parameterId": PARAMETERS[i % PARAMETERS.len()],
                    "stationId": STATIONS[i % STATIONS.len()],
                    "observed": format!("2024-03-01T{:02}:00:00Z", i % 24),
                    "value": (i % 40) as f64 * 0.5
                }
            })
        })
        .collect();

    json!({"type": "FeatureCollection", "features": features})
}

fn entities(count: usize) -> EntityCollection<EntityRef> {
    let classifier = ObservationClassifier::with_defaults().unwrap();
    classifier
        .classify_json(payload(count))
        .unwrap()
        .entities
        .into_iter()
        .collect()
}

// =============================================================================
// CLASSIFICATION BENCHMARKS
// =============================================================================

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    let classifier = ObservationClassifier::with_defaults().unwrap();

    for count in [100, 1_000, 10_000] {
        let input = payload(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("classify_json", count), &input, |b, input| {
            b.iter(|| classifier.classify_json(black_box(input.clone())))
        });
    }

    group.finish();
}

// =============================================================================
// GROUPING BENCHMARKS
// =============================================================================

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");

    for count in [1_000, 10_000] {
        let collection = entities(count);
        group.throughput(Throughput::Elements(collection.len() as u64));

        group.bench_with_input(BenchmarkId::new("by_type", count), &collection, |b, collection| {
            b.iter(|| black_box(collection.group_by_type()))
        });

        group.bench_with_input(
            BenchmarkId::new("by_station_and_type", count),
            &collection,
            |b, collection| b.iter(|| black_box(collection.group_by_station_and_type())),
        );

        group.bench_with_input(
            BenchmarkId::new("latest_by_type", count),
            &collection,
            |b, collection| b.iter(|| black_box(collection.latest_by_type())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_classification, bench_grouping);
criterion_main!(benches);
