//! Benchmarks for series generation and page rendering
//!
//! Run with: cargo bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tempfile::tempdir;

use weather_tracker::config::Config;
use weather_tracker::regions::{parse_regions, RegionValueAssigner};
use weather_tracker::render::{render_dashboard, render_page, render_tracker, Choropleth, LineChart};
use weather_tracker::series::{validate, GeneratorConfig, SeriesGenerator};

/// Square-ish polygons laid out on a grid over Singapore
fn regions_geojson(count: usize) -> String {
    let features: Vec<String> = (0..count)
        .map(|i| {
            let lon = 103.6 + (i % 10) as f64 * 0.04;
            let lat = 1.25 + (i / 10) as f64 * 0.04;
            format!(
                r#"{{"type":"Feature","properties":{{"region":"REGION {i}"}},"geometry":{{"type":"Polygon","coordinates":[[[{a},{b}],[{c},{b}],[{c},{d}],[{a},{d}],[{a},{b}]]]}}}}"#,
                i = i,
                a = lon,
                b = lat,
                c = lon + 0.035,
                d = lat + 0.035
            )
        })
        .collect();
    format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
}

fn bench_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("series");

    for size in [100, 1000, 10000] {
        let generator = SeriesGenerator::new(GeneratorConfig::default().sample_count(size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("generate_{}", size), |b| {
            b.iter(|| generator.generate().unwrap())
        });

        let series = generator.generate().unwrap();
        group.bench_function(format!("validate_{}", size), |b| {
            b.iter(|| validate(black_box(&series)).unwrap())
        });

        group.bench_function(format!("chart_svg_{}", size), |b| {
            b.iter(|| LineChart::from_series(black_box(&series)).unwrap().to_svg().unwrap())
        });
    }

    group.finish();
}

fn bench_regions(c: &mut Criterion) {
    let mut group = c.benchmark_group("regions");

    for count in [5, 50] {
        let json = regions_geojson(count);

        group.bench_function(format!("parse_assign_shade_{}", count), |b| {
            b.iter(|| {
                let features = parse_regions(black_box(&json)).unwrap();
                let records = RegionValueAssigner::default().assign(features).unwrap();
                Choropleth::build(&records, "Temperature (°C)").unwrap()
            })
        });
    }

    group.finish();
}

fn bench_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("pages");

    let dir = tempdir().unwrap();
    let path = dir.path().join("regions.geojson");
    std::fs::write(&path, regions_geojson(5)).unwrap();

    let mut config = Config::default();
    config.regions.path = path;

    for debug in [false, true] {
        group.bench_function(format!("dashboard_debug_{}", debug), |b| {
            b.iter(|| render_page(render_dashboard(&config, debug, Utc::now()).page()))
        });

        group.bench_function(format!("map_debug_{}", debug), |b| {
            b.iter(|| render_page(render_tracker(&config, debug, Utc::now()).page()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_series, bench_regions, bench_pages);
criterion_main!(benches);
