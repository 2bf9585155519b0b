use chrono::Month;
use climate_analyzer::analyzers::{lowest_n, ClimateAnalyzer, DeltaAnalyzer};
use climate_analyzer::models::{month_from_number, Dataset, TemperatureRecord};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Synthetic dataset: every country has a reading for every month of every year
fn create_test_dataset(country_count: usize, years: i32) -> Dataset {
    let mut records = Vec::with_capacity(country_count * years as usize * 12);

    for country_id in 0..country_count {
        let country = format!("Country {}", country_id);
        let code = format!("C{:03}", country_id);
        for year in 2000..2000 + years {
            for month_number in 1..=12u32 {
                let month = month_from_number(month_number).unwrap();
                let seasonal = ((month_number as f64) - 6.5).abs() * -2.0;
                let value = 15.0 + seasonal + (country_id as f64) * 0.37 + ((year - 2000) as f64) * 0.05;
                records.push(TemperatureRecord::new(value, year, month, country.as_str(), code.as_str()));
            }
        }
    }

    Dataset::new(records)
}

fn benchmark_top_n_by_month(c: &mut Criterion) {
    let dataset = create_test_dataset(200, 17);
    let analyzer = ClimateAnalyzer::new(&dataset);

    c.bench_function("top_lowest_by_month", |b| {
        b.iter(|| black_box(analyzer.top_lowest_by_month(Month::January).unwrap().len()))
    });

    c.bench_function("top_highest_overall", |b| {
        b.iter(|| black_box(analyzer.top_highest_overall().unwrap().len()))
    });
}

fn benchmark_lowest_n(c: &mut Criterion) {
    let dataset = create_test_dataset(200, 1);
    let winners: Vec<TemperatureRecord> = dataset.records().iter().step_by(12).cloned().collect();

    c.bench_function("lowest_n_sort_and_slice", |b| {
        b.iter(|| black_box(lowest_n(winners.clone(), 10).unwrap().len()))
    });
}

fn benchmark_top_deltas(c: &mut Criterion) {
    let dataset = create_test_dataset(200, 17);
    let candidates = dataset.countries();
    let analyzer = DeltaAnalyzer::new(dataset.records());

    c.bench_function("top_deltas", |b| {
        b.iter(|| {
            black_box(
                analyzer
                    .top_deltas(&candidates, Month::July, 2000, 2016, 10)
                    .unwrap()
                    .len(),
            )
        })
    });
}

fn benchmark_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("per_country_reduce_by_workers");
    let dataset = create_test_dataset(500, 17);

    for &workers in &[1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            let analyzer = ClimateAnalyzer::new(&dataset).with_max_workers(workers);
            b.iter(|| black_box(analyzer.all_within_range(10.0, 12.0).unwrap().len()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_top_n_by_month,
    benchmark_lowest_n,
    benchmark_top_deltas,
    benchmark_workers
);
criterion_main!(benches);
