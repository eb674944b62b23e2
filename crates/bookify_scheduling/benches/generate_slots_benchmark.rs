use bookify_scheduling::config::SchedulingConfig;
use bookify_scheduling::slots::{generate_available_slots, BusyInterval};
use bookify_scheduling::suggestions::suggest_alternatives;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Helper function to create a list of busy intervals spread across the day
fn create_busy_intervals(count: usize, length_minutes: i64) -> Vec<BusyInterval> {
    let day_start = Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap();
    let mut intervals = Vec::new();
    let mut current = day_start;

    for _ in 0..count {
        let start = current + Duration::minutes(30);
        let end = start + Duration::minutes(length_minutes.max(1));
        intervals.push(BusyInterval::new(start, end));
        current = end + Duration::minutes(30);
    }

    intervals
}

fn bench_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn benchmark_generate_available_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_available_slots");

    // Benchmark with no busy intervals
    group.bench_function("no_busy_intervals", |b| {
        b.iter(|| {
            let busy = Vec::new();
            generate_available_slots(
                black_box(bench_day()),
                black_box(&busy),
                black_box(60),
                black_box("UTC"),
                black_box(&SchedulingConfig::default()),
            )
        })
    });

    // Benchmark with a few busy intervals
    group.bench_function("few_busy_intervals", |b| {
        b.iter(|| {
            let busy = create_busy_intervals(5, 45);
            generate_available_slots(
                black_box(bench_day()),
                black_box(&busy),
                black_box(60),
                black_box("UTC"),
                black_box(&SchedulingConfig::default()),
            )
        })
    });

    // Benchmark with many busy intervals
    group.bench_function("many_busy_intervals", |b| {
        b.iter(|| {
            let busy = create_busy_intervals(20, 20);
            generate_available_slots(
                black_box(bench_day()),
                black_box(&busy),
                black_box(60),
                black_box("UTC"),
                black_box(&SchedulingConfig::default()),
            )
        })
    });

    // Benchmark with a non-UTC timezone conversion in the loop
    group.bench_function("zoned_grid", |b| {
        b.iter(|| {
            let busy = create_busy_intervals(5, 45);
            generate_available_slots(
                black_box(bench_day()),
                black_box(&busy),
                black_box(60),
                black_box("Europe/Zurich"),
                black_box(&SchedulingConfig::default()),
            )
        })
    });

    group.finish();
}

fn benchmark_suggest_alternatives(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest_alternatives");

    let slots = generate_available_slots(
        bench_day(),
        &create_busy_intervals(3, 45),
        30,
        "UTC",
        &SchedulingConfig::default(),
    )
    .expect("benchmark slots");
    let preferred = Utc.with_ymd_and_hms(2024, 6, 10, 10, 15, 0).unwrap();

    group.bench_function("full_grid", |b| {
        b.iter(|| {
            suggest_alternatives(
                black_box(bench_day()),
                black_box(preferred),
                black_box(&slots),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_generate_available_slots,
    benchmark_suggest_alternatives
);
criterion_main!(benches);
