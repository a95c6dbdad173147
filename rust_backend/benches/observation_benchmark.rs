use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use novascope_rust::algorithms::{solve_crossing, VisibilityPolicy};
use novascope_rust::core::domain::{CalendarDate, CelestialTarget, ObserverLocation, TimeOfDay};
use novascope_rust::parsing::input::parse_moment;
use novascope_rust::services::evaluate_target;
use novascope_rust::time::{compute_julian_day, format_hms, to_local_civil_time};

fn bench_julian_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_conversions");

    let date = CalendarDate::new(2024, 1, 1);
    let time = TimeOfDay::new(22, 30, 15).unwrap();
    group.bench_function("compute_julian_day", |b| {
        b.iter(|| compute_julian_day(black_box(&date), black_box(&time)));
    });

    let jd = compute_julian_day(&date, &time).unwrap();
    group.bench_function("lst_to_lct", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let lst = i as f64 * 0.024;
                black_box(to_local_civil_time(black_box(lst), jd, -3.7038, 1.0));
            }
        });
    });

    group.bench_function("format_hms", |b| {
        b.iter(|| format_hms(black_box(21.504_167)));
    });

    group.finish();
}

fn bench_hour_angle(c: &mut Criterion) {
    let mut group = c.benchmark_group("hour_angle");

    for lat in [0.0, 40.4168, 89.0] {
        group.bench_with_input(BenchmarkId::new("solve_crossing", lat), &lat, |b, &lat| {
            b.iter(|| {
                for i in 0..180 {
                    let dec = i as f64 - 89.5;
                    black_box(solve_crossing(lat, 18.6156, black_box(dec)));
                }
            });
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let location = ObserverLocation::new(40.4168, -3.7038).unwrap();
    let moment = parse_moment("2024-01-01", "22:00:00").unwrap();
    let targets: Vec<CelestialTarget> = (0..50)
        .map(|i| {
            CelestialTarget::new(format!("Star {}", i), (i as f64 * 0.47) % 24.0, i as f64 * 3.5 - 85.0)
                .unwrap()
        })
        .collect();

    group.bench_with_input(
        BenchmarkId::new("evaluate_targets", targets.len()),
        &targets,
        |b, targets| {
            b.iter(|| {
                for target in targets {
                    black_box(
                        evaluate_target(&location, &moment, target, 1.0, VisibilityPolicy::Linear)
                            .unwrap(),
                    );
                }
            });
        },
    );

    group.finish();
}

criterion_group!(benches, bench_julian_day, bench_hour_angle, bench_pipeline);
criterion_main!(benches);
