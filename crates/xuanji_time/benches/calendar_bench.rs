use criterion::{Criterion, black_box, criterion_group, criterion_main};
use xuanji_time::{
    LunarDate, SolarTerm, lunar_to_solar, new_moon_jde, solar_term_ut, solar_to_lunar,
    sun_apparent_longitude_deg,
};

fn astronomy_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("astronomy");
    group.bench_function("sun_apparent_longitude", |b| {
        b.iter(|| sun_apparent_longitude_deg(black_box(2_460_000.5)))
    });
    group.bench_function("new_moon_jde", |b| b.iter(|| new_moon_jde(black_box(300))));
    group.bench_function("solar_term_lichun", |b| {
        b.iter(|| solar_term_ut(black_box(2024), SolarTerm::LiChun))
    });
    group.finish();
}

fn lunar_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("lunar");
    group.bench_function("solar_to_lunar", |b| {
        b.iter(|| solar_to_lunar(black_box(1990), black_box(5), black_box(15)))
    });
    group.bench_function("lunar_to_solar", |b| {
        b.iter(|| lunar_to_solar(black_box(LunarDate::new(2023, 2, 10, true))))
    });
    group.finish();
}

criterion_group!(benches, astronomy_bench, lunar_bench);
criterion_main!(benches);
