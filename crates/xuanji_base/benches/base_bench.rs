use criterion::{Criterion, black_box, criterion_group, criterion_main};
use xuanji_base::{ALL_BRANCHES, ALL_STEMS, GanZhi, hidden_stems, six_harmony, ten_god};

fn cycle_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle");
    group.bench_function("ganzhi_of_jdn", |b| {
        b.iter(|| GanZhi::of_jdn(black_box(2_448_027)))
    });
    group.bench_function("na_yin", |b| {
        b.iter(|| GanZhi::from_cycle_index(black_box(37)).na_yin().name())
    });
    group.finish();
}

fn relation_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("relations");
    group.bench_function("ten_god_grid", |b| {
        b.iter(|| {
            ALL_STEMS
                .iter()
                .flat_map(|&dm| ALL_STEMS.iter().map(move |&s| ten_god(dm, s)))
                .count()
        })
    });
    group.bench_function("hidden_and_harmony", |b| {
        b.iter(|| {
            ALL_BRANCHES
                .iter()
                .map(|&br| hidden_stems(br).len() + six_harmony(br, black_box(br.offset(1))).is_some() as usize)
                .sum::<usize>()
        })
    });
    group.finish();
}

criterion_group!(benches, cycle_bench, relation_bench);
criterion_main!(benches);
