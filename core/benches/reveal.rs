use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

const TIERS: [(&str, Coord2, CellCount); 3] = [
    ("beginner", (9, 9), 10),
    ("intermediate", (16, 16), 40),
    ("expert", (16, 30), 99),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size, mines) in TIERS {
        let config = GameConfig::new(size, mines).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                RandomMinefieldGenerator::new(seed).generate(black_box(config)).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // a single corner mine leaves one huge zero region
    let field = MineField::from_mine_coords((200, 200), &[(199, 199)]).unwrap();

    c.bench_function("flood_fill_200x200", |b| {
        b.iter(|| {
            let mut game = GameSession::from_minefield(field.clone());
            game.reveal(black_box((0, 0))).unwrap()
        })
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
