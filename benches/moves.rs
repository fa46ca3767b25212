//! Benchmarks for the directional move transforms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use neon2048::board::{Board, SpecialKind, SpecialTileMap};
use neon2048::core::{Coord, Direction};
use neon2048::engine::movement;

fn dense_board() -> (Board, SpecialTileMap) {
    let board = Board::from_rows([
        [2, 2, 4, 4],
        [0, 8, 8, 2],
        [4, 0, 4, 2],
        [2, 2, 0, 16],
    ]);
    let mut specials = SpecialTileMap::new();
    specials.tag(Coord::new(0, 0), SpecialKind::Star);
    specials.tag(Coord::new(3, 3), SpecialKind::Diamond);
    (board, specials)
}

fn bench_moves(c: &mut Criterion) {
    let (board, specials) = dense_board();

    let mut group = c.benchmark_group("movement");
    for direction in Direction::ALL {
        group.bench_function(direction.to_string(), |b| {
            b.iter(|| {
                let mut scratch = black_box(board);
                let mut tags = specials.clone();
                movement::apply(&mut scratch, &mut tags, direction)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_moves);
criterion_main!(benches);
