use criterion::{Criterion, criterion_group, criterion_main};
use mines_core::*;
use std::hint::black_box;

fn open_empty_board(c: &mut Criterion) {
    c.bench_function("flood_fill_255x255_empty", |b| {
        b.iter(|| {
            let mut game = Minesweeper::with_mines((255, 255), &[]).unwrap();
            black_box(game.open_cell(black_box((127, 127))).unwrap())
        })
    });
}

fn open_random_board(c: &mut Criterion) {
    let config = GameConfig::new((100, 100), 500).unwrap();
    let mut generator = RandomMineGenerator::from_seed(1234);

    c.bench_function("flood_fill_100x100_random", |b| {
        b.iter(|| {
            let mines = generator.generate(config);
            let mut game = Minesweeper::with_mines(config.size, &mines).unwrap();
            let safe = (0..100)
                .flat_map(|x| (0..100).map(move |y| (x, y)))
                .find(|&coords| {
                    let cell = game.board()[coords];
                    !cell.is_mine() && cell.adjacent_mines() == 0
                })
                .unwrap();
            black_box(game.open_cell(safe).unwrap())
        })
    });
}

criterion_group!(benches, open_empty_board, open_random_board);
criterion_main!(benches);
