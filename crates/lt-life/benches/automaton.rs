use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lt_core::{Board, Encoding};
use lt_life::Automaton;
use lt_life::seed::fill_random;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    for (rows, cols) in [(64, 64), (256, 256), (1024, 1024)] {
        let mut board = Board::new(rows, cols, Encoding::Ascii);
        fill_random(&mut board, 0.3, &mut StdRng::seed_from_u64(7));
        let mut life = Automaton::new(&board);
        group.bench_function(format!("{rows}x{cols}"), |b| {
            b.iter(|| life.advance(black_box(&mut board)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_advance);
criterion_main!(benches);
