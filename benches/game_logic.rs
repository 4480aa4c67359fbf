use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Bag, Board, GameController, GameSnapshot};
use blockfall::term::{GameView, FrameBuffer};
use blockfall::types::{GameAction, PieceKind, RotateDirection};

fn bench_tick(c: &mut Criterion) {
    let mut game = GameController::new(12345);
    let mut now = 0u64;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            if game.game_over() {
                game.reset();
            }
            game.tick(black_box(now));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 36..40 {
                board.fill_row(y, PieceKind::I, &[]);
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_bag_draw(c: &mut Criterion) {
    let mut bag = Bag::new(12345);

    c.bench_function("bag_draw", |b| b.iter(|| black_box(bag.draw())));
}

fn bench_move(c: &mut Criterion) {
    let mut game = GameController::new(12345);
    let mut dx = 1;

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            if !game.move_piece(dx, 0) {
                dx = -dx;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = GameController::new(12345);

    c.bench_function("rotate_piece", |b| {
        b.iter(|| {
            game.rotate_piece(RotateDirection::Clockwise);
        })
    });
}

fn bench_hard_drop_game(c: &mut Criterion) {
    c.bench_function("hard_drop_to_game_over", |b| {
        b.iter(|| {
            let mut game = GameController::new(black_box(7));
            while !game.game_over() {
                game.apply_action(GameAction::HardDrop);
            }
            black_box(game.score())
        })
    });
}

fn bench_snapshot_and_render(c: &mut Criterion) {
    let game = GameController::new(12345);
    let view = GameView::default();
    let vp = view.min_viewport();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("snapshot_render_into", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, vp, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_bag_draw,
    bench_move,
    bench_rotate,
    bench_hard_drop_game,
    bench_snapshot_and_render
);
criterion_main!(benches);
