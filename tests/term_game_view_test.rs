use blockfall::core::{GameController, GameSnapshot};
use blockfall::term::{piece_color, AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind};

fn board_only(mut snap: GameSnapshot) -> GameSnapshot {
    // Park the live piece and ghost in the hidden buffer.
    snap.current.y = 0;
    snap.ghost.y = 0;
    snap
}

fn contains(fb: &FrameBuffer, text: &str) -> bool {
    (0..fb.height()).any(|y| fb.row_text(y).contains(text))
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameController::new(1).snapshot();
    let view = GameView::default();

    // 10x20 visible cells at 2x1 plus the border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = board_only(GameController::new(1).snapshot());
    snap.board[39][0] = Some(PieceKind::I);

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Bottom visible row is row 20 of the frame.
    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, piece_color(PieceKind::I));
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let snap = GameController::new(1).snapshot();
    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    let color = piece_color(snap.current.kind);
    let solid = fb
        .cells()
        .iter()
        .filter(|c| c.ch == '█' && c.style.fg == color)
        .count();
    assert_eq!(solid, 8, "4 cells, 2 columns each");

    let ghost = fb.cells().iter().filter(|c| c.ch == '░').count();
    assert_eq!(ghost, 8);
}

#[test]
fn term_view_hides_ghost_when_disabled() {
    let snap = GameController::new(1).snapshot();
    let fb = GameView::default()
        .with_ghost(false)
        .render(&snap, Viewport::new(22, 22));
    assert!(fb.cells().iter().all(|c| c.ch != '░'));
}

#[test]
fn term_view_side_panels_show_state() {
    let mut game = GameController::new(2);
    game.apply_action(GameAction::Hold);
    game.apply_action(GameAction::HardDrop);
    let snap = game.snapshot();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, view.min_viewport());

    assert!(contains(&fb, "HOLD"));
    assert!(contains(&fb, "NEXT"));
    assert!(contains(&fb, &snap.score.to_string()));
}

#[test]
fn term_view_overlay_on_pause() {
    let mut game = GameController::new(1);
    game.apply_action(GameAction::Pause);
    let view = GameView::default();
    let fb = view.render(&game.snapshot(), view.min_viewport());
    assert!(contains(&fb, "PAUSED"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = GameController::new(1).snapshot();
    let view = GameView::default();
    let vp = view.min_viewport();

    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&snap, vp, &mut fb);
    assert_eq!((fb.width(), fb.height()), (vp.width, vp.height));
    assert_eq!(fb, view.render(&snap, vp));
}
