//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: HOLD and the score panel, the 20 visible rows of the
//! well inside a border, then the NEXT queue.

use crate::core::{GameSnapshot, PieceSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_WIDTH, HIDDEN_ROWS, NEXT_PREVIEW, VISIBLE_HEIGHT};

const SIDE_PANEL_W: u16 = 12;

const WELL_BG: Rgb = Rgb::new(20, 20, 28);
const GRID_FG: Rgb = Rgb::new(60, 60, 72);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);
const TEXT_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Display color of a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x00, 0xf0, 0xf0),
        PieceKind::O => Rgb::new(0xf0, 0xf0, 0x00),
        PieceKind::T => Rgb::new(0xa0, 0x00, 0xf0),
        PieceKind::S => Rgb::new(0x00, 0xf0, 0x00),
        PieceKind::Z => Rgb::new(0xf0, 0x00, 0x00),
        PieceKind::J => Rgb::new(0x00, 0x00, 0xf0),
        PieceKind::L => Rgb::new(0xf0, 0xa0, 0x00),
    }
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_ghost: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Size of the bordered well in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            VISIBLE_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Smallest viewport that shows the well and both side panels.
    pub fn min_viewport(&self) -> Viewport {
        let (frame_w, frame_h) = self.frame_size();
        Viewport::new(frame_w + 2 * (SIDE_PANEL_W + 2), frame_h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Allocation-free once the framebuffer has reached the viewport size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(GRID_FG, WELL_BG),
        );
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(BORDER_FG, TEXT_BG),
        );

        // Locked cells, visible window only.
        for (vy, row) in snap.visible_rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, start_x, start_y, x as u16, vy as u16, *kind),
                    None => self.fill_cell_rect(
                        fb,
                        start_x,
                        start_y,
                        x as u16,
                        vy as u16,
                        '·',
                        CellStyle::new(GRID_FG, WELL_BG).dim(),
                    ),
                }
            }
        }

        if self.show_ghost && !snap.game_over {
            let style = CellStyle::new(piece_color(snap.ghost.kind).scaled(60), WELL_BG).dim();
            self.draw_piece(fb, &snap.ghost, |view, fb, x, y| {
                view.fill_cell_rect(fb, start_x, start_y, x, y, '░', style);
            });
        }

        self.draw_piece(fb, &snap.current, |view, fb, x, y| {
            view.draw_block(fb, start_x, start_y, x, y, snap.current.kind);
        });

        self.draw_left_panel(fb, snap, start_x, start_y);
        self.draw_right_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.paused {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED", None);
        } else if snap.game_over {
            draw_overlay_text(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                "GAME OVER",
                Some("R to restart"),
            );
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Call `draw` for each cell of `piece` that falls inside the visible window.
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        piece: &PieceSnapshot,
        mut draw: impl FnMut(&Self, &mut FrameBuffer, u16, u16),
    ) {
        for (x, y) in piece.cells() {
            let vy = y - HIDDEN_ROWS as i8;
            if x >= 0 && x < BOARD_WIDTH as i8 && vy >= 0 && vy < VISIBLE_HEIGHT as i8 {
                draw(self, fb, x as u16, vy as u16);
            }
        }
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), WELL_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_left_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, start_x: u16, start_y: u16) {
        if start_x < SIDE_PANEL_W + 2 {
            return;
        }
        let panel_x = start_x - SIDE_PANEL_W - 2;
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), TEXT_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => {
                // Greyed out until the next lock re-enables hold.
                let dim = !snap.can_hold;
                draw_mini_piece(fb, panel_x, y, kind, dim);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y += 3;

        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y += 3;
        }
    }

    fn draw_right_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(SIDE_PANEL_W) > viewport.width {
            return;
        }
        let label = CellStyle::default().bold();

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for kind in snap.next_queue.iter().take(NEXT_PREVIEW) {
            if y >= viewport.height {
                break;
            }
            let rows = draw_mini_piece(fb, panel_x, y, *kind, false);
            y = y.saturating_add(rows + 1);
        }
    }
}

/// Draw a piece in its spawn orientation with empty rows trimmed.
///
/// Returns the number of terminal rows used.
fn draw_mini_piece(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dim: bool) -> u16 {
    let shape = Shape::of(kind);
    let Some(top) = shape.occupied().map(|(_, dy)| dy).min() else {
        return 0;
    };
    let bottom = shape.occupied().map(|(_, dy)| dy).max().unwrap_or(top);

    let mut style = CellStyle::new(piece_color(kind), TEXT_BG);
    if dim {
        style = CellStyle::new(piece_color(kind).scaled(40), TEXT_BG).dim();
    }
    for (dx, dy) in shape.occupied() {
        let px = x + dx as u16 * 2;
        let py = y + (dy - top) as u16;
        fb.put_str(px, py, "██", style);
    }
    (bottom - top + 1) as u16
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
    hint: Option<&str>,
) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), TEXT_BG).bold();
    let mid_y = start_y.saturating_add(frame_h / 2);
    for (i, line) in std::iter::once(text).chain(hint).enumerate() {
        let w = line.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);
        fb.put_str(x, mid_y + i as u16, line, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameController;

    fn find_text(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| {
            let row: Vec<char> = fb.row_text(y).chars().collect();
            let pat: Vec<char> = needle.chars().collect();
            row.windows(pat.len())
                .position(|w| w == pat.as_slice())
                .map(|x| (x as u16, y))
        })
    }

    #[test]
    fn draws_border_and_panels() {
        let game = GameController::new(1);
        let view = GameView::default();
        let fb = view.render(&game.snapshot(), view.min_viewport());

        for label in ["HOLD", "SCORE", "LEVEL", "LINES", "NEXT"] {
            assert!(find_text(&fb, label).is_some(), "missing {label}");
        }
        assert_eq!(fb.get(12 + 2, 0).map(|c| c.ch), Some('┌'));
    }

    #[test]
    fn min_viewport_fits_frame() {
        let view = GameView::default();
        assert_eq!(view.frame_size(), (22, 22));
        assert_eq!(view.min_viewport(), Viewport::new(50, 22));
    }

    #[test]
    fn locked_cells_use_piece_colors() {
        let mut snap = GameSnapshot::default();
        snap.board[39][0] = Some(PieceKind::T);
        snap.current.y = 0; // keep the live piece out of the visible window
        snap.ghost.y = 0;
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let vp = view.min_viewport();
        let fb = view.render(&snap, vp);

        let (frame_w, _) = view.frame_size();
        let start_x = (vp.width - frame_w) / 2;
        let cell = fb.get(start_x + 1, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::T));
    }

    #[test]
    fn hidden_rows_are_not_drawn() {
        let mut snap = GameSnapshot::default();
        snap.board[5][3] = Some(PieceKind::Z);
        snap.current.y = 0;
        snap.ghost.y = 0;
        let view = GameView::default();
        let fb = view.render(&snap, view.min_viewport());
        let red = piece_color(PieceKind::Z);
        assert!(fb.cells().iter().all(|c| c.style.fg != red));
    }

    #[test]
    fn overlays_follow_state() {
        let view = GameView::default();
        let mut snap = GameSnapshot::default();
        snap.paused = true;
        let fb = view.render(&snap, view.min_viewport());
        assert!(find_text(&fb, "PAUSED").is_some());

        snap.paused = false;
        snap.game_over = true;
        let fb = view.render(&snap, view.min_viewport());
        assert!(find_text(&fb, "GAME OVER").is_some());
        assert!(find_text(&fb, "R to restart").is_some());
    }

    #[test]
    fn score_is_printed() {
        let mut snap = GameSnapshot::default();
        snap.score = 2400;
        let view = GameView::default();
        let fb = view.render(&snap, view.min_viewport());
        assert!(find_text(&fb, "2400").is_some());
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }

    #[test]
    fn mini_piece_rows() {
        let mut fb = FrameBuffer::new(10, 4);
        assert_eq!(draw_mini_piece(&mut fb, 0, 0, PieceKind::I, false), 1);
        assert_eq!(draw_mini_piece(&mut fb, 0, 0, PieceKind::T, false), 2);
        assert_eq!(draw_mini_piece(&mut fb, 0, 0, PieceKind::O, false), 2);
    }
}
