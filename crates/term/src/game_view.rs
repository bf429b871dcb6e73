//! GameView: maps a `GameSnapshot` and the play phase into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell, PlayPhase, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

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

/// Columns reserved for the score / next-piece panel.
const PANEL_W: u16 = 14;
/// Gap between the play field frame and the panel.
const PANEL_GAP: u16 = 2;
/// Widest board cell, in terminal columns.
pub const MAX_CELL_W: u16 = 4;

const FIELD_BG: Rgb = Rgb::new(25, 25, 35);
const TEXT: Style = Style::fg(Rgb::new(255, 255, 255));
const LABEL: Style = Style::fg(Rgb::new(220, 220, 220));
const BORDER: Style = Style::fg(Rgb::new(255, 255, 255));
const EMPTY_CELL: Style = Style::fg(Rgb::new(70, 70, 85)).on(FIELD_BG);

/// Display colour for a board cell value.
pub fn cell_color(cell: Cell) -> Option<Rgb> {
    match cell {
        1 => Some(Rgb::new(0, 220, 220)),  // cyan
        2 => Some(Rgb::new(60, 90, 230)),  // blue
        3 => Some(Rgb::new(255, 150, 0)),  // orange
        4 => Some(Rgb::new(240, 220, 40)), // yellow
        5 => Some(Rgb::new(70, 200, 80)),  // green
        6 => Some(Rgb::new(170, 70, 200)), // purple
        7 => Some(Rgb::new(220, 50, 50)),  // red
        _ => None,
    }
}

/// Terminal presenter for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Cell width is clamped to `1..=MAX_CELL_W`.
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
        }
    }

    /// Width of the bordered play field in terminal columns
    pub fn frame_width(&self) -> u16 {
        BOARD_WIDTH as u16 * self.cell_w + 2
    }

    /// Height of the bordered play field in terminal rows
    pub fn frame_height(&self) -> u16 {
        BOARD_HEIGHT as u16 + 2
    }

    pub fn render(&self, phase: PlayPhase, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(phase, snap, viewport, &mut fb);
        fb
    }

    /// Render into a reused framebuffer.
    pub fn render_into(
        &self,
        phase: PlayPhase,
        snap: &GameSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.reset(viewport.width, viewport.height);
        let mid = viewport.height / 2;

        match phase {
            PlayPhase::NotStarted => {
                fb.put_str_centered(mid, "Press ENTER to Start", TEXT.bold());
            }
            PlayPhase::Playing => self.draw_main(fb, snap, viewport),
            PlayPhase::Paused => {
                self.draw_main(fb, snap, viewport);
                let msg = " Press ENTER to Resume ";
                fb.put_str_centered(mid, msg, TEXT.bold());
            }
            PlayPhase::GameOver => {
                fb.put_str_centered(mid.saturating_sub(2), "GAME OVER", TEXT.bold());
                fb.put_str_centered(mid, &format!("Score: {}", snap.score), TEXT);
                fb.put_str_centered(mid.saturating_add(2), "Press ENTER to Restart", TEXT);
            }
        }
    }

    fn draw_main(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let frame_w = self.frame_width();
        let frame_h = self.frame_height();

        let total_w = frame_w + PANEL_GAP + PANEL_W;
        let start_x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let px = start_x + 1 + x as u16 * self.cell_w;
                let py = start_y + 1 + y as u16;
                self.draw_cell(fb, px, py, cell, true);
            }
        }

        let panel_x = start_x + frame_w + PANEL_GAP;
        if panel_x + PANEL_W <= viewport.width {
            self.draw_panel(fb, snap, panel_x, start_y);
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, px: u16, py: u16, cell: Cell, show_empty: bool) {
        match cell_color(cell) {
            Some(fg) => fb.fill_rect(px, py, self.cell_w, 1, '█', Style::fg(fg).on(FIELD_BG)),
            None if show_empty => {
                fb.fill_rect(px, py, self.cell_w, 1, ' ', EMPTY_CELL);
                fb.put(px, py, '·', EMPTY_CELL);
            }
            None => {}
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        fb.put(x, y, '┌', BORDER);
        fb.put(x + w - 1, y, '┐', BORDER);
        fb.put(x, y + h - 1, '└', BORDER);
        fb.put(x + w - 1, y + h - 1, '┘', BORDER);

        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', BORDER);
            fb.put(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', BORDER);
            fb.put(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        fb.put_str(x, y, &format!("Score: {}", snap.score), LABEL);
        fb.put_str(x, y + 1, &format!("Lines: {}", snap.lines), LABEL);
        fb.put_str(x, y + 2, &format!("Level: {}", snap.level), LABEL);
        fb.put_str(x, y + 4, "Next:", LABEL.bold());

        // Skip the empty top row every catalog shape has in spawn orientation.
        let rows = snap
            .next_shape
            .rows()
            .skip_while(|row| row.iter().all(|&c| c == EMPTY));
        for (dy, row) in rows.enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                let px = x + dx as u16 * self.cell_w;
                self.draw_cell(fb, px, y + 6 + dy as u16, cell, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_every_color_id() {
        for id in 1..=7 {
            assert!(cell_color(id).is_some());
        }
        assert!(cell_color(0).is_none());
        assert!(cell_color(8).is_none());
    }

    #[test]
    fn frame_size_for_default_cells() {
        let view = GameView::default();
        assert_eq!(view.frame_width(), 22);
        assert_eq!(view.frame_height(), 22);
    }

    #[test]
    fn cell_width_is_clamped() {
        assert_eq!(GameView::new(0).frame_width(), 12);
        assert_eq!(GameView::new(3).frame_width(), 32);
        assert_eq!(GameView::new(u16::MAX).frame_width(), 10 * MAX_CELL_W + 2);
    }

    #[test]
    fn huge_cell_width_renders_without_overflow() {
        let snap = crate::core::GameSession::new(1).snapshot();
        let view = GameView::new(u16::MAX);
        let fb = view.render(PlayPhase::Playing, &snap, Viewport::new(80, 24));
        assert_eq!(fb.width(), 80);
        // 42-wide frame plus gap and panel is 58 columns, centred in 80.
        assert_eq!(fb.get(11, 1).map(|g| g.ch), Some('┌'));
        assert_eq!(fb.get(52, 1).map(|g| g.ch), Some('┐'));
    }
}
