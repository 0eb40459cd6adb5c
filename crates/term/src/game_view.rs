//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::Shape;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::GameStatus;

/// Piece colors in palette order (I, J, L, O, S, T, Z).
pub const PALETTE: [Rgb; 7] = [
    Rgb::new(0x00, 0xf0, 0xf0),
    Rgb::new(0x00, 0x00, 0xf0),
    Rgb::new(0xf0, 0xa0, 0x00),
    Rgb::new(0xf0, 0xf0, 0x00),
    Rgb::new(0x00, 0xf0, 0x00),
    Rgb::new(0xa0, 0x00, 0xf0),
    Rgb::new(0xf0, 0x00, 0x00),
];

const WELL_BG: Rgb = Rgb::new(0x1a, 0x1a, 0x1a);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Digits shown for the score.
pub const SCORE_DIGITS: usize = 6;

/// Color for a palette index; out-of-range indices render white.
pub fn piece_color(color_index: u8) -> Rgb {
    PALETTE
        .get(color_index as usize)
        .copied()
        .unwrap_or(Rgb::new(255, 255, 255))
}

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

/// Where the board frame sits vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen position of the board frame for one render pass.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two terminal columns per board cell.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    ///
    /// Callers reuse one framebuffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).cell(' '));

        let frame_w = snap.width as u16 * self.cell_w + 2;
        let frame_h = snap.height as u16 * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        let empty = CellStyle::new(Rgb::new(60, 60, 60), WELL_BG).dim();
        for y in 0..snap.height as u16 {
            for x in 0..snap.width as u16 {
                match snap.cell(x as usize, y as usize) {
                    0 => self.fill_cell(fb, frame, x, y, '·', empty),
                    v => self.draw_block(fb, frame, x, y, v - 1),
                }
            }
        }

        if let Some(active) = snap.active {
            for (dx, dy) in active.shape.cells() {
                let x = active.x + dx;
                let y = active.y + dy;
                if x >= 0 && (x as u8) < snap.width && y >= 0 && (y as u8) < snap.height {
                    self.draw_block(fb, frame, x as u16, y as u16, active.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.status {
            GameStatus::NotStarted => self.draw_overlay(fb, frame, &["PRESS SPACE"], None),
            GameStatus::Paused => self.draw_overlay(fb, frame, &["PAUSED"], None),
            GameStatus::GameOver => {
                self.draw_overlay(fb, frame, &["GAME OVER", "SCORE"], Some(snap.score))
            }
            GameStatus::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame, style: CellStyle) {
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(right, f.y, '┐', style);
        fb.put_char(f.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, color: u8) {
        let style = CellStyle::new(piece_color(color), WELL_BG).bold();
        self.fill_cell(fb, f, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = f.x + 1 + x * self.cell_w;
        let py = f.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = f.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32_padded(panel_x, y + 1, snap.score, SCORE_DIGITS, value);
        y += 3;

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x, y + 1, snap.level, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y + 1, &next.shape, next.color);
        }
    }

    /// Draw a shape's matrix with its top-left corner at `(x, y)`.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape, color: u8) {
        let style = CellStyle::new(piece_color(color), SCREEN_BG).bold();
        for (dx, dy) in shape.cells() {
            let px = x + dx as u16 * self.cell_w;
            let py = y + dy as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    /// Centered lines over the board; `score` is appended to the last line.
    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Frame, lines: &[&str], score: Option<u32>) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let top = (f.y + f.h / 2).saturating_sub(lines.len() as u16 / 2);

        for (i, text) in lines.iter().enumerate() {
            let is_last = i + 1 == lines.len();
            let mut text_w = text.chars().count() as u16;
            if is_last && score.is_some() {
                text_w += 1 + SCORE_DIGITS as u16;
            }

            let x = f.x + f.w.saturating_sub(text_w) / 2;
            let y = top + i as u16;
            let end = fb.put_str(x, y, text, style);
            if let (true, Some(score)) = (is_last, score) {
                fb.put_char(end, y, ' ', style);
                fb.put_u32_padded(end + 1, y, score, SCORE_DIGITS, style);
            }
        }
    }
}
