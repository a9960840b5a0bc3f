//! Composition of the preview screen: title, ASCII frame, status overlay
//! and control hints, serialized as one ANSI string per redraw.

use std::fmt::Write as _;

use crate::ascii::{self, CellColor};
use crate::camera::Frame;
use crate::session::Overlay;

const WHITE: CellColor = CellColor {
    r: 255,
    g: 255,
    b: 255,
};
const STATUS_GREEN: CellColor = CellColor { r: 0, g: 255, b: 0 };
const PREVIEW_YELLOW: CellColor = CellColor {
    r: 255,
    g: 255,
    b: 0,
};

/// Reusable scratch buffers so a redraw does not allocate per cell.
#[derive(Debug, Default)]
pub struct RenderBuffers {
    colors: Vec<CellColor>,
    luma: Vec<u8>,
    chars: Vec<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: CellColor,
}

const BLANK: Cell = Cell { ch: ' ', fg: WHITE };

/// A full-screen grid of colored characters.
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Write `text` starting at (`x`, `y`), clipped to the canvas.
    fn put_str(&mut self, x: u16, y: u16, text: &str, fg: CellColor) {
        if y >= self.rows {
            return;
        }
        let row_start = y as usize * self.cols as usize;
        for (i, ch) in text.chars().enumerate() {
            let cx = x as usize + i;
            if cx >= self.cols as usize {
                break;
            }
            self.cells[row_start + cx] = Cell { ch, fg };
        }
    }

    /// Plain text of row `y`, without colors or trailing spaces.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.rows {
            return String::new();
        }
        let start = y as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize]
            .iter()
            .map(|c| c.ch)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    /// Serialize with absolute cursor moves and truecolor escapes,
    /// emitting a color only when it changes.
    pub fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 4);
        let mut current: Option<CellColor> = None;

        for y in 0..self.rows {
            let _ = write!(out, "\x1b[{};1H", y + 1);
            let start = y as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if current != Some(cell.fg) {
                    let _ = write!(out, "\x1b[38;2;{};{};{}m", cell.fg.r, cell.fg.g, cell.fg.b);
                    current = Some(cell.fg);
                }
                out.push(cell.ch);
            }
        }
        out.push_str("\x1b[0m");
        out
    }
}

/// Lay out one screen: title on the first row, hints on the last, the
/// frame centered in between with the overlay drawn on top of it.
pub fn compose(
    frame: &Frame,
    overlay: &Overlay,
    title: &str,
    cols: u16,
    rows: u16,
    buffers: &mut RenderBuffers,
) -> Canvas {
    let mut canvas = Canvas::new(cols, rows);
    if cols == 0 || rows == 0 {
        return canvas;
    }

    canvas.put_str(0, 0, title, WHITE);
    if rows < 3 {
        return canvas;
    }

    let area_rows = rows - 2;
    let (img_cols, img_rows) = ascii::fit_dimensions(frame.width, frame.height, cols, area_rows);
    let x0 = (cols - img_cols) / 2;
    let y0 = 1 + (area_rows - img_rows) / 2;

    ascii::downsample_colors_into(frame, img_cols, img_rows, &mut buffers.colors);
    buffers.luma.clear();
    buffers.luma.extend(buffers.colors.iter().map(CellColor::luma));
    ascii::map_to_chars_into(&buffers.luma, ascii::STANDARD_CHARSET, &mut buffers.chars);

    for (i, (&ch, &fg)) in buffers.chars.iter().zip(&buffers.colors).enumerate() {
        let x = x0 as usize + i % img_cols as usize;
        let y = y0 as usize + i / img_cols as usize;
        canvas.cells[y * cols as usize + x] = Cell { ch, fg };
    }

    // Overlay sits inside the image's top-left corner, like a caption.
    for (i, line) in overlay.status_lines().iter().enumerate() {
        canvas.put_str(x0 + 1, y0 + i as u16, line, STATUS_GREEN);
    }
    if let Some(indicator) = overlay.mode_indicator() {
        let width = indicator.chars().count() as u16;
        let right = x0 + img_cols.max(width + 1);
        canvas.put_str(right.saturating_sub(width + 1), y0, indicator, PREVIEW_YELLOW);
    }

    canvas.put_str(0, rows - 1, overlay.controls_hint(), WHITE);
    canvas
}
