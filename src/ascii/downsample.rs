//! Cell averaging from an RGB frame down to a character grid.

use crate::camera::Frame;
use crate::preprocess;

/// Average color of one character cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CellColor {
    /// BT.601 luma of this color.
    pub fn luma(&self) -> u8 {
        preprocess::luma(self.r, self.g, self.b)
    }
}

/// Average each cell of a `cols` x `rows` grid laid over `frame`.
///
/// Cells are filled into `buffer` in row-major order; the buffer is cleared
/// first so it can be reused across frames. Cells that cover no pixels (grid
/// larger than the frame) come out black.
pub fn downsample_colors_into(
    frame: &Frame,
    cols: u16,
    rows: u16,
    buffer: &mut Vec<CellColor>,
) -> usize {
    buffer.clear();

    let img_width = frame.width;
    let img_height = frame.height;
    if cols == 0 || rows == 0 || img_width == 0 || img_height == 0 || frame.data.is_empty() {
        return 0;
    }

    let bpp = Frame::BYTES_PER_PIXEL;
    let output_size = cols as usize * rows as usize;
    buffer.reserve(output_size);

    let cell_w = img_width as f32 / cols as f32;
    let cell_h = img_height as f32 / rows as f32;

    for cy in 0..rows {
        let start_y = (cy as f32 * cell_h) as u32;
        let end_y = (((cy + 1) as f32 * cell_h) as u32).min(img_height);
        for cx in 0..cols {
            let start_x = (cx as f32 * cell_w) as u32;
            let end_x = (((cx + 1) as f32 * cell_w) as u32).min(img_width);

            let (mut r, mut g, mut b, mut count) = (0u32, 0u32, 0u32, 0u32);
            for py in start_y..end_y {
                for px in start_x..end_x {
                    let idx = (py as usize * img_width as usize + px as usize) * bpp;
                    if let Some(rgb) = frame.data.get(idx..idx + 3) {
                        r += rgb[0] as u32;
                        g += rgb[1] as u32;
                        b += rgb[2] as u32;
                        count += 1;
                    }
                }
            }

            buffer.push(if count > 0 {
                CellColor {
                    r: (r / count) as u8,
                    g: (g / count) as u8,
                    b: (b / count) as u8,
                }
            } else {
                CellColor::default()
            });
        }
    }

    output_size
}
