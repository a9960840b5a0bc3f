//! Fitting a frame into the terminal with character aspect correction.

/// Terminal cells are roughly twice as tall as they are wide.
pub const DEFAULT_CHAR_ASPECT_RATIO: f32 = 2.0;

/// Largest `(cols, rows)` grid inside `max_cols` x `max_rows` that shows an
/// `img_width` x `img_height` image without stretching.
pub fn fit_dimensions(img_width: u32, img_height: u32, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if img_width == 0 || img_height == 0 || max_cols == 0 || max_rows == 0 {
        return (0, 0);
    }

    let target_aspect = img_width as f32 / img_height as f32 * DEFAULT_CHAR_ASPECT_RATIO;

    let rows = (max_cols as f32 / target_aspect).round() as u16;
    if rows > 0 && rows <= max_rows {
        return (max_cols, rows);
    }

    let cols = ((max_rows as f32 * target_aspect).round() as u16).min(max_cols);
    (cols.max(1), max_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_terminal_is_height_bound() {
        // 4:3 image in a 200x40 terminal: 40 rows -> 40 * 4/3 * 2 = 107 cols
        assert_eq!(fit_dimensions(640, 480, 200, 40), (107, 40));
    }

    #[test]
    fn test_narrow_terminal_is_width_bound() {
        // 4:3 image in 80x100: 80 cols -> 80 / (4/3 * 2) = 30 rows
        assert_eq!(fit_dimensions(640, 480, 80, 100), (80, 30));
    }

    #[test]
    fn test_result_fits_bounds() {
        for (cols, rows) in [(80, 24), (120, 30), (10, 3), (300, 90)] {
            let (w, h) = fit_dimensions(1280, 720, cols, rows);
            assert!(w <= cols && h <= rows, "{w}x{h} exceeds {cols}x{rows}");
            assert!(w > 0 && h > 0);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(fit_dimensions(0, 480, 80, 24), (0, 0));
        assert_eq!(fit_dimensions(640, 480, 0, 24), (0, 0));
    }
}
