//! ASCII rendering of camera frames for the terminal preview.
//!
//! A frame is averaged down to a character grid (one color per cell), each
//! cell's luma picks a glyph from a density ramp, and the cell color is kept
//! for truecolor output.

mod dimensions;
mod downsample;
mod mapping;

pub use dimensions::fit_dimensions;
pub use downsample::{downsample_colors_into, CellColor};
pub use mapping::{map_to_chars_into, STANDARD_CHARSET};
