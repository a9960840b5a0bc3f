//! Frame preprocessing: resample to the canonical size, then BT.601 grayscale.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};
use thiserror::Error;

use crate::camera::{Frame, Resolution};

/// Errors raised while turning a frame into a sample.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("frame buffer holds {actual} bytes, expected {expected} for {resolution}")]
    BufferMismatch {
        resolution: Resolution,
        expected: usize,
        actual: usize,
    },

    #[error("cannot resample to an empty {0} target")]
    EmptyTarget(Resolution),
}

/// A preprocessed grayscale image at canonical dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub width: u32,
    pub height: u32,
    /// One byte per pixel, row-major
    pub pixels: Vec<u8>,
}

impl Sample {
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Re-expand to a 3-channel frame so it can be shown like a camera frame.
    pub fn to_rgb_frame(&self) -> Frame {
        let mut data = Vec::with_capacity(self.pixels.len() * 3);
        for &y in &self.pixels {
            data.extend_from_slice(&[y, y, y]);
        }
        Frame::from_rgb(data, self.width, self.height)
    }
}

/// Turn a camera frame into a canonical grayscale sample.
///
/// Frames whose size differs from `canonical` are resampled first; the
/// exact filter is not part of the contract, only the output size is.
pub fn preprocess(frame: &Frame, canonical: Resolution) -> Result<Sample, PreprocessError> {
    if canonical.pixel_count() == 0 {
        return Err(PreprocessError::EmptyTarget(canonical));
    }

    let expected = frame.expected_len();
    if expected == 0 || frame.data.len() != expected {
        return Err(PreprocessError::BufferMismatch {
            resolution: frame.resolution(),
            expected,
            actual: frame.data.len(),
        });
    }

    let pixels = if frame.resolution() == canonical {
        to_grayscale(&frame.data)
    } else {
        let view: ImageBuffer<Rgb<u8>, &[u8]> =
            ImageBuffer::from_raw(frame.width, frame.height, frame.data.as_slice()).ok_or(
                PreprocessError::BufferMismatch {
                    resolution: frame.resolution(),
                    expected,
                    actual: frame.data.len(),
                },
            )?;
        let resized = imageops::resize(&view, canonical.width, canonical.height, FilterType::Triangle);
        to_grayscale(resized.as_raw())
    };

    Ok(Sample {
        width: canonical.width,
        height: canonical.height,
        pixels,
    })
}

/// Convert packed RGB bytes to luma with the ITU-R BT.601 weights.
///
/// Coefficients are scaled by 1000 so the hot path stays in integers:
/// Y = (299*R + 587*G + 114*B) / 1000
pub fn to_grayscale(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3).map(|px| luma(px[0], px[1], px[2])).collect()
}

/// BT.601 luma of one pixel.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}
