//! Conversion from nokhwa buffers and in-place frame transforms.

use nokhwa::pixel_format::RgbFormat;

use super::types::{CameraError, Frame};

/// Decode a nokhwa buffer (MJPEG, YUYV, NV12, ...) into an RGB frame.
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Result<Frame, CameraError> {
    let decoded = buffer
        .decode_image::<RgbFormat>()
        .map_err(|e| CameraError::ReadFailed(format!("could not decode frame: {e}")))?;
    let resolution = buffer.resolution();

    Ok(Frame::from_rgb(
        decoded.into_raw(),
        resolution.width(),
        resolution.height(),
    ))
}

/// Flip a frame left-right.
pub fn mirror_horizontal(frame: &mut Frame) {
    let width = frame.width as usize;
    let bpp = Frame::BYTES_PER_PIXEL;
    let stride = width * bpp;
    if stride == 0 {
        return;
    }

    for row in frame.data.chunks_exact_mut(stride) {
        for x in 0..width / 2 {
            let left = x * bpp;
            let right = (width - 1 - x) * bpp;
            for i in 0..bpp {
                row.swap(left + i, right + i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_swaps_pixels_within_rows() {
        let mut frame = Frame::from_rgb(
            vec![
                1, 1, 1, 2, 2, 2, 3, 3, 3, //
                4, 4, 4, 5, 5, 5, 6, 6, 6,
            ],
            3,
            2,
        );
        mirror_horizontal(&mut frame);
        assert_eq!(
            frame.data,
            vec![
                3, 3, 3, 2, 2, 2, 1, 1, 1, //
                6, 6, 6, 5, 5, 5, 4, 4, 4,
            ]
        );
    }

    #[test]
    fn test_mirror_single_column_is_noop() {
        let mut frame = Frame::from_rgb(vec![7, 8, 9, 10, 11, 12], 1, 2);
        mirror_horizontal(&mut frame);
        assert_eq!(frame.data, vec![7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_mirror_empty_frame() {
        let mut frame = Frame::from_rgb(Vec::new(), 0, 0);
        mirror_horizontal(&mut frame);
        assert!(frame.data.is_empty());
    }
}
