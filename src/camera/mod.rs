//! Camera access for the collector.
//!
//! - A blocking camera handle via [`NokhwaCamera`], which checks the
//!   requested index against the enumerated devices before opening
//! - The [`FrameSource`] seam the capture loop reads from

mod capture;
mod device;
mod frame_utils;
mod types;

pub use capture::NokhwaCamera;
pub use types::{CameraError, CameraSettings, Frame, Resolution};

/// Something that hands out color frames, one per call.
///
/// The capture loop owns its source for the whole session; releasing the
/// device is the implementor's `Drop`.
pub trait FrameSource {
    /// Block until the next frame is available.
    ///
    /// An error means the stream is gone (disconnected or exhausted).
    fn read(&mut self) -> Result<Frame, CameraError>;
}
