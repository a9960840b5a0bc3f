//! Blocking nokhwa-backed camera handle.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;

use super::device::list_devices;
use super::frame_utils::{convert_to_rgb, mirror_horizontal};
use super::types::{CameraError, CameraSettings, Frame, Resolution};
use super::FrameSource;

/// An open camera with a running stream.
///
/// Frames are read synchronously on the caller's thread. The stream is
/// stopped when the handle is dropped, so holding the value is holding the
/// device.
pub struct NokhwaCamera {
    camera: Camera,
    settings: CameraSettings,
}

impl std::fmt::Debug for NokhwaCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NokhwaCamera")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl NokhwaCamera {
    /// Open the camera at `settings.device_index` and start streaming.
    ///
    /// # Errors
    /// * `CameraError::DeviceNotFound` - no device with that index
    /// * `CameraError::PermissionDenied` - the OS refused camera access
    /// * `CameraError::OpenFailed` - every format fallback was rejected
    /// * `CameraError::StreamFailed` - the device opened but would not stream
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        for device in &devices {
            log::debug!("Found camera {}", device);
        }
        if !devices.iter().any(|d| d.index == settings.device_index) {
            return Err(CameraError::DeviceNotFound(settings.device_index));
        }

        let index = CameraIndex::Index(settings.device_index);
        let mut camera = open_camera_with_fallback(&index, &settings)?;
        camera
            .open_stream()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;

        let res = camera.resolution();
        let actual_resolution = Resolution::new(res.width(), res.height());
        let actual_fps = camera.frame_rate();
        log::info!(
            "Camera {} streaming at {} @ {} fps",
            settings.device_index,
            actual_resolution,
            actual_fps
        );

        Ok(Self { camera, settings })
    }
}

impl FrameSource for NokhwaCamera {
    fn read(&mut self) -> Result<Frame, CameraError> {
        let raw = self
            .camera
            .frame()
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;
        let mut frame = convert_to_rgb(&raw)?;
        if self.settings.mirror {
            mirror_horizontal(&mut frame);
        }
        Ok(frame)
    }
}

impl Drop for NokhwaCamera {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("Failed to stop camera stream: {}", e);
        }
        log::info!("Camera {} released", self.settings.device_index);
    }
}

/// Try the requested size with NV12, then MJPEG, then whatever the device
/// offers at its highest resolution.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let requested = nokhwa::utils::Resolution::new(
        settings.resolution.width,
        settings.resolution.height,
    );
    let format_attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested,
            NokhwaFrameFormat::NV12,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;
    for format in format_attempts {
        match Camera::new(index.clone(), format) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("Camera format rejected: {}", e);
                last_error = Some(e);
            }
        }
    }

    let msg = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no usable format".to_string());
    Err(classify_open_error(&msg))
}

/// Map a backend error message to a permission error when it looks like one.
fn classify_open_error(msg: &str) -> CameraError {
    let lower = msg.to_lowercase();
    if lower.contains("permission")
        || lower.contains("denied")
        || lower.contains("authorization")
        || lower.contains("access")
    {
        CameraError::PermissionDenied
    } else {
        CameraError::OpenFailed(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_permission_messages() {
        assert!(matches!(
            classify_open_error("Access denied by user"),
            CameraError::PermissionDenied
        ));
        assert!(matches!(
            classify_open_error("AVFoundation authorization missing"),
            CameraError::PermissionDenied
        ));
    }

    #[test]
    fn test_classify_other_messages() {
        match classify_open_error("device busy") {
            CameraError::OpenFailed(msg) => assert_eq!(msg, "device busy"),
            other => panic!("Expected OpenFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_open_invalid_device() {
        let settings = CameraSettings {
            device_index: 999,
            ..CameraSettings::default()
        };
        match NokhwaCamera::open(settings) {
            Err(CameraError::DeviceNotFound(idx)) => assert_eq!(idx, 999),
            // Backends without device enumeration report a query failure instead.
            Err(CameraError::QueryFailed(_)) => {}
            other => panic!("Expected DeviceNotFound, got {:?}", other.map(|_| ())),
        }
    }
}
