//! Interactive capture session.
//!
//! One thread, one loop: read a frame, render it with a status overlay,
//! poll a single key, apply it. The camera is opened before anything else
//! so a missing camera leaves the dataset tree and the terminal untouched.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::KeyEvent;
use thiserror::Error;

use crate::camera::{CameraError, Frame, FrameSource, Resolution};
use crate::dataset::{DatasetError, DatasetStore, SavedSample, Summary};
use crate::gesture::GestureClass;
use crate::input::{action_for_key, Action};
use crate::preprocess::preprocess;

/// Title shown above the preview.
pub const WINDOW_TITLE: &str = "Gesture Dataset Collector";

/// Control hints shown at the bottom of the preview.
pub const CONTROLS_HINT: &str = "SPACE: Capture | 0-5: Class | P: Preview | Q: Quit";

/// Errors from the display surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Fatal errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Where frames are shown and keys are read from.
pub trait Surface {
    /// Draw `frame` with `overlay` on top.
    fn show(&mut self, title: &str, frame: &Frame, overlay: &Overlay) -> Result<(), SurfaceError>;

    /// Wait up to `timeout` for one key press.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>, SurfaceError>;

    /// Tear the surface down. Called once when the loop ends.
    fn close(&mut self) -> Result<(), SurfaceError>;
}

/// Status text drawn over the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub class: GestureClass,
    /// Raw files already stored for `class`
    pub sample_count: usize,
    pub preview: bool,
    /// Last operator-facing message (saved path, class change, ...)
    pub message: Option<String>,
}

impl Overlay {
    /// Lines for the top-left corner.
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Gesture: {}", self.class.label()),
            format!("Samples: {}", self.sample_count),
        ];
        if let Some(msg) = &self.message {
            lines.push(msg.clone());
        }
        lines
    }

    /// Indicator for the top-right corner, if any.
    pub fn mode_indicator(&self) -> Option<&'static str> {
        self.preview.then_some("PREVIEW MODE")
    }

    pub fn controls_hint(&self) -> &'static str {
        CONTROLS_HINT
    }
}

/// Mutable state of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_class: GestureClass,
    pub preview: bool,
}

/// What the loop must do after a key has been applied to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Capture,
    Quit,
}

impl SessionState {
    /// Apply an action. Capture and quit leave the state unchanged.
    pub fn apply(&mut self, action: Action) -> Step {
        match action {
            Action::SelectClass(class) => {
                self.current_class = class;
                Step::Continue
            }
            Action::TogglePreview => {
                self.preview = !self.preview;
                Step::Continue
            }
            Action::Capture => Step::Capture,
            Action::Quit => Step::Quit,
        }
    }
}

/// How the loop ended.
#[derive(Debug)]
pub enum Outcome {
    /// Operator pressed the quit key
    Quit,
    /// SIGINT/SIGTERM arrived
    Interrupted,
    /// The camera stopped delivering frames
    CameraLost(CameraError),
    /// The camera never opened; nothing else was touched
    CameraUnavailable(CameraError),
}

/// Result of a finished session.
#[derive(Debug)]
pub struct SessionReport {
    pub outcome: Outcome,
    /// Samples written during this session, in order
    pub saved: Vec<SavedSample>,
    /// End-of-session tally; `None` when the camera never opened
    pub summary: Option<Summary>,
}

/// Session settings resolved from CLI and config.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub dataset_root: PathBuf,
    pub canonical: Resolution,
    pub poll_timeout: Duration,
}

/// Drives a capture session.
pub struct Collector {
    config: CollectorConfig,
    stop: Option<&'static AtomicBool>,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config, stop: None }
    }

    /// Also end the loop when `flag` becomes true.
    pub fn with_stop_flag(mut self, flag: &'static AtomicBool) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Run a full session.
    ///
    /// Order: open camera, init dataset tree, open surface, loop, release
    /// camera, close surface, summarize. A camera-open failure returns
    /// early with [`Outcome::CameraUnavailable`] before any side effect.
    pub fn run<C, S>(
        &self,
        open_camera: impl FnOnce() -> Result<C, CameraError>,
        open_surface: impl FnOnce() -> Result<S, SurfaceError>,
    ) -> Result<SessionReport, SessionError>
    where
        C: FrameSource,
        S: Surface,
    {
        let mut camera = match open_camera() {
            Ok(camera) => camera,
            Err(e) => {
                log::error!("Could not open camera: {}", e);
                return Ok(SessionReport {
                    outcome: Outcome::CameraUnavailable(e),
                    saved: Vec::new(),
                    summary: None,
                });
            }
        };

        let store = DatasetStore::init(&self.config.dataset_root)?;
        let mut surface = open_surface()?;

        let mut saved = Vec::new();
        let result = self.event_loop(&mut camera, &mut surface, &store, &mut saved);

        drop(camera);
        let closed = surface.close();
        let outcome = result?;
        closed?;

        let summary = store.summary()?;
        Ok(SessionReport {
            outcome,
            saved,
            summary: Some(summary),
        })
    }

    fn event_loop(
        &self,
        camera: &mut impl FrameSource,
        surface: &mut impl Surface,
        store: &DatasetStore,
        saved: &mut Vec<SavedSample>,
    ) -> Result<Outcome, SessionError> {
        let canonical = self.config.canonical;
        let mut state = SessionState::default();
        let mut message = None;

        loop {
            if self.stop_requested() {
                log::info!("Stop requested");
                return Ok(Outcome::Interrupted);
            }

            let frame = match camera.read() {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Camera read failed: {}", e);
                    return Ok(Outcome::CameraLost(e));
                }
            };

            let preview_frame = if state.preview {
                match preprocess(&frame, canonical) {
                    Ok(sample) => Some(sample.to_rgb_frame()),
                    Err(e) => {
                        log::warn!("Preview preprocessing failed: {}", e);
                        None
                    }
                }
            } else {
                None
            };
            let display = preview_frame.as_ref().unwrap_or(&frame);

            let overlay = Overlay {
                class: state.current_class,
                sample_count: store.sample_count(state.current_class)?,
                preview: state.preview,
                message: message.clone(),
            };
            surface.show(WINDOW_TITLE, display, &overlay)?;

            let Some(key) = surface.poll_key(self.config.poll_timeout)? else {
                continue;
            };
            let Some(action) = action_for_key(key) else {
                continue;
            };

            match state.apply(action) {
                Step::Continue => {
                    let text = match action {
                        Action::SelectClass(class) => format!("Selected gesture class: {}", class),
                        _ => format!("Preview mode: {}", if state.preview { "ON" } else { "OFF" }),
                    };
                    log::info!("{}", text);
                    message = Some(text);
                }
                Step::Capture => match preprocess(&frame, canonical) {
                    Ok(sample) => {
                        let entry = store.save_sample(&sample, state.current_class)?;
                        message = Some(format!("Saved: {}", entry.raw_path.display()));
                        saved.push(entry);
                    }
                    Err(e) => {
                        log::warn!("Frame not saved: {}", e);
                        message = Some(format!("Capture failed: {}", e));
                    }
                },
                Step::Quit => {
                    log::info!("Quitting");
                    return Ok(Outcome::Quit);
                }
            }
        }
    }

    fn stop_requested(&self) -> bool {
        self.stop.is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults() {
        let state = SessionState::default();
        assert_eq!(state.current_class, GestureClass::Zero);
        assert!(!state.preview);
    }

    #[test]
    fn test_select_class() {
        let mut state = SessionState::default();
        assert_eq!(
            state.apply(Action::SelectClass(GestureClass::Four)),
            Step::Continue
        );
        assert_eq!(state.current_class, GestureClass::Four);
        assert!(!state.preview);
    }

    #[test]
    fn test_toggle_preview_flips() {
        let mut state = SessionState::default();
        state.apply(Action::TogglePreview);
        assert!(state.preview);
        state.apply(Action::TogglePreview);
        assert!(!state.preview);
    }

    #[test]
    fn test_capture_and_quit_leave_state_alone() {
        let mut state = SessionState {
            current_class: GestureClass::Two,
            preview: true,
        };
        let before = state;
        assert_eq!(state.apply(Action::Capture), Step::Capture);
        assert_eq!(state.apply(Action::Quit), Step::Quit);
        assert_eq!(state, before);
    }

    #[test]
    fn test_overlay_lines() {
        let overlay = Overlay {
            class: GestureClass::Three,
            sample_count: 7,
            preview: false,
            message: None,
        };
        assert_eq!(
            overlay.status_lines(),
            vec!["Gesture: 3_fingers".to_string(), "Samples: 7".to_string()]
        );
        assert_eq!(overlay.mode_indicator(), None);
    }

    #[test]
    fn test_overlay_preview_indicator_and_message() {
        let overlay = Overlay {
            class: GestureClass::Zero,
            sample_count: 0,
            preview: true,
            message: Some("Preview mode: ON".to_string()),
        };
        assert_eq!(overlay.mode_indicator(), Some("PREVIEW MODE"));
        assert_eq!(overlay.status_lines().len(), 3);
        assert!(overlay.controls_hint().contains("SPACE: Capture"));
    }
}
