//! Ctrl+C / SIGTERM handling.
//!
//! In raw mode the terminal delivers Ctrl+C as a key, so this only fires
//! for signals from outside (kill, or Ctrl+C before the preview is up).

use std::sync::atomic::{AtomicBool, Ordering};

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Flag the capture loop polls once per frame.
pub fn stop_flag() -> &'static AtomicBool {
    &STOP_REQUESTED
}

/// Set up the signal handler. Call once at startup.
pub fn install_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        STOP_REQUESTED.store(true, Ordering::SeqCst);
    })
}
