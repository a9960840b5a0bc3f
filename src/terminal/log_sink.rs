//! Log output that stays off the preview.
//!
//! While the screen is taken over, log records are held in memory and
//! written to stderr once the terminal has been given back.

use std::io::{self, Write};
use std::sync::atomic::Ordering;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::raw_mode::SCREEN_ACTIVE;

static HELD: Mutex<Vec<u8>> = Mutex::new(Vec::new());

/// `env_logger` target: stderr, deferred while the screen is active.
#[derive(Debug, Default)]
pub struct DeferredStderr;

impl Write for DeferredStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let active = SCREEN_ACTIVE.load(Ordering::SeqCst);
        write_or_hold(active, buf, &mut held(), &mut io::stderr())
    }

    fn flush(&mut self) -> io::Result<()> {
        if SCREEN_ACTIVE.load(Ordering::SeqCst) {
            return Ok(());
        }
        io::stderr().flush()
    }
}

/// Write out everything held while the screen was active.
pub fn release_held_logs() {
    let _ = drain_into(&mut held(), &mut io::stderr());
}

fn held() -> MutexGuard<'static, Vec<u8>> {
    HELD.lock().unwrap_or_else(PoisonError::into_inner)
}

fn write_or_hold(
    active: bool,
    buf: &[u8],
    held: &mut Vec<u8>,
    out: &mut dyn Write,
) -> io::Result<usize> {
    if active {
        held.extend_from_slice(buf);
        return Ok(buf.len());
    }
    // Anything still held goes first so records stay in order.
    drain_into(held, out)?;
    out.write(buf)
}

fn drain_into(held: &mut Vec<u8>, out: &mut dyn Write) -> io::Result<()> {
    if held.is_empty() {
        return Ok(());
    }
    out.write_all(held)?;
    held.clear();
    out.flush()
}
