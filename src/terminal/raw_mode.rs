//! Raw mode + alternate screen management with panic-safe cleanup.

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use super::log_sink::release_held_logs;

/// Tracks whether the screen is taken over (read by the panic hook).
pub(crate) static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that owns the terminal while the preview is up.
///
/// Entering switches to raw mode and the alternate screen and hides the
/// cursor; leaving (explicitly or on drop) undoes all three.
pub struct ScreenGuard {
    active: bool,
}

impl ScreenGuard {
    /// Take over the terminal.
    ///
    /// # Errors
    /// Returns an error if stdout is not a terminal or raw mode is refused.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            restore_terminal();
            return Err(e);
        }

        Ok(Self { active: true })
    }

    /// Give the terminal back. Later calls and the drop are no-ops.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        SCREEN_ACTIVE.store(false, Ordering::SeqCst);
        execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        release_held_logs();
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            restore_terminal();
        }
    }
}

/// Best-effort restore, errors ignored.
fn restore_terminal() {
    SCREEN_ACTIVE.store(false, Ordering::SeqCst);
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    release_held_logs();
}

/// Install (once) a panic hook that restores the terminal before the
/// panic message is printed.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if SCREEN_ACTIVE.load(Ordering::SeqCst) {
            restore_terminal();
        }
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_guard_enter_and_exit() {
        // Needs a real TTY; CI runs without one.
        match ScreenGuard::enter() {
            Ok(mut guard) => {
                assert!(guard.is_active());
                guard.exit().expect("Should leave the alternate screen");
                assert!(!guard.is_active());
                assert!(!SCREEN_ACTIVE.load(Ordering::SeqCst));
                guard.exit().expect("Second exit is a no-op");
            }
            Err(e) => eprintln!("Skipping test (no TTY): {}", e),
        }
    }

    #[test]
    fn test_panic_hook_installation_is_idempotent() {
        install_panic_hook();
        install_panic_hook();
    }
}
