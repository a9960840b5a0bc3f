//! Terminal implementation of the preview surface.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use super::raw_mode::ScreenGuard;
use super::rendering::{compose, RenderBuffers};
use crate::camera::Frame;
use crate::session::{Overlay, Surface, SurfaceError};

/// Fallback when the terminal size cannot be queried.
const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Full-screen truecolor ASCII preview in the alternate screen.
pub struct TerminalSurface {
    guard: ScreenGuard,
    stdout: Stdout,
    buffers: RenderBuffers,
}

impl TerminalSurface {
    /// Switch the terminal into preview mode.
    pub fn open() -> Result<Self, SurfaceError> {
        let guard = ScreenGuard::enter()?;
        Ok(Self {
            guard,
            stdout: io::stdout(),
            buffers: RenderBuffers::default(),
        })
    }
}

impl Surface for TerminalSurface {
    fn show(&mut self, title: &str, frame: &Frame, overlay: &Overlay) -> Result<(), SurfaceError> {
        let (cols, rows) = crossterm::terminal::size().unwrap_or(DEFAULT_SIZE);
        let canvas = compose(frame, overlay, title, cols, rows, &mut self.buffers);
        self.stdout.write_all(canvas.to_ansi().as_bytes())?;
        self.stdout.flush()?;
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>, SurfaceError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(Some(key)),
            // Resizes are picked up on the next redraw; mouse/focus are ignored.
            _ => Ok(None),
        }
    }

    fn close(&mut self) -> Result<(), SurfaceError> {
        self.guard.exit()?;
        Ok(())
    }
}
