//! Terminal display surface: screen takeover, screen composition, key
//! polling, and a log target that stays off the screen while it is taken.

mod log_sink;
mod raw_mode;
mod rendering;
mod surface;

pub use log_sink::DeferredStderr;
pub use raw_mode::ScreenGuard;
pub use rendering::{compose, Canvas, RenderBuffers};
pub use surface::TerminalSurface;
