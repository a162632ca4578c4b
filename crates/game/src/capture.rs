//! Window-backed pointer capture: winit cursor grab with the
//! Locked -> Confined fallback some platforms need.

use std::sync::Arc;

use menu::{CaptureDevice, CaptureError, CaptureOutcome, CaptureSignal};
use winit::window::{CursorGrabMode, Window};

/// [`CaptureDevice`] backed by the winit window's cursor grab.
///
/// Grab transitions are mirrored onto the capture signal so the menu
/// controller hears about them the same way it would hear about releases
/// it never initiated.
pub struct WindowCapture {
    window: Arc<Window>,
    signal: CaptureSignal,
    captured: bool,
}

impl WindowCapture {
    pub fn new(window: Arc<Window>, signal: CaptureSignal) -> Self {
        Self {
            window,
            signal,
            captured: false,
        }
    }

    /// Release the grab and raise the change notification. This is the
    /// platform-side release path (escape during play, focus loss).
    pub fn release_and_notify(&mut self) {
        self.release_capture();
        self.signal.notify(false);
    }
}

impl CaptureDevice for WindowCapture {
    fn request_capture(&mut self) -> CaptureOutcome {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.captured = true;
                self.signal.notify(true);
                CaptureOutcome::Granted
            }
            Err(e) => CaptureOutcome::Denied(CaptureError::Refused(e.to_string())),
        }
    }

    fn release_capture(&mut self) {
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.window.set_cursor_visible(true);
        self.captured = false;
    }

    fn is_captured(&self) -> bool {
        self.captured
    }
}
