//! Pointer-capture abstraction: the request/release device and the
//! capture-change notification channel.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use thiserror::Error;

/// Reasons a platform refuses a capture request.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// The platform rejected the request (bad timing, permissions, or a
    /// request not coupled to a user gesture).
    #[error("platform refused pointer capture: {0}")]
    Refused(String),
    /// Pointer capture does not exist on this platform.
    #[error("pointer capture not supported on this platform")]
    Unsupported,
}

/// Result of a capture request.
///
/// Some platforms (browsers) only confirm acquisition asynchronously;
/// they answer `Pending` and the real result arrives through the change
/// signal later.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    Granted,
    Pending,
    Denied(CaptureError),
}

/// Platform pointer-capture capability.
pub trait CaptureDevice {
    /// Ask the platform for exclusive pointer capture.
    fn request_capture(&mut self) -> CaptureOutcome;

    /// Give capture back to the platform.
    fn release_capture(&mut self);

    /// Whether capture is currently held.
    fn is_captured(&self) -> bool;
}

#[derive(Default)]
struct SignalShared {
    queue: RefCell<VecDeque<bool>>,
    subscribed: Cell<bool>,
}

/// Single-consumer notification source for capture-ownership changes.
///
/// The platform side pushes "held / not held" transitions with
/// [`CaptureSignal::notify`]; the one live subscriber drains them in
/// order. Duplicate notifications are legal; consumers must treat them
/// idempotently.
#[derive(Clone, Default)]
pub struct CaptureSignal {
    shared: Rc<SignalShared>,
}

impl CaptureSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that capture ownership changed. No payload beyond the new
    /// ownership: the consumer decides what to do with it.
    pub fn notify(&self, held: bool) {
        self.shared.queue.borrow_mut().push_back(held);
    }

    /// Claim the consumer end of the signal.
    ///
    /// At most one subscription may be live at a time; while one exists
    /// this returns `None`. Dropping the subscription frees the slot.
    pub fn subscribe(&self) -> Option<CaptureSubscription> {
        if self.shared.subscribed.get() {
            return None;
        }
        self.shared.subscribed.set(true);
        Some(CaptureSubscription {
            shared: Rc::clone(&self.shared),
        })
    }
}

/// The consumer end of a [`CaptureSignal`]. Released on drop.
pub struct CaptureSubscription {
    shared: Rc<SignalShared>,
}

impl CaptureSubscription {
    /// Pop the oldest pending change, if any.
    pub fn poll(&mut self) -> Option<bool> {
        self.shared.queue.borrow_mut().pop_front()
    }
}

impl Drop for CaptureSubscription {
    fn drop(&mut self) {
        self.shared.subscribed.set(false);
    }
}
