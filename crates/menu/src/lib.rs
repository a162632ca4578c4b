//! Menu overlay state for the walking experience.
//!
//! The controller in this crate reconciles three things that otherwise
//! drift apart: the visibility of the instructional overlay, the shared
//! menu/play game mode, and the platform's pointer-capture lifecycle
//! (which can release capture at any time outside the application's
//! control).

pub mod capture;
pub mod content;
pub mod controller;

pub use capture::{
    CaptureDevice, CaptureError, CaptureOutcome, CaptureSignal, CaptureSubscription,
};
pub use content::{ExternalLink, InstructionItem, MenuContent, ModalPresenter};
pub use controller::{CaptureTiming, MenuController, MenuPhase};
