//! Menu state controller.
//!
//! Keeps three pieces of state consistent as the player moves between
//! menu and play: the overlay's visibility, the shared [`GameMode`], and
//! pointer capture. Visibility and mode are flipped together in the two
//! handlers below; capture is acquired through a deferred request and
//! given up whenever the platform reports a release.

use engine_core::{GameMode, ModeHandle};

use crate::capture::{CaptureDevice, CaptureOutcome, CaptureSubscription};
use crate::content::{MenuContent, ModalPresenter};

/// Where the controller is in the menu/play cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPhase {
    /// Overlay visible, capture not held.
    Menu,
    /// Overlay hidden, mode is Play, capture requested but not confirmed.
    AwaitingCapture,
    /// Overlay hidden, capture held.
    Playing,
}

/// Timing knobs for capture acquisition.
#[derive(Debug, Clone, Copy)]
pub struct CaptureTiming {
    /// Delay in seconds between dismissing the overlay and the first
    /// capture request. Platforms reject requests that are not tightly
    /// coupled to a user gesture; by the time this elapses the dismissing
    /// gesture has been fully processed.
    pub safety_delay: f32,
    /// How long to wait on an asynchronous (`Pending`) grant before the
    /// attempt counts as denied.
    pub grant_timeout: f32,
    /// Wait between retries after a denial, scaled by the attempt number.
    pub retry_backoff: f32,
    /// Total request attempts before giving up and restoring the menu.
    pub max_attempts: u32,
}

impl Default for CaptureTiming {
    fn default() -> Self {
        Self {
            safety_delay: 0.5,
            grant_timeout: 2.0,
            retry_backoff: 0.75,
            max_attempts: 3,
        }
    }
}

/// In-flight acquisition bookkeeping.
#[derive(Debug, Clone, Copy)]
enum Acquisition {
    /// Counting down to the next request.
    Scheduled { remaining: f32, attempt: u32 },
    /// Request issued, platform answered `Pending`; waiting on the
    /// change signal under a timeout.
    AwaitingGrant { remaining: f32, attempt: u32 },
}

/// Reconciles overlay visibility, game mode, and pointer capture.
pub struct MenuController {
    phase: MenuPhase,
    /// Local to the controller; nobody else writes it.
    modal_open: bool,
    /// Set when `modal_open` changed since the last presenter sync.
    modal_dirty: bool,
    mode: ModeHandle,
    timing: CaptureTiming,
    acquisition: Option<Acquisition>,
    events: CaptureSubscription,
}

impl MenuController {
    /// New controller in the menu phase: overlay shown, mode set to Menu.
    ///
    /// Takes the consumer end of the capture signal; it is released when
    /// the controller is dropped, as is any pending capture request.
    pub fn new(mode: ModeHandle, timing: CaptureTiming, events: CaptureSubscription) -> Self {
        mode.set(GameMode::Menu);
        Self {
            phase: MenuPhase::Menu,
            modal_open: true,
            modal_dirty: true,
            mode,
            timing,
            acquisition: None,
            events,
        }
    }

    pub fn phase(&self) -> MenuPhase {
        self.phase
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// Play affordance activated, or the overlay dismissed by its own
    /// gesture; both arrive here. Hides the overlay, flips the mode to
    /// Play, and arms the deferred capture request. Never requests
    /// capture synchronously.
    pub fn on_play_requested(&mut self) {
        if self.phase != MenuPhase::Menu {
            log::debug!("play requested in {:?} phase, ignoring", self.phase);
            return;
        }
        self.set_modal_open(false);
        self.mode.set(GameMode::Play);
        self.phase = MenuPhase::AwaitingCapture;
        self.acquisition = Some(Acquisition::Scheduled {
            remaining: self.timing.safety_delay,
            attempt: 0,
        });
        log::info!(
            "menu dismissed; pointer capture in {:.0} ms",
            self.timing.safety_delay * 1000.0
        );
    }

    /// Drive the controller: drain capture notifications, then advance
    /// any in-flight acquisition. `dt` is the frame delta in seconds.
    pub fn update(&mut self, dt: f32, device: &mut dyn CaptureDevice) {
        while let Some(held) = self.events.poll() {
            self.on_capture_changed(held);
        }

        let Some(acquisition) = self.acquisition else {
            return;
        };
        match acquisition {
            Acquisition::Scheduled { remaining, attempt } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.acquisition = Some(Acquisition::Scheduled { remaining, attempt });
                    return;
                }
                match device.request_capture() {
                    CaptureOutcome::Granted => {
                        self.acquisition = None;
                        self.enter_playing();
                    }
                    CaptureOutcome::Pending => {
                        self.acquisition = Some(Acquisition::AwaitingGrant {
                            remaining: self.timing.grant_timeout,
                            attempt,
                        });
                    }
                    CaptureOutcome::Denied(err) => {
                        log::warn!("pointer capture denied: {}", err);
                        self.schedule_retry(attempt);
                    }
                }
            }
            Acquisition::AwaitingGrant { remaining, attempt } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.acquisition = Some(Acquisition::AwaitingGrant { remaining, attempt });
                    return;
                }
                log::warn!("pointer capture grant timed out");
                self.schedule_retry(attempt);
            }
        }
    }

    /// Push the overlay state to the presenter if it changed since the
    /// last sync.
    pub fn sync_presenter(&mut self, presenter: &mut dyn ModalPresenter, content: &MenuContent) {
        if !self.modal_dirty {
            return;
        }
        self.modal_dirty = false;
        if self.modal_open {
            presenter.show(content);
        } else {
            presenter.hide();
        }
    }

    /// Apply a capture-ownership change reported by the platform. Safe to
    /// call with duplicates; "not held" is the sole path back to the menu.
    fn on_capture_changed(&mut self, held: bool) {
        if held {
            match self.phase {
                MenuPhase::AwaitingCapture => {
                    self.acquisition = None;
                    self.enter_playing();
                }
                // Steady state while playing.
                MenuPhase::Playing => {}
                MenuPhase::Menu => {
                    log::debug!("capture grant while menu open, ignoring");
                }
            }
        } else {
            // Escape, focus loss, or any other platform-side release.
            self.restore_menu();
        }
    }

    fn enter_playing(&mut self) {
        if self.phase != MenuPhase::Playing {
            log::info!("pointer captured; now playing");
        }
        self.phase = MenuPhase::Playing;
        self.mode.set(GameMode::Play);
    }

    /// Reopen the overlay and return to Menu, cancelling any pending
    /// acquisition. Idempotent.
    fn restore_menu(&mut self) {
        self.acquisition = None;
        self.set_modal_open(true);
        self.mode.set(GameMode::Menu);
        self.phase = MenuPhase::Menu;
    }

    fn schedule_retry(&mut self, attempt: u32) {
        let next = attempt + 1;
        if next >= self.timing.max_attempts {
            log::warn!(
                "pointer capture unavailable after {} attempts; returning to menu",
                next
            );
            self.restore_menu();
        } else {
            self.acquisition = Some(Acquisition::Scheduled {
                remaining: self.timing.retry_backoff * next as f32,
                attempt: next,
            });
        }
    }

    fn set_modal_open(&mut self, open: bool) {
        if self.modal_open != open {
            self.modal_open = open;
            self.modal_dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureError, CaptureSignal};
    use std::collections::VecDeque;

    /// Scripted capture device: answers requests from a queue and counts
    /// them. Defaults to granting when the script runs out.
    struct FakeDevice {
        outcomes: VecDeque<CaptureOutcome>,
        requests: u32,
        captured: bool,
    }

    impl FakeDevice {
        fn granting() -> Self {
            Self::scripted(vec![])
        }

        fn scripted(outcomes: Vec<CaptureOutcome>) -> Self {
            Self {
                outcomes: outcomes.into(),
                requests: 0,
                captured: false,
            }
        }
    }

    impl CaptureDevice for FakeDevice {
        fn request_capture(&mut self) -> CaptureOutcome {
            self.requests += 1;
            let outcome = self
                .outcomes
                .pop_front()
                .unwrap_or(CaptureOutcome::Granted);
            if matches!(outcome, CaptureOutcome::Granted) {
                self.captured = true;
            }
            outcome
        }

        fn release_capture(&mut self) {
            self.captured = false;
        }

        fn is_captured(&self) -> bool {
            self.captured
        }
    }

    fn timing() -> CaptureTiming {
        CaptureTiming {
            safety_delay: 0.5,
            grant_timeout: 1.0,
            retry_backoff: 0.25,
            max_attempts: 3,
        }
    }

    fn rig() -> (MenuController, ModeHandle, CaptureSignal) {
        let mode = ModeHandle::new();
        let signal = CaptureSignal::new();
        let sub = signal.subscribe().unwrap();
        let controller = MenuController::new(mode.clone(), timing(), sub);
        (controller, mode, signal)
    }

    #[test]
    fn initial_state_is_menu_with_overlay_shown() {
        let (controller, mode, _signal) = rig();
        assert_eq!(controller.phase(), MenuPhase::Menu);
        assert!(controller.modal_open());
        assert_eq!(mode.get(), GameMode::Menu);
    }

    #[test]
    fn play_request_flips_state_but_not_capture() {
        let (mut controller, mode, _signal) = rig();
        let device = FakeDevice::granting();

        controller.on_play_requested();
        assert!(!controller.modal_open());
        assert_eq!(mode.get(), GameMode::Play);
        assert_eq!(controller.phase(), MenuPhase::AwaitingCapture);
        // No synchronous request.
        assert_eq!(device.requests, 0);
    }

    #[test]
    fn capture_request_waits_for_the_safety_delay() {
        let (mut controller, _mode, _signal) = rig();
        let mut device = FakeDevice::granting();

        controller.on_play_requested();
        controller.update(0.25, &mut device);
        assert_eq!(device.requests, 0);
        controller.update(0.2, &mut device);
        assert_eq!(device.requests, 0);

        // Crossing the 0.5 s mark issues exactly one request.
        controller.update(0.1, &mut device);
        assert_eq!(device.requests, 1);
        assert_eq!(controller.phase(), MenuPhase::Playing);

        // And no more afterwards.
        controller.update(1.0, &mut device);
        controller.update(1.0, &mut device);
        assert_eq!(device.requests, 1);
    }

    #[test]
    fn grant_notification_confirms_pending_capture() {
        let (mut controller, mode, signal) = rig();
        let mut device = FakeDevice::scripted(vec![CaptureOutcome::Pending]);

        controller.on_play_requested();
        controller.update(0.5, &mut device);
        assert_eq!(device.requests, 1);
        assert_eq!(controller.phase(), MenuPhase::AwaitingCapture);

        signal.notify(true);
        controller.update(0.0, &mut device);
        assert_eq!(controller.phase(), MenuPhase::Playing);
        assert_eq!(mode.get(), GameMode::Play);
    }

    #[test]
    fn pending_grant_times_out_and_retries() {
        let (mut controller, _mode, _signal) = rig();
        let mut device =
            FakeDevice::scripted(vec![CaptureOutcome::Pending, CaptureOutcome::Granted]);

        controller.on_play_requested();
        controller.update(0.5, &mut device);
        assert_eq!(device.requests, 1);

        // Grant timeout (1.0 s) elapses with no notification, then the
        // backoff (0.25 s for attempt 1) runs before the second request.
        controller.update(1.0, &mut device);
        assert_eq!(device.requests, 1);
        controller.update(0.25, &mut device);
        assert_eq!(device.requests, 2);
        assert_eq!(controller.phase(), MenuPhase::Playing);
    }

    #[test]
    fn denial_retries_then_restores_menu() {
        let (mut controller, mode, _signal) = rig();
        let denied = || CaptureOutcome::Denied(CaptureError::Refused("no gesture".into()));
        let mut device = FakeDevice::scripted(vec![denied(), denied(), denied()]);

        controller.on_play_requested();
        controller.update(0.5, &mut device);
        assert_eq!(device.requests, 1);
        controller.update(0.25, &mut device);
        assert_eq!(device.requests, 2);
        controller.update(0.5, &mut device);
        assert_eq!(device.requests, 3);

        // Attempts exhausted: back to the menu instead of a hidden-overlay
        // limbo with no capture.
        assert_eq!(controller.phase(), MenuPhase::Menu);
        assert!(controller.modal_open());
        assert_eq!(mode.get(), GameMode::Menu);

        controller.update(5.0, &mut device);
        assert_eq!(device.requests, 3);
    }

    #[test]
    fn release_restores_menu_and_is_idempotent() {
        let (mut controller, mode, signal) = rig();
        let mut device = FakeDevice::granting();

        controller.on_play_requested();
        controller.update(0.5, &mut device);
        assert_eq!(controller.phase(), MenuPhase::Playing);

        signal.notify(false);
        signal.notify(false);
        controller.update(0.0, &mut device);
        assert_eq!(controller.phase(), MenuPhase::Menu);
        assert!(controller.modal_open());
        assert_eq!(mode.get(), GameMode::Menu);

        // A third release while already in the menu changes nothing.
        signal.notify(false);
        controller.update(0.0, &mut device);
        assert_eq!(controller.phase(), MenuPhase::Menu);
        assert!(controller.modal_open());
    }

    #[test]
    fn release_during_countdown_cancels_the_request() {
        let (mut controller, mode, signal) = rig();
        let mut device = FakeDevice::granting();

        controller.on_play_requested();
        controller.update(0.2, &mut device);
        signal.notify(false);
        controller.update(2.0, &mut device);

        assert_eq!(device.requests, 0);
        assert_eq!(controller.phase(), MenuPhase::Menu);
        assert_eq!(mode.get(), GameMode::Menu);
    }

    #[test]
    fn round_trip_returns_to_the_initial_state() {
        let (mut controller, mode, signal) = rig();
        let mut device = FakeDevice::granting();

        controller.on_play_requested();
        controller.update(0.5, &mut device);
        signal.notify(true);
        controller.update(0.0, &mut device);
        assert_eq!(controller.phase(), MenuPhase::Playing);

        signal.notify(false);
        controller.update(0.0, &mut device);
        assert_eq!(controller.phase(), MenuPhase::Menu);
        assert!(controller.modal_open());
        assert_eq!(mode.get(), GameMode::Menu);
    }

    #[test]
    fn play_request_is_ignored_outside_the_menu() {
        let (mut controller, _mode, _signal) = rig();
        let mut device = FakeDevice::granting();

        controller.on_play_requested();
        controller.on_play_requested();
        controller.update(0.5, &mut device);
        assert_eq!(device.requests, 1);

        controller.on_play_requested();
        controller.update(5.0, &mut device);
        assert_eq!(device.requests, 1);
    }

    #[test]
    fn grant_while_menu_open_is_ignored() {
        let (mut controller, mode, signal) = rig();
        let mut device = FakeDevice::granting();

        signal.notify(true);
        controller.update(0.0, &mut device);
        assert_eq!(controller.phase(), MenuPhase::Menu);
        assert!(controller.modal_open());
        assert_eq!(mode.get(), GameMode::Menu);
    }

    struct RecordingPresenter {
        shows: u32,
        hides: u32,
    }

    impl ModalPresenter for RecordingPresenter {
        fn show(&mut self, _content: &MenuContent) {
            self.shows += 1;
        }

        fn hide(&mut self) {
            self.hides += 1;
        }
    }

    #[test]
    fn presenter_sync_fires_only_on_changes() {
        let (mut controller, _mode, _signal) = rig();
        let mut device = FakeDevice::granting();
        let mut presenter = RecordingPresenter { shows: 0, hides: 0 };
        let content = MenuContent::how_to_walk();

        controller.sync_presenter(&mut presenter, &content);
        controller.sync_presenter(&mut presenter, &content);
        assert_eq!((presenter.shows, presenter.hides), (1, 0));

        controller.on_play_requested();
        controller.sync_presenter(&mut presenter, &content);
        controller.sync_presenter(&mut presenter, &content);
        assert_eq!((presenter.shows, presenter.hides), (1, 1));

        controller.update(0.5, &mut device);
        controller.sync_presenter(&mut presenter, &content);
        assert_eq!((presenter.shows, presenter.hides), (1, 1));
    }
}
