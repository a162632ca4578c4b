//! OpenWalk - first-person walking experience shell.
//!
//! Presents the instructional menu overlay, keeps the shared menu/play
//! mode in sync with it, and manages pointer capture around a real
//! window. The 3D scene and play-state movement live outside this shell.

mod capture;
mod config;
mod events;
mod overlay;

use std::sync::Arc;

use anyhow::{Context, Result};
use engine_core::{GameMode, ModeHandle, Time};
use input::{InputState, MouseButton};
use menu::{CaptureDevice, CaptureSignal, MenuContent, MenuController, MenuPhase};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use capture::WindowCapture;
use config::GameConfig;
use overlay::ConsoleOverlay;

/// Everything the shell holds between events.
pub struct AppState {
    window: Arc<Window>,
    time: Time,
    input: InputState,
    mode: ModeHandle,
    controller: MenuController,
    capture: WindowCapture,
    content: MenuContent,
    overlay: ConsoleOverlay,
    /// Mode currently reflected in the window title.
    title_mode: Option<GameMode>,
    running: bool,
}

impl AppState {
    fn new(window: Arc<Window>, config: &GameConfig) -> Result<Self> {
        let mode = ModeHandle::new();
        let signal = CaptureSignal::new();
        let subscription = signal
            .subscribe()
            .context("capture signal already has a subscriber")?;
        let controller = MenuController::new(mode.clone(), config.capture_timing(), subscription);
        let capture = WindowCapture::new(window.clone(), signal);

        Ok(Self {
            window,
            time: Time::new(),
            input: InputState::new(),
            mode,
            controller,
            capture,
            content: MenuContent::how_to_walk(),
            overlay: ConsoleOverlay,
            title_mode: None,
            running: true,
        })
    }

    fn update(&mut self) {
        self.time.update();
        // Cap delta so a hitch cannot swallow the capture safety delay.
        let dt = self.time.delta_seconds().min(0.1);

        // Play affordance: Enter, Space, or a click while the menu is up.
        // Escape dismissal is handled edge-wise in the event handler.
        if self.controller.phase() == MenuPhase::Menu
            && (self.input.is_confirm_pressed() || self.input.is_mouse_pressed(MouseButton::Left))
        {
            self.controller.on_play_requested();
        }

        self.controller.update(dt, &mut self.capture);
        self.controller.sync_presenter(&mut self.overlay, &self.content);
        self.input.set_cursor_locked(self.capture.is_captured());
        self.sync_title();

        self.input.begin_frame();
    }

    /// Window title reflects the shared mode so the taskbar shows where
    /// the experience is.
    fn sync_title(&mut self) {
        let mode = self.mode.get();
        if self.title_mode == Some(mode) {
            return;
        }
        self.title_mode = Some(mode);
        let title = match mode {
            GameMode::Menu => format!("OpenWalk - {}", self.content.title),
            GameMode::Play => "OpenWalk".to_string(),
        };
        self.window.set_title(&title);
    }
}

/// Application handler for winit.
struct App {
    state: Option<AppState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = GameConfig::load();
            let window_attrs = Window::default_attributes()
                .with_title("OpenWalk")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            match AppState::new(window.clone(), &config) {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════╗");
    println!("║                   OpenWalk                   ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  WASD    - Move      │  Mouse  - Camera      ║");
    println!("║  Escape  - Menu      │  Enter  - Walk        ║");
    println!("╚══════════════════════════════════════════════╝");

    log::info!("Starting OpenWalk");

    let event_loop = EventLoop::new()?;
    // Poll continuously so the deferred capture request fires on time even
    // when no window events arrive.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
