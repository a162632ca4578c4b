//! Window and device event handling for the menu shell.

use menu::MenuPhase;
use winit::event::{DeviceEvent, WindowEvent};
use winit::keyboard::KeyCode;

impl crate::AppState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);

                    if key == KeyCode::Escape && event.state.is_pressed() {
                        match self.controller.phase() {
                            // During play the platform releases the grab; the
                            // controller only learns of it from the signal.
                            MenuPhase::Playing | MenuPhase::AwaitingCapture => {
                                self.capture.release_and_notify();
                            }
                            // Escape doubles as the overlay's own dismissal
                            // gesture, which also starts play.
                            MenuPhase::Menu => self.controller.on_play_requested(),
                        }
                    }
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
                false
            }
            WindowEvent::Focused(false) => {
                // Focus loss takes the cursor with it.
                if self.controller.phase() != MenuPhase::Menu {
                    self.capture.release_and_notify();
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                self.window.request_redraw();
                false
            }
            _ => false,
        }
    }

    /// Handle device events (raw mouse motion while locked).
    pub(crate) fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.input.is_cursor_locked() {
                self.input.process_mouse_motion(delta);
            }
        }
    }
}
