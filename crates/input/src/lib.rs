//! Per-frame input state for the menu shell: key and mouse-button press
//! tracking plus the cursor-lock flag. Movement and camera consumption
//! during play live elsewhere; this crate only carries what the menu
//! needs to detect play triggers and escape gestures.

use glam::Vec2;
use std::collections::HashSet;

/// Input state accumulated from window events, cleared each frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_released: HashSet<MouseButton>,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated raw motion (only fed while the cursor is locked).
    accumulated_delta: Vec2,

    /// Whether the cursor is currently captured by the window.
    cursor_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the end of each update.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process raw mouse motion (meaningful only while locked).
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    // Query methods

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Raw look delta accumulated over the last frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Whether the window currently holds the cursor.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Record the cursor-lock state reported by the capture backend.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        if self.cursor_locked != locked {
            log::debug!("cursor lock -> {}", locked);
        }
        self.cursor_locked = locked;
    }

    /// Check if the menu confirm affordance fired this frame (Enter or Space).
    pub fn is_confirm_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Enter)
            || self.is_key_pressed(KeyCode::NumpadEnter)
            || self.is_key_pressed(KeyCode::Space)
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
