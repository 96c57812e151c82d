//! Input system with action-based mapping
//!
//! Provides an abstraction layer between raw winit events and game actions.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Sprint modifier (Left Shift by default)
    Sprint,
    /// Switch to the first-person view (T by default)
    FirstPersonView,
    /// Switch to the third-person view (Y by default)
    ThirdPersonView,
    /// Switch to the top-down view (U by default)
    TopDownView,
    /// Unlock and show the cursor (Escape by default)
    ReleaseCursor,
    /// Lock and hide the cursor (left mouse button by default)
    CaptureCursor,
}

/// Raw digital movement axes, each in `{-1, 0, 1}`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveAxes {
    /// Right minus left
    pub x: f32,
    /// Forward minus backward
    pub z: f32,
}

impl MoveAxes {
    /// Create axes from raw values
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Whether any direction is pressed
    pub fn is_moving(&self) -> bool {
        self.x != 0.0 || self.z != 0.0
    }
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
    /// Look-axis movement for this frame (x right, y down)
    pub mouse_delta: Vec2,
    /// Whether mouse motion feeds `mouse_delta`
    pub look_enabled: bool,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Raw movement axes; opposing keys cancel out
    pub fn move_axes(&self) -> MoveAxes {
        let axis = |positive: InputAction, negative: InputAction| {
            let mut value = 0.0;
            if self.is_held(positive) {
                value += 1.0;
            }
            if self.is_held(negative) {
                value -= 1.0;
            }
            value
        };

        MoveAxes {
            x: axis(InputAction::MoveRight, InputAction::MoveLeft),
            z: axis(InputAction::MoveForward, InputAction::MoveBackward),
        }
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Clear all input state
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.clear_frame();
    }
}

/// Binding of a physical key to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Keyboard key
    Key(KeyCode),
    /// Mouse button
    Mouse(u32), // 0 = left, 1 = right, 2 = middle
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

/// Maps physical inputs to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key/button to action mappings
    bindings: HashMap<InputBinding, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);

        // Views
        bindings.bind(KeyCode::KeyT, InputAction::FirstPersonView);
        bindings.bind(KeyCode::KeyY, InputAction::ThirdPersonView);
        bindings.bind(KeyCode::KeyU, InputAction::TopDownView);

        // Cursor
        bindings.bind(KeyCode::Escape, InputAction::ReleaseCursor);
        bindings.bind_mouse(0, InputAction::CaptureCursor);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action, replacing whatever it triggered before
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(InputBinding::Key(key), action);
    }

    /// Bind a mouse button to an action
    pub fn bind_mouse(&mut self, button: u32, action: InputAction) {
        self.bindings.insert(InputBinding::Mouse(button), action);
    }

    /// Get the action for a binding, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<InputAction> {
        self.bindings.get(binding).copied()
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.get_action(&InputBinding::Key(key))
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Pixels of mouse motion per look-axis unit
    pub mouse_sensitivity: f32,
    /// Invert Y axis
    pub invert_y: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            bindings: InputBindings::default(),
            mouse_sensitivity: 0.1,
            invert_y: false,
        }
    }

    fn apply(&mut self, action: InputAction, element_state: ElementState) {
        match element_state {
            ElementState::Pressed => {
                if !self.state.held.contains(&action) {
                    self.state.just_pressed.insert(action);
                }
                self.state.held.insert(action);
            }
            ElementState::Released => {
                self.state.held.remove(&action);
                self.state.just_released.insert(action);
            }
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            if let Some(action) = self.bindings.get_key_action(key_code) {
                self.apply(action, element_state);
            }
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let button_id = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        };

        if let Some(action) = self.bindings.get_action(&InputBinding::Mouse(button_id)) {
            self.apply(action, state);
        }
    }

    /// Handle raw mouse movement; ignored while look is disabled
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.state.look_enabled {
            let y_mult = if self.invert_y { -1.0 } else { 1.0 };
            self.state.mouse_delta += Vec2::new(
                delta.0 as f32 * self.mouse_sensitivity,
                delta.1 as f32 * self.mouse_sensitivity * y_mult,
            );
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }

    /// Enable or disable mouse look
    pub fn set_look_enabled(&mut self, enabled: bool) {
        self.state.look_enabled = enabled;
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.state.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyW),
            Some(InputAction::MoveForward)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::Space),
            Some(InputAction::Jump)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyU),
            Some(InputAction::TopDownView)
        );
        assert_eq!(bindings.get_key_action(KeyCode::ShiftRight), None);
        assert_eq!(
            bindings.get_action(&InputBinding::Mouse(0)),
            Some(InputAction::CaptureCursor)
        );
    }

    #[test]
    fn test_rebinding_replaces_action() {
        let mut bindings = InputBindings::default();
        bindings.bind(KeyCode::KeyT, InputAction::TopDownView);
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyT),
            Some(InputAction::TopDownView)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyU),
            Some(InputAction::TopDownView)
        );
    }

    #[test]
    fn test_input_state() {
        let mut state = InputState::new();
        state.held.insert(InputAction::MoveForward);
        state.just_pressed.insert(InputAction::Jump);

        assert!(state.is_held(InputAction::MoveForward));
        assert!(state.is_just_pressed(InputAction::Jump));
        assert!(!state.is_held(InputAction::Sprint));

        state.clear_frame();
        assert!(state.is_held(InputAction::MoveForward));
        assert!(!state.is_just_pressed(InputAction::Jump));
    }

    #[test]
    fn test_move_axes_cancel() {
        let mut state = InputState::new();
        state.held.insert(InputAction::MoveLeft);
        state.held.insert(InputAction::MoveRight);
        state.held.insert(InputAction::MoveBackward);

        let axes = state.move_axes();
        assert_eq!(axes, MoveAxes::new(0.0, -1.0));
        assert!(axes.is_moving());
    }

    #[test]
    fn test_key_repeat_is_not_a_new_press() {
        let mut handler = InputHandler::new();
        let space = PhysicalKey::Code(KeyCode::Space);

        handler.handle_keyboard(space, ElementState::Pressed);
        assert!(handler.state.is_just_pressed(InputAction::Jump));

        handler.end_frame();
        handler.handle_keyboard(space, ElementState::Pressed);
        assert!(!handler.state.is_just_pressed(InputAction::Jump));
        assert!(handler.state.is_held(InputAction::Jump));
    }

    #[test]
    fn test_mouse_motion_requires_look_enabled() {
        let mut handler = InputHandler::new();
        handler.handle_mouse_motion((10.0, 5.0));
        assert_eq!(handler.state.mouse_delta, Vec2::ZERO);

        handler.set_look_enabled(true);
        handler.invert_y = true;
        handler.handle_mouse_motion((10.0, 5.0));
        assert!((handler.state.mouse_delta.x - 1.0).abs() < 1e-6);
        assert!((handler.state.mouse_delta.y + 0.5).abs() < 1e-6);
    }
}
