//! Input system with action-based mapping
//!
//! Provides an abstraction layer between raw window events and game actions.
//! [`InputState`] is what the controller samples each frame.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use vantage_core::{InputAction, InputSampler};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
    /// Mouse movement delta for this frame
    pub mouse_delta: Vec2,
    /// Whether the cursor is captured (invisible, locked)
    pub cursor_captured: bool,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Mark an action as pressed, flagging the edge if it was not already held
    pub fn press(&mut self, action: InputAction) {
        if !self.held.contains(&action) {
            self.just_pressed.insert(action);
        }
        self.held.insert(action);
    }

    /// Mark an action as released
    pub fn release(&mut self, action: InputAction) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
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

    fn axis(&self, positive: InputAction, negative: InputAction) -> f32 {
        let mut value = 0.0;
        if self.held.contains(&positive) {
            value += 1.0;
        }
        if self.held.contains(&negative) {
            value -= 1.0;
        }
        value
    }
}

impl InputSampler for InputState {
    fn look_axis(&self) -> Vec2 {
        if self.cursor_captured {
            self.mouse_delta
        } else {
            Vec2::ZERO
        }
    }

    fn move_axis(&self) -> Vec2 {
        Vec2::new(
            self.axis(InputAction::MoveRight, InputAction::MoveLeft),
            self.axis(InputAction::MoveForward, InputAction::MoveBackward),
        )
    }

    fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
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
    /// Reverse lookup: action to all bindings
    reverse: HashMap<InputAction, Vec<InputBinding>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
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

        // Actions
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::ShiftRight, InputAction::Sprint);
        bindings.bind(KeyCode::ControlLeft, InputAction::Crouch);
        bindings.bind(KeyCode::KeyE, InputAction::Interact);
        bindings.bind(KeyCode::Escape, InputAction::Pause);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.insert(InputBinding::Key(key), action);
    }

    /// Bind a mouse button to an action
    pub fn bind_mouse(&mut self, button: u32, action: InputAction) {
        self.insert(InputBinding::Mouse(button), action);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        let binding = InputBinding::Key(key);
        if let Some(action) = self.bindings.remove(&binding) {
            if let Some(bindings) = self.reverse.get_mut(&action) {
                bindings.retain(|b| *b != binding);
            }
        }
    }

    /// Get the action for a binding, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<InputAction> {
        self.bindings.get(binding).copied()
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.get_action(&InputBinding::Key(key))
    }

    /// All bindings that trigger an action
    pub fn bindings_for(&self, action: InputAction) -> &[InputBinding] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    fn insert(&mut self, binding: InputBinding, action: InputAction) {
        if let Some(previous) = self.bindings.insert(binding, action) {
            if let Some(bindings) = self.reverse.get_mut(&previous) {
                bindings.retain(|b| *b != binding);
            }
        }
        self.reverse.entry(action).or_default().push(binding);
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Mouse sensitivity multiplier
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
            mouse_sensitivity: 1.0,
            invert_y: false,
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

    /// Handle mouse movement
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.state.cursor_captured {
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

    /// Set cursor capture state
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.state.cursor_captured = captured;
    }

    fn apply(&mut self, action: InputAction, element_state: ElementState) {
        match element_state {
            ElementState::Pressed => self.state.press(action),
            ElementState::Released => self.state.release(action),
        }
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
            bindings.get_key_action(KeyCode::ControlLeft),
            Some(InputAction::Crouch)
        );
        assert_eq!(bindings.bindings_for(InputAction::Sprint).len(), 2);
    }

    #[test]
    fn test_rebinding_moves_reverse_entry() {
        let mut bindings = InputBindings::default();
        bindings.bind(KeyCode::KeyC, InputAction::Crouch);
        bindings.bind(KeyCode::ControlLeft, InputAction::Interact);

        assert_eq!(bindings.bindings_for(InputAction::Crouch).len(), 1);
        assert_eq!(
            bindings.get_key_action(KeyCode::ControlLeft),
            Some(InputAction::Interact)
        );

        bindings.unbind(KeyCode::KeyC);
        assert!(bindings.bindings_for(InputAction::Crouch).is_empty());
    }

    #[test]
    fn test_input_state() {
        let mut state = InputState::new();
        state.press(InputAction::MoveForward);
        state.press(InputAction::Jump);

        assert!(state.is_held(InputAction::MoveForward));
        assert!(state.is_just_pressed(InputAction::Jump));
        assert!(!state.is_held(InputAction::Sprint));

        state.clear_frame();
        assert!(state.is_held(InputAction::MoveForward));
        assert!(!state.is_just_pressed(InputAction::Jump));

        // Holding does not re-trigger the edge
        state.press(InputAction::Jump);
        assert!(!state.is_just_pressed(InputAction::Jump));
    }

    #[test]
    fn test_move_axis() {
        let mut state = InputState::new();
        assert_eq!(state.move_axis(), Vec2::ZERO);

        state.press(InputAction::MoveForward);
        state.press(InputAction::MoveLeft);
        assert_eq!(state.move_axis(), Vec2::new(-1.0, 1.0));

        state.press(InputAction::MoveRight);
        assert_eq!(state.move_axis(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_look_axis_requires_capture() {
        let mut handler = InputHandler::new();
        handler.handle_mouse_motion((4.0, 2.0));
        assert_eq!(handler.state.look_axis(), Vec2::ZERO);

        handler.set_cursor_captured(true);
        handler.handle_mouse_motion((4.0, 2.0));
        assert_eq!(handler.state.look_axis(), Vec2::new(4.0, 2.0));

        handler.end_frame();
        assert_eq!(handler.state.look_axis(), Vec2::ZERO);
    }

    #[test]
    fn test_keyboard_events() {
        let mut handler = InputHandler::new();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed);
        assert!(handler.state.is_just_pressed(InputAction::Jump));

        handler.end_frame();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::Space), ElementState::Released);
        assert!(handler.state.is_just_released(InputAction::Jump));
        assert!(!handler.state.is_held(InputAction::Jump));
    }

    #[test]
    fn test_mouse_button_binding() {
        let mut handler = InputHandler::new();
        handler.bindings.bind_mouse(1, InputAction::Crouch);

        handler.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(handler.state.is_held(InputAction::Crouch));

        handler.handle_mouse_button(MouseButton::Middle, ElementState::Pressed);
        assert!(!handler.state.is_held(InputAction::Jump));

        handler.state.clear_all();
        assert!(!handler.state.is_held(InputAction::Crouch));
        assert!(!handler.state.is_just_pressed(InputAction::Crouch));
    }
}
