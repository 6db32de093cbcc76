use std::collections::{HashMap, HashSet};
use std::hash::Hash;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Represents a raw input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw input for a single tick.  The game only reads this; the window layer
/// fills it from device events and clears the edge sets after each tick.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    /// Record a key going down.  Auto-repeat does not count as a new press.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
        self.mouse_released.insert(button);
    }

    /// Any key or button went down this tick.
    pub fn any_pressed(&self) -> bool {
        !self.keys_pressed.is_empty() || !self.mouse_pressed.is_empty()
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
    pub fn is_mouse_released(&self, button: MouseButton) -> bool { self.mouse_released.contains(&button) }
}

/// Maps logical actions (defined by the game) to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Returns true if the action was triggered this tick (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.any_source(action, |s| match s {
            InputSource::Key(k) => input.is_key_pressed(k),
            InputSource::Mouse(b) => input.is_mouse_pressed(b),
        })
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.any_source(action, |s| match s {
            InputSource::Key(k) => input.is_key_held(k),
            InputSource::Mouse(b) => input.is_mouse_held(b),
        })
    }

    /// Returns true if any bound source was released this tick.
    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.any_source(action, |s| match s {
            InputSource::Key(k) => input.is_key_released(k),
            InputSource::Mouse(b) => input.is_mouse_released(b),
        })
    }

    fn any_source(&self, action: A, f: impl Fn(InputSource) -> bool) -> bool {
        self.bindings.get(&action).is_some_and(|sources| sources.iter().copied().any(f))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Game actions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Dance,
    Skill,
    /// Opens and closes the settings screen.
    Settings,
    /// Start on the title screen.
    Start,
    Restart,
    Menu,
    /// Move the settings cursor between channels.
    SelectUp,
    SelectDown,
    VolumeDown,
    VolumeUp,
    /// Opens the credits panel on the settings screen.
    Credits,
}

impl ActionMap<GameAction> {
    /// Space dances, Z fires the skill, Esc toggles settings.
    pub fn game_defaults() -> Self {
        use GameAction::*;
        let mut map = Self::new();
        map.bind(Dance, InputSource::Key(KeyCode::Space));
        map.bind(Skill, InputSource::Key(KeyCode::KeyZ));
        map.bind(Settings, InputSource::Key(KeyCode::Escape));
        map.bind(Start, InputSource::Key(KeyCode::Enter));
        map.bind(Start, InputSource::Mouse(MouseButton::Left));
        map.bind(Restart, InputSource::Key(KeyCode::KeyR));
        map.bind(Restart, InputSource::Key(KeyCode::Enter));
        map.bind(Menu, InputSource::Key(KeyCode::KeyM));
        map.bind(SelectUp, InputSource::Key(KeyCode::ArrowUp));
        map.bind(SelectDown, InputSource::Key(KeyCode::ArrowDown));
        map.bind(VolumeDown, InputSource::Key(KeyCode::ArrowLeft));
        map.bind(VolumeUp, InputSource::Key(KeyCode::ArrowRight));
        map.bind(Credits, InputSource::Key(KeyCode::KeyC));
        map
    }
}
