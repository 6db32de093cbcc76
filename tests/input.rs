use ricktcal::input::{ActionMap, GameAction, InputSource, InputState, KeyCode, MouseButton};

// ── InputState ───────────────────────────────────────────────────────────────

#[test]
fn press_sets_held_and_pressed() {
    let mut input = InputState::new();
    input.press_key(KeyCode::Space);
    assert!(input.is_key_held(KeyCode::Space));
    assert!(input.is_key_pressed(KeyCode::Space));
}

#[test]
fn clear_frame_state_keeps_held_keys() {
    let mut input = InputState::new();
    input.press_key(KeyCode::Space);
    input.clear_frame_state();
    assert!(input.is_key_held(KeyCode::Space));
    assert!(!input.is_key_pressed(KeyCode::Space));
}

#[test]
fn auto_repeat_is_not_a_new_press() {
    let mut input = InputState::new();
    input.press_key(KeyCode::KeyZ);
    input.clear_frame_state();
    input.press_key(KeyCode::KeyZ);
    assert!(!input.is_key_pressed(KeyCode::KeyZ));
}

#[test]
fn release_clears_held_and_records_edge() {
    let mut input = InputState::new();
    input.press_mouse(MouseButton::Left);
    input.release_mouse(MouseButton::Left);
    assert!(!input.is_mouse_held(MouseButton::Left));
    assert!(input.is_mouse_released(MouseButton::Left));
}

#[test]
fn any_pressed_sees_keys_and_buttons_for_one_tick() {
    let mut input = InputState::new();
    assert!(!input.any_pressed());
    input.press_mouse(MouseButton::Right);
    assert!(input.any_pressed());
    input.clear_frame_state();
    assert!(!input.any_pressed());
    input.press_key(KeyCode::KeyQ);
    assert!(input.any_pressed());
}

// ── ActionMap ────────────────────────────────────────────────────────────────

#[test]
fn unbound_action_is_never_active() {
    let map: ActionMap<GameAction> = ActionMap::new();
    let mut input = InputState::new();
    input.press_key(KeyCode::Space);
    assert!(!map.is_pressed(GameAction::Dance, &input));
    assert!(!map.is_held(GameAction::Dance, &input));
}

#[test]
fn any_bound_source_triggers() {
    let mut map = ActionMap::new();
    map.bind(GameAction::Start, InputSource::Key(KeyCode::Enter));
    map.bind(GameAction::Start, InputSource::Mouse(MouseButton::Left));
    let mut input = InputState::new();
    input.press_mouse(MouseButton::Left);
    assert!(map.is_pressed(GameAction::Start, &input));
}

#[test]
fn defaults_bind_the_game_keys() {
    let map = ActionMap::game_defaults();
    let cases = [
        (KeyCode::Space, GameAction::Dance),
        (KeyCode::KeyZ, GameAction::Skill),
        (KeyCode::Escape, GameAction::Settings),
        (KeyCode::Enter, GameAction::Start),
        (KeyCode::KeyR, GameAction::Restart),
        (KeyCode::KeyM, GameAction::Menu),
        (KeyCode::ArrowUp, GameAction::SelectUp),
        (KeyCode::ArrowDown, GameAction::SelectDown),
        (KeyCode::ArrowLeft, GameAction::VolumeDown),
        (KeyCode::ArrowRight, GameAction::VolumeUp),
        (KeyCode::KeyC, GameAction::Credits),
    ];
    for (key, action) in cases {
        let mut input = InputState::new();
        input.press_key(key);
        assert!(map.is_pressed(action, &input), "{key:?} should trigger {action:?}");
    }
}

#[test]
fn released_reports_the_edge() {
    let map = ActionMap::game_defaults();
    let mut input = InputState::new();
    input.press_key(KeyCode::Space);
    input.clear_frame_state();
    input.release_key(KeyCode::Space);
    assert!(map.is_released(GameAction::Dance, &input));
    assert!(!map.is_held(GameAction::Dance, &input));
}
