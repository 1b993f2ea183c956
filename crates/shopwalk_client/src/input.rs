//! Keyboard bridge — Bevy KeyboardInput → DirectionalKeyEvent
//!
//! Симуляция про физические клавиши ничего не знает: здесь WASD/стрелки
//! маппятся на логические MoveKey, repeats отбрасываются (симуляции
//! нужны только down/up переходы).

use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;

use shopwalk_simulation::{DirectionalKeyEvent, MoveKey};

pub struct KeyboardBridgePlugin;

impl Plugin for KeyboardBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, forward_directional_keys);
    }
}

/// Пробрасывает key down/up переходы в симуляцию
fn forward_directional_keys(
    mut keyboard: EventReader<KeyboardInput>,
    mut directional: EventWriter<DirectionalKeyEvent>,
) {
    for event in keyboard.read() {
        // OS auto-repeat — не переход
        if event.repeat {
            continue;
        }
        let Some(key) = map_key(event.key_code) else {
            continue;
        };
        directional.write(DirectionalKeyEvent {
            key,
            pressed: event.state == ButtonState::Pressed,
        });
    }
}

fn map_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(MoveKey::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(MoveKey::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(MoveKey::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(MoveKey::Right),
        _ => None,
    }
}
