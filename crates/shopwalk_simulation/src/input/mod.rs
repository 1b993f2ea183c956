//! Directional key state (WASD)
//!
//! Архитектура:
//! - Клиент (или headless driver) эмитит DirectionalKeyEvent на down/up
//!   переходах клавиш (repeats отфильтрованы на стороне источника)
//! - apply_directional_key_events применяет переходы к DirectionalKeys
//!   в PreUpdate — переход не теряется, даже если FixedUpdate в этом
//!   кадре не запускался
//! - Movement system читает DirectionalKeys как snapshot, раз в тик
//!
//! Никакого polling'а: состояние меняют только события, чтение —
//! plain boolean без аллокаций.

use bevy::prelude::*;

/// Клавиша направления (логическая, без привязки к scancode)
///
/// Маппинг на физические клавиши (W/S/A/D, стрелки) делает клиент.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

/// Event: переход клавиши направления (down или up)
///
/// # Архитектура
/// - Emit: shopwalk_client::input (из Bevy KeyboardInput) или headless driver
/// - Consume: apply_directional_key_events
#[derive(Event, Debug, Clone, Copy)]
pub struct DirectionalKeyEvent {
    pub key: MoveKey,
    /// true = key down, false = key up
    pub pressed: bool,
}

/// Текущее состояние клавиш направления
///
/// Четыре независимых boolean'а; живёт всю сессию, сбрасывается только
/// соответствующими key-up событиями.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalKeys {
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    pub fn any_held(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Система применения key-переходов к DirectionalKeys
///
/// Работает в PreUpdate: до RunFixedMainLoop, так что movement system
/// видит переходы текущего кадра.
pub fn apply_directional_key_events(
    mut events: EventReader<DirectionalKeyEvent>,
    mut keys: ResMut<DirectionalKeys>,
) {
    for event in events.read() {
        keys.set(event.key, event.pressed);
    }
}
