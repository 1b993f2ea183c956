//! Movement компоненты

use bevy::prelude::*;

/// Скорость движения игрока (метры/сек)
///
/// Модуль результирующей velocity всегда равен `speed` пока зажата
/// хотя бы одна клавиша (направление нормализуется до масштабирования).
#[derive(Component, Clone, Copy, Debug)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 10.0 }
    }
}
