//! Конфигурация control loop'а
//!
//! Defaults соответствуют базовой сцене; клиент может загрузить свой
//! вариант (JSON) и вставить resource поверх дефолтного.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::{FollowCamera, FollowMode};

/// Параметры управления и камеры
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Скорость игрока (m/s); модуль velocity при зажатой клавише
    pub move_speed: f32,
    /// Режим следования камеры
    pub follow_mode: FollowMode,
    /// Смещение камеры от игрока (world units, per-axis)
    pub follow_offset: [f32; 3],
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            follow_mode: FollowMode::Offset,
            // Далёкое диагональное смещение: при orthographic проекции
            // даёт фиксированный косой ракурс на игрока
            follow_offset: [214.0, 214.0, 214.0],
        }
    }
}

impl ControlConfig {
    pub fn follow_offset(&self) -> Vec3 {
        Vec3::from_array(self.follow_offset)
    }

    /// Компонент камеры, собранный из конфигурации
    pub fn follow_camera(&self) -> FollowCamera {
        FollowCamera {
            mode: self.follow_mode,
            offset: self.follow_offset(),
        }
    }
}
