//! Состояние прозрачности сценовых объектов
//!
//! Два состояния: Opaque (1.0) и Transparent (0.5). Пишет сюда ТОЛЬКО
//! occlusion pass — это инвариант, исключающий конфликтующих writer'ов.
//! Клиент зеркалит alpha в material (см. shopwalk_client::rendering).

use bevy::prelude::*;

/// Alpha объекта, не перекрывающего камеру
pub const VISIBLE_ALPHA: f32 = 1.0;

/// Alpha объекта между камерой и игроком
pub const OCCLUDED_ALPHA: f32 = 0.5;

/// Прозрачность сценового объекта (candidate для occlusion fade)
///
/// Вешается на объекты, которые могут оказаться между камерой и игроком.
/// Объекты без этого компонента occlusion pass игнорирует (no-op).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SceneOpacity {
    pub alpha: f32,
}

impl Default for SceneOpacity {
    fn default() -> Self {
        Self {
            alpha: VISIBLE_ALPHA,
        }
    }
}

impl SceneOpacity {
    pub fn is_occluded(&self) -> bool {
        self.alpha < VISIBLE_ALPHA
    }
}
