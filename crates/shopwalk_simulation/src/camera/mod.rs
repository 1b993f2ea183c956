//! Camera follow controller
//!
//! Раз в тик, ПОСЛЕ physics writeback: camera.translation =
//! player.translation + offset. Камера не отстаёт от игрока больше чем
//! на один тик, look-at целится в позицию текущего тика.
//!
//! Куда камера смотрит — владение этого контроллера (FollowCamera),
//! никакого глобального shared-state.

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;
use serde::{Deserialize, Serialize};

use crate::components::Player;

/// Режим следования камеры
///
/// Оба режима дают один и тот же translation; различие — ориентация.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowMode {
    /// Каждый тик: translation = player + offset, затем look-at на игрока.
    /// Default режим.
    Offset,

    /// Только translation = player + offset; ориентация остаётся той,
    /// что выставлена при инициализации сцены (для orthographic камеры
    /// с фиксированным ракурсом look-at избыточен).
    TranslateAbsolute,
}

/// Follow-камера: режим + смещение от игрока
///
/// Translation/rotation камеры мутирует ТОЛЬКО follow_player_camera,
/// раз в тик.
#[derive(Component, Debug, Clone, Copy)]
pub struct FollowCamera {
    pub mode: FollowMode,
    pub offset: Vec3,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            mode: FollowMode::Offset,
            offset: Vec3::splat(214.0),
        }
    }
}

/// Перемещает transform камеры к цели (логика без ECS — для тестов)
pub fn follow_transform(target: Vec3, follow: &FollowCamera, transform: &mut Transform) {
    transform.translation = target + follow.offset;
    if follow.mode == FollowMode::Offset {
        transform.look_at(target, Vec3::Y);
    }
}

/// Система следования камеры за игроком
///
/// Работает после PhysicsSet::Writeback — читает позицию игрока,
/// уже проинтегрированную в ЭТОМ тике.
pub fn follow_player_camera(
    players: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<(&FollowCamera, &mut Transform), Without<Player>>,
) {
    // Guard: игрок ещё не заспавнен — пропускаем тик
    let Ok(player_transform) = players.single() else {
        return;
    };
    let target = player_transform.translation;

    for (follow, mut camera_transform) in cameras.iter_mut() {
        follow_transform(target, follow, &mut camera_transform);
    }
}

/// Plugin камеры
pub struct CameraFollowPlugin;

impl Plugin for CameraFollowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            follow_player_camera.after(PhysicsSet::Writeback),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_mode_position_and_look_at() {
        let follow = FollowCamera {
            mode: FollowMode::Offset,
            offset: Vec3::splat(214.0),
        };
        let target = Vec3::new(1.0, 1.0, 1.0);
        let mut transform = Transform::default();

        follow_transform(target, &follow, &mut transform);

        assert_eq!(transform.translation, Vec3::new(215.0, 215.0, 215.0));

        // forward камеры смотрит точно на игрока
        let expected = (target - transform.translation).normalize();
        assert!((*transform.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn test_translate_absolute_keeps_orientation() {
        let follow = FollowCamera {
            mode: FollowMode::TranslateAbsolute,
            offset: Vec3::new(100.0, 100.0, 100.0),
        };
        let initial_rotation = Quat::from_rotation_y(0.7);
        let mut transform = Transform::from_rotation(initial_rotation);

        follow_transform(Vec3::new(2.0, 0.0, -3.0), &follow, &mut transform);

        assert_eq!(transform.translation, Vec3::new(102.0, 100.0, 97.0));
        // look-at не вызывался — ориентация из инициализации
        assert_eq!(transform.rotation, initial_rotation);
    }

    #[test]
    fn test_look_at_tracks_current_position() {
        let follow = FollowCamera::default();
        let mut transform = Transform::default();

        follow_transform(Vec3::ZERO, &follow, &mut transform);

        // Игрок сдвинулся — look-at целится в НОВУЮ позицию, не в старую
        let moved = Vec3::new(5.0, 0.0, -5.0);
        follow_transform(moved, &follow, &mut transform);

        assert_eq!(transform.translation, moved + follow.offset);
        let expected = (moved - transform.translation).normalize();
        assert!((*transform.forward() - expected).length() < 1e-5);
    }
}
