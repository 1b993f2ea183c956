//! Line-of-sight occlusion fade
//!
//! Раз в тик, после camera follow: raycast от игрока к камере через
//! физическую сцену, diff множества перекрывающих объектов с прошлым
//! тиком, запись SceneOpacity:
//! - exited (prev − current) → VISIBLE_ALPHA
//! - current → OCCLUDED_ALPHA (идемпотентно: set, не toggle)
//!
//! Инвариант после каждого тика с проходом: объект Transparent ⇔
//! объект ∈ current.
//!
//! Если Rapier context / игрок / камера ещё не готовы — проход целиком
//! пропускается, без мутаций; retry на следующем тике.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;
use bevy_rapier3d::prelude::*;

use crate::camera::{follow_player_camera, FollowCamera};
use crate::components::{Player, SceneOpacity, OCCLUDED_ALPHA, VISIBLE_ALPHA};

/// Множество объектов, перекрывавших камеру на прошлом тике
///
/// Пересобирается каждый тик; прошлое множество живёт ровно до
/// вычисления enter/exit diff'а.
#[derive(Resource, Debug, Default)]
pub struct OcclusionState {
    pub previous: HashSet<Entity>,
}

/// Применяет enter/exit diff к opacity (чистая логика, для тестов)
///
/// `set_alpha` вызывается для exited с VISIBLE_ALPHA и для каждого
/// элемента current с OCCLUDED_ALPHA — независимо от того, был ли
/// объект прозрачным уже (идемпотентная запись).
pub fn apply_occlusion_diff(
    previous: &HashSet<Entity>,
    current: &HashSet<Entity>,
    mut set_alpha: impl FnMut(Entity, f32),
) {
    // Объекты, переставшие перекрывать → opaque
    for entity in previous.difference(current) {
        set_alpha(*entity, VISIBLE_ALPHA);
    }
    // Перекрывающие (новые и старые) → transparent
    for entity in current {
        set_alpha(*entity, OCCLUDED_ALPHA);
    }
}

/// Система occlusion pass
///
/// 1. Отрезок игрок → камера (origin у игрока, направление к камере,
///    дальность = расстояние до камеры)
/// 2. ВСЕ пересечённые объекты, кроме игрока и камеры
/// 3. Dedup по entity (объект может быть задет несколькими коллайдерами)
/// 4-6. diff + запись opacity + previous ← current
pub fn update_camera_occlusion(
    rapier: ReadRapierContext,
    cameras: Query<(Entity, &Transform), With<FollowCamera>>,
    players: Query<(Entity, &Transform), (With<Player>, Without<FollowCamera>)>,
    mut state: ResMut<OcclusionState>,
    mut opacities: Query<&mut SceneOpacity>,
) {
    // Guards: зависимости не готовы — пропускаем проход, без мутаций
    let Ok(context) = rapier.single() else {
        return;
    };
    let Ok((camera_entity, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok((player_entity, player_transform)) = players.single() else {
        return;
    };

    let target = player_transform.translation;
    let eye = camera_transform.translation;
    let segment = eye - target;
    let distance = segment.length();
    if distance <= f32::EPSILON {
        // Вырожденный отрезок (камера в точке игрока) — нечему перекрывать
        return;
    }
    let direction = segment / distance;

    let mut current: HashSet<Entity> = HashSet::new();
    context.intersect_ray(
        target,
        direction,
        distance,
        true,
        QueryFilter::default(),
        |entity, _intersection| {
            // Концы отрезка исключаем по identity
            if entity != player_entity && entity != camera_entity {
                current.insert(entity);
            }
            true // продолжаем: нужны ВСЕ объекты на отрезке, не ближайший
        },
    );

    apply_occlusion_diff(&state.previous, &current, |entity, alpha| {
        // Объект мог уйти из сцены (или не иметь opacity) между
        // детекцией и записью — no-op
        if let Ok(mut opacity) = opacities.get_mut(entity) {
            opacity.alpha = alpha;
        }
    });

    state.previous = current;
}

/// Plugin occlusion pass
pub struct OcclusionPlugin;

impl Plugin for OcclusionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OcclusionState>();

        // Строго после camera follow: отрезок строится по позиции камеры
        // ЭТОГО тика
        app.add_systems(
            FixedUpdate,
            update_camera_occlusion
                .after(PhysicsSet::Writeback)
                .after(follow_player_camera),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fresh_entities<const N: usize>() -> [Entity; N] {
        let mut world = World::new();
        [(); N].map(|_| world.spawn_empty().id())
    }

    fn run_diff(previous: &HashSet<Entity>, current: &HashSet<Entity>) -> HashMap<Entity, f32> {
        let mut written = HashMap::new();
        apply_occlusion_diff(previous, current, |e, alpha| {
            written.insert(e, alpha);
        });
        written
    }

    #[test]
    fn test_enter_exit_diff() {
        // previous = {A, B}, current = {B, C}
        let [a, b, c] = fresh_entities::<3>();
        let previous: HashSet<_> = [a, b].into_iter().collect();
        let current: HashSet<_> = [b, c].into_iter().collect();

        let written = run_diff(&previous, &current);

        assert_eq!(written[&a], VISIBLE_ALPHA);
        assert_eq!(written[&b], OCCLUDED_ALPHA);
        assert_eq!(written[&c], OCCLUDED_ALPHA);
    }

    #[test]
    fn test_idempotent_when_unchanged() {
        let set: HashSet<_> = fresh_entities::<2>().into_iter().collect();

        let first = run_diff(&set, &set);
        let second = run_diff(&set, &set);

        // Повторный проход без изменений сцены пишет те же значения
        assert_eq!(first, second);
        assert!(first.values().all(|alpha| *alpha == OCCLUDED_ALPHA));
    }

    #[test]
    fn test_all_exit_restores_opaque() {
        let previous: HashSet<_> = fresh_entities::<2>().into_iter().collect();
        let current = HashSet::new();

        let written = run_diff(&previous, &current);

        assert!(written.values().all(|alpha| *alpha == VISIBLE_ALPHA));
        assert_eq!(written.len(), 2);
    }

    #[test]
    fn test_empty_to_empty_writes_nothing() {
        let written = run_diff(&HashSet::new(), &HashSet::new());
        assert!(written.is_empty());
    }
}
