//! Keyboard movement controller
//!
//! Архитектура:
//! - compute_velocity: DirectionalKeys → желаемая velocity (чистая функция)
//! - apply_player_velocity: пишет Rapier Velocity.linvel КАЖДЫЙ тик,
//!   до PhysicsSet::SyncBackend; интеграцию position делает Rapier
//! - контроллер stateless между тиками
//!
//! Движение планарное (XZ), вертикальная ось не используется.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{MovementSpeed, Player};
use crate::config::ControlConfig;
use crate::input::{apply_directional_key_events, DirectionalKeyEvent, DirectionalKeys};
use crate::logger;

/// Желаемая velocity из состояния клавиш
///
/// Raw direction собирается перезаписью по осям в фиксированном порядке:
/// forward (Z = -1), backward (Z = +1), right (X = +1), left (X = -1).
/// При одновременных противоположных клавишах побеждает та, чья запись
/// идёт позже: backward перекрывает forward, left перекрывает right.
/// Это НЕ взаимная компенсация — порядок перезаписи и есть контракт.
///
/// Нулевое направление даёт нулевую velocity (normalize нуля дал бы NaN).
pub fn compute_velocity(keys: &DirectionalKeys, speed: f32) -> Vec3 {
    let mut direction = Vec3::ZERO;

    if keys.forward {
        direction.z = -1.0;
    }
    if keys.backward {
        direction.z = 1.0;
    }
    if keys.right {
        direction.x = 1.0;
    }
    if keys.left {
        direction.x = -1.0;
    }

    if direction == Vec3::ZERO {
        return Vec3::ZERO;
    }

    direction.normalize() * speed
}

/// Система записи velocity игрока в Rapier
///
/// Пишет каждый тик, даже если значение не изменилось — персистентность
/// и интеграция на стороне физики.
pub fn apply_player_velocity(
    keys: Res<DirectionalKeys>,
    mut query: Query<(&MovementSpeed, &mut Velocity), With<Player>>,
) {
    for (speed, mut velocity) in query.iter_mut() {
        // Только горизонтальная составляющая; angvel не трогаем
        velocity.linvel = compute_velocity(&keys, speed.speed);
    }
}

/// Cooldown для contact-логов (иначе спам каждый тик контакта)
#[derive(Resource)]
pub struct ContactLogCooldown {
    pub timer: Timer,
}

impl Default for ContactLogCooldown {
    fn default() -> Self {
        let mut timer = Timer::from_seconds(0.5, TimerMode::Once);
        // Стартуем готовым: первый контакт логируется сразу
        let duration = timer.duration();
        timer.tick(duration);
        Self { timer }
    }
}

/// Observability hook: логирует контакты игрока (rate-limited)
///
/// Никакого влияния на state control loop'а — чистое наблюдение.
pub fn log_player_contacts(
    mut collisions: EventReader<CollisionEvent>,
    players: Query<Entity, With<Player>>,
    time: Res<Time>,
    mut cooldown: ResMut<ContactLogCooldown>,
) {
    cooldown.timer.tick(time.delta());

    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };
        let involves_player = players.iter().any(|player| player == *a || player == *b);
        if involves_player && cooldown.timer.finished() {
            logger::log_info("player contact: welcome to the shop");
            cooldown.timer.reset();
        }
    }
}

/// Spawn helper для controlled entity
///
/// Создаёт entity с полным набором компонентов:
/// - Transform
/// - Player + MovementSpeed (наши компоненты)
/// - Rapier: dynamic body + box collider + velocity handle
///
/// Мир без гравитации (GravityScale 0), вращение погашено — бокс
/// скользит по плоскости, не кувыркаясь.
pub fn spawn_controlled_character(
    commands: &mut Commands,
    position: Vec3,
    config: &ControlConfig,
) -> Entity {
    commands
        .spawn((
            // Bevy transform
            Transform::from_translation(position),
            // Наши компоненты
            Player,
            MovementSpeed {
                speed: config.move_speed,
            },
            // Rapier physics (бокс 1×2×1, как меш игрока)
            RigidBody::Dynamic,
            Collider::cuboid(0.5, 1.0, 0.5),
            Velocity::zero(),
            Damping {
                linear_damping: 0.0,
                angular_damping: 1.0,
            },
            GravityScale(0.0),
            LockedAxes::ROTATION_LOCKED,
            // Contact events для observability hook'а
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

/// Plugin движения
///
/// Порядок выполнения в FixedUpdate:
/// 1. apply_player_velocity — input snapshot → Rapier velocity
/// 2. log_player_contacts — contact observability
/// Оба до PhysicsSet::SyncBackend (до physics step этого тика).
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier3d::plugin::PhysicsSet;

        // Регистрация событий
        // (CollisionEvent регистрирует и Rapier plugin; add_event идемпотентен,
        //  а headless app без Rapier всё равно получает Events<CollisionEvent>)
        app.add_event::<DirectionalKeyEvent>()
            .add_event::<CollisionEvent>()
            .init_resource::<DirectionalKeys>()
            .init_resource::<ContactLogCooldown>();

        // Key-переходы применяем в PreUpdate: до RunFixedMainLoop,
        // переход не теряется между fixed тиками
        app.add_systems(PreUpdate, apply_directional_key_events);

        app.add_systems(
            FixedUpdate,
            (apply_player_velocity, log_player_contacts)
                .chain()
                .before(PhysicsSet::SyncBackend),
        );
    }
}
