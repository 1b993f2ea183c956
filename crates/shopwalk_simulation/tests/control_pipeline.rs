//! Интеграционные тесты control pipeline
//!
//! Headless app + настоящий Rapier context, время шагаем вручную
//! (ровно один fixed тик на update). Проверяем цепочку
//! input → velocity → интеграция → camera follow.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;

use shopwalk_simulation::{
    create_headless_app, spawn_controlled_character, ControlConfig, DirectionalKeyEvent,
    FollowCamera, MoveKey,
};

const TICK: Duration = Duration::from_micros(16_667); // ~60Hz

fn physics_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));
    app
}

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    let config = ControlConfig::default();
    let entity = {
        let mut commands = app.world_mut().commands();
        spawn_controlled_character(&mut commands, position, &config)
    };
    app.world_mut().flush();
    entity
}

fn spawn_camera(app: &mut App) -> Entity {
    // Transform намеренно «не на месте»: follow system обязан поставить
    // камеру сам на первом же тике
    app.world_mut()
        .spawn((Transform::default(), FollowCamera::default()))
        .id()
}

fn set_key(app: &mut App, key: MoveKey, pressed: bool) {
    app.world_mut()
        .send_event(DirectionalKeyEvent { key, pressed });
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn player_position(app: &App, player: Entity) -> Vec3 {
    app.world().get::<Transform>(player).unwrap().translation
}

#[test]
fn test_forward_key_moves_player_along_negative_z() {
    let mut app = physics_app();
    let player = spawn_player(&mut app, Vec3::ONE);

    set_key(&mut app, MoveKey::Forward, true);
    run_ticks(&mut app, 60); // ~1 секунда

    let position = player_position(&app, player);
    assert!(position.z < 0.0, "player z = {} (ожидали движение в -Z)", position.z);
    // Остальные оси не трогаем (мир без гравитации)
    assert!((position.x - 1.0).abs() < 1e-3);
    assert!((position.y - 1.0).abs() < 1e-3);
}

#[test]
fn test_velocity_magnitude_equals_speed_while_held() {
    let mut app = physics_app();
    let player = spawn_player(&mut app, Vec3::ZERO);

    // Диагональ: модуль всё равно равен speed
    set_key(&mut app, MoveKey::Forward, true);
    set_key(&mut app, MoveKey::Right, true);
    run_ticks(&mut app, 5);

    let velocity = app.world().get::<Velocity>(player).unwrap();
    let speed = ControlConfig::default().move_speed;
    assert!(
        (velocity.linvel.length() - speed).abs() < 1e-3,
        "|v| = {}",
        velocity.linvel.length()
    );
}

#[test]
fn test_release_stops_player() {
    let mut app = physics_app();
    let player = spawn_player(&mut app, Vec3::ZERO);

    set_key(&mut app, MoveKey::Forward, true);
    run_ticks(&mut app, 30);
    set_key(&mut app, MoveKey::Forward, false);
    run_ticks(&mut app, 5);

    let velocity = app.world().get::<Velocity>(player).unwrap();
    assert!(velocity.linvel.length() < 1e-4);

    // Позиция стабильна после остановки
    let before = player_position(&app, player);
    run_ticks(&mut app, 10);
    let after = player_position(&app, player);
    assert!((after - before).length() < 1e-3);
}

#[test]
fn test_camera_follows_at_fixed_offset() {
    let mut app = physics_app();
    spawn_player(&mut app, Vec3::ONE);
    let camera = spawn_camera(&mut app);

    run_ticks(&mut app, 2);

    let camera_transform = *app.world().get::<Transform>(camera).unwrap();
    // (1,1,1) + (214,214,214) = (215,215,215)
    assert!((camera_transform.translation - Vec3::splat(215.0)).length() < 1e-3);

    // look-at целится в позицию игрока
    let expected = (Vec3::ONE - camera_transform.translation).normalize();
    assert!((*camera_transform.forward() - expected).length() < 1e-4);
}

#[test]
fn test_camera_tracks_player_within_same_tick() {
    let mut app = physics_app();
    let player = spawn_player(&mut app, Vec3::ZERO);
    let camera = spawn_camera(&mut app);

    set_key(&mut app, MoveKey::Backward, true);
    set_key(&mut app, MoveKey::Left, true);
    run_ticks(&mut app, 30);

    // В конце тика камера стоит ровно на player + offset — никакого лага
    let offset = FollowCamera::default().offset;
    let camera_position = app.world().get::<Transform>(camera).unwrap().translation;
    let position = player_position(&app, player);
    assert!(
        (camera_position - position - offset).length() < 1e-3,
        "camera {:?} vs player {:?}",
        camera_position,
        position
    );
}
