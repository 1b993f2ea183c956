//! Headless сессия SHOPWALK
//!
//! Запускает control loop без рендера: Rapier context настоящий,
//! клавиши — скриптованные события. Полезно для smoke-прогона
//! пайплайна input → movement → physics → camera → occlusion.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;

use shopwalk_simulation::{
    create_headless_app, log_info, spawn_controlled_character, ControlConfig, DirectionalKeyEvent,
    MoveKey, OcclusionState, SceneOpacity,
};

const TICK: Duration = Duration::from_micros(16_667); // ~60Hz

fn main() {
    log_info("Starting SHOPWALK headless session");

    let mut app = create_headless_app();
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
    // Ровно один fixed тик на app.update(), без привязки к wall clock
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    let config = ControlConfig::default();

    // Игрок в (1,1,1), «здание» на диагонали к камере, камера на offset'е
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_controlled_character(&mut commands, Vec3::ONE, &config)
    };
    app.world_mut().spawn((
        Transform::from_xyz(4.0, 4.0, 4.0),
        RigidBody::Fixed,
        Collider::cuboid(1.5, 1.5, 1.5),
        SceneOpacity::default(),
    ));
    app.world_mut().spawn((
        Transform::from_translation(Vec3::ONE + config.follow_offset())
            .looking_at(Vec3::ONE, Vec3::Y),
        config.follow_camera(),
    ));
    app.world_mut().flush();

    // Скрипт: 2 секунды вперёд, секунда вправо, полсекунды стоим
    set_key(&mut app, MoveKey::Forward, true);
    run_ticks(&mut app, 120, player);
    set_key(&mut app, MoveKey::Forward, false);

    set_key(&mut app, MoveKey::Right, true);
    run_ticks(&mut app, 60, player);
    set_key(&mut app, MoveKey::Right, false);

    run_ticks(&mut app, 30, player);

    log_info("Session complete");
}

fn set_key(app: &mut App, key: MoveKey, pressed: bool) {
    app.world_mut()
        .send_event(DirectionalKeyEvent { key, pressed });
}

fn run_ticks(app: &mut App, ticks: usize, player: Entity) {
    for tick in 0..ticks {
        app.update();

        if tick % 30 == 0 {
            let position = app
                .world()
                .get::<Transform>(player)
                .map(|t| t.translation)
                .unwrap_or(Vec3::NAN);
            let occluders = app.world().resource::<OcclusionState>().previous.len();
            log_info(&format!(
                "tick {}: player {:?}, occluders {}",
                tick, position, occluders
            ));
        }
    }
}
