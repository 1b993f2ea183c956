//! SHOPWALK client
//!
//! Окно + рендер поверх headless ядра: декларация сцены (свет, меши,
//! orthographic камера), мост клавиатуры в simulation events и синк
//! SceneOpacity → material alpha.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use shopwalk_simulation::{
    spawn_controlled_character, ControlConfig, SceneOpacity, SimulationPlugin,
};

mod input;
mod rendering;

use input::KeyboardBridgePlugin;
use rendering::OpacitySyncPlugin;

fn main() {
    shopwalk_simulation::init_logger();
    let config = load_config();

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "SHOPWALK".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Физика в fixed schedule, как и симуляция
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        // Control loop (headless ECS logic)
        .add_plugins(SimulationPlugin)
        // Клавиатура → DirectionalKeyEvent
        .add_plugins(KeyboardBridgePlugin)
        // SceneOpacity → material alpha
        .add_plugins(OpacitySyncPlugin)
        // Конфигурация поверх дефолтной
        .insert_resource(config)
        // Setup scene
        .add_systems(Startup, setup_scene)
        .add_systems(Update, draw_axis_ruler)
        .run();
}

/// Загружает ControlConfig из JSON (путь в SHOPWALK_CONFIG), иначе defaults
fn load_config() -> ControlConfig {
    let Ok(path) = std::env::var("SHOPWALK_CONFIG") else {
        return ControlConfig::default();
    };
    let config = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<ControlConfig>(&text).map_err(|e| e.to_string()));
    match config {
        Ok(config) => {
            shopwalk_simulation::log_info(&format!(
                "config loaded from {}: {}",
                path,
                serde_json::to_string(&config).unwrap_or_default()
            ));
            config
        }
        Err(error) => {
            shopwalk_simulation::log_error(&format!(
                "config {} unreadable ({}), falling back to defaults",
                path, error
            ));
            ControlConfig::default()
        }
    }
}

/// Spawn света, камеры, игрока и «здания»
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ControlConfig>,
) {
    // Три направленных источника (с +Z, +X, +Y) + тусклый ambient
    commands.spawn((
        DirectionalLight {
            illuminance: 5_000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 1_250.0,
            ..default()
        },
        Transform::from_xyz(4.0, 0.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 4.0, 0.0).looking_at(Vec3::ZERO, Vec3::X),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 60.0,
        affects_lightmapped_meshes: false,
    });

    // Игрок: физика из spawn helper'а + синий бокс-меш на том же entity
    let player = spawn_controlled_character(&mut commands, Vec3::new(0.0, 0.0, 0.0), &config);
    commands.entity(player).insert((
        Mesh3d(meshes.add(Cuboid::new(1.0, 2.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.1, 0.2, 0.9),
            ..default()
        })),
    ));

    // «Здание» — единственный occludable: blend-материал сразу, чтобы
    // записи alpha вступали в силу без подмены материала
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(3.0, 3.0, 3.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::BLACK,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_xyz(1.0, 1.0, 1.0),
        RigidBody::Fixed,
        Collider::cuboid(1.5, 1.5, 1.5),
        SceneOpacity::default(),
    ));

    // Orthographic камера на диагональном offset'е; дальше её водит
    // follow system
    commands.spawn((
        Camera3d::default(),
        Projection::Orthographic(OrthographicProjection {
            scale: 0.033,
            ..OrthographicProjection::default_3d()
        }),
        Transform::from_translation(config.follow_offset()).looking_at(Vec3::ZERO, Vec3::Y),
        config.follow_camera(),
    ));
}

/// Мировой ruler: три 10-юнитовых отрезка вдоль осей из origin
fn draw_axis_ruler(mut gizmos: Gizmos) {
    gizmos.line(Vec3::ZERO, Vec3::X * 10.0, Color::WHITE);
    gizmos.line(Vec3::ZERO, Vec3::Y * 10.0, Color::WHITE);
    gizmos.line(Vec3::ZERO, Vec3::Z * 10.0, Color::WHITE);
}
