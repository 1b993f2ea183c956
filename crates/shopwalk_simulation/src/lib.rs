//! SHOPWALK Simulation Core
//!
//! Headless control loop интерактивной 3D-сцены на Bevy 0.16:
//! - input: directional key state (WASD snapshot)
//! - movement: keyboard → velocity → Rapier
//! - camera: follow controller (fixed offset + look-at)
//! - occlusion: line-of-sight fade для геометрии между камерой и игроком
//!
//! HYBRID ARCHITECTURE:
//! - Этот crate = control layer (game state, движение, occlusion diff)
//! - Rapier = физика (velocity integration, raycast)
//! - shopwalk_client = рендер (meshes, materials, window input)

use bevy::prelude::*;

// Публичные модули
pub mod camera;
pub mod components;
pub mod config;
pub mod input;
pub mod logger;
pub mod movement;
pub mod occlusion;

// Re-export базовых типов для удобства
pub use camera::{follow_player_camera, CameraFollowPlugin, FollowCamera, FollowMode};
pub use components::*;
pub use config::ControlConfig;
pub use input::{apply_directional_key_events, DirectionalKeyEvent, DirectionalKeys, MoveKey};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use movement::{apply_player_velocity, compute_velocity, spawn_controlled_character, MovementPlugin};
pub use occlusion::{update_camera_occlusion, OcclusionPlugin, OcclusionState};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Порядок в FixedUpdate:
/// 1. MovementPlugin — input → velocity (до PhysicsSet::SyncBackend)
/// 2. Rapier — интеграция position (внешний plugin, добавляет client/driver)
/// 3. CameraFollowPlugin — camera = player + offset (после Writeback)
/// 4. OcclusionPlugin — raycast + enter/exit diff (после camera follow)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для control loop (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Конфигурация по умолчанию (client может переопределить insert_resource'ом)
            .init_resource::<ControlConfig>()
            // Подсистемы
            .add_plugins((MovementPlugin, CameraFollowPlugin, OcclusionPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Rapier plugin НЕ добавляется здесь: тесты skip-пути проверяют поведение
/// без физического контекста. Driver/тесты добавляют его сами.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        // Rapier читает GlobalTransform — нужна propagation даже без рендера
        .add_plugins(bevy::transform::TransformPlugin)
        .add_plugins(SimulationPlugin);

    app
}
