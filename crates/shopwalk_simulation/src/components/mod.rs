//! ECS Components для сцены
//!
//! Организация по доменам:
//! - player: player control marker (Player)
//! - movement: скорость перемещения (MovementSpeed)
//! - opacity: состояние прозрачности сценовых объектов (SceneOpacity)

pub mod movement;
pub mod opacity;
pub mod player;

// Re-exports для удобного импорта
pub use movement::*;
pub use opacity::*;
pub use player::*;
