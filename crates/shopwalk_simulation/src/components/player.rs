//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Камера следует за entity С этим компонентом, occlusion pass
/// проверяет видимость именно до него.
///
/// # Single-player
/// В сцене ровно один entity имеет этот компонент; системы используют
/// `single()` и пропускают тик пока он не заспавнен.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
