//! Opacity sync — SceneOpacity → StandardMaterial alpha
//!
//! Occlusion pass пишет только компонент; рендер-представление догоняет
//! здесь, по Changed-фильтру. Материалы occludables заранее созданы с
//! AlphaMode::Blend (см. setup_scene), так что запись alpha достаточно.

use bevy::prelude::*;

use shopwalk_simulation::SceneOpacity;

pub struct OpacitySyncPlugin;

impl Plugin for OpacitySyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_opacity_to_materials);
    }
}

/// Зеркалит alpha компонента в material объекта
fn sync_opacity_to_materials(
    query: Query<(&SceneOpacity, &MeshMaterial3d<StandardMaterial>), Changed<SceneOpacity>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (opacity, material_handle) in query.iter() {
        // Материал мог быть выгружен вместе с объектом — no-op
        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };
        material.base_color.set_alpha(opacity.alpha);
    }
}
