//! Camera spawning, keyboard handling and view application

use bevy::prelude::*;

use crate::camera::state::CameraState;
use crate::config::SceneConfig;

/// Marker for the scene camera driven by [`CameraState`]
#[derive(Component)]
pub struct MainCamera;

/// Key symbol for the keys bound to camera presets
pub fn key_symbol(key: KeyCode) -> Option<char> {
    match key {
        KeyCode::KeyA => Some('a'),
        KeyCode::KeyW => Some('w'),
        KeyCode::KeyD => Some('d'),
        KeyCode::KeyS => Some('s'),
        _ => None,
    }
}

pub fn spawn_main_camera(
    mut commands: Commands,
    config: Res<SceneConfig>,
    state: Res<CameraState>,
) {
    let projection = &config.projection;
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: projection.fov_degrees.to_radians(),
            near: projection.near,
            far: projection.far,
            ..default()
        }),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        state.view_transform(),
        MainCamera,
        Name::new("Main Camera"),
    ));
}

/// Feed key presses into the preset state machine
pub fn handle_camera_keys(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<CameraState>) {
    for symbol in keys.get_just_pressed().copied().filter_map(key_symbol) {
        if let Some(preset) = state.handle_key(symbol) {
            info!("[CAMERA] view -> {}", preset);
        }
    }
}

/// Snap the camera to the current state whenever it changes
pub fn apply_camera_view(
    state: Res<CameraState>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    if !state.is_changed() {
        return;
    }
    let view = state.view_transform();
    for mut transform in &mut cameras {
        *transform = view;
    }
}
