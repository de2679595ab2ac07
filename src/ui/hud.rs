//! Key help overlay and current view label

use bevy::prelude::*;

use crate::camera::{CameraPreset, CameraState, KEY_HELP};

/// Marker for the overlay text
#[derive(Component)]
pub struct HelpOverlay;

pub fn overlay_text(preset: CameraPreset) -> String {
    format!("{}\n\nView: {}", KEY_HELP, preset)
}

pub fn spawn_help_overlay(mut commands: Commands, state: Res<CameraState>) {
    info!("[UI] keys:\n{}", KEY_HELP);
    commands.spawn((
        Text::new(overlay_text(state.preset())),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.8, 0.9, 1.0, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HelpOverlay,
    ));
}

pub fn update_help_overlay(
    state: Res<CameraState>,
    mut overlays: Query<&mut Text, With<HelpOverlay>>,
) {
    if !state.is_changed() {
        return;
    }
    for mut text in &mut overlays {
        **text = overlay_text(state.preset());
    }
}
