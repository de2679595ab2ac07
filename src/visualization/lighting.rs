//! Lighting: a point light inside the sun plus a low ambient term

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::config::SceneConfig;

/// Luminous power of the sun light, tuned for the scene's unit scale
const SUN_INTENSITY_LM: f32 = 40_000_000.0;

/// Marker component for the sun point light
#[derive(Component)]
pub struct SunLight;

pub fn setup_lighting(mut commands: Commands, config: Res<SceneConfig>) {
    // Normal ambient range; the bodies are lit mainly by the sun
    commands.insert_resource(GlobalAmbientLight {
        brightness: config.ambient_brightness,
        ..default()
    });

    commands.spawn((
        PointLight {
            intensity: SUN_INTENSITY_LM,
            // Must reach the outermost orbit
            range: config.backdrop.radius,
            shadows_enabled: false,
            ..default()
        },
        Transform::IDENTITY,
        SunLight,
        Name::new("Sun Light"),
    ));
}
