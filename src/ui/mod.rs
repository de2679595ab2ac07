//! User interface module
//!
//! A single text overlay listing the camera keys and the active view.

use bevy::prelude::*;

pub mod hud;

/// Plugin for the on-screen overlay
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, hud::spawn_help_overlay)
            .add_systems(Update, hud::update_help_overlay);
    }
}
