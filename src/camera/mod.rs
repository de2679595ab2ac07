//! Camera module
//!
//! A fixed set of view presets selected from the keyboard. Switching is
//! instantaneous: the camera snaps to the new preset on the next frame.

use bevy::prelude::*;

pub mod state;
pub mod systems;

pub use state::{CameraPreset, CameraState, KEY_HELP};

/// Plugin for the preset camera
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, systems::spawn_main_camera)
            .add_systems(
                Update,
                (systems::handle_camera_keys, systems::apply_camera_view).chain(),
            );
    }
}
