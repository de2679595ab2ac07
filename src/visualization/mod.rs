//! Visualization module
//!
//! Turns the registry, the clock and the body list into Bevy entities. This
//! is the only part of the crate that touches meshes, materials and lights.

use bevy::prelude::*;

pub mod bodies;
pub mod lighting;

use crate::textures::upload_textures;

/// Plugin for scene rendering
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                lighting::setup_lighting,
                bodies::spawn_fixed_spheres,
                bodies::spawn_bodies,
            )
                .after(upload_textures),
        )
        .add_systems(Update, bodies::update_body_transforms);
    }
}
