//! Texture asset management
//!
//! Decoded raster images are owned by the [`TextureRegistry`] and uploaded to
//! the renderer once at startup.

use bevy::prelude::*;

pub mod registry;
pub mod upload;

pub use registry::TextureRegistry;
pub use upload::upload_textures;

/// Plugin that uploads the pre-loaded registry into image assets
pub struct TexturePlugin;

impl Plugin for TexturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TextureRegistry>()
            .add_systems(Startup, upload_textures);
    }
}
