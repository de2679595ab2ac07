//! Upload decoded textures into Bevy image assets

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::raster::RasterImage;
use crate::textures::TextureRegistry;

/// Expand RGB to RGBA8, reversing row order.
///
/// Containers store the bottom row first while Bevy samples with a top-left
/// origin, so rows are flipped here rather than in the decoder.
pub fn rgba8_top_down(image: &RasterImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.pixels().len() * 4);
    for y in (0..image.height()).rev() {
        if let Some(row) = image.row(y) {
            for [r, g, b] in row {
                out.extend_from_slice(&[*r, *g, *b, u8::MAX]);
            }
        }
    }
    out
}

/// Convert a decoded image into a sampled sRGB texture.
pub fn to_bevy_image(image: &RasterImage) -> Image {
    if image.pixels().is_empty() {
        // wgpu rejects zero-sized textures
        return Image::new_fill(
            Extent3d::default(),
            TextureDimension::D2,
            &[0, 0, 0, u8::MAX],
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD,
        );
    }

    Image::new(
        Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba8_top_down(image),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// Startup system: upload every registered texture and record its handle.
pub fn upload_textures(mut registry: ResMut<TextureRegistry>, mut images: ResMut<Assets<Image>>) {
    let mut uploaded = 0;
    for (id, entry) in registry.entries_mut() {
        if entry.handle.is_some() {
            continue;
        }
        if entry.image.pixels().is_empty() {
            warn!("[TEXTURES] {} is empty, using a black placeholder", id);
        }
        entry.handle = Some(images.add(to_bevy_image(&entry.image)));
        uploaded += 1;
    }
    info!("[TEXTURES] uploaded {} textures", uploaded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::decode;
    use crate::raster::tests::encode;
    use crate::textures::registry::tests::{unique_temp_dir, write_texture};
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_rgba_rows_are_flipped() {
        let pixels = [[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 11, 12]];
        let image = decode(encode(2, 2, &pixels).as_slice()).unwrap();

        let rgba = rgba8_top_down(&image);
        assert_eq!(
            rgba,
            vec![7, 8, 9, 255, 10, 11, 12, 255, 1, 2, 3, 255, 4, 5, 6, 255]
        );
    }

    #[test]
    fn test_bevy_image_dimensions() {
        let image = decode(encode(3, 5, &[[0, 0, 0]; 15]).as_slice()).unwrap();
        let bevy_image = to_bevy_image(&image);
        assert_eq!(bevy_image.width(), 3);
        assert_eq!(bevy_image.height(), 5);
    }

    #[test]
    fn test_upload_assigns_handles() {
        let dir = unique_temp_dir("upload_assigns_handles");
        let mut registry = TextureRegistry::default();
        registry
            .load_all([
                ("sun", write_texture(&dir, "sun", 2, 2)),
                ("earth", write_texture(&dir, "earth", 4, 1)),
            ])
            .unwrap();

        let mut world = World::new();
        world.init_resource::<Assets<Image>>();
        world.insert_resource(registry);
        world
            .run_system_once(upload_textures)
            .expect("upload system should run");

        let registry = world.resource::<TextureRegistry>();
        let sun = registry.handle("sun").expect("sun uploaded");
        let earth = registry.handle("earth").expect("earth uploaded");
        assert_ne!(sun, earth);

        let images = world.resource::<Assets<Image>>();
        assert_eq!(images.len(), 2);
        assert_eq!(images.get(&earth).map(|image| image.width()), Some(4));
    }
}
