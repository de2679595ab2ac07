// Textured planets orbiting a central light, with preset camera views.

use anyhow::Context;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin, WindowResolution};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod camera;
mod config;
mod orbital;
mod raster;
mod textures;
mod ui;
mod visualization;

use camera::CameraPlugin;
use config::SceneConfig;
use orbital::{OrbitalPlugin, SolarSystem};
use textures::{TexturePlugin, TextureRegistry};
use ui::UiPlugin;
use visualization::VisualizationPlugin;

fn main() -> anyhow::Result<()> {
    // Window settings come from the config, so it is read before logging is up.
    let (config, source) =
        SceneConfig::discover().context("failed to load scene configuration")?;

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: config.window.title.clone(),
            resolution: WindowResolution::new(config.window.width, config.window.height),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    info!("[INIT] scene configuration: {}", source);
    config
        .validate()
        .with_context(|| format!("invalid scene configuration ({})", source))?;
    let bodies = config.orbital_bodies()?;

    // Every texture is decoded before the first frame; any failure aborts startup.
    let mut registry = TextureRegistry::default();
    registry
        .load_all(&config.textures)
        .context("failed to load textures")?;

    app.insert_resource(registry)
        .insert_resource(SolarSystem::new(bodies))
        .add_plugins((
            TexturePlugin,
            OrbitalPlugin {
                tick_hz: config.tick_hz,
            },
            CameraPlugin,
            VisualizationPlugin,
            UiPlugin,
        ))
        .insert_resource(config);

    app.run();
    Ok(())
}
