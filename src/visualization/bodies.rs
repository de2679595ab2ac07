//! Spawning and posing of the textured bodies

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::config::SceneConfig;
use crate::orbital::{BodyAngles, OrbitalBody, SimulationClock, SolarSystem};
use crate::textures::TextureRegistry;

const SPHERE_SECTORS: u32 = 48;
const SPHERE_STACKS: u32 = 24;

/// Marker for the central star
#[derive(Component)]
pub struct Sun;

/// Marker for the star sphere surrounding the scene
#[derive(Component)]
pub struct Backdrop;

/// Marker for a ring attached to its body
#[derive(Component)]
pub struct PlanetRing;

/// Pose of `body` for the given angles: `Ry(year) * T(distance, 0, 0) * Ry(day)`.
pub fn body_pose(body: &OrbitalBody, angles: BodyAngles) -> Transform {
    let year = Quat::from_rotation_y(angles.year_deg.to_radians());
    let day = Quat::from_rotation_y(angles.day_deg.to_radians());
    Transform {
        translation: year * Vec3::new(body.distance(), 0.0, 0.0),
        rotation: year * day,
        ..default()
    }
}

/// Rings are drawn in the XY plane and laid into the orbital plane.
pub fn ring_local_transform() -> Transform {
    Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2))
}

fn sphere_mesh(meshes: &mut Assets<Mesh>, radius: f32) -> Handle<Mesh> {
    meshes.add(Sphere::new(radius).mesh().uv(SPHERE_SECTORS, SPHERE_STACKS))
}

/// Spawn the sun and the star backdrop at the origin
pub fn spawn_fixed_spheres(
    mut commands: Commands,
    config: Res<SceneConfig>,
    registry: Res<TextureRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) -> Result {
    let sun_texture = registry.handle(&config.sun.texture)?;
    commands.spawn((
        Mesh3d(sphere_mesh(&mut meshes, config.sun.radius)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(sun_texture),
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
        Sun,
        Name::new("Sun"),
    ));

    let backdrop_texture = registry.handle(&config.backdrop.texture)?;
    commands.spawn((
        Mesh3d(sphere_mesh(&mut meshes, config.backdrop.radius)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(backdrop_texture),
            unlit: true,
            // Seen from inside
            cull_mode: None,
            ..default()
        })),
        Transform::IDENTITY,
        Backdrop,
        Name::new("Backdrop"),
    ));
    Ok(())
}

/// Spawn one entity per orbital body, plus its ring when it has one
pub fn spawn_bodies(
    mut commands: Commands,
    system: Res<SolarSystem>,
    registry: Res<TextureRegistry>,
    clock: Res<SimulationClock>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) -> Result {
    for body in &system.bodies {
        let texture = registry.handle(body.texture())?;
        let entity = commands
            .spawn((
                Mesh3d(sphere_mesh(&mut meshes, body.radius())),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color_texture: Some(texture),
                    perceptual_roughness: 1.0,
                    metallic: 0.0,
                    ..default()
                })),
                body_pose(body, clock.transform_for(body)),
                body.clone(),
                Name::new(body.id().to_string()),
            ))
            .id();

        if let Some(ring) = body.ring() {
            let ring_texture = registry.handle(&ring.texture)?;
            commands.spawn((
                Mesh3d(meshes.add(Annulus::new(ring.inner_radius, ring.outer_radius))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color_texture: Some(ring_texture),
                    // The ring lies in the light's plane, so shading would leave it black
                    unlit: true,
                    cull_mode: None,
                    ..default()
                })),
                ring_local_transform(),
                PlanetRing,
                ChildOf(entity),
                Name::new(format!("{} ring", body.id())),
            ));
        }
    }
    info!("[SCENE] spawned {} bodies", system.bodies.len());
    Ok(())
}

/// Pose every body from the current clock.
///
/// Runs in `Update`, after the clock's `FixedUpdate` ticks for this frame, so
/// all bodies read the same counters.
pub fn update_body_transforms(
    clock: Res<SimulationClock>,
    mut bodies: Query<(&OrbitalBody, &mut Transform)>,
) {
    if !clock.is_changed() {
        return;
    }
    for (body, mut transform) in &mut bodies {
        *transform = body_pose(body, clock.transform_for(body));
    }
}
