//! Scene configuration
//!
//! Loaded from JSON before the app starts. Texture locators are resolved here
//! so the rest of the crate only sees concrete paths.

use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::orbital::{BodyError, DEFAULT_TICK_HZ, OrbitalBody, RingSpec};

pub const CONFIG_FILE_NAME: &str = "scene.json";
pub const DEFAULT_ASSET_DIR: &str = "assets";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid body {id}: {source}")]
    InvalidBody {
        id: String,
        #[source]
        source: BodyError,
    },

    #[error("duplicate body id: {0}")]
    DuplicateBody(String),

    #[error("{owner} references unknown texture {texture}")]
    MissingTexture { owner: String, texture: String },

    #[error("{field} must be a positive number, got {value}")]
    InvalidSetting { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Solar System".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            // Keeps the far side of the star backdrop inside the frustum
            far: 100.0,
        }
    }
}

/// Textured sphere fixed at the origin (the sun, the star backdrop)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedSphereConfig {
    pub texture: String,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingConfig {
    pub texture: String,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyConfig {
    pub id: String,
    pub texture: String,
    pub distance: f32,
    pub radius: f32,
    pub year_rate: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<RingConfig>,
}

/// Scene configuration resource
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    /// Simulation clock ticks per second
    pub tick_hz: f64,
    pub projection: ProjectionConfig,
    pub ambient_brightness: f32,
    /// Texture identifier to source locator
    pub textures: BTreeMap<String, PathBuf>,
    pub sun: FixedSphereConfig,
    pub backdrop: FixedSphereConfig,
    pub bodies: Vec<BodyConfig>,
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::BuiltIn => f.write_str("built-in default scene"),
        }
    }
}

fn body(id: &str, distance: f32, radius: f32, year_rate: f32) -> BodyConfig {
    BodyConfig {
        id: id.to_string(),
        texture: id.to_string(),
        distance,
        radius,
        year_rate,
        ring: None,
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut saturn = body("saturn", 11.5, 0.8, 0.03);
        saturn.ring = Some(RingConfig {
            texture: "saturn_ring".to_string(),
            inner_radius: 1.0,
            outer_radius: 1.5,
        });

        let bodies = vec![
            body("mercury", 2.0, 0.06, 4.14),
            body("venus", 3.5, 0.18, 1.62),
            body("earth", 5.0, 0.2, 1.0),
            body("mars", 6.5, 0.07, 0.53),
            body("jupiter", 9.0, 1.0, 0.08),
            saturn,
            body("uranus", 14.0, 0.6, 0.01189),
            body("neptune", 16.0, 0.6, 0.006),
        ];

        let textures = [
            "sun",
            "stars",
            "mercury",
            "venus",
            "earth",
            "mars",
            "jupiter",
            "saturn",
            "saturn_ring",
            "uranus",
            "neptune",
        ]
        .into_iter()
        .map(|name| (name.to_string(), PathBuf::from(format!("{}.bmp", name))))
        .collect();

        Self {
            window: WindowConfig::default(),
            tick_hz: DEFAULT_TICK_HZ,
            projection: ProjectionConfig::default(),
            ambient_brightness: 80.0,
            textures,
            sun: FixedSphereConfig {
                texture: "sun".to_string(),
                radius: 1.2,
            },
            backdrop: FixedSphereConfig {
                texture: "stars".to_string(),
                radius: 20.0,
            },
            bodies,
        }
    }
}

impl SceneConfig {
    /// Find and load the scene configuration.
    ///
    /// Search order:
    /// - `./assets/scene.json`
    /// - the platform config directory (`~/.config/solar-system/scene.json` on Linux)
    /// - the built-in scene, with textures under `./assets`
    pub fn discover() -> Result<(Self, ConfigSource), ConfigError> {
        let mut candidates = vec![Path::new(DEFAULT_ASSET_DIR).join(CONFIG_FILE_NAME)];
        if let Some(dirs) = ProjectDirs::from("", "", "solar-system") {
            candidates.push(dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        for path in candidates {
            if path.is_file() {
                let config = Self::from_file(&path)?;
                return Ok((config, ConfigSource::File(path)));
            }
        }

        let mut config = Self::default();
        config.resolve_locators(Path::new(DEFAULT_ASSET_DIR));
        Ok((config, ConfigSource::BuiltIn))
    }

    /// Load a JSON config; relative locators resolve against its directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: SceneConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.resolve_locators(path.parent().unwrap_or(Path::new(".")));
        Ok(config)
    }

    pub fn resolve_locators(&mut self, base_dir: &Path) {
        for locator in self.textures.values_mut() {
            if locator.is_relative() {
                *locator = base_dir.join(&*locator);
            }
        }
    }

    /// Check settings, body invariants and texture references.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(ConfigError::InvalidSetting {
                field: "tick_hz",
                value: self.tick_hz,
            });
        }
        for (field, value) in [
            ("sun.radius", self.sun.radius),
            ("backdrop.radius", self.backdrop.radius),
            ("projection.fov_degrees", self.projection.fov_degrees),
            ("projection.near", self.projection.near),
            ("projection.far", self.projection.far),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidSetting {
                    field,
                    value: f64::from(value),
                });
            }
        }

        self.orbital_bodies()?;

        let mut references = vec![
            ("sun".to_string(), &self.sun.texture),
            ("backdrop".to_string(), &self.backdrop.texture),
        ];
        for body in &self.bodies {
            references.push((body.id.clone(), &body.texture));
            if let Some(ring) = &body.ring {
                references.push((format!("{} ring", body.id), &ring.texture));
            }
        }
        for (owner, texture) in references {
            if !self.textures.contains_key(texture) {
                return Err(ConfigError::MissingTexture {
                    owner,
                    texture: texture.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build validated bodies in configuration order.
    pub fn orbital_bodies(&self) -> Result<Vec<OrbitalBody>, ConfigError> {
        let mut seen = HashSet::new();
        let mut bodies = Vec::with_capacity(self.bodies.len());
        for cfg in &self.bodies {
            if !seen.insert(cfg.id.as_str()) {
                return Err(ConfigError::DuplicateBody(cfg.id.clone()));
            }
            let invalid = |source| ConfigError::InvalidBody {
                id: cfg.id.clone(),
                source,
            };
            let mut body =
                OrbitalBody::new(&cfg.id, &cfg.texture, cfg.distance, cfg.radius, cfg.year_rate)
                    .map_err(invalid)?;
            if let Some(ring) = &cfg.ring {
                body = body
                    .with_ring(RingSpec {
                        texture: ring.texture.clone(),
                        inner_radius: ring.inner_radius,
                        outer_radius: ring.outer_radius,
                    })
                    .map_err(invalid)?;
            }
            bodies.push(body);
        }
        Ok(bodies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "solar-system-config-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("Failed to create temp dir");
        dir
    }

    #[test]
    fn test_default_scene_is_valid() {
        let config = SceneConfig::default();
        config.validate().expect("default scene should validate");

        let bodies = config.orbital_bodies().unwrap();
        assert_eq!(bodies.len(), 8);
        assert_eq!(bodies[0].id(), "mercury");
        let ringed: Vec<_> = bodies.iter().filter(|b| b.has_ring()).collect();
        assert_eq!(ringed.len(), 1);
        assert_eq!(ringed[0].id(), "saturn");
        assert_eq!(config.textures.len(), 11);
    }

    #[test]
    fn test_from_file_resolves_relative_locators() {
        let dir = unique_temp_dir("resolve");
        let path = dir.join(CONFIG_FILE_NAME);
        let json = r#"{
            "tick_hz": 30.0,
            "textures": {
                "sun": "textures/sun.bmp",
                "stars": "/opt/sky/stars.bmp",
                "rock": "rock.bmp"
            },
            "bodies": [
                { "id": "rock", "texture": "rock", "distance": 3.0, "radius": 0.5, "year_rate": 2.0 }
            ]
        }"#;
        fs::write(&path, json).unwrap();

        let config = SceneConfig::from_file(&path).expect("config should load");
        assert_eq!(config.tick_hz, 30.0);
        assert_eq!(config.textures["sun"], dir.join("textures/sun.bmp"));
        assert_eq!(config.textures["stars"], PathBuf::from("/opt/sky/stars.bmp"));
        assert_eq!(config.bodies.len(), 1);
        // Unspecified sections fall back to defaults
        assert_eq!(config.window.title, "Solar System");
        assert_eq!(config.sun.texture, "sun");
        config.validate().expect("config should validate");
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = unique_temp_dir("parse_error");
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let err = SceneConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = unique_temp_dir("missing_file");
        let err = SceneConfig::from_file(&dir.join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_body_rejected() {
        let mut config = SceneConfig::default();
        config.bodies[2].radius = 0.0;
        let err = config.validate().unwrap_err();
        match err {
            ConfigError::InvalidBody { id, source } => {
                assert_eq!(id, "earth");
                assert_eq!(source, BodyError::NonPositiveRadius(0.0));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_duplicate_body_rejected() {
        let mut config = SceneConfig::default();
        let copy = config.bodies[0].clone();
        config.bodies.push(copy);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateBody(id)) if id == "mercury"
        ));
    }

    #[test]
    fn test_unknown_texture_reference_rejected() {
        let mut config = SceneConfig::default();
        config.textures.remove("saturn_ring");
        match config.validate().unwrap_err() {
            ConfigError::MissingTexture { owner, texture } => {
                assert_eq!(owner, "saturn ring");
                assert_eq!(texture, "saturn_ring");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_tick_rate_rejected() {
        let config = SceneConfig {
            tick_hz: 0.0,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting {
                field: "tick_hz",
                ..
            })
        ));
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = SceneConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.bodies.len(), config.bodies.len());
        assert_eq!(parsed.textures, config.textures);
        parsed.validate().unwrap();
    }
}
