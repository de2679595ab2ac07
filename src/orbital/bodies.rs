//! Orbital body parameters

use bevy::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BodyError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("orbital distance must be >= 0, got {0}")]
    NegativeDistance(f32),

    #[error("body radius must be > 0, got {0}")]
    NonPositiveRadius(f32),

    #[error("ring radii must satisfy 0 <= inner < outer, got {inner}..{outer}")]
    InvalidRing { inner: f32, outer: f32 },
}

/// Flat ring drawn around a body in its orbital plane
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    pub texture: String,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

/// Static parameters of one orbiting body.
///
/// Values are validated on construction and never change afterwards.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitalBody {
    id: String,
    texture: String,
    distance: f32,
    radius: f32,
    year_rate: f32,
    ring: Option<RingSpec>,
}

impl OrbitalBody {
    pub fn new(
        id: impl Into<String>,
        texture: impl Into<String>,
        distance: f32,
        radius: f32,
        year_rate: f32,
    ) -> Result<Self, BodyError> {
        for (field, value) in [
            ("distance", distance),
            ("radius", radius),
            ("year_rate", year_rate),
        ] {
            if !value.is_finite() {
                return Err(BodyError::NotFinite { field, value });
            }
        }
        if distance < 0.0 {
            return Err(BodyError::NegativeDistance(distance));
        }
        if radius <= 0.0 {
            return Err(BodyError::NonPositiveRadius(radius));
        }

        Ok(Self {
            id: id.into(),
            texture: texture.into(),
            distance,
            radius,
            year_rate,
            ring: None,
        })
    }

    pub fn with_ring(mut self, ring: RingSpec) -> Result<Self, BodyError> {
        let (inner, outer) = (ring.inner_radius, ring.outer_radius);
        if !(inner.is_finite() && outer.is_finite() && inner >= 0.0 && inner < outer) {
            return Err(BodyError::InvalidRing { inner, outer });
        }
        self.ring = Some(ring);
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Distance from the central body in scene units
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Orbital angular speed relative to the reference body
    pub fn year_rate(&self) -> f32 {
        self.year_rate
    }

    pub fn ring(&self) -> Option<&RingSpec> {
        self.ring.as_ref()
    }

    pub fn has_ring(&self) -> bool {
        self.ring.is_some()
    }
}

/// Every orbiting body in the scene
#[derive(Resource, Debug, Default, Clone)]
pub struct SolarSystem {
    pub bodies: Vec<OrbitalBody>,
}

impl SolarSystem {
    pub fn new(bodies: Vec<OrbitalBody>) -> Self {
        Self { bodies }
    }

    pub fn get(&self, id: &str) -> Option<&OrbitalBody> {
        self.bodies.iter().find(|body| body.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(inner: f32, outer: f32) -> RingSpec {
        RingSpec {
            texture: "saturn_ring".to_string(),
            inner_radius: inner,
            outer_radius: outer,
        }
    }

    #[test]
    fn test_valid_body() {
        let body = OrbitalBody::new("earth", "earth", 5.0, 0.2, 1.0).unwrap();
        assert_eq!(body.id(), "earth");
        assert_eq!(body.distance(), 5.0);
        assert!(!body.has_ring());
    }

    #[test]
    fn test_central_body_distance_allowed() {
        assert!(OrbitalBody::new("core", "sun", 0.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            OrbitalBody::new("x", "x", -1.0, 1.0, 1.0).unwrap_err(),
            BodyError::NegativeDistance(-1.0)
        );
        assert_eq!(
            OrbitalBody::new("x", "x", 1.0, 0.0, 1.0).unwrap_err(),
            BodyError::NonPositiveRadius(0.0)
        );
        assert!(matches!(
            OrbitalBody::new("x", "x", 1.0, 1.0, f32::NAN),
            Err(BodyError::NotFinite {
                field: "year_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_ring_validation() {
        let saturn = OrbitalBody::new("saturn", "saturn", 11.5, 0.8, 0.03).unwrap();
        let ringed = saturn.clone().with_ring(ring(1.0, 1.5)).unwrap();
        assert!(ringed.has_ring());
        assert_eq!(ringed.ring().map(|r| r.outer_radius), Some(1.5));

        assert!(matches!(
            saturn.with_ring(ring(1.5, 1.0)),
            Err(BodyError::InvalidRing { .. })
        ));
    }

    #[test]
    fn test_solar_system_lookup() {
        let system = SolarSystem::new(vec![
            OrbitalBody::new("mercury", "mercury", 2.0, 0.06, 4.14).unwrap(),
            OrbitalBody::new("venus", "venus", 3.5, 0.18, 1.62).unwrap(),
        ]);
        assert_eq!(system.get("venus").map(|b| b.year_rate()), Some(1.62));
        assert!(system.get("pluto").is_none());
    }
}
