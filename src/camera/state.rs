//! Camera preset state machine

use bevy::prelude::*;
use std::fmt;

/// Keyboard help printed at startup and shown in the overlay
pub const KEY_HELP: &str = "a: front view\nw: top view\nd: side view\ns: perspective view";

/// Named view presets. Every preset can be selected from every other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraPreset {
    Front,
    Top,
    Side,
    Perspective,
}

/// Eye position, look target and up vector of a view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPreset {
    pub const ALL: [CameraPreset; 4] = [
        CameraPreset::Front,
        CameraPreset::Top,
        CameraPreset::Side,
        CameraPreset::Perspective,
    ];

    /// Preset bound to a key symbol, case-insensitive
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'a' => Some(CameraPreset::Front),
            'w' => Some(CameraPreset::Top),
            'd' => Some(CameraPreset::Side),
            's' => Some(CameraPreset::Perspective),
            _ => None,
        }
    }

    pub fn view(self) -> CameraView {
        match self {
            CameraPreset::Front => CameraView {
                eye: Vec3::new(0.0, 0.0, 20.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
            },
            // Up is tilted toward +Z so it is never parallel to the view direction
            CameraPreset::Top => CameraView {
                eye: Vec3::new(0.0, 20.0, 0.0),
                target: Vec3::ZERO,
                up: Vec3::new(0.0, 1.0, 1.0),
            },
            CameraPreset::Side => CameraView {
                eye: Vec3::new(20.0, 0.0, 0.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
            },
            CameraPreset::Perspective => CameraView {
                eye: Vec3::new(10.0, 12.0, 13.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
            },
        }
    }
}

impl fmt::Display for CameraPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CameraPreset::Front => "Front",
            CameraPreset::Top => "Top",
            CameraPreset::Side => "Side",
            CameraPreset::Perspective => "Perspective",
        };
        f.write_str(name)
    }
}

/// Current view, written only by the keyboard handler.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    preset: CameraPreset,
    view: CameraView,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(CameraPreset::Perspective)
    }
}

impl CameraState {
    pub fn new(preset: CameraPreset) -> Self {
        Self {
            preset,
            view: preset.view(),
        }
    }

    pub fn preset(&self) -> CameraPreset {
        self.preset
    }

    pub fn eye(&self) -> Vec3 {
        self.view.eye
    }

    pub fn target(&self) -> Vec3 {
        self.view.target
    }

    pub fn up(&self) -> Vec3 {
        self.view.up
    }

    /// Snap to `preset`, replacing eye, target and up together.
    pub fn select(&mut self, preset: CameraPreset) {
        self.preset = preset;
        self.view = preset.view();
    }

    /// Apply a key press. Unknown symbols leave the state untouched.
    /// Returns the selected preset when the symbol was recognized.
    pub fn handle_key(&mut self, symbol: char) -> Option<CameraPreset> {
        let preset = CameraPreset::from_symbol(symbol)?;
        self.select(preset);
        Some(preset)
    }

    /// World transform of a camera placed according to this state
    pub fn view_transform(&self) -> Transform {
        Transform::from_translation(self.view.eye).looking_at(self.view.target, self.view.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_initial_state_is_perspective() {
        let state = CameraState::default();
        assert_eq!(state.preset(), CameraPreset::Perspective);
        assert_eq!(state.eye(), Vec3::new(10.0, 12.0, 13.0));
        assert_eq!(state.target(), Vec3::ZERO);
        assert_eq!(state.up(), Vec3::Y);
    }

    #[test]
    fn test_top_then_perspective_round_trip() {
        let initial = CameraState::default();
        let mut state = initial;

        assert_eq!(state.handle_key('w'), Some(CameraPreset::Top));
        assert_eq!(state.preset(), CameraPreset::Top);
        assert_eq!(state.eye(), Vec3::new(0.0, 20.0, 0.0));

        assert_eq!(state.handle_key('s'), Some(CameraPreset::Perspective));
        assert_eq!(state, initial);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut state = CameraState::new(CameraPreset::Side);
        let before = state;
        for symbol in ['x', 'q', ' ', '1', 'é'] {
            assert_eq!(state.handle_key(symbol), None);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut state = CameraState::default();
        assert_eq!(state.handle_key('A'), Some(CameraPreset::Front));
        assert_eq!(state.handle_key('D'), Some(CameraPreset::Side));
        assert_eq!(state.handle_key('W'), Some(CameraPreset::Top));
        assert_eq!(state.handle_key('S'), Some(CameraPreset::Perspective));
    }

    #[test]
    fn test_every_preset_reachable_from_every_preset() {
        for from in CameraPreset::ALL {
            for to in CameraPreset::ALL {
                let mut state = CameraState::new(from);
                state.select(to);
                assert_eq!(state, CameraState::new(to));
            }
        }
    }

    #[test]
    fn test_view_transform_looks_at_target() {
        for preset in CameraPreset::ALL {
            let state = CameraState::new(preset);
            let transform = state.view_transform();
            let expected = (state.target() - state.eye()).normalize();
            assert_eq!(transform.translation, state.eye());
            assert!(
                approx(transform.forward().as_vec3(), expected),
                "{} forward {:?}",
                preset,
                transform.forward()
            );
        }
    }

    #[test]
    fn test_front_view_is_axis_aligned() {
        let transform = CameraState::new(CameraPreset::Front).view_transform();
        assert!(approx(transform.forward().as_vec3(), Vec3::NEG_Z));
        assert!(approx(transform.up().as_vec3(), Vec3::Y));
    }
}
