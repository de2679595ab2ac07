//! Orbital motion module
//!
//! This module holds the static body parameters and the shared clock that
//! drives every orbit. The clock ticks from `FixedUpdate`, which always runs
//! before `Update` within a frame, so every body sees the same counters while
//! the scene is being posed.

use bevy::prelude::*;

pub mod bodies;
pub mod clock;

pub use bodies::{BodyError, OrbitalBody, RingSpec, SolarSystem};
pub use clock::{BodyAngles, SimulationClock, advance_simulation_clock};

/// Nominal tick rate of the simulation clock
pub const DEFAULT_TICK_HZ: f64 = 60.0;

/// Plugin for the simulation clock and its fixed-rate task
pub struct OrbitalPlugin {
    pub tick_hz: f64,
}

impl Default for OrbitalPlugin {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .init_resource::<SolarSystem>()
            .insert_resource(Time::<Fixed>::from_hz(self.tick_hz))
            .add_systems(FixedUpdate, advance_simulation_clock);
    }
}
