//! Shared simulation clock

use bevy::prelude::*;

use crate::orbital::bodies::OrbitalBody;

/// Number of distinct day counter values.
pub const DAY_PERIOD: u32 = 365;
/// Number of distinct year counter values.
pub const YEAR_PERIOD: u32 = 60_190;
/// Year counter advance per tick.
pub const YEAR_STEP: u32 = 2;

/// Day and year counters shared by every body.
///
/// Only [`advance_simulation_clock`] writes this resource.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationClock {
    day_counter: u32,
    year_counter: u32,
}

/// Rotation angles in degrees for one body at one clock state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyAngles {
    /// Rotation of the orbit around the central body
    pub year_deg: f32,
    /// Rotation of the body about its own axis
    pub day_deg: f32,
}

impl SimulationClock {
    pub fn day_counter(&self) -> u32 {
        self.day_counter
    }

    pub fn year_counter(&self) -> u32 {
        self.year_counter
    }

    pub fn tick(&mut self) {
        self.day_counter = (self.day_counter + 1) % DAY_PERIOD;
        self.year_counter = (self.year_counter + YEAR_STEP) % YEAR_PERIOD;
    }

    /// Angles for `body` at the current counters.
    pub fn transform_for(&self, body: &OrbitalBody) -> BodyAngles {
        BodyAngles {
            year_deg: body.year_rate() * self.year_counter as f32,
            day_deg: self.day_counter as f32,
        }
    }
}

/// Fixed-rate task advancing the clock once per invocation
pub fn advance_simulation_clock(mut clock: ResMut<SimulationClock>) {
    clock.tick();
}
