//! Simulation time management.

use bevy::prelude::*;
use chrono::{DateTime, Duration, Utc};

/// Upper bound on one frame's delta, so a backgrounded window does not
/// produce a single enormous simulation step when it resumes.
pub const MAX_DELTA_SECONDS: f64 = 0.1;

pub const MIN_TIME_SCALE: f32 = 0.01;
pub const MAX_TIME_SCALE: f32 = 16.0;

/// Simulation clock resource. Each frame [`SimulationClock::tick`] turns the
/// host timestamp into a clamped raw delta and a time-scaled delta; the
/// scaled delta drives the orbit hierarchy, the raw delta drives locomotion.
#[derive(Resource)]
pub struct SimulationClock {
    time_scale: f32,
    last_timestamp: Option<f64>,
    raw_delta: f32,
    scaled_delta: f32,
    /// Simulated UTC, advanced by the scaled delta. Display only.
    pub current_utc: DateTime<Utc>,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            last_timestamp: None,
            raw_delta: 0.0,
            scaled_delta: 0.0,
            current_utc: Utc::now(),
        }
    }
}

impl SimulationClock {
    /// Advance the clock to `now_seconds` (monotonic host time). Returns
    /// `(raw_delta, scaled_delta)`. The first call only records the
    /// timestamp and returns zero deltas.
    pub fn tick(&mut self, now_seconds: f64) -> (f32, f32) {
        let raw = match self.last_timestamp {
            None => 0.0,
            Some(last) => (now_seconds - last).clamp(0.0, MAX_DELTA_SECONDS) as f32,
        };
        self.last_timestamp = Some(now_seconds);
        self.raw_delta = raw;
        self.scaled_delta = raw * self.time_scale;

        let scaled = self.scaled_delta;
        let whole = scaled.trunc() as i64;
        let nanos = ((scaled - scaled.trunc()) * 1_000_000_000.0) as i64;
        if whole != 0 {
            self.current_utc = self.current_utc + Duration::seconds(whole);
        }
        if nanos != 0 {
            self.current_utc = self.current_utc + Duration::nanoseconds(nanos);
        }

        (self.raw_delta, self.scaled_delta)
    }

    pub fn raw_delta(&self) -> f32 {
        self.raw_delta
    }

    pub fn scaled_delta(&self) -> f32 {
        self.scaled_delta
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Absolute-value channel; the same cell the discrete commands write.
    pub fn set_scale(&mut self, scale: f32) {
        self.time_scale = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
    }

    pub fn halve_scale(&mut self) {
        self.set_scale(self.time_scale * 0.5);
    }

    pub fn double_scale(&mut self) {
        self.set_scale(self.time_scale * 2.0);
    }

    pub fn reset_scale(&mut self) {
        self.set_scale(1.0);
    }
}

/// System feeding the host clock into the simulation clock once per frame.
pub fn advance_simulation_clock(time: Res<Time<Real>>, mut clock: ResMut<SimulationClock>) {
    clock.tick(time.elapsed_secs_f64());
}
