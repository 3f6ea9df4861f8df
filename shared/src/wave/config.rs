//! Wave tuning.
//!
//! Values that shape a wave's lifetime are runtime configuration and can be
//! loaded from a ron file. The decel/bounce curve of a wave washing up is fixed
//! and lives in [`constants`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::load_ron_or_default;

pub mod constants {
    /// Washing ages up to this value get the sharp "just hit shore" slowdown.
    pub const IMPACT_WASH_AGE: u32 = 10;
    /// Inclusive washing age range where the wave bounces forward again.
    pub const BOUNCE_WASH_AGES: std::ops::RangeInclusive<u32> = 12..=17;

    pub const IMPACT_DECEL: f32 = 0.875;
    pub const IMPACT_SINK_VELOCITY: f32 = -0.0005;
    pub const BOUNCE_ACCEL: f32 = 1.2;
    pub const WASH_DECEL: f32 = 0.9;

    /// Horizontal speed limits below which a washing wave is ending.
    pub const ENDING_SPEED_X: f32 = 0.03;
    pub const ENDING_SPEED_Z: f32 = 0.3;

    /// Washing ages at which the wet footprint grows, then shrinks back.
    pub const FOOTPRINT_WIDEN_AGE: u32 = 13;
    pub const FOOTPRINT_NARROW_AGE: u32 = 40;
    pub const FOOTPRINT_WIDE_EXTRA: i32 = 3;
    pub const FOOTPRINT_RECEDING_EXTRA: i32 = 1;

    /// Below this age the travelling spray formula is not evaluated.
    pub const SPRAY_MIN_AGE: u32 = 16;
    pub const SPRAY_WASH_DIVISOR: f32 = 128.0;
    pub const SPRAY_AGE_DIVISOR: f32 = 16.0;
    pub const SPRAY_TRAVEL_FACTOR: f32 = 2.5;
    /// Standard deviation of the splash velocity jitter.
    pub const SPLASH_JITTER: f32 = 5.0;
    /// Spray sheet is emitted slightly below the wave.
    pub const SPRAY_DROP: f32 = 0.05;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Horizontal speed at spawn, in blocks per tick.
    pub speed: f32,
    pub max_age: u32,
    pub max_washing_age: u32,
    /// Age after which a wave still in open water starts drowning.
    pub max_water_age: u32,
    pub initial_length: f32,
    pub initial_scale: f32,
    /// Added on top of the spawn offset so waves float above the surface.
    pub spawn_height: f32,
    pub hitbox_size: f32,
    /// Extra margin around the hitbox used for collision queries.
    pub collision_margin: f32,
    pub fade_in_step: f32,
    pub drown_length_step: f32,
    pub drown_sink_step: f32,
    /// Ticks between hitting a block and despawning.
    pub hit_despawn_delay: u32,
    /// Squared displacement above which collision is not resolved.
    pub max_squared_collision_distance: f32,
    pub splash_count: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            speed: 0.115,
            max_age: 300,
            max_washing_age: 60,
            max_water_age: 100,
            initial_length: 1.5,
            initial_scale: 1.0,
            spawn_height: 0.15,
            hitbox_size: 0.2,
            collision_margin: 0.5,
            fade_in_step: 0.05,
            drown_length_step: 0.1,
            drown_sink_step: 0.005,
            hit_despawn_delay: 2,
            max_squared_collision_distance: 100.0 * 100.0,
            splash_count: 7,
        }
    }
}

pub fn load_wave_config(path: &Path) -> Result<WaveConfig, Box<dyn std::error::Error>> {
    load_ron_or_default(path)
}
