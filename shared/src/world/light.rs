use bevy::math::IVec3;

use crate::{MAX_LIGHT_LEVEL, NIGHT_START_TICKS};

use super::WaveWorld;

/// Packs block and sky light levels (0..=15) into the lightmap coordinate layout
/// consumed by the wave shader.
pub fn pack_light(block: u8, sky: u8) -> u32 {
    ((block.min(MAX_LIGHT_LEVEL) as u32) << 4) | ((sky.min(MAX_LIGHT_LEVEL) as u32) << 20)
}

pub fn unpack_light(packed: u32) -> (u8, u8) {
    (((packed >> 4) & 0xF) as u8, ((packed >> 20) & 0xF) as u8)
}

pub const FULL_BRIGHT: u32 = (15 << 4) | (15 << 20);

/// Moon size above which a night counts as a full-moon night.
pub const FULL_MOON_THRESHOLD: f32 = 0.9;

/// Light used for a whole wave, sampled at `cell`.
///
/// Waves glow at full brightness during full-moon nights regardless of the
/// surrounding light.
pub fn resolve_light<W: WaveWorld>(world: &W, cell: &IVec3) -> u32 {
    if world.moon_phase_brightness() > FULL_MOON_THRESHOLD
        && world.time_of_day() >= NIGHT_START_TICKS
    {
        return FULL_BRIGHT;
    }

    pack_light(world.block_light(cell), world.sky_light(cell))
}
