use bevy::math::{bounding::Aabb3d, IVec3, Vec3};

/// Read-only view of the host world that waves need while ticking and rendering.
///
/// Implementations must answer every query for any cell; positions that are not
/// loaded report "no block", zero light and the default water color.
pub trait WaveWorld {
    type Block: Copy;

    fn get_block(&self, position: &IVec3) -> Option<Self::Block>;

    fn is_water_state(&self, block: &Self::Block) -> bool;

    fn is_water_at(&self, position: &IVec3) -> bool {
        self.get_block(position)
            .is_some_and(|block| self.is_water_state(&block))
    }

    /// Water tint of the biome at `position`, as `0xRRGGBB`.
    fn biome_water_color(&self, position: &IVec3) -> u32;

    fn block_light(&self, position: &IVec3) -> u8;

    fn sky_light(&self, position: &IVec3) -> u8;

    /// Size of the moon for the current night, 1.0 at full moon.
    fn moon_phase_brightness(&self) -> f32;

    /// Ticks since the start of the current day.
    fn time_of_day(&self) -> i64;

    /// Clamps `velocity` so that `hitbox` moved by it does not enter solid geometry.
    fn resolve_collision(&self, hitbox: &Aabb3d, velocity: Vec3) -> Vec3;
}

pub const DEFAULT_WATER_COLOR: u32 = 0x3F76E4;

/// Splits a `0xRRGGBB` color into normalized channels.
pub fn unpack_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveEffectKind {
    /// Small droplet burst.
    Splash,
    /// Directional spray sheet thrown back against the travel direction.
    Spray { yaw: f32, intensity: f32 },
}

/// A one-shot visual effect requested by a wave, rendered by the host particle system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveEffect {
    pub kind: WaveEffectKind,
    pub position: Vec3,
    pub velocity: Vec3,
}

pub trait EffectSink {
    fn spawn_effect(&mut self, effect: WaveEffect);
}

impl EffectSink for Vec<WaveEffect> {
    fn spawn_effect(&mut self, effect: WaveEffect) {
        self.push(effect);
    }
}
