use bevy::math::{bounding::Aabb3d, IVec3, Vec3};
use log::{debug, trace};
use rand::Rng;

use crate::physics::{aabb_bottom_center, aabb_from_bottom_center, expand_aabb, translate_aabb};
use crate::world::{resolve_light, unpack_rgb, EffectSink, WaveWorld};

use super::config::constants::{
    BOUNCE_ACCEL, BOUNCE_WASH_AGES, ENDING_SPEED_X, ENDING_SPEED_Z, IMPACT_DECEL,
    IMPACT_SINK_VELOCITY, IMPACT_WASH_AGE, WASH_DECEL,
};
use super::WaveConfig;

/// Lifecycle of a wave.
///
/// `WashingUp` and `Drowning` are both terminal-bound: once entered they are
/// only ever left for `Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveState {
    Travelling,
    /// Reached dry ground at the recorded age.
    WashingUp { since: u32 },
    /// Failed to reach shore in time and is shrinking away.
    Drowning,
    Dead,
}

/// One ephemeral wave.
///
/// The bounding box is the only stored position; [`Wave::position`] is derived
/// from it so the two can never drift apart.
#[derive(Debug, Clone)]
pub struct Wave {
    pub spawn_pos: IVec3,
    /// Travel direction in degrees.
    pub yaw: f32,
    /// Big waves leave a foam decal behind while washing up.
    pub big_wave: bool,

    pub(crate) bounds: Aabb3d,
    pub(crate) prev_position: Vec3,
    pub velocity: Vec3,

    /// Number of one-unit texture columns.
    pub width: u32,
    /// Depth of the quads along the travel direction.
    pub length: f32,
    pub scale: f32,

    pub(crate) age: u32,
    pub max_age: u32,
    pub max_washing_age: u32,
    pub max_water_age: u32,

    pub(crate) state: WaveState,
    /// Age at which the wave first collided with a block.
    pub(crate) hit_block_age: Option<u32>,
    pub(crate) above_water: bool,
    pub(crate) ending: bool,

    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,

    pub(crate) config: WaveConfig,
}

impl Wave {
    pub fn new(
        spawn_pos: IVec3,
        yaw: f32,
        y_offset: f32,
        big_wave: bool,
        config: &WaveConfig,
    ) -> Self {
        let position = Vec3::new(
            spawn_pos.x as f32,
            spawn_pos.y as f32 + y_offset.abs() + config.spawn_height,
            spawn_pos.z as f32,
        );
        let yaw_radians = yaw.to_radians();

        Self {
            spawn_pos,
            yaw,
            big_wave,
            bounds: aabb_from_bottom_center(position, config.hitbox_size, config.hitbox_size),
            prev_position: position,
            velocity: Vec3::new(
                yaw_radians.cos() * config.speed,
                0.0,
                yaw_radians.sin() * config.speed,
            ),
            width: 1,
            length: config.initial_length,
            scale: config.initial_scale,
            age: 0,
            max_age: config.max_age,
            max_washing_age: config.max_washing_age,
            max_water_age: config.max_water_age,
            state: WaveState::Travelling,
            hit_block_age: None,
            above_water: true,
            ending: false,
            red: 1.0,
            green: 1.0,
            blue: 1.0,
            alpha: 0.0,
            config: *config,
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == WaveState::Dead
    }

    pub fn is_washing_up(&self) -> bool {
        matches!(self.state, WaveState::WashingUp { .. })
    }

    pub fn is_drowning_away(&self) -> bool {
        self.state == WaveState::Drowning
    }

    pub fn hit_block(&self) -> bool {
        self.hit_block_age.is_some()
    }

    pub fn hit_block_age(&self) -> Option<u32> {
        self.hit_block_age
    }

    pub fn is_above_water(&self) -> bool {
        self.above_water
    }

    pub fn is_ending(&self) -> bool {
        self.ending
    }

    /// Age at which washing up started, if it has.
    pub fn washing_start_age(&self) -> Option<u32> {
        match self.state {
            WaveState::WashingUp { since } => Some(since),
            _ => None,
        }
    }

    /// Ticks spent washing up; zero for a wave that is not washing up.
    pub fn washing_age(&self) -> u32 {
        self.washing_start_age()
            .map_or(0, |since| self.age.saturating_sub(since))
    }

    /// Age that sizes the wet footprint: ticks since washing started, or since spawn.
    pub fn footprint_age(&self) -> u32 {
        self.age.saturating_sub(self.washing_start_age().unwrap_or(0))
    }

    pub fn is_bouncing(&self) -> bool {
        self.is_washing_up() && BOUNCE_WASH_AGES.contains(&self.washing_age())
    }

    /// Bottom center of the bounding box.
    pub fn position(&self) -> Vec3 {
        aabb_bottom_center(&self.bounds)
    }

    pub fn prev_position(&self) -> Vec3 {
        self.prev_position
    }

    /// Position between the last two ticks, `partial_tick` in `[0, 1]`.
    pub fn lerp_position(&self, partial_tick: f32) -> Vec3 {
        self.prev_position
            .lerp(self.position(), partial_tick.clamp(0.0, 1.0))
    }

    pub fn block_pos(&self) -> IVec3 {
        self.position().floor().as_ivec3()
    }

    pub fn bounds(&self) -> &Aabb3d {
        &self.bounds
    }

    /// Box used for world collision, larger than the stored one.
    pub fn collision_box(&self) -> Aabb3d {
        expand_aabb(&self.bounds, self.config.collision_margin)
    }

    pub fn color(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub fn set_color(&mut self, red: f32, green: f32, blue: f32) {
        self.red = red;
        self.green = green;
        self.blue = blue;
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Packed light for the whole wave, sampled above its feet.
    pub fn light<W: WaveWorld>(&self, world: &W) -> u32 {
        resolve_light(world, &(self.block_pos() + IVec3::Y))
    }

    pub fn mark_dead(&mut self) {
        if self.state != WaveState::Dead {
            trace!("Wave from {:?} died at age {}", self.spawn_pos, self.age);
        }
        self.state = WaveState::Dead;
    }

    /// Advances the wave by one simulation step.
    ///
    /// Dead waves are left untouched.
    pub fn tick<W, E, R>(&mut self, world: &W, effects: &mut E, rng: &mut R)
    where
        W: WaveWorld,
        E: EffectSink,
        R: Rng + ?Sized,
    {
        if self.is_dead() {
            return;
        }

        let previous_age = self.age;
        self.age += 1;
        if previous_age >= self.max_age {
            self.mark_dead();
            return;
        }

        self.update_lifecycle();

        match self.state {
            WaveState::WashingUp { since } => self.wash_up(self.age - since),
            WaveState::Travelling | WaveState::Drowning => self.travel(world),
            WaveState::Dead => {}
        }

        if let Some(hit_age) = self.hit_block_age {
            self.velocity = Vec3::ZERO;
            if self.age - hit_age >= self.config.hit_despawn_delay {
                self.mark_dead();
            }
        }

        self.move_by(world, effects, rng, self.velocity);
        self.update_beneath_block(world);
    }

    fn update_lifecycle(&mut self) {
        if self.state != WaveState::Travelling {
            return;
        }

        if !self.above_water {
            debug!(
                "Wave from {:?} reached shore at age {}",
                self.spawn_pos, self.age
            );
            self.state = WaveState::WashingUp { since: self.age };
        } else if self.age >= self.max_water_age {
            trace!(
                "Wave from {:?} drowning at age {}",
                self.spawn_pos,
                self.age
            );
            self.state = WaveState::Drowning;
        }
    }

    fn wash_up(&mut self, washing_age: u32) {
        if washing_age <= IMPACT_WASH_AGE {
            self.velocity.x *= IMPACT_DECEL;
            self.velocity.y = IMPACT_SINK_VELOCITY;
            self.velocity.z *= IMPACT_DECEL;
        } else if BOUNCE_WASH_AGES.contains(&washing_age) {
            self.velocity.x *= BOUNCE_ACCEL;
            self.velocity.z *= BOUNCE_ACCEL;
        } else {
            self.velocity.x *= WASH_DECEL;
            self.velocity.z *= WASH_DECEL;
        }

        self.ending =
            self.velocity.x.abs() <= ENDING_SPEED_X && self.velocity.z.abs() <= ENDING_SPEED_Z;
        self.length += self.velocity.x.abs();

        if washing_age >= self.max_washing_age {
            self.mark_dead();
        }
    }

    fn travel<W: WaveWorld>(&mut self, world: &W) {
        let [red, green, blue] = unpack_rgb(world.biome_water_color(&self.block_pos()));
        self.set_color(red, green, blue);

        if self.is_drowning_away() {
            self.length -= self.config.drown_length_step;
            self.velocity.y -= self.config.drown_sink_step;
            if self.length <= 0.0 {
                self.mark_dead();
            }
        }

        if self.alpha < 1.0 {
            self.alpha = (self.alpha + self.config.fade_in_step).min(1.0);
        }
    }

    /// Moves by `velocity`, resolving collisions against the world.
    ///
    /// A horizontal clamp counts as hitting a block and triggers the one-shot spray.
    pub fn move_by<W, E, R>(&mut self, world: &W, effects: &mut E, rng: &mut R, velocity: Vec3)
    where
        W: WaveWorld,
        E: EffectSink,
        R: Rng + ?Sized,
    {
        let mut resolved = velocity;
        if velocity != Vec3::ZERO
            && velocity.length_squared() < self.config.max_squared_collision_distance
        {
            resolved = world.resolve_collision(&self.collision_box(), velocity);
        }

        if resolved.x != velocity.x || resolved.z != velocity.z {
            self.spray(effects, rng);
        }

        if resolved != Vec3::ZERO {
            self.prev_position = self.position();
            self.bounds = translate_aabb(&self.bounds, resolved);
        }
    }

    fn update_beneath_block<W: WaveWorld>(&mut self, world: &W) {
        self.above_water = world.is_water_at(&(self.block_pos() - IVec3::Y));
    }
}
