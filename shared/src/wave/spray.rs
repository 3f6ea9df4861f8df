use bevy::math::Vec3;
use log::debug;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::world::{EffectSink, WaveEffect, WaveEffectKind};

use super::config::constants::{
    SPLASH_JITTER, SPRAY_AGE_DIVISOR, SPRAY_DROP, SPRAY_MIN_AGE, SPRAY_TRAVEL_FACTOR,
    SPRAY_WASH_DIVISOR,
};
use super::Wave;

impl Wave {
    /// Strength of the directional spray for the current phase.
    ///
    /// `None` for a travelling wave younger than 16 ticks, where the age term of
    /// the formula would vanish.
    pub fn spray_intensity(&self) -> Option<f32> {
        if self.is_washing_up() {
            let intensity = self.washing_age() as f32 / SPRAY_WASH_DIVISOR;
            return Some(if self.is_bouncing() {
                intensity * 2.0
            } else {
                intensity
            });
        }

        if self.age < SPRAY_MIN_AGE {
            return None;
        }

        let age = self.age as f32;
        let intensity = (age / self.max_age as f32) * SPRAY_TRAVEL_FACTOR / (age / SPRAY_AGE_DIVISOR);
        intensity.is_finite().then_some(intensity)
    }

    /// One-shot collision burst. Later calls are ignored.
    ///
    /// Splashes and the directional spray are only emitted for waves that are not
    /// drowning. Either way velocity is zeroed and the hit age is latched.
    pub fn spray<E, R>(&mut self, effects: &mut E, rng: &mut R)
    where
        E: EffectSink,
        R: Rng + ?Sized,
    {
        if self.hit_block_age.is_some() {
            return;
        }

        if !self.is_drowning_away() {
            let position = self.position();

            for _ in 0..self.config.splash_count {
                effects.spawn_effect(WaveEffect {
                    kind: WaveEffectKind::Splash,
                    position,
                    velocity: jitter(rng),
                });
            }

            if let Some(intensity) = self.spray_intensity() {
                effects.spawn_effect(WaveEffect {
                    kind: WaveEffectKind::Spray {
                        yaw: self.yaw - 180.0,
                        intensity,
                    },
                    position: position - Vec3::Y * SPRAY_DROP,
                    velocity: Vec3::new(-self.velocity.x, 0.0, -self.velocity.z),
                });
            }

            debug!(
                "Wave from {:?} sprayed at age {}",
                self.spawn_pos, self.age
            );
        }

        self.velocity = Vec3::ZERO;
        self.hit_block_age = Some(self.age);
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let mut sample = || rng.sample::<f32, _>(StandardNormal) * SPLASH_JITTER;
    Vec3::new(sample(), sample(), sample())
}
