//! Owning collection of live waves.
//!
//! The handler ticks every wave once per simulation step, drops dead ones and
//! buffers the effects they emit until the host drains them.

use std::collections::HashSet;

use bevy::math::IVec3;
use bevy_ecs::resource::Resource;
use log::{debug, trace, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::world::{WaveEffect, WaveWorld};

use super::{Wave, WaveConfig};

/// Effects kept when nobody drains the queue
const MAX_PENDING_EFFECTS: usize = 4096;

#[derive(Resource, Debug, Clone)]
pub struct WaveHandler {
    /// Live waves in spawn order
    waves: Vec<Wave>,
    /// Effects emitted since the last drain
    effects: Vec<WaveEffect>,
    rng: ChaCha8Rng,
    pub config: WaveConfig,
}

impl Default for WaveHandler {
    fn default() -> Self {
        Self::new(WaveConfig::default(), 0)
    }
}

impl WaveHandler {
    pub fn new(config: WaveConfig, seed: u64) -> Self {
        Self {
            waves: Vec::new(),
            effects: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    /// Spawns a wave and returns a reference to it
    pub fn spawn(
        &mut self,
        spawn_pos: IVec3,
        yaw: f32,
        y_offset: f32,
        big_wave: bool,
        width: u32,
    ) -> &Wave {
        let mut wave = Wave::new(spawn_pos, yaw, y_offset, big_wave, &self.config);
        wave.set_width(width);
        debug!(
            "Spawned {} wave at {:?}, yaw {:.1}, width {}",
            if big_wave { "big" } else { "small" },
            spawn_pos,
            yaw,
            width
        );
        self.waves.push(wave);
        &self.waves[self.waves.len() - 1]
    }

    /// Advances every live wave by one step and removes the ones that died.
    pub fn tick<W: WaveWorld>(&mut self, world: &W) {
        for wave in self.waves.iter_mut() {
            wave.tick(world, &mut self.effects, &mut self.rng);
        }

        let before = self.waves.len();
        self.waves.retain(|wave| !wave.is_dead());
        let removed = before - self.waves.len();
        if removed > 0 {
            trace!("Removed {} dead waves, {} live", removed, self.waves.len());
        }

        if self.effects.len() > MAX_PENDING_EFFECTS {
            let overflow = self.effects.len() - MAX_PENDING_EFFECTS;
            warn!("Dropping {} undrained wave effects", overflow);
            self.effects.drain(..overflow);
        }
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Union of every live wave's wet footprint
    pub fn covered_cells<W: WaveWorld>(&self, world: &W) -> HashSet<IVec3> {
        let mut cells = HashSet::new();
        for wave in &self.waves {
            cells.extend(wave.covered_cells(world));
        }
        cells
    }

    pub fn pending_effects(&self) -> &[WaveEffect] {
        &self.effects
    }

    pub fn drain_effects(&mut self) -> Vec<WaveEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Drops every wave and pending effect, e.g. on world unload
    pub fn clear(&mut self) {
        debug!("Clearing {} waves", self.waves.len());
        self.waves.clear();
        self.effects.clear();
    }
}
