use std::collections::HashMap;

use bevy::math::{bounding::Aabb3d, IVec2, IVec3, Vec3};
use bevy_ecs::resource::Resource;
use log::debug;

use crate::physics::resolve_collision;
use crate::{DAY_LENGTH_TICKS, MAX_LIGHT_LEVEL};

use super::{
    calculate_temperature_humidity_with_noises, BiomeType, BlockId, ClimateNoises, WaveWorld,
};

/// How far above a cell the sky light scan looks for cover.
const SKY_SCAN_HEIGHT: i32 = 64;

/// Width of the dry flat ringing the island.
const FLAT_WIDTH: i32 = 2;

/// Moon size per phase, starting at the full moon.
const MOON_SIZES: [f32; 8] = [1.0, 0.75, 0.5, 0.25, 0.0, 0.25, 0.5, 0.75];

/// Sparse in-memory block world.
///
/// Missing cells are air. Biomes are stored per column and default to ocean.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShoreWorldMap {
    pub blocks: HashMap<IVec3, BlockId>,
    pub biomes: HashMap<IVec2, BiomeType>,
    /// Emissive cells and their light level.
    pub light_sources: HashMap<IVec3, u8>,
    /// Absolute world time in ticks.
    pub time: i64,
}

impl ShoreWorldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_block(&mut self, position: IVec3, block: BlockId) {
        self.blocks.insert(position, block);
    }

    pub fn remove_block(&mut self, position: &IVec3) -> Option<BlockId> {
        self.blocks.remove(position)
    }

    pub fn set_biome(&mut self, column: IVec2, biome: BiomeType) {
        self.biomes.insert(column, biome);
    }

    pub fn biome_at(&self, position: &IVec3) -> BiomeType {
        self.biomes
            .get(&IVec2::new(position.x, position.z))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_solid(&self, position: &IVec3) -> bool {
        self.blocks
            .get(position)
            .is_some_and(|block| block.is_solid())
    }

    pub fn moon_phase(&self) -> usize {
        (self.time.div_euclid(DAY_LENGTH_TICKS)).rem_euclid(MOON_SIZES.len() as i64) as usize
    }

    /// Builds a round sand island of `radius` blocks rising one block above
    /// `sea_level`, surrounded by open water out to `radius + margin`.
    ///
    /// The outer two blocks of the island are a dry tidal flat two blocks under
    /// the surface. The sea floor sits three blocks under the surface. Column
    /// biomes are sampled from climate noise seeded with `seed`.
    pub fn island(radius: i32, margin: i32, sea_level: i32, seed: u32) -> Self {
        let mut world = Self::new();
        let mut noises = ClimateNoises::new(seed);
        let extent = radius + margin;
        let floor = sea_level - 3;

        for x in -extent..=extent {
            for z in -extent..=extent {
                let distance_sq = x * x + z * z;
                let land = distance_sq <= radius * radius;
                let climate = calculate_temperature_humidity_with_noises(x, z, &mut noises);
                world.set_biome(IVec2::new(x, z), BiomeType::from_climate(climate, !land));

                world.set_block(IVec3::new(x, floor - 1, z), BlockId::Stone);
                if land {
                    let inner = (radius - FLAT_WIDTH).max(0);
                    let top = if distance_sq <= inner * inner {
                        sea_level
                    } else {
                        sea_level - 2
                    };
                    for y in floor..=top {
                        world.set_block(IVec3::new(x, y, z), BlockId::Sand);
                    }
                    if distance_sq < inner * inner {
                        world.set_block(IVec3::new(x, sea_level + 1, z), BlockId::Grass);
                    }
                } else {
                    world.set_block(IVec3::new(x, floor, z), BlockId::Gravel);
                    for y in (floor + 1)..=sea_level {
                        world.set_block(IVec3::new(x, y, z), BlockId::Water);
                    }
                }
            }
        }

        debug!(
            "Built island world: radius {}, extent {}, {} blocks",
            radius,
            extent,
            world.blocks.len()
        );

        world
    }
}

impl WaveWorld for ShoreWorldMap {
    type Block = BlockId;

    fn get_block(&self, position: &IVec3) -> Option<BlockId> {
        self.blocks.get(position).copied()
    }

    fn is_water_state(&self, block: &BlockId) -> bool {
        block.is_water()
    }

    fn biome_water_color(&self, position: &IVec3) -> u32 {
        self.biome_at(position).water_color()
    }

    fn block_light(&self, position: &IVec3) -> u8 {
        self.light_sources
            .iter()
            .map(|(source, level)| {
                let distance = (*source - *position).abs().element_sum();
                level.saturating_sub(distance.min(u8::MAX as i32) as u8)
            })
            .max()
            .unwrap_or(0)
            .min(MAX_LIGHT_LEVEL)
    }

    /// Full sky light unless a solid block covers the cell; each water block
    /// above dims it by one level.
    fn sky_light(&self, position: &IVec3) -> u8 {
        let mut light = MAX_LIGHT_LEVEL;
        for dy in 1..=SKY_SCAN_HEIGHT {
            match self.blocks.get(&(*position + IVec3::new(0, dy, 0))) {
                Some(block) if block.is_solid() => return 0,
                Some(block) if block.is_water() => light = light.saturating_sub(1),
                _ => {}
            }
        }
        light
    }

    fn moon_phase_brightness(&self) -> f32 {
        MOON_SIZES[self.moon_phase()]
    }

    fn time_of_day(&self) -> i64 {
        self.time.rem_euclid(DAY_LENGTH_TICKS)
    }

    fn resolve_collision(&self, hitbox: &Aabb3d, velocity: Vec3) -> Vec3 {
        resolve_collision(hitbox, velocity, |cell| self.is_solid(cell))
    }
}
