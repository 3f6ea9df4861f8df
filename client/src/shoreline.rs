//! Spawn points for the headless demo.
//!
//! A spawn point is a surface water cell a fixed distance from the nearest dry
//! column, facing it.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shore_shared::wave::WaveHandler;
use shore_shared::world::WaveWorld;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: IVec3,
    /// Degrees, pointing at the nearest dry column
    pub yaw: f32,
}

/// Surface water cells in `[min, max]` whose nearest dry column is exactly
/// `distance` cells away (Chebyshev).
///
/// A column is dry when the cell under the surface is not water.
pub fn find_spawn_points<W: WaveWorld>(
    world: &W,
    min: IVec2,
    max: IVec2,
    sea_level: i32,
    distance: i32,
) -> Vec<SpawnPoint> {
    let in_bounds = |column: IVec2| column.cmpge(min).all() && column.cmple(max).all();
    let is_dry = |column: IVec2| !world.is_water_at(&IVec3::new(column.x, sea_level - 1, column.y));

    let mut points = Vec::new();
    for x in min.x..=max.x {
        for z in min.y..=max.y {
            let column = IVec2::new(x, z);
            if !world.is_water_at(&IVec3::new(x, sea_level, z)) || is_dry(column) {
                continue;
            }

            let mut nearest: Option<(i32, IVec2)> = None;
            for dx in -distance..=distance {
                for dz in -distance..=distance {
                    let other = column + IVec2::new(dx, dz);
                    if !in_bounds(other) || !is_dry(other) {
                        continue;
                    }
                    let squared = dx * dx + dz * dz;
                    if nearest.is_none_or(|(best, _)| squared < best) {
                        nearest = Some((squared, other));
                    }
                }
            }

            let Some((_, shore)) = nearest else {
                continue;
            };
            let offset = shore - column;
            if offset.abs().max_element() != distance {
                continue;
            }

            points.push(SpawnPoint {
                position: IVec3::new(x, sea_level, z),
                yaw: (offset.y as f32).atan2(offset.x as f32).to_degrees(),
            });
        }
    }
    points
}

/// Spawns a wave at a random spawn point every `interval` ticks.
#[derive(Resource, Debug, Clone)]
pub struct ShoreSpawner {
    pub points: Vec<SpawnPoint>,
    pub interval: u32,
    /// One in this many waves is big
    pub big_wave_chance: u32,
    pub max_width: u32,
    ticks: u32,
    rng: StdRng,
}

impl ShoreSpawner {
    pub fn new(points: Vec<SpawnPoint>, interval: u32, seed: u64) -> Self {
        Self {
            points,
            interval: interval.max(1),
            big_wave_chance: 4,
            max_width: 3,
            ticks: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advances the spawn timer, spawning into `handler` when it elapses.
    pub fn tick(&mut self, handler: &mut WaveHandler) -> bool {
        self.ticks += 1;
        if self.ticks < self.interval || self.points.is_empty() {
            return false;
        }
        self.ticks = 0;

        let point = self.points[self.rng.gen_range(0..self.points.len())];
        let y_offset = self.rng.gen_range(0.0..0.1);
        let big_wave = self.rng.gen_ratio(1, self.big_wave_chance.max(1));
        let width = self.rng.gen_range(1..=self.max_width.max(1));
        handler.spawn(point.position, point.yaw, y_offset, big_wave, width);
        true
    }
}

pub fn spawn_shore_waves(mut spawner: ResMut<ShoreSpawner>, mut handler: ResMut<WaveHandler>) {
    spawner.tick(&mut handler);
}

#[cfg(test)]
mod tests {
    use shore_shared::world::ShoreWorldMap;

    use super::*;

    fn island_points(distance: i32) -> Vec<SpawnPoint> {
        let world = ShoreWorldMap::island(4, 6, 62, 2);
        find_spawn_points(&world, IVec2::splat(-10), IVec2::splat(10), 62, distance)
    }

    #[test]
    fn spawn_points_face_the_island() {
        let points = island_points(3);
        assert!(!points.is_empty());

        for point in &points {
            let toward_center = Vec2::new(-point.position.x as f32, -point.position.z as f32);
            let heading = Vec2::from_angle(point.yaw.to_radians());
            assert!(heading.dot(toward_center) > 0.0, "{point:?}");
        }
    }

    #[test]
    fn east_point_heads_west() {
        let points = island_points(3);
        let east = points
            .iter()
            .find(|point| point.position == IVec3::new(7, 62, 0))
            .unwrap();
        assert!((east.yaw.abs() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn spawner_waits_for_its_interval() {
        let points = island_points(3);
        let mut spawner = ShoreSpawner::new(points, 3, 8);
        let mut handler = WaveHandler::default();

        assert!(!spawner.tick(&mut handler));
        assert!(!spawner.tick(&mut handler));
        assert!(spawner.tick(&mut handler));
        assert_eq!(handler.len(), 1);
        assert!((1..=3).contains(&handler.waves()[0].width));
    }

    #[test]
    fn no_points_no_waves() {
        let mut spawner = ShoreSpawner::new(Vec::new(), 1, 8);
        let mut handler = WaveHandler::default();
        assert!(!spawner.tick(&mut handler));
        assert!(handler.is_empty());
    }
}
