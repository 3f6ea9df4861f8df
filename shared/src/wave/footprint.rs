use std::collections::HashSet;

use bevy::math::IVec3;

use crate::world::WaveWorld;

use super::config::constants::{
    FOOTPRINT_NARROW_AGE, FOOTPRINT_RECEDING_EXTRA, FOOTPRINT_WIDEN_AGE, FOOTPRINT_WIDE_EXTRA,
};
use super::Wave;

/// Half extent of the wet square around a wave's feet.
pub fn footprint_extent(width: u32, washing_age: u32) -> i32 {
    let extra = if washing_age < FOOTPRINT_WIDEN_AGE {
        0
    } else if washing_age <= FOOTPRINT_NARROW_AGE {
        FOOTPRINT_WIDE_EXTRA
    } else {
        FOOTPRINT_RECEDING_EXTRA
    };
    width as i32 + extra
}

/// Dry cells one layer under `feet` that are wetted by a wave.
pub fn covered_cells<W: WaveWorld>(
    world: &W,
    feet: IVec3,
    width: u32,
    washing_age: u32,
) -> HashSet<IVec3> {
    let extent = footprint_extent(width, washing_age);
    let y = feet.y - 1;

    let mut cells = HashSet::new();
    for x in (feet.x - extent)..=(feet.x + extent) {
        for z in (feet.z - extent)..=(feet.z + extent) {
            let cell = IVec3::new(x, y, z);
            if !world.is_water_at(&cell) {
                cells.insert(cell);
            }
        }
    }
    cells
}

impl Wave {
    pub fn covered_cells<W: WaveWorld>(&self, world: &W) -> HashSet<IVec3> {
        covered_cells(world, self.block_pos(), self.width, self.footprint_age())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::WaveConfig;
    use crate::world::{BlockId, ShoreWorldMap};

    #[test]
    fn extent_widens_then_recedes() {
        assert_eq!(footprint_extent(2, 0), 2);
        assert_eq!(footprint_extent(2, 12), 2);
        assert_eq!(footprint_extent(2, 13), 5);
        assert_eq!(footprint_extent(2, 40), 5);
        assert_eq!(footprint_extent(2, 41), 3);
    }

    #[test]
    fn water_cells_are_never_covered() {
        let mut world = ShoreWorldMap::new();
        for x in -2..=2 {
            for z in -2..=2 {
                let block = if x > 0 { BlockId::Water } else { BlockId::Sand };
                world.set_block(IVec3::new(x, 63, z), block);
            }
        }
        world.set_block(IVec3::new(-1, 63, 0), BlockId::Seagrass);

        let cells = covered_cells(&world, IVec3::new(0, 64, 0), 2, 0);

        assert!(!cells.is_empty());
        assert!(cells.iter().all(|cell| !world.is_water_at(cell)));
        assert!(cells.iter().all(|cell| cell.y == 63));
        assert!(cells.contains(&IVec3::new(-2, 63, -2)));
        assert!(!cells.contains(&IVec3::new(1, 63, 0)));
        assert!(!cells.contains(&IVec3::new(-1, 63, 0)));
        assert_eq!(cells.len(), 25 - 10 - 1);
    }

    #[test]
    fn travelling_wave_footprint_grows_with_age() {
        let mut world = ShoreWorldMap::new();
        for x in -6..=6 {
            for z in -6..=6 {
                world.set_block(IVec3::new(x, 61, z), BlockId::Sand);
            }
        }
        let mut wave = Wave::new(IVec3::new(0, 62, 0), 0.0, 0.0, false, &WaveConfig::default());

        wave.age = 5;
        assert_eq!(wave.footprint_age(), 5);
        assert_eq!(wave.covered_cells(&world).len(), 9);

        wave.age = 20;
        assert_eq!(wave.washing_age(), 0);
        assert_eq!(wave.footprint_age(), 20);
        let cells = wave.covered_cells(&world);
        assert_eq!(cells.len(), 81);
        assert!(cells.contains(&IVec3::new(-4, 61, 4)));
        assert!(!cells.contains(&IVec3::new(5, 61, 0)));
    }

    #[test]
    fn footprint_is_deterministic() {
        let world = ShoreWorldMap::island(4, 4, 62, 9);
        let first = covered_cells(&world, IVec3::new(4, 62, 0), 1, 20);
        let second = covered_cells(&world, IVec3::new(4, 62, 0), 1, 20);
        assert_eq!(first, second);
    }
}
