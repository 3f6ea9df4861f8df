use bevy::math::{bounding::Aabb3d, IVec3, Vec3, Vec3A};

use super::translate_aabb;

/// Offsets smaller than this are treated as touching.
const EPSILON: f32 = 1.0e-4;

/// Sweep order: vertical first so a box sliding along the ground is not snagged by it.
const AXIS_ORDER: [usize; 3] = [1, 0, 2];

/// Clamps `velocity` so that `hitbox` does not enter any solid unit cell.
///
/// Axes are resolved one at a time, each against the box already moved along the
/// previous axes. Cells are looked up through `is_solid`.
pub fn resolve_collision<F>(hitbox: &Aabb3d, velocity: Vec3, is_solid: F) -> Vec3
where
    F: Fn(&IVec3) -> bool,
{
    if velocity == Vec3::ZERO {
        return velocity;
    }

    let obstacles = collect_obstacles(hitbox, velocity, &is_solid);
    if obstacles.is_empty() {
        return velocity;
    }

    let mut moving = *hitbox;
    let mut resolved = velocity;

    for axis in AXIS_ORDER {
        if resolved[axis] == 0.0 {
            continue;
        }

        let clipped = clip_axis(&obstacles, &moving, axis, resolved[axis]);
        resolved[axis] = clipped;

        let mut offset = Vec3::ZERO;
        offset[axis] = clipped;
        moving = translate_aabb(&moving, offset);
    }

    resolved
}

/// Solid cell boxes inside the region swept by `hitbox` moving by `velocity`.
fn collect_obstacles<F>(hitbox: &Aabb3d, velocity: Vec3, is_solid: &F) -> Vec<Aabb3d>
where
    F: Fn(&IVec3) -> bool,
{
    let moved = translate_aabb(hitbox, velocity);
    let min = hitbox.min.min(moved.min);
    let max = hitbox.max.max(moved.max);

    let mut obstacles = Vec::new();
    // Manual flooring is needed for negative coordinates
    for x in (min.x.floor() as i32)..=(max.x.floor() as i32) {
        for y in (min.y.floor() as i32)..=(max.y.floor() as i32) {
            for z in (min.z.floor() as i32)..=(max.z.floor() as i32) {
                let cell = IVec3::new(x, y, z);
                if is_solid(&cell) {
                    let corner = Vec3A::new(x as f32, y as f32, z as f32);
                    obstacles.push(Aabb3d {
                        min: corner,
                        max: corner + Vec3A::ONE,
                    });
                }
            }
        }
    }
    obstacles
}

fn overlaps_on(a: &Aabb3d, b: &Aabb3d, axis: usize) -> bool {
    a.min[axis] < b.max[axis] - EPSILON && a.max[axis] > b.min[axis] + EPSILON
}

fn clip_axis(obstacles: &[Aabb3d], moving: &Aabb3d, axis: usize, mut offset: f32) -> f32 {
    let (a, b) = match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };

    let requested = offset;
    for obstacle in obstacles {
        if !(overlaps_on(moving, obstacle, a) && overlaps_on(moving, obstacle, b)) {
            continue;
        }

        if offset > 0.0 && obstacle.min[axis] >= moving.max[axis] - EPSILON {
            offset = offset.min(obstacle.min[axis] - moving.max[axis]);
        } else if offset < 0.0 && obstacle.max[axis] <= moving.min[axis] + EPSILON {
            offset = offset.max(obstacle.max[axis] - moving.min[axis]);
        }
    }

    if offset != requested && offset.abs() < EPSILON {
        0.0
    } else {
        offset
    }
}
