use bevy::math::{bounding::Aabb3d, Vec3, Vec3A};

mod collision;

pub use collision::*;

pub fn translate_aabb(aabb: &Aabb3d, offset: Vec3) -> Aabb3d {
    let offset = Vec3A::from(offset);
    Aabb3d {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// Grows the box by `amount` on every side.
pub fn expand_aabb(aabb: &Aabb3d, amount: f32) -> Aabb3d {
    Aabb3d {
        min: aabb.min - Vec3A::splat(amount),
        max: aabb.max + Vec3A::splat(amount),
    }
}

/// Horizontal center of the box at its lowest point.
pub fn aabb_bottom_center(aabb: &Aabb3d) -> Vec3 {
    Vec3::new(
        (aabb.min.x + aabb.max.x) / 2.0,
        aabb.min.y,
        (aabb.min.z + aabb.max.z) / 2.0,
    )
}

/// Box of the given horizontal width and height whose bottom center sits at `position`.
pub fn aabb_from_bottom_center(position: Vec3, width: f32, height: f32) -> Aabb3d {
    let half = width / 2.0;
    Aabb3d {
        min: Vec3A::new(position.x - half, position.y, position.z - half),
        max: Vec3A::new(position.x + half, position.y + height, position.z + half),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_center_survives_translation() {
        let aabb = aabb_from_bottom_center(Vec3::new(4.0, 62.15, -3.0), 0.2, 0.2);
        let center = aabb_bottom_center(&aabb);
        assert!((center - Vec3::new(4.0, 62.15, -3.0)).length() < 1e-5);

        let moved = translate_aabb(&aabb, Vec3::new(0.5, -0.25, 1.0));
        let moved_center = aabb_bottom_center(&moved);
        assert!((moved_center - (center + Vec3::new(0.5, -0.25, 1.0))).length() < 1e-5);
    }

    #[test]
    fn expand_keeps_center() {
        let aabb = aabb_from_bottom_center(Vec3::ZERO, 0.2, 0.2);
        let grown = expand_aabb(&aabb, 0.5);

        assert!((grown.max.x - grown.min.x - 1.2).abs() < 1e-6);
        assert!((grown.max.y - grown.min.y - 1.2).abs() < 1e-6);
        let a = (aabb.min + aabb.max) / 2.0;
        let b = (grown.min + grown.max) / 2.0;
        assert!((a - b).length() < 1e-6);
    }
}
