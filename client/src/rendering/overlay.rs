use std::collections::HashSet;

use bevy::math::{IVec3, Vec3};
use shore_shared::sprite::AnimatedSprite;
use shore_shared::world::pack_light;

use super::mesh::{QuadVertex, WaveMeshData};

/// Translucent blue-grey tint of wet ground
pub const WET_COLOR: [f32; 4] = [0.1, 0.1, 0.25, 0.25];
/// Height of the decal above the cell floor, just over its top face
const OVERLAY_LIFT: f32 = 1.01;

/// One flat wet decal on top of each covered cell.
///
/// Light is fixed rather than sampled. Returns `None` for an empty set.
pub fn generate_overlay_mesh(
    cells: &HashSet<IVec3>,
    wet_sprite: &AnimatedSprite,
    camera_position: Vec3,
) -> Option<WaveMeshData> {
    let uvs = wet_sprite.uvs;
    let light = pack_light(0, 0);

    let mut data = WaveMeshData::new();
    for cell in cells {
        let origin = cell.as_vec3() + Vec3::Y * OVERLAY_LIFT - camera_position;
        let corner = |x: f32, z: f32, uv: [f32; 2]| QuadVertex {
            position: origin + Vec3::new(x, 0.0, z),
            uv,
        };
        data.push_quad(
            [
                corner(0.0, 0.0, [uvs.u0, uvs.v0]),
                corner(0.0, 1.0, [uvs.u0, uvs.v1]),
                corner(1.0, 1.0, [uvs.u1, uvs.v1]),
                corner(1.0, 0.0, [uvs.u1, uvs.v0]),
            ],
            WET_COLOR,
            light,
        );
    }

    (!data.is_empty()).then_some(data)
}

#[cfg(test)]
mod tests {
    use shore_shared::sprite::UvCoords;

    use super::*;

    fn wet_sprite() -> AnimatedSprite {
        AnimatedSprite::still(UvCoords::new(0.0, 0.25, 0.5, 0.5625), 16)
    }

    #[test]
    fn one_quad_per_cell() {
        let cells: HashSet<IVec3> = [IVec3::new(0, 61, 0), IVec3::new(1, 61, 0), IVec3::new(1, 61, 1)]
            .into_iter()
            .collect();

        let mesh = generate_overlay_mesh(&cells, &wet_sprite(), Vec3::ZERO).unwrap();

        assert_eq!(mesh.quad_count(), 3);
        assert!(mesh.colors.iter().all(|color| *color == WET_COLOR));
        assert!(mesh.lights.iter().all(|light| *light == 0));
    }

    #[test]
    fn decal_sits_on_the_top_face_relative_to_camera() {
        let cells: HashSet<IVec3> = [IVec3::new(4, 61, -2)].into_iter().collect();
        let camera = Vec3::new(1.0, 60.0, 1.0);

        let mesh = generate_overlay_mesh(&cells, &wet_sprite(), camera).unwrap();

        let first = Vec3::from_array(mesh.positions[0]);
        let opposite = Vec3::from_array(mesh.positions[2]);
        assert!((first - Vec3::new(3.0, 2.01, -3.0)).length() < 1e-4);
        assert!((opposite - Vec3::new(4.0, 2.01, -2.0)).length() < 1e-4);
        assert_eq!(mesh.uvs[0], [0.0, 0.5]);
        assert_eq!(mesh.uvs[2], [0.25, 0.5625]);
    }

    #[test]
    fn no_cells_no_mesh() {
        assert!(generate_overlay_mesh(&HashSet::new(), &wet_sprite(), Vec3::ZERO).is_none());
    }
}
