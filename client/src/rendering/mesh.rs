use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, MeshVertexAttribute, PrimitiveTopology},
        render_resource::VertexFormat,
    },
};
use shore_shared::sprite::UvCoords;

/// Packed block/sky light per vertex, `block << 4 | sky << 20`.
pub const ATTRIBUTE_LIGHT: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_Light", 988_540_917, VertexFormat::Uint32);

/// One vertex of a wave quad before it is packed into a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    pub position: Vec3,
    pub uv: [f32; 2],
}

/// Quad geometry ready to become a Bevy mesh.
///
/// Vertices are relative to the camera.
#[derive(Debug, Default, Clone)]
pub struct WaveMeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub lights: Vec<u32>,
    pub indices: Vec<u32>,
}

impl WaveMeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Appends a quad made of two triangles, `0 1 2` and `0 2 3`.
    pub fn push_quad(&mut self, vertices: [QuadVertex; 4], color: [f32; 4], light: u32) {
        let base = self.positions.len() as u32;
        for vertex in vertices {
            self.positions.push(vertex.position.to_array());
            self.normals.push([0.0, 1.0, 0.0]);
            self.uvs.push(vertex.uv);
            self.colors.push(color);
            self.lights.push(light);
        }
        self.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Appends all of `other`, shifting its indices past the current vertices.
    pub fn extend(&mut self, other: WaveMeshData) {
        let offset = self.positions.len() as u32;
        self.positions.extend(other.positions);
        self.normals.extend(other.normals);
        self.uvs.extend(other.uvs);
        self.colors.extend(other.colors);
        self.lights.extend(other.lights);
        self.indices
            .extend(other.indices.into_iter().map(|index| index + offset));
    }

    pub fn into_mesh(self) -> Option<Mesh> {
        if self.is_empty() {
            return None;
        }

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, Default::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors);
        mesh.insert_attribute(ATTRIBUTE_LIGHT, self.lights);
        mesh.insert_indices(Indices::U32(self.indices));
        Some(mesh)
    }
}

/// Corners of an axis-aligned quad in the XZ plane, wound for `push_quad`.
///
/// UVs follow the texture so that `v1` is the near edge along negative Z.
pub fn flat_quad(center: Vec3, half_width: f32, half_length: f32, uvs: UvCoords) -> [QuadVertex; 4] {
    [
        QuadVertex {
            position: center + Vec3::new(-half_width, 0.0, -half_length),
            uv: [uvs.u0, uvs.v1],
        },
        QuadVertex {
            position: center + Vec3::new(-half_width, 0.0, half_length),
            uv: [uvs.u0, uvs.v0],
        },
        QuadVertex {
            position: center + Vec3::new(half_width, 0.0, half_length),
            uv: [uvs.u1, uvs.v0],
        },
        QuadVertex {
            position: center + Vec3::new(half_width, 0.0, -half_length),
            uv: [uvs.u1, uvs.v1],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> [QuadVertex; 4] {
        flat_quad(Vec3::ZERO, 0.5, 0.5, UvCoords::new(0.0, 1.0, 0.0, 1.0))
    }

    #[test]
    fn push_quad_adds_four_vertices_and_two_triangles() {
        let mut data = WaveMeshData::new();
        data.push_quad(unit_quad(), [1.0; 4], 7);
        data.push_quad(unit_quad(), [1.0; 4], 7);

        assert_eq!(data.quad_count(), 2);
        assert_eq!(data.vertex_count(), 8);
        assert_eq!(data.lights, vec![7; 8]);
        assert_eq!(&data.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn extend_offsets_indices() {
        let mut first = WaveMeshData::new();
        first.push_quad(unit_quad(), [1.0; 4], 0);
        let mut second = WaveMeshData::new();
        second.push_quad(unit_quad(), [0.5; 4], 0);

        first.extend(second);

        assert_eq!(first.quad_count(), 2);
        assert_eq!(first.indices.iter().copied().max(), Some(7));
        assert_eq!(first.colors[4], [0.5; 4]);
    }

    #[test]
    fn flat_quad_spans_its_extent() {
        let quad = flat_quad(Vec3::new(1.0, 2.0, 3.0), 0.5, 1.0, UvCoords::new(0.1, 0.2, 0.3, 0.4));

        assert_eq!(quad[0].position, Vec3::new(0.5, 2.0, 2.0));
        assert_eq!(quad[2].position, Vec3::new(1.5, 2.0, 4.0));
        assert_eq!(quad[0].uv, [0.1, 0.4]);
        assert_eq!(quad[2].uv, [0.2, 0.3]);
    }

    #[test]
    fn empty_data_has_no_mesh() {
        assert!(WaveMeshData::new().into_mesh().is_none());
    }

    #[test]
    fn mesh_carries_light_attribute() {
        let mut data = WaveMeshData::new();
        data.push_quad(unit_quad(), [1.0; 4], 240);

        let mesh = data.into_mesh().unwrap();
        assert_eq!(mesh.count_vertices(), 4);
        assert!(mesh.attribute(ATTRIBUTE_LIGHT).is_some());
    }
}
